// Copyright 2019 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Records stored in world state.
//!
//! A record is a plain serde struct identified by a composite key and tagged with a class name.
//! On the ledger a record is a JSON object carrying a `class` field alongside the record's own
//! fields, e.g.
//!
//! ```json
//! {"class":"org.fruitbasket.fruitbasket","key":"isabella:1","seller":"isabella", ...}
//! ```
//!
//! The set of classes a list may hold is described by a `StateSet`, normally an enum tagged with
//! `#[serde(tag = "class")]` whose variants wrap the record types.

mod error;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use crate::contract::state::error::StateError;

/// Joins and separates the parts of a state key.
pub const KEY_DELIMITER: &str = ":";

/// Builds a state key by joining the given parts with the key delimiter.
///
/// # Errors
///
/// Returns `StateError::InvalidKeyPart` if a part contains the delimiter, since such a key could
/// not be split back into the same parts.
pub fn make_key<S: AsRef<str>>(parts: &[S]) -> Result<String, StateError> {
    let parts = parts
        .iter()
        .map(|part| {
            let part = part.as_ref();
            if part.contains(KEY_DELIMITER) {
                Err(StateError::InvalidKeyPart(part.to_string()))
            } else {
                Ok(part)
            }
        })
        .collect::<Result<Vec<&str>, StateError>>()?;

    Ok(parts.join(KEY_DELIMITER))
}

/// Splits a state key into its parts.
pub fn split_key(key: &str) -> Vec<String> {
    key.split(KEY_DELIMITER).map(String::from).collect()
}

/// A record with a class tag and a composite key.
pub trait State: Serialize + DeserializeOwned {
    /// The class tag written to the `class` field of the serialized record.
    const CLASS: &'static str;

    fn key(&self) -> &str;

    fn split_key(&self) -> Vec<String> {
        split_key(self.key())
    }

    /// Serializes the record, with its class tag, to JSON bytes.
    fn to_bytes(&self) -> Result<Vec<u8>, StateError> {
        serialize(self)
    }
}

/// A closed set of record classes that may be decoded from the same list.
pub trait StateSet: DeserializeOwned {
    /// The class tags of every supported record type.
    const CLASSES: &'static [&'static str];

    fn supports(class: &str) -> bool {
        Self::CLASSES.contains(&class)
    }
}

#[derive(Serialize)]
struct Tagged<'a, S: Serialize> {
    class: &'a str,
    #[serde(flatten)]
    state: &'a S,
}

#[derive(Deserialize)]
struct Discriminant {
    class: String,
}

/// Serializes a record to JSON bytes, adding its class tag.
pub fn serialize<S: State>(state: &S) -> Result<Vec<u8>, StateError> {
    Ok(serde_json::to_vec(&Tagged {
        class: S::CLASS,
        state,
    })?)
}

/// Decodes a record whose class is one of the classes supported by `T`.
///
/// # Errors
///
/// Returns `StateError::UnknownClass` if the class tag is not one of `T::CLASSES`, and
/// `StateError::SerializationError` if the bytes are not a valid record.
pub fn deserialize<T: StateSet>(data: &[u8]) -> Result<T, StateError> {
    let discriminant: Discriminant = serde_json::from_slice(data)?;
    if !T::supports(&discriminant.class) {
        return Err(StateError::UnknownClass(discriminant.class));
    }

    Ok(serde_json::from_slice(data)?)
}

/// Decodes a record of a single known class.
pub fn deserialize_class<S: State>(data: &[u8]) -> Result<S, StateError> {
    let discriminant: Discriminant = serde_json::from_slice(data)?;
    if discriminant.class != S::CLASS {
        return Err(StateError::ClassMismatch {
            expected: S::CLASS.to_string(),
            found: discriminant.class,
        });
    }

    Ok(serde_json::from_slice(data)?)
}
