/*
 * Copyright 2019 Cargill Incorporated
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 * -----------------------------------------------------------------------------
 */

mod error;

pub use crate::contract::address::error::AddresserError;

use crate::contract::state::split_key;

/// Separates the object type and each attribute of a composite key.
pub const COMPOSITE_KEY_SEPARATOR: char = '\u{0}';
const MAX_UNICODE_RUNE_VALUE: char = '\u{10FFFF}';

pub trait Addresser<K: ?Sized> {
    /// Returns the world state address calculated from the given key
    ///
    /// # Arguments
    ///
    /// * `key` - A natural key, as defined by K, used to calculate an address
    ///
    fn compute(&self, key: &K) -> Result<String, AddresserError>;

    /// Returns a human readable string of the given key
    ///
    /// # Arguments
    ///
    /// * `key` - A natural key, as defined by K
    ///
    fn normalize(&self, key: &K) -> String;
}

/// Computes the world state address of a state key within a named list.
///
/// The state key is split into its parts and laid out as a composite key: the separator, the
/// list name, then each part followed by the separator. For the list
/// `org.fruitbasket.fruitbasketlist` and the key `isabella:1` that is
/// `\u{0}org.fruitbasket.fruitbasketlist\u{0}isabella\u{0}1\u{0}`.
pub struct CompositeKeyAddresser {
    object_type: String,
}

impl CompositeKeyAddresser {
    pub fn new(object_type: String) -> Result<CompositeKeyAddresser, AddresserError> {
        validate_composite_key_attribute(&object_type)?;
        Ok(CompositeKeyAddresser { object_type })
    }

    pub fn object_type(&self) -> &str {
        &self.object_type
    }
}

impl Addresser<str> for CompositeKeyAddresser {
    fn compute(&self, key: &str) -> Result<String, AddresserError> {
        create_composite_key(&self.object_type, &split_key(key))
    }

    fn normalize(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Lays out an object type and its attributes as a composite key.
pub fn create_composite_key<S: AsRef<str>>(
    object_type: &str,
    attributes: &[S],
) -> Result<String, AddresserError> {
    validate_composite_key_attribute(object_type)?;

    let mut key = String::new();
    key.push(COMPOSITE_KEY_SEPARATOR);
    key.push_str(object_type);
    key.push(COMPOSITE_KEY_SEPARATOR);
    for attribute in attributes {
        let attribute = attribute.as_ref();
        validate_composite_key_attribute(attribute)?;
        key.push_str(attribute);
        key.push(COMPOSITE_KEY_SEPARATOR);
    }

    Ok(key)
}

// The separator and the maximum code point are reserved, so neither may appear in an attribute.
fn validate_composite_key_attribute(attribute: &str) -> Result<(), AddresserError> {
    if attribute.contains(COMPOSITE_KEY_SEPARATOR) || attribute.contains(MAX_UNICODE_RUNE_VALUE) {
        return Err(AddresserError::CompositeKeyAddresserError(format!(
            "input contains a reserved code point: {:?}",
            attribute
        )));
    }
    Ok(())
}
