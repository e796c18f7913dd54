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

use std::error::Error as StdError;

#[derive(Debug)]
pub enum StateError {
    /// A key part contains the key delimiter.
    InvalidKeyPart(String),
    /// The class tag of a record is not one of the supported classes.
    UnknownClass(String),
    ClassMismatch {
        expected: String,
        found: String,
    },
    SerializationError(serde_json::Error),
}

impl StdError for StateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            StateError::InvalidKeyPart(_) => None,
            StateError::UnknownClass(_) => None,
            StateError::ClassMismatch { .. } => None,
            StateError::SerializationError(ref err) => Some(err),
        }
    }
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            StateError::InvalidKeyPart(ref part) => {
                write!(f, "Key part may not contain the key delimiter: {}", part)
            }
            StateError::UnknownClass(ref class) => write!(f, "Unknown class of {}", class),
            StateError::ClassMismatch {
                ref expected,
                ref found,
            } => write!(f, "Expected class {} but found {}", expected, found),
            StateError::SerializationError(ref err) => {
                write!(f, "Unable to serialize or deserialize state: {}", err)
            }
        }
    }
}

impl From<serde_json::Error> for StateError {
    fn from(e: serde_json::Error) -> Self {
        StateError::SerializationError(e)
    }
}
