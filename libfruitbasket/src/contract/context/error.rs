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

use crate::contract::address::AddresserError;
use crate::contract::state::StateError;
use crate::handler::ContextError;

#[derive(Debug)]
pub enum StateListError {
    KeyAlreadyExists(String),
    KeyNotFound(String),
    AddresserError(AddresserError),
    StateError(StateError),
    TransactionContextError(ContextError),
}

impl StdError for StateListError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            StateListError::KeyAlreadyExists(_) => None,
            StateListError::KeyNotFound(_) => None,
            StateListError::AddresserError(ref err) => Some(err),
            StateListError::StateError(ref err) => Some(err),
            StateListError::TransactionContextError(ref err) => Some(err),
        }
    }
}

impl std::fmt::Display for StateListError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            StateListError::KeyAlreadyExists(ref key) => {
                write!(f, "Cannot create new state. Key {} already exists", key)
            }
            StateListError::KeyNotFound(ref key) => {
                write!(f, "Cannot find state with key {}", key)
            }
            StateListError::AddresserError(ref err) => {
                write!(f, "Error occurred while computing an address: {}", err)
            }
            StateListError::StateError(ref err) => write!(f, "{}", err),
            StateListError::TransactionContextError(ref err) => {
                write!(f, "Error occurred in TransactionContext method: {}", err)
            }
        }
    }
}

impl From<AddresserError> for StateListError {
    fn from(e: AddresserError) -> Self {
        StateListError::AddresserError(e)
    }
}

impl From<StateError> for StateListError {
    fn from(e: StateError) -> Self {
        StateListError::StateError(e)
    }
}

impl From<ContextError> for StateListError {
    fn from(e: ContextError) -> Self {
        StateListError::TransactionContextError(e)
    }
}
