/*
 * Copyright 2018 Bitwise IO, Inc.
 * Copyright 2021 Cargill Incorporated
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

//! Methods for interacting with world state.
//!
//! World state is managed via the implementation of two traits: `Write` and `Read`. These
//! provide commit and read access, respectively, to an underlying storage mechanism.

pub mod error;
#[cfg(feature = "state-file")]
pub mod file;
pub mod hashmap;

pub use crate::state::error::{StateReadError, StateWriteError};
use std::collections::HashMap;

/// A change to be applied to world state, in terms of keys and values.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Set { key: String, value: Vec<u8> },
}

impl StateChange {
    /// Returns true if this change applies to the given key.
    pub fn has_key(&self, k: &str) -> bool {
        match self {
            StateChange::Set { key, .. } => key == k,
        }
    }
}

/// `state::Write` provides a way to write to a particular state storage system.
///
/// All operations are made using `StateChange` instances. These are the ordered set of changes
/// to be applied to the current state; either all of them are persisted or none are.
///
/// Implementations are expected to be thread-safe.
pub trait Write: Send + Sync {
    /// Given a slice of `StateChange` values, persist the state changes.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the changes could not be persisted.
    fn commit(&self, state_changes: &[StateChange]) -> Result<(), StateWriteError>;
}

/// `state::Read` provides a way to retrieve state from a particular storage system.
///
/// Implementations are expected to be thread-safe.
pub trait Read: Send + Sync {
    /// At the current state, return the values for the given keys. Keys which are not set are
    /// omitted from the result.
    fn get(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StateReadError>;
}

/// A store that can be both read from and committed to.
pub trait WorldState: Read + Write {}

impl<T> WorldState for T where T: Read + Write {}
