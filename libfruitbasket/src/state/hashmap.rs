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

//! Provides a simple, in-memory implementation of world state backed by
//! `std::collections::HashMap`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::error::{StateReadError, StateWriteError};
use super::{Read, StateChange, Write};

/// An in-memory implementation of world state.
///
/// Clones share the same underlying map, so a clone handed to a gateway observes every commit
/// made through any other clone.
#[derive(Debug, Clone, Default)]
pub struct HashMapState {
    state: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl HashMapState {
    pub fn new() -> Self {
        HashMapState::default()
    }
}

impl Write for HashMapState {
    fn commit(&self, state_changes: &[StateChange]) -> Result<(), StateWriteError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| StateWriteError::StorageError("state lock was poisoned".into()))?;

        for change in state_changes {
            match change {
                StateChange::Set { key, value } => state.insert(key.clone(), value.clone()),
            };
        }

        Ok(())
    }
}

impl Read for HashMapState {
    fn get(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StateReadError> {
        let state = self
            .state
            .lock()
            .map_err(|_| StateReadError::StorageError("state lock was poisoned".into()))?;

        Ok(keys
            .iter()
            .filter_map(|k| state.get(k).cloned().map(|v| (k.clone(), v)))
            .collect())
    }
}
