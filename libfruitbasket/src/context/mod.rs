/*
 * Copyright 2019 Bitwise IO, Inc.
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

//! A `TransactionContext` which simulates an invocation against world state.
//!
//! Reads are served from the writes already made in the context, falling back to the underlying
//! `Read` implementation. Writes are only buffered; the caller decides whether to commit the
//! resulting changes, which it does only when the invocation succeeded.

use std::cell::RefCell;

use crate::handler::{ContextError, TransactionContext};
use crate::state::{Read, StateChange};

pub struct SimulationContext<'a, R>
where
    R: Read + ?Sized,
{
    state: &'a R,
    state_changes: RefCell<Vec<StateChange>>,
}

impl<'a, R> SimulationContext<'a, R>
where
    R: Read + ?Sized,
{
    pub fn new(state: &'a R) -> Self {
        SimulationContext {
            state,
            state_changes: RefCell::new(Vec::new()),
        }
    }

    /// Consumes the context, returning the buffered writes in the order they were made.
    pub fn into_changes(self) -> Vec<StateChange> {
        self.state_changes.into_inner()
    }

    fn get_buffered(&self, address: &str) -> Option<Vec<u8>> {
        self.state_changes
            .borrow()
            .iter()
            .rev()
            .find(|state_change| state_change.has_key(address))
            .map(|state_change| match state_change {
                StateChange::Set { value, .. } => value.clone(),
            })
    }
}

impl<'a, R> TransactionContext for SimulationContext<'a, R>
where
    R: Read + ?Sized,
{
    fn get_state_entries(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, ContextError> {
        let mut found = Vec::new();
        let mut unbuffered = Vec::new();
        for address in addresses {
            match self.get_buffered(address) {
                Some(value) => found.push((address.clone(), value)),
                None => unbuffered.push(address.clone()),
            }
        }

        if !unbuffered.is_empty() {
            let mut stored = self
                .state
                .get(&unbuffered)
                .map_err(|err| ContextError::StateReadError(Box::new(err)))?;
            found.extend(
                unbuffered
                    .into_iter()
                    .filter_map(|address| stored.remove(&address).map(|value| (address, value))),
            );
        }

        Ok(found)
    }

    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError> {
        let mut state_changes = self.state_changes.borrow_mut();
        for (key, value) in entries {
            if key.is_empty() {
                return Err(ContextError::InvalidAddressError(
                    "address must not be empty".to_string(),
                ));
            }
            state_changes.push(StateChange::Set { key, value });
        }
        Ok(())
    }
}
