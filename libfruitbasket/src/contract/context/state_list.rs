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

use std::marker::PhantomData;

use crate::contract::address::{Addresser, CompositeKeyAddresser};
use crate::contract::context::error::StateListError;
use crate::contract::state::{deserialize, State, StateError, StateSet};
use crate::handler::TransactionContext;

/// A named list of records in world state.
///
/// Records are stored at the address an `Addresser` computes from their state key, by default a
/// composite key of the list name and the parts of the state key. A StateList only borrows the
/// transaction context, so one is built for each invocation from the context the invocation was
/// given.
pub struct StateList<'a, T, A = CompositeKeyAddresser>
where
    T: StateSet,
    A: Addresser<str>,
{
    context: &'a dyn TransactionContext,
    addresser: A,
    // T is only used to decode the records read back from state.
    _states: PhantomData<T>,
}

impl<'a, T> StateList<'a, T, CompositeKeyAddresser>
where
    T: StateSet,
{
    /// Creates a StateList addressing its records by composite keys under `name`.
    pub fn new(
        context: &'a dyn TransactionContext,
        name: &str,
    ) -> Result<StateList<'a, T, CompositeKeyAddresser>, StateListError> {
        Ok(StateList::with_addresser(
            context,
            CompositeKeyAddresser::new(name.to_string())?,
        ))
    }
}

impl<'a, T, A> StateList<'a, T, A>
where
    T: StateSet,
    A: Addresser<str>,
{
    pub fn with_addresser(context: &'a dyn TransactionContext, addresser: A) -> Self {
        StateList {
            context,
            addresser,
            _states: PhantomData,
        }
    }

    /// Adds a new record to the list.
    ///
    /// # Errors
    ///
    /// Returns `StateListError::KeyAlreadyExists` if a record is already stored under the
    /// record's key.
    pub fn add_state<S: State>(&self, state: &S) -> Result<(), StateListError> {
        let address = self.address_of(state)?;
        if self.context.get_state_entry(&address)?.is_some() {
            return Err(StateListError::KeyAlreadyExists(state.key().to_string()));
        }

        self.context.set_state_entry(address, state.to_bytes()?)?;
        Ok(())
    }

    /// Reads the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StateListError::KeyNotFound` if there is no record under the key.
    pub fn get_state(&self, key: &str) -> Result<T, StateListError> {
        let address = self.addresser.compute(key)?;
        match self.context.get_state_entry(&address)? {
            Some(data) => Ok(deserialize(&data)?),
            None => Err(StateListError::KeyNotFound(self.addresser.normalize(key))),
        }
    }

    /// Replaces an existing record with `state`.
    ///
    /// # Errors
    ///
    /// Returns `StateListError::KeyNotFound` if there is no record under the record's key.
    pub fn update_state<S: State>(&self, state: &S) -> Result<(), StateListError> {
        let address = self.address_of(state)?;
        if self.context.get_state_entry(&address)?.is_none() {
            return Err(StateListError::KeyNotFound(state.key().to_string()));
        }

        self.context.set_state_entry(address, state.to_bytes()?)?;
        Ok(())
    }

    fn address_of<S: State>(&self, state: &S) -> Result<String, StateListError> {
        if !T::supports(S::CLASS) {
            return Err(StateError::UnknownClass(S::CLASS.to_string()).into());
        }
        Ok(self.addresser.compute(state.key())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde::{Deserialize, Serialize};

    use crate::context::SimulationContext;
    use crate::contract::state::make_key;
    use crate::state::hashmap::HashMapState;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        key: String,
        value: u32,
    }

    impl State for Counter {
        const CLASS: &'static str = "test.counter";

        fn key(&self) -> &str {
            &self.key
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stray {
        key: String,
    }

    impl State for Stray {
        const CLASS: &'static str = "test.stray";

        fn key(&self) -> &str {
            &self.key
        }
    }

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(tag = "class")]
    enum Counters {
        #[serde(rename = "test.counter")]
        Counter(Counter),
    }

    impl StateSet for Counters {
        const CLASSES: &'static [&'static str] = &[Counter::CLASS];
    }

    fn counter(owner: &str, value: u32) -> Counter {
        Counter {
            key: make_key(&[owner, "0"]).expect("Unable to make key"),
            value,
        }
    }

    #[test]
    /// Records added to the list can be read back by key, and are stored at the composite key
    /// address of the list name and the key parts.
    fn test_add_and_get_state() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let list: StateList<Counters> =
            StateList::new(&context, "test.counters").expect("Unable to create list");

        list.add_state(&counter("alice", 1))
            .expect("Unable to add state");

        let Counters::Counter(stored) = list.get_state("alice:0").expect("Unable to get state");
        assert_eq!(stored, counter("alice", 1));

        let changes = context.into_changes();
        assert_eq!(changes.len(), 1);
        assert!(changes[0].has_key("\u{0}test.counters\u{0}alice\u{0}0\u{0}"));
    }

    #[test]
    fn test_add_existing_key() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let list: StateList<Counters> =
            StateList::new(&context, "test.counters").expect("Unable to create list");

        list.add_state(&counter("alice", 1))
            .expect("Unable to add state");
        match list.add_state(&counter("alice", 2)) {
            Err(StateListError::KeyAlreadyExists(key)) => assert_eq!(key, "alice:0"),
            res => panic!("Expected KeyAlreadyExists, got {:?}", res),
        }
    }

    #[test]
    fn test_get_and_update_missing_key() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let list: StateList<Counters> =
            StateList::new(&context, "test.counters").expect("Unable to create list");

        match list.get_state("bob:0") {
            Err(StateListError::KeyNotFound(key)) => assert_eq!(key, "bob:0"),
            res => panic!("Expected KeyNotFound, got {:?}", res),
        }
        match list.update_state(&counter("bob", 3)) {
            Err(StateListError::KeyNotFound(key)) => assert_eq!(key, "bob:0"),
            res => panic!("Expected KeyNotFound, got {:?}", res),
        }
        assert!(context.into_changes().is_empty());
    }

    #[test]
    fn test_update_state() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let list: StateList<Counters> =
            StateList::new(&context, "test.counters").expect("Unable to create list");

        list.add_state(&counter("alice", 1))
            .expect("Unable to add state");
        list.update_state(&counter("alice", 5))
            .expect("Unable to update state");

        let Counters::Counter(stored) = list.get_state("alice:0").expect("Unable to get state");
        assert_eq!(stored.value, 5);
    }

    #[test]
    /// Records whose class is not part of the list's state set are refused.
    fn test_add_unsupported_class() {
        let state = HashMapState::new();
        let context = SimulationContext::new(&state);
        let list: StateList<Counters> =
            StateList::new(&context, "test.counters").expect("Unable to create list");

        match list.add_state(&Stray { key: "x".into() }) {
            Err(StateListError::StateError(StateError::UnknownClass(class))) => {
                assert_eq!(class, "test.stray")
            }
            res => panic!("Expected UnknownClass, got {:?}", res),
        }
    }
}
