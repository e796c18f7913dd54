/*
 * Copyright 2017 Bitwise IO, Inc.
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

//! Traits for handling the execution of an invocation.
//!
//! The TransactionHandler trait provides the interface a chaincode host uses to run a contract.
//! Handlers must be stateless and deterministic. They are provided, along with the invocation
//! itself, a TransactionContext implementation which provides access to reading and writing
//! world state.

mod error;

pub use crate::handler::error::{ApplyError, ContextError};
use crate::protocol::invocation::Invocation;

pub trait TransactionContext {
    /// get_state_entry queries world state for data at the address given. If the address is
    /// set, the data is returned.
    ///
    /// # Arguments
    ///
    /// * `address` - the address to fetch
    fn get_state_entry(&self, address: &str) -> Result<Option<Vec<u8>>, ContextError> {
        Ok(self
            .get_state_entries(&[address.to_string()])?
            .into_iter()
            .map(|(_, val)| val)
            .next())
    }

    /// get_state_entries queries world state for data at each of the addresses in the given
    /// list. The addresses that have been set are returned.
    ///
    /// # Arguments
    ///
    /// * `addresses` - the addresses to fetch
    fn get_state_entries(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, ContextError>;

    /// set_state_entry requests that the provided address is set in world state to its
    /// corresponding value.
    ///
    /// # Arguments
    ///
    /// * `address` - address of where to store the data
    /// * `data` - the data to store at the address
    fn set_state_entry(&self, address: String, data: Vec<u8>) -> Result<(), ContextError> {
        self.set_state_entries(vec![(address, data)])
    }

    /// set_state_entries requests that each address in the provided list be set in world state
    /// to its corresponding value.
    ///
    /// # Arguments
    ///
    /// * `entries` - address and data pairs to store
    fn set_state_entries(&self, entries: Vec<(String, Vec<u8>)>) -> Result<(), ContextError>;
}

pub trait TransactionHandler: Send {
    /// contract_name should return the namespace of the contract this handler runs, e.g.
    /// "org.fruitbasket.fruitcontract". Invocations that name a contract are only routed to the
    /// handler with the matching name.
    fn contract_name(&self) -> &str;

    /// Apply is the single method where all the business logic for a contract is defined. The
    /// method is called by the host with the invocation and a context over the world state the
    /// invocation runs against.
    ///
    /// On success, the returned bytes are the response handed back to the client. On failure,
    /// none of the writes made through the context may be committed.
    fn apply(
        &self,
        invocation: &Invocation,
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError>;
}
