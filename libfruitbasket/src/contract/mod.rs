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

pub mod address;
pub mod context;
pub mod handler;
pub mod state;

use crate::handler::{ApplyError, TransactionContext};

/// A contract exposing named functions over string arguments.
///
/// Every `SmartContract` is also a `TransactionHandler`: the host routes an invocation to the
/// contract by name and calls `invoke` with the invocation's function and arguments.
pub trait SmartContract: Send {
    /// The namespace of the contract, e.g. "org.fruitbasket.fruitcontract".
    fn get_contract_name(&self) -> &str;

    /// Runs the named function, returning the response bytes for the client.
    ///
    /// # Errors
    ///
    /// Returns `ApplyError::InvalidTransaction` if the function does not exist, the arguments are
    /// invalid or a business rule rejects the call.
    fn invoke(
        &self,
        function: &str,
        args: &[String],
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError>;
}
