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

use crate::contract::SmartContract;
use crate::handler::{ApplyError, TransactionContext, TransactionHandler};
use crate::protocol::invocation::Invocation;

impl<T> TransactionHandler for T
where
    T: SmartContract + Send,
{
    fn contract_name(&self) -> &str {
        self.get_contract_name()
    }

    fn apply(
        &self,
        invocation: &Invocation,
        context: &mut dyn TransactionContext,
    ) -> Result<Vec<u8>, ApplyError> {
        if let Some(contract) = invocation.contract() {
            if contract != self.get_contract_name() {
                return Err(ApplyError::InvalidTransaction(format!(
                    "Contract name is not known to chaincode: {}",
                    contract
                )));
            }
        }

        debug!(
            "Invoking {}:{} for transaction {}",
            self.get_contract_name(),
            invocation.function(),
            invocation.transaction_id()
        );
        self.invoke(invocation.function(), invocation.args(), context)
    }
}
