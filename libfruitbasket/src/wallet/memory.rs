// Copyright 2021 Cargill Incorporated
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

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::wallet::{validate_label, Identity, Wallet, WalletError};

/// A wallet holding identities in memory.
#[derive(Debug, Default)]
pub struct InMemoryWallet {
    identities: Mutex<BTreeMap<String, Identity>>,
}

impl InMemoryWallet {
    pub fn new() -> Self {
        InMemoryWallet::default()
    }
}

impl Wallet for InMemoryWallet {
    fn put(&self, label: &str, identity: Identity) -> Result<(), WalletError> {
        validate_label(label)?;
        self.identities
            .lock()
            .map_err(|err| WalletError::LockError(err.to_string()))?
            .insert(label.to_string(), identity);
        Ok(())
    }

    fn get(&self, label: &str) -> Result<Option<Identity>, WalletError> {
        Ok(self
            .identities
            .lock()
            .map_err(|err| WalletError::LockError(err.to_string()))?
            .get(label)
            .cloned())
    }

    fn list(&self) -> Result<Vec<String>, WalletError> {
        Ok(self
            .identities
            .lock()
            .map_err(|err| WalletError::LockError(err.to_string()))?
            .keys()
            .cloned()
            .collect())
    }

    fn remove(&self, label: &str) -> Result<(), WalletError> {
        self.identities
            .lock()
            .map_err(|err| WalletError::LockError(err.to_string()))?
            .remove(label);
        Ok(())
    }
}
