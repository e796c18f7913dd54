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

//! Stores of client identities.
//!
//! A wallet holds identities under a label, typically the name of the user the identity belongs
//! to. An identity pairs an X.509 certificate and its private key with the id of the membership
//! service provider (MSP) that issued the certificate.

mod error;
mod file;
mod memory;

use serde::{Deserialize, Serialize};

pub use crate::wallet::error::WalletError;
pub use crate::wallet::file::FileSystemWallet;
pub use crate::wallet::memory::InMemoryWallet;

const X509_IDENTITY_TYPE: &str = "X.509";
const IDENTITY_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    certificate: String,
    private_key: String,
}

/// An identity used to sign invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    credentials: Credentials,
    msp_id: String,
    #[serde(rename = "type")]
    identity_type: String,
    #[serde(default = "default_version")]
    version: u32,
}

fn default_version() -> u32 {
    IDENTITY_VERSION
}

impl Identity {
    /// Creates an X.509 identity from PEM encoded credentials.
    pub fn x509(msp_id: &str, certificate: &str, private_key: &str) -> Self {
        Identity {
            credentials: Credentials {
                certificate: certificate.to_string(),
                private_key: private_key.to_string(),
            },
            msp_id: msp_id.to_string(),
            identity_type: X509_IDENTITY_TYPE.to_string(),
            version: IDENTITY_VERSION,
        }
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    pub fn certificate(&self) -> &str {
        &self.credentials.certificate
    }

    pub fn private_key(&self) -> &str {
        &self.credentials.private_key
    }

    pub fn identity_type(&self) -> &str {
        &self.identity_type
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

pub trait Wallet: Send + Sync {
    /// Stores `identity` under `label`, replacing any identity already stored there.
    fn put(&self, label: &str, identity: Identity) -> Result<(), WalletError>;

    /// Returns the identity stored under `label`, if there is one.
    fn get(&self, label: &str) -> Result<Option<Identity>, WalletError>;

    /// Returns the labels of every stored identity, in sorted order.
    fn list(&self) -> Result<Vec<String>, WalletError>;

    /// Removes the identity stored under `label`. Removing a missing label is not an error.
    fn remove(&self, label: &str) -> Result<(), WalletError>;
}

// Labels name files in a file system wallet, so they may not be paths.
fn validate_label(label: &str) -> Result<(), WalletError> {
    if label.is_empty()
        || label == "."
        || label == ".."
        || label.contains(|c: char| c == '/' || c == '\\' || c == '\u{0}')
    {
        return Err(WalletError::InvalidLabel(label.to_string()));
    }
    Ok(())
}
