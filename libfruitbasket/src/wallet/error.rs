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

use std::error::Error as StdError;

#[derive(Debug)]
pub enum WalletError {
    InvalidLabel(String),
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
    LockError(String),
}

impl StdError for WalletError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            WalletError::InvalidLabel(_) => None,
            WalletError::IoError(ref err) => Some(err),
            WalletError::SerializationError(ref err) => Some(err),
            WalletError::LockError(_) => None,
        }
    }
}

impl std::fmt::Display for WalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            WalletError::InvalidLabel(ref label) => {
                write!(f, "Invalid identity label: {:?}", label)
            }
            WalletError::IoError(ref err) => write!(f, "Unable to access wallet: {}", err),
            WalletError::SerializationError(ref err) => {
                write!(f, "Unable to read or write identity: {}", err)
            }
            WalletError::LockError(ref msg) => write!(f, "Wallet lock poisoned: {}", msg),
        }
    }
}

impl From<std::io::Error> for WalletError {
    fn from(e: std::io::Error) -> Self {
        WalletError::IoError(e)
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::SerializationError(e)
    }
}
