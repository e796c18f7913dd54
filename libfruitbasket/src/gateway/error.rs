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

use crate::handler::ApplyError;
use crate::protocol::invocation::InvocationBuildError;
use crate::state::StateWriteError;
use crate::wallet::WalletError;

#[derive(Debug)]
pub enum GatewayError {
    NotConnected,
    IdentityNotFound(String),
    InvalidProfile(String),
    InvalidChannel(String),
    UnsupportedPeer(String),
    ChaincodeNotFound(String),
    InvocationBuildError(InvocationBuildError),
    /// The contract rejected the invocation.
    EndorsementError(ApplyError),
    StateWriteError(StateWriteError),
    WalletError(WalletError),
    ProfileError(serde_yaml::Error),
    IoError(std::io::Error),
}

impl StdError for GatewayError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            GatewayError::NotConnected => None,
            GatewayError::IdentityNotFound(_) => None,
            GatewayError::InvalidProfile(_) => None,
            GatewayError::InvalidChannel(_) => None,
            GatewayError::UnsupportedPeer(_) => None,
            GatewayError::ChaincodeNotFound(_) => None,
            GatewayError::InvocationBuildError(ref err) => Some(err),
            GatewayError::EndorsementError(ref err) => Some(err),
            GatewayError::StateWriteError(ref err) => Some(err),
            GatewayError::WalletError(ref err) => Some(err),
            GatewayError::ProfileError(ref err) => Some(err),
            GatewayError::IoError(ref err) => Some(err),
        }
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            GatewayError::NotConnected => write!(f, "Gateway is not connected"),
            GatewayError::IdentityNotFound(ref label) => {
                write!(f, "Identity not found in wallet: {}", label)
            }
            GatewayError::InvalidProfile(ref msg) => {
                write!(f, "Invalid connection profile: {}", msg)
            }
            GatewayError::InvalidChannel(ref channel) => {
                write!(f, "Invalid channel name: {:?}", channel)
            }
            GatewayError::UnsupportedPeer(ref url) => write!(f, "Unsupported peer url: {}", url),
            GatewayError::ChaincodeNotFound(ref name) => {
                write!(f, "Chaincode not found: {}", name)
            }
            GatewayError::InvocationBuildError(ref err) => {
                write!(f, "Unable to build invocation: {}", err)
            }
            GatewayError::EndorsementError(ref err) => write!(f, "{}", err),
            GatewayError::StateWriteError(ref err) => {
                write!(f, "Unable to commit transaction: {}", err)
            }
            GatewayError::WalletError(ref err) => write!(f, "{}", err),
            GatewayError::ProfileError(ref err) => {
                write!(f, "Unable to parse connection profile: {}", err)
            }
            GatewayError::IoError(ref err) => write!(f, "{}", err),
        }
    }
}

impl From<InvocationBuildError> for GatewayError {
    fn from(e: InvocationBuildError) -> Self {
        GatewayError::InvocationBuildError(e)
    }
}

impl From<ApplyError> for GatewayError {
    fn from(e: ApplyError) -> Self {
        GatewayError::EndorsementError(e)
    }
}

impl From<StateWriteError> for GatewayError {
    fn from(e: StateWriteError) -> Self {
        GatewayError::StateWriteError(e)
    }
}

impl From<WalletError> for GatewayError {
    fn from(e: WalletError) -> Self {
        GatewayError::WalletError(e)
    }
}

impl From<serde_yaml::Error> for GatewayError {
    fn from(e: serde_yaml::Error) -> Self {
        GatewayError::ProfileError(e)
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(e: std::io::Error) -> Self {
        GatewayError::IoError(e)
    }
}
