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

use fruitbasket::contract::state::StateError;
use fruitbasket::gateway::GatewayError;
use fruitbasket::wallet::WalletError;

#[derive(Debug)]
pub enum CliError {
    /// The user has provided invalid inputs; error string
    /// is appropriate for display to the user without additional context
    User(String),
    Wallet(WalletError),
    Gateway(GatewayError),
    State(StateError),
    Json(serde_json::Error),
    Logger(log::SetLoggerError),
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CliError::User(_) => None,
            CliError::Wallet(err) => Some(err),
            CliError::Gateway(err) => Some(err),
            CliError::State(err) => Some(err),
            CliError::Json(err) => Some(err),
            CliError::Logger(err) => Some(err),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            CliError::User(ref s) => write!(f, "Error: {}", s),
            CliError::Wallet(ref err) => write!(f, "WalletError: {}", err),
            CliError::Gateway(ref err) => {
                write!(f, "Error processing transaction. {}", err)
            }
            CliError::State(ref err) => write!(f, "StateError: {}", err),
            CliError::Json(ref err) => write!(f, "JsonError: {}", err),
            CliError::Logger(ref err) => write!(f, "LoggerError: {}", err),
        }
    }
}

impl From<WalletError> for CliError {
    fn from(e: WalletError) -> Self {
        CliError::Wallet(e)
    }
}

impl From<GatewayError> for CliError {
    fn from(e: GatewayError) -> Self {
        CliError::Gateway(e)
    }
}

impl From<StateError> for CliError {
    fn from(e: StateError) -> Self {
        CliError::State(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<log::SetLoggerError> for CliError {
    fn from(e: log::SetLoggerError) -> Self {
        CliError::Logger(e)
    }
}
