/*
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

//! The invocation of a single contract function.
//!
//! An invocation names the chaincode to run, optionally the contract namespace inside it, the
//! function and its string arguments. It carries the creator's identity and a nonce, from which
//! its transaction id is derived.

use std::error::Error as StdError;
use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha512};

static DEFAULT_NONCE_SIZE: usize = 32;

#[derive(Clone, PartialEq)]
pub struct Invocation {
    transaction_id: String,
    chaincode: String,
    contract: Option<String>,
    function: String,
    args: Vec<String>,
    creator_msp_id: String,
    creator: String,
    nonce: String,
}

impl Invocation {
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn chaincode(&self) -> &str {
        &self.chaincode
    }

    pub fn contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn creator_msp_id(&self) -> &str {
        &self.creator_msp_id
    }

    /// The PEM encoded certificate of the identity that created the invocation.
    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Invocation { ")?;

        write!(f, "transaction_id: {:?}, ", self.transaction_id)?;
        write!(f, "chaincode: {:?}, ", self.chaincode)?;
        write!(f, "contract: {:?}, ", self.contract)?;
        write!(f, "function: {:?}, ", self.function)?;
        write!(f, "args: {:?}, ", self.args)?;
        write!(f, "creator_msp_id: {:?}, ", self.creator_msp_id)?;

        let creator_len = self.creator.len();
        write!(
            f,
            "creator: <{} byte{}>",
            creator_len,
            if creator_len == 1 { "" } else { "s" }
        )?;

        f.write_str(" }")
    }
}

#[derive(Debug)]
pub enum InvocationBuildError {
    InvalidField(String),
    MissingField(String),
}

impl StdError for InvocationBuildError {}

impl fmt::Display for InvocationBuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            InvocationBuildError::InvalidField(ref s) => write!(f, "InvalidField: {}", s),
            InvocationBuildError::MissingField(ref s) => write!(f, "MissingField: {}", s),
        }
    }
}

#[derive(Default, Clone)]
pub struct InvocationBuilder {
    chaincode: Option<String>,
    contract: Option<String>,
    function: Option<String>,
    args: Option<Vec<String>>,
    creator_msp_id: Option<String>,
    creator: Option<String>,
    nonce: Option<String>,
}

impl InvocationBuilder {
    pub fn new() -> Self {
        InvocationBuilder::default()
    }

    pub fn with_chaincode(mut self, chaincode: String) -> InvocationBuilder {
        self.chaincode = Some(chaincode);
        self
    }

    pub fn with_contract(mut self, contract: String) -> InvocationBuilder {
        self.contract = Some(contract);
        self
    }

    pub fn with_function(mut self, function: String) -> InvocationBuilder {
        self.function = Some(function);
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> InvocationBuilder {
        self.args = Some(args);
        self
    }

    pub fn with_creator_msp_id(mut self, creator_msp_id: String) -> InvocationBuilder {
        self.creator_msp_id = Some(creator_msp_id);
        self
    }

    pub fn with_creator(mut self, creator: String) -> InvocationBuilder {
        self.creator = Some(creator);
        self
    }

    pub fn with_nonce(mut self, nonce: String) -> InvocationBuilder {
        self.nonce = Some(nonce);
        self
    }

    pub fn build(self) -> Result<Invocation, InvocationBuildError> {
        let chaincode = self.chaincode.ok_or_else(|| {
            InvocationBuildError::MissingField("'chaincode' field is required".to_string())
        })?;
        let function = self.function.ok_or_else(|| {
            InvocationBuildError::MissingField("'function' field is required".to_string())
        })?;
        let creator_msp_id = self.creator_msp_id.ok_or_else(|| {
            InvocationBuildError::MissingField("'creator_msp_id' field is required".to_string())
        })?;
        let creator = self.creator.ok_or_else(|| {
            InvocationBuildError::MissingField("'creator' field is required".to_string())
        })?;
        let args = self.args.unwrap_or_else(Vec::new);
        let nonce = self.nonce.unwrap_or_else(|| {
            rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(DEFAULT_NONCE_SIZE)
                .collect::<String>()
        });

        if chaincode.is_empty() {
            return Err(InvocationBuildError::InvalidField(
                "'chaincode' must not be empty".to_string(),
            ));
        }
        if function.is_empty() {
            return Err(InvocationBuildError::InvalidField(
                "'function' must not be empty".to_string(),
            ));
        }

        let transaction_id = compute_transaction_id(&nonce, &creator);

        Ok(Invocation {
            transaction_id,
            chaincode,
            contract: self.contract,
            function,
            args,
            creator_msp_id,
            creator,
            nonce,
        })
    }
}

/// Returns the hex encoded SHA-512 digest of the nonce followed by the creator.
fn compute_transaction_id(nonce: &str, creator: &str) -> String {
    let mut sha = Sha512::new();
    sha.input(nonce.as_bytes());
    sha.input(creator.as_bytes());
    hex::encode(sha.result().to_vec())
}
