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

//! A client session for invoking contracts.
//!
//! A `Gateway` connects with an identity from a wallet to the peer named by a connection profile,
//! and hands out `Network`s (channels) and `Contract`s. Submitting a transaction builds an
//! `Invocation`, simulates it against the channel's world state and, if the contract accepts it,
//! commits the writes it made.
//!
//! ```no_run
//! use fruitbasket::families::fruit_basket::{FruitBasketContract, CHAINCODE_NAME};
//! use fruitbasket::gateway::{ChaincodeRegistry, ConnectionProfile, Gateway, GatewayOptions};
//! use fruitbasket::wallet::FileSystemWallet;
//!
//! let mut registry = ChaincodeRegistry::new();
//! registry.register(CHAINCODE_NAME, Box::new(FruitBasketContract::new()));
//!
//! let wallet = FileSystemWallet::new("identity/user/isabella/wallet");
//! let profile = ConnectionProfile::from_yaml_file("gateway/connection-org2.yaml").unwrap();
//!
//! let mut gateway = Gateway::new(registry);
//! gateway
//!     .connect(&profile, GatewayOptions { identity: "isabella", wallet: &wallet })
//!     .unwrap();
//! let contract = gateway.get_network("mychannel").unwrap().get_contract(CHAINCODE_NAME).unwrap();
//! let basket = contract.evaluate_transaction("queryBasket", &["isabella", "1"]).unwrap();
//! ```

mod error;
mod profile;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::context::SimulationContext;
use crate::handler::TransactionHandler;
use crate::protocol::invocation::{Invocation, InvocationBuilder};
use crate::state::file::FileState;
use crate::state::hashmap::HashMapState;
use crate::state::{StateChange, WorldState};
use crate::wallet::{Identity, Wallet};

pub use crate::gateway::error::GatewayError;
pub use crate::gateway::profile::{ConnectionProfile, PeerEndpoint};

/// The contracts installed on the peers, by chaincode name.
#[derive(Default)]
pub struct ChaincodeRegistry {
    chaincodes: HashMap<String, Vec<Arc<dyn TransactionHandler>>>,
}

impl ChaincodeRegistry {
    pub fn new() -> Self {
        ChaincodeRegistry::default()
    }

    /// Installs a contract in the named chaincode. The first contract installed in a chaincode is
    /// its default contract.
    pub fn register(&mut self, chaincode: &str, handler: Box<dyn TransactionHandler>) {
        self.chaincodes
            .entry(chaincode.to_string())
            .or_insert_with(Vec::new)
            .push(Arc::from(handler));
    }

    /// Returns the named contract of a chaincode, or its default contract if no name is given.
    pub fn get(
        &self,
        chaincode: &str,
        contract: Option<&str>,
    ) -> Result<Arc<dyn TransactionHandler>, GatewayError> {
        let handlers = self
            .chaincodes
            .get(chaincode)
            .ok_or_else(|| GatewayError::ChaincodeNotFound(chaincode.to_string()))?;

        let handler = match contract {
            Some(name) => handlers.iter().find(|h| h.contract_name() == name),
            None => handlers.first(),
        };

        handler.cloned().ok_or_else(|| {
            GatewayError::ChaincodeNotFound(format!(
                "{}:{}",
                chaincode,
                contract.unwrap_or_default()
            ))
        })
    }

    fn contains(&self, chaincode: &str) -> bool {
        self.chaincodes.contains_key(chaincode)
    }
}

pub struct GatewayOptions<'a> {
    /// Label of the identity in the wallet.
    pub identity: &'a str,
    pub wallet: &'a dyn Wallet,
}

struct Session {
    identity: Identity,
    peer: PeerEndpoint,
    connected: Arc<AtomicBool>,
}

pub struct Gateway {
    registry: Arc<ChaincodeRegistry>,
    memory_channels: Mutex<HashMap<String, HashMapState>>,
    session: Option<Session>,
}

impl Gateway {
    pub fn new(registry: ChaincodeRegistry) -> Self {
        Gateway {
            registry: Arc::new(registry),
            memory_channels: Mutex::new(HashMap::new()),
            session: None,
        }
    }

    /// Connects to the client organization's peer with an identity from the wallet.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::IdentityNotFound` if the wallet has no identity under the given
    /// label, and `GatewayError::InvalidProfile` or `GatewayError::UnsupportedPeer` if the
    /// profile does not name a usable peer.
    pub fn connect(
        &mut self,
        profile: &ConnectionProfile,
        options: GatewayOptions,
    ) -> Result<(), GatewayError> {
        let identity = options
            .wallet
            .get(options.identity)?
            .ok_or_else(|| GatewayError::IdentityNotFound(options.identity.to_string()))?;

        let msp_id = profile.client_msp_id()?;
        if identity.msp_id() != msp_id {
            warn!(
                "Identity {} belongs to {}, not the client organization's {}",
                options.identity,
                identity.msp_id(),
                msp_id
            );
        }

        let peer = profile.client_peer()?;
        info!(
            "Connected to {} as {} with {:?}",
            profile.name(),
            options.identity,
            peer
        );

        self.disconnect();
        self.session = Some(Session {
            identity,
            peer,
            connected: Arc::new(AtomicBool::new(true)),
        });
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a channel.
    pub fn get_network(&self, channel: &str) -> Result<Network, GatewayError> {
        let session = self.session.as_ref().ok_or(GatewayError::NotConnected)?;

        if !is_valid_channel(channel) {
            return Err(GatewayError::InvalidChannel(channel.to_string()));
        }

        let state: Arc<dyn WorldState> = match session.peer {
            PeerEndpoint::File(ref dir) => {
                let path: PathBuf = dir.join(format!("{}.json", channel));
                Arc::new(FileState::new(path))
            }
            PeerEndpoint::Memory => {
                let mut channels = self.memory_channels.lock().map_err(|_| {
                    GatewayError::InvalidChannel(format!("{} is unavailable", channel))
                })?;
                Arc::new(
                    channels
                        .entry(channel.to_string())
                        .or_insert_with(HashMapState::new)
                        .clone(),
                )
            }
        };

        Ok(Network {
            channel: channel.to_string(),
            state,
            registry: self.registry.clone(),
            identity: session.identity.clone(),
            connected: session.connected.clone(),
        })
    }

    /// Closes the session. Networks and contracts obtained from it stop working.
    pub fn disconnect(&mut self) {
        if let Some(session) = self.session.take() {
            session.connected.store(false, Ordering::SeqCst);
            debug!("Disconnected gateway");
        }
    }
}

impl Drop for Gateway {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// A channel, and the world state its contracts run against.
#[derive(Clone)]
pub struct Network {
    channel: String,
    state: Arc<dyn WorldState>,
    registry: Arc<ChaincodeRegistry>,
    identity: Identity,
    connected: Arc<AtomicBool>,
}

impl Network {
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Returns the default contract of a chaincode.
    pub fn get_contract(&self, chaincode: &str) -> Result<Contract, GatewayError> {
        self.contract(chaincode, None)
    }

    /// Returns a named contract of a chaincode.
    pub fn get_contract_with_name(
        &self,
        chaincode: &str,
        contract: &str,
    ) -> Result<Contract, GatewayError> {
        self.registry.get(chaincode, Some(contract))?;
        self.contract(chaincode, Some(contract.to_string()))
    }

    fn contract(&self, chaincode: &str, name: Option<String>) -> Result<Contract, GatewayError> {
        if !self.registry.contains(chaincode) {
            return Err(GatewayError::ChaincodeNotFound(chaincode.to_string()));
        }
        Ok(Contract {
            chaincode: chaincode.to_string(),
            name,
            network: self.clone(),
        })
    }
}

pub struct Contract {
    chaincode: String,
    name: Option<String>,
    network: Network,
}

impl Contract {
    pub fn chaincode(&self) -> &str {
        &self.chaincode
    }

    /// Runs a function and commits its writes to the channel's world state.
    ///
    /// Nothing is committed if the contract rejects the invocation.
    pub fn submit_transaction(
        &self,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, GatewayError> {
        let invocation = self.build_invocation(function, args)?;
        let (response, changes) = self.simulate(&invocation)?;

        self.network.state.commit(&changes)?;
        info!(
            "Committed transaction {} on {}",
            invocation.transaction_id(),
            self.network.channel
        );

        Ok(response)
    }

    /// Runs a function without committing its writes.
    pub fn evaluate_transaction(
        &self,
        function: &str,
        args: &[&str],
    ) -> Result<Vec<u8>, GatewayError> {
        let invocation = self.build_invocation(function, args)?;
        Ok(self.simulate(&invocation)?.0)
    }

    fn build_invocation(&self, function: &str, args: &[&str]) -> Result<Invocation, GatewayError> {
        if !self.network.connected.load(Ordering::SeqCst) {
            return Err(GatewayError::NotConnected);
        }

        let mut builder = InvocationBuilder::new()
            .with_chaincode(self.chaincode.clone())
            .with_function(function.to_string())
            .with_args(args.iter().map(|arg| arg.to_string()).collect())
            .with_creator_msp_id(self.network.identity.msp_id().to_string())
            .with_creator(self.network.identity.certificate().to_string());
        if let Some(ref name) = self.name {
            builder = builder.with_contract(name.clone());
        }

        Ok(builder.build()?)
    }

    fn simulate(
        &self,
        invocation: &Invocation,
    ) -> Result<(Vec<u8>, Vec<StateChange>), GatewayError> {
        let handler = self
            .network
            .registry
            .get(invocation.chaincode(), invocation.contract())?;

        let mut context = SimulationContext::new(&*self.network.state);
        let response = handler.apply(invocation, &mut context).map_err(|err| {
            debug!("Invocation {:?} rejected: {}", invocation, err);
            GatewayError::EndorsementError(err)
        })?;

        Ok((response, context.into_changes()))
    }
}

/// Channel names become ledger file names, so they may not hold path separators or `..`.
fn is_valid_channel(channel: &str) -> bool {
    !channel.is_empty() && !channel.contains("..") && !channel.contains(&['/', '\\'][..])
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::contract::SmartContract;
    use crate::handler::{ApplyError, TransactionContext};
    use crate::wallet::InMemoryWallet;

    static PROFILE: &str = r#"
name: test-network-org1
client:
  organization: Org1
organizations:
  Org1:
    mspid: Org1MSP
    peers:
    - peer0.org1.example.com
peers:
  peer0.org1.example.com:
    url: memory://
"#;

    /// Stores its first argument under its second, failing when told to after writing.
    struct EchoContract;

    impl SmartContract for EchoContract {
        fn get_contract_name(&self) -> &str {
            "test.echo"
        }

        fn invoke(
            &self,
            function: &str,
            args: &[String],
            context: &mut dyn TransactionContext,
        ) -> Result<Vec<u8>, ApplyError> {
            context.set_state_entry(args[1].clone(), args[0].as_bytes().to_vec())?;
            match function {
                "put" => Ok(args[0].as_bytes().to_vec()),
                _ => Err(ApplyError::InvalidTransaction("rejected".into())),
            }
        }
    }

    fn connected_gateway(wallet: &InMemoryWallet) -> Gateway {
        let mut registry = ChaincodeRegistry::new();
        registry.register("echo", Box::new(EchoContract));

        let profile = ConnectionProfile::from_yaml_str(PROFILE).expect("Unable to parse profile");
        let mut gateway = Gateway::new(registry);
        gateway
            .connect(
                &profile,
                GatewayOptions {
                    identity: "balaji",
                    wallet,
                },
            )
            .expect("Unable to connect");
        gateway
    }

    fn wallet() -> InMemoryWallet {
        let wallet = InMemoryWallet::new();
        wallet
            .put("balaji", Identity::x509("Org1MSP", "CERT", "KEY"))
            .expect("Unable to put identity");
        wallet
    }

    #[test]
    /// Submitted transactions are committed, evaluated ones are not, and rejected ones commit
    /// nothing.
    fn test_submit_and_evaluate() {
        let wallet = wallet();
        let gateway = connected_gateway(&wallet);
        let network = gateway.get_network("mychannel").expect("No network");
        let contract = network.get_contract("echo").expect("No contract");

        let response = contract
            .submit_transaction("put", &["hello", "a"])
            .expect("Unable to submit");
        assert_eq!(response, b"hello");

        contract
            .evaluate_transaction("put", &["world", "b"])
            .expect("Unable to evaluate");
        match contract.submit_transaction("fail", &["oops", "c"]) {
            Err(GatewayError::EndorsementError(ApplyError::InvalidTransaction(_))) => (),
            res => panic!("Expected EndorsementError, got {:?}", res),
        }

        let keys = ["a".to_string(), "b".to_string(), "c".to_string()];
        let state = network.state.get(&keys).expect("Unable to read state");
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("a"), Some(&b"hello".to_vec()));
    }

    #[test]
    /// Networks on the same in-memory channel share world state, other channels do not
    fn test_memory_channels() {
        let wallet = wallet();
        let gateway = connected_gateway(&wallet);

        gateway
            .get_network("mychannel")
            .and_then(|network| network.get_contract("echo"))
            .and_then(|contract| contract.submit_transaction("put", &["v", "k"]))
            .expect("Unable to submit");

        let same = gateway.get_network("mychannel").expect("No network");
        let other = gateway.get_network("otherchannel").expect("No network");
        let keys = ["k".to_string()];
        let same_entries = same.state.get(&keys).expect("Unable to read");
        let other_entries = other.state.get(&keys).expect("Unable to read");
        assert_eq!(same_entries.len(), 1);
        assert!(other_entries.is_empty());
    }

    #[test]
    fn test_connect_unknown_identity() {
        let profile = ConnectionProfile::from_yaml_str(PROFILE).expect("Unable to parse profile");
        let mut gateway = Gateway::new(ChaincodeRegistry::new());

        match gateway.connect(
            &profile,
            GatewayOptions {
                identity: "nobody",
                wallet: &InMemoryWallet::new(),
            },
        ) {
            Err(GatewayError::IdentityNotFound(label)) => assert_eq!(label, "nobody"),
            res => panic!("Expected IdentityNotFound, got {:?}", res),
        }
        assert!(!gateway.is_connected());
    }

    #[test]
    fn test_disconnect() {
        let wallet = wallet();
        let mut gateway = connected_gateway(&wallet);
        let contract = gateway
            .get_network("mychannel")
            .and_then(|network| network.get_contract("echo"))
            .expect("No contract");

        gateway.disconnect();

        match gateway.get_network("mychannel") {
            Err(GatewayError::NotConnected) => (),
            Err(err) => panic!("Expected NotConnected, got {:?}", err),
            Ok(_) => panic!("Expected NotConnected"),
        }
        match contract.submit_transaction("put", &["v", "k"]) {
            Err(GatewayError::NotConnected) => (),
            res => panic!("Expected NotConnected, got {:?}", res),
        }
    }

    #[test]
    fn test_unknown_contract() {
        let wallet = wallet();
        let gateway = connected_gateway(&wallet);
        let network = gateway.get_network("mychannel").expect("No network");

        assert!(network.get_contract("missing").is_err());
        assert!(network.get_contract_with_name("echo", "test.other").is_err());
        assert!(network.get_contract_with_name("echo", "test.echo").is_ok());
    }

    #[test]
    /// Channel names may contain dots but nothing that escapes the peer's ledger directory.
    fn test_channel_names() {
        let wallet = wallet();
        let gateway = connected_gateway(&wallet);

        let network = gateway.get_network("my.channel").expect("No network");
        assert_eq!(network.channel(), "my.channel");

        for channel in &["", "..", "../etc", "a/b", "a\\b"] {
            match gateway.get_network(channel) {
                Err(GatewayError::InvalidChannel(name)) => assert_eq!(name, *channel),
                Err(err) => panic!("Expected InvalidChannel, got {:?}", err),
                Ok(_) => panic!("Expected InvalidChannel for {:?}", channel),
            }
        }
    }
}
