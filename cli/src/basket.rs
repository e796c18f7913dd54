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

//! The sell, buy and query commands.

use std::path::Path;

use fruitbasket::contract::state::deserialize;
use fruitbasket::families::fruit_basket::{
    FruitBasket, FruitBasketContract, FruitBasketState, CHAINCODE_NAME, CONTRACT_NAME,
};
use fruitbasket::gateway::{
    ChaincodeRegistry, ConnectionProfile, Contract, Gateway, GatewayError, GatewayOptions,
};
use fruitbasket::wallet::FileSystemWallet;

use crate::args::{BuyArgs, QueryArgs, SellArgs};
use crate::error::CliError;
use crate::user::UserConfig;

const CHANNEL: &str = "mychannel";
const SEPARATOR_START: &str =
    "----------------------- Smart Contract Execution ---------------------------";
const SEPARATOR_END: &str =
    "--------------------------- Transaction complete ---------------------------";

/// Lists a new basket owned by the current user.
pub fn do_sell(
    user: &UserConfig,
    org_root: &Path,
    args: &SellArgs,
) -> Result<FruitBasket, CliError> {
    let basket = with_contract(user, org_root, None, |contract| {
        info!("Submit fruit basket sell transaction.");
        contract.submit_transaction(
            "sell",
            &[
                user.name,
                args.id.as_str(),
                user.name,
                args.fruit_name.as_str(),
                args.price.to_string().as_str(),
            ],
        )
    })
    .and_then(|response| decode(&response))?;

    println!("{}", SEPARATOR_START);
    println!(
        "{} fruit basket : {} successfully issued with {} at price: {}",
        basket.seller(),
        basket.id(),
        basket.fruit_name(),
        basket.price()
    );
    println!("{}", SEPARATOR_END);

    Ok(basket)
}

/// Buys a basket for the current user.
pub fn do_buy(user: &UserConfig, org_root: &Path, args: &BuyArgs) -> Result<FruitBasket, CliError> {
    let basket = with_contract(user, org_root, Some(CONTRACT_NAME), |contract| {
        info!("Submit fruit basket buy transaction.");
        contract.submit_transaction(
            "buy",
            &[
                args.seller.as_str(),
                args.id.as_str(),
                user.name,
                args.price.to_string().as_str(),
            ],
        )
    })
    .and_then(|response| decode(&response))?;

    println!("{}", SEPARATOR_START);
    println!(
        "{}'s {} basket with id : {} successfully bought at price: {}",
        basket.seller(),
        basket.fruit_name(),
        basket.id(),
        basket.price()
    );
    println!("{}", SEPARATOR_END);

    Ok(basket)
}

/// Prints a basket.
pub fn do_query(user: &UserConfig, org_root: &Path, args: &QueryArgs) -> Result<(), CliError> {
    let response = with_contract(user, org_root, None, |contract| {
        info!("Submit fruit basket query transaction.");
        contract.evaluate_transaction("queryBasket", &[args.seller.as_str(), args.id.as_str()])
    })?;
    let basket: serde_json::Value = serde_json::from_slice(&response)?;

    println!("{}", SEPARATOR_START);
    println!("Basket:");
    println!("{}", serde_json::to_string_pretty(&basket)?);
    println!("{}", SEPARATOR_END);

    Ok(())
}

/// Connects to the current user's gateway, runs `f` against the fruit basket contract and
/// disconnects again, whether or not `f` succeeded.
fn with_contract<F>(
    user: &UserConfig,
    org_root: &Path,
    contract_name: Option<&str>,
    f: F,
) -> Result<Vec<u8>, CliError>
where
    F: FnOnce(&Contract) -> Result<Vec<u8>, GatewayError>,
{
    let wallet = FileSystemWallet::new(user.wallet_path(org_root));
    let profile = ConnectionProfile::from_yaml_file(user.connection_profile_path(org_root))?;

    let mut registry = ChaincodeRegistry::new();
    registry.register(CHAINCODE_NAME, Box::new(FruitBasketContract::new()));
    let mut gateway = Gateway::new(registry);

    info!("Connect to Fabric gateway.");
    gateway.connect(
        &profile,
        GatewayOptions {
            identity: user.name,
            wallet: &wallet,
        },
    )?;

    info!("Use network channel: {}.", CHANNEL);
    let result = gateway.get_network(CHANNEL).and_then(|network| {
        let contract = match contract_name {
            Some(name) => network.get_contract_with_name(CHAINCODE_NAME, name)?,
            None => network.get_contract(CHAINCODE_NAME)?,
        };
        info!(
            "Use {} smart contract.",
            contract_name.unwrap_or(CONTRACT_NAME)
        );
        f(&contract)
    });

    info!("Disconnect from Fabric gateway.");
    gateway.disconnect();

    Ok(result?)
}

fn decode(response: &[u8]) -> Result<FruitBasket, CliError> {
    Ok(deserialize::<FruitBasketState>(response)?.into_fruit_basket())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use fruitbasket::handler::ApplyError;
    use fruitbasket::wallet::{Identity, Wallet};
    use tempdir::TempDir;

    /// Lays out an organization directory for `user` with an identity in their wallet and a
    /// connection profile whose peer keeps its ledger in `<org_root>/ledger`.
    fn setup_user(org_root: &Path, name: &str) -> UserConfig {
        let user = UserConfig::from_name(name).expect("Unable to resolve user");
        FileSystemWallet::new(user.wallet_path(org_root))
            .put(user.name, Identity::x509(user.msp_id, "CERT", "KEY"))
            .expect("Unable to add identity");

        let profile_path = user.connection_profile_path(org_root);
        fs::create_dir_all(profile_path.parent().expect("No parent")).expect("Unable to mkdir");
        fs::write(
            &profile_path,
            format!(
                "name: test\n\
                 client:\n  organization: Org\n\
                 organizations:\n  Org:\n    mspid: {}\n    peers:\n    - peer0\n\
                 peers:\n  peer0:\n    url: file://../../ledger\n",
                user.msp_id
            ),
        )
        .expect("Unable to write profile");

        user
    }

    #[test]
    /// Isabella sells, Balaji buys, and both see the same basket afterwards
    fn test_sell_buy_query() {
        let temp_dir = TempDir::new("test_sell_buy_query").expect("Unable to create temp dir");
        let isabella = setup_user(temp_dir.path(), "isabella");
        let balaji = setup_user(temp_dir.path(), "balaji");

        let sold = do_sell(
            &isabella,
            temp_dir.path(),
            &SellArgs {
                id: "1".into(),
                fruit_name: "apple".into(),
                price: 5.0,
            },
        )
        .expect("Unable to sell");
        assert_eq!(sold.owner(), "isabella");

        let bought = do_buy(
            &balaji,
            temp_dir.path(),
            &BuyArgs {
                seller: "isabella".into(),
                id: "1".into(),
                price: 5.0,
            },
        )
        .expect("Unable to buy");
        assert_eq!(bought.owner(), "balaji");
        assert_eq!(bought.fruit_name(), "apple");

        do_query(
            &isabella,
            temp_dir.path(),
            &QueryArgs {
                seller: "isabella".into(),
                id: "1".into(),
            },
        )
        .expect("Unable to query");
    }

    #[test]
    fn test_buy_own_basket() {
        let temp_dir = TempDir::new("test_buy_own_basket").expect("Unable to create temp dir");
        let isabella = setup_user(temp_dir.path(), "isabella");

        do_sell(
            &isabella,
            temp_dir.path(),
            &SellArgs {
                id: "2".into(),
                fruit_name: "pear".into(),
                price: 1.0,
            },
        )
        .expect("Unable to sell");

        match do_buy(
            &isabella,
            temp_dir.path(),
            &BuyArgs {
                seller: "isabella".into(),
                id: "2".into(),
                price: 10.0,
            },
        ) {
            Err(CliError::Gateway(GatewayError::EndorsementError(
                ApplyError::InvalidTransaction(msg),
            ))) => assert_eq!(msg, "You can't buy your own basket!"),
            res => panic!("Expected the purchase to be rejected, got {:?}", res),
        }
    }

    #[test]
    fn test_missing_profile() {
        let temp_dir = TempDir::new("test_missing_profile").expect("Unable to create temp dir");
        let user = UserConfig::from_name("balaji").expect("Unable to resolve user");

        match do_query(
            &user,
            temp_dir.path(),
            &QueryArgs {
                seller: "isabella".into(),
                id: "1".into(),
            },
        ) {
            Err(CliError::Gateway(GatewayError::IoError(_))) => (),
            res => panic!("Expected an io error, got {:?}", res),
        }
    }
}
