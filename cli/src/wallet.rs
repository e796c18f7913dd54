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

use std::fs;
use std::path::{Path, PathBuf};

use fruitbasket::wallet::{FileSystemWallet, Identity, Wallet};

use crate::error::CliError;
use crate::user::UserConfig;

/// Stores the current user's identity, made from the test network credentials under `fixtures`,
/// in the user's wallet.
pub fn add_to_wallet(user: &UserConfig, org_root: &Path, fixtures: &Path) -> Result<(), CliError> {
    let credentials = user.credentials_path(fixtures);
    let certificate = read_credential(
        credentials
            .join("signcerts")
            .join(format!("{}-cert.pem", user.fixtures_user)),
    )?;
    let private_key = read_credential(credentials.join("keystore").join("priv_sk"))?;

    let wallet = FileSystemWallet::new(user.wallet_path(org_root));
    wallet.put(
        user.name,
        Identity::x509(user.msp_id, &certificate, &private_key),
    )?;
    info!("Added {} to wallet {}", user.name, wallet.path().display());

    Ok(())
}

fn read_credential(path: PathBuf) -> Result<String, CliError> {
    debug!("Reading {}", path.display());
    fs::read_to_string(&path).map_err(|err| {
        let msg = format!("Error adding to wallet. {}: {}", path.display(), err);
        CliError::User(msg)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempdir::TempDir;

    #[test]
    /// The identity stored in the wallet carries the fixtures user's certificate and key
    fn test_add_to_wallet() {
        let temp_dir = TempDir::new("test_add_to_wallet").expect("Unable to create temp dir");
        let user = UserConfig::from_name("isabella").expect("Unable to resolve user");

        let fixtures = temp_dir.path().join("test-network");
        let credentials = user.credentials_path(&fixtures);
        fs::create_dir_all(credentials.join("signcerts")).expect("Unable to create dir");
        fs::create_dir_all(credentials.join("keystore")).expect("Unable to create dir");
        fs::write(
            credentials
                .join("signcerts")
                .join("User1@org2.example.com-cert.pem"),
            "CERT",
        )
        .expect("Unable to write certificate");
        fs::write(credentials.join("keystore").join("priv_sk"), "KEY")
            .expect("Unable to write key");

        let org_root = temp_dir.path().join("organization");
        add_to_wallet(&user, &org_root, &fixtures).expect("Unable to add to wallet");

        let identity = FileSystemWallet::new(user.wallet_path(&org_root))
            .get("isabella")
            .expect("Unable to read wallet")
            .expect("Identity not in wallet");
        assert_eq!(identity, Identity::x509("Org2MSP", "CERT", "KEY"));
    }

    #[test]
    fn test_add_to_wallet_missing_fixtures() {
        let temp_dir = TempDir::new("test_missing_fixtures").expect("Unable to create temp dir");
        let user = UserConfig::from_name("balaji").expect("Unable to resolve user");

        let fixtures = temp_dir.path().join("test-network");

        match add_to_wallet(&user, temp_dir.path(), &fixtures) {
            Err(CliError::User(msg)) => assert!(msg.contains("Admin@org1.example.com-cert.pem")),
            res => panic!("Expected a user error, got {:?}", res),
        }
    }
}
