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

//! Resolves the current user from the `CURRENTUSER` environment variable.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::CliError;

pub const CURRENT_USER_ENV: &str = "CURRENTUSER";

/// Where a user's identity, wallet and connection profile live.
#[derive(Debug, Clone, PartialEq)]
pub struct UserConfig {
    /// The user name, also the label of the user's identity in their wallet.
    pub name: &'static str,
    pub organization: &'static str,
    pub msp_id: &'static str,
    pub connection_profile: &'static str,
    /// Domain of the user's organization in the test network fixtures.
    pub fixtures_domain: &'static str,
    /// The test network user whose credentials the user's identity is made from.
    pub fixtures_user: &'static str,
}

const ISABELLA: UserConfig = UserConfig {
    name: "isabella",
    organization: "magnetocorp",
    msp_id: "Org2MSP",
    connection_profile: "connection-org2.yaml",
    fixtures_domain: "org2.example.com",
    fixtures_user: "User1@org2.example.com",
};

const BALAJI: UserConfig = UserConfig {
    name: "balaji",
    organization: "digibank",
    msp_id: "Org1MSP",
    connection_profile: "connection-org1.yaml",
    fixtures_domain: "org1.example.com",
    fixtures_user: "Admin@org1.example.com",
};

impl UserConfig {
    /// Reads the current user from the environment.
    pub fn from_env() -> Result<Self, CliError> {
        match env::var(CURRENT_USER_ENV) {
            Ok(ref name) if !name.is_empty() => UserConfig::from_name(name),
            _ => Err(CliError::User(
                "Environment current user is not set. Please set the current user as follows: \
                 export CURRENTUSER=\"isabella\" (or \"balaji\")"
                    .into(),
            )),
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CliError> {
        match name {
            "isabella" => Ok(ISABELLA),
            "balaji" => Ok(BALAJI),
            _ => Err(CliError::User(
                "The specified current user is invalid. Please use 'isabella' or 'balaji'".into(),
            )),
        }
    }

    pub fn wallet_path(&self, org_root: &Path) -> PathBuf {
        org_root
            .join(self.organization)
            .join("identity")
            .join("user")
            .join(self.name)
            .join("wallet")
    }

    pub fn connection_profile_path(&self, org_root: &Path) -> PathBuf {
        org_root
            .join(self.organization)
            .join("gateway")
            .join(self.connection_profile)
    }

    /// The directory holding the fixtures user's MSP credentials.
    pub fn credentials_path(&self, fixtures: &Path) -> PathBuf {
        fixtures
            .join("organizations")
            .join("peerOrganizations")
            .join(self.fixtures_domain)
            .join("users")
            .join(self.fixtures_user)
            .join("msp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serial_test::serial;

    #[test]
    #[serial]
    fn test_user_from_env() {
        env::set_var(CURRENT_USER_ENV, "balaji");
        let user = UserConfig::from_env().expect("Unable to resolve user");
        assert_eq!(user.name, "balaji");
        assert_eq!(user.msp_id, "Org1MSP");
        assert_eq!(
            user.wallet_path(Path::new("organization")),
            Path::new("organization/digibank/identity/user/balaji/wallet")
        );
        assert_eq!(
            user.connection_profile_path(Path::new("organization")),
            Path::new("organization/digibank/gateway/connection-org1.yaml")
        );
        env::remove_var(CURRENT_USER_ENV);
    }

    #[test]
    #[serial]
    fn test_user_not_set() {
        env::remove_var(CURRENT_USER_ENV);
        match UserConfig::from_env() {
            Err(CliError::User(msg)) => assert!(msg.contains("current user is not set")),
            res => panic!("Expected a user error, got {:?}", res),
        }
    }

    #[test]
    #[serial]
    fn test_user_invalid() {
        env::set_var(CURRENT_USER_ENV, "mallory");
        match UserConfig::from_env() {
            Err(CliError::User(msg)) => assert!(msg.contains("current user is invalid")),
            res => panic!("Expected a user error, got {:?}", res),
        }
        env::remove_var(CURRENT_USER_ENV);
    }

    #[test]
    fn test_credentials_path() {
        let user = UserConfig::from_name("isabella").expect("Unable to resolve user");
        assert_eq!(
            user.credentials_path(Path::new("test-network")),
            Path::new(
                "test-network/organizations/peerOrganizations/org2.example.com/users/\
                 User1@org2.example.com/msp"
            )
        );
    }
}
