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

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::gateway::GatewayError;

const FILE_SCHEME: &str = "file://";
const MEMORY_SCHEME: &str = "memory://";

/// Describes how a client organization reaches its peers.
///
/// Only the parts of a connection profile needed to locate the client organization's peers are
/// read; any other sections are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionProfile {
    name: String,
    #[serde(default)]
    version: Option<String>,
    client: ClientConfig,
    #[serde(default)]
    organizations: HashMap<String, OrganizationConfig>,
    #[serde(default)]
    peers: HashMap<String, PeerConfig>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct ClientConfig {
    organization: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OrganizationConfig {
    mspid: String,
    #[serde(default)]
    peers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct PeerConfig {
    url: String,
}

/// Where a peer keeps the world state of its channels.
#[derive(Debug, Clone, PartialEq)]
pub enum PeerEndpoint {
    /// A directory holding one `<channel>.json` state file per channel.
    File(PathBuf),
    /// State kept in memory for as long as the gateway lives.
    Memory,
}

impl ConnectionProfile {
    /// Reads a YAML connection profile. Relative `file://` peer urls are resolved against the
    /// directory holding the profile.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let mut profile = ConnectionProfile::from_yaml_str(&fs::read_to_string(path)?)?;
        profile.base_dir = path.parent().map(Path::to_path_buf);
        Ok(profile)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, GatewayError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn client_organization(&self) -> &str {
        &self.client.organization
    }

    /// Returns the MSP id of the client organization.
    pub fn client_msp_id(&self) -> Result<&str, GatewayError> {
        Ok(&self.organization(&self.client.organization)?.mspid)
    }

    /// Resolves the first peer of the client organization.
    pub fn client_peer(&self) -> Result<PeerEndpoint, GatewayError> {
        let organization = self.organization(&self.client.organization)?;
        let peer_name = organization.peers.first().ok_or_else(|| {
            GatewayError::InvalidProfile(format!(
                "organization {} has no peers",
                self.client.organization
            ))
        })?;
        let peer = self.peers.get(peer_name).ok_or_else(|| {
            GatewayError::InvalidProfile(format!("peer {} is not defined", peer_name))
        })?;

        self.resolve_url(&peer.url)
    }

    fn organization(&self, name: &str) -> Result<&OrganizationConfig, GatewayError> {
        self.organizations.get(name).ok_or_else(|| {
            GatewayError::InvalidProfile(format!("organization {} is not defined", name))
        })
    }

    fn resolve_url(&self, url: &str) -> Result<PeerEndpoint, GatewayError> {
        if url == MEMORY_SCHEME {
            return Ok(PeerEndpoint::Memory);
        }
        if let Some(dir) = url.strip_prefix(FILE_SCHEME) {
            if dir.is_empty() {
                return Err(GatewayError::UnsupportedPeer(url.to_string()));
            }
            let dir = Path::new(dir);
            return Ok(match self.base_dir {
                Some(ref base_dir) if dir.is_relative() => PeerEndpoint::File(base_dir.join(dir)),
                _ => PeerEndpoint::File(dir.to_path_buf()),
            });
        }

        Err(GatewayError::UnsupportedPeer(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempdir::TempDir;

    static PROFILE: &str = r#"
---
name: test-network-org2
version: 1.0.0
client:
  organization: Org2
  connection:
    timeout:
      peer:
        endorser: '300'
organizations:
  Org2:
    mspid: Org2MSP
    peers:
    - peer0.org2.example.com
peers:
  peer0.org2.example.com:
    url: file://ledger
"#;

    #[test]
    /// Unknown sections are ignored and the client organization's first peer is resolved
    fn test_parse_profile() {
        let profile = ConnectionProfile::from_yaml_str(PROFILE).expect("Unable to parse profile");

        assert_eq!(profile.name(), "test-network-org2");
        assert_eq!(profile.version(), Some("1.0.0"));
        assert_eq!(profile.client_organization(), "Org2");
        assert_eq!(profile.client_msp_id().expect("No msp id"), "Org2MSP");
        assert_eq!(
            profile.client_peer().expect("No peer"),
            PeerEndpoint::File(PathBuf::from("ledger"))
        );
    }

    #[test]
    fn test_relative_peer_url_resolved_against_profile() {
        let temp_dir = TempDir::new("test_profile").expect("Unable to create temp dir");
        let profile_path = temp_dir.path().join("connection-org2.yaml");
        fs::write(&profile_path, PROFILE).expect("Unable to write profile");

        let profile =
            ConnectionProfile::from_yaml_file(&profile_path).expect("Unable to read profile");
        assert_eq!(
            profile.client_peer().expect("No peer"),
            PeerEndpoint::File(temp_dir.path().join("ledger"))
        );
    }

    #[test]
    fn test_unsupported_peer() {
        let profile = ConnectionProfile::from_yaml_str(
            &PROFILE.replace("file://ledger", "grpcs://localhost:9051"),
        )
        .expect("Unable to parse profile");

        match profile.client_peer() {
            Err(GatewayError::UnsupportedPeer(url)) => assert_eq!(url, "grpcs://localhost:9051"),
            res => panic!("Expected UnsupportedPeer, got {:?}", res),
        }
    }

    #[test]
    fn test_missing_organization() {
        let yaml = PROFILE.replace("organization: Org2", "organization: Org9");
        let profile = ConnectionProfile::from_yaml_str(&yaml).expect("Unable to parse profile");

        match profile.client_peer() {
            Err(GatewayError::InvalidProfile(_)) => (),
            res => panic!("Expected InvalidProfile, got {:?}", res),
        }
    }
}
