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
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::wallet::{validate_label, Identity, Wallet, WalletError};

const IDENTITY_FILE_EXTENSION: &str = "id";

/// A wallet storing each identity as a `<label>.id` JSON file in a directory.
///
/// The directory is created the first time an identity is stored.
#[derive(Debug, Clone)]
pub struct FileSystemWallet {
    path: PathBuf,
}

impl FileSystemWallet {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileSystemWallet { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn identity_path(&self, label: &str) -> Result<PathBuf, WalletError> {
        validate_label(label)?;
        Ok(self
            .path
            .join(format!("{}.{}", label, IDENTITY_FILE_EXTENSION)))
    }
}

impl Wallet for FileSystemWallet {
    fn put(&self, label: &str, identity: Identity) -> Result<(), WalletError> {
        let identity_path = self.identity_path(label)?;
        fs::create_dir_all(&self.path)?;
        fs::write(&identity_path, serde_json::to_vec(&identity)?)?;
        debug!("Stored identity {} in {}", label, identity_path.display());
        Ok(())
    }

    fn get(&self, label: &str) -> Result<Option<Identity>, WalletError> {
        let identity_path = self.identity_path(label)?;
        match fs::read(&identity_path) {
            Ok(data) => Ok(Some(serde_json::from_slice(&data)?)),
            Err(ref err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn list(&self) -> Result<Vec<String>, WalletError> {
        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(ref err) if err.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };

        let mut labels = vec![];
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(IDENTITY_FILE_EXTENSION) {
                continue;
            }
            if let Some(label) = path.file_stem().and_then(|stem| stem.to_str()) {
                labels.push(label.to_string());
            }
        }
        labels.sort();

        Ok(labels)
    }

    fn remove(&self, label: &str) -> Result<(), WalletError> {
        match fs::remove_file(self.identity_path(label)?) {
            Ok(()) => Ok(()),
            Err(ref err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
