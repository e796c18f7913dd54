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

//! A world state persisted to a single JSON file.
//!
//! The file holds one object mapping each key to its hex encoded value. It is read on every
//! `get`, and on `commit` the updated map is written to a temporary file next to it which then
//! replaces the old file, so a failed commit leaves the previous state intact.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{StateReadError, StateWriteError};
use super::{Read, StateChange, Write};

#[derive(Debug, Clone)]
pub struct FileState {
    path: PathBuf,
}

impl FileState {
    /// Creates a `FileState` stored at the given path. The file, and any missing parent
    /// directories, are created on the first commit.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileState {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, Vec<u8>>, StateReadError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(|err| StateReadError::StorageError(Box::new(err)))?;
        let encoded: BTreeMap<String, String> = serde_json::from_str(&contents)
            .map_err(|err| StateReadError::StorageError(Box::new(err)))?;

        encoded
            .into_iter()
            .map(|(key, value)| {
                let bytes = hex::decode(&value).map_err(|err| {
                    StateReadError::InvalidValue(format!("value at {:?} is not hex: {}", key, err))
                })?;
                Ok((key, bytes))
            })
            .collect()
    }

    fn store(&self, state: &BTreeMap<String, Vec<u8>>) -> Result<(), StateWriteError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| StateWriteError::StorageError(Box::new(err)))?;
            }
        }

        let encoded = state
            .iter()
            .map(|(key, value)| (key.as_str(), hex::encode(value)))
            .collect::<BTreeMap<&str, String>>();
        let contents = serde_json::to_string_pretty(&encoded)
            .map_err(|err| StateWriteError::StorageError(Box::new(err)))?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, contents)
            .map_err(|err| StateWriteError::StorageError(Box::new(err)))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|err| StateWriteError::StorageError(Box::new(err)))?;

        Ok(())
    }
}

impl Write for FileState {
    fn commit(&self, state_changes: &[StateChange]) -> Result<(), StateWriteError> {
        if state_changes.is_empty() {
            return Ok(());
        }

        let mut state = self.load()?;
        for change in state_changes {
            match change {
                StateChange::Set { key, value } => state.insert(key.clone(), value.clone()),
            };
        }

        debug!(
            "Committing {} change(s) to {}",
            state_changes.len(),
            self.path.display()
        );
        self.store(&state)
    }
}

impl Read for FileState {
    fn get(&self, keys: &[String]) -> Result<HashMap<String, Vec<u8>>, StateReadError> {
        let state = self.load()?;

        Ok(keys
            .iter()
            .filter_map(|k| state.get(k).cloned().map(|v| (k.clone(), v)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempdir::TempDir;

    #[test]
    fn read_missing_file() {
        let temp_dir = TempDir::new("read_missing_file").expect("Failed to create temp dir");
        let state = FileState::new(temp_dir.path().join("mychannel.json"));

        let values = state.get(&["a".to_string()]).expect("Unable to read state");
        assert!(values.is_empty());
        assert!(!state.path().exists());
    }

    #[test]
    /// Commits are visible to a second `FileState` opened on the same path, and the temporary
    /// file used for the write does not linger.
    fn commit_persists_across_instances() {
        let temp_dir =
            TempDir::new("commit_persists_across_instances").expect("Failed to create temp dir");
        let path = temp_dir.path().join("ledger").join("mychannel.json");

        FileState::new(&path)
            .commit(&[
                StateChange::Set {
                    key: "\u{0}list\u{0}a\u{0}".to_string(),
                    value: b"{\"a\":1}".to_vec(),
                },
                StateChange::Set {
                    key: "b".to_string(),
                    value: vec![0x00, 0xff],
                },
            ])
            .expect("Unable to commit");

        let reopened = FileState::new(&path);
        let values = reopened
            .get(&["\u{0}list\u{0}a\u{0}".to_string(), "b".to_string()])
            .expect("Unable to read state");
        assert_eq!(
            values.get("\u{0}list\u{0}a\u{0}"),
            Some(&b"{\"a\":1}".to_vec())
        );
        assert_eq!(values.get("b"), Some(&vec![0x00, 0xff]));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn read_corrupt_value() {
        let temp_dir = TempDir::new("read_corrupt_value").expect("Failed to create temp dir");
        let path = temp_dir.path().join("mychannel.json");
        fs::write(&path, "{\"a\": \"not hex\"}").expect("Unable to write test file");

        match FileState::new(&path).get(&["a".to_string()]) {
            Err(StateReadError::InvalidValue(_)) => (),
            res => panic!("Expected InvalidValue error, got {:?}", res),
        }
    }
}
