//! JSON file backed store
//!
//! The file holds one flat JSON object, `{"bestScore2048": "4096", ...}`. It is
//! read once on open and rewritten in full on every change.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{ScoreStore, StoreError};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`
    ///
    /// A missing file opens empty. An unreadable or corrupt file also opens
    /// empty, with a warning, and is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => parse_values(&path, &text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                log::warn!("cannot read score file {}: {err}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all values through a sibling temp file and an atomic rename
    fn persist(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let text = serde_json::to_string_pretty(&self.values)?;
        let tmp = temp_path(&self.path);
        fs::write(&tmp, text).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// Update one value and rewrite the file
    ///
    /// On a write error the in-memory value is rolled back.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.values.insert(key.to_string(), value.to_string());
        if let Err(err) = self.persist() {
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn parse_values(path: &Path, text: &str) -> BTreeMap<String, String> {
    let object = match serde_json::from_str::<serde_json::Map<String, Value>>(text) {
        Ok(object) => object,
        Err(err) => {
            log::warn!("ignoring corrupt score file {}: {err}", path.display());
            return BTreeMap::new();
        }
    };

    let mut values = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::String(s) => {
                values.insert(key, s);
            }
            // hand-edited files may carry bare numbers
            Value::Number(n) => {
                values.insert(key, n.to_string());
            }
            other => log::warn!("skipping non-scalar entry {key}: {other}"),
        }
    }
    values
}
