// src/platform/native.rs - File-backed storage for native builds

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result, StorageOperation};
use crate::platform::storage::StorageProvider;

/// Default directory for stored blobs: `<data dir>/sc-store/storage`
pub fn default_storage_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| std::env::current_dir().ok().map(|d| d.join("data")))
        .unwrap_or_else(|| PathBuf::from("data"))
        .join("sc-store")
        .join("storage")
}

/// One file per key. Writes go to a sibling temp file that is then renamed
/// over the target, so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    storage_path: PathBuf,
}

impl FileStorage {
    pub fn open(storage_path: impl AsRef<Path>) -> Result<Self> {
        let storage_path = storage_path.as_ref().to_path_buf();
        fs::create_dir_all(&storage_path).map_err(|e| {
            Error::persistence(
                "file",
                StorageOperation::Open,
                format!(
                    "Failed to create storage directory {}: {}",
                    storage_path.display(),
                    e
                ),
            )
        })?;

        Ok(Self { storage_path })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    fn key_to_path(&self, key: &str) -> PathBuf {
        let safe_key = key.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_");
        self.storage_path.join(format!("{}.json", safe_key))
    }
}

impl StorageProvider for FileStorage {
    fn backend(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_to_path(key);
        match fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::persistence(
                self.backend(),
                StorageOperation::Read,
                format!("Failed to read key {}: {}", key, e),
            )),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.key_to_path(key);
        let tmp_path = path.with_extension("json.tmp");

        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(value)?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            Error::persistence(
                self.backend(),
                StorageOperation::Write,
                format!("Failed to write key {}: {}", key, e),
            )
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_to_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::persistence(
                self.backend(),
                StorageOperation::Delete,
                format!("Failed to delete key {}: {}", key, e),
            )),
        }
    }
}
