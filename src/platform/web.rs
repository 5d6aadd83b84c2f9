// src/platform/web.rs - Browser localStorage backend

use web_sys::Storage;

use crate::error::{Error, Result, StorageOperation};
use crate::platform::storage::StorageProvider;

/// `window.localStorage`, looked up on every call. Private browsing modes and
/// disabled storage surface as persistence errors rather than panics.
#[derive(Debug, Default)]
pub struct WebStorage {}

impl WebStorage {
    pub fn new() -> Self {
        Self {}
    }

    fn get_storage(&self, operation: StorageOperation) -> Result<Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| {
                Error::persistence(self.backend(), operation, "localStorage not available")
            })
    }
}

impl StorageProvider for WebStorage {
    fn backend(&self) -> &'static str {
        "localStorage"
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let storage = self.get_storage(StorageOperation::Read)?;

        match storage.get_item(key) {
            Ok(Some(value)) => Ok(Some(value.into_bytes())),
            Ok(None) => Ok(None),
            Err(e) => Err(Error::persistence(
                self.backend(),
                StorageOperation::Read,
                format!("Failed to get item: {:?}", e),
            )),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let storage = self.get_storage(StorageOperation::Write)?;
        let value_str = String::from_utf8_lossy(value);

        // QuotaExceededError lands here
        storage.set_item(key, &value_str).map_err(|e| {
            Error::persistence(
                self.backend(),
                StorageOperation::Write,
                format!("Failed to set item: {:?}", e),
            )
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        let storage = self.get_storage(StorageOperation::Delete)?;

        storage.remove_item(key).map_err(|e| {
            Error::persistence(
                self.backend(),
                StorageOperation::Delete,
                format!("Failed to delete item: {:?}", e),
            )
        })
    }
}
