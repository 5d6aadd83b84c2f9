// src/platform/mod.rs - Storage backend selection

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub mod memory;
pub mod storage;

pub use memory::MemoryStorage;
#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStorage;
pub use storage::{DynStorage, StorageArc, StorageProvider};
#[cfg(target_arch = "wasm32")]
pub use web::WebStorage;

/// Build the configured storage backend.
///
/// Never fails: a backend that cannot be created on this platform is replaced
/// by session-only memory storage, and the review store keeps working.
pub fn create_storage(config: &StorageConfig) -> StorageArc {
    match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::with_quota(config.quota_bytes)),
        StorageBackend::File => create_file_storage(config),
        StorageBackend::Browser => create_browser_storage(config),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_file_storage(config: &StorageConfig) -> StorageArc {
    let dir = config
        .data_dir
        .clone()
        .unwrap_or_else(native::default_storage_dir);

    match FileStorage::open(&dir) {
        Ok(storage) => {
            tracing::debug!(path = %dir.display(), "Using file storage");
            Arc::new(storage)
        }
        Err(e) => {
            tracing::warn!(error = %e, "File storage unavailable, reviews will not survive a restart");
            Arc::new(MemoryStorage::with_quota(config.quota_bytes))
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn create_file_storage(config: &StorageConfig) -> StorageArc {
    tracing::warn!("File storage is not available in the browser, using memory storage");
    Arc::new(MemoryStorage::with_quota(config.quota_bytes))
}

#[cfg(target_arch = "wasm32")]
fn create_browser_storage(_config: &StorageConfig) -> StorageArc {
    Arc::new(WebStorage::new())
}

#[cfg(not(target_arch = "wasm32"))]
fn create_browser_storage(config: &StorageConfig) -> StorageArc {
    tracing::warn!("localStorage is only available in the browser, using memory storage");
    Arc::new(MemoryStorage::with_quota(config.quota_bytes))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_create_memory_storage() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        };
        let storage = create_storage(&config);
        assert_eq!(storage.backend(), "memory");
    }

    #[test]
    fn test_create_file_storage_in_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            data_dir: Some(dir.path().join("reviews")),
            ..StorageConfig::default()
        };
        let storage = create_storage(&config);
        assert_eq!(storage.backend(), "file");
        assert!(dir.path().join("reviews").is_dir());
    }

    #[test]
    fn test_file_storage_falls_back_to_memory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            data_dir: Some(file.path().to_path_buf()),
            ..StorageConfig::default()
        };
        assert_eq!(create_storage(&config).backend(), "memory");
    }

    #[test]
    fn test_browser_backend_outside_browser_uses_memory() {
        let config = StorageConfig {
            backend: StorageBackend::Browser,
            ..StorageConfig::default()
        };
        assert_eq!(create_storage(&config).backend(), "memory");
    }
}
