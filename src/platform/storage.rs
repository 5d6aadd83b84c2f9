// src/platform/storage.rs

use std::sync::Arc;

use crate::error::Result;

#[cfg(not(target_arch = "wasm32"))]
pub type DynStorage = dyn StorageProvider + Send + Sync;

#[cfg(target_arch = "wasm32")]
pub type DynStorage = dyn StorageProvider;

pub type StorageArc = Arc<DynStorage>;

/// Key-value blob storage.
///
/// Every call is synchronous: browser `localStorage` is synchronous and the
/// storefront never awaits anything. A `set` replaces the whole value for a
/// key in one step; readers never observe a partially written value.
pub trait StorageProvider: StorageBounds {
    /// Short backend name used in logs and errors
    fn backend(&self) -> &'static str;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

#[cfg(not(target_arch = "wasm32"))]
pub trait StorageBounds: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> StorageBounds for T {}

#[cfg(target_arch = "wasm32")]
pub trait StorageBounds {}

#[cfg(target_arch = "wasm32")]
impl<T> StorageBounds for T {}
