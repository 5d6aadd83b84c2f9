// src/review/store.rs - Persistent per-product review lists

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::catalog::Product;
use crate::config::ReviewConfig;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::platform::StorageArc;
use crate::rating::{self, AggregateRating};
use crate::review::{ReviewInput, ReviewLimits, UserReview};
use crate::types::ProductId;

/// Product id to chronological review list, serialized as
/// `{"<id>": [{name, rating, text, date}, ...]}`
pub type ReviewMap = BTreeMap<ProductId, Vec<UserReview>>;

/// Review lists for every product, kept as one JSON blob under a single
/// storage key.
///
/// The blob is re-read before every operation so writes from another store
/// sharing the same storage are picked up. The read-modify-write on `add` is
/// not atomic across stores; the last writer wins.
///
/// Storage failures never reach the caller. The first failed read or write
/// logs a warning and switches the store to its in-memory mirror for the rest
/// of its life. A blob that is not a JSON object is treated the same way, so
/// it is never overwritten.
pub struct ReviewStore {
    storage: StorageArc,
    key: String,
    limits: ReviewLimits,
    mirror: ReviewMap,
    persistent: AtomicBool,
}

impl std::fmt::Debug for ReviewStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewStore")
            .field("backend", &self.storage.backend())
            .field("key", &self.key)
            .field("products", &self.mirror.len())
            .field("persistent", &self.is_persistent())
            .finish()
    }
}

impl ReviewStore {
    /// Open the store under `key`, loading whatever the storage already holds
    pub fn open(storage: StorageArc, key: impl Into<String>, limits: ReviewLimits) -> Self {
        let mut store = Self {
            storage,
            key: key.into(),
            limits,
            mirror: ReviewMap::new(),
            persistent: AtomicBool::new(true),
        };
        store.mirror = store.snapshot();
        tracing::debug!(
            backend = store.storage.backend(),
            key = %store.key,
            products = store.mirror.len(),
            "Review store opened"
        );
        store
    }

    pub fn from_config(storage: StorageArc, storage_key: &str, config: &ReviewConfig) -> Self {
        Self::open(storage, storage_key, ReviewLimits::from(config))
    }

    /// False once a storage failure has forced the store into memory-only mode
    pub fn is_persistent(&self) -> bool {
        self.persistent.load(Ordering::Relaxed)
    }

    pub fn limits(&self) -> &ReviewLimits {
        &self.limits
    }

    /// All reviews for a product, oldest first
    pub fn list(&self, product_id: ProductId) -> Vec<UserReview> {
        self.snapshot().remove(&product_id).unwrap_or_default()
    }

    /// The last `n` reviews, still oldest first
    pub fn recent(&self, product_id: ProductId, n: usize) -> Vec<UserReview> {
        let mut reviews = self.list(product_id);
        let skip = reviews.len().saturating_sub(n);
        reviews.drain(..skip);
        reviews
    }

    /// All reviews for a product, newest first, as shown in the detail view
    pub fn newest_first(&self, product_id: ProductId) -> Vec<UserReview> {
        let mut reviews = self.list(product_id);
        reviews.reverse();
        reviews
    }

    pub fn count(&self, product_id: ProductId) -> usize {
        self.snapshot().get(&product_id).map_or(0, Vec::len)
    }

    /// Seed rating combined with the stored reviews for `product`
    pub fn aggregate(&self, product: &Product) -> AggregateRating {
        rating::aggregate(product, &self.list(product.id))
    }

    /// Validate and append a review.
    ///
    /// Only validation can fail. Nothing changes when it does.
    pub fn add(&mut self, product_id: ProductId, input: ReviewInput) -> Result<UserReview> {
        let review = UserReview::from_input(input, &self.limits)?;

        let mut map = self.snapshot();
        map.entry(product_id).or_default().push(review.clone());
        self.mirror = map;
        self.persist();

        tracing::info!(
            product_id,
            rating = review.rating.value(),
            persistent = self.is_persistent(),
            "Review added"
        );
        Ok(review)
    }

    fn snapshot(&self) -> ReviewMap {
        if !self.is_persistent() {
            return self.mirror.clone();
        }

        match self.storage.get(&self.key) {
            Ok(Some(bytes)) => match parse_blob(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    // Left untouched; writes stop until the store is reopened
                    self.degrade(&e);
                    self.mirror.clone()
                }
            },
            Ok(None) => ReviewMap::new(),
            Err(e) => {
                self.degrade(&e);
                self.mirror.clone()
            }
        }
    }

    fn persist(&self) {
        if !self.is_persistent() {
            return;
        }

        let bytes = match serde_json::to_vec(&self.mirror) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.degrade(&e);
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &bytes) {
            self.degrade(&e);
        }
    }

    fn degrade(&self, error: &dyn std::fmt::Display) {
        if self.persistent.swap(false, Ordering::Relaxed) {
            tracing::warn!(
                backend = self.storage.backend(),
                key = %self.key,
                error = %error,
                "Review storage unavailable, keeping reviews in memory for this session"
            );
        }
    }
}

/// Decode the stored blob one record at a time.
///
/// Only a blob that is not a JSON object is an error. Anything malformed
/// below the top level is skipped with a warning and the rest is kept.
fn parse_blob(bytes: &[u8]) -> Result<ReviewMap> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Object(entries) = value else {
        return Err(Error::serialization("Stored reviews are not a JSON object"));
    };

    let mut map = ReviewMap::new();
    let mut skipped = 0usize;
    for (key, records) in entries {
        let (Ok(product_id), Value::Array(records)) = (key.trim().parse::<ProductId>(), records)
        else {
            skipped += 1;
            continue;
        };

        let list: &mut Vec<UserReview> = map.entry(product_id).or_default();
        for record in records {
            match serde_json::from_value::<UserReview>(record) {
                Ok(review) => list.push(review),
                Err(e) => {
                    skipped += 1;
                    tracing::debug!(product_id, error = %e, "Skipping malformed review record");
                }
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Ignored malformed entries in stored reviews");
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;
    use crate::error::{ErrorKind, StorageOperation};
    use crate::platform::{MemoryStorage, StorageProvider};

    const KEY: &str = "sc_reviews_v1";

    fn open(storage: &MemoryStorage) -> ReviewStore {
        ReviewStore::open(Arc::new(storage.clone()), KEY, ReviewLimits::default())
    }

    struct BrokenStorage;

    impl StorageProvider for BrokenStorage {
        fn backend(&self) -> &'static str {
            "broken"
        }

        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(Error::persistence(self.backend(), StorageOperation::Read, "access denied"))
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(Error::persistence(self.backend(), StorageOperation::Write, "access denied"))
        }

        fn delete(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_store() {
        let store = open(&MemoryStorage::new());
        assert!(store.list(1).is_empty());
        assert_eq!(store.count(1), 0);
        assert!(store.is_persistent());
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = open(&MemoryStorage::new());
        store.add(1, ReviewInput::new("first").rating(4)).unwrap();
        store.add(1, ReviewInput::new("second").rating(2)).unwrap();
        store.add(2, ReviewInput::new("other product")).unwrap();

        let texts: Vec<String> = store.list(1).into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(store.newest_first(1)[0].text, "second");
        assert_eq!(store.count(2), 1);
    }

    #[test]
    fn test_rejected_review_changes_nothing() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.add(1, ReviewInput::new("kept")).unwrap();
        let before = storage.get(KEY).unwrap();

        let err = store.add(1, ReviewInput::new("    ")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Validation { .. }));
        assert_eq!(store.count(1), 1);
        assert_eq!(storage.get(KEY).unwrap(), before);
    }

    #[test]
    fn test_rating_is_clamped() {
        let mut store = open(&MemoryStorage::new());
        assert_eq!(store.add(1, ReviewInput::new("great").rating(99)).unwrap().rating.value(), 5);
        assert_eq!(store.add(1, ReviewInput::new("awful").rating(-3)).unwrap().rating.value(), 1);
    }

    #[test]
    fn test_survives_reopen() {
        let storage = MemoryStorage::new();
        {
            let mut store = open(&storage);
            store.add(1, ReviewInput::new("Great").name("Asha").rating(4)).unwrap();
        }

        let store = open(&storage);
        let reviews = store.list(1);
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].name, "Asha");
        assert_eq!(reviews[0].rating.value(), 4);
    }

    #[test]
    fn test_stored_layout() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.add(7, ReviewInput::new("Nice").name("Ravi").rating(3)).unwrap();

        let bytes = storage.get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let entry = &value["7"][0];
        assert_eq!(entry["name"], "Ravi");
        assert_eq!(entry["rating"], 3);
        assert_eq!(entry["text"], "Nice");
        assert!(entry["date"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_sees_writes_from_another_store() {
        let storage = MemoryStorage::new();
        let mut first = open(&storage);
        let second = open(&storage);

        first.add(3, ReviewInput::new("from another tab")).unwrap();
        assert_eq!(second.count(3), 1);
    }

    #[test]
    fn test_malformed_records_are_skipped_and_the_rest_kept() {
        let storage = MemoryStorage::new();
        let blob = r#"{
            "1": [{"name":"Asha","rating":4,"text":"Solid","date":"2024-05-01T10:00:00.000Z"}],
            "2": [
                {"name":"Ravi","rating":"5","text":"Loved it","date":"2024-05-02T10:00:00.000Z"},
                {"name":"Broken","rating":3}
            ],
            "abc": [],
            "4": "not a list"
        }"#;
        storage.set(KEY, blob.as_bytes()).unwrap();

        let mut store = open(&storage);
        assert_eq!(store.list(1)[0].rating.value(), 4);
        assert_eq!(store.list(2).len(), 1);
        assert_eq!(store.list(2)[0].rating.value(), 5);
        assert!(store.is_persistent());

        store.add(3, ReviewInput::new("new product")).unwrap();
        let bytes = storage.get(KEY).unwrap().unwrap();
        let map: ReviewMap = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(map[&1][0].name, "Asha");
        assert_eq!(map[&2][0].name, "Ravi");
        assert_eq!(map[&3][0].text, "new product");
    }

    #[test]
    fn test_unparseable_blob_is_never_overwritten() {
        for blob in [&b"{not json"[..], &b"[1, 2, 3]"[..]] {
            let storage = MemoryStorage::new();
            storage.set(KEY, blob).unwrap();

            let mut store = open(&storage);
            assert!(store.list(1).is_empty());
            assert!(!store.is_persistent());

            store.add(1, ReviewInput::new("kept in memory")).unwrap();
            assert_eq!(store.count(1), 1);
            assert_eq!(storage.get(KEY).unwrap().as_deref(), Some(blob));
        }
    }

    #[test]
    fn test_quota_exceeded_keeps_review_in_memory() {
        let storage = MemoryStorage::with_quota(Some(64));
        let mut store = open(&storage);

        let review = store
            .add(1, ReviewInput::new("x".repeat(200)).rating(5))
            .unwrap();
        assert!(!store.is_persistent());
        assert_eq!(store.list(1), vec![review]);
        assert!(storage.get(KEY).unwrap().is_none());

        store.add(1, ReviewInput::new("still works")).unwrap();
        assert_eq!(store.count(1), 2);
    }

    #[test]
    fn test_unavailable_storage_degrades() {
        let mut store = ReviewStore::open(Arc::new(BrokenStorage), KEY, ReviewLimits::default());
        assert!(!store.is_persistent());
        assert!(store.list(1).is_empty());

        store.add(1, ReviewInput::new("in memory")).unwrap();
        assert_eq!(store.count(1), 1);
    }

    #[test]
    fn test_recent_keeps_last_n_in_order() {
        let mut store = open(&MemoryStorage::new());
        for i in 0..12 {
            store.add(1, ReviewInput::new(format!("review {}", i))).unwrap();
        }

        let recent = store.recent(1, 10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].text, "review 2");
        assert_eq!(recent[9].text, "review 11");
        assert_eq!(store.recent(1, 50).len(), 12);
    }

    #[test]
    fn test_duplicate_submissions_are_kept() {
        let mut store = open(&MemoryStorage::new());
        store.add(1, ReviewInput::new("same")).unwrap();
        store.add(1, ReviewInput::new("same")).unwrap();
        assert_eq!(store.count(1), 2);
    }

    #[test]
    fn test_aggregate_includes_user_reviews() {
        let catalog = Catalog::seed();
        let product = catalog.get(1).unwrap();
        let mut store = open(&MemoryStorage::new());

        assert_eq!(store.aggregate(product).count, product.reviews);
        store.add(1, ReviewInput::new("love it").rating(5)).unwrap();
        assert_eq!(store.aggregate(product).count, product.reviews + 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_storage_reopen() {
        use crate::platform::FileStorage;

        let dir = tempfile::tempdir().unwrap();
        {
            let storage = FileStorage::open(dir.path()).unwrap();
            let mut store = ReviewStore::open(Arc::new(storage), KEY, ReviewLimits::default());
            store.add(5, ReviewInput::new("on disk").rating(3)).unwrap();
        }

        let storage = FileStorage::open(dir.path()).unwrap();
        let store = ReviewStore::open(Arc::new(storage), KEY, ReviewLimits::default());
        assert_eq!(store.list(5)[0].text, "on disk");
    }
}
