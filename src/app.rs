// src/app.rs - Storefront state container

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine, CheckoutSummary, Quantity};
use crate::catalog::{Catalog, Product};
use crate::config::StoreConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::event::{EventBus, Notice, StoreEvent};
use crate::platform::{self, StorageArc};
use crate::rating::{self, AggregateRating};
use crate::review::{ReviewInput, ReviewStore, UserReview};
use crate::search::{CategoryFilter, Debouncer, Selection};
use crate::structured_data::ProductJsonLd;
use crate::types::{ProductId, SubscriptionId};
use crate::utils::{currency, Time};

pub const NOTICE_ADDED_TO_CART: &str = "Product added to cart!";
pub const NOTICE_REMOVED_FROM_CART: &str = "Item removed from cart!";
pub const NOTICE_REVIEW_THANKS: &str = "Thanks for the review!";

/// Everything the detail view shows for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub product: Product,
    pub price_label: String,
    pub aggregate: AggregateRating,
    pub stars: String,
    /// Newest first
    pub reviews: Vec<UserReview>,
    pub json_ld: ProductJsonLd,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontStats {
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub products: usize,
    pub visible_products: usize,
    pub cart_lines: usize,
    pub cart_units: u64,
    pub reviews_persistent: bool,
    pub subscribers: usize,
}

/// Owns all storefront state and exposes it through synchronous commands.
///
/// The View Layer calls an `on_*` command for each user action, then
/// re-renders from the accessors or from the events the command published.
pub struct Storefront {
    config: StoreConfig,
    catalog: Catalog,
    reviews: ReviewStore,
    cart: Cart,
    selection: Selection,
    search: Debouncer<String>,
    open_product: Option<ProductId>,
    events: EventBus,
    started_at: DateTime<Utc>,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("started_at", &self.started_at)
            .field("selection", &self.selection)
            .field("open_product", &self.open_product)
            .field("reviews", &self.reviews)
            .field("events", &self.events)
            .finish()
    }
}

impl Storefront {
    /// Seed catalog and the storage backend named in `config`
    pub fn new(config: StoreConfig) -> Result<Self> {
        let storage = platform::create_storage(&config.storage);
        Self::with_storage(config, Catalog::seed(), storage)
    }

    pub fn with_storage(config: StoreConfig, catalog: Catalog, storage: StorageArc) -> Result<Self> {
        config.ensure_valid()?;

        let reviews =
            ReviewStore::from_config(storage, &config.storage.review_key, &config.reviews);
        let search = Debouncer::from_millis(config.search.debounce_ms);

        tracing::info!(
            products = catalog.len(),
            backend = ?config.storage.backend,
            persistent = reviews.is_persistent(),
            "Storefront ready"
        );

        Ok(Self {
            config,
            catalog,
            reviews,
            cart: Cart::new(),
            selection: Selection::default(),
            search,
            open_product: None,
            events: EventBus::new(),
            started_at: Time::now(),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn reviews(&self) -> &ReviewStore {
        &self.reviews
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn open_product_id(&self) -> Option<ProductId> {
        self.open_product
    }

    /// The product grid for the current selection, in catalog order
    pub fn visible_products(&self) -> Vec<&Product> {
        self.selection.apply(&self.catalog)
    }

    pub fn aggregate(&self, product_id: ProductId) -> Option<AggregateRating> {
        self.catalog
            .get(product_id)
            .map(|p| self.reviews.aggregate(p))
    }

    pub fn format_price(&self, amount: u64) -> String {
        currency::format(amount, &self.config.currency)
    }

    pub fn on_select_category(&mut self, token: &str) -> Vec<&Product> {
        self.selection.category = CategoryFilter::from_token(token);
        self.publish_filtered();
        self.visible_products()
    }

    /// Queue a query; it is applied by [`poll_search`](Self::poll_search)
    /// once typing pauses
    pub fn on_search_input(&mut self, query: &str, at: DateTime<Utc>) {
        self.search.submit(query.to_string(), at);
    }

    /// Apply a queued query whose quiet period has passed. Returns whether
    /// the selection changed.
    pub fn poll_search(&mut self, now: DateTime<Utc>) -> bool {
        match self.search.poll(now) {
            Some(query) => {
                self.apply_query(query);
                true
            }
            None => false,
        }
    }

    /// When a queued query becomes due, for scheduling a timer
    pub fn search_deadline(&self) -> Option<DateTime<Utc>> {
        self.search.deadline()
    }

    /// Apply `query` immediately, dropping anything queued
    pub fn on_search_now(&mut self, query: &str) -> Vec<&Product> {
        let _ = self.search.flush();
        self.apply_query(query.to_string());
        self.visible_products()
    }

    pub fn open_product(&mut self, product_id: ProductId) -> Option<ProductView> {
        let view = self.product_view(product_id);
        match &view {
            Some(_) => self.open_product = Some(product_id),
            None => tracing::debug!(product_id, "Ignoring request to open unknown product"),
        }
        view
    }

    pub fn close_product(&mut self) {
        self.open_product = None;
    }

    /// Detail view model without changing which product is open
    pub fn product_view(&self, product_id: ProductId) -> Option<ProductView> {
        let product = self.catalog.get(product_id)?;
        let chronological = self.reviews.list(product_id);
        let aggregate = rating::aggregate(product, &chronological);

        let json_ld = ProductJsonLd::build_with_limit(
            product,
            &aggregate,
            &chronological,
            &self.config.currency,
            self.config.reviews.recent_limit,
            &self.config.reviews.anonymous_author,
        );

        let mut reviews = chronological;
        reviews.reverse();

        Some(ProductView {
            product: product.clone(),
            price_label: self.format_price(product.price),
            aggregate,
            stars: rating::stars(aggregate.avg),
            reviews,
            json_ld,
        })
    }

    /// Add a review and return the product's new aggregate.
    ///
    /// Empty review text is reported both as the returned error and as an
    /// error notice. Unknown products are an error and publish nothing.
    pub fn on_add_review(
        &mut self,
        product_id: ProductId,
        input: ReviewInput,
    ) -> Result<AggregateRating> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| Error::not_found("product", product_id).source("storefront"))?;

        let review = match self.reviews.add(product_id, input) {
            Ok(review) => review,
            Err(e) => {
                if matches!(e.kind, ErrorKind::Validation { .. }) {
                    self.events.publish(StoreEvent::Notice(Notice::error(e.message.clone())));
                }
                return Err(e);
            }
        };

        let aggregate = self.reviews.aggregate(product);
        tracing::debug!(product_id, avg = aggregate.avg, count = aggregate.count, "Aggregate recomputed");

        self.events.publish(StoreEvent::ReviewAdded {
            product_id,
            review,
            aggregate,
        });
        self.events
            .publish(StoreEvent::Notice(Notice::success(NOTICE_REVIEW_THANKS)));
        Ok(aggregate)
    }

    /// Add to the cart and close the detail view. Returns false, changing
    /// nothing, for an unknown product.
    pub fn on_add_to_cart(&mut self, product_id: ProductId, qty: Quantity) -> bool {
        let Some(product) = self.catalog.get(product_id) else {
            tracing::debug!(product_id, "Ignoring add to cart for unknown product");
            return false;
        };

        self.cart.add(product, qty);
        self.open_product = None;
        self.publish_cart_changed();
        self.events
            .publish(StoreEvent::Notice(Notice::success(NOTICE_ADDED_TO_CART)));
        true
    }

    pub fn on_remove_from_cart(&mut self, index: usize) -> Option<CartLine> {
        let removed = self.cart.remove(index)?;
        self.publish_cart_changed();
        self.events
            .publish(StoreEvent::Notice(Notice::error(NOTICE_REMOVED_FROM_CART)));
        Some(removed)
    }

    pub fn on_checkout(&mut self) -> Result<CheckoutSummary> {
        let summary = match self.cart.checkout() {
            Ok(summary) => summary,
            Err(e) => {
                self.events.publish(StoreEvent::Notice(Notice::error(e.message.clone())));
                return Err(e);
            }
        };

        self.events.publish(StoreEvent::CheckoutCompleted(summary));
        self.publish_cart_changed();
        self.events.publish(StoreEvent::Notice(Notice::success(
            summary.message_in(&self.config.currency),
        )));
        Ok(summary)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(handler)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + 'static,
    {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Result<()> {
        self.events.unsubscribe(id)
    }

    pub fn stats(&self) -> StorefrontStats {
        StorefrontStats {
            version: crate::VERSION.to_string(),
            started_at: self.started_at,
            products: self.catalog.len(),
            visible_products: self.visible_products().len(),
            cart_lines: self.cart.line_count(),
            cart_units: self.cart.unit_count(),
            reviews_persistent: self.reviews.is_persistent(),
            subscribers: self.events.subscriber_count(),
        }
    }

    fn apply_query(&mut self, query: String) {
        self.selection.query = query;
        self.publish_filtered();
    }

    fn publish_filtered(&mut self) {
        let visible: Vec<ProductId> = self.visible_products().iter().map(|p| p.id).collect();
        tracing::debug!(
            category = self.selection.category.token(),
            query = %self.selection.query,
            visible = visible.len(),
            "Selection recomputed"
        );
        self.events.publish(StoreEvent::ProductsFiltered {
            selection: self.selection.clone(),
            visible,
        });
    }

    fn publish_cart_changed(&mut self) {
        self.events.publish(StoreEvent::CartChanged {
            lines: self.cart.line_count(),
            units: self.cart.unit_count(),
            total: self.cart.total(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use parking_lot::Mutex;

    use super::*;
    use crate::config::StorageBackend;
    use crate::event::NoticeKind;
    use crate::platform::MemoryStorage;

    fn memory_config() -> StoreConfig {
        let mut config = StoreConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config
    }

    fn storefront(storage: &MemoryStorage) -> Storefront {
        Storefront::with_storage(memory_config(), Catalog::seed(), Arc::new(storage.clone()))
            .unwrap()
    }

    fn record(store: &mut Storefront) -> Arc<Mutex<Vec<StoreEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(move |e| sink.lock().push(e.clone()));
        events
    }

    fn notices(events: &[StoreEvent]) -> Vec<(NoticeKind, String)> {
        events
            .iter()
            .filter_map(|e| match e {
                StoreEvent::Notice(n) => Some((n.kind, n.message.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = memory_config();
        config.currency = " ".to_string();
        let result =
            Storefront::with_storage(config, Catalog::seed(), Arc::new(MemoryStorage::new()));
        assert!(matches!(
            result.unwrap_err().kind,
            ErrorKind::Configuration { .. }
        ));
    }

    #[test]
    fn test_category_and_search() {
        let mut store = storefront(&MemoryStorage::new());
        let events = record(&mut store);
        assert_eq!(store.visible_products().len(), 20);

        assert_eq!(store.on_select_category("Mobiles").len(), 4);
        let ids: Vec<ProductId> = store.on_search_now("pro").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 9]);

        assert!(store.on_select_category("Nope").is_empty());
        let ids: Vec<ProductId> = store.on_select_category("all").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 9, 14, 20]);

        let filtered = events
            .lock()
            .iter()
            .filter(|e| matches!(e, StoreEvent::ProductsFiltered { .. }))
            .count();
        assert_eq!(filtered, 4);
    }

    #[test]
    fn test_debounced_search() {
        let mut store = storefront(&MemoryStorage::new());
        let t0 = Time::from_millis(10_000);

        store.on_search_input("s", t0);
        store.on_search_input("sony", t0 + Duration::milliseconds(80));
        assert!(!store.poll_search(t0 + Duration::milliseconds(200)));
        assert_eq!(store.visible_products().len(), 20);

        assert_eq!(store.search_deadline(), Some(t0 + Duration::milliseconds(280)));
        assert!(store.poll_search(t0 + Duration::milliseconds(280)));
        assert_eq!(store.selection().query, "sony");
        let ids: Vec<ProductId> = store.visible_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn test_open_and_close_product() {
        let mut store = storefront(&MemoryStorage::new());
        assert!(store.open_product(999).is_none());
        assert_eq!(store.open_product_id(), None);

        let view = store.open_product(1).unwrap();
        assert_eq!(view.product.id, 1);
        assert_eq!(view.price_label, "₹1,59,900.00");
        assert_eq!(view.aggregate.count, 14583);
        assert_eq!(view.stars, "★★★★★");
        assert!(view.reviews.is_empty());
        assert_eq!(store.open_product_id(), Some(1));

        store.close_product();
        assert_eq!(store.open_product_id(), None);
    }

    #[test]
    fn test_add_review_flow() {
        let storage = MemoryStorage::new();
        let mut store = storefront(&storage);
        let events = record(&mut store);

        let before = store.aggregate(1).unwrap();
        let after = store
            .on_add_review(1, ReviewInput::new("Superb").name("Asha").rating(5))
            .unwrap();
        assert_eq!(after.count, before.count + 1);
        assert!(after.avg > before.avg);

        store.on_add_review(1, ReviewInput::new("Later").rating(1)).unwrap();
        let view = store.product_view(1).unwrap();
        assert_eq!(view.reviews[0].text, "Later");
        assert_eq!(view.json_ld.review.len(), 2);
        assert_eq!(view.json_ld.review[0].review_body, "Superb");

        assert_eq!(
            notices(&events.lock()),
            vec![
                (NoticeKind::Success, NOTICE_REVIEW_THANKS.to_string()),
                (NoticeKind::Success, NOTICE_REVIEW_THANKS.to_string()),
            ]
        );

        // A fresh storefront over the same storage sees the reviews
        let reopened = storefront(&storage);
        assert_eq!(reopened.reviews().count(1), 2);
    }

    #[test]
    fn test_empty_review_is_rejected_with_notice() {
        let mut store = storefront(&MemoryStorage::new());
        let events = record(&mut store);

        let err = store.on_add_review(1, ReviewInput::new("   ")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Validation { .. }));
        assert_eq!(store.reviews().count(1), 0);
        assert_eq!(
            notices(&events.lock()),
            vec![(NoticeKind::Error, "Please enter a review message.".to_string())]
        );
    }

    #[test]
    fn test_review_for_unknown_product() {
        let mut store = storefront(&MemoryStorage::new());
        let events = record(&mut store);

        let err = store.on_add_review(999, ReviewInput::new("hello")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::NotFound { .. }));
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_cart_flow() {
        let mut store = storefront(&MemoryStorage::new());
        let events = record(&mut store);

        store.open_product(3);
        assert!(store.on_add_to_cart(3, Quantity::new(2)));
        assert_eq!(store.open_product_id(), None);
        assert!(store.on_add_to_cart(3, Quantity::parse("1")));
        assert!(!store.on_add_to_cart(999, Quantity::ONE));
        assert_eq!(store.cart().line_count(), 1);
        assert_eq!(store.cart().unit_count(), 3);

        assert!(store.on_remove_from_cart(4).is_none());
        assert!(store.on_remove_from_cart(0).is_some());
        assert!(store.cart().is_empty());

        let err = store.on_checkout().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EmptyCart));

        assert_eq!(
            notices(&events.lock()),
            vec![
                (NoticeKind::Success, NOTICE_ADDED_TO_CART.to_string()),
                (NoticeKind::Success, NOTICE_ADDED_TO_CART.to_string()),
                (NoticeKind::Error, NOTICE_REMOVED_FROM_CART.to_string()),
                (NoticeKind::Error, "Your cart is empty!".to_string()),
            ]
        );
    }

    #[test]
    fn test_checkout() {
        let mut store = storefront(&MemoryStorage::new());
        let events = record(&mut store);

        store.on_add_to_cart(1, Quantity::ONE);
        store.on_add_to_cart(2, Quantity::new(2));
        let expected_total = store.catalog().get(1).unwrap().price
            + 2 * store.catalog().get(2).unwrap().price;

        let summary = store.on_checkout().unwrap();
        assert_eq!(summary.units, 3);
        assert_eq!(summary.total, expected_total);
        assert!(store.cart().is_empty());

        let events = events.lock();
        assert!(events
            .iter()
            .any(|e| matches!(e, StoreEvent::CheckoutCompleted(s) if s.units == 3)));
        assert!(matches!(
            events.iter().rev().nth(1),
            Some(StoreEvent::CartChanged { lines: 0, .. })
        ));
        let last = notices(&events).pop().unwrap();
        assert_eq!(last.0, NoticeKind::Success);
        assert!(last.1.starts_with("Order placed! 3 items for ₹"));
    }

    #[test]
    fn test_unsubscribe_and_stats() {
        let mut store = storefront(&MemoryStorage::new());
        let id = store.subscribe(|_| {});
        assert_eq!(store.stats().subscribers, 1);
        store.unsubscribe(id).unwrap();

        let stats = store.stats();
        assert_eq!(stats.subscribers, 0);
        assert_eq!(stats.products, 20);
        assert!(stats.reviews_persistent);
        assert_eq!(stats.version, crate::VERSION);
    }
}
