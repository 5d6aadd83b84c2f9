// src/event.rs

//! Change notifications for the View Layer
//!
//! Every storefront command that changes visible state publishes one or more
//! [`StoreEvent`]s. Handlers run synchronously, in subscription order, before
//! the command returns.

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::CheckoutSummary;
use crate::error::{Error, Result};
use crate::rating::AggregateRating;
use crate::review::UserReview;
use crate::search::Selection;
use crate::types::{ProductId, SubscriptionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short user-facing message, shown as a toast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    ProductsFiltered {
        selection: Selection,
        visible: Vec<ProductId>,
    },
    ReviewAdded {
        product_id: ProductId,
        review: UserReview,
        aggregate: AggregateRating,
    },
    CartChanged {
        lines: usize,
        units: u64,
        total: u64,
    },
    CheckoutCompleted(CheckoutSummary),
    Notice(Notice),
}

impl StoreEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ProductsFiltered { .. } => "products.filtered",
            Self::ReviewAdded { .. } => "review.added",
            Self::CartChanged { .. } => "cart.changed",
            Self::CheckoutCompleted(_) => "cart.checkout_completed",
            Self::Notice(_) => "notice",
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub trait HandlerBounds: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> HandlerBounds for T {}

#[cfg(target_arch = "wasm32")]
pub trait HandlerBounds {}

#[cfg(target_arch = "wasm32")]
impl<T> HandlerBounds for T {}

#[cfg(not(target_arch = "wasm32"))]
type Handler = Box<dyn Fn(&StoreEvent) + Send + Sync>;

#[cfg(target_arch = "wasm32")]
type Handler = Box<dyn Fn(&StoreEvent)>;

struct Subscription {
    id: SubscriptionId,
    handler: Handler,
}

/// Synchronous publish/subscribe fan-out
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    published: u64,
}

impl Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .field("published", &self.published)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) + HandlerBounds + 'static,
    {
        let id = Uuid::new_v4();
        self.subscriptions.push(Subscription {
            id,
            handler: Box::new(handler),
        });
        tracing::debug!(subscription_id = %id, "Added subscription");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Result<()> {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        if self.subscriptions.len() == before {
            return Err(Error::not_found("subscription", id).source("event_bus"));
        }
        tracing::debug!(subscription_id = %id, "Removed subscription");
        Ok(())
    }

    pub fn publish(&mut self, event: StoreEvent) {
        self.published += 1;
        tracing::trace!(
            event_type = event.event_type(),
            subscribers = self.subscriptions.len(),
            "Publishing event"
        );
        for subscription in &self.subscriptions {
            (subscription.handler)(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Events published since the bus was created
    pub fn published(&self) -> u64 {
        self.published
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[test]
    fn test_handlers_run_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        let first = seen.clone();
        bus.subscribe(move |e| first.lock().push(format!("a:{}", e.event_type())));
        let second = seen.clone();
        bus.subscribe(move |e| second.lock().push(format!("b:{}", e.event_type())));

        bus.publish(StoreEvent::Notice(Notice::success("Product added to cart!")));
        assert_eq!(*seen.lock(), vec!["a:notice", "b:notice"]);
        assert_eq!(bus.published(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Arc::new(Mutex::new(0));
        let mut bus = EventBus::new();

        let counter = count.clone();
        let id = bus.subscribe(move |_| *counter.lock() += 1);
        bus.publish(StoreEvent::CartChanged {
            lines: 0,
            units: 0,
            total: 0,
        });

        bus.unsubscribe(id).unwrap();
        assert!(bus.unsubscribe(id).is_err());
        bus.publish(StoreEvent::Notice(Notice::error("Your cart is empty!")));

        assert_eq!(*count.lock(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_serializes() {
        let event = StoreEvent::Notice(Notice::error("Please enter a review message."));
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["Notice"]["kind"], "Error");
        assert_eq!(value["Notice"]["message"], "Please enter a review message.");
    }
}
