use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Catalog primary key
pub type ProductId = u32;

/// Generic metadata container
pub type Metadata = HashMap<String, Value>;

/// Identifier handed out to event subscribers
pub type SubscriptionId = Uuid;
