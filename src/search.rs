// src/search.rs

//! Category filter and free-text search over the catalog
//!
//! [`select`] is a pure function of `(catalog, filter, query)`; it is cheap to
//! call on every keystroke. [`Debouncer`] is there for shells that would
//! rather recompute once typing pauses.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Category, Product};
use crate::utils::{strings, Time};

/// Token the View Layer sends for the "All" filter button
pub const ALL_TOKEN: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
    /// A token that names no category; selects nothing
    Unmatched(String),
}

impl CategoryFilter {
    /// `"all"` or an exact category label. Anything else matches no product.
    pub fn from_token(token: &str) -> Self {
        if token == ALL_TOKEN {
            return Self::All;
        }
        match token.parse::<Category>() {
            Ok(category) => Self::Only(category),
            Err(_) => Self::Unmatched(token.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::All => ALL_TOKEN,
            Self::Only(category) => category.as_str(),
            Self::Unmatched(token) => token,
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == *category,
            Self::Unmatched(_) => false,
        }
    }
}

/// Current filter state of the product grid. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub category: CategoryFilter,
    pub query: String,
}

impl Selection {
    pub fn new(category: CategoryFilter, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        select(catalog, &self.category, &self.query)
    }
}

/// Products passing `filter` whose name, description or category label
/// contains `query`, case-insensitively. Catalog order is preserved. A blank
/// query matches everything the filter lets through.
pub fn select<'a>(catalog: &'a Catalog, filter: &CategoryFilter, query: &str) -> Vec<&'a Product> {
    let needle = strings::fold(query.trim());

    catalog
        .products()
        .iter()
        .filter(|p| filter.matches(p))
        .filter(|p| needle.is_empty() || matches_query(p, &needle))
        .collect()
}

fn matches_query(product: &Product, needle: &str) -> bool {
    strings::fold(&product.name).contains(needle)
        || strings::fold(&product.description).contains(needle)
        || strings::fold(product.category.as_str()).contains(needle)
}

/// Coalesces bursts of input into one value after a quiet period.
///
/// Time is supplied by the caller, so the debouncer works the same under a
/// browser timer as under a test clock.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, DateTime<Utc>)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        let millis = millis.min(u64::from(u32::MAX)) as i64;
        Self::new(Time::duration_millis(millis))
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Replace any pending value and restart the quiet period
    pub fn submit(&mut self, value: T, at: DateTime<Utc>) {
        self.pending = Some((value, at));
    }

    /// The pending value, once `quiet` has passed since the last submit
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<T> {
        let ready = matches!(&self.pending, Some((_, at)) if now - *at >= self.quiet);
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// The pending value, immediately
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes ready, for scheduling a timer
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.as_ref().map(|(_, at)| *at + self.quiet)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::from_millis(200)
    }
}
