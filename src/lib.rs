// src/lib.rs

//! SC Store core - catalog, reviews, search and cart for a single-page storefront
//!
//! The crate holds no UI. A shell (browser or desktop) owns a
//! [`Storefront`], forwards user actions to its `on_*` commands and renders
//! from its accessors and published [`StoreEvent`]s. Browser shells get the
//! same commands through the `wasm-bindgen` export in [`shell`].

#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::result_large_err)]

pub mod app;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod platform;
pub mod rating;
pub mod review;
pub mod search;
// wasm-bindgen expands to unsafe glue
#[cfg_attr(target_arch = "wasm32", allow(unsafe_code))]
pub mod shell;
pub mod structured_data;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use app::{ProductView, Storefront};
pub use cart::{Cart, CartLine, CheckoutSummary, Quantity};
pub use catalog::{Catalog, Category, Product};
pub use config::{ConfigManager, StoreConfig};
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use event::{Notice, NoticeKind, StoreEvent};
pub use rating::{AggregateRating, Rating};
pub use review::{ReviewInput, ReviewStore, UserReview};
pub use search::{select, CategoryFilter, Debouncer, Selection};
pub use shell::JsStorefront;
pub use structured_data::ProductJsonLd;
pub use types::ProductId;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
