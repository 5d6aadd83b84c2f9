// src/shell.rs

//! JSON facade over [`Storefront`] for a JavaScript shell
//!
//! In the browser build this is exported through `wasm-bindgen` as a
//! `Storefront` class. Every structured answer is a JSON string, and events
//! published by a command are queued until the shell calls `drain_events`.
//! Natively the same type is plain Rust and returns the crate's [`Error`].

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::app::Storefront;
use crate::cart::Quantity;
use crate::config::{ConfigManager, StoreConfig};
use crate::error::{Error, Result};
use crate::event::StoreEvent;
use crate::review::ReviewInput;
use crate::types::ProductId;
use crate::utils::Time;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    if let Err(e) = crate::logging::init(&crate::config::LoggingConfig::default()) {
        web_sys::console::error_1(&format!("Failed to set up logging: {}", e).into());
    }
}

#[cfg(target_arch = "wasm32")]
impl From<Error> for JsValue {
    fn from(error: Error) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(js_name = Storefront))]
pub struct JsStorefront {
    inner: Storefront,
    queued: Arc<Mutex<Vec<StoreEvent>>>,
}

impl std::fmt::Debug for JsStorefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsStorefront")
            .field("inner", &self.inner)
            .field("queued", &self.queued.lock().len())
            .finish()
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn ids<'a>(products: impl IntoIterator<Item = &'a crate::catalog::Product>) -> Vec<ProductId> {
    products.into_iter().map(|p| p.id).collect()
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(js_class = Storefront))]
impl JsStorefront {
    /// Default configuration: seed catalog, reviews in `localStorage`
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Result<JsStorefront> {
        Self::wrap(Storefront::new(StoreConfig::default())?)
    }

    /// Configuration overrides as a JSON object, merged over the defaults
    pub fn with_config(overrides: &str) -> Result<JsStorefront> {
        let data: Value = serde_json::from_str(overrides)?;
        let mut manager = ConfigManager::new();
        manager.add_memory_layer("shell", data, 10);
        manager.load()?;
        Self::wrap(Storefront::new(manager.validated_config()?)?)
    }

    /// Visible products, in catalog order
    pub fn products(&self) -> Result<String> {
        to_json(&self.inner.visible_products())
    }

    /// Apply a category token and return the visible product ids
    pub fn select_category(&mut self, token: &str) -> Result<String> {
        let visible = ids(self.inner.on_select_category(token));
        to_json(&visible)
    }

    /// Record a keystroke; the query applies once `poll_search` says so
    pub fn search_input(&mut self, query: &str) {
        self.inner.on_search_input(query, Time::now());
    }

    pub fn poll_search(&mut self) -> bool {
        self.inner.poll_search(Time::now())
    }

    /// Milliseconds until a pending query is due, for `setTimeout`
    pub fn search_delay_ms(&self) -> Option<u32> {
        self.inner.search_deadline().map(|deadline| {
            let remaining = (deadline - Time::now()).num_milliseconds();
            remaining.clamp(0, i64::from(u32::MAX)) as u32
        })
    }

    pub fn search_now(&mut self, query: &str) -> Result<String> {
        let visible = ids(self.inner.on_search_now(query));
        to_json(&visible)
    }

    /// Detail view JSON, or nothing for an unknown id
    pub fn open_product(&mut self, product_id: ProductId) -> Result<Option<String>> {
        self.inner
            .open_product(product_id)
            .map(|view| to_json(&view))
            .transpose()
    }

    pub fn close_product(&mut self) {
        self.inner.close_product();
    }

    /// Returns the product's new aggregate rating as JSON
    pub fn add_review(
        &mut self,
        product_id: ProductId,
        name: Option<String>,
        rating: i32,
        text: String,
    ) -> Result<String> {
        let mut input = ReviewInput::new(text).rating(i64::from(rating));
        if let Some(name) = name {
            input = input.name(name);
        }
        let aggregate = self.inner.on_add_review(product_id, input)?;
        to_json(&aggregate)
    }

    /// `qty` is the raw quantity field text
    pub fn add_to_cart(&mut self, product_id: ProductId, qty: &str) -> bool {
        self.inner.on_add_to_cart(product_id, Quantity::parse(qty))
    }

    pub fn remove_from_cart(&mut self, index: usize) -> bool {
        self.inner.on_remove_from_cart(index).is_some()
    }

    pub fn cart(&self) -> Result<String> {
        let cart = self.inner.cart();
        to_json(&json!({
            "lines": cart.lines(),
            "units": cart.unit_count(),
            "total": cart.total(),
            "total_label": self.inner.format_price(cart.total()),
        }))
    }

    pub fn checkout(&mut self) -> Result<String> {
        let summary = self.inner.on_checkout()?;
        to_json(&summary)
    }

    /// Events published since the last call, oldest first
    pub fn drain_events(&mut self) -> Result<String> {
        let events = std::mem::take(&mut *self.queued.lock());
        to_json(&events)
    }

    pub fn stats(&self) -> Result<String> {
        to_json(&self.inner.stats())
    }
}

impl JsStorefront {
    fn wrap(mut inner: Storefront) -> Result<Self> {
        let queued = Arc::new(Mutex::new(Vec::new()));
        let sink = queued.clone();
        inner.subscribe(move |event| sink.lock().push(event.clone()));
        Ok(Self { inner, queued })
    }

    pub fn storefront(&self) -> &Storefront {
        &self.inner
    }
}
