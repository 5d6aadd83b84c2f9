// src/cart.rs

//! Session cart. Lines snapshot the product at add time; nothing here is
//! persisted.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::{Error, Result};
use crate::types::ProductId;
use crate::utils::currency;

/// A line quantity, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn new(value: i64) -> Self {
        Self(value.clamp(1, i64::from(u32::MAX)) as u32)
    }

    /// Parse a form value like an HTML number input would hand it over:
    /// optional whitespace and sign, then leading digits. Anything that does
    /// not start with a number, or parses to zero, is 1.
    pub fn parse(input: &str) -> Self {
        let s = input.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = &rest[..digits_end];
        if digits.is_empty() {
            return Self::ONE;
        }

        // Too many digits for i64 still means "a lot"
        let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
        Self::new(if negative { -magnitude } else { magnitude })
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self::new(i64::from(value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price in whole rupees at the time the line was added
    pub price: u64,
    pub image: String,
    pub qty: Quantity,
}

impl CartLine {
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.qty.get()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub total: u64,
    pub units: u64,
    pub lines: usize,
}

impl CheckoutSummary {
    pub fn message(&self) -> String {
        self.message_in("INR")
    }

    pub fn message_in(&self, currency_code: &str) -> String {
        format!(
            "Order placed! {} items for {}",
            self.units,
            currency::format(self.total, currency_code)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` of `product`, merging into its existing line if there is one
    pub fn add(&mut self, product: &Product, qty: Quantity) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.qty = Quantity(line.qty.get().saturating_add(qty.get()));
            tracing::debug!(product_id = product.id, qty = line.qty.get(), "Cart line updated");
            return;
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            qty,
        });
        tracing::debug!(product_id = product.id, qty = qty.get(), "Cart line added");
    }

    /// Remove the line at `index`. Out-of-range indices change nothing.
    pub fn remove(&mut self, index: usize) -> Option<CartLine> {
        if index >= self.lines.len() {
            tracing::debug!(index, lines = self.lines.len(), "Ignoring removal of missing cart line");
            return None;
        }
        Some(self.lines.remove(index))
    }

    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, line| acc.saturating_add(line.subtotal()))
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities, shown on the cart badge
    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.qty.get())).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Summarize and clear. An empty cart is an error and stays as it is.
    pub fn checkout(&mut self) -> Result<CheckoutSummary> {
        if self.is_empty() {
            return Err(Error::empty_cart());
        }

        let summary = CheckoutSummary {
            total: self.total(),
            units: self.unit_count(),
            lines: self.line_count(),
        };
        self.lines.clear();

        tracing::info!(total = summary.total, units = summary.units, "Checkout completed");
        Ok(summary)
    }
}
