// src/catalog/mod.rs

//! Immutable product catalog
//!
//! Products are built once, through [`ProductBuilder`], and never change
//! afterwards. The catalog keeps them in display order.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ProductId;

mod seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Mobiles,
    Laptops,
    Fashion,
    #[serde(rename = "Home Kitchen")]
    HomeKitchen,
    Electronics,
    Beauty,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Mobiles,
        Category::Laptops,
        Category::Fashion,
        Category::HomeKitchen,
        Category::Electronics,
        Category::Beauty,
    ];

    /// The label shown on filter buttons and used as the filter token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobiles => "Mobiles",
            Self::Laptops => "Laptops",
            Self::Fashion => "Fashion",
            Self::HomeKitchen => "Home Kitchen",
            Self::Electronics => "Electronics",
            Self::Beauty => "Beauty",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Exact, case-sensitive label match
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::not_found("category", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Whole rupees
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_image: Option<String>,
    pub description: String,
    /// Seed average rating
    pub rating: f64,
    /// Seed review count
    pub reviews: u64,
}

impl Product {
    pub fn builder(
        id: ProductId,
        name: impl Into<String>,
        category: Category,
        price: u64,
    ) -> ProductBuilder {
        ProductBuilder {
            id,
            name: name.into(),
            category,
            price,
            original_price: None,
            discount: None,
            image: String::new(),
            fallback_image: None,
            description: String::new(),
            rating: 0.0,
            reviews: 0,
        }
    }

    /// Text for a generated placeholder image when neither image loads
    pub fn fallback_label(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct ProductBuilder {
    id: ProductId,
    name: String,
    category: Category,
    price: u64,
    original_price: Option<u64>,
    discount: Option<String>,
    image: String,
    fallback_image: Option<String>,
    description: String,
    rating: f64,
    reviews: u64,
}

impl ProductBuilder {
    /// Strike-through price and its discount label. Display only.
    pub fn original_price(mut self, original_price: u64, discount: impl Into<String>) -> Self {
        self.original_price = Some(original_price);
        self.discount = Some(discount.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = url.into();
        self
    }

    pub fn fallback_image(mut self, url: impl Into<String>) -> Self {
        self.fallback_image = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Seed rating, clamped to 0..=5 (NaN counts as 0), and seed review count
    pub fn seed_rating(mut self, average: f64, count: u64) -> Self {
        self.rating = if average.is_nan() {
            0.0
        } else {
            average.clamp(0.0, 5.0)
        };
        self.reviews = count;
        self
    }

    pub fn build(self) -> Result<Product> {
        if self.id == 0 {
            return Err(Error::validation("id", "Product id must be a positive integer"));
        }
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::validation("name", "Product name must not be empty"));
        }

        Ok(Product {
            id: self.id,
            name,
            category: self.category,
            price: self.price,
            original_price: self.original_price,
            discount: self.discount,
            image: self.image,
            fallback_image: self.fallback_image,
            description: self.description,
            rating: self.rating,
            reviews: self.reviews,
        })
    }
}

/// Ordered, immutable product list
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Rejects catalogs where two products share an id
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(Error::validation(
                    "id",
                    format!("Duplicate product id {}", product.id),
                ));
            }
        }
        Ok(Self { products })
    }

    /// The catalog shipped with the store
    pub fn seed() -> Self {
        Self {
            products: seed::products(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}
