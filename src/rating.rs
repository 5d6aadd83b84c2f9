// src/rating.rs

//! Star ratings and the aggregate shown for each product
//!
//! A product ships with a seed average and seed count. The aggregate treats
//! the seed as `count` synthetic reviews of value `average` and combines them
//! with the user reviews held by the review store:
//!
//! ```text
//! avg = (seed_avg * seed_count + user_avg * user_count) / (seed_count + user_count)
//! ```
//!
//! Nothing here is stored. The aggregate is recomputed whenever it is asked
//! for, so the summary can never drift from the review list.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::review::UserReview;

/// A single review's star rating, always within `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRating", into = "u8")]
pub struct Rating(u8);

/// Stored ratings written by older shells may be numeric strings (`"5"`)
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRating {
    Number(f64),
    Text(String),
}

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Clamp any integer into range
    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl From<f64> for Rating {
    /// Rounds, then clamps. NaN becomes the form default of 5.
    fn from(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.round().clamp(Self::MIN as f64, Self::MAX as f64) as u8)
    }
}

impl TryFrom<RawRating> for Rating {
    type Error = String;

    fn try_from(raw: RawRating) -> Result<Self, Self::Error> {
        match raw {
            RawRating::Number(value) => Ok(Self::from(value)),
            RawRating::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Self::from)
                .map_err(|_| format!("invalid rating {:?}", text)),
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregateRating {
    pub avg: f64,
    pub count: u64,
}

impl AggregateRating {
    /// One decimal place, `"0.0"` when there is nothing to average
    pub fn display_value(&self) -> String {
        if self.count == 0 {
            "0.0".to_string()
        } else {
            format!("{:.1}", self.avg)
        }
    }
}

/// Combine a product's seed rating with its user reviews
pub fn aggregate(product: &Product, reviews: &[UserReview]) -> AggregateRating {
    let seed_avg = product.rating;
    let seed_count = product.reviews;
    let user_count = reviews.len() as u64;

    if seed_count == 0 && user_count == 0 {
        return AggregateRating::default();
    }

    let user_avg = if user_count == 0 {
        0.0
    } else {
        let sum: u64 = reviews.iter().map(|r| u64::from(r.rating.value())).sum();
        sum as f64 / user_count as f64
    };

    let total = seed_avg * seed_count as f64 + user_avg * user_count as f64;
    let count = seed_count + user_count;

    AggregateRating {
        avg: total / count as f64,
        count,
    }
}

/// Five-glyph star string, e.g. `★★★★☆` for 4.3
pub fn stars(rating: f64) -> String {
    let full = if rating.is_nan() {
        0
    } else {
        rating.round().clamp(0.0, 5.0) as usize
    };
    let mut out = String::with_capacity(5 * '★'.len_utf8());
    out.extend(std::iter::repeat('★').take(full));
    out.extend(std::iter::repeat('☆').take(5 - full));
    out
}
