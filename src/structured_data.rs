// src/structured_data.rs

//! schema.org `Product` description for the open product, ready to drop into
//! a `<script type="application/ld+json">` element.
//!
//! Values are emitted as typed. Any escaping needed to embed the JSON inside
//! HTML is left to the renderer.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::{Error, Result};
use crate::rating::AggregateRating;
use crate::review::UserReview;

pub const SCHEMA_CONTEXT: &str = "https://schema.org";
pub const IN_STOCK: &str = "https://schema.org/InStock";

/// Reviews included when no limit is given
pub const DEFAULT_REVIEW_LIMIT: usize = 10;

/// Author shown for reviews stored without a name
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductJsonLd {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub offers: Offer,
    pub aggregate_rating: AggregateRatingLd,
    pub review: Vec<ReviewLd>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "@type")]
    pub kind: String,
    pub price: String,
    pub price_currency: String,
    pub availability: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRatingLd {
    #[serde(rename = "@type")]
    pub kind: String,
    pub rating_value: String,
    pub review_count: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLd {
    #[serde(rename = "@type")]
    pub kind: String,
    pub author: String,
    pub review_body: String,
    pub review_rating: RatingLd,
    pub date_published: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingLd {
    #[serde(rename = "@type")]
    pub kind: String,
    pub rating_value: String,
    pub best_rating: String,
    pub worst_rating: String,
}

impl ProductJsonLd {
    /// Describe `product` with its aggregate and the last ten of `reviews`
    /// (given oldest first)
    pub fn build(
        product: &Product,
        aggregate: &AggregateRating,
        reviews: &[UserReview],
        currency: &str,
    ) -> Self {
        Self::build_with_limit(
            product,
            aggregate,
            reviews,
            currency,
            DEFAULT_REVIEW_LIMIT,
            ANONYMOUS_AUTHOR,
        )
    }

    pub fn build_with_limit(
        product: &Product,
        aggregate: &AggregateRating,
        reviews: &[UserReview],
        currency: &str,
        limit: usize,
        anonymous_author: &str,
    ) -> Self {
        let recent = &reviews[reviews.len().saturating_sub(limit)..];

        Self {
            context: SCHEMA_CONTEXT.to_string(),
            kind: "Product".to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            offers: Offer {
                kind: "Offer".to_string(),
                price: product.price.to_string(),
                price_currency: currency.to_string(),
                availability: IN_STOCK.to_string(),
            },
            aggregate_rating: AggregateRatingLd {
                kind: "AggregateRating".to_string(),
                rating_value: if aggregate.count == 0 {
                    "0".to_string()
                } else {
                    format!("{:.1}", aggregate.avg)
                },
                review_count: aggregate.count.to_string(),
            },
            review: recent
                .iter()
                .map(|r| ReviewLd {
                    kind: "Review".to_string(),
                    author: r.author_or(anonymous_author).to_string(),
                    review_body: r.text.clone(),
                    review_rating: RatingLd {
                        kind: "Rating".to_string(),
                        rating_value: r.rating.value().to_string(),
                        best_rating: "5".to_string(),
                        worst_rating: "1".to_string(),
                    },
                    date_published: r.date_iso(),
                })
                .collect(),
        }
    }

    /// Compact JSON text
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::serialization(format!("Failed to serialize JSON-LD: {}", e)))
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| Error::serialization(format!("Failed to serialize JSON-LD: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::rating;
    use crate::review::{ReviewInput, ReviewLimits};
    use crate::utils::Time;

    fn review(text: &str, stars: i64, millis: i64) -> UserReview {
        UserReview::from_input_at(
            ReviewInput::new(text).name("Asha").rating(stars),
            &ReviewLimits::default(),
            Time::from_millis(millis),
        )
        .unwrap()
    }

    #[test]
    fn test_shape() {
        let catalog = Catalog::seed();
        let product = catalog.get(1).unwrap();
        let reviews = vec![review("Superb", 4, 1_714_557_600_000)];
        let agg = rating::aggregate(product, &reviews);

        let value = ProductJsonLd::build(product, &agg, &reviews, "INR")
            .to_value()
            .unwrap();

        assert_eq!(value["@context"], "https://schema.org");
        assert_eq!(value["@type"], "Product");
        assert_eq!(value["name"], "Apple iPhone 15 Pro Max");
        assert_eq!(value["offers"]["@type"], "Offer");
        assert_eq!(value["offers"]["price"], "159900");
        assert_eq!(value["offers"]["priceCurrency"], "INR");
        assert_eq!(value["offers"]["availability"], "https://schema.org/InStock");
        assert_eq!(value["aggregateRating"]["ratingValue"], "4.8");
        assert_eq!(value["aggregateRating"]["reviewCount"], "14584");

        let first = &value["review"][0];
        assert_eq!(first["@type"], "Review");
        assert_eq!(first["author"], "Asha");
        assert_eq!(first["reviewBody"], "Superb");
        assert_eq!(first["reviewRating"]["ratingValue"], "4");
        assert_eq!(first["reviewRating"]["bestRating"], "5");
        assert_eq!(first["reviewRating"]["worstRating"], "1");
        assert_eq!(first["datePublished"], "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_zero_aggregate_rating_value() {
        let catalog = Catalog::seed();
        let product = catalog.get(1).unwrap();
        let json = ProductJsonLd::build(product, &AggregateRating::default(), &[], "INR");
        assert_eq!(json.aggregate_rating.rating_value, "0");
        assert_eq!(json.aggregate_rating.review_count, "0");
        assert!(json.review.is_empty());
    }

    #[test]
    fn test_keeps_last_ten_in_order() {
        let catalog = Catalog::seed();
        let product = catalog.get(2).unwrap();
        let reviews: Vec<UserReview> = (0..13)
            .map(|i| review(&format!("review {}", i), 5, 1_700_000_000_000 + i))
            .collect();
        let agg = rating::aggregate(product, &reviews);

        let json = ProductJsonLd::build(product, &agg, &reviews, "INR");
        assert_eq!(json.review.len(), 10);
        assert_eq!(json.review[0].review_body, "review 3");
        assert_eq!(json.review[9].review_body, "review 12");
    }

    #[test]
    fn test_text_is_not_escaped() {
        let catalog = Catalog::seed();
        let product = catalog.get(1).unwrap();
        let reviews = vec![review("</script><b>hi</b>", 3, 0)];
        let json = ProductJsonLd::build(product, &AggregateRating::default(), &reviews, "INR");
        assert_eq!(json.review[0].review_body, "</script><b>hi</b>");

        let text = json.to_json().unwrap();
        assert!(text.contains("</script><b>hi</b>"));
        assert!(!text.contains('\n'));
    }
}
