// src/review/mod.rs

//! User-submitted product reviews
//!
//! A [`UserReview`] only comes into existence through [`UserReview::from_input`],
//! which trims and caps the free-text fields, clamps the rating and rejects
//! empty review text. Text is stored exactly as typed otherwise: escaping is
//! the renderer's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ReviewConfig;
use crate::error::{Error, Result};
use crate::rating::Rating;
use crate::utils::{strings, Time};

mod store;

pub use store::{ReviewMap, ReviewStore};

/// Raw review form values as the View Layer collected them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewInput {
    pub name: Option<String>,
    pub rating: Rating,
    pub text: String,
}

impl ReviewInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: None,
            rating: Rating::default(),
            text: text.into(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Any integer; out-of-range values are clamped to 1..=5
    pub fn rating(mut self, rating: i64) -> Self {
        self.rating = Rating::new(rating);
        self
    }
}

/// Field limits applied when a review is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLimits {
    pub max_name_len: usize,
    pub max_text_len: usize,
    pub default_author: String,
}

impl Default for ReviewLimits {
    fn default() -> Self {
        Self::from(&ReviewConfig::default())
    }
}

impl From<&ReviewConfig> for ReviewLimits {
    fn from(config: &ReviewConfig) -> Self {
        Self {
            max_name_len: config.max_name_len,
            max_text_len: config.max_text_len,
            default_author: config.default_author.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReview {
    #[serde(default)]
    pub name: String,
    pub rating: Rating,
    pub text: String,
    #[serde(serialize_with = "serialize_millis")]
    pub date: DateTime<Utc>,
}

/// Always writes three fractional digits, as `Date.toISOString()` does
fn serialize_millis<S: serde::Serializer>(
    date: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

impl UserReview {
    pub fn from_input(input: ReviewInput, limits: &ReviewLimits) -> Result<Self> {
        Self::from_input_at(input, limits, Time::now_millis_precision())
    }

    pub fn from_input_at(
        input: ReviewInput,
        limits: &ReviewLimits,
        date: DateTime<Utc>,
    ) -> Result<Self> {
        let text = strings::trim_to(&input.text, limits.max_text_len);
        if text.is_empty() {
            return Err(Error::validation("text", "Please enter a review message.")
                .source("review_store"));
        }

        let name = input
            .name
            .as_deref()
            .map(|n| strings::trim_to(n, limits.max_name_len))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| limits.default_author.clone());

        Ok(Self {
            name,
            rating: input.rating,
            text,
            date,
        })
    }

    /// Author label, falling back for records stored without a name
    pub fn author_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.name.trim().is_empty() {
            fallback
        } else {
            &self.name
        }
    }

    /// ISO 8601 timestamp with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`
    pub fn date_iso(&self) -> String {
        self.date.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_text_is_rejected() {
        let limits = ReviewLimits::default();
        for text in ["", "   ", "\n\t"] {
            let err = UserReview::from_input(ReviewInput::new(text), &limits).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::Validation { .. }));
        }
    }

    #[test]
    fn test_fields_are_trimmed_and_capped() {
        let limits = ReviewLimits::default();
        let long_name = "n".repeat(80);
        let long_text = format!("  {}  ", "t".repeat(1000));

        let review =
            UserReview::from_input(ReviewInput::new(long_text).name(long_name), &limits).unwrap();
        assert_eq!(review.name.chars().count(), 50);
        assert_eq!(review.text.chars().count(), 800);
        assert!(review.text.starts_with('t'));
    }

    #[test]
    fn test_blank_name_uses_default_author() {
        let limits = ReviewLimits::default();
        let review = UserReview::from_input(ReviewInput::new("ok").name("   "), &limits).unwrap();
        assert_eq!(review.name, "Guest");

        let review = UserReview::from_input(ReviewInput::new("ok"), &limits).unwrap();
        assert_eq!(review.name, "Guest");
    }

    #[test]
    fn test_markup_is_kept_verbatim() {
        let review = UserReview::from_input(
            ReviewInput::new("<b>bold</b> & more"),
            &ReviewLimits::default(),
        )
        .unwrap();
        assert_eq!(review.text, "<b>bold</b> & more");
    }

    #[test]
    fn test_date_iso_has_millis() {
        let date = Time::from_millis(1_714_557_600_123);
        let review =
            UserReview::from_input_at(ReviewInput::new("ok"), &ReviewLimits::default(), date)
                .unwrap();
        assert_eq!(review.date_iso(), "2024-05-01T10:00:00.123Z");
    }

    #[test]
    fn test_stored_date_keeps_zero_millis() {
        let date = Time::from_millis(1_714_557_600_000);
        let review =
            UserReview::from_input_at(ReviewInput::new("ok"), &ReviewLimits::default(), date)
                .unwrap();
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["date"], "2024-05-01T10:00:00.000Z");

        let back: UserReview = serde_json::from_value(value).unwrap();
        assert_eq!(back.date, date);
    }

    #[test]
    fn test_deserializes_browser_record() {
        let json = r#"{"name":"Asha","rating":4,"text":"Nice","date":"2024-05-01T10:00:00.000Z"}"#;
        let review: UserReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.name, "Asha");
        assert_eq!(review.rating.value(), 4);

        let json = r#"{"rating":4,"text":"Nice","date":"2024-05-01T10:00:00.000Z"}"#;
        let review: UserReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.author_or("Anonymous"), "Anonymous");
    }
}
