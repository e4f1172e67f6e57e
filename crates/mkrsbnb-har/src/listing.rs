//! Field extraction from a single `StaySearchResult` node.
//!
//! ## Observed node shape
//!
//! ```json
//! {
//!   "__typename": "StaySearchResult",
//!   "listing": {
//!     "id": "12345",
//!     "name": "Cozy loft\nnear the river",
//!     "avgRatingLocalized": "4.92 (118)",
//!     "formattedBadges": [{ "loggingContext": { "badgeType": "SUPERHOST" } }]
//!   },
//!   "pricingQuote": {
//!     "structuredStayDisplayPrice": {
//!       "primaryLine": { "price": "$120", "discountedPrice": "$99" }
//!     }
//!   }
//! }
//! ```
//!
//! Everything except `__typename` may be absent. `avgRatingLocalized` is
//! `"New"` or missing for unrated listings, `pricingQuote` is missing for some
//! map results, and `formattedBadges` is often `null`.

use mkrsbnb_core::ListingRecord;

use crate::error::{HarError, NoPriceError};
use crate::parse::{parse_price, parse_rating};
use crate::typename::expect_typename;

pub const SUPERHOST_BADGE: &str = "SUPERHOST";
pub const GUEST_FAVORITE_BADGE: &str = "GUEST_FAVORITE";

/// A validated `StaySearchResult` node.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    node: serde_json::Value,
}

impl Listing {
    pub const TYPENAME: &'static str = "StaySearchResult";

    /// Wraps `node` after checking its discriminator.
    ///
    /// # Errors
    ///
    /// Returns [`HarError::TypeMismatch`] if `node` is not a `StaySearchResult`.
    pub fn new(node: serde_json::Value) -> Result<Self, HarError> {
        expect_typename(&node, Self::TYPENAME)?;
        Ok(Self { node })
    }

    /// Parses a raw JSON `StaySearchResult` body.
    ///
    /// # Errors
    ///
    /// Returns [`HarError::Deserialize`] on malformed JSON and
    /// [`HarError::TypeMismatch`] on a wrong discriminator.
    pub fn from_json(body: &str) -> Result<Self, HarError> {
        let node = serde_json::from_str(body).map_err(|source| HarError::Deserialize {
            context: Self::TYPENAME.to_string(),
            source,
        })?;
        Self::new(node)
    }

    fn listing(&self) -> &serde_json::Value {
        self.node.get("listing").unwrap_or(&serde_json::Value::Null)
    }

    /// Listing ID as text. Numeric IDs are rendered in decimal; a missing ID
    /// yields an empty string.
    #[must_use]
    pub fn id(&self) -> String {
        match self.listing().get("id") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    /// Display name with forced line breaks removed.
    #[must_use]
    pub fn name(&self) -> String {
        self.listing()
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .replace('\n', "")
    }

    fn rating(&self) -> Option<(f64, u64)> {
        self.listing()
            .get("avgRatingLocalized")
            .and_then(serde_json::Value::as_str)
            .and_then(parse_rating)
    }

    /// Average rating, or `0` when the listing is unrated.
    #[must_use]
    pub fn review_score(&self) -> f64 {
        self.rating().map_or(0.0, |(score, _)| score)
    }

    /// Review count, or `0` when the listing is unrated.
    #[must_use]
    pub fn review_count(&self) -> u64 {
        self.rating().map_or(0, |(_, count)| count)
    }

    /// Display price string, preferring the discounted price over the full
    /// price. Empty when the node has no pricing subtree.
    #[must_use]
    pub fn price_str(&self) -> String {
        let Some(primary_line) = self
            .node
            .get("pricingQuote")
            .filter(|v| !v.is_null())
            .and_then(|quote| quote.get("structuredStayDisplayPrice"))
            .and_then(|display| display.get("primaryLine"))
        else {
            return String::new();
        };

        primary_line
            .get("discountedPrice")
            .and_then(serde_json::Value::as_str)
            .or_else(|| primary_line.get("price").and_then(serde_json::Value::as_str))
            .unwrap_or_default()
            .to_string()
    }

    /// Integer price parsed from [`Self::price_str`].
    ///
    /// # Errors
    ///
    /// Returns [`NoPriceError`] when the price string has no digits, which is
    /// always the case for listings without a pricing subtree.
    pub fn price(&self) -> Result<u64, NoPriceError> {
        let price_str = self.price_str();
        parse_price(&price_str).ok_or_else(|| NoPriceError {
            listing_id: self.id(),
            price_str,
        })
    }

    #[must_use]
    pub fn is_superhost(&self) -> bool {
        self.has_badge(SUPERHOST_BADGE)
    }

    #[must_use]
    pub fn is_guest_favorite(&self) -> bool {
        self.has_badge(GUEST_FAVORITE_BADGE)
    }

    fn has_badge(&self, badge_type: &str) -> bool {
        self.listing()
            .get("formattedBadges")
            .and_then(serde_json::Value::as_array)
            .is_some_and(|badges| {
                badges.iter().any(|badge| {
                    badge
                        .get("loggingContext")
                        .and_then(|ctx| ctx.get("badgeType"))
                        .and_then(serde_json::Value::as_str)
                        == Some(badge_type)
                })
            })
    }

    /// Materializes every field into a [`ListingRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`NoPriceError`] when the listing has no usable price.
    pub fn to_record(&self) -> Result<ListingRecord, NoPriceError> {
        let price = self.price()?;
        Ok(ListingRecord {
            id: self.id(),
            name: self.name(),
            review_score: self.review_score(),
            review_count: self.review_count(),
            price,
            is_superhost: self.is_superhost(),
            is_guest_favorite: self.is_guest_favorite(),
        })
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
