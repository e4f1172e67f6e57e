//! Aggregation of listings across a capture: review filter, dedup, extraction.

use std::collections::HashSet;

use mkrsbnb_core::{AppConfig, ListingRecord};

use crate::error::{HarError, NoPriceError};
use crate::har::HarReader;
use crate::listing::Listing;
use crate::response::ResponseEnvelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Drop listings whose review count is zero.
    pub reject_no_review: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            reject_no_review: true,
        }
    }
}

impl PipelineOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            reject_no_review: config.reject_no_review,
        }
    }
}

/// Flattens the listings of `envelopes`, applies the review filter and keeps
/// the first listing seen for each ID.
///
/// Order is envelope order, then result order within an envelope. A later
/// listing sharing an ID with an earlier one is dropped even if its fields
/// differ.
pub fn aggregate_listings<'a, I>(envelopes: I, options: PipelineOptions) -> Vec<&'a Listing>
where
    I: IntoIterator<Item = &'a ResponseEnvelope>,
{
    let mut seen = HashSet::new();
    envelopes
        .into_iter()
        .flat_map(ResponseEnvelope::listings)
        .filter(|listing| !options.reject_no_review || listing.review_count() > 0)
        .filter(|listing| seen.insert(listing.id()))
        .collect()
}

/// Extracts a [`ListingRecord`] from each listing.
///
/// # Errors
///
/// Returns the first [`NoPriceError`] encountered.
pub fn into_records<'a, I>(listings: I) -> Result<Vec<ListingRecord>, NoPriceError>
where
    I: IntoIterator<Item = &'a Listing>,
{
    listings.into_iter().map(Listing::to_record).collect()
}

/// Runs the full pipeline over HAR text.
///
/// # Errors
///
/// Propagates malformed-document, malformed-body and missing-price errors.
pub fn extract_from_har(
    text: &str,
    options: PipelineOptions,
) -> Result<Vec<ListingRecord>, HarError> {
    let reader = HarReader::new(text)?;
    let envelopes = reader.search_results()?;
    let listings = aggregate_listings(envelopes, options);
    tracing::debug!(
        envelopes = envelopes.len(),
        listings = listings.len(),
        "aggregated search results"
    );
    Ok(into_records(listings)?)
}

/// Runs the pipeline over a single raw search API response body.
///
/// # Errors
///
/// Propagates malformed-body and missing-price errors.
pub fn extract_from_response_body(
    body: &str,
    options: PipelineOptions,
) -> Result<Vec<ListingRecord>, HarError> {
    let envelopes = ResponseEnvelope::from_body_str(body)?;
    Ok(into_records(aggregate_listings(&envelopes, options))?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::response::StaysSearchResponse;

    fn stay(id: &str, rating: Option<&str>, price: &str) -> serde_json::Value {
        json!({
            "__typename": "StaySearchResult",
            "listing": { "id": id, "name": format!("Listing {id}"), "avgRatingLocalized": rating },
            "pricingQuote": {
                "structuredStayDisplayPrice": { "primaryLine": { "price": price } }
            }
        })
    }

    fn envelope(results: Vec<serde_json::Value>) -> ResponseEnvelope {
        ResponseEnvelope::Search(
            StaysSearchResponse::new(json!({
                "__typename": "StaysSearchResponse",
                "searchResults": results
            }))
            .unwrap(),
        )
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let envelopes = vec![
            envelope(vec![stay("a", Some("4.80 (50)"), "$100")]),
            envelope(vec![stay("a", Some("3.00 (1)"), "$999"), stay("b", Some("4.00 (2)"), "$5")]),
        ];
        let records = into_records(aggregate_listings(&envelopes, PipelineOptions::default())).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[0].price, 100);
        assert_eq!(records[0].review_count, 50);
        assert_eq!(records[1].id, "b");
    }

    #[test]
    fn reject_no_review_drops_unrated() {
        let envelopes = vec![envelope(vec![
            stay("rated", Some("4.10 (3)"), "$10"),
            stay("new", Some("New"), "$10"),
            stay("none", None, "$10"),
        ])];
        let listings = aggregate_listings(&envelopes, PipelineOptions::default());
        assert!(listings.iter().all(|l| l.review_count() > 0));
        assert_eq!(listings.len(), 1);
    }

    #[test]
    fn keep_no_review_retains_unrated() {
        let envelopes = vec![envelope(vec![
            stay("rated", Some("4.10 (3)"), "$10"),
            stay("new", Some("New"), "$10"),
        ])];
        let options = PipelineOptions {
            reject_no_review: false,
        };
        let ids: Vec<String> = aggregate_listings(&envelopes, options)
            .into_iter()
            .map(Listing::id)
            .collect();
        assert_eq!(ids, vec!["rated", "new"]);
    }

    #[test]
    fn rejected_listing_without_price_does_not_fail() {
        let envelopes = vec![envelope(vec![
            json!({ "__typename": "StaySearchResult", "listing": { "id": "noprice" } }),
            stay("ok", Some("4.90 (9)"), "$20"),
        ])];
        let records = into_records(aggregate_listings(&envelopes, PipelineOptions::default())).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "ok");
    }

    #[test]
    fn surviving_listing_without_price_fails() {
        let envelopes = vec![envelope(vec![json!({
            "__typename": "StaySearchResult",
            "listing": { "id": "noprice", "avgRatingLocalized": "4.90 (9)" }
        })])];
        let err = into_records(aggregate_listings(&envelopes, PipelineOptions::default())).unwrap_err();
        assert_eq!(err.listing_id, "noprice");
    }

    #[test]
    fn options_follow_app_config() {
        let config = AppConfig {
            reject_no_review: false,
            ..AppConfig::default()
        };
        assert!(!PipelineOptions::from_app_config(&config).reject_no_review);
    }

    #[test]
    fn extract_from_response_body_reads_presentation_path() {
        let body = json!({
            "data": { "presentation": { "staysSearch": {
                "results": {
                    "__typename": "StaysSearchResponse",
                    "searchResults": [stay("x", Some("4.20 (7)"), "$1,050")]
                }
            }}}
        })
        .to_string();
        let records = extract_from_response_body(&body, PipelineOptions::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 1050);
    }
}
