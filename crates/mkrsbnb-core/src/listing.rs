//! Flat listing record produced by the extraction pipeline.

/// One row of the output table.
///
/// Built from a raw search-result node by `mkrsbnb_har::Listing::to_record`.
/// Every field is populated: optional source fields resolve to their
/// documented defaults (score and count `0`, badges `false`) before a record
/// is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRecord {
    /// Opaque listing identifier, rendered as text. Unique within one output.
    pub id: String,
    /// Display name with embedded newlines removed.
    pub name: String,
    /// Average rating in `[0, 5]`; `0` when the listing is unrated.
    pub review_score: f64,
    /// Number of reviews; `0` when the listing is unrated.
    pub review_count: u64,
    /// Displayed nightly or total price with thousands separators stripped.
    pub price: u64,
    pub is_superhost: bool,
    pub is_guest_favorite: bool,
}

