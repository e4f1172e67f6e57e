//! CSV rendering of listing records.

use std::io;

use mkrsbnb_core::ListingRecord;

use crate::error::HarError;

pub const CSV_HEADER: [&str; 7] = [
    "ID",
    "Name",
    "Review score",
    "Review total",
    "Price",
    "Superhost",
    "Guest favourite",
];

/// Writes `records` as CSV to `writer`, header first, rows in input order.
///
/// The header is always written, so an empty slice yields a single line.
///
/// # Errors
///
/// Returns [`HarError::Csv`] if the underlying writer fails.
pub fn write_csv<W: io::Write>(writer: W, records: &[ListingRecord]) -> Result<(), HarError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.write_record([
            record.id.clone(),
            record.name.clone(),
            record.review_score.to_string(),
            record.review_count.to_string(),
            record.price.to_string(),
            record.is_superhost.to_string(),
            record.is_guest_favorite.to_string(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
