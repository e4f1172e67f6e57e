//! Reader over a HAR capture of a search session.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset};

use crate::error::HarError;
use crate::response::ResponseEnvelope;
use crate::types::{CaptureEntry, HarDocument};

/// Holds the search API entries of one capture.
///
/// Entries that do not hit the search endpoints are dropped at construction.
/// Response bodies are parsed lazily by [`HarReader::search_results`] and the
/// outcome is kept for the life of the reader.
#[derive(Debug)]
pub struct HarReader {
    /// Qualifying entries paired with their index in `log.entries`.
    entries: Vec<(usize, CaptureEntry)>,
    total_entries: usize,
    search_results: OnceLock<Vec<ResponseEnvelope>>,
}

impl HarReader {
    /// Parses HAR text and keeps the search API entries.
    ///
    /// # Errors
    ///
    /// Returns [`HarError::Document`] if the text is not JSON or lacks
    /// `log.entries`.
    pub fn new(text: &str) -> Result<Self, HarError> {
        let document: HarDocument = serde_json::from_str(text).map_err(HarError::Document)?;
        let total_entries = document.log.entries.len();

        let entries: Vec<(usize, CaptureEntry)> = document
            .log
            .entries
            .into_iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_stays_search())
            .collect();

        tracing::debug!(
            total_entries,
            search_entries = entries.len(),
            "filtered HAR entries"
        );

        Ok(Self {
            entries,
            total_entries,
            search_results: OnceLock::new(),
        })
    }

    /// Search API entries in capture order.
    pub fn entries(&self) -> impl Iterator<Item = &CaptureEntry> {
        self.entries.iter().map(|(_, entry)| entry)
    }

    /// Number of entries in the capture before filtering.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Timestamp of the first search API entry.
    ///
    /// # Errors
    ///
    /// Returns [`HarError::NoSearchEntries`] when the capture has no search
    /// entries, or [`HarError::Timestamp`] when `startedDateTime` is missing
    /// or not RFC 3339.
    pub fn datetime(&self) -> Result<DateTime<FixedOffset>, HarError> {
        let (_, first) = self.entries.first().ok_or(HarError::NoSearchEntries)?;
        let value = first.started_date_time.clone().unwrap_or_default();
        let parsed = DateTime::parse_from_rfc3339(&value);
        parsed.map_err(|source| HarError::Timestamp { value, source })
    }

    /// Response envelopes of every search entry, flattened in entry order.
    ///
    /// Computed on first call; later calls return the cached sequence.
    ///
    /// # Errors
    ///
    /// Returns the first body error encountered ([`HarError::ResponseBody`],
    /// [`HarError::MissingBody`] or [`HarError::UnsupportedEncoding`]). Nothing
    /// is cached on failure.
    pub fn search_results(&self) -> Result<&[ResponseEnvelope], HarError> {
        if let Some(results) = self.search_results.get() {
            return Ok(results);
        }

        let mut results = Vec::new();
        for (index, entry) in &self.entries {
            let body = parse_body(*index, entry)?;
            let envelopes = ResponseEnvelope::from_body(&body);
            if envelopes.is_empty() {
                tracing::debug!(index, url = %entry.request.url, "search entry holds no listings");
            }
            results.extend(envelopes);
        }

        Ok(self.search_results.get_or_init(|| results))
    }

    /// Parsed response body of every search entry, in entry order.
    ///
    /// # Errors
    ///
    /// Same body errors as [`HarReader::search_results`].
    pub fn dump_responses(&self) -> Result<Vec<serde_json::Value>, HarError> {
        self.entries
            .iter()
            .map(|(index, entry)| parse_body(*index, entry))
            .collect()
    }
}

fn parse_body(index: usize, entry: &CaptureEntry) -> Result<serde_json::Value, HarError> {
    let content = &entry.response.content;
    let url = || entry.request.url.clone();

    if let Some(encoding) = content.encoding.as_deref().filter(|e| !e.is_empty()) {
        return Err(HarError::UnsupportedEncoding {
            index,
            url: url(),
            encoding: encoding.to_string(),
        });
    }

    let text = content
        .text
        .as_deref()
        .ok_or_else(|| HarError::MissingBody { index, url: url() })?;

    serde_json::from_str(text).map_err(|source| {
        tracing::debug!(index, mime_type = ?content.mime_type, "response body is not JSON");
        HarError::ResponseBody {
            index,
            url: url(),
            source,
        }
    })
}

#[cfg(test)]
#[path = "har_test.rs"]
mod tests;
