//! HAR (HTTP Archive) types, limited to the fields the pipeline reads.
//!
//! Browser exports carry many more fields per entry (headers, cookies,
//! timings, cache state). serde ignores them. `log.entries` is required;
//! a document without it is rejected as malformed.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Path of the two search endpoints, e.g. `/api/v3/StaysSearch/<hash>`.
static SEARCH_API_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/api/v\d+/(?:StaysSearch|StaysMapS2Search)/").expect("valid regex")
});

#[derive(Debug, Deserialize)]
pub struct HarDocument {
    pub log: HarLog,
}

#[derive(Debug, Deserialize)]
pub struct HarLog {
    pub entries: Vec<CaptureEntry>,
}

/// One logged HTTP transaction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureEntry {
    /// RFC 3339 timestamp of the request, e.g. `"2024-03-01T10:15:30.123+07:00"`.
    #[serde(default)]
    pub started_date_time: Option<String>,
    pub request: CaptureRequest,
    pub response: CaptureResponse,
}

#[derive(Debug, Deserialize)]
pub struct CaptureRequest {
    pub method: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CaptureResponse {
    /// `0` for requests that never completed.
    pub status: i64,
    #[serde(default)]
    pub content: CaptureContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureContent {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// `"base64"` when the exporter stored a binary-safe body.
    #[serde(default)]
    pub encoding: Option<String>,
}

impl CaptureEntry {
    /// True for a successful `POST` to one of the search endpoints.
    #[must_use]
    pub fn is_stays_search(&self) -> bool {
        SEARCH_API_PATH_RE.is_match(&self.request.url)
            && self.request.method == "POST"
            && self.response.status == 200
    }
}
