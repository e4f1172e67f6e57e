use thiserror::Error;

/// Errors returned while reading a capture and extracting listings from it.
#[derive(Debug, Error)]
pub enum HarError {
    /// The outer HAR document is not valid JSON or lacks `log.entries`.
    #[error("malformed HAR document: {0}")]
    Document(#[source] serde_json::Error),

    /// A qualifying entry's response body could not be parsed as JSON.
    #[error("malformed response body in entry {index} ({url}): {source}")]
    ResponseBody {
        index: usize,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A qualifying entry carries no response body text.
    #[error("entry {index} ({url}) has no response body")]
    MissingBody { index: usize, url: String },

    /// A qualifying entry's body uses a transfer encoding we do not decode.
    #[error("entry {index} ({url}) has unsupported body encoding `{encoding}`")]
    UnsupportedEncoding {
        index: usize,
        url: String,
        encoding: String,
    },

    /// A raw response body passed directly to a constructor is not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A node was handed to a constructor expecting a different `__typename`.
    #[error("type is not {expected} but `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// The capture holds no entries matching the search API.
    #[error("capture contains no search API entries")]
    NoSearchEntries,

    #[error("invalid capture timestamp `{value}`: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    NoPrice(#[from] NoPriceError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A listing's price was requested but its price string holds no digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("listing `{listing_id}` has no price (price string `{price_str}`)")]
pub struct NoPriceError {
    pub listing_id: String,
    pub price_str: String,
}
