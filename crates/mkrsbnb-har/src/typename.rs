//! The `__typename` discriminator carried by every search API node.

use std::fmt;

pub const TYPENAME_FIELD: &str = "__typename";

/// Known `__typename` values, plus a catch-all for anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Typename {
    StaysSearchResponse,
    StaysMapSearchResponse,
    /// A full listing with name, pricing and rating.
    StaySearchResult,
    /// Cached listing stub without name, price or score. Always skipped.
    SkinnyListingItem,
    Unknown(String),
}

impl Typename {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "StaysSearchResponse" => Self::StaysSearchResponse,
            "StaysMapSearchResponse" => Self::StaysMapSearchResponse,
            "StaySearchResult" => Self::StaySearchResult,
            "SkinnyListingItem" => Self::SkinnyListingItem,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Reads the discriminator of `node`. Returns `None` when the field is
    /// absent or not a string.
    #[must_use]
    pub fn of(node: &serde_json::Value) -> Option<Self> {
        node.get(TYPENAME_FIELD)
            .and_then(serde_json::Value::as_str)
            .map(Self::parse)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::StaysSearchResponse => "StaysSearchResponse",
            Self::StaysMapSearchResponse => "StaysMapSearchResponse",
            Self::StaySearchResult => "StaySearchResult",
            Self::SkinnyListingItem => "SkinnyListingItem",
            Self::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for Typename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks that `node` is tagged `expected`.
///
/// # Errors
///
/// Returns [`crate::HarError::TypeMismatch`] when the tag differs or is
/// missing.
pub(crate) fn expect_typename(
    node: &serde_json::Value,
    expected: &'static str,
) -> Result<(), crate::HarError> {
    match node.get(TYPENAME_FIELD).and_then(serde_json::Value::as_str) {
        Some(found) if found == expected => Ok(()),
        found => Err(crate::HarError::TypeMismatch {
            expected,
            found: found.unwrap_or("<missing>").to_string(),
        }),
    }
}
