//! Search API response envelopes and their listing walks.
//!
//! A search response body nests its listings under
//! `data.presentation.staysSearch`:
//!
//! - `results` is a `StaysSearchResponse` whose `searchResults` array holds
//!   the paginated list.
//! - `mapResults` is a `StaysMapSearchResponse` whose `mapSearchResults`
//!   array holds the pins shown on the map.
//!
//! Both arrays mix `StaySearchResult` nodes with `SkinnyListingItem` stubs;
//! only the former become [`Listing`]s.

use std::sync::OnceLock;

use crate::error::HarError;
use crate::listing::Listing;
use crate::typename::{expect_typename, Typename};

const STAYS_SEARCH_POINTER: &str = "/data/presentation/staysSearch";

/// Paginated search results envelope.
#[derive(Debug)]
pub struct StaysSearchResponse {
    node: serde_json::Value,
    listings: OnceLock<Vec<Listing>>,
}

impl StaysSearchResponse {
    pub const TYPENAME: &'static str = "StaysSearchResponse";
    const RESULTS_FIELD: &'static str = "searchResults";

    /// # Errors
    ///
    /// Returns [`HarError::TypeMismatch`] if `node` is not a
    /// `StaysSearchResponse`.
    pub fn new(node: serde_json::Value) -> Result<Self, HarError> {
        expect_typename(&node, Self::TYPENAME)?;
        Ok(Self {
            node,
            listings: OnceLock::new(),
        })
    }

    /// # Errors
    ///
    /// Returns [`HarError::Deserialize`] on malformed JSON and
    /// [`HarError::TypeMismatch`] on a wrong discriminator.
    pub fn from_json(body: &str) -> Result<Self, HarError> {
        Self::new(parse_json(body, Self::TYPENAME)?)
    }

    /// `StaySearchResult` children of `searchResults`, in input order.
    pub fn listings(&self) -> &[Listing] {
        self.listings
            .get_or_init(|| collect_listings(&self.node, Self::RESULTS_FIELD))
    }
}

/// Map-pin search results envelope.
#[derive(Debug)]
pub struct StaysMapSearchResponse {
    node: serde_json::Value,
    listings: OnceLock<Vec<Listing>>,
}

impl StaysMapSearchResponse {
    pub const TYPENAME: &'static str = "StaysMapSearchResponse";
    const RESULTS_FIELD: &'static str = "mapSearchResults";

    /// # Errors
    ///
    /// Returns [`HarError::TypeMismatch`] if `node` is not a
    /// `StaysMapSearchResponse`.
    pub fn new(node: serde_json::Value) -> Result<Self, HarError> {
        expect_typename(&node, Self::TYPENAME)?;
        Ok(Self {
            node,
            listings: OnceLock::new(),
        })
    }

    /// # Errors
    ///
    /// Returns [`HarError::Deserialize`] on malformed JSON and
    /// [`HarError::TypeMismatch`] on a wrong discriminator.
    pub fn from_json(body: &str) -> Result<Self, HarError> {
        Self::new(parse_json(body, Self::TYPENAME)?)
    }

    /// `StaySearchResult` children of `mapSearchResults`, in input order.
    pub fn listings(&self) -> &[Listing] {
        self.listings
            .get_or_init(|| collect_listings(&self.node, Self::RESULTS_FIELD))
    }
}

/// Either envelope shape found in a search API response body.
#[derive(Debug)]
pub enum ResponseEnvelope {
    Search(StaysSearchResponse),
    Map(StaysMapSearchResponse),
}

impl ResponseEnvelope {
    pub fn listings(&self) -> &[Listing] {
        match self {
            Self::Search(response) => response.listings(),
            Self::Map(response) => response.listings(),
        }
    }

    #[must_use]
    pub fn typename(&self) -> Typename {
        match self {
            Self::Search(_) => Typename::StaysSearchResponse,
            Self::Map(_) => Typename::StaysMapSearchResponse,
        }
    }

    /// Finds the envelopes populated in a full response body.
    ///
    /// `results` is taken when its `searchResults` is populated and it is
    /// tagged `StaysSearchResponse`; `mapResults` is taken when it is tagged
    /// `StaysMapSearchResponse`. Anything else contributes nothing, so the
    /// result holds zero, one or two envelopes.
    #[must_use]
    pub fn from_body(body: &serde_json::Value) -> Vec<Self> {
        let Some(stays_search) = body.pointer(STAYS_SEARCH_POINTER) else {
            tracing::debug!("response body has no staysSearch presentation");
            return vec![];
        };

        let mut envelopes = Vec::new();

        if let Some(results) = stays_search
            .get("results")
            .filter(|r| r.get(StaysSearchResponse::RESULTS_FIELD).is_some_and(|v| !v.is_null()))
        {
            match Typename::of(results) {
                Some(Typename::StaysSearchResponse) => {
                    envelopes.push(Self::Search(StaysSearchResponse {
                        node: results.clone(),
                        listings: OnceLock::new(),
                    }));
                }
                other => tracing::debug!(typename = ?other, "skipping unexpected results envelope"),
            }
        }

        if let Some(map_results) = stays_search.get("mapResults").filter(|v| !v.is_null()) {
            match Typename::of(map_results) {
                Some(Typename::StaysMapSearchResponse) => {
                    envelopes.push(Self::Map(StaysMapSearchResponse {
                        node: map_results.clone(),
                        listings: OnceLock::new(),
                    }));
                }
                other => tracing::debug!(typename = ?other, "skipping unexpected mapResults envelope"),
            }
        }

        envelopes
    }

    /// Parses a raw response body and finds its envelopes.
    ///
    /// # Errors
    ///
    /// Returns [`HarError::Deserialize`] on malformed JSON.
    pub fn from_body_str(body: &str) -> Result<Vec<Self>, HarError> {
        Ok(Self::from_body(&parse_json(body, "search response body")?))
    }
}

fn parse_json(body: &str, context: &str) -> Result<serde_json::Value, HarError> {
    serde_json::from_str(body).map_err(|source| HarError::Deserialize {
        context: context.to_string(),
        source,
    })
}

fn collect_listings(node: &serde_json::Value, field: &str) -> Vec<Listing> {
    node.get(field)
        .and_then(serde_json::Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|child| match Typename::of(child) {
            Some(Typename::StaySearchResult) => Listing::new(child.clone()).ok(),
            Some(Typename::SkinnyListingItem) => None,
            other => {
                tracing::debug!(typename = ?other, field, "skipping non-listing search result");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "response_test.rs"]
mod tests;
