//! Card queries against the `/api/card*` endpoints.

use crate::error::Result;
use crate::filter::SearchFilter;
use crate::models::{Card, CardStub, PageNumber, PagedResult};
use crate::query_params::QueryParams;
use crate::transport::ApiClient;

// ---------------------------------------------------------------------------
// CardQuery
// ---------------------------------------------------------------------------

/// Query interface for card listings and single cards.
pub struct CardQuery<'a> {
    api: &'a ApiClient,
}

impl<'a> CardQuery<'a> {
    /// Create a new `CardQuery` bound to the given API client.
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    // -- Listing -----------------------------------------------------------

    /// Fetch one page of card stubs matching `filter`.
    ///
    /// `page` is 1-based; it is converted to the server's 0-based numbering.
    /// Owned amounts reflect the caller's primary collection when signed in.
    pub fn search(&self, page: PageNumber, filter: &SearchFilter) -> Result<PagedResult<CardStub>> {
        self.search_raw(page, filter.to_query_params())
    }

    /// Like [`search`](Self::search), with already serialized parameters.
    pub fn search_raw(&self, page: PageNumber, query: QueryParams) -> Result<PagedResult<CardStub>> {
        let path = format!("/api/cards/{}", page.to_server());
        self.api.get_with_query(&path, query)?.json()
    }

    // -- Single card lookup ------------------------------------------------

    /// Retrieve one card with all its facets. The id is the card's external
    /// (`dmId`) or numeric id.
    pub fn get(&self, id: &str) -> Result<Card> {
        self.api.get_json(&format!("/api/card/{}", id))
    }

    // -- Batch lookup ------------------------------------------------------

    /// Retrieve stubs for several card ids.
    pub fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<CardStub>> {
        let query: QueryParams = ids
            .iter()
            .map(|id| ("cardIds", id.to_string()))
            .collect();
        self.api.get_with_query("/api/cards", query)?.json()
    }
}
