//! Queries on the caller's decks and primary collection.
//!
//! All endpoints here require a signed-in user; 401/403 answers surface as
//! [`DmError::Unauthorized`](crate::DmError::Unauthorized).

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::error::Result;
use crate::filter::SearchFilter;
use crate::models::{
    AmountRequest, CollectionCardStub, CollectionData, CollectionInfo, NameRequest, PageNumber,
    StubAmountRequest,
};
use crate::transport::ApiClient;

// ---------------------------------------------------------------------------
// CollectionQuery
// ---------------------------------------------------------------------------

pub struct CollectionQuery<'a> {
    api: &'a ApiClient,
}

impl<'a> CollectionQuery<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    // -- Decks -------------------------------------------------------------

    /// Summaries of all decks, most recently modified first.
    pub fn list_decks(&self) -> Result<Vec<CollectionInfo>> {
        self.api.get_json("/api/decks")
    }

    pub fn get_deck(&self, id: Uuid) -> Result<CollectionData> {
        self.api.get_json(&format!("/api/deck/{}", id))
    }

    pub fn create_deck(&self, name: &str) -> Result<CollectionInfo> {
        self.api
            .post("/api/decks", Some(&NameRequest { name }))?
            .json()
    }

    pub fn rename_deck(&self, id: Uuid, name: &str) -> Result<CollectionInfo> {
        self.api
            .post(&format!("/api/deck/{}", id), Some(&NameRequest { name }))?
            .json()
    }

    pub fn delete_deck(&self, id: Uuid) -> Result<()> {
        self.api
            .delete(&format!("/api/deck/{}", id))?
            .error_for_status()?;
        Ok(())
    }

    /// Set the amount of a card in a deck, returning the updated summary.
    pub fn set_deck_amount(&self, id: Uuid, card_id: i64, amount: u32) -> Result<CollectionInfo> {
        self.api
            .put(
                &format!("/api/deck/{}/cards/{}", id, card_id),
                &AmountRequest { amount },
            )?
            .json()
    }

    // -- Primary collection ------------------------------------------------

    /// One page of the primary collection, narrowed by `filter`.
    pub fn primary_page(&self, page: PageNumber, filter: &SearchFilter) -> Result<CollectionData> {
        let path = format!("/api/collection/{}", page.to_server());
        self.api
            .get_with_query(&path, filter.to_query_params())?
            .json()
    }

    /// Set the amount of a card in the primary collection, returning the
    /// updated summary.
    pub fn set_primary_amount(&self, card_id: i64, amount: u32) -> Result<CollectionInfo> {
        self.api
            .put(
                &format!("/api/collection/cards/{}", card_id),
                &AmountRequest { amount },
            )?
            .json()
    }

    // -- Single card amounts -----------------------------------------------

    /// Owned amount of one card in the primary collection.
    pub fn card_amount(&self, card_id: i64) -> Result<CollectionCardStub> {
        self.api
            .get_json(&format!("/api/collectionStub/cards/{}", card_id))
    }

    pub fn set_card_amount(&self, card_id: i64, amount: u32) -> Result<CollectionCardStub> {
        self.api
            .put(
                &format!("/api/collectionStub/cards/{}", card_id),
                &AmountRequest { amount },
            )?
            .json()
    }

    /// Set the amount of a card in the primary collection and get back the
    /// owned amount of every card in it, keyed by card id.
    pub fn set_stub_amount(&self, card_id: i64, amount: u32) -> Result<BTreeMap<i64, u32>> {
        self.api
            .put("/api/collectionStub", &StubAmountRequest { card_id, amount })?
            .json()
    }
}
