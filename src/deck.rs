//! A single deck with its first page of owned cards.
//!
//! [`Deck`] loads a collection by id and applies amount changes locally once
//! the server has confirmed them, avoiding a full reload where the change can
//! be patched into the current page.

use tracing::warn;
use uuid::Uuid;

use crate::error::{DmError, Result};
use crate::models::{AmountRequest, CardStub, CollectionData, CollectionInfo};
use crate::transport::{ApiClient, ApiResponse};

/// What [`Deck::set_card_amount`] did to the local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountUpdate {
    /// No collection was loaded; nothing was sent.
    NotLoaded,
    /// The card was dropped from the current page.
    Removed,
    /// The card's amount was updated in place.
    Updated,
    /// The card was not on the current page; the collection was reloaded.
    Reloaded,
    /// The server applied the change, but the follow-up reload failed. The
    /// summary is current, the card page is stale.
    ReloadFailed,
    /// The server did not apply the change. Local state is unchanged.
    Rejected,
}

#[derive(Debug, Clone)]
pub struct Deck {
    id: Uuid,
    collection: Option<CollectionData>,
}

impl Deck {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            collection: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.collection.is_some()
    }

    pub fn collection(&self) -> Option<&CollectionData> {
        self.collection.as_ref()
    }

    /// Cards on the loaded page, empty if nothing is loaded.
    pub fn cards(&self) -> &[CardStub] {
        self.collection
            .as_ref()
            .map(|c| c.card_page.content.as_slice())
            .unwrap_or(&[])
    }

    pub fn info(&self) -> Option<&CollectionInfo> {
        self.collection.as_ref().map(|c| &c.info)
    }

    /// Owned amount of `card_id` on the loaded page, 0 when absent.
    pub fn amount(&self, card_id: i64) -> u32 {
        self.cards()
            .iter()
            .find(|c| c.id == card_id)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    /// Fetch the deck, replacing the local collection on success.
    ///
    /// Returns `Ok(true)` when the local value was replaced. 401/403 answers
    /// are returned as [`DmError::Unauthorized`]; any other failure is logged
    /// and keeps the previous value (`Ok(false)`).
    pub fn load(&mut self, api: &ApiClient) -> Result<bool> {
        let path = format!("/api/deck/{}", self.id);
        let Some(response) = checked(api.get(&path), &path)? else {
            return Ok(false);
        };
        match response.json::<CollectionData>() {
            Ok(data) => {
                self.collection = Some(data);
                Ok(true)
            }
            Err(e) => {
                warn!("Unreadable deck {}: {}", self.id, e);
                Ok(false)
            }
        }
    }

    /// Change the owned amount of one card.
    ///
    /// On success the summary is replaced with the server's answer and the
    /// page is patched: an amount of 0 removes the card, any other amount is
    /// written in place, and a card missing from the page triggers a reload.
    pub fn set_card_amount(
        &mut self,
        api: &ApiClient,
        card_id: i64,
        amount: u32,
    ) -> Result<AmountUpdate> {
        let Some(collection_id) = self.info().map(|i| i.id) else {
            return Ok(AmountUpdate::NotLoaded);
        };
        let path = format!("/api/deck/{}/cards/{}", collection_id, card_id);
        let Some(response) = checked(api.put(&path, &AmountRequest { amount }), &path)? else {
            return Ok(AmountUpdate::Rejected);
        };
        let info = match response.json::<CollectionInfo>() {
            Ok(info) => info,
            Err(e) => {
                warn!("Unreadable amount update for card {}: {}", card_id, e);
                return Ok(AmountUpdate::Rejected);
            }
        };

        let Some(collection) = self.collection.as_mut() else {
            return self.reload(api);
        };
        collection.info = info;
        let cards = &mut collection.card_page.content;
        match cards.iter().position(|c| c.id == card_id) {
            Some(idx) if amount == 0 => {
                cards.remove(idx);
                Ok(AmountUpdate::Removed)
            }
            Some(idx) => {
                cards[idx].amount = amount;
                Ok(AmountUpdate::Updated)
            }
            None => self.reload(api),
        }
    }

    fn reload(&mut self, api: &ApiClient) -> Result<AmountUpdate> {
        if self.load(api)? {
            Ok(AmountUpdate::Reloaded)
        } else {
            Ok(AmountUpdate::ReloadFailed)
        }
    }
}

/// Split a request outcome into a successful response, a distinguished
/// unauthorized error, or `None` for anything that was merely logged.
fn checked(result: Result<ApiResponse>, path: &str) -> Result<Option<ApiResponse>> {
    match result {
        Ok(response) if response.is_success() => Ok(Some(response)),
        Ok(response) => match DmError::from_status(response.status, response.body) {
            e if e.is_unauthorized() => Err(e),
            e => {
                warn!("{} answered {}", path, e);
                Ok(None)
            }
        },
        Err(e) => {
            warn!("{} failed: {}", path, e);
            Ok(None)
        }
    }
}
