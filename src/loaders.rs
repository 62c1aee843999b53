//! Page loaders: one call per navigation.
//!
//! Each loader rebuilds its inputs from the route (page number and query
//! string), issues at most two sequential requests, and maps the outcome:
//!
//! - 401/403 become [`DmError::Unauthorized`] so navigation can show an
//!   error page,
//! - 404 on single-resource pages becomes [`DmError::NotFound`],
//! - every other failure is logged and degrades to empty data.

use tracing::warn;
use uuid::Uuid;

use crate::deck::Deck;
use crate::error::{DmError, Result};
use crate::filter::SearchFilter;
use crate::models::{Card, CardStub, CollectionData, CollectionInfo, PageNumber, PagedResult};
use crate::query_params::QueryParams;
use crate::DmClient;

/// Data for the card listing page.
#[derive(Debug, Clone)]
pub struct CardsPageData {
    pub page: PageNumber,
    pub filter: SearchFilter,
    pub cards: Option<PagedResult<CardStub>>,
}

/// Data for one page of the primary collection.
#[derive(Debug, Clone)]
pub struct CollectionPageData {
    pub page: PageNumber,
    pub filter: SearchFilter,
    pub collection: Option<CollectionData>,
}

/// Data for the single-card page.
#[derive(Debug, Clone)]
pub struct CardDetailData {
    pub card: Option<Card>,
    /// Amount in the primary collection, if it could be fetched.
    pub owned_amount: Option<u32>,
}

/// Data for a deck page: the deck plus the card browser used to add cards.
#[derive(Debug, Clone)]
pub struct DeckPageData {
    pub deck: Deck,
    pub filter: SearchFilter,
    /// Browse the primary collection instead of all cards.
    pub owned_only: bool,
    pub card_page: Option<PagedResult<CardStub>>,
}

/// Fragment key selecting the primary collection as the browser's source.
pub const OWNED_ONLY_KEY: &str = "ownedOnly";

/// Keep unauthorized errors, log and drop everything else.
fn degrade<T>(result: Result<T>, what: &str) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_unauthorized() => Err(e),
        Err(e) => {
            warn!("Failed to load {}: {}", what, e);
            Ok(None)
        }
    }
}

pub fn load_cards(client: &DmClient, page: PageNumber, query: &QueryParams) -> Result<CardsPageData> {
    let filter = SearchFilter::from_query_params(query);
    let cards = degrade(
        client.cards().search(page, &filter),
        &format!("cards page {}", page),
    )?;
    Ok(CardsPageData {
        page,
        filter,
        cards,
    })
}

pub fn load_collection(
    client: &DmClient,
    page: PageNumber,
    query: &QueryParams,
) -> Result<CollectionPageData> {
    let filter = SearchFilter::from_query_params(query);
    let collection = degrade(
        client.collections().primary_page(page, &filter),
        &format!("collection page {}", page),
    )?;
    Ok(CollectionPageData {
        page,
        filter,
        collection,
    })
}

/// Load a card and join it with the caller's owned amount.
///
/// The amount lookup is best effort: anonymous users, missing entries and
/// failures all leave it `None`.
pub fn load_card_detail(client: &DmClient, id: &str) -> Result<CardDetailData> {
    let card = match client.cards().get(id) {
        Err(e @ DmError::NotFound(_)) => return Err(e),
        other => degrade(other, &format!("card {}", id))?,
    };
    let owned_amount = card.as_ref().and_then(|card| {
        match client.collections().card_amount(card.id) {
            Ok(stub) => Some(stub.amount),
            Err(e) => {
                warn!("No owned amount for card {}: {}", card.id, e);
                None
            }
        }
    });
    Ok(CardDetailData { card, owned_amount })
}

/// Load a deck. A failed load yields an unloaded [`Deck`].
pub fn load_deck(client: &DmClient, id: Uuid) -> Result<Deck> {
    let mut deck = Deck::new(id);
    deck.load(client.api())?;
    Ok(deck)
}

/// Load a deck, then the first page of the card browser next to it.
///
/// `fragment` carries the browser's filter plus an optional
/// `ownedOnly=true`, which is stripped before the filter is restored and
/// switches the source from all cards to the primary collection.
pub fn load_deck_page(client: &DmClient, id: Uuid, fragment: &QueryParams) -> Result<DeckPageData> {
    let deck = load_deck(client, id)?;

    let mut params = fragment.clone();
    let owned_only = params.get(OWNED_ONLY_KEY) == Some("true");
    params.delete(OWNED_ONLY_KEY);
    let filter = SearchFilter::from_query_params(&params);

    let card_page = if owned_only {
        degrade(
            client
                .collections()
                .primary_page(PageNumber::FIRST, &filter)
                .map(|c| c.card_page),
            "owned cards for deck browser",
        )?
    } else {
        degrade(
            client.cards().search(PageNumber::FIRST, &filter),
            "cards for deck browser",
        )?
    };
    Ok(DeckPageData {
        deck,
        filter,
        owned_only,
        card_page,
    })
}

pub fn load_decks(client: &DmClient) -> Result<Vec<CollectionInfo>> {
    Ok(degrade(client.collections().list_decks(), "decks")?.unwrap_or_default())
}
