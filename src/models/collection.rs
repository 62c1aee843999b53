use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::card::CardStub;
use super::page::PagedResult;

// ---------------------------------------------------------------------------
// CollectionInfo — summary of a deck or the primary collection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    /// Time-sortable (v7) identifier.
    pub id: Uuid,
    pub name: String,
    pub unique_card_count: u64,
    pub total_card_count: u64,
    pub last_modified: NaiveDateTime,
    pub owner_id: Uuid,
}

// ---------------------------------------------------------------------------
// CollectionData — summary plus one page of owned cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionData {
    pub info: CollectionInfo,
    pub card_page: PagedResult<CardStub>,
}

/// Owned amount of a single card in the primary collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCardStub {
    pub card_id: i64,
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct AmountRequest {
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StubAmountRequest {
    pub card_id: i64,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct NameRequest<'a> {
    pub name: &'a str,
}
