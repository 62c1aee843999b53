//! Deck loading and optimistic amount updates.

mod common;

use common::{collection_json, info_json, mock_api, DECK_ID};
use dmcollection_client::{AmountUpdate, Deck, DmError};
use reqwest::Method;
use uuid::Uuid;

fn deck_id() -> Uuid {
    Uuid::parse_str(DECK_ID).unwrap()
}

fn deck_path() -> String {
    format!("/api/deck/{}", DECK_ID)
}

fn card_path(card_id: i64) -> String {
    format!("/api/deck/{}/cards/{}", DECK_ID, card_id)
}

// ---------------------------------------------------------------------------
// load
// ---------------------------------------------------------------------------

#[test]
fn load_replaces_collection() {
    let (api, mock) = mock_api();
    mock.respond_json(Method::GET, &deck_path(), &collection_json(&[(42, 3), (7, 1)]));

    let mut deck = Deck::new(deck_id());
    assert!(!deck.is_loaded());
    assert!(deck.load(&api).unwrap());
    assert!(deck.is_loaded());
    assert_eq!(deck.cards().len(), 2);
    assert_eq!(deck.amount(42), 3);
    assert_eq!(deck.amount(1000), 0);
    assert_eq!(deck.info().unwrap().name, "Fire Rush");
    assert_eq!(deck.info().unwrap().total_card_count, 4);
}

#[test]
fn load_unauthorized_is_distinct_error() {
    for status in [401, 403] {
        let (api, mock) = mock_api();
        mock.respond(Method::GET, &deck_path(), status, "");
        let mut deck = Deck::new(deck_id());
        let err = deck.load(&api).unwrap_err();
        assert!(matches!(err, DmError::Unauthorized(_)), "status {}", status);
    }
}

#[test]
fn load_failure_keeps_stale_data() {
    let (api, mock) = mock_api();
    mock.respond_json(Method::GET, &deck_path(), &collection_json(&[(42, 3)]));
    mock.respond(Method::GET, &deck_path(), 500, "boom");
    mock.fail(Method::GET, &deck_path());
    mock.respond(Method::GET, &deck_path(), 200, "not json");

    let mut deck = Deck::new(deck_id());
    assert!(deck.load(&api).unwrap());
    assert!(!deck.load(&api).unwrap());
    assert!(!deck.load(&api).unwrap());
    assert!(!deck.load(&api).unwrap());
    assert_eq!(deck.amount(42), 3);
}

// ---------------------------------------------------------------------------
// set_card_amount
// ---------------------------------------------------------------------------

fn loaded_deck(mock: &common::MockTransport, api: &dmcollection_client::ApiClient) -> Deck {
    mock.respond_json(Method::GET, &deck_path(), &collection_json(&[(42, 3), (7, 1)]));
    let mut deck = Deck::new(deck_id());
    deck.load(api).unwrap();
    deck
}

#[test]
fn set_amount_without_collection_is_noop() {
    let (api, mock) = mock_api();
    let mut deck = Deck::new(deck_id());
    assert_eq!(deck.set_card_amount(&api, 42, 2).unwrap(), AmountUpdate::NotLoaded);
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn set_amount_zero_removes_card_and_adopts_summary() {
    let (api, mock) = mock_api();
    let mut deck = loaded_deck(&mock, &api);
    mock.respond_json(Method::PUT, &card_path(42), &info_json(1, 1));

    assert_eq!(deck.set_card_amount(&api, 42, 0).unwrap(), AmountUpdate::Removed);
    assert!(deck.cards().iter().all(|c| c.id != 42));
    assert_eq!(deck.cards().len(), 1);
    assert_eq!(deck.info().unwrap().unique_card_count, 1);
    assert_eq!(deck.info().unwrap().total_card_count, 1);
}

#[test]
fn set_amount_updates_in_place() {
    let (api, mock) = mock_api();
    let mut deck = loaded_deck(&mock, &api);
    mock.respond_json(Method::PUT, &card_path(42), &info_json(2, 6));

    assert_eq!(deck.set_card_amount(&api, 42, 5).unwrap(), AmountUpdate::Updated);
    assert_eq!(deck.amount(42), 5);
    assert_eq!(deck.amount(7), 1);
    assert_eq!(deck.cards()[0].id, 42);
    assert_eq!(deck.info().unwrap().total_card_count, 6);
}

#[test]
fn set_amount_sends_body_and_xsrf_header() {
    let (api, mock) = mock_api();
    mock.set_cookie("XSRF-TOKEN", "tok-9");
    let mut deck = loaded_deck(&mock, &api);
    mock.respond_json(Method::PUT, &card_path(7), &info_json(2, 6));

    deck.set_card_amount(&api, 7, 2).unwrap();
    let request = mock.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.body, Some(serde_json::json!({ "amount": 2 })));
    assert_eq!(request.header("X-XSRF-TOKEN"), Some("tok-9"));
}

#[test]
fn missing_xsrf_cookie_sends_empty_token() {
    let (api, mock) = mock_api();
    let mut deck = loaded_deck(&mock, &api);
    mock.respond_json(Method::PUT, &card_path(7), &info_json(2, 6));

    deck.set_card_amount(&api, 7, 2).unwrap();
    assert_eq!(mock.last_request().header("X-XSRF-TOKEN"), Some(""));
}

#[test]
fn set_amount_for_card_off_page_reloads() {
    let (api, mock) = mock_api();
    let mut deck = loaded_deck(&mock, &api);
    mock.respond_json(Method::PUT, &card_path(99), &info_json(3, 5));
    mock.respond_json(
        Method::GET,
        &deck_path(),
        &collection_json(&[(42, 3), (7, 1), (99, 1)]),
    );

    assert_eq!(deck.set_card_amount(&api, 99, 1).unwrap(), AmountUpdate::Reloaded);
    assert_eq!(deck.amount(99), 1);
    assert_eq!(deck.cards().len(), 3);

    let requests = mock.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[2].method, Method::GET);
    assert_eq!(requests[2].path, deck_path());
}

#[test]
fn set_amount_unauthorized_is_distinct_error() {
    let (api, mock) = mock_api();
    let mut deck = loaded_deck(&mock, &api);
    mock.respond(Method::PUT, &card_path(42), 403, "");

    let err = deck.set_card_amount(&api, 42, 0).unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(deck.amount(42), 3);
}

#[test]
fn set_amount_failure_leaves_state_untouched() {
    let (api, mock) = mock_api();
    let mut deck = loaded_deck(&mock, &api);
    let before = deck.collection().cloned();
    mock.respond(Method::PUT, &card_path(42), 400, "amount must be >= 0");
    mock.fail(Method::PUT, &card_path(42));

    assert_eq!(deck.set_card_amount(&api, 42, 0).unwrap(), AmountUpdate::Rejected);
    assert_eq!(deck.set_card_amount(&api, 42, 0).unwrap(), AmountUpdate::Rejected);
    assert_eq!(deck.collection().cloned(), before);
}

#[test]
fn failed_reload_after_update_is_reported() {
    let (api, mock) = mock_api();
    let mut deck = loaded_deck(&mock, &api);
    mock.respond_json(Method::PUT, &card_path(99), &info_json(2, 4));
    mock.respond(Method::GET, &deck_path(), 500, "");

    assert_eq!(
        deck.set_card_amount(&api, 99, 1).unwrap(),
        AmountUpdate::ReloadFailed
    );
    assert_eq!(deck.amount(99), 0);
    assert_eq!(deck.info().unwrap().total_card_count, 4);
}

#[test]
fn reload_unauthorized_after_update_is_distinct_error() {
    let (api, mock) = mock_api();
    let mut deck = loaded_deck(&mock, &api);
    mock.respond_json(Method::PUT, &card_path(99), &info_json(2, 4));
    mock.respond(Method::GET, &deck_path(), 401, "");

    assert!(deck.set_card_amount(&api, 99, 1).unwrap_err().is_unauthorized());
}
