//! Deserialization of backend payloads.

mod common;

use common::{card_json, card_stub_json, collection_json};
use dmcollection_client::{
    Card, CardStub, CardTypeFilter, Civilization, CollectionData, Direction, Order, PageNumber,
    SortingCriterion,
};
use serde_json::json;

#[test]
fn card_accepts_printed_civilization_names() {
    let card: Card = serde_json::from_value(card_json(12)).unwrap();
    assert_eq!(card.civilizations, vec![Civilization::Fire, Civilization::Nature]);
    assert_eq!(card.set.name, "Base Set");
    assert_eq!(card.rarity.as_deref(), Some("VR"));
    assert_eq!(card.amount, None);
    assert!(card.is_twinpact());

    let facet = &card.facets[0];
    assert_eq!(facet.type_field.as_deref(), Some("クリーチャー"));
    assert_eq!(facet.effects.as_ref().unwrap()[0].text, "Double breaker");
}

#[test]
fn facets_sort_by_position() {
    let card: Card = serde_json::from_value(card_json(12)).unwrap();
    let names: Vec<&str> = card.sorted_facets().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Bolshack Spell", "Bolshack Dragon"]);
}

#[test]
fn card_stub_amount_defaults_to_zero() {
    let mut value = card_stub_json(3, 2);
    value.as_object_mut().unwrap().remove("amount");
    let stub: CardStub = serde_json::from_value(value).unwrap();
    assert_eq!(stub.amount, 0);
    assert_eq!(stub.civilizations, vec![Civilization::Fire]);
}

#[test]
fn collection_data_parses_timestamps_and_ids() {
    let data: CollectionData = serde_json::from_value(collection_json(&[(1, 2), (2, 1)])).unwrap();
    assert_eq!(data.info.unique_card_count, 2);
    assert_eq!(data.info.total_card_count, 3);
    assert_eq!(data.info.last_modified.to_string(), "2025-03-14 09:26:53");
    assert_eq!(data.info.id.to_string(), common::DECK_ID);
    assert!(!data.card_page.page.has_next());
}

#[test]
fn unknown_civilization_is_rejected() {
    let result = serde_json::from_value::<Civilization>(json!("PURPLE"));
    assert!(result.is_err());
}

#[test]
fn civilization_keys_round_trip() {
    for civ in Civilization::ALL {
        assert_eq!(Civilization::from_key(civ.key()), Some(civ));
        assert_eq!(serde_json::to_value(civ).unwrap(), json!(civ.key()));
    }
    assert_eq!(Civilization::from_key("fire"), None);
}

#[test]
fn card_type_keys() {
    assert_eq!(CardTypeFilter::from_key("CREATURE"), Some(CardTypeFilter::Creature));
    assert_eq!(CardTypeFilter::from_key("creature"), None);
}

#[test]
fn order_display_and_parse() {
    let order = Order::parse("PWR:DESC").unwrap();
    assert_eq!(order, Order::new(SortingCriterion::Power, Direction::Descending));
    assert_eq!(order.to_string(), "pwr:desc");
    assert!(Order::parse("pwr").is_none());
    assert!(Order::parse("pwr:asc:x").is_none());
    assert!(Order::parse("speed:asc").is_none());
}

#[test]
fn page_number_route_segments() {
    assert_eq!(PageNumber::default(), PageNumber::FIRST);
    assert_eq!(PageNumber::parse(" 2 ").unwrap().get(), 2);
    assert!(PageNumber::new(0).is_err());
    assert_eq!(PageNumber::FIRST.to_string(), "1");
}
