//! Shared test fixtures for the client integration tests.
//!
//! Provides [`MockTransport`], a scripted [`Transport`] that answers queued
//! responses per `(method, path)` and records every request it sees, plus
//! JSON builders for the backend payloads.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use dmcollection_client::{
    ApiClient, ApiRequest, ApiResponse, DmClient, DmError, Result, Transport,
};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};

pub const DECK_ID: &str = "01890a5d-ac96-774b-bcce-b302099a8057";
pub const OWNER_ID: &str = "01890a5d-ac96-774b-bcce-b302099a0001";

enum Scripted {
    Respond(ApiResponse),
    Fail(String),
}

#[derive(Default)]
struct Inner {
    script: HashMap<(Method, String), VecDeque<Scripted>>,
    requests: Vec<ApiRequest>,
    cookies: HashMap<String, String>,
}

/// Scripted transport. Clones share the same script and request log, so a
/// test can keep one handle after moving another into the client.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next `method path` request.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<String>) -> &Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.push(method, path, Scripted::Respond(ApiResponse::new(status, body)));
        self
    }

    pub fn respond_json(&self, method: Method, path: &str, body: &Value) -> &Self {
        self.respond(method, path, 200, body.to_string())
    }

    /// Queue a transport failure for the next `method path` request.
    pub fn fail(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Scripted::Fail("connection refused".into()));
        self
    }

    pub fn set_cookie(&self, name: &str, value: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.cookies.insert(name.to_string(), value.to_string());
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .script
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(request.clone());
        let next = inner
            .script
            .get_mut(&(request.method.clone(), request.path.clone()))
            .and_then(|queue| queue.pop_front());
        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(msg)) => Err(DmError::InvalidArgument(msg)),
            None => Err(DmError::InvalidArgument(format!(
                "unscripted request {} {}",
                request.method, request.path
            ))),
        }
    }

    fn cookie(&self, name: &str) -> Option<String> {
        self.inner.lock().unwrap().cookies.get(name).cloned()
    }
}

/// A client wired to a fresh mock, plus a handle to that mock.
pub fn mock_client() -> (DmClient, MockTransport) {
    let mock = MockTransport::new();
    let client = DmClient::builder().transport(mock.clone()).build().unwrap();
    (client, mock)
}

pub fn mock_api() -> (ApiClient, MockTransport) {
    let mock = MockTransport::new();
    (ApiClient::new(Box::new(mock.clone())), mock)
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

pub fn card_stub_json(id: i64, amount: u32) -> Value {
    json!({
        "id": id,
        "dmId": format!("dm01-{:03}", id),
        "idText": format!("{}/110", id),
        "civilizations": ["FIRE"],
        "imagePaths": [format!("/img/{}.jpg", id)],
        "amount": amount
    })
}

pub fn page_json(content: Vec<Value>, number: u32, total_elements: u64) -> Value {
    json!({
        "content": content,
        "page": {
            "size": 20,
            "number": number,
            "totalElements": total_elements,
            "totalPages": (total_elements + 19) / 20
        }
    })
}

pub fn info_json(unique: u64, total: u64) -> Value {
    json!({
        "id": DECK_ID,
        "name": "Fire Rush",
        "uniqueCardCount": unique,
        "totalCardCount": total,
        "lastModified": "2025-03-14T09:26:53",
        "ownerId": OWNER_ID
    })
}

/// Collection data with `(card id, amount)` entries on the first page.
pub fn collection_json(cards: &[(i64, u32)]) -> Value {
    let unique = cards.len() as u64;
    let total = cards.iter().map(|(_, a)| *a as u64).sum();
    json!({
        "info": info_json(unique, total),
        "cardPage": page_json(
            cards.iter().map(|(id, amount)| card_stub_json(*id, *amount)).collect(),
            0,
            unique,
        )
    })
}

pub fn card_json(id: i64) -> Value {
    json!({
        "id": id,
        "dmId": format!("dm01-{:03}", id),
        "idText": format!("{}/110", id),
        "rarity": "VR",
        "set": { "id": 1, "idText": "DM-01", "name": "Base Set" },
        "civilizations": ["火", "自然"],
        "facets": [
            {
                "position": 1,
                "name": "Bolshack Dragon",
                "cost": "6",
                "civilizations": ["火"],
                "imagePath": "/img/back.jpg",
                "type": "クリーチャー",
                "species": ["アーマード・ドラゴン"],
                "power": "6000+",
                "effects": [
                    { "text": "Double breaker", "position": 0, "children": null }
                ]
            },
            {
                "position": 0,
                "name": "Bolshack Spell",
                "cost": "3",
                "civilizations": ["自然"],
                "type": "呪文",
                "power": null
            }
        ]
    })
}
