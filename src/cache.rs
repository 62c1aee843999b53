//! Memoized reference data: sets, rarities and species.
//!
//! Each list is fetched on first access and kept for the lifetime of the
//! cache. A list is only refetched while its cached value is empty, so
//! server-side changes become visible after [`ReferenceCache::invalidate`]
//! or a fresh client.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::{sort_rarities, CardSet, Rarity};
use crate::transport::ApiClient;

const SETS_PATH: &str = "/api/sets";
const RARITIES_PATH: &str = "/api/rarities";
const SPECIES_PATH: &str = "/api/species";

#[derive(Debug, Default)]
pub struct ReferenceCache {
    sets: Vec<CardSet>,
    rarities: Vec<Rarity>,
    species: Vec<String>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// All card sets. `None` if the list is not cached and could not be fetched.
    pub fn sets(&mut self, api: &ApiClient) -> Option<Vec<CardSet>> {
        if self.sets.is_empty() {
            self.sets = fetch_list(api, SETS_PATH)?;
        }
        Some(self.sets.clone())
    }

    /// All rarities, highest `order` first.
    pub fn rarities(&mut self, api: &ApiClient) -> Option<Vec<Rarity>> {
        if self.rarities.is_empty() {
            let mut rarities: Vec<Rarity> = fetch_list(api, RARITIES_PATH)?;
            sort_rarities(&mut rarities);
            self.rarities = rarities;
        }
        Some(self.rarities.clone())
    }

    pub fn species(&mut self, api: &ApiClient) -> Option<Vec<String>> {
        if self.species.is_empty() {
            self.species = fetch_list(api, SPECIES_PATH)?;
        }
        Some(self.species.clone())
    }

    /// Look up a cached rarity by code without fetching.
    pub fn rarity(&self, code: &str) -> Option<&Rarity> {
        self.rarities.iter().find(|r| r.code == code)
    }

    /// Drop every cached list.
    pub fn invalidate(&mut self) {
        self.sets.clear();
        self.rarities.clear();
        self.species.clear();
    }
}

fn fetch_list<T: DeserializeOwned>(api: &ApiClient, path: &str) -> Option<Vec<T>> {
    match api.get_json::<Vec<T>>(path) {
        Ok(list) => Some(list),
        Err(e) => {
            warn!("Failed to fetch {}: {}", path, e);
            None
        }
    }
}
