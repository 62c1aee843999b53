//! Card search filter and its URL query-parameter form.
//!
//! [`SearchFilter`] holds every search criterion as a typed field. The query
//! form is derived on demand with [`SearchFilter::to_query_params`] and parsed
//! back with [`SearchFilter::from_query_params`]; nothing else is stored, so
//! the two can never drift apart.
//!
//! Every setter keeps these invariants:
//!
//! - included and excluded civilizations are disjoint
//! - at least one of `include_mono` / `include_rainbow` is true
//! - `rainbows_match_all` is only set while rainbow cards are included and
//!   more than one non-zero civilization is included
//! - numeric bounds lie in `[MIN_FILTER_INT, MAX_FILTER_INT]`
//!
//! Setters that would break an invariant are ignored rather than failing.
//!
//! # Example
//!
//! ```rust
//! use dmcollection_client::{Civilization, SearchFilter};
//!
//! let mut filter = SearchFilter::new();
//! filter.set_included_civs([Civilization::Fire, Civilization::Water]);
//! filter.set_min_cost(Some(3));
//! assert_eq!(
//!     filter.to_query_string(),
//!     "minCost=3&includeCivs=WATER&includeCivs=FIRE"
//! );
//!
//! let restored = SearchFilter::from_query_string(&filter.to_query_string());
//! assert_eq!(restored, filter);
//! ```

use crate::config::{MAX_FILTER_INT, MIN_FILTER_INT};
use crate::models::{
    all_civs, format_sort, non_zero_count, parse_sort, CardTypeFilter, CivSet, Civilization,
    FilterState, Order, RarityRange,
};
use crate::query_params::QueryParams;

/// Query parameter names.
pub mod keys {
    pub const SET_ID: &str = "setId";
    pub const TWINPACT: &str = "twinpact";
    pub const CARD_TYPE: &str = "cardType";
    pub const MIN_COST: &str = "minCost";
    pub const MAX_COST: &str = "maxCost";
    pub const MIN_POWER: &str = "minPower";
    pub const MAX_POWER: &str = "maxPower";
    pub const INCLUDE_CIVS: &str = "includeCivs";
    pub const EXCLUDE_CIVS: &str = "excludeCivs";
    pub const INCLUDE_MONO: &str = "includeMono";
    pub const INCLUDE_RAINBOW: &str = "includeRainbow";
    pub const MATCH_NUMBER_OF_CIVS: &str = "matchNumberOfCivs";
    pub const SPECIES: &str = "species";
    pub const RARITY: &str = "rarity";
    pub const RARITY_RANGE: &str = "rRange";
    pub const NAME: &str = "name";
    pub const SORT: &str = "sort";
}

// ---------------------------------------------------------------------------
// SearchFilter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    set_id: Option<i64>,
    min_cost: Option<i32>,
    max_cost: Option<i32>,
    min_power: Option<i32>,
    max_power: Option<i32>,
    included_civs: CivSet,
    excluded_civs: CivSet,
    include_mono: bool,
    include_rainbow: bool,
    rainbows_match_all: bool,
    twinpact: FilterState,
    card_type: Option<CardTypeFilter>,
    species: Option<String>,
    rarity: Option<String>,
    rarity_range: RarityRange,
    name_search: Option<String>,
    order: Option<Vec<Order>>,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            set_id: None,
            min_cost: None,
            max_cost: None,
            min_power: None,
            max_power: None,
            included_civs: all_civs(),
            excluded_civs: CivSet::new(),
            include_mono: true,
            include_rainbow: true,
            rainbows_match_all: false,
            twinpact: FilterState::Ignore,
            card_type: None,
            species: None,
            rarity: None,
            rarity_range: RarityRange::Equal,
            name_search: None,
            order: None,
        }
    }
}

fn clamp(value: Option<i64>) -> Option<i32> {
    value.map(|v| v.clamp(MIN_FILTER_INT as i64, MAX_FILTER_INT as i64) as i32)
}

/// Every non-zero civilization outside `included`.
fn rainbow_complement(included: &CivSet) -> CivSet {
    Civilization::ALL
        .into_iter()
        .filter(|c| !c.is_zero() && !included.contains(c))
        .collect()
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff every field holds its default, which is the case exactly when
    /// the serialized query is empty.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Reset every criterion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // -- Getters -----------------------------------------------------------

    pub fn set_id(&self) -> Option<i64> {
        self.set_id
    }

    pub fn min_cost(&self) -> Option<i32> {
        self.min_cost
    }

    pub fn max_cost(&self) -> Option<i32> {
        self.max_cost
    }

    pub fn min_power(&self) -> Option<i32> {
        self.min_power
    }

    pub fn max_power(&self) -> Option<i32> {
        self.max_power
    }

    pub fn included_civs(&self) -> &CivSet {
        &self.included_civs
    }

    pub fn excluded_civs(&self) -> &CivSet {
        &self.excluded_civs
    }

    pub fn include_mono(&self) -> bool {
        self.include_mono
    }

    pub fn include_rainbow(&self) -> bool {
        self.include_rainbow
    }

    pub fn rainbows_match_all(&self) -> bool {
        self.rainbows_match_all
    }

    pub fn twinpact(&self) -> FilterState {
        self.twinpact
    }

    pub fn card_type(&self) -> Option<CardTypeFilter> {
        self.card_type
    }

    pub fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }

    pub fn rarity(&self) -> Option<&str> {
        self.rarity.as_deref()
    }

    pub fn rarity_range(&self) -> RarityRange {
        self.rarity_range
    }

    pub fn name_search(&self) -> Option<&str> {
        self.name_search.as_deref()
    }

    pub fn order(&self) -> Option<&[Order]> {
        self.order.as_deref()
    }

    // -- Scalar setters ----------------------------------------------------

    pub fn set_set_id(&mut self, set_id: Option<i64>) {
        self.set_id = set_id;
    }

    pub fn set_min_cost(&mut self, min_cost: Option<i64>) {
        self.min_cost = clamp(min_cost);
    }

    pub fn set_max_cost(&mut self, max_cost: Option<i64>) {
        self.max_cost = clamp(max_cost);
    }

    pub fn set_min_power(&mut self, min_power: Option<i64>) {
        self.min_power = clamp(min_power);
    }

    pub fn set_max_power(&mut self, max_power: Option<i64>) {
        self.max_power = clamp(max_power);
    }

    pub fn set_twinpact(&mut self, twinpact: FilterState) {
        self.twinpact = twinpact;
    }

    pub fn set_card_type(&mut self, card_type: Option<CardTypeFilter>) {
        self.card_type = card_type;
    }

    pub fn set_species(&mut self, species: Option<String>) {
        self.species = species;
    }

    pub fn set_rarity(&mut self, rarity: Option<String>) {
        self.rarity = rarity;
    }

    pub fn set_rarity_range(&mut self, rarity_range: RarityRange) {
        self.rarity_range = rarity_range;
    }

    pub fn set_name_search(&mut self, name_search: Option<String>) {
        self.name_search = name_search;
    }

    /// Set the sort chain. An empty chain means the server default order.
    pub fn set_order(&mut self, order: Option<Vec<Order>>) {
        self.order = order.filter(|o| !o.is_empty());
    }

    // -- Civilization setters ----------------------------------------------

    /// Replace the included civilizations. An empty set is ignored.
    pub fn set_included_civs<I>(&mut self, civs: I)
    where
        I: IntoIterator<Item = Civilization>,
    {
        let included: CivSet = civs.into_iter().collect();
        if included.is_empty() {
            return;
        }
        if non_zero_count(&included) <= 1 {
            self.rainbows_match_all = false;
        }
        if self.rainbows_match_all {
            self.excluded_civs = rainbow_complement(&included);
        } else {
            self.excluded_civs.retain(|c| !included.contains(c));
        }
        self.included_civs = included;
    }

    /// Replace the excluded civilizations, removing them from the included
    /// set. Ignored when it would leave no included civilization, including
    /// whenever exactly one civilization is included.
    pub fn set_excluded_civs<I>(&mut self, civs: I)
    where
        I: IntoIterator<Item = Civilization>,
    {
        if self.included_civs.len() == 1 {
            return;
        }
        let excluded: CivSet = civs.into_iter().collect();
        let remaining: CivSet = self
            .included_civs
            .iter()
            .copied()
            .filter(|c| !excluded.contains(c))
            .collect();
        if remaining.is_empty() {
            return;
        }
        self.included_civs = remaining;
        if non_zero_count(&self.included_civs) <= 1 {
            self.rainbows_match_all = false;
        }
        self.excluded_civs = if !self.include_rainbow {
            CivSet::new()
        } else if self.rainbows_match_all {
            rainbow_complement(&self.included_civs)
        } else {
            excluded
        };
    }

    /// Ignored when it would exclude both mono and rainbow cards.
    pub fn set_include_mono(&mut self, include_mono: bool) {
        if !include_mono && !self.include_rainbow {
            return;
        }
        self.include_mono = include_mono;
    }

    /// Ignored when it would exclude both mono and rainbow cards. Turning
    /// rainbow cards off drops the exclusions and match-all, which only apply
    /// to rainbow cards.
    pub fn set_include_rainbow(&mut self, include_rainbow: bool) {
        if !self.include_mono && !include_rainbow {
            return;
        }
        self.include_rainbow = include_rainbow;
        if !include_rainbow {
            self.excluded_civs.clear();
            self.rainbows_match_all = false;
        }
    }

    /// Require rainbow cards to carry exactly the included civilizations.
    ///
    /// Enabling is ignored unless rainbow cards are included and at least two
    /// non-zero civilizations are included.
    pub fn set_rainbows_match_all(&mut self, match_all: bool) {
        if match_all {
            if !self.include_rainbow || non_zero_count(&self.included_civs) <= 1 {
                return;
            }
            self.excluded_civs = rainbow_complement(&self.included_civs);
        } else {
            self.excluded_civs.clear();
        }
        self.rainbows_match_all = match_all;
    }

    // -- Serialization -----------------------------------------------------

    /// Canonical query form. Only fields that differ from their default
    /// contribute a parameter.
    pub fn to_query_params(&self) -> QueryParams {
        let mut params = QueryParams::new();

        if let Some(set_id) = self.set_id {
            params.append(keys::SET_ID, set_id.to_string());
        }
        if self.twinpact != FilterState::Ignore {
            params.append(keys::TWINPACT, self.twinpact.token());
        }
        if let Some(card_type) = self.card_type {
            params.append(keys::CARD_TYPE, card_type.key());
        }
        for (key, value) in [
            (keys::MIN_COST, self.min_cost),
            (keys::MAX_COST, self.max_cost),
            (keys::MIN_POWER, self.min_power),
            (keys::MAX_POWER, self.max_power),
        ] {
            if let Some(value) = value {
                params.append(key, value.to_string());
            }
        }

        if self.included_civs.len() != Civilization::ALL.len() {
            for civ in &self.included_civs {
                params.append(keys::INCLUDE_CIVS, civ.key());
            }
        }
        if self.include_mono != self.include_rainbow {
            params.append(keys::INCLUDE_MONO, self.include_mono.to_string());
            params.append(keys::INCLUDE_RAINBOW, self.include_rainbow.to_string());
        }
        if self.include_rainbow {
            for civ in &self.excluded_civs {
                params.append(keys::EXCLUDE_CIVS, civ.key());
            }
            if self.rainbows_match_all {
                params.append(keys::MATCH_NUMBER_OF_CIVS, "true");
            }
        }

        if let Some(species) = &self.species {
            params.append(keys::SPECIES, species.as_str());
        }
        if let Some(rarity) = &self.rarity {
            params.append(keys::RARITY, rarity.as_str());
        }
        if self.rarity_range != RarityRange::Equal {
            params.append(keys::RARITY_RANGE, self.rarity_range.token());
        }
        if let Some(name) = &self.name_search {
            params.append(keys::NAME, name.as_str());
        }
        if let Some(order) = &self.order {
            params.append(keys::SORT, format_sort(order));
        }

        params
    }

    pub fn to_query_string(&self) -> String {
        self.to_query_params().encode()
    }

    /// Rebuild a filter from query parameters.
    ///
    /// Malformed values fall back to their defaults field by field; the
    /// result always satisfies the filter invariants.
    pub fn from_query_params(params: &QueryParams) -> Self {
        let parse_int = |key: &str| params.get(key).and_then(|v| v.trim().parse::<i64>().ok());
        let parse_civs = |key: &str| -> CivSet {
            params
                .get_all(key)
                .into_iter()
                .filter_map(Civilization::from_key)
                .collect()
        };

        let mut filter = Self {
            set_id: parse_int(keys::SET_ID),
            min_cost: clamp(parse_int(keys::MIN_COST)),
            max_cost: clamp(parse_int(keys::MAX_COST)),
            min_power: clamp(parse_int(keys::MIN_POWER)),
            max_power: clamp(parse_int(keys::MAX_POWER)),
            included_civs: parse_civs(keys::INCLUDE_CIVS),
            excluded_civs: parse_civs(keys::EXCLUDE_CIVS),
            include_mono: params.get(keys::INCLUDE_MONO) != Some("false"),
            include_rainbow: params.get(keys::INCLUDE_RAINBOW) != Some("false"),
            rainbows_match_all: params.get(keys::MATCH_NUMBER_OF_CIVS) == Some("true"),
            twinpact: params
                .get(keys::TWINPACT)
                .and_then(FilterState::from_token)
                .unwrap_or_default(),
            card_type: params
                .get(keys::CARD_TYPE)
                .and_then(CardTypeFilter::from_key),
            species: params.get(keys::SPECIES).map(str::to_string),
            rarity: params.get(keys::RARITY).map(str::to_string),
            rarity_range: params
                .get(keys::RARITY_RANGE)
                .and_then(RarityRange::from_token)
                .unwrap_or_default(),
            name_search: params.get(keys::NAME).map(str::to_string),
            order: params.get(keys::SORT).and_then(parse_sort),
        };
        filter.normalize();
        filter
    }

    pub fn from_query_string(query: &str) -> Self {
        Self::from_query_params(&QueryParams::parse(query))
    }

    /// Replace every field from `params`. Not a merge.
    pub fn restore(&mut self, params: &QueryParams) {
        *self = Self::from_query_params(params);
    }

    /// Bring raw, possibly inconsistent parameter values in line with the
    /// setter invariants.
    fn normalize(&mut self) {
        if self.included_civs.is_empty() {
            self.included_civs = all_civs();
        }
        if !self.include_mono && !self.include_rainbow {
            self.include_mono = true;
            self.include_rainbow = true;
        }
        if !self.include_rainbow {
            self.excluded_civs.clear();
            self.rainbows_match_all = false;
        }
        if non_zero_count(&self.included_civs) <= 1 {
            self.rainbows_match_all = false;
        }
        if self.rainbows_match_all {
            self.excluded_civs = rainbow_complement(&self.included_civs);
        } else {
            let included = &self.included_civs;
            self.excluded_civs.retain(|c| !included.contains(c));
        }
        if self.rarity.is_none() {
            self.rarity_range = RarityRange::Equal;
        }
    }
}
