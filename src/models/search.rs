use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FilterState — twinpact tri-state
// ---------------------------------------------------------------------------

/// How twin-faced cards are treated by a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterState {
    /// Twinpacts are neither required nor excluded.
    #[default]
    #[serde(rename = "IN")]
    Ignore,
    #[serde(rename = "EX")]
    Exclude,
    #[serde(rename = "ONLY")]
    Require,
}

impl FilterState {
    pub fn token(self) -> &'static str {
        match self {
            FilterState::Ignore => "IN",
            FilterState::Exclude => "EX",
            FilterState::Require => "ONLY",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "IN" => Some(FilterState::Ignore),
            "EX" => Some(FilterState::Exclude),
            "ONLY" => Some(FilterState::Require),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RarityRange
// ---------------------------------------------------------------------------

/// How the selected rarity is compared against card rarities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RarityRange {
    #[default]
    #[serde(rename = "EQ")]
    Equal,
    #[serde(rename = "LE")]
    LessOrEqual,
    #[serde(rename = "GE")]
    GreaterOrEqual,
}

impl RarityRange {
    pub fn token(self) -> &'static str {
        match self {
            RarityRange::Equal => "EQ",
            RarityRange::LessOrEqual => "LE",
            RarityRange::GreaterOrEqual => "GE",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "EQ" => Some(RarityRange::Equal),
            "LE" => Some(RarityRange::LessOrEqual),
            "GE" => Some(RarityRange::GreaterOrEqual),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortingCriterion {
    Release,
    CardId,
    Amount,
    Cost,
    Power,
    Rarity,
}

impl SortingCriterion {
    pub const ALL: [SortingCriterion; 6] = [
        SortingCriterion::Release,
        SortingCriterion::CardId,
        SortingCriterion::Amount,
        SortingCriterion::Cost,
        SortingCriterion::Power,
        SortingCriterion::Rarity,
    ];

    pub fn token(self) -> &'static str {
        match self {
            SortingCriterion::Release => "rel",
            SortingCriterion::CardId => "id",
            SortingCriterion::Amount => "amt",
            SortingCriterion::Cost => "cost",
            SortingCriterion::Power => "pwr",
            SortingCriterion::Rarity => "rar",
        }
    }

    /// Case-insensitive token lookup.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.token().eq_ignore_ascii_case(token))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn token(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }

    /// Case-insensitive token lookup.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Direction::Ascending)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Direction::Descending)
        } else {
            None
        }
    }
}

/// One link of a sort chain; chains are evaluated left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Order {
    pub property: SortingCriterion,
    pub direction: Direction,
}

impl Order {
    pub fn new(property: SortingCriterion, direction: Direction) -> Self {
        Self {
            property,
            direction,
        }
    }

    pub fn asc(property: SortingCriterion) -> Self {
        Self::new(property, Direction::Ascending)
    }

    pub fn desc(property: SortingCriterion) -> Self {
        Self::new(property, Direction::Descending)
    }

    /// Parse a single `property:direction` token. Tokens without exactly one
    /// `:` or with an unknown property or direction yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let mut parts = token.split(':');
        let property = parts.next()?.trim();
        let direction = parts.next()?.trim();
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(
            SortingCriterion::from_token(property)?,
            Direction::from_token(direction)?,
        ))
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.property.token(), self.direction.token())
    }
}

/// Parse a comma-separated sort chain, dropping every malformed token.
///
/// A blank input, or one where no token survives, yields `None`.
pub fn parse_sort(param: &str) -> Option<Vec<Order>> {
    let orders: Vec<Order> = param
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter_map(Order::parse)
        .collect();
    if orders.is_empty() {
        None
    } else {
        Some(orders)
    }
}

pub fn format_sort(orders: &[Order]) -> String {
    orders
        .iter()
        .map(Order::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
