use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Civilization
// ---------------------------------------------------------------------------

/// One of the six civilizations a card can carry.
///
/// The upper-case key (`"FIRE"`) is the wire token used both in query
/// parameters and in card-list payloads. The card-detail payload prints the
/// Japanese name instead, which is accepted on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Civilization {
    #[serde(rename = "ZERO", alias = "ゼロ")]
    Zero,
    #[serde(rename = "LIGHT", alias = "光")]
    Light,
    #[serde(rename = "WATER", alias = "水")]
    Water,
    #[serde(rename = "DARK", alias = "闇")]
    Dark,
    #[serde(rename = "FIRE", alias = "火")]
    Fire,
    #[serde(rename = "NATURE", alias = "自然")]
    Nature,
}

/// A set of civilizations, iterated in canonical order.
pub type CivSet = BTreeSet<Civilization>;

impl Civilization {
    pub const ALL: [Civilization; 6] = [
        Civilization::Zero,
        Civilization::Light,
        Civilization::Water,
        Civilization::Dark,
        Civilization::Fire,
        Civilization::Nature,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Civilization::Zero => "ZERO",
            Civilization::Light => "LIGHT",
            Civilization::Water => "WATER",
            Civilization::Dark => "DARK",
            Civilization::Fire => "FIRE",
            Civilization::Nature => "NATURE",
        }
    }

    /// Name as printed on the card.
    pub fn printed_name(self) -> &'static str {
        match self {
            Civilization::Zero => "ゼロ",
            Civilization::Light => "光",
            Civilization::Water => "水",
            Civilization::Dark => "闇",
            Civilization::Fire => "火",
            Civilization::Nature => "自然",
        }
    }

    /// Lowercase name used for styling hooks.
    pub fn color_class(self) -> &'static str {
        match self {
            Civilization::Zero => "zero",
            Civilization::Light => "light",
            Civilization::Water => "water",
            Civilization::Dark => "dark",
            Civilization::Fire => "fire",
            Civilization::Nature => "nature",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// The colorless civilization.
    pub fn is_zero(self) -> bool {
        self == Civilization::Zero
    }
}

impl fmt::Display for Civilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

pub fn all_civs() -> CivSet {
    Civilization::ALL.into_iter().collect()
}

/// Number of civilizations in `civs`, not counting [`Civilization::Zero`].
pub fn non_zero_count(civs: &CivSet) -> usize {
    civs.iter().filter(|c| !c.is_zero()).count()
}

// ---------------------------------------------------------------------------
// CardTypeFilter
// ---------------------------------------------------------------------------

/// Card type categories the search can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardTypeFilter {
    Creature,
    Spell,
    Evolution,
    Psychic,
    Dragheart,
    Field,
    Castle,
    Crossgear,
    Exile,
    Gachallenge,
    Aura,
    Tamaseed,
    Other,
}

impl CardTypeFilter {
    pub const ALL: [CardTypeFilter; 13] = [
        CardTypeFilter::Creature,
        CardTypeFilter::Spell,
        CardTypeFilter::Evolution,
        CardTypeFilter::Psychic,
        CardTypeFilter::Dragheart,
        CardTypeFilter::Field,
        CardTypeFilter::Castle,
        CardTypeFilter::Crossgear,
        CardTypeFilter::Exile,
        CardTypeFilter::Gachallenge,
        CardTypeFilter::Aura,
        CardTypeFilter::Tamaseed,
        CardTypeFilter::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CardTypeFilter::Creature => "CREATURE",
            CardTypeFilter::Spell => "SPELL",
            CardTypeFilter::Evolution => "EVOLUTION",
            CardTypeFilter::Psychic => "PSYCHIC",
            CardTypeFilter::Dragheart => "DRAGHEART",
            CardTypeFilter::Field => "FIELD",
            CardTypeFilter::Castle => "CASTLE",
            CardTypeFilter::Crossgear => "CROSSGEAR",
            CardTypeFilter::Exile => "EXILE",
            CardTypeFilter::Gachallenge => "GACHALLENGE",
            CardTypeFilter::Aura => "AURA",
            CardTypeFilter::Tamaseed => "TAMASEED",
            CardTypeFilter::Other => "OTHER",
        }
    }

    /// Type keyword as printed on the card.
    pub fn keyword(self) -> &'static str {
        match self {
            CardTypeFilter::Creature => "クリーチャー",
            CardTypeFilter::Spell => "呪文",
            CardTypeFilter::Evolution => "進化クリーチャー",
            CardTypeFilter::Psychic => "サイキック",
            CardTypeFilter::Dragheart => "ドラグハート",
            CardTypeFilter::Field => "フィールド",
            CardTypeFilter::Castle => "城",
            CardTypeFilter::Crossgear => "クロスギア",
            CardTypeFilter::Exile => "エグザイル",
            CardTypeFilter::Gachallenge => "GR",
            CardTypeFilter::Aura => "オーラ",
            CardTypeFilter::Tamaseed => "タマシード",
            CardTypeFilter::Other => "その他",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

// ---------------------------------------------------------------------------
// CardSet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSet {
    pub id: i64,
    pub id_text: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Card — full card with all printed faces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub dm_id: String,
    pub id_text: String,
    pub set: CardSet,
    #[serde(default)]
    pub civilizations: Vec<Civilization>,
    #[serde(default)]
    pub facets: Vec<CardFacet>,
    pub rarity: Option<String>,
    /// Owned amount, absent outside of a collection context.
    #[serde(default)]
    pub amount: Option<u32>,
}

impl Card {
    /// Facets ordered by their printed position. Facets without a position
    /// keep their relative order after the positioned ones.
    pub fn sorted_facets(&self) -> Vec<&CardFacet> {
        let mut facets: Vec<&CardFacet> = self.facets.iter().collect();
        facets.sort_by_key(|f| f.position.unwrap_or(i32::MAX));
        facets
    }

    /// A card with two combined faces.
    pub fn is_twinpact(&self) -> bool {
        self.facets.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFacet {
    pub position: Option<i32>,
    pub name: String,
    pub cost: Option<String>,
    #[serde(default)]
    pub civilizations: Vec<Civilization>,
    pub image_path: Option<String>,
    pub flavor: Option<String>,
    #[serde(rename = "type")]
    pub type_field: Option<String>,
    pub species: Option<Vec<String>>,
    pub effects: Option<Vec<CardEffect>>,
    pub power: Option<String>,
    pub mana: Option<String>,
    pub illustrator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEffect {
    pub text: String,
    pub position: i32,
    pub children: Option<Vec<ChildEffect>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildEffect {
    pub text: String,
    pub position: i32,
}

// ---------------------------------------------------------------------------
// CardStub — list projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStub {
    pub id: i64,
    pub dm_id: String,
    pub id_text: String,
    #[serde(default)]
    pub civilizations: Vec<Civilization>,
    #[serde(default)]
    pub image_paths: Vec<String>,
    #[serde(default)]
    pub amount: u32,
}
