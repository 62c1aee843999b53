use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rarity {
    pub code: String,
    /// Rank of the rarity; higher sorts first.
    pub order: i32,
    pub name: String,
}

/// Sort rarities by descending `order`.
pub fn sort_rarities(rarities: &mut [Rarity]) {
    rarities.sort_by(|a, b| b.order.cmp(&a.order));
}
