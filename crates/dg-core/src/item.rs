//! Item catalog and the rarity/condition/quantity probability tables.
//!
//! Pure data plus weighted-table lookups; the placement engine treats item
//! lists as opaque payload.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::GenRng;

/// How hard an item is to come by
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemRarity {
    Abundant,
    Common,
    #[default]
    Average,
    Uncommon,
    Rare,
    Exotic,
    Legendary,
}

impl ItemRarity {
    pub const PROBABILITY: &'static [(u8, ItemRarity)] = &[
        (25, ItemRarity::Abundant),
        (45, ItemRarity::Common),
        (65, ItemRarity::Average),
        (80, ItemRarity::Uncommon),
        (93, ItemRarity::Rare),
        (99, ItemRarity::Exotic),
        (100, ItemRarity::Legendary),
    ];
}

/// Physical state of an item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemCondition {
    Decaying,
    Busted,
    Poor,
    #[default]
    Average,
    Good,
    Exceptional,
}

impl ItemCondition {
    pub const PROBABILITY: &'static [(u8, ItemCondition)] = &[
        (5, ItemCondition::Decaying),
        (10, ItemCondition::Busted),
        (25, ItemCondition::Poor),
        (75, ItemCondition::Average),
        (95, ItemCondition::Good),
        (100, ItemCondition::Exceptional),
    ];
}

/// How many items a room holds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ItemQuantity {
    Zero,
    One,
    Couple,
    #[default]
    Few,
    Some,
    Several,
    Many,
    Numerous,
}

impl ItemQuantity {
    pub const PROBABILITY: &'static [(u8, ItemQuantity)] = &[
        (2, ItemQuantity::Zero),
        (10, ItemQuantity::One),
        (20, ItemQuantity::Couple),
        (45, ItemQuantity::Few),
        (70, ItemQuantity::Some),
        (85, ItemQuantity::Several),
        (95, ItemQuantity::Many),
        (100, ItemQuantity::Numerous),
    ];

    /// Inclusive item-count range for this quantity class
    pub const fn count_range(self) -> (usize, usize) {
        match self {
            ItemQuantity::Zero => (0, 0),
            ItemQuantity::One => (1, 1),
            ItemQuantity::Couple => (2, 2),
            ItemQuantity::Few => (3, 5),
            ItemQuantity::Some => (6, 9),
            ItemQuantity::Several => (10, 19),
            ItemQuantity::Many => (20, 39),
            ItemQuantity::Numerous => (40, 99),
        }
    }
}

/// A single generated item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub rarity: ItemRarity,
    pub condition: ItemCondition,
}

/// Catalog of item names by rarity. Every rarity class has at least one
/// entry so a rolled rarity always resolves to an item.
pub const CATALOG: &[(&str, ItemRarity)] = &[
    ("torch", ItemRarity::Abundant),
    ("tallow candle", ItemRarity::Abundant),
    ("iron ration", ItemRarity::Abundant),
    ("waterskin", ItemRarity::Abundant),
    ("hemp rope", ItemRarity::Abundant),
    ("burlap sack", ItemRarity::Abundant),
    ("flask of oil", ItemRarity::Common),
    ("bedroll", ItemRarity::Common),
    ("hooded lantern", ItemRarity::Common),
    ("shovel", ItemRarity::Common),
    ("iron pot", ItemRarity::Common),
    ("steel mirror", ItemRarity::Common),
    ("dagger", ItemRarity::Average),
    ("shortsword", ItemRarity::Average),
    ("wooden shield", ItemRarity::Average),
    ("leather armor", ItemRarity::Average),
    ("healing salve", ItemRarity::Average),
    ("set of lockpicks", ItemRarity::Average),
    ("grappling hook", ItemRarity::Average),
    ("silver chalice", ItemRarity::Uncommon),
    ("spyglass", ItemRarity::Uncommon),
    ("chain shirt", ItemRarity::Uncommon),
    ("war horn", ItemRarity::Uncommon),
    ("censer of incense", ItemRarity::Uncommon),
    ("enchanted quill", ItemRarity::Rare),
    ("elven cloak", ItemRarity::Rare),
    ("potion of healing", ItemRarity::Rare),
    ("jeweled ring", ItemRarity::Rare),
    ("dragon-scale gloves", ItemRarity::Exotic),
    ("orb of whispers", ItemRarity::Exotic),
    ("clockwork songbird", ItemRarity::Exotic),
    ("crown of the deep king", ItemRarity::Legendary),
    ("blade of the last dawn", ItemRarity::Legendary),
];

/// Roll a single item of the given rarity
pub fn roll_item(rarity: ItemRarity, condition: ItemCondition, rng: &mut GenRng) -> Item {
    let matching: Vec<&str> = CATALOG
        .iter()
        .filter(|(_, r)| *r == rarity)
        .map(|(name, _)| *name)
        .collect();
    let name = rng.choose(&matching).copied().unwrap_or("torch");
    Item {
        name: name.to_string(),
        rarity,
        condition,
    }
}
