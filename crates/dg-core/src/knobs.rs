//! Generation knobs and the multipliers derived from them.
//!
//! Knobs arrive as an unresolved configuration with optional fields;
//! resolving validates the four required dungeon knobs up front, before any
//! grid work begins. Item knobs left unset mean "roll per room".

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::item::{ItemCondition, ItemQuantity, ItemRarity};

/// Rooms requested per point of complexity
pub const ROOM_COUNT_MULTIPLIER: u32 = 10;

/// Lower bound multiplier for grid width/height per point of complexity
pub const GRID_MIN_MULTIPLIER: u32 = 5;

/// Upper bound multiplier for grid width/height per point of complexity
pub const GRID_MAX_MULTIPLIER: u32 = 6;

/// Scales the trap-frequency knob into a trap count range
pub const TRAP_COUNT_MULTIPLIER: u32 = 5;

/// Item knobs passed through to room content generation.
///
/// `None` resolves to a fresh weighted roll for every room or item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemKnobs {
    pub quantity: Option<ItemQuantity>,
    pub rarity: Option<ItemRarity>,
    pub condition: Option<ItemCondition>,
}

/// Unresolved dungeon configuration as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DungeonConfig {
    /// Scales room count and grid dimensions
    pub complexity: Option<u32>,
    /// Percent chance (0..=100) of each extra connection opportunity
    pub connections: Option<u32>,
    /// Number of treasure maps to scatter
    pub maps: Option<u32>,
    /// Trap frequency; below 1 disables traps entirely
    pub traps: Option<u32>,
    #[serde(default)]
    pub items: ItemKnobs,
}

impl DungeonConfig {
    /// Validate that all four dungeon knobs are present
    pub fn resolve(&self) -> Result<DungeonKnobs, GenError> {
        Ok(DungeonKnobs {
            complexity: self.complexity.ok_or(GenError::MissingKnob("complexity"))?,
            connections: self
                .connections
                .ok_or(GenError::MissingKnob("connections"))?,
            maps: self.maps.ok_or(GenError::MissingKnob("maps"))?,
            traps: self.traps.ok_or(GenError::MissingKnob("traps"))?,
            items: self.items,
        })
    }
}

/// Fully resolved dungeon knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DungeonKnobs {
    pub complexity: u32,
    pub connections: u32,
    pub maps: u32,
    pub traps: u32,
    pub items: ItemKnobs,
}
