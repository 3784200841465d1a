//! Trap table for room scatter.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::GenRng;

/// Kind of trap lurking in a room
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trap {
    Alarm,
    Arrow,
    Darts,
    FallingNet,
    Fire,
    Gas,
    Pit,
    Rockfall,
    SpikedPit,
    Tripwire,
    Web,
}

impl Trap {
    pub const ALL: [Trap; 11] = [
        Trap::Alarm,
        Trap::Arrow,
        Trap::Darts,
        Trap::FallingNet,
        Trap::Fire,
        Trap::Gas,
        Trap::Pit,
        Trap::Rockfall,
        Trap::SpikedPit,
        Trap::Tripwire,
        Trap::Web,
    ];
}

/// Roll a trap kind, uniform across the table
pub fn roll_trap(rng: &mut GenRng) -> Trap {
    *rng.choose(&Trap::ALL).unwrap_or(&Trap::Pit)
}
