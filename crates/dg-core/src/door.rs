//! Door types, connections, and keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rect::{Direction, Rect};
use crate::rng::GenRng;

/// Synthetic room number for the dungeon exterior
pub const OUTSIDE: u16 = 0;

/// Longest span a door may occupy along its wall, in grid units
pub const MAX_DOOR_SPAN: usize = 4;

/// Percent chance that a lockable door is locked
pub const LOCKED_CHANCE: u32 = 25;

/// Kind of door or passage between rooms
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DoorType {
    Archway,
    Concealed,
    Hole,
    Iron,
    Mechanical,
    Passageway,
    Portcullis,
    Secret,
    Steel,
    Stone,
    #[default]
    Wooden,
}

impl DoorType {
    /// Ordinary door distribution as (cumulative threshold, type) pairs
    pub const PROBABILITY: &'static [(u8, DoorType)] = &[
        (20, DoorType::Archway),
        (40, DoorType::Wooden),
        (50, DoorType::Stone),
        (60, DoorType::Steel),
        (65, DoorType::Iron),
        (70, DoorType::Portcullis),
        (78, DoorType::Hole),
        (85, DoorType::Mechanical),
        (100, DoorType::Passageway),
    ];

    /// Secret/concealed pre-roll used in fork and extra-connection
    /// contexts; thresholds deliberately stop short of 100 so most rolls
    /// fall through to the ordinary table.
    pub const SECRET_PROBABILITY: &'static [(u8, DoorType)] =
        &[(15, DoorType::Concealed), (30, DoorType::Secret)];

    /// Whether this door type can carry a lock
    pub fn lockable(self) -> bool {
        matches!(
            self,
            DoorType::Wooden
                | DoorType::Stone
                | DoorType::Steel
                | DoorType::Iron
                | DoorType::Portcullis
                | DoorType::Mechanical
        )
    }

    pub fn is_secret(self) -> bool {
        matches!(self, DoorType::Secret | DoorType::Concealed)
    }
}

/// One endpoint of a door, keyed by room number in [`Door::connections`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Facing of the door from this room's perspective
    pub direction: Direction,
    /// Room number the door leads to ([`OUTSIDE`] for the exterior)
    pub to: u16,
}

/// A door stamped into the grid.
///
/// `connections` holds exactly one entry (exterior door) or two entries
/// with mutually opposite directions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    /// Cells occupied by the door: 1..=4 units long, 1 unit wide
    pub rect: Rect,
    pub kind: DoorType,
    pub locked: bool,
    pub connections: BTreeMap<u16, Connection>,
}

/// Key produced for a locked door; identified only by the door it opens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorKey {
    pub door: DoorType,
    pub connections: BTreeMap<u16, Connection>,
}

/// Roll a door type. Fork and extra-connection contexts first attempt a
/// secret/concealed roll which, when it hits, vetoes the ordinary table.
pub fn roll_door_type(rng: &mut GenRng, allow_secret: bool) -> DoorType {
    if allow_secret {
        if let Some(kind) = rng.weighted_opt(DoorType::SECRET_PROBABILITY) {
            return kind;
        }
    }
    rng.weighted(DoorType::PROBABILITY)
}

/// Roll the lock state for a freshly created door
pub fn roll_locked(kind: DoorType, rng: &mut GenRng) -> bool {
    kind.lockable() && rng.percent(LOCKED_CHANCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_probability_table_complete() {
        assert_eq!(DoorType::PROBABILITY.last().unwrap().0, 100);
        // every non-secret type is reachable through the ordinary table
        for kind in DoorType::iter().filter(|k| !k.is_secret()) {
            assert!(
                DoorType::PROBABILITY.iter().any(|(_, k)| *k == kind),
                "{kind} missing from table"
            );
        }
    }

    #[test]
    fn test_secret_table_is_partial() {
        assert!(DoorType::SECRET_PROBABILITY.last().unwrap().0 < 100);
        for (_, kind) in DoorType::SECRET_PROBABILITY {
            assert!(kind.is_secret());
        }
    }

    #[test]
    fn test_lockable_set() {
        assert!(DoorType::Wooden.lockable());
        assert!(DoorType::Portcullis.lockable());
        assert!(!DoorType::Archway.lockable());
        assert!(!DoorType::Hole.lockable());
        assert!(!DoorType::Secret.lockable());
    }

    #[test]
    fn test_roll_door_type_without_secret() {
        let mut rng = GenRng::new(21);
        for _ in 0..500 {
            assert!(!roll_door_type(&mut rng, false).is_secret());
        }
    }

    #[test]
    fn test_roll_door_type_with_secret() {
        let mut rng = GenRng::new(21);
        let secret = (0..500)
            .filter(|_| roll_door_type(&mut rng, true).is_secret())
            .count();
        // around 30% of rolls should hit the secret table
        assert!(secret > 80 && secret < 250);
    }

    #[test]
    fn test_unlockable_never_locked() {
        let mut rng = GenRng::new(4);
        for _ in 0..200 {
            assert!(!roll_locked(DoorType::Archway, &mut rng));
        }
    }
}
