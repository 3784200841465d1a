//! Room types, size classes, and the room structures produced by placement.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::door::DoorKey;
use crate::grid::WALL_SIZE;
use crate::item::Item;
use crate::rect::{Coord, Dimensions, Rect};
use crate::rng::GenRng;
use crate::trap::Trap;

/// Minimum rolled length of a hallway's long axis
pub const HALL_LENGTH_MIN: usize = 3;

/// Kind of room
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomType {
    Armory,
    Atrium,
    Ballroom,
    Bedroom,
    Chamber,
    Dining,
    Dormitory,
    GreatHall,
    Hallway,
    Kitchen,
    Laboratory,
    Library,
    Pantry,
    Prison,
    #[default]
    Room,
    Shrine,
    Smithy,
    Storage,
    Study,
    Throne,
    Treasury,
}

impl RoomType {
    /// Spawn probability as (cumulative threshold, type) pairs
    pub const PROBABILITY: &'static [(u8, RoomType)] = &[
        (30, RoomType::Room),
        (42, RoomType::Chamber),
        (54, RoomType::Hallway),
        (60, RoomType::Storage),
        (65, RoomType::Bedroom),
        (69, RoomType::Dining),
        (73, RoomType::Kitchen),
        (77, RoomType::Library),
        (80, RoomType::Armory),
        (83, RoomType::Study),
        (85, RoomType::Shrine),
        (87, RoomType::Laboratory),
        (89, RoomType::Pantry),
        (91, RoomType::Dormitory),
        (93, RoomType::Smithy),
        (95, RoomType::Prison),
        (96, RoomType::Ballroom),
        (97, RoomType::GreatHall),
        (98, RoomType::Atrium),
        (99, RoomType::Throne),
        (100, RoomType::Treasury),
    ];

    /// Hallways get elongated one-unit-wide dimensions and biased door
    /// placement when joined to other hallways.
    pub fn is_hallway(self) -> bool {
        matches!(self, RoomType::Hallway)
    }
}

/// Size class of a room, mapped to a dimension range in grid units
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomSize {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Massive,
}

impl RoomSize {
    pub const PROBABILITY: &'static [(u8, RoomSize)] = &[
        (15, RoomSize::Tiny),
        (40, RoomSize::Small),
        (70, RoomSize::Medium),
        (90, RoomSize::Large),
        (100, RoomSize::Massive),
    ];

    /// Inclusive per-axis dimension range for this size class
    pub const fn dimension_range(self) -> (usize, usize) {
        match self {
            RoomSize::Tiny => (2, 3),
            RoomSize::Small => (2, 4),
            RoomSize::Medium => (2, 5),
            RoomSize::Large => (3, 10),
            RoomSize::Massive => (5, 15),
        }
    }
}

/// Roll interior dimensions for a room of the given type and size class,
/// clamped so the room and its walls always fit the grid interior.
pub fn roll_dimensions(
    kind: RoomType,
    size: RoomSize,
    grid: Dimensions,
    rng: &mut GenRng,
) -> Dimensions {
    let (min, max) = size.dimension_range();
    let max_w = grid.width.saturating_sub(4 * WALL_SIZE).max(1);
    let max_h = grid.height.saturating_sub(4 * WALL_SIZE).max(1);

    if kind.is_hallway() {
        // one elongated axis, the other fixed to a single unit
        let length = rng.range(HALL_LENGTH_MIN.max(min), max.max(HALL_LENGTH_MIN));
        if rng.percent(50) {
            Dimensions::new(length.min(max_w), 1)
        } else {
            Dimensions::new(1, length.min(max_h))
        }
    } else {
        Dimensions::new(
            rng.range(min, max).min(max_w),
            rng.range(min, max).min(max_h),
        )
    }
}

/// Content descriptor consumed by the placement engine; carries no geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRequest {
    pub kind: RoomType,
    pub size: RoomSize,
    pub items: Vec<Item>,
    pub traps: Vec<Trap>,
}

/// A room stamped into the grid.
///
/// `walls` is the non-corner perimeter ring recorded at stamp time; a room
/// cannot anchor a later connection until its walls are known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub rect: Rect,
    pub room_number: u16,
    pub kind: RoomType,
    pub size: RoomSize,
    pub walls: Vec<Coord>,
    /// Index of the request this room was placed for
    pub request: usize,
}

/// A finished room in the assembled dungeon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub room_number: u16,
    pub kind: RoomType,
    pub size: RoomSize,
    pub rect: Rect,
    pub walls: Vec<Coord>,
    pub items: Vec<Item>,
    pub traps: Vec<Trap>,
    pub keys: Vec<DoorKey>,
    pub has_map: bool,
}
