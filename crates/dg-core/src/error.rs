//! Error types for dungeon generation.
//!
//! Configuration errors and geometric impossibilities are fatal for the
//! invocation; invariant violations indicate a caller bug. A room that
//! merely fails to fit is not an error (see the skipped-room path in
//! [`crate::place`]).

use thiserror::Error;

/// Errors surfaced by the dungeon generator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// A required dungeon knob was not supplied
    #[error("missing required knob '{0}'")]
    MissingKnob(&'static str),

    /// Room dimensions exceed the grid interior on at least one axis
    #[error(
        "room of {room_width}x{room_height} cannot fit inside a {grid_width}x{grid_height} grid"
    )]
    RoomTooLarge {
        room_width: usize,
        room_height: usize,
        grid_width: usize,
        grid_height: usize,
    },

    /// A room used as a connection anchor has no recorded wall cells
    #[error("room {0} has no recorded wall cells")]
    MissingWalls(u16),

    /// A door cell does not lie on the perimeter of the room it should join
    #[error("door cell ({x}, {y}) is not on the perimeter of room {room}")]
    InvalidDoorCells { x: usize, y: usize, room: u16 },

    /// Two rooms that should share a wall have no common non-corner cells
    #[error("rooms {a} and {b} share no wall cells that could hold a door")]
    NoSharedWall { a: u16, b: u16 },
}
