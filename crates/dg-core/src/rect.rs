//! Geometry primitives for the dungeon grid.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A single cell coordinate on the grid
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Width and height in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Cardinal direction, used for door facings and edge anchoring
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The opposite cardinal direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// A rectangle of interior cells in grid units.
///
/// Room walls occupy the one-cell ring just outside the rectangle and are
/// shared with adjacent rooms; the ring's four diagonal cells are corner
/// walls and can never hold a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left interior coordinate
    pub fn origin(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// Last interior column
    pub fn right(&self) -> usize {
        self.x + self.width - 1
    }

    /// Last interior row
    pub fn bottom(&self) -> usize {
        self.y + self.height - 1
    }

    /// Check if a coordinate lies inside the interior
    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.x && c.x < self.x + self.width && c.y >= self.y && c.y < self.y + self.height
    }

    /// Iterate over every interior cell, column-major
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.x..self.x + self.width)
            .flat_map(move |x| (self.y..self.y + self.height).map(move |y| Coord::new(x, y)))
    }

    /// Wall cells on one side of the perimeter ring, corners excluded.
    ///
    /// Requires the rectangle to sit at least one cell away from the grid
    /// origin on both axes, which placement guarantees.
    pub fn wall_cells_on(&self, side: Direction) -> Vec<Coord> {
        match side {
            Direction::North => (self.x..self.x + self.width)
                .map(|x| Coord::new(x, self.y - 1))
                .collect(),
            Direction::South => (self.x..self.x + self.width)
                .map(|x| Coord::new(x, self.y + self.height))
                .collect(),
            Direction::West => (self.y..self.y + self.height)
                .map(|y| Coord::new(self.x - 1, y))
                .collect(),
            Direction::East => (self.y..self.y + self.height)
                .map(|y| Coord::new(self.x + self.width, y))
                .collect(),
        }
    }

    /// All non-corner wall cells of the perimeter ring
    pub fn wall_cells(&self) -> Vec<Coord> {
        Direction::ALL
            .iter()
            .flat_map(|&side| self.wall_cells_on(side))
            .collect()
    }

    /// The four corner cells of the perimeter ring
    pub fn corner_cells(&self) -> [Coord; 4] {
        [
            Coord::new(self.x - 1, self.y - 1),
            Coord::new(self.x + self.width, self.y - 1),
            Coord::new(self.x - 1, self.y + self.height),
            Coord::new(self.x + self.width, self.y + self.height),
        ]
    }
}
