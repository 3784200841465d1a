//! Bounded 2D cell lattice and the spatial queries used by room placement.
//!
//! The grid is the single shared mutable resource of a generation run: one
//! instance is created per invocation and threaded by mutable borrow through
//! the placement engine and the extra-connection pass.

use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::rect::{Coord, Dimensions, Direction, Rect};
use crate::rng::GenRng;

/// Thickness of the wall partition between rooms and of the reserved
/// border at the grid edge.
pub const WALL_SIZE: usize = 1;

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    CornerWall,
    Door,
    /// Interior cell of the room with this number
    Room(u16),
}

impl Cell {
    pub const fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall | Cell::CornerWall)
    }

    pub const fn is_door(&self) -> bool {
        matches!(self, Cell::Door)
    }

    /// Room number if this is an interior cell
    pub const fn room_number(&self) -> Option<u16> {
        match self {
            Cell::Room(n) => Some(*n),
            _ => None,
        }
    }

    /// Display character for ASCII dumps
    pub const fn symbol(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => '#',
            Cell::CornerWall => '%',
            Cell::Door => '/',
            Cell::Room(_) => '.',
        }
    }
}

/// Rectangular lattice of cells indexed by (x, y)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Cell contents at a coordinate; coordinates must be in bounds
    pub fn cell(&self, c: Coord) -> Cell {
        self.cells[c.y * self.width + c.x]
    }

    /// Cell contents at a possibly out-of-bounds signed coordinate
    pub fn cell_signed(&self, x: i64, y: i64) -> Option<Cell> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cell(Coord::new(x as usize, y as usize)))
    }

    pub fn set(&mut self, c: Coord, cell: Cell) {
        self.cells[c.y * self.width + c.x] = cell;
    }

    /// Check whether a room interior can be stamped at `rect`.
    ///
    /// Every interior cell must currently be empty, and the surrounding
    /// wall ring must stay clear of the reserved one-cell border at the
    /// grid edge. Wall cells of already-placed rooms are not part of the
    /// check: adjacent rooms share their partition walls.
    pub fn is_empty_area(&self, rect: &Rect) -> bool {
        let inset = 2 * WALL_SIZE; // border plus the room's own wall ring
        if rect.x < inset || rect.y < inset {
            return false;
        }
        if rect.x + rect.width + inset > self.width || rect.y + rect.height + inset > self.height {
            return false;
        }
        rect.cells().all(|c| self.cell(c) == Cell::Empty)
    }

    /// Pick an edge-anchored starting position for the first room.
    ///
    /// Chooses a random cardinal edge, then a random offset along it such
    /// that the room and its wall ring fit inside the reserved border.
    /// Returns the interior top-left coordinate and the anchored edge.
    /// A room too large for the grid on either axis is a caller contract
    /// violation and fails with [`GenError::RoomTooLarge`].
    pub fn starting_point(
        &self,
        dims: Dimensions,
        rng: &mut GenRng,
    ) -> Result<(Coord, Direction), GenError> {
        let inset = 2 * WALL_SIZE;
        if dims.width + 2 * inset > self.width || dims.height + 2 * inset > self.height {
            return Err(GenError::RoomTooLarge {
                room_width: dims.width,
                room_height: dims.height,
                grid_width: self.width,
                grid_height: self.height,
            });
        }

        let max_x = self.width - inset - dims.width;
        let max_y = self.height - inset - dims.height;
        let side = Direction::ALL[rng.range(0, Direction::ALL.len() - 1)];
        let coord = match side {
            Direction::North => Coord::new(rng.range(inset, max_x), inset),
            Direction::South => Coord::new(rng.range(inset, max_x), max_y),
            Direction::West => Coord::new(inset, rng.range(inset, max_y)),
            Direction::East => Coord::new(max_x, rng.range(inset, max_y)),
        };
        Ok((coord, side))
    }

    /// Enumerate every valid interior top-left coordinate for a room of
    /// `dims` adjacent to `prev`, sharing a wall with it.
    ///
    /// Candidates lie in the ring one wall-unit outside `prev`, corners
    /// excluded, and must leave at least one shared non-corner wall cell
    /// for the connecting door. Scan order is column-major and
    /// deterministic; callers relying on "last" selection depend on it.
    pub fn valid_room_connections(&self, dims: Dimensions, prev: &Rect) -> Vec<Coord> {
        let w = dims.width as i64;
        let h = dims.height as i64;
        let gap = WALL_SIZE as i64; // shared partition wall
        let (px, py) = (prev.x as i64, prev.y as i64);
        let (pw, ph) = (prev.width as i64, prev.height as i64);

        let left = px - w - gap;
        let right = px + pw + gap;
        let top = py - h - gap;
        let bottom = py + ph + gap;

        let mut out = Vec::new();
        for x in left..=right {
            for y in top..=bottom {
                let on_x = x == left || x == right;
                let on_y = y == top || y == bottom;
                if !(on_x || on_y) || is_ring_corner(x, y, left, right, top, bottom) {
                    continue;
                }
                // the shared wall must overlap the previous room by at
                // least one non-corner cell
                if on_x && !(y + h > py && y < py + ph) {
                    continue;
                }
                if on_y && !(x + w > px && x < px + pw) {
                    continue;
                }
                if x < 0 || y < 0 {
                    continue;
                }
                let rect = Rect::new(x as usize, y as usize, dims.width, dims.height);
                if self.is_empty_area(&rect) {
                    out.push(Coord::new(x as usize, y as usize));
                }
            }
        }
        out
    }

    /// ASCII dump for debugging and tests
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.cell(Coord::new(x, y)).symbol());
            }
            out.push('\n');
        }
        out
    }
}

/// True when (x, y) sits at a diagonal corner of the candidate ring, where
/// a placement could never share a door-capable wall cell.
fn is_ring_corner(x: i64, y: i64, left: i64, right: i64, top: i64, bottom: i64) -> bool {
    (x == left || x == right) && (y == top || y == bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_grid_empty() {
        let grid = Grid::blank(10, 8);
        for y in 0..8 {
            for x in 0..10 {
                assert_eq!(grid.cell(Coord::new(x, y)), Cell::Empty);
            }
        }
    }

    #[test]
    fn test_is_empty_area_respects_border() {
        let grid = Grid::blank(12, 12);
        // wall ring would touch the outer border
        assert!(!grid.is_empty_area(&Rect::new(1, 2, 3, 3)));
        assert!(!grid.is_empty_area(&Rect::new(2, 1, 3, 3)));
        assert!(!grid.is_empty_area(&Rect::new(7, 2, 4, 3)));
        // ring at coordinate 1, border clear
        assert!(grid.is_empty_area(&Rect::new(2, 2, 3, 3)));
        assert!(grid.is_empty_area(&Rect::new(6, 2, 4, 3)));
    }

    #[test]
    fn test_is_empty_area_rejects_occupied() {
        let mut grid = Grid::blank(12, 12);
        grid.set(Coord::new(4, 4), Cell::Room(1));
        assert!(!grid.is_empty_area(&Rect::new(3, 3, 3, 3)));
        assert!(grid.is_empty_area(&Rect::new(5, 5, 3, 3)));
    }

    #[test]
    fn test_starting_point_fits() {
        let grid = Grid::blank(12, 12);
        let mut rng = GenRng::new(7);
        for _ in 0..50 {
            let (c, _) = grid
                .starting_point(Dimensions::new(4, 3), &mut rng)
                .unwrap();
            assert!(grid.is_empty_area(&Rect::new(c.x, c.y, 4, 3)));
        }
    }

    #[test]
    fn test_starting_point_anchors_an_edge() {
        let grid = Grid::blank(14, 14);
        let mut rng = GenRng::new(3);
        let (c, side) = grid
            .starting_point(Dimensions::new(3, 3), &mut rng)
            .unwrap();
        match side {
            Direction::North => assert_eq!(c.y, 2),
            Direction::South => assert_eq!(c.y, 14 - 2 - 3),
            Direction::West => assert_eq!(c.x, 2),
            Direction::East => assert_eq!(c.x, 14 - 2 - 3),
        }
    }

    #[test]
    fn test_starting_point_too_large() {
        let grid = Grid::blank(10, 10);
        let mut rng = GenRng::new(1);
        let err = grid
            .starting_point(Dimensions::new(7, 3), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenError::RoomTooLarge { .. }));
    }

    #[test]
    fn test_valid_connections_deterministic_order() {
        let grid = Grid::blank(20, 20);
        let prev = Rect::new(8, 8, 3, 3);
        let a = grid.valid_room_connections(Dimensions::new(2, 2), &prev);
        let b = grid.valid_room_connections(Dimensions::new(2, 2), &prev);
        assert_eq!(a, b);
        assert!(!a.is_empty());
        // column-major: x never decreases
        for pair in a.windows(2) {
            assert!(pair[0].x <= pair[1].x);
        }
    }

    #[test]
    fn test_valid_connections_share_a_wall() {
        let grid = Grid::blank(20, 20);
        let prev = Rect::new(8, 8, 3, 3);
        for c in grid.valid_room_connections(Dimensions::new(2, 2), &prev) {
            let rect = Rect::new(c.x, c.y, 2, 2);
            let prev_walls = prev.wall_cells();
            let shared = rect
                .wall_cells()
                .into_iter()
                .filter(|w| prev_walls.contains(w))
                .count();
            assert!(shared >= 1, "candidate {c:?} shares no wall with prev");
        }
    }

    #[test]
    fn test_valid_connections_respect_occupancy() {
        let mut grid = Grid::blank(20, 20);
        let prev = Rect::new(8, 8, 3, 3);
        let before = grid
            .valid_room_connections(Dimensions::new(2, 2), &prev)
            .len();
        // block the column to the east of the room
        for y in 2..18 {
            grid.set(Coord::new(13, y), Cell::Room(9));
        }
        let after = grid
            .valid_room_connections(Dimensions::new(2, 2), &prev)
            .len();
        assert!(after < before);
    }

    #[test]
    fn test_ascii_dump_shape() {
        let grid = Grid::blank(5, 3);
        let dump = grid.to_ascii();
        assert_eq!(dump.lines().count(), 3);
        assert!(dump.lines().all(|l| l.len() == 5));
    }
}
