//! Room placement engine: stamps rooms into the grid and cuts the doors
//! that connect them.
//!
//! Rooms are placed in request order, each chained off the previously
//! placed one. Requests that fail to fit are skipped, then retried as
//! branches anchored to every placed room in turn (the fork pass), which
//! yields tree-shaped rather than purely linear dungeons.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use crate::door::{self, Connection, Door, MAX_DOOR_SPAN, OUTSIDE};
use crate::error::GenError;
use crate::grid::{Cell, Grid};
use crate::rect::{Coord, Direction, Rect};
use crate::rng::GenRng;
use crate::room::{self, PlacedRoom, RoomRequest};

/// Outcome of a placement run
#[derive(Debug)]
pub struct Placement {
    pub rooms: Vec<PlacedRoom>,
    pub doors: Vec<Door>,
    /// Request indices that could not be placed against any anchor
    pub skipped: Vec<usize>,
}

/// Place as many of the requested rooms as possible into the grid.
///
/// The first room is anchored to a random grid edge and gets a door to
/// the exterior; every later room connects to its predecessor. After the
/// primary pass, leftover requests are retried as forks off every placed
/// room, with secret doors enabled for the branch joins.
pub fn place_rooms(
    grid: &mut Grid,
    requests: &[RoomRequest],
    rng: &mut GenRng,
) -> Result<Placement, GenError> {
    let mut placer = Placer {
        grid,
        requests,
        rooms: Vec::new(),
        doors: Vec::new(),
    };

    let pending: Vec<usize> = (0..requests.len()).collect();
    let mut skipped = placer.place_branch(&pending, None, false, rng)?;

    // fork pass: an explicit worklist of anchors keeps the branch order
    // inspectable and the stack depth bounded
    let mut anchors: VecDeque<usize> = (0..placer.rooms.len()).collect();
    while let Some(anchor) = anchors.pop_front() {
        if skipped.is_empty() {
            break;
        }
        let pending = std::mem::take(&mut skipped);
        let before = placer.rooms.len();
        skipped = placer.place_branch(&pending, Some(anchor), true, rng)?;
        anchors.extend(before..placer.rooms.len());
    }

    if !skipped.is_empty() {
        debug!(
            unplaced = skipped.len(),
            "requests left unplaced after fork pass"
        );
    }

    Ok(Placement {
        rooms: placer.rooms,
        doors: placer.doors,
        skipped,
    })
}

/// Stamp a room into the grid: walls on the perimeter ring, corner walls
/// at its four diagonals, the room number across the interior. Returns
/// the recorded wall-cell list. Door cells already cut into shared walls
/// are left untouched.
pub fn stamp_room(grid: &mut Grid, rect: &Rect, room_number: u16) -> Vec<Coord> {
    let walls = rect.wall_cells();
    for &c in &walls {
        if grid.cell(c) != Cell::Door {
            grid.set(c, Cell::Wall);
        }
    }
    for c in rect.corner_cells() {
        if grid.cell(c) != Cell::Door {
            grid.set(c, Cell::CornerWall);
        }
    }
    for c in rect.cells() {
        grid.set(c, Cell::Room(room_number));
    }
    walls
}

struct Placer<'a> {
    grid: &'a mut Grid,
    requests: &'a [RoomRequest],
    rooms: Vec<PlacedRoom>,
    doors: Vec<Door>,
}

/// What a new room's door connects to
enum DoorTarget<'a> {
    /// The previously placed room in the chain
    Prev(&'a PlacedRoom),
    /// The dungeon exterior, through the given edge of the room
    Outside(Direction),
}

/// What a room was placed against, resolved before stamping
enum Anchor {
    /// Grid edge the first room of a dungeon is flush with
    Edge(Direction),
    /// Index of the previous room in the chain
    Room(usize),
}

impl Placer<'_> {
    /// Place one branch of rooms in order, each chained off the room
    /// placed before it. Returns the request indices that did not fit.
    fn place_branch(
        &mut self,
        pending: &[usize],
        anchor: Option<usize>,
        allow_secret: bool,
        rng: &mut GenRng,
    ) -> Result<Vec<usize>, GenError> {
        let mut skipped = Vec::new();
        let mut prev = anchor;
        for &request in pending {
            match self.place_one(request, prev, allow_secret, rng)? {
                Some(room_idx) => prev = Some(room_idx),
                None => {
                    debug!(request, "no valid placement, room skipped");
                    skipped.push(request);
                }
            }
        }
        Ok(skipped)
    }

    /// Attempt to place a single room. `Ok(None)` means the room did not
    /// fit against its anchor and was skipped; only the first room of a
    /// dungeon (no previous room) can fail hard, when its minimum
    /// dimensions exceed the grid interior.
    fn place_one(
        &mut self,
        request_idx: usize,
        prev: Option<usize>,
        allow_secret: bool,
        rng: &mut GenRng,
    ) -> Result<Option<usize>, GenError> {
        let request = &self.requests[request_idx];
        let dims = room::roll_dimensions(request.kind, request.size, self.grid.dimensions(), rng);

        let (coord, anchor) = match prev {
            None => {
                let (coord, side) = self.grid.starting_point(dims, rng)?;
                (coord, Anchor::Edge(side))
            }
            Some(prev_idx) => {
                let prev_room = &self.rooms[prev_idx];
                let candidates = self.grid.valid_room_connections(dims, &prev_room.rect);
                if candidates.is_empty() {
                    return Ok(None);
                }
                let coord = if request.kind.is_hallway() && prev_room.kind.is_hallway() {
                    // hallways extend rather than double back
                    candidates[candidates.len() - 1]
                } else {
                    *rng.choose(&candidates).unwrap_or(&candidates[0])
                };
                (coord, Anchor::Room(prev_idx))
            }
        };

        let rect = Rect::new(coord.x, coord.y, dims.width, dims.height);
        let room_number = self.rooms.len() as u16 + 1;
        let walls = stamp_room(self.grid, &rect, room_number);
        let placed = PlacedRoom {
            rect,
            room_number,
            kind: request.kind,
            size: request.size,
            walls,
            request: request_idx,
        };

        let door = match anchor {
            Anchor::Room(prev_idx) => {
                let prev_room = &self.rooms[prev_idx];
                let hall_join = request.kind.is_hallway() && prev_room.kind.is_hallway();
                door_between(
                    self.grid,
                    &placed,
                    DoorTarget::Prev(prev_room),
                    hall_join,
                    allow_secret,
                    rng,
                )?
            }
            Anchor::Edge(side) => door_between(
                self.grid,
                &placed,
                DoorTarget::Outside(side),
                false,
                allow_secret,
                rng,
            )?,
        };

        self.doors.push(door);
        self.rooms.push(placed);
        Ok(Some(self.rooms.len() - 1))
    }
}

/// Cut a door between a freshly stamped room and its target.
///
/// Candidate cells are the intersection of the two rooms' wall lists (or
/// the room's edge-facing wall for an exterior door); the door occupies a
/// random contiguous sub-span of 1..=4 cells, anchored to either end for
/// hallway-to-hallway joins.
fn door_between(
    grid: &mut Grid,
    room: &PlacedRoom,
    target: DoorTarget<'_>,
    hall_join: bool,
    allow_secret: bool,
    rng: &mut GenRng,
) -> Result<Door, GenError> {
    let (mut cells, other) = match &target {
        DoorTarget::Prev(prev) => {
            if prev.walls.is_empty() {
                return Err(GenError::MissingWalls(prev.room_number));
            }
            let shared: Vec<Coord> = room
                .walls
                .iter()
                .copied()
                .filter(|c| prev.walls.contains(c))
                .collect();
            (shared, prev.room_number)
        }
        DoorTarget::Outside(side) => (room.rect.wall_cells_on(*side), OUTSIDE),
    };

    if cells.is_empty() {
        return Err(GenError::NoSharedWall {
            a: room.room_number,
            b: other,
        });
    }
    cells.sort_unstable();

    let limit = MAX_DOOR_SPAN.min(cells.len().div_ceil(2)).max(1);
    let size = rng.range(1, limit);
    let start = if hall_join {
        // anchor to either end, matching the hallway placement bias
        if rng.percent(50) { 0 } else { cells.len() - size }
    } else {
        rng.range(0, cells.len() - size)
    };
    let span = &cells[start..start + size];
    for &c in span {
        grid.set(c, Cell::Door);
    }

    let direction = door_direction(span[0], &room.rect, room.room_number)?;
    let rect = match direction {
        Direction::East | Direction::West => Rect::new(span[0].x, span[0].y, 1, size),
        Direction::North | Direction::South => Rect::new(span[0].x, span[0].y, size, 1),
    };

    let kind = door::roll_door_type(rng, allow_secret);
    let locked = door::roll_locked(kind, rng);

    let mut connections = BTreeMap::new();
    connections.insert(
        room.room_number,
        Connection {
            direction,
            to: other,
        },
    );
    if let DoorTarget::Prev(prev) = target {
        connections.insert(
            prev.room_number,
            Connection {
                direction: direction.opposite(),
                to: room.room_number,
            },
        );
    }

    Ok(Door {
        rect,
        kind,
        locked,
        connections,
    })
}

/// Which edge of `rect` a door cell lies on, from the room's perspective
fn door_direction(cell: Coord, rect: &Rect, room_number: u16) -> Result<Direction, GenError> {
    if cell.x + 1 == rect.x {
        Ok(Direction::West)
    } else if cell.x == rect.x + rect.width {
        Ok(Direction::East)
    } else if cell.y + 1 == rect.y {
        Ok(Direction::North)
    } else if cell.y == rect.y + rect.height {
        Ok(Direction::South)
    } else {
        Err(GenError::InvalidDoorCells {
            x: cell.x,
            y: cell.y,
            room: room_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::{RoomSize, RoomType};
    use proptest::prelude::*;

    fn request(kind: RoomType, size: RoomSize) -> RoomRequest {
        RoomRequest {
            kind,
            size,
            items: Vec::new(),
            traps: Vec::new(),
        }
    }

    fn wall_cell_counts(grid: &Grid) -> (usize, usize, usize, usize) {
        let mut walls = 0;
        let mut corners = 0;
        let mut interior = 0;
        let mut doors = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                match grid.cell(Coord::new(x, y)) {
                    Cell::Wall => walls += 1,
                    Cell::CornerWall => corners += 1,
                    Cell::Room(_) => interior += 1,
                    Cell::Door => doors += 1,
                    Cell::Empty => {}
                }
            }
        }
        (walls, corners, interior, doors)
    }

    #[test]
    fn test_stamp_cell_accounting() {
        let mut grid = Grid::blank(20, 20);
        let rect = Rect::new(4, 4, 5, 3);
        let walls = stamp_room(&mut grid, &rect, 1);

        let (wall_count, corner_count, interior_count, door_count) = wall_cell_counts(&grid);
        assert_eq!(wall_count, 2 * (5 + 3));
        assert_eq!(corner_count, 4);
        assert_eq!(interior_count, 5 * 3);
        assert_eq!(door_count, 0);
        assert_eq!(walls.len(), 2 * (5 + 3));
    }

    #[test]
    fn test_stamp_walls_rederivable() {
        let mut grid = Grid::blank(20, 20);
        let rect = Rect::new(6, 5, 4, 4);
        let mut recorded = stamp_room(&mut grid, &rect, 3);

        // re-derive the wall list from the stamped grid region
        let mut derived = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.cell(Coord::new(x, y)) == Cell::Wall {
                    derived.push(Coord::new(x, y));
                }
            }
        }
        recorded.sort_unstable();
        derived.sort_unstable();
        assert_eq!(recorded, derived);
    }

    #[test]
    fn test_stamp_preserves_existing_doors() {
        let mut grid = Grid::blank(20, 20);
        stamp_room(&mut grid, &Rect::new(4, 4, 3, 3), 1);
        grid.set(Coord::new(7, 5), Cell::Door);
        // adjacent room shares the wall column holding the door
        stamp_room(&mut grid, &Rect::new(8, 4, 3, 3), 2);
        assert_eq!(grid.cell(Coord::new(7, 5)), Cell::Door);
    }

    #[test]
    fn test_first_room_gets_exterior_door() {
        let mut grid = Grid::blank(14, 14);
        let mut rng = GenRng::new(17);
        let requests = vec![request(RoomType::Room, RoomSize::Small)];
        let placement = place_rooms(&mut grid, &requests, &mut rng).unwrap();

        assert_eq!(placement.rooms.len(), 1);
        assert_eq!(placement.doors.len(), 1);
        let door = &placement.doors[0];
        assert_eq!(door.connections.len(), 1);
        assert_eq!(door.connections[&1].to, OUTSIDE);
    }

    #[test]
    fn test_exterior_door_faces_anchored_edge() {
        for seed in 0..20 {
            let mut grid = Grid::blank(14, 14);
            let mut rng = GenRng::new(seed);
            let requests = vec![request(RoomType::Room, RoomSize::Small)];
            let placement = place_rooms(&mut grid, &requests, &mut rng).unwrap();

            let room = &placement.rooms[0];
            let facing = placement.doors[0].connections[&1].direction;
            // the first room sits flush against the edge its door opens through
            match facing {
                Direction::West => assert_eq!(room.rect.x, 2, "seed {seed}"),
                Direction::East => assert_eq!(room.rect.x, 14 - 2 - room.rect.width, "seed {seed}"),
                Direction::North => assert_eq!(room.rect.y, 2, "seed {seed}"),
                Direction::South => {
                    assert_eq!(room.rect.y, 14 - 2 - room.rect.height, "seed {seed}")
                }
            }
        }
    }

    #[test]
    fn test_chained_rooms_share_doors() {
        let mut grid = Grid::blank(24, 24);
        let mut rng = GenRng::new(5);
        let requests = vec![
            request(RoomType::Room, RoomSize::Small),
            request(RoomType::Chamber, RoomSize::Small),
            request(RoomType::Storage, RoomSize::Tiny),
        ];
        let placement = place_rooms(&mut grid, &requests, &mut rng).unwrap();

        assert_eq!(placement.rooms.len(), 3);
        assert_eq!(placement.doors.len(), 3);
        // interior doors reference both endpoint rooms symmetrically
        for door in placement.doors.iter().skip(1) {
            assert_eq!(door.connections.len(), 2);
            let numbers: Vec<u16> = door.connections.keys().copied().collect();
            let a = &door.connections[&numbers[0]];
            let b = &door.connections[&numbers[1]];
            assert_eq!(a.to, numbers[1]);
            assert_eq!(b.to, numbers[0]);
            assert_eq!(a.direction, b.direction.opposite());
        }
    }

    #[test]
    fn test_door_span_bounds() {
        for seed in 0..20 {
            let mut grid = Grid::blank(30, 30);
            let mut rng = GenRng::new(seed);
            let requests = vec![
                request(RoomType::GreatHall, RoomSize::Large),
                request(RoomType::Ballroom, RoomSize::Large),
            ];
            let placement = place_rooms(&mut grid, &requests, &mut rng).unwrap();
            for door in &placement.doors {
                let long = door.rect.width.max(door.rect.height);
                let short = door.rect.width.min(door.rect.height);
                assert!(long >= 1 && long <= MAX_DOOR_SPAN);
                assert_eq!(short, 1);
            }
        }
    }

    #[test]
    fn test_forced_fork_skips_second_massive_room() {
        for seed in 0..10 {
            let mut grid = Grid::blank(12, 12);
            let mut rng = GenRng::new(seed);
            let requests = vec![
                request(RoomType::Room, RoomSize::Massive),
                request(RoomType::Room, RoomSize::Massive),
            ];
            let placement = place_rooms(&mut grid, &requests, &mut rng).unwrap();
            assert_eq!(placement.rooms.len(), 1, "seed {seed}");
            assert_eq!(placement.skipped, vec![1], "seed {seed}");
        }
    }

    #[test]
    fn test_anchor_without_walls_fails_loudly() {
        let mut grid = Grid::blank(10, 10);
        let mut rng = GenRng::new(1);
        let placed = PlacedRoom {
            rect: Rect::new(2, 2, 3, 3),
            room_number: 1,
            kind: RoomType::Room,
            size: RoomSize::Small,
            walls: Vec::new(),
            request: 0,
        };
        // an anchor without recorded walls must fail loudly
        let stamped = stamp_room(&mut grid, &Rect::new(6, 2, 2, 3), 2);
        let new_room = PlacedRoom {
            rect: Rect::new(6, 2, 2, 3),
            room_number: 2,
            kind: RoomType::Room,
            size: RoomSize::Small,
            walls: stamped,
            request: 1,
        };
        let err = door_between(
            &mut grid,
            &new_room,
            DoorTarget::Prev(&placed),
            false,
            false,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, GenError::MissingWalls(1));
    }

    #[test]
    fn test_door_direction_inference() {
        let rect = Rect::new(5, 5, 3, 3);
        assert_eq!(
            door_direction(Coord::new(4, 6), &rect, 1).unwrap(),
            Direction::West
        );
        assert_eq!(
            door_direction(Coord::new(8, 6), &rect, 1).unwrap(),
            Direction::East
        );
        assert_eq!(
            door_direction(Coord::new(6, 4), &rect, 1).unwrap(),
            Direction::North
        );
        assert_eq!(
            door_direction(Coord::new(6, 8), &rect, 1).unwrap(),
            Direction::South
        );
        assert!(matches!(
            door_direction(Coord::new(6, 6), &rect, 1),
            Err(GenError::InvalidDoorCells { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_stamp_accounting(
            x in 2usize..10,
            y in 2usize..10,
            w in 1usize..7,
            h in 1usize..7,
        ) {
            let mut grid = Grid::blank(20, 20);
            let rect = Rect::new(x, y, w, h);
            prop_assume!(grid.is_empty_area(&rect));
            stamp_room(&mut grid, &rect, 1);
            let (walls, corners, interior, doors) = wall_cell_counts(&grid);
            prop_assert_eq!(walls, 2 * (w + h));
            prop_assert_eq!(corners, 4);
            prop_assert_eq!(interior, w * h);
            prop_assert_eq!(doors, 0);
        }
    }
}
