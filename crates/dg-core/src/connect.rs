//! Extra-connection pass: punches redundant doors between rooms that
//! ended up adjacent but unconnected, trading tree-shaped layouts for
//! loopier ones.

use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::door::{self, Connection, Door};
use crate::grid::{Cell, Grid};
use crate::rect::{Coord, Direction, Rect};
use crate::rng::GenRng;
use crate::room::PlacedRoom;

const NEIGHBOR_OFFSETS: [(i64, i64, Direction); 4] = [
    (0, -1, Direction::North),
    (1, 0, Direction::East),
    (0, 1, Direction::South),
    (-1, 0, Direction::West),
];

/// Walk every room's walls and, with the given percent chance per
/// opportunity, open an extra door to an adjacent room not already
/// reached from this one. Wall cells are visited nearest-to-room-center
/// first, so a guaranteed connection lands at the middle of the shared
/// edge. Wall cells next to an existing door never qualify, so doors do
/// not clump.
pub fn add_extra_connections(
    grid: &mut Grid,
    rooms: &[PlacedRoom],
    doors: &mut Vec<Door>,
    chance: u32,
    rng: &mut GenRng,
) {
    if chance == 0 {
        return;
    }

    for room in rooms {
        // rooms already reachable from here, updated as the pass adds
        // doors so the same pair is never connected twice
        let mut connected: HashSet<u16> = doors
            .iter()
            .filter_map(|d| d.connections.get(&room.room_number).map(|c| c.to))
            .collect();

        // doubled coordinates keep the center exact for even dimensions
        let center_x = (2 * room.rect.x + room.rect.width - 1) as i64;
        let center_y = (2 * room.rect.y + room.rect.height - 1) as i64;
        let mut walls = room.walls.clone();
        walls.sort_by_key(|c| {
            let dx = 2 * c.x as i64 - center_x;
            let dy = 2 * c.y as i64 - center_y;
            dx * dx + dy * dy
        });

        for wall in walls {
            if grid.cell(wall) != Cell::Wall {
                continue;
            }
            if adjacent_to_door(grid, wall) {
                continue;
            }

            for (dx, dy, direction) in NEIGHBOR_OFFSETS {
                let neighbor = grid.cell_signed(wall.x as i64 + dx, wall.y as i64 + dy);
                let Some(Cell::Room(other)) = neighbor else {
                    continue;
                };
                if other == room.room_number || connected.contains(&other) {
                    continue;
                }
                if !rng.percent(chance) {
                    continue;
                }

                grid.set(wall, Cell::Door);
                let kind = door::roll_door_type(rng, true);
                let locked = door::roll_locked(kind, rng);
                let mut connections = BTreeMap::new();
                connections.insert(
                    room.room_number,
                    Connection {
                        direction,
                        to: other,
                    },
                );
                connections.insert(
                    other,
                    Connection {
                        direction: direction.opposite(),
                        to: room.room_number,
                    },
                );
                doors.push(Door {
                    rect: Rect::new(wall.x, wall.y, 1, 1),
                    kind,
                    locked,
                    connections,
                });
                connected.insert(other);
                debug!(from = room.room_number, to = other, "extra connection added");
            }
        }
    }
}

fn adjacent_to_door(grid: &Grid, c: Coord) -> bool {
    NEIGHBOR_OFFSETS.iter().any(|(dx, dy, _)| {
        matches!(
            grid.cell_signed(c.x as i64 + dx, c.y as i64 + dy),
            Some(Cell::Door)
        )
    })
}
