//! Dungeon assembly: validates knobs, sizes the grid, scatters content,
//! runs placement and the extra-connection pass, and renders the map.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::connect;
use crate::content;
use crate::door::{Door, DoorKey};
use crate::error::GenError;
use crate::grid::Grid;
use crate::knobs::{
    DungeonConfig, GRID_MAX_MULTIPLIER, GRID_MIN_MULTIPLIER, ROOM_COUNT_MULTIPLIER,
    TRAP_COUNT_MULTIPLIER,
};
use crate::place;
use crate::rect::Dimensions;
use crate::render;
use crate::rng::GenRng;
use crate::room::Room;
use crate::trap;

/// A fully assembled dungeon, the hand-off contract for consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dungeon {
    /// SVG rendering of the floor plan
    pub map: String,
    pub rooms: Vec<Room>,
    pub doors: Vec<Door>,
    /// Grid dimensions the map was generated on, in grid units
    pub map_dimensions: Dimensions,
}

/// Generate a complete dungeon from the given configuration.
///
/// Every invocation builds its state fresh; determinism comes entirely
/// from the seed the caller constructed the RNG with.
pub fn generate_dungeon(config: &DungeonConfig, rng: &mut GenRng) -> Result<Dungeon, GenError> {
    let knobs = config.resolve()?;

    let room_count = (knobs.complexity * ROOM_COUNT_MULTIPLIER) as usize;
    let mut requests = content::generate_room_requests(room_count, &knobs.items, rng);

    // traps scatter over the requested rooms before placement; traps
    // landing on rooms that later fail to place are lost with them
    if knobs.traps >= 1 && !requests.is_empty() {
        let max = (knobs.traps * TRAP_COUNT_MULTIPLIER) as usize;
        let min = max
            .saturating_sub((knobs.traps + TRAP_COUNT_MULTIPLIER) as usize)
            .max(1);
        let count = rng.range(min, max);
        for _ in 0..count {
            let idx = rng.range(0, requests.len() - 1);
            requests[idx].traps.push(trap::roll_trap(rng));
        }
    }

    // width and height roll independently, so non-square grids are common
    let width = rng.range(
        (knobs.complexity * GRID_MIN_MULTIPLIER) as usize,
        (knobs.complexity * GRID_MAX_MULTIPLIER) as usize,
    );
    let height = rng.range(
        (knobs.complexity * GRID_MIN_MULTIPLIER) as usize,
        (knobs.complexity * GRID_MAX_MULTIPLIER) as usize,
    );
    let mut grid = Grid::blank(width, height);
    debug!(width, height, rooms = requests.len(), seed = rng.seed(), "generation started");

    let mut placement = place::place_rooms(&mut grid, &requests, rng)?;
    if !placement.skipped.is_empty() {
        warn!(
            requested = requests.len(),
            placed = placement.rooms.len(),
            "not every requested room fit the grid"
        );
    }

    connect::add_extra_connections(
        &mut grid,
        &placement.rooms,
        &mut placement.doors,
        knobs.connections,
        rng,
    );

    let mut rooms: Vec<Room> = placement
        .rooms
        .iter()
        .map(|placed| {
            let request = &requests[placed.request];
            Room {
                room_number: placed.room_number,
                kind: placed.kind,
                size: placed.size,
                rect: placed.rect,
                walls: placed.walls.clone(),
                items: request.items.clone(),
                traps: request.traps.clone(),
                keys: Vec::new(),
                has_map: false,
            }
        })
        .collect();

    if !rooms.is_empty() {
        // one key per locked door, each stashed in a random room
        for door in placement.doors.iter().filter(|d| d.locked) {
            let idx = rng.range(0, rooms.len() - 1);
            rooms[idx].keys.push(DoorKey {
                door: door.kind,
                connections: door.connections.clone(),
            });
        }
        // treasure maps; repeated hits on the same room collapse into one
        for _ in 0..knobs.maps {
            let idx = rng.range(0, rooms.len() - 1);
            rooms[idx].has_map = true;
        }
    }

    let map = render::draw_map(&grid, &rooms);
    debug!(
        rooms = rooms.len(),
        doors = placement.doors.len(),
        "dungeon assembled"
    );

    Ok(Dungeon {
        map,
        rooms,
        doors: placement.doors,
        map_dimensions: Dimensions::new(width, height),
    })
}
