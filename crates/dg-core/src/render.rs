//! Map rendering: walks the finished grid and emits an SVG document via
//! the drawing primitives.

use dg_render::svg::{self, Attrs, DEFAULT_CELL_PX};

use crate::grid::{Cell, Grid};
use crate::rect::Coord;
use crate::room::Room;

const FLOOR_FILL: &str = "#f1ead7";
const WALL_FILL: &str = "#453f34";
const DOOR_FILL: &str = "#a87b4f";
const LABEL_FILL: &str = "#8c8677";

/// Render the dungeon floor plan as a standalone SVG document
pub fn draw_map(grid: &Grid, rooms: &[Room]) -> String {
    let px = DEFAULT_CELL_PX;
    let mut body = String::new();

    for room in rooms {
        body.push_str(&svg::rect(
            room.rect.x * px,
            room.rect.y * px,
            room.rect.width * px,
            room.rect.height * px,
            &Attrs::new().with("fill", FLOOR_FILL),
        ));
    }

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            match grid.cell(Coord::new(x, y)) {
                Cell::Wall | Cell::CornerWall => {
                    body.push_str(&svg::rect(
                        x * px,
                        y * px,
                        px,
                        px,
                        &Attrs::new().with("fill", WALL_FILL),
                    ));
                }
                Cell::Door => {
                    // floor underneath, door leaf inset into the cell
                    body.push_str(&svg::rect(
                        x * px,
                        y * px,
                        px,
                        px,
                        &Attrs::new().with("fill", FLOOR_FILL),
                    ));
                    body.push_str(&svg::rect(
                        x * px + px / 4,
                        y * px + px / 4,
                        px / 2,
                        px / 2,
                        &Attrs::new().with("fill", DOOR_FILL),
                    ));
                }
                Cell::Empty | Cell::Room(_) => {}
            }
        }
    }

    for room in rooms {
        let cx = room.rect.x * px + room.rect.width * px / 2;
        let cy = room.rect.y * px + room.rect.height * px / 2 + px / 4;
        body.push_str(&svg::text(
            cx,
            cy,
            &room.room_number.to_string(),
            &Attrs::new()
                .with("fill", LABEL_FILL)
                .with("font-size", px / 2)
                .with("text-anchor", "middle"),
        ));
    }

    svg::document(grid.width() * px, grid.height() * px, &body)
}
