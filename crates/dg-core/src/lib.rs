//! dg-core: procedural dungeon map synthesis.
//!
//! Generates grid-based dungeon floor plans in a single synchronous pass:
//! rooms stamped against a shared mutable grid, doors connecting them
//! (locked, secret, or concealed), items, traps, keys, and treasure maps
//! scattered through the result, and an SVG rendering of the finished map.
//! Every invocation builds its state fresh; reproducibility comes from
//! seeding [`GenRng`].
//!
//! ```no_run
//! use dg_core::{generate_dungeon, DungeonConfig, GenRng};
//!
//! let config = DungeonConfig {
//!     complexity: Some(3),
//!     connections: Some(15),
//!     maps: Some(1),
//!     traps: Some(2),
//!     items: Default::default(),
//! };
//! let mut rng = GenRng::new(42);
//! let dungeon = generate_dungeon(&config, &mut rng)?;
//! println!("{}", dungeon.map);
//! # Ok::<(), dg_core::GenError>(())
//! ```

pub mod connect;
pub mod content;
pub mod door;
pub mod error;
pub mod generate;
pub mod grid;
pub mod item;
pub mod knobs;
pub mod place;
pub mod rect;
pub mod render;
pub mod room;
pub mod trap;

mod rng;

pub use error::GenError;
pub use generate::{generate_dungeon, Dungeon};
pub use knobs::{DungeonConfig, ItemKnobs};
pub use rng::GenRng;
