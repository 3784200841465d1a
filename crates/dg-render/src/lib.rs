//! dg-render: SVG drawing primitives for dungeon maps.
//!
//! A leaf crate with no dependencies: it knows nothing about grids or
//! rooms, only how to turn rectangles, lines, and labels into markup
//! strings. The generation engine walks its finished grid and calls
//! these primitives to build the final document.

pub mod svg;
