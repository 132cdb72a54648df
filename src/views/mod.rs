// src/views/mod.rs

pub mod grid;

pub use grid::{BeltTile, RelayOutcome, TileKind, TileRegistry, Token};
