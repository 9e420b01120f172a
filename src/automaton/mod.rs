//! Core automaton logic and grid operations.
//!
//! This module contains the 3D life engine: padded grid storage, the
//! survival/birth/aging rule, the double-buffered stepping engine and the
//! read-only snapshot a renderer draws from.

pub mod color;
pub mod engine;
pub mod grid;
pub mod rule;
pub mod snapshot;

pub use color::ColorRule;
pub use engine::AutomatonEngine;
pub use grid::{Cell, Grid};
pub use rule::{NeighbourSet, Rule, MAX_NEIGHBOURS};
pub use snapshot::{CellInstance, Snapshot};
