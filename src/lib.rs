// src/lib.rs
//! life3d
//!
//! A 3D generalisation of Conway's Game of Life with decaying cells.
//!
//! The engine keeps two padded grids and flips between them once per tick.
//! A presentation layer calls [`AutomatonEngine::advance`] once per displayed
//! frame with the elapsed time, then reads [`AutomatonEngine::snapshot`] to
//! draw. The fixed-step clock decides how many ticks that frame is worth, so
//! simulation speed is independent of the display refresh rate.

pub mod automaton;
pub mod config;
pub mod error;
pub mod performance;
pub mod prelude;
pub mod simulation;

// Re-export main types for convenience
pub use automaton::{AutomatonEngine, Rule, Snapshot};
pub use config::EngineConfig;
pub use error::{CommandParseError, EngineError, RuleParseError};

/// Creates an engine with the default configuration
pub fn default() -> Result<AutomatonEngine, EngineError> {
    AutomatonEngine::with_config(&EngineConfig::default())
}
