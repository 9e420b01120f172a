//! # life3d Prelude
//!
//! Commonly used types in one import:
//!
//! ```rust
//! use life3d::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let config = EngineConfig::default().with_size(16).with_seed(7);
//!     let mut manager = SimulationManager::new(&config)?;
//!
//!     manager.apply("speed 30".parse().unwrap())?;
//!     manager.frame(1.0 / 60.0);
//!
//!     let instances = manager.snapshot().instances(&ColorRule::default());
//!     println!("{} visible cells", instances.len());
//!     Ok(())
//! }
//! ```

// Re-export the automaton core
pub use crate::automaton::{
    AutomatonEngine, Cell, CellInstance, ColorRule, NeighbourSet, Rule, Snapshot,
};

// Re-export simulation framework
pub use crate::simulation::{Command, FixedStepClock, Simulation, SimulationManager};

// Re-export configuration, errors and monitoring
pub use crate::config::EngineConfig;
pub use crate::error::{CommandParseError, EngineError, RuleParseError};
pub use crate::performance::{PerformanceMetrics, PerformanceMonitor};

// Re-export common external dependencies
pub use cgmath::Vector3;
