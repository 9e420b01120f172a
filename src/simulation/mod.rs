//! Simulation system
//!
//! Frame-driven lifecycle for the automaton: the fixed-step clock that turns
//! display deltas into ticks, the commands a presentation layer forwards, and
//! the manager that validates and applies them.

pub mod clock;
pub mod command;
pub mod manager;
pub mod traits;

pub use clock::FixedStepClock;
pub use command::Command;
pub use manager::SimulationManager;
pub use traits::Simulation;
