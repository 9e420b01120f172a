//! Simulation manager for the life3d engine
//!
//! The boundary between a presentation layer and the engine: it validates
//! user commands before they reach the engine, drives `advance` once per
//! displayed frame and keeps the performance monitor fed.

use log::{debug, info};
use std::time::Duration;

use super::command::Command;
use super::traits::Simulation;
use crate::automaton::{AutomatonEngine, Snapshot};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::performance::PerformanceMonitor;

/// Owns the engine and its frame statistics
pub struct SimulationManager {
    engine: AutomatonEngine,
    performance: PerformanceMonitor,
}

impl SimulationManager {
    /// Build an engine from `config` and wrap it
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::with_engine(AutomatonEngine::with_config(config)?))
    }

    /// Wrap an existing engine
    pub fn with_engine(engine: AutomatonEngine) -> Self {
        Self {
            engine,
            performance: PerformanceMonitor::new(),
        }
    }

    /// Run one displayed frame
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last frame in seconds
    ///
    /// # Returns
    /// The number of simulation ticks executed
    pub fn frame(&mut self, delta_time: f32) -> u32 {
        let ticks = self.engine.advance(delta_time);
        let frame_time = Duration::try_from_secs_f32(delta_time).unwrap_or(Duration::ZERO);
        self.performance.record_frame(frame_time, ticks);
        ticks
    }

    /// Validate and forward a user command
    pub fn apply(&mut self, command: Command) -> Result<(), EngineError> {
        debug!("Applying command '{}'", command);
        match command {
            Command::Play => self.engine.set_running(true),
            Command::Pause => self.engine.set_running(false),
            Command::Restart => {
                self.engine.reset();
                info!("Restarted '{}'", self.engine.name());
            }
            Command::SetSpeed(ticks_per_second) => {
                if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
                    return Err(EngineError::InvalidSpeed(ticks_per_second));
                }
                self.engine.set_speed(ticks_per_second)?;
            }
            Command::SetRule(rule) => self.engine.set_rule(rule),
        }
        Ok(())
    }

    /// Read-only view of the current generation
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &AutomatonEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AutomatonEngine {
        &mut self.engine
    }

    pub fn performance(&self) -> &PerformanceMonitor {
        &self.performance
    }

    /// Check if simulation is running
    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }
}
