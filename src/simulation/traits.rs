//! Core simulation traits for the life3d engine
//!
//! Defines the lifecycle a driver loop uses to run a simulation once per
//! displayed frame, independent of how the simulation steps internally.

/// Lifecycle of a frame-driven simulation
pub trait Simulation {
    /// Update simulation state
    ///
    /// Called every displayed frame with the wall-clock time since the
    /// previous call. Fixed-step simulations decide internally how many
    /// discrete steps that time is worth.
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last update in seconds
    fn update(&mut self, delta_time: f32);

    /// Get simulation name for display
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to initial state
    fn reset(&mut self);
}
