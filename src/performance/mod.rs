//! # Performance Metrics
//!
//! Frame-time and tick-rate tracking for a frame-driven simulation loop.
//! Frames are recorded from the same deltas the driver feeds the engine, so
//! the numbers are deterministic under test.
//!
//! ## Usage
//!
//! ```rust
//! use life3d::performance::PerformanceMonitor;
//! use std::time::Duration;
//!
//! let mut monitor = PerformanceMonitor::new();
//!
//! // In your main loop
//! monitor.record_frame(Duration::from_millis(16), 1);
//!
//! let fps = monitor.get_metrics().fps;
//! ```

use log::debug;
use std::collections::VecDeque;
use std::time::Duration;

/// Length of the window FPS and tick rate are averaged over
const RATE_WINDOW: Duration = Duration::from_secs(1);

/// Performance metrics for the simulation loop
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Frames per second over the last completed window
    pub fps: f32,
    /// Simulation ticks per second over the last completed window
    pub ticks_per_second: f32,
    /// Average frame time in milliseconds
    pub frame_time_ms: f32,
    /// Minimum frame time in the current history
    pub min_frame_time_ms: f32,
    /// Maximum frame time in the current history
    pub max_frame_time_ms: f32,
    /// Frames recorded since creation or reset
    pub total_frames: u64,
    /// Ticks recorded since creation or reset
    pub total_ticks: u64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            ticks_per_second: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: f32::MAX,
            max_frame_time_ms: 0.0,
            total_frames: 0,
            total_ticks: 0,
        }
    }
}

/// Performance monitoring system
pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times for averaging
    frame_times: VecDeque<Duration>,
    /// Maximum number of frame times to keep for averaging
    max_samples: usize,
    /// Current performance metrics
    current_metrics: PerformanceMetrics,
    /// Time, frames and ticks accumulated in the open window
    window_time: Duration,
    window_frames: u32,
    window_ticks: u32,
}

impl PerformanceMonitor {
    /// Create a new performance monitor
    pub fn new() -> Self {
        Self::with_config(120) // ~2 seconds at 60fps
    }

    /// Create a new performance monitor keeping `max_samples` frame times
    pub fn with_config(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            current_metrics: PerformanceMetrics::default(),
            window_time: Duration::ZERO,
            window_frames: 0,
            window_ticks: 0,
        }
    }

    /// Record one displayed frame and the ticks it ran
    pub fn record_frame(&mut self, frame_time: Duration, ticks: u32) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);

        self.current_metrics.total_frames += 1;
        self.current_metrics.total_ticks += ticks as u64;

        self.window_time += frame_time;
        self.window_frames += 1;
        self.window_ticks += ticks;
        if self.window_time >= RATE_WINDOW {
            self.close_window();
        }

        self.update_frame_stats();
    }

    fn close_window(&mut self) {
        let secs = self.window_time.as_secs_f32();
        self.current_metrics.fps = self.window_frames as f32 / secs;
        self.current_metrics.ticks_per_second = self.window_ticks as f32 / secs;
        debug!(
            "{:.1} fps, {:.1} ticks/s",
            self.current_metrics.fps, self.current_metrics.ticks_per_second
        );

        self.window_time = Duration::ZERO;
        self.window_frames = 0;
        self.window_ticks = 0;
    }

    /// Update calculated metrics
    fn update_frame_stats(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total_time: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total_time / self.frame_times.len() as u32;
        self.current_metrics.frame_time_ms = avg_frame_time.as_secs_f32() * 1000.0;

        if let (Some(min_time), Some(max_time)) = (
            self.frame_times.iter().min(),
            self.frame_times.iter().max(),
        ) {
            self.current_metrics.min_frame_time_ms = min_time.as_secs_f32() * 1000.0;
            self.current_metrics.max_frame_time_ms = max_time.as_secs_f32() * 1000.0;
        }
    }

    /// Get current performance metrics
    pub fn get_metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Get frame time history for graphing
    pub fn get_frame_time_history(&self) -> Vec<f32> {
        self.frame_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    /// Reset all metrics and history
    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.window_time = Duration::ZERO;
        self.window_frames = 0;
        self.window_ticks = 0;
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_after_full_window() {
        let mut monitor = PerformanceMonitor::new();
        for _ in 0..40 {
            monitor.record_frame(Duration::from_millis(25), 2);
        }
        let metrics = monitor.get_metrics();
        assert!((metrics.fps - 40.0).abs() < 0.01);
        assert!((metrics.ticks_per_second - 80.0).abs() < 0.01);
        assert_eq!(metrics.total_frames, 40);
        assert_eq!(metrics.total_ticks, 80);
    }

    #[test]
    fn test_fps_zero_before_window_closes() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(Duration::from_millis(16), 1);
        assert_eq!(monitor.get_metrics().fps, 0.0);
        assert!((monitor.get_metrics().frame_time_ms - 16.0).abs() < 0.01);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut monitor = PerformanceMonitor::with_config(3);
        for ms in [10, 20, 30, 40] {
            monitor.record_frame(Duration::from_millis(ms), 0);
        }
        let history = monitor.get_frame_time_history();
        assert_eq!(history.len(), 3);
        assert!((history[0] - 20.0).abs() < 0.01);

        let metrics = monitor.get_metrics();
        assert!((metrics.min_frame_time_ms - 20.0).abs() < 0.01);
        assert!((metrics.max_frame_time_ms - 40.0).abs() < 0.01);
        assert!((metrics.frame_time_ms - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_reset() {
        let mut monitor = PerformanceMonitor::new();
        monitor.record_frame(Duration::from_secs(2), 3);
        monitor.reset();
        assert!(monitor.get_frame_time_history().is_empty());
        assert_eq!(monitor.get_metrics(), &PerformanceMetrics::default());
    }
}
