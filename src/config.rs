//! Engine configuration
//!
//! Plain defaults with builder-style overrides, plus an environment overlay
//! used by the headless driver:
//!
//! | Variable | Field |
//! |---|---|
//! | `LIFE3D_SIZE` | `size` |
//! | `LIFE3D_RULE` | `rule` (text form) |
//! | `LIFE3D_SPEED` | `ticks_per_second` |
//! | `LIFE3D_SEED` | `seed` |
//! | `LIFE3D_PARALLEL` | `parallel` (`true`/`false`/`1`/`0`) |

use std::str::FromStr;

use crate::automaton::rule::Rule;
use crate::error::EngineError;
use crate::simulation::clock::DEFAULT_MAX_FRAME_DELTA;

/// Everything needed to build an [`AutomatonEngine`](crate::automaton::AutomatonEngine)
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Interior side length of the cube
    pub size: usize,
    pub rule: Rule,
    pub ticks_per_second: f32,
    /// RNG seed for restarts; `None` draws from the OS
    pub seed: Option<u64>,
    /// Radius of the seeded sphere, in cells
    pub seed_radius: f32,
    /// Probability that a cell inside the sphere starts alive
    pub seed_density: f64,
    /// Longest frame delta honoured by `advance`, in seconds
    pub max_frame_delta: f32,
    /// Compute ticks across threads
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: 64,
            rule: Rule::default(),
            ticks_per_second: 16.0,
            seed: None,
            seed_radius: 3.0,
            seed_density: 0.5,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_speed(mut self, ticks_per_second: f32) -> Self {
        self.ticks_per_second = ticks_per_second;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_seed_radius(mut self, radius: f32) -> Self {
        self.seed_radius = radius;
        self
    }

    pub fn with_seed_density(mut self, density: f64) -> Self {
        self.seed_density = density;
        self
    }

    pub fn with_max_frame_delta(mut self, seconds: f32) -> Self {
        self.max_frame_delta = seconds;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Defaults overlaid with `LIFE3D_*` environment variables
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`, keyed by variable name
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup("LIFE3D_SIZE") {
            config.size = parse_var("LIFE3D_SIZE", &value)?;
        }
        if let Some(value) = lookup("LIFE3D_RULE") {
            config.rule = value.parse()?;
        }
        if let Some(value) = lookup("LIFE3D_SPEED") {
            config.ticks_per_second = parse_var("LIFE3D_SPEED", &value)?;
        }
        if let Some(value) = lookup("LIFE3D_SEED") {
            config.seed = Some(parse_var("LIFE3D_SEED", &value)?);
        }
        if let Some(value) = lookup("LIFE3D_PARALLEL") {
            config.parallel = match value.trim() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(EngineError::InvalidEnv {
                        key: "LIFE3D_PARALLEL",
                        value,
                    })
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Check every field before an engine is built
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.size == 0 {
            return Err(EngineError::ZeroSize);
        }
        if !self.ticks_per_second.is_finite() || self.ticks_per_second <= 0.0 {
            return Err(EngineError::InvalidSpeed(self.ticks_per_second));
        }
        if !self.seed_radius.is_finite() || self.seed_radius < 0.0 {
            return Err(EngineError::InvalidSeedRadius(self.seed_radius));
        }
        if !(0.0..=1.0).contains(&self.seed_density) {
            return Err(EngineError::InvalidSeedDensity(self.seed_density));
        }
        if !self.max_frame_delta.is_finite() || self.max_frame_delta <= 0.0 {
            return Err(EngineError::InvalidFrameDelta(self.max_frame_delta));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: &str) -> Result<T, EngineError> {
    value.trim().parse().map_err(|_| EngineError::InvalidEnv {
        key,
        value: value.to_string(),
    })
}
