//! Error types for the life3d engine

use thiserror::Error;

/// Failures while parsing the `<survive>/<born>/<states>` rule text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("Expected 3 '/'-separated sections, got {0}")]
    SectionCount(usize),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Invalid range '{0}': start is greater than end")]
    InvertedRange(String),

    #[error("Neighbour count {0} is outside 0..=26")]
    CountOutOfRange(u32),

    #[error("State count must be at least 2, got {0}")]
    TooFewStates(u32),

    #[error("State count {0} does not fit in a cell")]
    TooManyStates(u32),
}

/// Core engine errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Grid size must be positive")]
    ZeroSize,

    #[error("Grid size {0} is too large")]
    SizeTooLarge(usize),

    #[error("Max age must be at least 1")]
    ZeroMaxAge,

    #[error("Neighbour count {0} is outside 0..=26")]
    CountOutOfRange(u8),

    #[error("Tick rate must be a positive finite number, got {0}")]
    InvalidSpeed(f32),

    #[error("Seed radius must be a non-negative finite number, got {0}")]
    InvalidSeedRadius(f32),

    #[error("Seed density must be within 0..=1, got {0}")]
    InvalidSeedDensity(f64),

    #[error("Max frame delta must be a positive finite number, got {0}")]
    InvalidFrameDelta(f32),

    #[error("Cell ({x}, {y}, {z}) is outside a grid of size {size}")]
    OutOfBounds {
        x: usize,
        y: usize,
        z: usize,
        size: usize,
    },

    #[error("State {state} exceeds max age {max_age}")]
    StateOutOfRange { state: u8, max_age: u8 },

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleParseError),

    #[error("Invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Failures while parsing a text command
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("Command '{0}' requires an argument")]
    MissingArgument(&'static str),

    #[error("Invalid speed '{0}'")]
    InvalidSpeed(String),

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleParseError),
}
