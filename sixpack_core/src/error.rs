//! Error types for the sixpack_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for sixpack_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Day number outside the challenge
    #[error("Day {0} is not part of the program (expected 1-30)")]
    InvalidDay(u32),

    /// Day range that is inverted or leaves the challenge
    #[error("Invalid day range {start}-{end}")]
    InvalidRange { start: u32, end: u32 },

    /// Operation needs a signed-in user
    #[error("Not signed in: sign in to save your progress")]
    NotAuthenticated,

    /// Rejected profile data
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Attempt to finish a workout with exercises still open
    #[error("Workout incomplete: {completed} of {total} exercises done")]
    WorkoutIncomplete { completed: usize, total: usize },

    /// Progress store failure
    #[error("Store error: {0}")]
    Store(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
