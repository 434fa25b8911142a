#![forbid(unsafe_code)]

//! Core domain model and business logic for the Six Pack 30 challenge.
//!
//! This crate provides:
//! - Domain types (exercises, day workouts, progress, profiles)
//! - The 30-day program generator and exercise media
//! - Progress statistics (next day, streak, completion)
//! - Workout runner and countdown timer
//! - Progress store, session and CSV export

pub mod types;
pub mod error;
pub mod media;
pub mod program;
pub mod progress;
pub mod timer;
pub mod runner;
pub mod store;
pub mod session;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use program::{day_workout, display_weeks, generate_program, get_default_program};
pub use progress::{completion_percentage, next_incomplete_day, streak, ProgressSummary};
pub use timer::CountdownTimer;
pub use runner::WorkoutRunner;
pub use store::{LocalStore, ProgressStore};
pub use session::Session;
pub use export::export_progress;
pub use config::Config;
