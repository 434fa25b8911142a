//! Core domain types for the Six Pack 30 challenge.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and their kinds (reps, timed, rest)
//! - Day workouts making up the 30-day program
//! - Progress store shapes (program overview, day progress, stats)
//! - User profiles and roles

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of days in the challenge
pub const PROGRAM_DAYS: u32 = 30;

/// First day of the challenge
pub const FIRST_DAY: u32 = 1;

/// Whether a day number falls inside the challenge (1..=30)
pub fn is_valid_day(day: u32) -> bool {
    (FIRST_DAY..=PROGRAM_DAYS).contains(&day)
}

// ============================================================================
// Exercise Types
// ============================================================================

/// What kind of work an exercise is, carrying only the fields that kind needs
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Repetition-based work (e.g., 3 sets of 18 crunches)
    Reps { sets: u32, reps: u32 },
    /// Held or continuous work measured in seconds (e.g., plank)
    Timed { duration_seconds: u32 },
    /// A timed break between exercises
    Rest { duration_seconds: u32 },
}

impl ExerciseKind {
    /// Countdown length for timed and rest work, `None` for reps
    pub fn duration_seconds(&self) -> Option<u32> {
        match self {
            ExerciseKind::Timed { duration_seconds } | ExerciseKind::Rest { duration_seconds } => {
                Some(*duration_seconds)
            }
            ExerciseKind::Reps { .. } => None,
        }
    }

    pub fn is_reps(&self) -> bool {
        matches!(self, ExerciseKind::Reps { .. })
    }
}

/// Optional demonstration media for an exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExerciseMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_ref: Option<String>,
}

impl ExerciseMedia {
    pub fn is_empty(&self) -> bool {
        self.image_ref.is_none() && self.video_ref.is_none()
    }
}

/// One unit of work within a day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    #[serde(flatten)]
    pub kind: ExerciseKind,
    pub description: String,
    #[serde(flatten)]
    pub media: ExerciseMedia,
}

impl Exercise {
    /// Short quantity label, e.g. `3 × 18`, `40s` or `Rest 30s`
    pub fn summary(&self) -> String {
        match &self.kind {
            ExerciseKind::Reps { sets, reps } => format!("{} × {}", sets, reps),
            ExerciseKind::Timed { duration_seconds } => format!("{}s", duration_seconds),
            ExerciseKind::Rest { duration_seconds } => format!("Rest {}s", duration_seconds),
        }
    }
}

// ============================================================================
// Day Workout Types
// ============================================================================

/// One day's full routine, exercises in execution order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayWorkout {
    pub day_number: u32,
    pub title: String,
    pub description: String,
    pub estimated_minutes: u32,
    pub exercises: Vec<Exercise>,
}

impl DayWorkout {
    /// Recovery days contain no reps-based work
    pub fn is_recovery(&self) -> bool {
        crate::program::is_recovery_day(self.day_number)
    }
}

// ============================================================================
// Progress Store Types
// ============================================================================

/// Day entry as exposed by the progress store
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Day {
    pub day_number: u32,
    pub activity: String,
    pub description: String,
}

impl From<&DayWorkout> for Day {
    fn from(workout: &DayWorkout) -> Self {
        Day {
            day_number: workout.day_number,
            activity: workout.title.clone(),
            description: workout.description.clone(),
        }
    }
}

/// Program overview as exposed by the progress store
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramOverview {
    pub title: String,
    pub description: String,
    pub days: Vec<Day>,
}

/// Completion flag for a single day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayProgress {
    pub day_number: u32,
    pub completed: bool,
}

/// Aggregate counts for a user's run through the program
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramStats {
    pub total_days: u32,
    pub completed_count: u32,
    pub remaining_count: u32,
}

// ============================================================================
// Identity Types
// ============================================================================

/// Opaque identity of a signed-in user
pub type UserId = Uuid;

/// Display profile saved by a user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
}

/// Access role assigned to a caller
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}
