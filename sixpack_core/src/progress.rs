//! Statistics derived from a user's set of completed days.
//!
//! All functions are pure. Day numbers outside 1-30 are ignored and
//! duplicates collapse, so `[1, 1, 2]` behaves like `{1, 2}`.

use crate::types::{is_valid_day, FIRST_DAY, PROGRAM_DAYS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Normalize raw day numbers into the in-range, de-duplicated set
pub fn normalize<'a>(completed: impl IntoIterator<Item = &'a u32>) -> BTreeSet<u32> {
    let mut days = BTreeSet::new();
    for &day in completed {
        if is_valid_day(day) {
            days.insert(day);
        } else {
            tracing::warn!("Ignoring out-of-range day number {}", day);
        }
    }
    days
}

/// Smallest day not yet completed, `None` once all 30 are done
pub fn next_incomplete_day<'a>(completed: impl IntoIterator<Item = &'a u32>) -> Option<u32> {
    let days = normalize(completed);
    (FIRST_DAY..=PROGRAM_DAYS).find(|day| !days.contains(day))
}

/// Length of the consecutive run ending at the highest completed day
///
/// This is the trailing run only: `{1, 2, 3, 10}` gives 1, not 3.
pub fn streak<'a>(completed: impl IntoIterator<Item = &'a u32>) -> u32 {
    let days = normalize(completed);
    let Some(&last) = days.iter().next_back() else {
        return 0;
    };

    let mut count = 1;
    let mut day = last;
    while day > FIRST_DAY && days.contains(&(day - 1)) {
        count += 1;
        day -= 1;
    }
    count
}

/// Share of the program completed, rounded half-up to a whole percent
pub fn completion_percentage<'a>(completed: impl IntoIterator<Item = &'a u32>) -> u32 {
    let count = normalize(completed).len() as u32;
    // count * 100 / 30 never lands exactly on .5, so integer rounding is exact
    (count * 100 + PROGRAM_DAYS / 2) / PROGRAM_DAYS
}

/// Everything the dashboard shows, derived in one pass
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed_count: u32,
    pub remaining_count: u32,
    pub next_incomplete_day: Option<u32>,
    pub streak: u32,
    pub completion_percentage: u32,
    pub all_complete: bool,
}

impl ProgressSummary {
    pub fn from_completed<'a>(completed: impl IntoIterator<Item = &'a u32>) -> Self {
        let days = normalize(completed);
        let completed_count = days.len() as u32;

        ProgressSummary {
            completed_count,
            remaining_count: PROGRAM_DAYS.saturating_sub(completed_count),
            next_incomplete_day: next_incomplete_day(&days),
            streak: streak(&days),
            completion_percentage: completion_percentage(&days),
            all_complete: completed_count == PROGRAM_DAYS,
        }
    }
}
