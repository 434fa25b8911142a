//! Tick-driven countdown for timed exercises and rests.
//!
//! The timer owns no clock. Callers drive it by calling `tick` once per
//! elapsed second; stopping is simply not ticking.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountdownTimer {
    initial: u32,
    remaining: u32,
    running: bool,
}

impl CountdownTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            initial: seconds,
            remaining: seconds,
            running: false,
        }
    }

    /// Start counting down; has no effect once the timer reached zero
    pub fn start(&mut self) {
        if self.remaining > 0 {
            self.running = true;
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stop and restore the initial duration
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.initial;
    }

    /// Load a new duration, e.g. when switching exercises
    pub fn set_duration(&mut self, seconds: u32) {
        self.initial = seconds;
        self.reset();
    }

    /// Advance by one second, returning the seconds left
    pub fn tick(&mut self) -> u32 {
        if !self.running {
            return self.remaining;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            tracing::debug!("Countdown of {}s finished", self.initial);
        }
        self.remaining
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Remaining time as `m:ss`
    pub fn format(&self) -> String {
        format_clock(self.remaining)
    }
}

/// Format seconds as `m:ss`
pub fn format_clock(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
