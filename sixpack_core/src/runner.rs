//! Guided workout runner for a single session.
//!
//! Tracks which exercises of one day have been done and drives a countdown
//! for timed work. Nothing here is persisted until `complete_day` succeeds.

use crate::program::day_workout;
use crate::store::ProgressStore;
use crate::timer::CountdownTimer;
use crate::types::{DayWorkout, Exercise, UserId};
use crate::{Error, Result};
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
pub struct WorkoutRunner<'a> {
    workout: &'a DayWorkout,
    current: usize,
    completed: BTreeSet<usize>,
    timer: CountdownTimer,
    auto_advance: bool,
    saved: bool,
}

impl<'a> WorkoutRunner<'a> {
    /// Start a runner over a workout; the first exercise is selected
    pub fn new(workout: &'a DayWorkout) -> Result<Self> {
        let first = workout.exercises.first().ok_or_else(|| {
            Error::Other(format!("Day {} has no exercises", workout.day_number))
        })?;

        Ok(Self {
            workout,
            current: 0,
            completed: BTreeSet::new(),
            timer: CountdownTimer::new(countdown_for(first)),
            auto_advance: true,
            saved: false,
        })
    }

    /// Runner over a day of the built-in program
    pub fn for_day(day: u32) -> Result<WorkoutRunner<'static>> {
        let workout = day_workout(day).ok_or(Error::InvalidDay(day))?;
        WorkoutRunner::new(workout)
    }

    /// Whether completing an exercise moves on to the next one
    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    pub fn workout(&self) -> &'a DayWorkout {
        self.workout
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_exercise(&self) -> &'a Exercise {
        &self.workout.exercises[self.current]
    }

    pub fn exercise_count(&self) -> usize {
        self.workout.exercises.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.exercise_count()
    }

    /// Jump to an exercise, clamped to the workout
    ///
    /// The timer is paused and reloaded with the new exercise's duration.
    pub fn select(&mut self, index: usize) {
        let index = index.min(self.exercise_count() - 1);
        self.timer.pause();
        self.current = index;
        self.timer.set_duration(countdown_for(self.current_exercise()));
    }

    pub fn previous(&mut self) {
        self.select(self.current.saturating_sub(1));
    }

    pub fn next(&mut self) {
        self.select(self.current + 1);
    }

    /// Flip completion of the current exercise
    ///
    /// With auto-advance on, moves to the next exercise unless this is the
    /// last one. Returns whether the exercise is now complete.
    pub fn toggle_current(&mut self) -> bool {
        let done = if self.completed.remove(&self.current) {
            false
        } else {
            self.completed.insert(self.current);
            true
        };

        if self.auto_advance && !self.is_last() {
            self.next();
        }
        done
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Share of exercises done, 0.0 to 100.0
    pub fn progress_percentage(&self) -> f64 {
        self.completed.len() as f64 / self.exercise_count() as f64 * 100.0
    }

    pub fn all_complete(&self) -> bool {
        self.completed.len() == self.exercise_count()
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut CountdownTimer {
        &mut self.timer
    }

    /// Whether the day was saved to the store in this session
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Record the day as complete in the store
    ///
    /// Every exercise must be done first. If the store rejects the write the
    /// runner is left exactly as it was.
    pub fn complete_day(&mut self, store: &mut impl ProgressStore, user: &UserId) -> Result<()> {
        if !self.all_complete() {
            return Err(Error::WorkoutIncomplete {
                completed: self.completed_count(),
                total: self.exercise_count(),
            });
        }

        store.mark_day_complete(user, self.workout.day_number)?;
        self.saved = true;
        tracing::info!("Workout for day {} saved", self.workout.day_number);
        Ok(())
    }
}

fn countdown_for(exercise: &Exercise) -> u32 {
    exercise.kind.duration_seconds().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;
    use crate::types::*;
    use chrono::{DateTime, Utc};
    use std::collections::BTreeMap;
    use uuid::Uuid;

    /// Store whose writes always fail
    struct OfflineStore;

    impl ProgressStore for OfflineStore {
        fn register(&mut self, _user: &UserId) -> Result<UserRole> {
            Err(Error::Store("offline".into()))
        }

        fn role(&self, _user: Option<&UserId>) -> Result<UserRole> {
            Ok(UserRole::Guest)
        }

        fn completion_log(&self, _user: &UserId) -> Result<BTreeMap<u32, DateTime<Utc>>> {
            Err(Error::Store("offline".into()))
        }

        fn mark_day_complete(&mut self, _user: &UserId, _day: u32) -> Result<()> {
            Err(Error::Store("offline".into()))
        }

        fn reset_progress(&mut self, _user: &UserId) -> Result<()> {
            Err(Error::Store("offline".into()))
        }

        fn profile(&self, _user: &UserId) -> Result<Option<UserProfile>> {
            Ok(None)
        }

        fn save_profile(&mut self, _user: &UserId, _profile: UserProfile) -> Result<()> {
            Err(Error::Store("offline".into()))
        }
    }

    fn finish_all(runner: &mut WorkoutRunner) {
        for index in 0..runner.exercise_count() {
            if !runner.is_completed(index) {
                runner.select(index);
                runner.toggle_current();
            }
        }
    }

    #[test]
    fn test_starts_on_first_exercise_with_its_timer() {
        let runner = WorkoutRunner::for_day(1).unwrap();
        assert_eq!(runner.current_index(), 0);
        assert_eq!(runner.current_exercise().name, "Plank");
        assert_eq!(runner.timer().remaining(), 30);
        assert_eq!(runner.completed_count(), 0);
    }

    #[test]
    fn test_for_day_out_of_range() {
        assert!(matches!(WorkoutRunner::for_day(0), Err(Error::InvalidDay(0))));
        assert!(matches!(WorkoutRunner::for_day(31), Err(Error::InvalidDay(31))));
    }

    #[test]
    fn test_navigation_is_clamped_and_reloads_timer() {
        let mut runner = WorkoutRunner::for_day(4).unwrap();
        runner.previous();
        assert_eq!(runner.current_index(), 0);

        runner.timer_mut().start();
        runner.timer_mut().tick();
        runner.next();
        assert_eq!(runner.current_exercise().name, "Rest");
        assert_eq!(runner.timer().remaining(), 30);
        assert!(!runner.timer().is_running());

        // reps exercises carry no countdown
        runner.next();
        assert_eq!(runner.current_exercise().name, "Crunches");
        assert!(runner.timer().is_complete());

        runner.select(100);
        assert!(runner.is_last());
        runner.next();
        assert_eq!(runner.current_index(), 8);
    }

    #[test]
    fn test_toggle_advances_and_untoggles() {
        let mut runner = WorkoutRunner::for_day(1).unwrap();
        assert!(runner.toggle_current());
        assert!(runner.is_completed(0));
        assert_eq!(runner.current_index(), 1);

        runner.select(0);
        assert!(!runner.toggle_current());
        assert!(!runner.is_completed(0));
    }

    #[test]
    fn test_toggle_without_auto_advance_stays_put() {
        let mut runner = WorkoutRunner::for_day(1).unwrap().with_auto_advance(false);
        runner.toggle_current();
        assert_eq!(runner.current_index(), 0);
    }

    #[test]
    fn test_last_exercise_does_not_advance() {
        let mut runner = WorkoutRunner::for_day(3).unwrap();
        runner.select(2);
        runner.toggle_current();
        assert_eq!(runner.current_index(), 2);
    }

    #[test]
    fn test_progress_percentage() {
        let mut runner = WorkoutRunner::for_day(3).unwrap();
        assert_eq!(runner.progress_percentage(), 0.0);
        runner.toggle_current();
        assert!((runner.progress_percentage() - 100.0 / 3.0).abs() < 1e-9);
        finish_all(&mut runner);
        assert_eq!(runner.progress_percentage(), 100.0);
    }

    #[test]
    fn test_complete_day_requires_all_exercises() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::in_dir(temp_dir.path());
        let user = Uuid::new_v4();
        store.register(&user).unwrap();

        let mut runner = WorkoutRunner::for_day(2).unwrap();
        runner.toggle_current();
        assert!(matches!(
            runner.complete_day(&mut store, &user),
            Err(Error::WorkoutIncomplete {
                completed: 1,
                total: 5
            })
        ));
        assert!(store.completed_days(&user).unwrap().is_empty());

        finish_all(&mut runner);
        runner.complete_day(&mut store, &user).unwrap();
        assert!(runner.is_saved());
        assert!(store.day_progress(&user, 2).unwrap().completed);
    }

    #[test]
    fn test_store_failure_leaves_runner_unsaved() {
        let mut runner = WorkoutRunner::for_day(3).unwrap();
        finish_all(&mut runner);

        let result = runner.complete_day(&mut OfflineStore, &Uuid::new_v4());
        assert!(matches!(result, Err(Error::Store(_))));
        assert!(!runner.is_saved());
        assert!(runner.all_complete());
    }
}
