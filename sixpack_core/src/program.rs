//! The 30-day program: fixed opening days plus generated progression.
//!
//! Days 1-3 are hand-authored. Days 4-30 are either recovery days
//! (`day % 7 == 3`) or training days whose intensity scales with the week.

use crate::media::exercise_media;
use crate::types::*;
use once_cell::sync::Lazy;

pub const PROGRAM_TITLE: &str = "Six Pack 30";
pub const PROGRAM_DESCRIPTION: &str =
    "A 30-day progressive core program with built-in recovery days.";

/// Rest between exercises, in seconds
const REST_SECONDS: u32 = 30;

/// Plank hold ceiling, in seconds
const MAX_PLANK_SECONDS: u32 = 90;

/// Sets for every reps exercise on a training day
const TRAINING_SETS: u32 = 3;

const RECOVERY_MINUTES: u32 = 10;

const BASE_CRUNCHES: u32 = 15;
const BASE_BICYCLE_CRUNCHES: u32 = 20;
const BASE_LEG_RAISES: u32 = 12;
const BASE_MOUNTAIN_CLIMBERS: u32 = 20;

const PLANK_CUE: &str = "Hold a straight plank position, engaging your core.";
const BICYCLE_CUE: &str = "Alternate bringing opposite elbow to knee.";

/// Cached program - built once and shared
static DEFAULT_PROGRAM: Lazy<Vec<DayWorkout>> = Lazy::new(generate_program);

/// Get a reference to the cached program
pub fn get_default_program() -> &'static [DayWorkout] {
    &DEFAULT_PROGRAM
}

/// Look up a single day in the cached program
pub fn day_workout(day: u32) -> Option<&'static DayWorkout> {
    if !is_valid_day(day) {
        return None;
    }
    get_default_program().get((day - FIRST_DAY) as usize)
}

/// Recovery days fall on every day where `day % 7 == 3`
pub fn is_recovery_day(day: u32) -> bool {
    day % 7 == 3
}

/// Training week a day belongs to, 7 days per week starting at week 1
pub fn week_of(day: u32) -> u32 {
    day.saturating_sub(1) / 7 + 1
}

/// Plank hold for a training week
pub fn plank_seconds(week: u32) -> u32 {
    (30 + week * 10).min(MAX_PLANK_SECONDS)
}

/// Reps for a training week, `floor(base * (1 + week * 0.2))`
pub fn scaled_reps(base: u32, week: u32) -> u32 {
    let multiplier = 1.0 + f64::from(week) * 0.2;
    (f64::from(base) * multiplier).floor() as u32
}

/// Build the full program, days 1 through 30 in order
pub fn generate_program() -> Vec<DayWorkout> {
    let mut days = vec![foundation_day(), building_strength_day(), first_recovery_day()];

    for day in 4..=PROGRAM_DAYS {
        if is_recovery_day(day) {
            days.push(recovery_day(day));
        } else {
            days.push(training_day(day));
        }
    }

    tracing::debug!("Generated program with {} days", days.len());
    days
}

/// Display grouping used by the program overview: five blocks of six days
///
/// These blocks are presentation only and differ from `week_of`.
pub fn display_weeks() -> Vec<(u32, Vec<u32>)> {
    (0..5)
        .map(|index| {
            let start = index * 6 + 1;
            let end = (start + 5).min(PROGRAM_DAYS);
            (index + 1, (start..=end).collect())
        })
        .collect()
}

// ============================================================================
// Exercise builders
// ============================================================================

fn reps(name: &str, sets: u32, reps: u32, description: &str) -> Exercise {
    Exercise {
        name: name.into(),
        kind: ExerciseKind::Reps { sets, reps },
        description: description.into(),
        media: exercise_media(name),
    }
}

fn timed(name: &str, duration_seconds: u32, description: &str) -> Exercise {
    Exercise {
        name: name.into(),
        kind: ExerciseKind::Timed { duration_seconds },
        description: description.into(),
        media: exercise_media(name),
    }
}

fn rest() -> Exercise {
    Exercise {
        name: "Rest".into(),
        kind: ExerciseKind::Rest {
            duration_seconds: REST_SECONDS,
        },
        description: "Take a short break.".into(),
        media: exercise_media("Rest"),
    }
}

// ============================================================================
// Fixed days
// ============================================================================

fn foundation_day() -> DayWorkout {
    DayWorkout {
        day_number: 1,
        title: "Foundation Day".into(),
        description: "Start your journey with basic core exercises to build a foundation.".into(),
        estimated_minutes: 15,
        exercises: vec![
            timed("Plank", 30, PLANK_CUE),
            rest(),
            reps(
                "Crunches",
                2,
                15,
                "Lie on your back and lift your shoulders off the ground.",
            ),
            rest(),
            reps("Leg Raises", 2, 10, "Lie flat and raise your legs to 90 degrees."),
        ],
    }
}

fn building_strength_day() -> DayWorkout {
    DayWorkout {
        day_number: 2,
        title: "Building Strength".into(),
        description: "Increase intensity with more challenging variations.".into(),
        estimated_minutes: 18,
        exercises: vec![
            timed("Plank", 40, PLANK_CUE),
            rest(),
            reps("Bicycle Crunches", 2, 20, BICYCLE_CUE),
            rest(),
            reps(
                "Mountain Climbers",
                2,
                15,
                "Alternate bringing knees to chest in plank position.",
            ),
        ],
    }
}

fn first_recovery_day() -> DayWorkout {
    DayWorkout {
        day_number: 3,
        title: "Rest & Recovery".into(),
        description: "Light stretching and recovery to let your muscles rebuild.".into(),
        estimated_minutes: RECOVERY_MINUTES,
        exercises: vec![
            timed("Cat-Cow Stretch", 60, "Gentle spinal mobility exercise."),
            rest(),
            timed("Child's Pose", 60, "Relaxing stretch for your back and core."),
        ],
    }
}

// ============================================================================
// Generated days
// ============================================================================

fn recovery_day(day: u32) -> DayWorkout {
    DayWorkout {
        day_number: day,
        title: "Active Recovery".into(),
        description: "Light activity to promote recovery and maintain momentum.".into(),
        estimated_minutes: RECOVERY_MINUTES,
        exercises: vec![
            timed("Light Stretching", 120, "Full body stretching routine."),
            rest(),
            timed("Core Breathing", 60, "Deep breathing with core engagement."),
        ],
    }
}

fn training_day(day: u32) -> DayWorkout {
    let week = week_of(day);

    DayWorkout {
        day_number: day,
        title: format!("Day {} - Week {}", day, week),
        description: format!("Progressive training for week {}. Push yourself!", week),
        estimated_minutes: 15 + week * 2,
        exercises: vec![
            timed("Plank", plank_seconds(week), PLANK_CUE),
            rest(),
            reps(
                "Crunches",
                TRAINING_SETS,
                scaled_reps(BASE_CRUNCHES, week),
                "Controlled abdominal crunches.",
            ),
            rest(),
            reps(
                "Bicycle Crunches",
                TRAINING_SETS,
                scaled_reps(BASE_BICYCLE_CRUNCHES, week),
                BICYCLE_CUE,
            ),
            rest(),
            reps(
                "Leg Raises",
                TRAINING_SETS,
                scaled_reps(BASE_LEG_RAISES, week),
                "Controlled leg raises.",
            ),
            rest(),
            reps(
                "Mountain Climbers",
                TRAINING_SETS,
                scaled_reps(BASE_MOUNTAIN_CLIMBERS, week),
                "High-intensity mountain climbers.",
            ),
        ],
    }
}

/// Overview of the program in the progress store's shape
pub fn program_overview() -> ProgramOverview {
    ProgramOverview {
        title: PROGRAM_TITLE.into(),
        description: PROGRAM_DESCRIPTION.into(),
        days: get_default_program().iter().map(Day::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn exercise<'a>(workout: &'a DayWorkout, name: &str) -> &'a Exercise {
        workout
            .exercises
            .iter()
            .find(|e| e.name == name)
            .unwrap_or_else(|| panic!("day {} has no {}", workout.day_number, name))
    }

    #[test]
    fn test_program_covers_every_day_once() {
        let program = generate_program();
        assert_eq!(program.len(), 30);

        let days: BTreeSet<u32> = program.iter().map(|d| d.day_number).collect();
        assert_eq!(days, (1..=30).collect());

        // strictly increasing in generation order
        assert!(program.windows(2).all(|w| w[0].day_number < w[1].day_number));
    }

    #[test]
    fn test_generation_is_stable() {
        assert_eq!(generate_program(), generate_program());
        assert_eq!(generate_program().as_slice(), get_default_program());
    }

    #[test]
    fn test_recovery_days() {
        let program = generate_program();
        let recovery: Vec<u32> = program
            .iter()
            .filter(|d| is_recovery_day(d.day_number))
            .map(|d| d.day_number)
            .collect();
        assert_eq!(recovery, vec![3, 10, 17, 24]);

        for day in program.iter().filter(|d| d.is_recovery()) {
            assert_eq!(day.estimated_minutes, 10);
            assert!(day.exercises.iter().all(|e| !e.kind.is_reps()));
        }
    }

    #[test]
    fn test_week_of() {
        assert_eq!(week_of(1), 1);
        assert_eq!(week_of(7), 1);
        assert_eq!(week_of(8), 2);
        assert_eq!(week_of(28), 4);
        assert_eq!(week_of(29), 5);
        assert_eq!(week_of(30), 5);
    }

    #[test]
    fn test_training_days_follow_week_scaling() {
        for day in generate_program().iter().filter(|d| d.day_number >= 4) {
            if day.is_recovery() {
                continue;
            }
            let week = week_of(day.day_number);

            assert_eq!(
                exercise(day, "Plank").kind,
                ExerciseKind::Timed {
                    duration_seconds: (30 + 10 * week).min(90)
                }
            );
            let crunches = (15.0 * (1.0 + 0.2 * f64::from(week))).floor() as u32;
            assert_eq!(
                exercise(day, "Crunches").kind,
                ExerciseKind::Reps {
                    sets: 3,
                    reps: crunches
                }
            );
            assert_eq!(day.estimated_minutes, 15 + week * 2);
        }
    }

    #[test]
    fn test_training_day_known_values() {
        let day4 = day_workout(4).unwrap();
        assert_eq!(day4.title, "Day 4 - Week 1");
        let kinds: Vec<_> = day4.exercises.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                ExerciseKind::Timed { duration_seconds: 40 },
                ExerciseKind::Rest { duration_seconds: 30 },
                ExerciseKind::Reps { sets: 3, reps: 18 },
                ExerciseKind::Rest { duration_seconds: 30 },
                ExerciseKind::Reps { sets: 3, reps: 24 },
                ExerciseKind::Rest { duration_seconds: 30 },
                ExerciseKind::Reps { sets: 3, reps: 14 },
                ExerciseKind::Rest { duration_seconds: 30 },
                ExerciseKind::Reps { sets: 3, reps: 24 },
            ]
        );

        let day30 = day_workout(30).unwrap();
        assert_eq!(exercise(day30, "Plank").kind.duration_seconds(), Some(80));
        assert_eq!(
            exercise(day30, "Leg Raises").kind,
            ExerciseKind::Reps { sets: 3, reps: 24 }
        );
        assert_eq!(day30.estimated_minutes, 25);

        // week 3 multiplier lands just above 1.6
        assert_eq!(scaled_reps(15, 3), 24);
        assert_eq!(scaled_reps(12, 3), 19);
    }

    #[test]
    fn test_fixed_opening_days() {
        let day1 = day_workout(1).unwrap();
        assert_eq!(day1.title, "Foundation Day");
        assert_eq!(day1.estimated_minutes, 15);
        assert_eq!(
            exercise(day1, "Crunches").kind,
            ExerciseKind::Reps { sets: 2, reps: 15 }
        );

        let day2 = day_workout(2).unwrap();
        assert_eq!(day2.estimated_minutes, 18);
        assert_eq!(exercise(day2, "Plank").kind.duration_seconds(), Some(40));

        let day3 = day_workout(3).unwrap();
        assert_eq!(day3.title, "Rest & Recovery");
        assert_eq!(day3.exercises.len(), 3);
    }

    #[test]
    fn test_media_attached_by_name() {
        let day1 = day_workout(1).unwrap();
        assert!(!exercise(day1, "Plank").media.is_empty());
        assert!(!exercise(day1, "Rest").media.is_empty());

        let day3 = day_workout(3).unwrap();
        assert!(exercise(day3, "Cat-Cow Stretch").media.is_empty());
    }

    #[test]
    fn test_day_workout_out_of_range() {
        assert!(day_workout(0).is_none());
        assert!(day_workout(31).is_none());
    }

    #[test]
    fn test_display_weeks_cover_program() {
        let weeks = display_weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0], (1, vec![1, 2, 3, 4, 5, 6]));
        assert_eq!(weeks[4], (5, vec![25, 26, 27, 28, 29, 30]));

        let all: Vec<u32> = weeks.into_iter().flat_map(|(_, days)| days).collect();
        assert_eq!(all, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn test_overview_matches_program_shape() {
        let overview = program_overview();
        assert_eq!(overview.days.len(), 30);
        assert_eq!(overview.days[0].activity, "Foundation Day");
        assert_eq!(overview.days[9].activity, "Active Recovery");
    }
}
