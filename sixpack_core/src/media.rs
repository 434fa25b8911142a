//! Demonstration media lookup for exercises.
//!
//! Media is resolved by exact exercise name. Names without an entry (the
//! stretching and breathing drills) simply carry no media.

use crate::ExerciseMedia;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const ASSET_ROOT: &str = "/assets/generated";

/// Exercise name to asset slug
const MEDIA_SLUGS: &[(&str, &str)] = &[
    ("Plank", "plank"),
    ("Crunches", "crunches"),
    ("Bicycle Crunches", "bicycle-crunches"),
    ("Mountain Climbers", "mountain-climbers"),
    ("Leg Raises", "leg-raises"),
    ("Rest", "rest"),
];

static MEDIA_TABLE: Lazy<HashMap<&'static str, ExerciseMedia>> = Lazy::new(|| {
    MEDIA_SLUGS
        .iter()
        .map(|(name, slug)| {
            let media = ExerciseMedia {
                image_ref: Some(format!("{}/exercise-{}.dim_800x450.png", ASSET_ROOT, slug)),
                video_ref: Some(format!("{}/exercise-{}-demo.mp4", ASSET_ROOT, slug)),
            };
            (*name, media)
        })
        .collect()
});

/// Look up media for an exercise name, empty when the name is unknown
pub fn exercise_media(name: &str) -> ExerciseMedia {
    MEDIA_TABLE.get(name).cloned().unwrap_or_default()
}
