//! Workout difficulty inference.
//!
//! Score = volume x intensity x exercise difficulty, where
//! - volume = (exercises x circuits x sets) / 10
//! - intensity = work / rest (1 when rest is zero)
//! - exercise difficulty = mean weight of the exercise labels (1-3), or 1.5
//!   when no labels are known
//!
//! Tiers: beginner < 5 <= intermediate <= 12 < advanced.

use crate::{Difficulty, GeneratedWorkout};
use std::collections::HashSet;

/// Exercise multiplier used when no per-exercise labels are supplied
pub const DEFAULT_EXERCISE_MULTIPLIER: f64 = 1.5;

/// Stand-ins for timing a user-built workout leaves unset
pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_WORK_SECONDS: u32 = 30;
pub const DEFAULT_REST_SECONDS: u32 = 30;

pub const INTERMEDIATE_THRESHOLD: f64 = 5.0;
pub const ADVANCED_THRESHOLD: f64 = 12.0;

/// Weight of a free-form difficulty label; unknown labels count as intermediate
pub fn label_weight(label: &str) -> f64 {
    label
        .parse::<Difficulty>()
        .map(Difficulty::weight)
        .unwrap_or_else(|_| Difficulty::Intermediate.weight())
}

/// Raw difficulty score
pub fn difficulty_score<S: AsRef<str>>(
    total_exercises: u32,
    circuits: u32,
    sets: u32,
    work_seconds: u32,
    rest_seconds: u32,
    exercise_difficulties: Option<&[S]>,
) -> f64 {
    let volume = f64::from(total_exercises) * f64::from(circuits) * f64::from(sets) / 10.0;

    let intensity = if rest_seconds > 0 {
        f64::from(work_seconds) / f64::from(rest_seconds)
    } else {
        1.0
    };

    let exercise_multiplier = match exercise_difficulties {
        Some(labels) if !labels.is_empty() => {
            labels.iter().map(|l| label_weight(l.as_ref())).sum::<f64>() / labels.len() as f64
        }
        _ => DEFAULT_EXERCISE_MULTIPLIER,
    };

    volume * intensity * exercise_multiplier
}

/// Map a score onto a tier; both thresholds are inclusive for intermediate
pub fn tier_for_score(score: f64) -> Difficulty {
    if score > ADVANCED_THRESHOLD {
        Difficulty::Advanced
    } else if score >= INTERMEDIATE_THRESHOLD {
        Difficulty::Intermediate
    } else {
        Difficulty::Beginner
    }
}

/// Infer a difficulty tier from workout volume and intensity
pub fn classify_difficulty<S: AsRef<str>>(
    total_exercises: u32,
    circuits: u32,
    sets: u32,
    work_seconds: u32,
    rest_seconds: u32,
    exercise_difficulties: Option<&[S]>,
) -> Difficulty {
    let score = difficulty_score(
        total_exercises,
        circuits,
        sets,
        work_seconds,
        rest_seconds,
        exercise_difficulties,
    );
    let tier = tier_for_score(score);
    tracing::debug!("Difficulty score {:.2} -> {}", score, tier);
    tier
}

/// Classify an assembled workout
///
/// Uses the distinct exercise count, the number of circuits, and the first
/// circuit's sets and timing. The labels of the distinct exercises feed the
/// exercise multiplier. Missing or zero sets, work and rest fall back to
/// 3 sets of 30s work and 30s rest.
pub fn classify_workout(workout: &GeneratedWorkout) -> Difficulty {
    let mut seen = HashSet::new();
    let labels: Vec<&str> = workout
        .circuits
        .iter()
        .flat_map(|c| &c.exercises)
        .filter(|e| seen.insert(e.exercise_id.as_str()))
        .map(|e| e.difficulty.as_str())
        .collect();

    let first_circuit = workout.circuits.first();
    let first_exercise = first_circuit.and_then(|c| c.exercises.first());

    let sets = or_default(first_circuit.map(|c| c.sets), DEFAULT_SETS);
    let work = or_default(
        first_exercise.and_then(|e| e.duration_seconds),
        DEFAULT_WORK_SECONDS,
    );
    let rest = or_default(
        first_exercise.map(|e| e.rest_after_seconds),
        DEFAULT_REST_SECONDS,
    );

    classify_difficulty(
        labels.len() as u32,
        workout.circuits.len() as u32,
        sets,
        work,
        rest,
        Some(labels.as_slice()),
    )
}

/// Zero counts as unset
pub(crate) fn or_default(value: Option<u32>, default: u32) -> u32 {
    value.filter(|v| *v > 0).unwrap_or(default)
}
