//! Aggregate workout figures derived from assembled circuits.

use crate::{CircuitDefinition, WorkoutMetadata};
use std::collections::HashSet;

/// Assumed burn at 100% intensity for an average adult, in kcal per minute
pub const BASE_CALORIES_PER_MINUTE: f64 = 10.0;

/// Coverage summary: distinct exercises, categories and muscles touched
///
/// Categories and muscles are listed in order of first appearance.
pub fn calculate_metadata(circuits: &[CircuitDefinition]) -> WorkoutMetadata {
    let mut exercise_ids = HashSet::new();
    let mut categories = Vec::new();
    let mut muscles: Vec<String> = Vec::new();
    let mut seen_muscles = HashSet::new();

    for selection in circuits.iter().flat_map(|c| &c.exercises) {
        exercise_ids.insert(selection.exercise_id.as_str());
        if !categories.contains(&selection.category) {
            categories.push(selection.category);
        }
        for muscle in selection
            .primary_muscles
            .iter()
            .chain(&selection.secondary_muscles)
        {
            if seen_muscles.insert(muscle.as_str()) {
                muscles.push(muscle.clone());
            }
        }
    }

    WorkoutMetadata {
        exercises_used: exercise_ids.len(),
        categories_used: categories,
        muscle_groups_covered: muscles,
    }
}

/// Seconds needed for one circuit, all sets included
///
/// Each set is the sum of work plus post-exercise rest; the rest between
/// sets is added after every set but the last.
pub fn circuit_seconds(circuit: &CircuitDefinition) -> u64 {
    let per_set: u64 = circuit
        .exercises
        .iter()
        .map(|e| u64::from(e.duration_seconds.unwrap_or(0)) + u64::from(e.rest_after_seconds))
        .sum();
    let sets = u64::from(circuit.sets);
    let between_sets = sets.saturating_sub(1) * u64::from(circuit.rest_between_sets_seconds);

    per_set * sets + between_sets
}

/// Total workout duration in whole minutes, rounded up
pub fn total_duration_minutes(circuits: &[CircuitDefinition]) -> u32 {
    let total: u64 = circuits.iter().map(circuit_seconds).sum();
    u32::try_from(total.div_ceil(60)).unwrap_or(u32::MAX)
}

/// Rough calorie estimate: minutes x 10 kcal x intensity
pub fn estimate_calories(duration_minutes: u32, intensity_percentage: u8) -> u32 {
    let intensity = f64::from(intensity_percentage) / 100.0;
    (f64::from(duration_minutes) * BASE_CALORIES_PER_MINUTE * intensity).round() as u32
}
