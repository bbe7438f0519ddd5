//! Request flows.
//!
//! - Quick start: one tap, everything from stored preferences or defaults
//! - Curated: caller picks the objective and may override anything
//! - Custom build: the user picks every exercise; nothing is generated

use crate::difficulty::{
    classify_workout, or_default, DEFAULT_REST_SECONDS, DEFAULT_SETS, DEFAULT_WORK_SECONDS,
};
use crate::gateway::{ExerciseCatalogGateway, ExerciseFilter, ObjectiveGateway};
use crate::metadata::{calculate_metadata, estimate_calories, total_duration_minutes};
use crate::{
    CircuitDefinition, Constraints, Difficulty, Error, ExerciseSelection, GeneratedWorkout,
    GenerationResult, Objective, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Objective used when the user states no matching goal
pub const DEFAULT_OBJECTIVE_SLUG: &str = "fat-burn-weight-loss";

/// Session length for the quick-start flow when none is stored
pub const DEFAULT_QUICK_DURATION_MINUTES: u32 = 20;

/// Rest between sets of a user-built circuit when none is given
pub const DEFAULT_REST_BETWEEN_SETS_SECONDS: u32 = 60;

/// Calorie intensity for user-built workouts without an objective
pub const DEFAULT_CUSTOM_INTENSITY_PERCENTAGE: u8 = 75;

/// Goal keyword -> objective slug, checked in this order
const GOAL_OBJECTIVES: [(&str, &str); 5] = [
    ("lose_weight", "fat-burn-weight-loss"),
    ("build_muscle", "strength-building"),
    ("improve_cardio", "cardiovascular-conditioning"),
    ("increase_flexibility", "flexibility-mobility"),
    ("improve_endurance", "muscle-endurance"),
];

/// Stored training preferences of a user
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserPreferences {
    #[serde(default)]
    pub fitness_goals: Vec<String>,
    #[serde(default)]
    pub default_difficulty: Option<Difficulty>,
    #[serde(default)]
    pub available_equipment: Option<Vec<String>>,
    #[serde(default)]
    pub small_space: Option<bool>,
    #[serde(default)]
    pub quiet: Option<bool>,
    #[serde(default)]
    pub workout_duration: Option<u32>,
}

/// Pick the objective slug that best matches the stated goals
pub fn objective_slug_for_goals<S: AsRef<str>>(goals: &[S]) -> &'static str {
    GOAL_OBJECTIVES
        .iter()
        .find(|(goal, _)| goals.iter().any(|g| g.as_ref() == *goal))
        .map(|(_, slug)| *slug)
        .unwrap_or(DEFAULT_OBJECTIVE_SLUG)
}

fn bodyweight_only() -> Vec<String> {
    vec!["bodyweight".to_string()]
}

/// Constraints for the quick-start flow
///
/// Small-space and quiet default to on unless the user turned them off.
pub fn quick_start_constraints(prefs: &UserPreferences) -> Constraints {
    Constraints {
        difficulty: Some(prefs.default_difficulty.unwrap_or(Difficulty::Beginner)),
        available_equipment: Some(
            prefs
                .available_equipment
                .clone()
                .unwrap_or_else(bodyweight_only),
        ),
        small_space: Some(prefs.small_space != Some(false)),
        quiet: Some(prefs.quiet != Some(false)),
        duration_minutes: Some(prefs.workout_duration.unwrap_or(DEFAULT_QUICK_DURATION_MINUTES)),
        ..Default::default()
    }
}

/// Constraints for the curated flow: custom values, then preferences, then defaults
///
/// Structural overrides and exercise inclusion/exclusion only ever come from
/// `custom`.
pub fn curated_constraints(
    custom: &Constraints,
    prefs: &UserPreferences,
    objective: &Objective,
) -> Constraints {
    Constraints {
        difficulty: Some(
            custom
                .difficulty
                .or(prefs.default_difficulty)
                .unwrap_or(Difficulty::Intermediate),
        ),
        available_equipment: Some(
            custom
                .available_equipment
                .clone()
                .or_else(|| prefs.available_equipment.clone())
                .unwrap_or_else(bodyweight_only),
        ),
        small_space: Some(custom.small_space.unwrap_or(prefs.small_space != Some(false))),
        quiet: Some(custom.quiet.unwrap_or(prefs.quiet != Some(false))),
        duration_minutes: custom
            .duration_minutes
            .or(prefs.workout_duration)
            .or(objective.recommended_duration_minutes),
        circuits: custom.circuits,
        exercises_per_circuit: custom.exercises_per_circuit,
        interval_seconds: custom.interval_seconds,
        rest_seconds: custom.rest_seconds,
        sets: custom.sets,
        excluded_exercises: custom.excluded_exercises.clone(),
        included_exercises: custom.included_exercises.clone(),
    }
}

/// One circuit of a user-built workout
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomCircuit {
    pub exercise_ids: Vec<String>,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub interval_seconds: Option<u32>,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    #[serde(default)]
    pub rest_between_sets_seconds: Option<u32>,
}

/// A workout assembled by hand
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomWorkoutRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Objective id or slug
    #[serde(default)]
    pub objective_id: Option<String>,
    /// Inferred from volume and intensity when absent
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub circuits: Vec<CustomCircuit>,
}

/// Validate and assemble a user-built workout
///
/// Unset or zero timing falls back to 3 sets of 30s work and 30s rest with
/// 60s between sets. Unknown or deleted exercise ids are rejected.
pub fn build_custom_workout<C, O>(
    catalog: &C,
    objectives: &O,
    request: &CustomWorkoutRequest,
) -> Result<GenerationResult>
where
    C: ExerciseCatalogGateway + ?Sized,
    O: ObjectiveGateway + ?Sized,
{
    if request.name.trim().is_empty() {
        return Err(Error::InvalidWorkout("a name is required".into()));
    }
    if request.circuits.is_empty() {
        return Err(Error::InvalidWorkout("at least one circuit is required".into()));
    }
    if let Some(i) = request.circuits.iter().position(|c| c.exercise_ids.is_empty()) {
        return Err(Error::InvalidWorkout(format!(
            "circuit {} has no exercises",
            i + 1
        )));
    }

    let objective = match &request.objective_id {
        Some(key) => Some(resolve_objective(objectives, key)?),
        None => None,
    };

    let mut ids: Vec<String> = Vec::new();
    for id in request.circuits.iter().flat_map(|c| &c.exercise_ids) {
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
    let filter = ExerciseFilter {
        included_ids: ids.clone(),
        ..Default::default()
    };
    let found: HashMap<String, _> = catalog
        .query(&filter)?
        .into_iter()
        .map(|e| (e.id.clone(), e))
        .collect();

    let missing: Vec<&str> = ids
        .iter()
        .filter(|id| !found.contains_key(*id))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(Error::InvalidWorkout(format!(
            "unknown exercises: {}",
            missing.join(", ")
        )));
    }

    let circuits: Vec<CircuitDefinition> = request
        .circuits
        .iter()
        .zip(1..)
        .map(|(circuit, circuit_number)| {
            let work = or_default(circuit.interval_seconds, DEFAULT_WORK_SECONDS);
            let rest = or_default(circuit.rest_seconds, DEFAULT_REST_SECONDS);
            CircuitDefinition {
                circuit_number,
                exercises: circuit
                    .exercise_ids
                    .iter()
                    .filter_map(|id| found.get(id))
                    .map(|e| ExerciseSelection::timed(e, work, rest))
                    .collect(),
                sets: or_default(circuit.sets, DEFAULT_SETS),
                rest_between_sets_seconds: or_default(
                    circuit.rest_between_sets_seconds,
                    DEFAULT_REST_BETWEEN_SETS_SECONDS,
                ),
            }
        })
        .collect();

    let total_duration_minutes = total_duration_minutes(&circuits);
    let intensity = objective
        .as_ref()
        .map_or(DEFAULT_CUSTOM_INTENSITY_PERCENTAGE, |o| o.intensity_percentage);
    let metadata = calculate_metadata(&circuits);

    let mut workout = GeneratedWorkout {
        name: request.name.trim().to_string(),
        description: request.description.clone(),
        objective_id: objective.map(|o| o.id).unwrap_or_default(),
        circuits,
        total_duration_minutes,
        estimated_calories: estimate_calories(total_duration_minutes, intensity),
        difficulty: Difficulty::Intermediate,
    };
    workout.difficulty = match request.difficulty {
        Some(difficulty) => difficulty,
        None => classify_workout(&workout),
    };

    tracing::info!(
        "Built '{}': {} circuits, {} exercises, {} min, {}",
        workout.name,
        workout.circuits.len(),
        metadata.exercises_used,
        workout.total_duration_minutes,
        workout.difficulty
    );

    Ok(GenerationResult {
        workout,
        metadata,
        under_filled_circuits: Vec::new(),
    })
}

fn resolve_objective<O: ObjectiveGateway + ?Sized>(objectives: &O, key: &str) -> Result<Objective> {
    if let Some(objective) = objectives.find_by_id(key)? {
        return Ok(objective);
    }
    objectives
        .find_by_slug(key)?
        .ok_or_else(|| Error::ObjectiveNotFound(key.to_string()))
}
