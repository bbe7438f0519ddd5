//! Workout structure resolution.
//!
//! Each structural value is taken from the first source that provides one:
//! explicit constraint, then the objective's recommendation, then the
//! built-in default of 3 circuits x 3 exercises, 20s work, 60s rest, 3 sets.

use crate::{Constraints, Objective};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CIRCUITS: u32 = 3;
pub const DEFAULT_EXERCISES_PER_CIRCUIT: u32 = 3;
pub const DEFAULT_INTERVAL_SECONDS: u32 = 20;
pub const DEFAULT_REST_SECONDS: u32 = 60;
pub const DEFAULT_SETS: u32 = 3;

/// Fully resolved structure of a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutStructure {
    pub circuits: u32,
    pub exercises_per_circuit: u32,
    pub interval_seconds: u32,
    pub rest_seconds: u32,
    pub sets: u32,
}

impl Default for WorkoutStructure {
    fn default() -> Self {
        Self {
            circuits: DEFAULT_CIRCUITS,
            exercises_per_circuit: DEFAULT_EXERCISES_PER_CIRCUIT,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            rest_seconds: DEFAULT_REST_SECONDS,
            sets: DEFAULT_SETS,
        }
    }
}

/// First positive value wins; zero counts as "not provided"
fn first_set(explicit: Option<u32>, recommended: Option<u32>, fallback: u32) -> u32 {
    explicit
        .filter(|v| *v > 0)
        .or(recommended.filter(|v| *v > 0))
        .unwrap_or(fallback)
}

/// Resolve the workout structure from constraints and objective defaults
pub fn plan_structure(objective: &Objective, constraints: &Constraints) -> WorkoutStructure {
    let rec = &objective.recommended;

    let structure = WorkoutStructure {
        circuits: first_set(constraints.circuits, rec.circuits, DEFAULT_CIRCUITS),
        exercises_per_circuit: first_set(
            constraints.exercises_per_circuit,
            rec.exercises_per_circuit,
            DEFAULT_EXERCISES_PER_CIRCUIT,
        ),
        interval_seconds: first_set(
            constraints.interval_seconds,
            rec.interval_seconds,
            DEFAULT_INTERVAL_SECONDS,
        ),
        rest_seconds: first_set(constraints.rest_seconds, rec.rest_seconds, DEFAULT_REST_SECONDS),
        sets: first_set(constraints.sets, rec.sets, DEFAULT_SETS),
    };

    tracing::debug!("Resolved workout structure: {:?}", structure);
    structure
}
