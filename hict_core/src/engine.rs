//! Workout generation engine.
//!
//! Generation runs in five steps:
//! 1. Resolve the objective (fails with `ObjectiveNotFound`)
//! 2. Build the tiered exercise pool (fails with `NoMatchingExercises`)
//! 3. Resolve the circuit/exercise/timing structure
//! 4. Assemble the circuits with muscle-group balancing
//! 5. Derive duration, calories and coverage metadata
//!
//! The generator holds no mutable state; every call owns its pool and
//! balance counters, so one instance can serve concurrent callers.

use crate::assembler::assemble_circuits;
use crate::gateway::{ExerciseCatalogGateway, ObjectiveGateway};
use crate::metadata::{calculate_metadata, estimate_calories, total_duration_minutes};
use crate::pool::build_exercise_pool;
use crate::structure::plan_structure;
use crate::{
    Constraints, Difficulty, Error, GeneratedWorkout, GenerationResult, Objective, Result,
};
use chrono::{Local, NaiveDateTime};
use uuid::Uuid;

/// Stateless workout generator over injected catalog and objective gateways
#[derive(Clone, Debug)]
pub struct WorkoutGenerator<C, O> {
    catalog: C,
    objectives: O,
}

impl<C, O> WorkoutGenerator<C, O>
where
    C: ExerciseCatalogGateway,
    O: ObjectiveGateway,
{
    pub fn new(catalog: C, objectives: O) -> Self {
        Self {
            catalog,
            objectives,
        }
    }

    /// Generate a workout for the objective with the given id
    pub fn generate(
        &self,
        objective_id: &str,
        constraints: Option<&Constraints>,
        requesting_user_id: Option<&str>,
    ) -> Result<GenerationResult> {
        self.generate_at(
            objective_id,
            constraints,
            requesting_user_id,
            Local::now().naive_local(),
        )
    }

    /// Like [`generate`](Self::generate) with an explicit timestamp for the name
    pub fn generate_at(
        &self,
        objective_id: &str,
        constraints: Option<&Constraints>,
        requesting_user_id: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<GenerationResult> {
        let objective = self
            .objectives
            .find_by_id(objective_id)?
            .ok_or_else(|| Error::ObjectiveNotFound(objective_id.to_string()))?;

        self.generate_for_objective(&objective, constraints, requesting_user_id, now)
    }

    /// Generate a workout for the objective with the given slug
    pub fn generate_for_slug(
        &self,
        slug: &str,
        constraints: Option<&Constraints>,
        requesting_user_id: Option<&str>,
    ) -> Result<GenerationResult> {
        let objective = self
            .objectives
            .find_by_slug(slug)?
            .ok_or_else(|| Error::ObjectiveNotFound(slug.to_string()))?;

        self.generate_for_objective(
            &objective,
            constraints,
            requesting_user_id,
            Local::now().naive_local(),
        )
    }

    /// Look an objective up by id, falling back to its slug
    pub fn find_objective(&self, key: &str) -> Result<Objective> {
        if let Some(objective) = self.objectives.find_by_id(key)? {
            return Ok(objective);
        }
        self.objectives
            .find_by_slug(key)?
            .ok_or_else(|| Error::ObjectiveNotFound(key.to_string()))
    }

    /// Run generation against an already resolved objective
    pub fn generate_for_objective(
        &self,
        objective: &Objective,
        constraints: Option<&Constraints>,
        requesting_user_id: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<GenerationResult> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "generate_workout",
            %run_id,
            objective = %objective.slug,
            user = requesting_user_id.unwrap_or("anonymous"),
        );
        let _guard = span.enter();

        let constraints = constraints.cloned().unwrap_or_default();

        let pool = build_exercise_pool(&self.catalog, objective, &constraints)?;
        let structure = plan_structure(objective, &constraints);
        let assembly = assemble_circuits(&pool, &structure);

        let metadata = calculate_metadata(&assembly.circuits);
        let total_duration_minutes = total_duration_minutes(&assembly.circuits);
        let estimated_calories =
            estimate_calories(total_duration_minutes, objective.intensity_percentage);

        let workout = GeneratedWorkout {
            name: workout_name(&objective.name, now),
            description: objective.description.clone(),
            objective_id: objective.id.clone(),
            circuits: assembly.circuits,
            total_duration_minutes,
            estimated_calories,
            difficulty: constraints.difficulty.unwrap_or(Difficulty::Intermediate),
        };

        tracing::info!(
            "Generated '{}': {} circuits, {} exercises, {} min, ~{} kcal",
            workout.name,
            workout.circuits.len(),
            metadata.exercises_used,
            workout.total_duration_minutes,
            workout.estimated_calories
        );

        Ok(GenerationResult {
            workout,
            metadata,
            under_filled_circuits: assembly.under_filled,
        })
    }
}

/// Auto-generated title, e.g. `Fat Burn Workout - Oct 17 9:05 PM`
pub fn workout_name(objective_name: &str, now: NaiveDateTime) -> String {
    format!(
        "{} Workout - {}",
        objective_name,
        now.format("%b %-d %-I:%M %p")
    )
}
