//! Built-in exercise catalog and objective definitions.
//!
//! This module provides the default bodyweight exercises and training
//! objectives, plus an in-memory store that serves both gateway contracts.

use crate::gateway::{ExerciseCatalogGateway, ExerciseFilter, ObjectiveGateway};
use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::path::Path;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<InMemoryCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static InMemoryCatalog {
    &DEFAULT_CATALOG
}

/// Exercises and objectives held in memory, in insertion order
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
}

impl InMemoryCatalog {
    pub fn new(exercises: Vec<Exercise>, objectives: Vec<Objective>) -> Self {
        Self {
            exercises,
            objectives,
        }
    }

    /// Load a catalog from a JSON file
    ///
    /// Unknown categories or difficulty labels fail here, at the boundary.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalog: InMemoryCatalog = serde_json::from_str(&contents)?;
        tracing::info!(
            "Loaded catalog from {:?}: {} exercises, {} objectives",
            path,
            catalog.exercises.len(),
            catalog.objectives.len()
        );
        Ok(catalog)
    }

    /// Load and validate, failing on the first batch of validation errors
    pub fn load_validated(path: &Path) -> Result<Self> {
        let catalog = Self::load_from(path)?;
        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }
        Ok(catalog)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for exercise in &self.exercises {
            if exercise.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            } else if !seen.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise ID '{}'", exercise.id));
            }
            if exercise.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", exercise.id));
            }
            if exercise.primary_muscles.is_empty() {
                errors.push(format!("Exercise '{}' has no primary muscles", exercise.id));
            }
        }

        let mut seen_ids = HashSet::new();
        let mut seen_slugs = HashSet::new();
        for objective in &self.objectives {
            if objective.id.is_empty() {
                errors.push("Objective has empty ID".to_string());
            } else if !seen_ids.insert(objective.id.as_str()) {
                errors.push(format!("Duplicate objective ID '{}'", objective.id));
            }
            if !objective.slug.is_empty() && !seen_slugs.insert(objective.slug.as_str()) {
                errors.push(format!("Duplicate objective slug '{}'", objective.slug));
            }
            if objective.name.is_empty() {
                errors.push(format!("Objective '{}' has empty name", objective.id));
            }
            let prefs = &objective.preferred_categories;
            if prefs.high.is_empty() && prefs.medium.is_empty() && prefs.low.is_empty() {
                errors.push(format!(
                    "Objective '{}' has no preferred categories",
                    objective.id
                ));
            }
            if objective.intensity_percentage > 100 {
                errors.push(format!(
                    "Objective '{}': intensity {}% > 100%",
                    objective.id, objective.intensity_percentage
                ));
            }
        }

        errors
    }
}

impl ExerciseCatalogGateway for InMemoryCatalog {
    fn query(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
        let mut matches: Vec<Exercise> = self
            .exercises
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();

        // Stable, so equal scores keep catalog order
        matches.sort_by_key(|e| Reverse(e.popularity_score));

        tracing::debug!("Catalog query matched {} exercises", matches.len());
        Ok(matches)
    }
}

impl ObjectiveGateway for InMemoryCatalog {
    fn find_by_id(&self, id: &str) -> Result<Option<Objective>> {
        Ok(self.objectives.iter().find(|o| o.id == id).cloned())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Objective>> {
        Ok(self.objectives.iter().find(|o| o.slug == slug).cloned())
    }

    fn list(&self) -> Result<Vec<Objective>> {
        Ok(self.objectives.clone())
    }
}

/// Bodyweight, small-space, quiet, HICT-suitable exercise
#[allow(clippy::too_many_arguments)]
fn bodyweight(
    id: &str,
    name: &str,
    category: Category,
    difficulty: Difficulty,
    primary: &[&str],
    secondary: &[&str],
    popularity_score: u32,
    default_reps: Option<u32>,
) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        primary_category: category,
        difficulty,
        primary_muscles: primary.iter().map(|m| m.to_string()).collect(),
        secondary_muscles: secondary.iter().map(|m| m.to_string()).collect(),
        equipment: vec!["bodyweight".into()],
        small_space: true,
        quiet: true,
        hict_suitable: true,
        popularity_score,
        default_reps,
        deleted_at: None,
    }
}

/// Marks an exercise as noisy (jumping, stomping)
fn noisy(mut exercise: Exercise) -> Exercise {
    exercise.quiet = false;
    exercise
}

/// Marks an exercise as needing room to travel
fn roomy(mut exercise: Exercise) -> Exercise {
    exercise.small_space = false;
    exercise
}

fn with_equipment(mut exercise: Exercise, equipment: &[&str]) -> Exercise {
    exercise.equipment = equipment.iter().map(|e| e.to_string()).collect();
    exercise
}

fn prefs(high: &[Category], medium: &[Category], low: &[Category]) -> CategoryPreferences {
    CategoryPreferences {
        high: high.to_vec(),
        medium: medium.to_vec(),
        low: low.to_vec(),
    }
}

fn structure(
    circuits: u32,
    exercises_per_circuit: u32,
    interval_seconds: u32,
    rest_seconds: u32,
    sets: u32,
) -> RecommendedStructure {
    RecommendedStructure {
        circuits: Some(circuits),
        exercises_per_circuit: Some(exercises_per_circuit),
        interval_seconds: Some(interval_seconds),
        rest_seconds: Some(rest_seconds),
        sets: Some(sets),
    }
}

/// Builds the default catalog with built-in exercises and objectives
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference.
pub fn build_default_catalog() -> InMemoryCatalog {
    use Category::*;
    use Difficulty::*;

    // ========================================================================
    // Exercises
    // ========================================================================

    let exercises = vec![
        // Upper body push
        bodyweight("push_up", "Push-up", UpperBodyPush, Beginner, &["chest"], &["triceps", "shoulders"], 95, Some(12)),
        bodyweight("incline_push_up", "Incline Push-up", UpperBodyPush, Beginner, &["chest"], &["triceps"], 70, Some(12)),
        with_equipment(
            bodyweight("tricep_dip", "Chair Tricep Dip", UpperBodyPush, Beginner, &["triceps"], &["chest", "shoulders"], 65, Some(12)),
            &["bodyweight", "chair"],
        ),
        bodyweight("diamond_push_up", "Diamond Push-up", UpperBodyPush, Intermediate, &["triceps"], &["chest"], 60, Some(10)),
        bodyweight("pike_push_up", "Pike Push-up", UpperBodyPush, Intermediate, &["shoulders"], &["triceps"], 55, Some(8)),
        // Upper body pull
        with_equipment(
            bodyweight("pull_up", "Pull-up", UpperBodyPull, Advanced, &["lats"], &["biceps", "middle back"], 72, Some(6)),
            &["pull-up-bar"],
        ),
        with_equipment(
            bodyweight("inverted_row", "Table Inverted Row", UpperBodyPull, Intermediate, &["middle back"], &["biceps", "lats"], 58, Some(10)),
            &["bodyweight", "table"],
        ),
        bodyweight("superman_pull", "Superman Pull", UpperBodyPull, Beginner, &["lats"], &["lower back"], 50, Some(12)),
        bodyweight("reverse_snow_angel", "Reverse Snow Angel", UpperBodyPull, Beginner, &["traps"], &["shoulders"], 40, Some(10)),
        // Lower body
        bodyweight("bodyweight_squat", "Bodyweight Squat", LowerBody, Beginner, &["quadriceps"], &["glutes"], 90, Some(15)),
        bodyweight("reverse_lunge", "Reverse Lunge", LowerBody, Beginner, &["quadriceps"], &["glutes", "hamstrings"], 80, Some(10)),
        bodyweight("glute_bridge", "Glute Bridge", LowerBody, Beginner, &["glutes"], &["hamstrings"], 75, Some(15)),
        bodyweight("wall_sit", "Wall Sit", LowerBody, Beginner, &["quadriceps"], &[], 62, None),
        bodyweight("bulgarian_split_squat", "Bulgarian Split Squat", LowerBody, Intermediate, &["quadriceps"], &["glutes"], 57, Some(10)),
        bodyweight("single_leg_deadlift", "Single-leg Deadlift", LowerBody, Intermediate, &["hamstrings"], &["glutes", "lower back"], 45, Some(10)),
        // Core
        bodyweight("plank", "Plank", Core, Beginner, &["abdominals"], &["shoulders"], 92, None),
        bodyweight("bicycle_crunch", "Bicycle Crunch", Core, Beginner, &["abdominals"], &["obliques"], 78, Some(20)),
        bodyweight("dead_bug", "Dead Bug", Core, Beginner, &["abdominals"], &["lower back"], 68, Some(12)),
        bodyweight("hollow_hold", "Hollow Hold", Core, Intermediate, &["abdominals"], &[], 52, None),
        bodyweight("v_up", "V-up", Core, Advanced, &["abdominals"], &["hip flexors"], 48, Some(10)),
        // Cardio
        noisy(bodyweight("jumping_jack", "Jumping Jack", Cardio, Beginner, &["calves"], &["shoulders"], 88, None)),
        noisy(bodyweight("high_knees", "High Knees", Cardio, Beginner, &["quadriceps"], &["hip flexors", "calves"], 85, None)),
        noisy(bodyweight("butt_kick", "Butt Kick", Cardio, Beginner, &["hamstrings"], &["calves"], 60, None)),
        bodyweight("shadow_boxing", "Shadow Boxing", Cardio, Beginner, &["shoulders"], &["abdominals"], 50, None),
        // Plyometric
        noisy(bodyweight("jump_squat", "Jump Squat", Plyometric, Intermediate, &["quadriceps"], &["glutes", "calves"], 82, Some(12))),
        roomy(noisy(bodyweight("skater_jump", "Skater Jump", Plyometric, Intermediate, &["glutes"], &["quadriceps", "calves"], 64, Some(16)))),
        noisy(bodyweight("tuck_jump", "Tuck Jump", Plyometric, Advanced, &["quadriceps"], &["abdominals", "calves"], 46, Some(8))),
        noisy(bodyweight("plyo_push_up", "Plyometric Push-up", Plyometric, Advanced, &["chest"], &["triceps", "shoulders"], 40, Some(6))),
        // Full body
        noisy(bodyweight("burpee", "Burpee", FullBody, Intermediate, &["quadriceps"], &["chest", "shoulders", "abdominals"], 90, Some(10))),
        bodyweight("mountain_climber", "Mountain Climber", FullBody, Beginner, &["abdominals"], &["shoulders", "quadriceps"], 87, None),
        bodyweight("inchworm", "Inchworm", FullBody, Beginner, &["hamstrings"], &["shoulders", "abdominals"], 58, Some(8)),
        roomy(bodyweight("bear_crawl", "Bear Crawl", FullBody, Intermediate, &["shoulders"], &["quadriceps", "abdominals"], 55, None)),
        noisy(bodyweight("sprawl", "Sprawl", FullBody, Intermediate, &["quadriceps"], &["chest", "hamstrings"], 44, Some(10))),
        // Not suitable for circuits
        Exercise {
            hict_suitable: false,
            small_space: false,
            quiet: false,
            ..with_equipment(
                bodyweight("barbell_back_squat", "Barbell Back Squat", LowerBody, Advanced, &["quadriceps"], &["glutes", "lower back"], 99, Some(5)),
                &["barbell", "squat-rack"],
            )
        },
    ];

    // ========================================================================
    // Objectives
    // ========================================================================

    let objectives = vec![
        Objective {
            id: "obj_fat_burn".into(),
            slug: "fat-burn-weight-loss".into(),
            name: "Fat Burn".into(),
            description: "High-tempo circuits that keep the heart rate up for maximum calorie burn.".into(),
            preferred_categories: prefs(&[Cardio, Plyometric, FullBody], &[LowerBody, Core], &[UpperBodyPush, UpperBodyPull]),
            recommended: structure(3, 4, 30, 15, 3),
            recommended_duration_minutes: Some(25),
            intensity_percentage: 85,
        },
        Objective {
            id: "obj_strength".into(),
            slug: "strength-building".into(),
            name: "Strength Building".into(),
            description: "Longer work intervals on the big movement patterns with full recovery.".into(),
            preferred_categories: prefs(&[UpperBodyPush, UpperBodyPull, LowerBody], &[Core, FullBody], &[Cardio, Plyometric]),
            recommended: structure(3, 3, 40, 60, 3),
            recommended_duration_minutes: Some(30),
            intensity_percentage: 70,
        },
        Objective {
            id: "obj_cardio".into(),
            slug: "cardiovascular-conditioning".into(),
            name: "Cardio Conditioning".into(),
            description: "Sustained aerobic circuits that build work capacity.".into(),
            preferred_categories: prefs(&[Cardio, FullBody], &[Plyometric, LowerBody], &[Core]),
            recommended: structure(4, 3, 30, 30, 2),
            recommended_duration_minutes: Some(25),
            intensity_percentage: 80,
        },
        Objective {
            id: "obj_mobility".into(),
            slug: "flexibility-mobility".into(),
            name: "Flexibility & Mobility".into(),
            description: "Controlled movement through full ranges of motion.".into(),
            preferred_categories: prefs(&[Core, FullBody], &[LowerBody], &[UpperBodyPull]),
            recommended: structure(2, 4, 30, 30, 2),
            recommended_duration_minutes: Some(15),
            intensity_percentage: 40,
        },
        Objective {
            id: "obj_endurance".into(),
            slug: "muscle-endurance".into(),
            name: "Muscular Endurance".into(),
            description: "High-rep circuits with short rests to push local muscular endurance.".into(),
            preferred_categories: prefs(&[LowerBody, Core, UpperBodyPush], &[UpperBodyPull, FullBody], &[Cardio, Plyometric]),
            recommended: structure(3, 4, 45, 15, 3),
            recommended_duration_minutes: Some(30),
            intensity_percentage: 75,
        },
    ];

    InMemoryCatalog {
        exercises,
        objectives,
    }
}
