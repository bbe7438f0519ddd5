//! Core domain types for the HICT workout generator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise categories and difficulty tiers
//! - Catalog records (exercises, objectives)
//! - Caller-supplied constraints
//! - The generated workout shape handed back to callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Categories and Difficulty
// ============================================================================

/// Primary movement category of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    UpperBodyPush,
    UpperBodyPull,
    LowerBody,
    Core,
    Cardio,
    Plyometric,
    FullBody,
}

impl Category {
    /// Every category in balance-scan order.
    ///
    /// The least-used category search walks this array with a running
    /// minimum, so on a tie the earliest entry wins.
    pub const ALL: [Category; 7] = [
        Category::UpperBodyPush,
        Category::UpperBodyPull,
        Category::LowerBody,
        Category::Core,
        Category::Cardio,
        Category::Plyometric,
        Category::FullBody,
    ];

    /// Position of this category in [`Category::ALL`]
    pub fn index(self) -> usize {
        match self {
            Category::UpperBodyPush => 0,
            Category::UpperBodyPull => 1,
            Category::LowerBody => 2,
            Category::Core => 3,
            Category::Cardio => 4,
            Category::Plyometric => 5,
            Category::FullBody => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::UpperBodyPush => "upper_body_push",
            Category::UpperBodyPull => "upper_body_pull",
            Category::LowerBody => "lower_body",
            Category::Core => "core",
            Category::Cardio => "cardio",
            Category::Plyometric => "plyometric",
            Category::FullBody => "full_body",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Difficulty tier, used both for exercises and for whole workouts
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Numeric weight on the 1-3 scale used by the difficulty classifier
    pub fn weight(self) -> f64 {
        match self {
            Difficulty::Beginner => 1.0,
            Difficulty::Intermediate => 2.0,
            Difficulty::Advanced => 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(format!("Unknown difficulty: {}", other)),
        }
    }
}

// ============================================================================
// Catalog Records
// ============================================================================

/// An exercise as stored in the catalog
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub primary_category: Category,
    pub difficulty: Difficulty,
    pub primary_muscles: Vec<String>,
    #[serde(default)]
    pub secondary_muscles: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub small_space: bool,
    #[serde(default)]
    pub quiet: bool,
    #[serde(default)]
    pub hict_suitable: bool,
    #[serde(default)]
    pub popularity_score: u32,
    #[serde(default)]
    pub default_reps: Option<u32>,
    /// Soft-deletion marker; deleted exercises never reach generation
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Ranked category preferences of an objective
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CategoryPreferences {
    #[serde(default)]
    pub high: Vec<Category>,
    #[serde(default)]
    pub medium: Vec<Category>,
    #[serde(default)]
    pub low: Vec<Category>,
}

/// Structural defaults recommended by an objective
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RecommendedStructure {
    #[serde(default)]
    pub circuits: Option<u32>,
    #[serde(default)]
    pub exercises_per_circuit: Option<u32>,
    #[serde(default)]
    pub interval_seconds: Option<u32>,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    #[serde(default)]
    pub sets: Option<u32>,
}

/// A named training objective (e.g. fat loss, strength)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Objective {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub preferred_categories: CategoryPreferences,
    #[serde(default)]
    pub recommended: RecommendedStructure,
    #[serde(default)]
    pub recommended_duration_minutes: Option<u32>,
    /// 0-100, scales the calorie estimate
    pub intensity_percentage: u8,
}

// ============================================================================
// Constraints
// ============================================================================

/// Caller-supplied constraints; every field is optional
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    /// Accepted but not applied to exercise selection
    #[serde(default)]
    pub available_equipment: Option<Vec<String>>,
    #[serde(default)]
    pub small_space: Option<bool>,
    #[serde(default)]
    pub quiet: Option<bool>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub circuits: Option<u32>,
    #[serde(default)]
    pub exercises_per_circuit: Option<u32>,
    #[serde(default)]
    pub interval_seconds: Option<u32>,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub excluded_exercises: Vec<String>,
    /// Forced to the front of the high-priority tier
    #[serde(default)]
    pub included_exercises: Vec<String>,
}

// ============================================================================
// Generated Workout
// ============================================================================

/// Snapshot of one exercise placed in a circuit
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSelection {
    pub exercise_id: String,
    pub exercise_name: String,
    pub category: Category,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    pub rest_after_seconds: u32,
    pub primary_muscles: Vec<String>,
    pub secondary_muscles: Vec<String>,
}

impl ExerciseSelection {
    /// Snapshot a catalog exercise with the given work and rest seconds
    pub fn timed(exercise: &Exercise, work_seconds: u32, rest_after_seconds: u32) -> Self {
        Self {
            exercise_id: exercise.id.clone(),
            exercise_name: exercise.name.clone(),
            category: exercise.primary_category,
            difficulty: exercise.difficulty,
            duration_seconds: Some(work_seconds),
            reps: exercise.default_reps,
            rest_after_seconds,
            primary_muscles: exercise.primary_muscles.clone(),
            secondary_muscles: exercise.secondary_muscles.clone(),
        }
    }
}

/// One circuit of the generated workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CircuitDefinition {
    pub circuit_number: u32,
    pub exercises: Vec<ExerciseSelection>,
    pub sets: u32,
    pub rest_between_sets_seconds: u32,
}

/// The generated workout plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWorkout {
    pub name: String,
    pub description: String,
    pub objective_id: String,
    pub circuits: Vec<CircuitDefinition>,
    pub total_duration_minutes: u32,
    pub estimated_calories: u32,
    pub difficulty: Difficulty,
}

/// Coverage summary of a generated workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutMetadata {
    pub exercises_used: usize,
    pub categories_used: Vec<Category>,
    pub muscle_groups_covered: Vec<String>,
}

/// Everything one generation run hands back to the caller
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub workout: GeneratedWorkout,
    pub metadata: WorkoutMetadata,
    /// Circuit numbers that received fewer exercises than requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub under_filled_circuits: Vec<u32>,
}

impl GenerationResult {
    /// True when every circuit got the requested number of exercises
    pub fn is_fully_filled(&self) -> bool {
        self.under_filled_circuits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_matches_index() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_category_parse_accepts_hyphens() {
        assert_eq!(
            "upper-body-push".parse::<Category>().unwrap(),
            Category::UpperBodyPush
        );
        assert_eq!("FULL_BODY".parse::<Category>().unwrap(), Category::FullBody);
        assert!("mobility".parse::<Category>().is_err());
    }

    #[test]
    fn test_difficulty_parse_is_case_insensitive() {
        assert_eq!(
            "Advanced".parse::<Difficulty>().unwrap(),
            Difficulty::Advanced
        );
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_unknown_category_rejected_at_deserialization() {
        let json = r#"{
            "id": "x", "name": "X", "primary_category": "stretching",
            "difficulty": "beginner", "primary_muscles": ["chest"]
        }"#;
        assert!(serde_json::from_str::<Exercise>(json).is_err());
    }

    #[test]
    fn test_selection_omits_absent_optionals() {
        let selection = ExerciseSelection {
            exercise_id: "plank".into(),
            exercise_name: "Plank".into(),
            category: Category::Core,
            difficulty: Difficulty::Beginner,
            duration_seconds: Some(20),
            reps: None,
            rest_after_seconds: 60,
            primary_muscles: vec!["abdominals".into()],
            secondary_muscles: vec![],
        };

        let value = serde_json::to_value(&selection).unwrap();
        assert_eq!(value["exerciseId"], "plank");
        assert_eq!(value["category"], "core");
        assert_eq!(value["durationSeconds"], 20);
        assert!(value.get("reps").is_none());
        assert_eq!(value["restAfterSeconds"], 60);
    }

    #[test]
    fn test_constraints_from_camel_case_json() {
        let json = r#"{"smallSpace": true, "exercisesPerCircuit": 4, "includedExercises": ["burpee"]}"#;
        let constraints: Constraints = serde_json::from_str(json).unwrap();
        assert_eq!(constraints.small_space, Some(true));
        assert_eq!(constraints.exercises_per_circuit, Some(4));
        assert_eq!(constraints.included_exercises, vec!["burpee".to_string()]);
        assert!(constraints.excluded_exercises.is_empty());
    }
}
