//! Exercise pool construction.
//!
//! Fetches the exercises allowed by the constraints and splits them into
//! priority tiers according to the objective's category preferences.

use crate::gateway::{ExerciseCatalogGateway, ExerciseFilter};
use crate::{Constraints, Error, Exercise, Objective, Result};

/// Candidate exercises for one generation run, split by priority
#[derive(Clone, Debug, Default)]
pub struct ExercisePool {
    pub high: Vec<Exercise>,
    pub medium: Vec<Exercise>,
    pub low: Vec<Exercise>,
    /// Every fetched exercise in catalog order, regardless of tier
    pub all: Vec<Exercise>,
}

impl ExercisePool {
    /// Tiers in the order the assembler searches them
    pub fn tiers(&self) -> [&[Exercise]; 3] {
        [&self.high, &self.medium, &self.low]
    }
}

/// Translate constraints into the catalog query
///
/// Equipment is deliberately not part of the filter: every catalog entry is
/// treated as equipment-compatible.
pub fn exercise_filter(constraints: &Constraints) -> ExerciseFilter {
    ExerciseFilter {
        hict_suitable_only: true,
        include_deleted: false,
        difficulty: constraints.difficulty,
        small_space: constraints.small_space.unwrap_or(false),
        quiet: constraints.quiet.unwrap_or(false),
        excluded_ids: constraints.excluded_exercises.clone(),
        included_ids: Vec::new(),
    }
}

/// Build the tiered exercise pool for an objective
///
/// Fails with [`Error::NoMatchingExercises`] when the filtered catalog is empty.
pub fn build_exercise_pool<C>(
    catalog: &C,
    objective: &Objective,
    constraints: &Constraints,
) -> Result<ExercisePool>
where
    C: ExerciseCatalogGateway + ?Sized,
{
    if let Some(equipment) = &constraints.available_equipment {
        tracing::debug!("Equipment constraint {:?} not applied to selection", equipment);
    }

    let all = catalog.query(&exercise_filter(constraints))?;
    if all.is_empty() {
        return Err(Error::NoMatchingExercises);
    }

    let pool = partition(all, objective, &constraints.included_exercises);

    tracing::debug!(
        "Exercise pool for '{}': {} high, {} medium, {} low ({} total)",
        objective.slug,
        pool.high.len(),
        pool.medium.len(),
        pool.low.len(),
        pool.all.len()
    );

    Ok(pool)
}

/// Split fetched exercises into tiers, then promote forced inclusions
fn partition(all: Vec<Exercise>, objective: &Objective, included: &[String]) -> ExercisePool {
    let prefs = &objective.preferred_categories;
    let mut high = Vec::new();
    let mut medium = Vec::new();
    let mut low = Vec::new();

    for exercise in &all {
        let category = exercise.primary_category;
        if prefs.high.contains(&category) {
            high.push(exercise.clone());
        } else if prefs.medium.contains(&category) {
            medium.push(exercise.clone());
        } else {
            // Listed as low or not listed at all
            low.push(exercise.clone());
        }
    }

    if !included.is_empty() {
        let promoted: Vec<Exercise> = all
            .iter()
            .filter(|e| included.contains(&e.id))
            .filter(|e| !high.iter().any(|h| h.id == e.id))
            .cloned()
            .collect();

        medium.retain(|e| !promoted.iter().any(|p| p.id == e.id));
        low.retain(|e| !promoted.iter().any(|p| p.id == e.id));
        high.splice(0..0, promoted);
    }

    ExercisePool {
        high,
        medium,
        low,
        all,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::{Category, CategoryPreferences, Difficulty, RecommendedStructure};

    fn exercise(id: &str, category: Category, popularity_score: u32) -> Exercise {
        Exercise {
            id: id.into(),
            name: id.into(),
            primary_category: category,
            difficulty: Difficulty::Beginner,
            primary_muscles: vec!["quadriceps".into()],
            secondary_muscles: vec![],
            equipment: vec![],
            small_space: true,
            quiet: true,
            hict_suitable: true,
            popularity_score,
            default_reps: None,
            deleted_at: None,
        }
    }

    fn objective(high: &[Category], medium: &[Category], low: &[Category]) -> Objective {
        Objective {
            id: "obj".into(),
            slug: "obj".into(),
            name: "Test".into(),
            description: String::new(),
            preferred_categories: CategoryPreferences {
                high: high.to_vec(),
                medium: medium.to_vec(),
                low: low.to_vec(),
            },
            recommended: RecommendedStructure::default(),
            recommended_duration_minutes: None,
            intensity_percentage: 80,
        }
    }

    fn ids(exercises: &[Exercise]) -> Vec<&str> {
        exercises.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_partition_by_preference() {
        let catalog = InMemoryCatalog::new(
            vec![
                exercise("plank", Category::Core, 90),
                exercise("jack", Category::Cardio, 80),
                exercise("squat", Category::LowerBody, 70),
                exercise("row", Category::UpperBodyPull, 60),
            ],
            vec![],
        );
        let obj = objective(&[Category::Core], &[Category::Cardio], &[Category::LowerBody]);

        let pool = build_exercise_pool(&catalog, &obj, &Constraints::default()).unwrap();

        assert_eq!(ids(&pool.high), vec!["plank"]);
        assert_eq!(ids(&pool.medium), vec!["jack"]);
        // Unlisted categories fall to low
        assert_eq!(ids(&pool.low), vec!["squat", "row"]);
        assert_eq!(pool.all.len(), 4);
    }

    #[test]
    fn test_included_exercise_moves_to_front_of_high() {
        let catalog = InMemoryCatalog::new(
            vec![
                exercise("plank", Category::Core, 90),
                exercise("jack", Category::Cardio, 80),
                exercise("high_knees", Category::Cardio, 70),
            ],
            vec![],
        );
        let obj = objective(&[Category::Core], &[Category::Cardio], &[]);
        let constraints = Constraints {
            included_exercises: vec!["high_knees".into()],
            ..Default::default()
        };

        let pool = build_exercise_pool(&catalog, &obj, &constraints).unwrap();

        assert_eq!(ids(&pool.high), vec!["high_knees", "plank"]);
        assert_eq!(ids(&pool.medium), vec!["jack"]);
    }

    #[test]
    fn test_multiple_inclusions_keep_relative_order() {
        let catalog = InMemoryCatalog::new(
            vec![
                exercise("plank", Category::Core, 90),
                exercise("jack", Category::Cardio, 80),
                exercise("squat", Category::LowerBody, 70),
            ],
            vec![],
        );
        let obj = objective(&[Category::Core], &[Category::Cardio], &[]);
        let constraints = Constraints {
            included_exercises: vec!["squat".into(), "jack".into(), "plank".into()],
            ..Default::default()
        };

        let pool = build_exercise_pool(&catalog, &obj, &constraints).unwrap();

        // plank already in high: not duplicated; others promoted in fetch order
        assert_eq!(ids(&pool.high), vec!["jack", "squat", "plank"]);
        assert!(pool.medium.is_empty());
        assert!(pool.low.is_empty());
    }

    #[test]
    fn test_empty_query_is_an_error() {
        let catalog = InMemoryCatalog::new(vec![exercise("plank", Category::Core, 90)], vec![]);
        let obj = objective(&[Category::Core], &[], &[]);
        let constraints = Constraints {
            excluded_exercises: vec!["plank".into()],
            ..Default::default()
        };

        let result = build_exercise_pool(&catalog, &obj, &constraints);
        assert!(matches!(result, Err(Error::NoMatchingExercises)));
    }

    #[test]
    fn test_filter_reflects_constraints() {
        let constraints = Constraints {
            difficulty: Some(Difficulty::Advanced),
            small_space: Some(true),
            quiet: Some(false),
            available_equipment: Some(vec!["dumbbell".into()]),
            excluded_exercises: vec!["burpee".into()],
            ..Default::default()
        };

        let filter = exercise_filter(&constraints);
        assert!(filter.hict_suitable_only);
        assert!(!filter.include_deleted);
        assert_eq!(filter.difficulty, Some(Difficulty::Advanced));
        assert!(filter.small_space);
        assert!(!filter.quiet);
        assert_eq!(filter.excluded_ids, vec!["burpee".to_string()]);
    }
}
