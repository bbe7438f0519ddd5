//! Circuit assembly with muscle-group balancing.
//!
//! Fills every circuit slot from the exercise pool:
//! - Find the least-used category so far (ties go to the earliest in
//!   [`Category::ALL`])
//! - Walk the tiers high -> medium -> low, preferring an unused exercise of
//!   that category, else the first unused exercise of the tier
//! - Once unique exercises run out, reuse one (category match in `high`
//!   first, then the head of each tier)
//!
//! Usage counters and the used set span the whole workout, not one circuit.

use crate::pool::ExercisePool;
use crate::structure::WorkoutStructure;
use crate::{Category, CircuitDefinition, Exercise, ExerciseSelection};
use std::collections::HashSet;

/// Per-category usage counters for one generation run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MuscleGroupBalance {
    counts: [u32; 7],
}

impl MuscleGroupBalance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, category: Category) -> u32 {
        self.counts[category.index()]
    }

    pub fn record(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    /// Category with the smallest counter, scanning in [`Category::ALL`] order
    pub fn least_used(&self) -> Category {
        let mut least = Category::ALL[0];
        let mut min = u32::MAX;
        for category in Category::ALL {
            let count = self.count(category);
            if count < min {
                min = count;
                least = category;
            }
        }
        least
    }

    /// Number of exercises placed so far
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Difference between the most and least used categories
    pub fn spread(&self) -> u32 {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        let min = self.counts.iter().copied().min().unwrap_or(0);
        max - min
    }
}

/// Output of circuit assembly
#[derive(Clone, Debug)]
pub struct Assembly {
    pub circuits: Vec<CircuitDefinition>,
    pub balance: MuscleGroupBalance,
    /// Circuit numbers that ended up with fewer exercises than requested
    pub under_filled: Vec<u32>,
}

/// Assemble all circuits for a workout
pub fn assemble_circuits(pool: &ExercisePool, structure: &WorkoutStructure) -> Assembly {
    let mut used: HashSet<String> = HashSet::new();
    let mut balance = MuscleGroupBalance::new();
    let mut circuits = Vec::new();
    let mut under_filled = Vec::new();

    for circuit_number in 1..=structure.circuits {
        let mut exercises = Vec::new();

        for _ in 0..structure.exercises_per_circuit {
            let exercise = match select_next_exercise(pool, &used, &balance) {
                Some(exercise) => {
                    used.insert(exercise.id.clone());
                    exercise
                }
                None => match select_fallback_exercise(pool, &balance) {
                    Some(exercise) => {
                        tracing::debug!(
                            "Unique exercises exhausted, reusing '{}' in circuit {}",
                            exercise.id,
                            circuit_number
                        );
                        exercise
                    }
                    None => break,
                },
            };

            balance.record(exercise.primary_category);
            exercises.push(to_selection(exercise, structure));
        }

        if exercises.len() < structure.exercises_per_circuit as usize {
            tracing::warn!(
                "Circuit {} filled with {} of {} exercises",
                circuit_number,
                exercises.len(),
                structure.exercises_per_circuit
            );
            under_filled.push(circuit_number);
        }

        circuits.push(CircuitDefinition {
            circuit_number,
            exercises,
            sets: structure.sets,
            rest_between_sets_seconds: structure.rest_seconds,
        });
    }

    Assembly {
        circuits,
        balance,
        under_filled,
    }
}

/// Pick an unused exercise, favouring the least-used category within each tier
fn select_next_exercise<'a>(
    pool: &'a ExercisePool,
    used: &HashSet<String>,
    balance: &MuscleGroupBalance,
) -> Option<&'a Exercise> {
    let target = balance.least_used();

    pool.tiers().into_iter().find_map(|tier| {
        tier.iter()
            .find(|e| !used.contains(&e.id) && e.primary_category == target)
            .or_else(|| tier.iter().find(|e| !used.contains(&e.id)))
    })
}

/// Pick an exercise to reuse once every pool entry has been placed
fn select_fallback_exercise<'a>(
    pool: &'a ExercisePool,
    balance: &MuscleGroupBalance,
) -> Option<&'a Exercise> {
    let target = balance.least_used();

    pool.high
        .iter()
        .find(|e| e.primary_category == target)
        .or_else(|| pool.high.first())
        .or_else(|| pool.medium.first())
        .or_else(|| pool.low.first())
        .or_else(|| pool.all.first())
}

fn to_selection(exercise: &Exercise, structure: &WorkoutStructure) -> ExerciseSelection {
    ExerciseSelection::timed(exercise, structure.interval_seconds, structure.rest_seconds)
}
