#![forbid(unsafe_code)]

//! Core domain model and business logic for HICT workout generation.
//!
//! This crate provides:
//! - Domain types (exercises, objectives, constraints, generated workouts)
//! - Catalog and objective gateways with an in-memory default catalog
//! - The generation engine (pool, structure, assembly, metadata)
//! - Difficulty classification and request-flow presets
//! - Persistence (JSONL workout log, CSV export) and configuration

pub mod types;
pub mod error;
pub mod gateway;
pub mod catalog;
pub mod pool;
pub mod structure;
pub mod assembler;
pub mod metadata;
pub mod difficulty;
pub mod engine;
pub mod flows;
pub mod store;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use gateway::{ExerciseCatalogGateway, ExerciseFilter, ObjectiveGateway};
pub use catalog::{build_default_catalog, get_default_catalog, InMemoryCatalog};
pub use engine::{workout_name, WorkoutGenerator};
pub use difficulty::{classify_difficulty, classify_workout};
pub use flows::{
    build_custom_workout, curated_constraints, objective_slug_for_goals, quick_start_constraints,
    CustomCircuit, CustomWorkoutRequest, UserPreferences,
};
pub use store::{read_workouts, JsonlWorkoutLog, SavedWorkout, WorkoutSink};
pub use export::{export_workout_csv, write_workout_csv};
pub use config::Config;
