//! Error types for the hict_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for hict_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// The requested objective does not exist
    #[error("Workout objective not found: {0}")]
    ObjectiveNotFound(String),

    /// The catalog query returned nothing after filtering
    #[error("No exercises found matching the given constraints")]
    NoMatchingExercises,

    /// A user-built workout is malformed or references unknown exercises
    #[error("Invalid workout: {0}")]
    InvalidWorkout(String),
}
