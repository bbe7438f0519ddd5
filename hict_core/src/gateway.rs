//! Read contracts for the exercise catalog and objective store.
//!
//! The generator only ever talks to these traits, so the data can come from
//! the built-in catalog, a JSON file, or a test fake.

use crate::{Difficulty, Exercise, Objective, Result};

/// Catalog query filter
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub hict_suitable_only: bool,
    pub include_deleted: bool,
    pub difficulty: Option<Difficulty>,
    /// When true, only exercises flagged small-space friendly
    pub small_space: bool,
    /// When true, only exercises flagged quiet
    pub quiet: bool,
    pub excluded_ids: Vec<String>,
    /// When non-empty, only these ids are returned
    pub included_ids: Vec<String>,
}

impl ExerciseFilter {
    /// Check a single exercise against the filter
    pub fn matches(&self, exercise: &Exercise) -> bool {
        if self.hict_suitable_only && !exercise.hict_suitable {
            return false;
        }
        if !self.include_deleted && exercise.deleted_at.is_some() {
            return false;
        }
        if let Some(difficulty) = self.difficulty {
            if exercise.difficulty != difficulty {
                return false;
            }
        }
        if self.small_space && !exercise.small_space {
            return false;
        }
        if self.quiet && !exercise.quiet {
            return false;
        }
        if self.excluded_ids.iter().any(|id| id == &exercise.id) {
            return false;
        }
        if !self.included_ids.is_empty() && !self.included_ids.iter().any(|id| id == &exercise.id)
        {
            return false;
        }
        true
    }
}

/// Read-only access to the exercise catalog
pub trait ExerciseCatalogGateway {
    /// Return every exercise matching `filter`, most popular first
    fn query(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>>;
}

/// Read-only access to training objectives
pub trait ObjectiveGateway {
    fn find_by_id(&self, id: &str) -> Result<Option<Objective>>;

    fn find_by_slug(&self, slug: &str) -> Result<Option<Objective>>;

    fn list(&self) -> Result<Vec<Objective>>;
}

impl<T: ExerciseCatalogGateway + ?Sized> ExerciseCatalogGateway for &T {
    fn query(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
        (**self).query(filter)
    }
}

impl<T: ObjectiveGateway + ?Sized> ObjectiveGateway for &T {
    fn find_by_id(&self, id: &str) -> Result<Option<Objective>> {
        (**self).find_by_id(id)
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Objective>> {
        (**self).find_by_slug(slug)
    }

    fn list(&self) -> Result<Vec<Objective>> {
        (**self).list()
    }
}
