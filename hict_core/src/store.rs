//! Saved-workout log.
//!
//! Generated workouts the user keeps are appended to a JSONL (JSON Lines)
//! file with file locking so several processes can share it.

use crate::{CircuitDefinition, Difficulty, GenerationResult, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A generated workout persisted for later replay
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedWorkout {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub objective_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub total_duration_minutes: u32,
    pub estimated_calories: u32,
    pub circuits: Vec<CircuitDefinition>,
}

impl SavedWorkout {
    /// Snapshot a generation result, keeping the workout's own difficulty
    pub fn from_result(result: &GenerationResult, owner_id: Option<&str>) -> Self {
        let workout = &result.workout;

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            owner_id: owner_id.map(str::to_string),
            objective_id: workout.objective_id.clone(),
            name: workout.name.clone(),
            description: workout.description.clone(),
            difficulty: workout.difficulty,
            total_duration_minutes: workout.total_duration_minutes,
            estimated_calories: workout.estimated_calories,
            circuits: workout.circuits.clone(),
        }
    }

    pub fn exercise_count(&self) -> usize {
        self.circuits.iter().map(|c| c.exercises.len()).sum()
    }
}

/// Destination for saved workouts
pub trait WorkoutSink {
    fn append(&mut self, workout: &SavedWorkout) -> Result<()>;
}

/// JSONL workout log with file locking
pub struct JsonlWorkoutLog {
    path: PathBuf,
}

impl JsonlWorkoutLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl WorkoutSink for JsonlWorkoutLog {
    fn append(&mut self, workout: &SavedWorkout) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(workout)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended workout {} to {:?}", workout.id, self.path);
        Ok(())
    }
}

/// Read every saved workout; unparseable lines are skipped with a warning
pub fn read_workouts(path: &Path) -> Result<Vec<SavedWorkout>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut workouts = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<SavedWorkout>(&line) {
            Ok(workout) => workouts.push(workout),
            Err(e) => {
                tracing::warn!("Failed to parse workout at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} workouts from {:?}", workouts.len(), path);
    Ok(workouts)
}

/// Saved workouts of one owner, newest first
pub fn workouts_for_owner(path: &Path, owner_id: &str) -> Result<Vec<SavedWorkout>> {
    let mut workouts: Vec<_> = read_workouts(path)?
        .into_iter()
        .filter(|w| w.owner_id.as_deref() == Some(owner_id))
        .collect();
    workouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(workouts)
}
