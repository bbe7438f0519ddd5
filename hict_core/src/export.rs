//! CSV export of a workout, one row per exercise slot.

use crate::{CircuitDefinition, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    circuit: u32,
    position: usize,
    exercise_id: &'a str,
    exercise_name: &'a str,
    category: &'a str,
    difficulty: &'a str,
    work_seconds: Option<u32>,
    reps: Option<u32>,
    rest_seconds: u32,
    sets: u32,
    rest_between_sets_seconds: u32,
}

/// Write the circuits as CSV with a header row; returns the number of rows
pub fn write_workout_csv<W: Write>(circuits: &[CircuitDefinition], out: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    let mut rows = 0;

    for circuit in circuits {
        for (i, exercise) in circuit.exercises.iter().enumerate() {
            writer.serialize(CsvRow {
                circuit: circuit.circuit_number,
                position: i + 1,
                exercise_id: &exercise.exercise_id,
                exercise_name: &exercise.exercise_name,
                category: exercise.category.as_str(),
                difficulty: exercise.difficulty.as_str(),
                work_seconds: exercise.duration_seconds,
                reps: exercise.reps,
                rest_seconds: exercise.rest_after_seconds,
                sets: circuit.sets,
                rest_between_sets_seconds: circuit.rest_between_sets_seconds,
            })?;
            rows += 1;
        }
    }

    writer.flush()?;
    Ok(rows)
}

/// Export to a file, creating parent directories and syncing to disk
pub fn export_workout_csv(circuits: &[CircuitDefinition], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let rows = write_workout_csv(circuits, &file)?;
    file.sync_all()?;

    tracing::info!("Wrote {} exercise rows to {:?}", rows, path);
    Ok(rows)
}
