//! Integration tests for the hict binary.
//!
//! These tests verify end-to-end behavior including:
//! - Workout generation and JSON output shape
//! - Saving to and listing the workout log
//! - CSV export
//! - Custom catalogs and config files

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
///
/// Every invocation gets an explicit, empty config so the developer's own
/// preferences never leak into a test.
fn cli(dir: &Path) -> Command {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        fs::write(&config_path, "").unwrap();
    }
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hict"));
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

fn generate_json(dir: &Path, args: &[&str]) -> Value {
    let output = cli(dir)
        .arg("generate")
        .arg("--json")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("hict"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "High-intensity circuit training workout generator",
        ));
}

#[test]
fn test_generate_json_shape() {
    let temp_dir = setup_test_dir();
    let result = generate_json(temp_dir.path(), &[]);

    let workout = &result["workout"];
    assert!(workout["name"]
        .as_str()
        .unwrap()
        .starts_with("Fat Burn Workout - "));
    assert_eq!(workout["objectiveId"], "obj_fat_burn");
    assert_eq!(workout["difficulty"], "intermediate");

    let circuits = workout["circuits"].as_array().unwrap();
    assert_eq!(circuits.len(), 3);
    for (i, circuit) in circuits.iter().enumerate() {
        assert_eq!(circuit["circuitNumber"], (i + 1) as u64);
        assert_eq!(circuit["sets"], 3);
        assert_eq!(circuit["restBetweenSetsSeconds"], 15);
        let exercises = circuit["exercises"].as_array().unwrap();
        assert_eq!(exercises.len(), 4);
        for exercise in exercises {
            assert_eq!(exercise["durationSeconds"], 30);
            assert_eq!(exercise["restAfterSeconds"], 15);
        }
    }

    assert!(workout["totalDurationMinutes"].as_u64().unwrap() > 0);
    assert!(result["metadata"]["exercisesUsed"].as_u64().unwrap() > 0);
    assert!(result.get("underFilledCircuits").is_none());
}

#[test]
fn test_generate_respects_structure_overrides() {
    let temp_dir = setup_test_dir();
    let result = generate_json(
        temp_dir.path(),
        &[
            "--objective",
            "strength-building",
            "--circuits",
            "2",
            "--exercises-per-circuit",
            "5",
            "--interval",
            "45",
            "--quiet",
            "false",
            "--difficulty",
            "beginner",
        ],
    );

    let circuits = result["workout"]["circuits"].as_array().unwrap();
    assert_eq!(circuits.len(), 2);
    for circuit in circuits {
        let exercises = circuit["exercises"].as_array().unwrap();
        assert_eq!(exercises.len(), 5);
        assert!(exercises.iter().all(|e| e["durationSeconds"] == 45));
        assert!(exercises.iter().all(|e| e["difficulty"] == "beginner"));
    }
    assert_eq!(result["workout"]["difficulty"], "beginner");
}

#[test]
fn test_excluded_exercises_never_appear() {
    let temp_dir = setup_test_dir();
    let result = generate_json(
        temp_dir.path(),
        &["--exclude", "diamond_push_up,pike_push_up"],
    );

    for circuit in result["workout"]["circuits"].as_array().unwrap() {
        for exercise in circuit["exercises"].as_array().unwrap() {
            assert_ne!(exercise["exerciseId"], "diamond_push_up");
            assert_ne!(exercise["exerciseId"], "pike_push_up");
        }
    }
}

#[test]
fn test_unknown_objective_fails() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("generate")
        .arg("--objective")
        .arg("underwater-basket-weaving")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ObjectiveNotFound"));
}

#[test]
fn test_save_and_history() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .arg("generate")
        .arg("--save")
        .arg("--user")
        .arg("alice")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout saved"));

    let log_path = temp_dir.path().join("data/workouts.jsonl");
    let content = fs::read_to_string(&log_path).unwrap();
    assert_eq!(content.lines().count(), 1);
    let saved: Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(saved["ownerId"], "alice");
    assert_eq!(saved["objectiveId"], "obj_fat_burn");

    cli(temp_dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Fat Burn Workout"))
        .stdout(predicate::str::contains("12 exercises"));

    cli(temp_dir.path())
        .arg("history")
        .arg("--user")
        .arg("bob")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved workouts."));
}

#[test]
fn test_history_skips_corrupt_lines() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("workouts.jsonl"), "{ invalid json }\n").unwrap();

    cli(temp_dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved workouts."));
}

#[test]
fn test_csv_export() {
    let temp_dir = setup_test_dir();
    let csv_path = temp_dir.path().join("export/workout.csv");

    cli(temp_dir.path())
        .arg("generate")
        .arg("--csv")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 12 exercises"));

    let content = fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("circuit,position,exercise_id"));
    assert_eq!(lines.count(), 12);
}

#[test]
fn test_classify() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["classify", "--exercises", "9", "--circuits", "3"])
        .args(["--sets", "3", "--work", "20", "--rest", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("beginner (score 4.05)"));

    cli(temp_dir.path())
        .args(["classify", "--exercises", "12", "--circuits", "4"])
        .args(["--sets", "3", "--work", "40", "--rest", "20"])
        .args(["--label", "advanced,advanced"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("advanced"));
}

#[test]
fn test_objectives_list() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("objectives")
        .assert()
        .success()
        .stdout(predicate::str::contains("fat-burn-weight-loss"))
        .stdout(predicate::str::contains("strength-building"))
        .stdout(predicate::str::contains("muscle-endurance"));
}

#[test]
fn test_exercises_list_filters() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("exercises")
        .assert()
        .success()
        .stdout(predicate::str::contains("push_up"))
        .stdout(predicate::str::contains("barbell_back_squat").not());

    cli(temp_dir.path())
        .args(["exercises", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("barbell_back_squat"));

    cli(temp_dir.path())
        .args(["exercises", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jumping_jack").not());
}

#[test]
fn test_quick_uses_preferences() {
    let temp_dir = setup_test_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        r#"
[preferences]
fitness_goals = ["build_muscle"]
default_difficulty = "beginner"
"#,
    )
    .unwrap();

    let output = cli(temp_dir.path())
        .arg("quick")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["workout"]["objectiveId"], "obj_strength");
    assert_eq!(result["workout"]["difficulty"], "beginner");
}

#[test]
fn test_custom_catalog() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("catalog.json");
    fs::write(
        &catalog_path,
        r#"{
  "exercises": [
    {"id": "plank", "name": "Plank", "primary_category": "core", "difficulty": "intermediate",
     "primary_muscles": ["abdominals"], "small_space": true, "quiet": true,
     "hict_suitable": true, "popularity_score": 10},
    {"id": "squat", "name": "Squat", "primary_category": "lower_body", "difficulty": "intermediate",
     "primary_muscles": ["quadriceps"], "small_space": true, "quiet": true,
     "hict_suitable": true, "popularity_score": 20}
  ],
  "objectives": [
    {"id": "obj_core", "slug": "core-only", "name": "Core Only",
     "preferred_categories": {"high": ["core"]},
     "recommended": {"circuits": 1, "exercises_per_circuit": 3},
     "intensity_percentage": 50}
  ]
}"#,
    )
    .unwrap();

    let output = cli(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog_path)
        .args(["generate", "--objective", "core-only", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    let exercises = result["workout"]["circuits"][0]["exercises"]
        .as_array()
        .unwrap();
    // Two distinct exercises, then the top of the high tier is reused
    let ids: Vec<&str> = exercises
        .iter()
        .map(|e| e["exerciseId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["plank", "squat", "plank"]);
    assert_eq!(result["metadata"]["exercisesUsed"], 2);
}

#[test]
fn test_invalid_catalog_is_rejected() {
    let temp_dir = setup_test_dir();
    let catalog_path = temp_dir.path().join("catalog.json");
    fs::write(&catalog_path, r#"{"exercises": [], "objectives": [{"id": "", "slug": "x", "name": "", "preferred_categories": {}, "intensity_percentage": 150}]}"#).unwrap();

    cli(temp_dir.path())
        .arg("--catalog")
        .arg(&catalog_path)
        .arg("objectives")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CatalogValidation"));
}

/// Run a generating subcommand with `--json --save` and return the printed
/// result alongside the logged entry
fn generate_and_save(dir: &Path, args: &[&str]) -> (Value, Value) {
    let output = cli(dir)
        .args(args)
        .arg("--json")
        .arg("--save")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();

    let content = fs::read_to_string(dir.join("data/workouts.jsonl")).unwrap();
    let saved: Value = serde_json::from_str(content.lines().last().unwrap()).unwrap();
    (printed, saved)
}

#[test]
fn test_saved_difficulty_matches_generated_workout() {
    let temp_dir = setup_test_dir();

    let (printed, saved) = generate_and_save(temp_dir.path(), &["quick"]);
    assert_eq!(printed["workout"]["difficulty"], "beginner");
    assert_eq!(saved["difficulty"], printed["workout"]["difficulty"]);

    let (printed, saved) = generate_and_save(temp_dir.path(), &["generate"]);
    assert_eq!(printed["workout"]["difficulty"], "intermediate");
    assert_eq!(saved["difficulty"], printed["workout"]["difficulty"]);
}

#[test]
fn test_build_infers_difficulty_and_saves() {
    let temp_dir = setup_test_dir();

    let (printed, saved) = generate_and_save(
        temp_dir.path(),
        &[
            "build",
            "--name",
            "Lunch Burner",
            "--circuit",
            "pull_up,v_up,tuck_jump,plyo_push_up",
            "--circuit",
            "pull_up,v_up,tuck_jump,plyo_push_up",
            "--circuit",
            "pull_up,v_up,tuck_jump,plyo_push_up",
            "--interval",
            "40",
            "--rest",
            "20",
        ],
    );

    let workout = &printed["workout"];
    assert_eq!(workout["name"], "Lunch Burner");
    assert_eq!(workout["difficulty"], "advanced");
    assert_eq!(workout["circuits"].as_array().unwrap().len(), 3);
    assert_eq!(workout["circuits"][0]["sets"], 3);
    assert_eq!(saved["difficulty"], "advanced");
    assert_eq!(saved["name"], "Lunch Burner");
}

#[test]
fn test_build_defaults_and_stated_difficulty() {
    let temp_dir = setup_test_dir();
    let output = cli(temp_dir.path())
        .args(["build", "--name", "Tiny", "--circuit", "push_up,plank"])
        .args(["--difficulty", "advanced", "--objective", "strength-building", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    let workout = &result["workout"];
    assert_eq!(workout["difficulty"], "advanced");
    assert_eq!(workout["objectiveId"], "obj_strength");
    let first = &workout["circuits"][0]["exercises"][0];
    assert_eq!(first["durationSeconds"], 30);
    assert_eq!(first["restAfterSeconds"], 30);
    assert_eq!(workout["totalDurationMinutes"], 8);
}

#[test]
fn test_build_rejects_unknown_exercise() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["build", "--name", "Odd", "--circuit", "plank,moonwalk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("moonwalk"));

    cli(temp_dir.path())
        .args(["build", "--name", "Empty", "--circuit", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidWorkout"));
}

#[test]
fn test_structure_flags_are_bounded() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .args(["generate", "--circuits", "4000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--circuits"));

    cli(temp_dir.path())
        .args(["generate", "--exercises-per-circuit", "0"])
        .assert()
        .failure();

    cli(temp_dir.path())
        .args(["generate", "--circuits", "20", "--exercises-per-circuit", "20", "--json"])
        .assert()
        .success();
}

#[test]
fn test_exercises_exclude_filter() {
    let temp_dir = setup_test_dir();
    let output = cli(temp_dir.path())
        .args(["exercises", "--exclude", "push_up,plank"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert!(!ids.contains(&"push_up"));
    assert!(!ids.contains(&"plank"));
    assert!(ids.contains(&"incline_push_up"));
    assert!(ids.contains(&"burpee"));
}
