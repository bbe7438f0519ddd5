use clap::{Args, Parser, Subcommand};
use hict_core::difficulty::difficulty_score;
use hict_core::flows::objective_slug_for_goals;
use hict_core::store::workouts_for_owner;
use hict_core::*;
use std::path::PathBuf;

const MAX_CIRCUITS: i64 = 20;
const MAX_EXERCISES_PER_CIRCUIT: i64 = 20;
const MAX_SETS: i64 = 20;

#[derive(Parser)]
#[command(name = "hict")]
#[command(about = "High-intensity circuit training workout generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workout for an objective (default)
    Generate {
        /// Objective slug or id
        #[arg(long, default_value = flows::DEFAULT_OBJECTIVE_SLUG)]
        objective: String,

        #[command(flatten)]
        constraints: ConstraintArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Instant workout from the configured preferences
    Quick {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Build a workout from hand-picked exercises
    Build {
        /// Workout name
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Objective slug or id used for the calorie estimate
        #[arg(long)]
        objective: Option<String>,

        /// Stated difficulty; inferred from volume and intensity when omitted
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Exercise ids of one circuit, comma separated; repeat per circuit
        #[arg(long = "circuit", required = true)]
        circuits: Vec<String>,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SETS))]
        sets: Option<u32>,

        /// Work interval in seconds
        #[arg(long)]
        interval: Option<u32>,

        /// Rest after each exercise in seconds
        #[arg(long)]
        rest: Option<u32>,

        /// Rest between sets in seconds
        #[arg(long)]
        rest_between_sets: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List training objectives
    Objectives,

    /// List catalog exercises
    Exercises {
        /// Only exercises of this difficulty
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Only small-space friendly exercises
        #[arg(long)]
        small_space: bool,

        /// Only quiet exercises
        #[arg(long)]
        quiet: bool,

        /// Include exercises not suited to circuits
        #[arg(long)]
        all: bool,

        /// Exercise ids to leave out, comma separated
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
    },

    /// Classify workout difficulty from volume and intensity
    Classify {
        /// Distinct exercises in the workout
        #[arg(long)]
        exercises: u32,

        #[arg(long)]
        circuits: u32,

        #[arg(long)]
        sets: u32,

        /// Work interval in seconds
        #[arg(long)]
        work: u32,

        /// Rest interval in seconds
        #[arg(long)]
        rest: u32,

        /// Per-exercise difficulty labels
        #[arg(long = "label", value_delimiter = ',')]
        labels: Vec<String>,
    },

    /// List saved workouts
    History {
        /// Only workouts saved by this user
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Args)]
struct ConstraintArgs {
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Restrict to small-space exercises (true/false)
    #[arg(long)]
    small_space: Option<bool>,

    /// Restrict to quiet exercises (true/false)
    #[arg(long)]
    quiet: Option<bool>,

    /// Available equipment, comma separated
    #[arg(long, value_delimiter = ',')]
    equipment: Vec<String>,

    /// Target duration in minutes
    #[arg(long)]
    duration: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_CIRCUITS))]
    circuits: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_EXERCISES_PER_CIRCUIT))]
    exercises_per_circuit: Option<u32>,

    /// Work interval in seconds
    #[arg(long)]
    interval: Option<u32>,

    /// Rest after each exercise in seconds
    #[arg(long)]
    rest: Option<u32>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_SETS))]
    sets: Option<u32>,

    /// Exercise ids to leave out, comma separated
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Exercise ids to prioritise, comma separated
    #[arg(long, value_delimiter = ',')]
    include: Vec<String>,
}

impl ConstraintArgs {
    fn into_constraints(self) -> Constraints {
        Constraints {
            difficulty: self.difficulty,
            available_equipment: (!self.equipment.is_empty()).then_some(self.equipment),
            small_space: self.small_space,
            quiet: self.quiet,
            duration_minutes: self.duration,
            circuits: self.circuits,
            exercises_per_circuit: self.exercises_per_circuit,
            interval_seconds: self.interval,
            rest_seconds: self.rest,
            sets: self.sets,
            excluded_exercises: self.exclude,
            included_exercises: self.include,
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Append the workout to the saved-workout log
    #[arg(long)]
    save: bool,

    /// Export the circuits to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Requesting user id
    #[arg(long)]
    user: Option<String>,
}

fn main() -> Result<()> {
    hict_core::logging::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    if let Some(catalog) = cli.catalog {
        config.data.catalog_path = Some(catalog);
    }

    match cli.command {
        Some(Commands::Generate {
            objective,
            constraints,
            output,
        }) => cmd_generate(&config, &objective, constraints.into_constraints(), &output),
        Some(Commands::Quick { output }) => cmd_quick(&config, &output),
        Some(Commands::Build {
            name,
            description,
            objective,
            difficulty,
            circuits,
            sets,
            interval,
            rest,
            rest_between_sets,
            output,
        }) => {
            let request = CustomWorkoutRequest {
                name,
                description,
                objective_id: objective,
                difficulty,
                circuits: circuits
                    .iter()
                    .map(|ids| CustomCircuit {
                        exercise_ids: ids
                            .split(',')
                            .map(str::trim)
                            .filter(|id| !id.is_empty())
                            .map(str::to_string)
                            .collect(),
                        sets,
                        interval_seconds: interval,
                        rest_seconds: rest,
                        rest_between_sets_seconds: rest_between_sets,
                    })
                    .collect(),
            };
            cmd_build(&config, &request, &output)
        }
        Some(Commands::Objectives) => cmd_objectives(&config),
        Some(Commands::Exercises {
            difficulty,
            small_space,
            quiet,
            all,
            exclude,
        }) => {
            let filter = ExerciseFilter {
                hict_suitable_only: !all,
                difficulty,
                small_space,
                quiet,
                excluded_ids: exclude,
                ..Default::default()
            };
            cmd_exercises(&config, &filter)
        }
        Some(Commands::Classify {
            exercises,
            circuits,
            sets,
            work,
            rest,
            labels,
        }) => {
            cmd_classify(exercises, circuits, sets, work, rest, &labels);
            Ok(())
        }
        Some(Commands::History { user }) => cmd_history(&config, user.as_deref()),
        None => cmd_generate(
            &config,
            flows::DEFAULT_OBJECTIVE_SLUG,
            Constraints::default(),
            &OutputArgs {
                json: false,
                save: false,
                csv: None,
                user: None,
            },
        ),
    }
}

/// Built-in catalog unless a catalog file is configured
fn load_catalog(config: &Config) -> Result<InMemoryCatalog> {
    match &config.data.catalog_path {
        Some(path) => InMemoryCatalog::load_validated(path),
        None => {
            let catalog = get_default_catalog();
            let errors = catalog.validate();
            if !errors.is_empty() {
                eprintln!("Catalog validation errors:");
                for error in &errors {
                    eprintln!("  - {}", error);
                }
                return Err(Error::CatalogValidation("Invalid catalog".into()));
            }
            Ok(catalog.clone())
        }
    }
}

fn cmd_generate(
    config: &Config,
    objective_key: &str,
    custom: Constraints,
    output: &OutputArgs,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let generator = WorkoutGenerator::new(&catalog, &catalog);

    let objective = generator.find_objective(objective_key)?;
    let constraints = curated_constraints(&custom, &config.preferences, &objective);

    let result = generator.generate_for_objective(
        &objective,
        Some(&constraints),
        output.user.as_deref(),
        chrono::Local::now().naive_local(),
    )?;

    emit(config, &result, output)
}

fn cmd_quick(config: &Config, output: &OutputArgs) -> Result<()> {
    let catalog = load_catalog(config)?;
    let generator = WorkoutGenerator::new(&catalog, &catalog);

    let slug = objective_slug_for_goals(&config.preferences.fitness_goals);
    let constraints = quick_start_constraints(&config.preferences);

    let result = generator.generate_for_slug(slug, Some(&constraints), output.user.as_deref())?;

    emit(config, &result, output)
}

fn cmd_build(config: &Config, request: &CustomWorkoutRequest, output: &OutputArgs) -> Result<()> {
    let catalog = load_catalog(config)?;
    let result = build_custom_workout(&catalog, &catalog, request)?;
    emit(config, &result, output)
}

/// Print, save and export a generation result as requested
fn emit(
    config: &Config,
    result: &GenerationResult,
    output: &OutputArgs,
) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        display_workout(result);
    }

    if output.save {
        let saved = SavedWorkout::from_result(result, output.user.as_deref());
        let mut log = JsonlWorkoutLog::new(config.workout_log_path());
        log.append(&saved)?;
        if !output.json {
            println!("✓ Workout saved ({})", saved.id);
            println!("  Log: {}", log.path().display());
        }
    }

    if let Some(path) = &output.csv {
        let rows = export_workout_csv(&result.workout.circuits, path)?;
        if !output.json {
            println!("✓ Exported {} exercises to {}", rows, path.display());
        }
    }

    Ok(())
}

fn cmd_objectives(config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;

    for objective in catalog.list()? {
        println!("{:<30} {}", objective.slug, objective.name);
        let r = &objective.recommended;
        println!(
            "    {} circuits x {} exercises, {}s work / {}s rest, {} sets, intensity {}%",
            show(r.circuits),
            show(r.exercises_per_circuit),
            show(r.interval_seconds),
            show(r.rest_seconds),
            show(r.sets),
            objective.intensity_percentage
        );
    }
    Ok(())
}

fn show(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn cmd_exercises(config: &Config, filter: &ExerciseFilter) -> Result<()> {
    let catalog = load_catalog(config)?;
    let exercises = catalog.query(filter)?;

    for exercise in &exercises {
        println!(
            "{:<24} {:<16} {:<13} {:>3}  {}",
            exercise.id,
            exercise.primary_category.as_str(),
            exercise.difficulty.as_str(),
            exercise.popularity_score,
            exercise.name
        );
    }
    println!("{} exercises", exercises.len());
    Ok(())
}

fn cmd_classify(exercises: u32, circuits: u32, sets: u32, work: u32, rest: u32, labels: &[String]) {
    let labels = (!labels.is_empty()).then_some(labels);
    let score = difficulty_score(exercises, circuits, sets, work, rest, labels);
    let tier = classify_difficulty(exercises, circuits, sets, work, rest, labels);
    println!("{} (score {:.2})", tier, score);
}

fn cmd_history(config: &Config, user: Option<&str>) -> Result<()> {
    let path = config.workout_log_path();
    let workouts = match user {
        Some(owner) => workouts_for_owner(&path, owner)?,
        None => read_workouts(&path)?,
    };

    if workouts.is_empty() {
        println!("No saved workouts.");
        return Ok(());
    }

    for workout in &workouts {
        println!(
            "{}  {}  {}  {} min  ~{} kcal  {} exercises",
            workout.created_at.format("%Y-%m-%d %H:%M"),
            workout.name,
            workout.difficulty,
            workout.total_duration_minutes,
            workout.estimated_calories,
            workout.exercise_count()
        );
    }
    Ok(())
}

fn display_workout(result: &GenerationResult) {
    let workout = &result.workout;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", workout.name);
    println!("╰─────────────────────────────────────────╯");
    println!();
    if !workout.description.is_empty() {
        println!("  {}", workout.description);
    }
    println!(
        "  {} · ~{} min · ~{} kcal",
        workout.difficulty, workout.total_duration_minutes, workout.estimated_calories
    );

    for circuit in &workout.circuits {
        println!();
        println!(
            "  Circuit {} ({} sets, {}s between sets)",
            circuit.circuit_number, circuit.sets, circuit.rest_between_sets_seconds
        );
        for exercise in &circuit.exercises {
            let work = match (exercise.duration_seconds, exercise.reps) {
                (Some(seconds), Some(reps)) => format!("{}s (~{} reps)", seconds, reps),
                (Some(seconds), None) => format!("{}s", seconds),
                (None, Some(reps)) => format!("{} reps", reps),
                (None, None) => "-".to_string(),
            };
            println!(
                "    → {:<24} {:<14} rest {}s",
                exercise.exercise_name, work, exercise.rest_after_seconds
            );
        }
    }

    println!();
    println!(
        "  {} exercises · {}",
        result.metadata.exercises_used,
        result
            .metadata
            .categories_used
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if !result.is_fully_filled() {
        println!(
            "  ⚠ Not enough exercises for circuits {:?}",
            result.under_filled_circuits
        );
    }
    println!();
}
