// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Commands:
//   1. `list`     — the lesson's exercises and their names
//   2. `hint`     — hint text for one exercise
//   3. `solution` — solution text for one exercise
//   4. `verify`   — grade the reference solutions
//   5. `train`    — train and checkpoint the classifier
//   6. `classify` — label text with the best checkpoint
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{ClassifyArgs, Commands, DataArgs, ExerciseArgs, TrainArgs};

use crate::grading::context::GradingContext;
use crate::grading::exercise::{CheckOutcome, Exercise};
use crate::grading::lesson;
use crate::grading::registry::{CourseRegistry, Lesson};
use crate::infra::config::HarnessConfig;

#[derive(Parser, Debug)]
#[command(
    name = "textcat-grader",
    version = "0.1.0",
    about = "Exercises and auto-grading for the sentiment text classifier lesson."
)]
pub struct Cli {
    /// JSON file with harness settings; flags override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        let cfg = match &self.config {
            Some(path) => HarnessConfig::from_file(path)?,
            None       => HarnessConfig::default(),
        };

        let mut registry = CourseRegistry::new();
        registry.register(lesson::bind()?)?;
        let lesson = registry
            .lesson(cfg.tutorial_id)
            .with_context(|| format!("No lesson registered under id {}", cfg.tutorial_id))?;

        match self.command {
            Commands::List           => run_list(lesson),
            Commands::Hint(args)     => run_hint(lesson, args),
            Commands::Solution(args) => run_solution(lesson, args),
            Commands::Verify(args)   => run_verify(lesson, cfg, args),
            Commands::Train(args)    => run_train(cfg, args),
            Commands::Classify(args) => run_classify(cfg, args),
        }
    }
}

fn run_list(lesson: &Lesson) -> Result<()> {
    println!("Lesson {}", lesson.tutorial_id());
    for (name, exercise) in lesson.iter() {
        let kind = match exercise {
            Exercise::Coding(c)     => format!("coding, submit `{}`", c.var),
            Exercise::Reflective(_) => "reflective".to_string(),
        };
        println!("  {name:<4} {} ({kind})", exercise.describe());
    }
    Ok(())
}

fn find<'a>(lesson: &'a Lesson, name: &str) -> Result<&'a Exercise> {
    lesson.get(name).with_context(|| {
        let known: Vec<_> = lesson.names().collect();
        format!("No exercise named '{name}' (expected one of {known:?})")
    })
}

fn run_hint(lesson: &Lesson, args: ExerciseArgs) -> Result<()> {
    let exercise = find(lesson, &args.exercise)?;
    match exercise.hint() {
        Some(hint) => println!("\nHint for {}:\n{}", args.exercise, hint),
        None       => println!("\n{} has no hint. Try the solution instead.", args.exercise),
    }
    Ok(())
}

fn run_solution(lesson: &Lesson, args: ExerciseArgs) -> Result<()> {
    let exercise = find(lesson, &args.exercise)?;
    println!("\nSolution for {}:\n{}", args.exercise, exercise.solution());
    Ok(())
}

/// Handles the `verify` subcommand.
fn run_verify(lesson: &Lesson, mut cfg: HarnessConfig, args: DataArgs) -> Result<()> {
    use crate::application::verify_use_case::VerifyUseCase;

    args.apply(&mut cfg);
    cfg.validate()?;

    let ctx = GradingContext::load(&cfg)
        .with_context(|| format!("Cannot load lesson data from '{}'", cfg.data_path))?;
    let report = VerifyUseCase::new(lesson, &ctx).execute()?;

    for line in &report {
        println!("{:<4} {:<36} {}", line.name, line.title, line.outcome);
    }
    if report.iter().any(|l| matches!(l.outcome, CheckOutcome::Failed(_))) {
        anyhow::bail!("Some reference solutions did not pass their own checks");
    }
    Ok(())
}

/// Handles the `train` subcommand.
/// Converts CLI args into a HarnessConfig and hands off to Layer 2.
fn run_train(mut cfg: HarnessConfig, args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    args.apply(&mut cfg);
    cfg.validate()?;
    tracing::info!("Starting training on reviews in: {}", cfg.data_path);

    let summary = TrainUseCase::new(cfg.clone()).execute()?;
    for m in &summary.epochs {
        println!(
            "Epoch {:>3} | train_loss {:>10.4} | val_accuracy {:.4}",
            m.epoch, m.train_loss, m.val_accuracy
        );
    }
    if let Some(best) = summary.best {
        println!(
            "Training complete. Best epoch {} (val accuracy {:.4}) saved in '{}'.",
            best.epoch, best.val_accuracy, cfg.checkpoint_dir
        );
    }
    Ok(())
}

/// Handles the `classify` subcommand.
fn run_classify(cfg: HarnessConfig, args: ClassifyArgs) -> Result<()> {
    use crate::application::classify_use_case::ClassifyUseCase;

    let dir      = args.checkpoint_dir.unwrap_or(cfg.checkpoint_dir);
    let use_case = ClassifyUseCase::new(&dir)?;
    let result   = use_case.classify(&args.text)?;
    println!("\n{} ({:.4})", result.label, result.score);
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hint_with_global_config() {
        let cli = Cli::try_parse_from(["textcat-grader", "hint", "--exercise", "q_2", "--config", "c.json"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
        assert!(matches!(cli.command, Commands::Hint(ExerciseArgs { ref exercise }) if exercise == "q_2"));
    }

    #[test]
    fn test_parse_train_flags() {
        let cli = Cli::try_parse_from(["textcat-grader", "train", "--epochs", "3", "--split", "0.9"]).unwrap();
        match cli.command {
            Commands::Train(args) => {
                assert_eq!(args.epochs, Some(3));
                assert_eq!(args.data.split, Some(0.9));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_list_runs_without_data() {
        let cli = Cli::try_parse_from(["textcat-grader", "list"]).unwrap();
        assert!(cli.run().is_ok());
    }

    #[test]
    fn test_unknown_exercise_is_an_error() {
        let cli = Cli::try_parse_from(["textcat-grader", "solution", "--exercise", "q_42"]).unwrap();
        assert!(cli.run().is_err());
    }
}
