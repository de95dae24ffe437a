//! Command line front end for writing and grading practice sheets.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fraction_drill::{grade, sheet, GradeResult, Generator, Synthesizer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fraction-drill",
    version,
    about = "Arithmetic practice sheets with exact answers"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an exercise sheet and its answer key
    Generate {
        /// Number of exercises
        #[arg(short = 'n', long)]
        count: usize,

        /// Naturals and denominators stay below this value
        #[arg(short = 'r', long)]
        range: u64,

        /// Seed for a reproducible sheet
        #[arg(long)]
        seed: Option<u64>,

        /// Exercise sheet to write
        #[arg(long, default_value = "Exercises.txt")]
        exercises: PathBuf,

        /// Answer key to write
        #[arg(long, default_value = "Answers.txt")]
        answers: PathBuf,
    },

    /// Grade an answer sheet against an exercise sheet
    Grade {
        /// Exercise sheet
        #[arg(short = 'e', long)]
        exercises: PathBuf,

        /// Answers to grade
        #[arg(short = 'a', long)]
        answers: PathBuf,

        /// Grade sheet to write
        #[arg(long, default_value = "Grade.txt")]
        grade: PathBuf,
    },

    /// Write an answer sheet mixing correct and wrong answers
    Synth {
        /// Exercise sheet
        #[arg(short = 'e', long)]
        exercises: PathBuf,

        /// Answer sheet to write
        #[arg(short = 'o', long, default_value = "TestAnswers.txt")]
        output: PathBuf,

        /// Share of correct answers, between 0 and 1
        #[arg(short = 'r', long, default_value = "0.6")]
        ratio: f64,

        /// Seed for a reproducible sheet
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate, synthesize answers and grade them in one go
    Workflow {
        /// Number of exercises
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Naturals and denominators stay below this value
        #[arg(short = 'r', long, default_value = "10")]
        range: u64,

        /// Share of correct answers, between 0 and 1
        #[arg(short = 'c', long, default_value = "0.6")]
        correct: f64,

        /// Seed for reproducible sheets
        #[arg(long)]
        seed: Option<u64>,

        /// Directory the sheets are written to
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn check_range(range: u64) -> Result<()> {
    if range < 1 {
        bail!("range must be a natural number of at least 1, got {range}");
    }
    Ok(())
}

fn check_ratio(ratio: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&ratio) {
        bail!("the share of correct answers must be between 0 and 1, got {ratio}");
    }
    Ok(())
}

fn generate(
    count: usize,
    range: u64,
    seed: Option<u64>,
    exercises: &Path,
    answers: &Path,
) -> Result<()> {
    check_range(range)?;
    let mut generator = match seed {
        Some(seed) => Generator::seeded(range, seed),
        None => Generator::new(range),
    };

    println!("Generating {count} exercises with range {range}...");
    let batch = generator.generate_many(count)?;
    sheet::write_exercises(exercises, &batch.value)
        .with_context(|| format!("failed to write {}", exercises.display()))?;
    sheet::write_answers(answers, &batch.value)
        .with_context(|| format!("failed to write {}", answers.display()))?;

    println!("Generated {} exercises", batch.value.len());
    if let Some(shortfall) = batch.shortfall {
        println!("Warning: {shortfall}");
    }
    println!("Exercises saved to {}", exercises.display());
    println!("Answers saved to {}", answers.display());
    Ok(())
}

fn read_sheet(path: &Path) -> Result<Vec<String>> {
    sheet::read_lines(path).with_context(|| format!("failed to read {}", path.display()))
}

fn grade_sheets(exercises: &Path, answers: &Path, grade_path: &Path) -> Result<GradeResult> {
    println!("Checking {} against {}", answers.display(), exercises.display());
    let graded = grade(&read_sheet(exercises)?, &read_sheet(answers)?);
    sheet::write_grade(grade_path, &graded.value)
        .with_context(|| format!("failed to write {}", grade_path.display()))?;

    let result = graded.value;
    println!("Total: {}", result.total());
    println!("Correct: {}", result.correct.len());
    println!("Wrong: {}", result.wrong.len());
    if let Some(shortfall) = graded.shortfall {
        println!("Warning: {shortfall}");
    }
    println!("Grade saved to {}", grade_path.display());
    Ok(result)
}

fn synth(exercises: &Path, output: &Path, ratio: f64, seed: Option<u64>) -> Result<()> {
    check_ratio(ratio)?;
    let mut synthesizer = match seed {
        Some(seed) => Synthesizer::seeded(seed),
        None => Synthesizer::new(),
    };

    let lines = read_sheet(exercises)?;
    let synthesized = synthesizer.synthesize(&lines, ratio);
    sheet::write_lines(output, &synthesized.answers)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Exercises: {}", lines.len());
    println!("Correct answers: {}", synthesized.correct.len());
    println!("Wrong answers: {}", lines.len() - synthesized.correct.len());
    println!("Test answers saved to {}", output.display());
    Ok(())
}

fn preview(title: &str, path: &Path, lines: usize) -> Result<()> {
    println!("\n--- {title} (first {lines}) ---");
    for line in read_sheet(path)?.iter().take(lines) {
        println!("{line}");
    }
    Ok(())
}

fn workflow(count: usize, range: u64, correct: f64, seed: Option<u64>, dir: &Path) -> Result<()> {
    check_range(range)?;
    check_ratio(correct)?;
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let exercises = dir.join("Exercises.txt");
    let answers = dir.join("Answers.txt");
    let test_answers = dir.join("TestAnswers.txt");
    let grade_path = dir.join("Grade.txt");

    println!("Step 1: generate {count} exercises (range {range})");
    generate(count, range, seed, &exercises, &answers)?;

    println!("\nStep 2: synthesize answers ({}% correct)", correct * 100.0);
    synth(&exercises, &test_answers, correct, seed.map(|s| s.wrapping_add(1)))?;

    println!("\nStep 3: grade");
    grade_sheets(&exercises, &test_answers, &grade_path)?;

    println!("\nStep 4: results");
    preview("Exercises", &exercises, 5)?;
    preview("Answer key", &answers, 5)?;
    preview("Test answers", &test_answers, 5)?;
    println!("\n--- Grade ---");
    for line in read_sheet(&grade_path)? {
        println!("{line}");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fraction_drill=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            count,
            range,
            seed,
            exercises,
            answers,
        } => generate(count, range, seed, &exercises, &answers),
        Commands::Grade {
            exercises,
            answers,
            grade,
        } => grade_sheets(&exercises, &answers, &grade).map(|_| ()),
        Commands::Synth {
            exercises,
            output,
            ratio,
            seed,
        } => synth(&exercises, &output, ratio, seed),
        Commands::Workflow {
            count,
            range,
            correct,
            seed,
            dir,
        } => workflow(count, range, correct, seed, &dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
