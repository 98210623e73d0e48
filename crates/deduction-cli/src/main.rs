//! Dialogue Deduction terminal host
//!
//! Plays one game of the deduction engine in the terminal, with typed lines
//! standing in for speech.
//!
//! # Usage
//! ```bash
//! deduction [--seed 42] [--config game.toml] [--case-file case.toml] [--skip-setup] [--json]
//! ```

use anyhow::Context;
use clap::Parser;
use deduction_core::{CaseFile, DialogueController, EngineConfig, GameReport, Outcome};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod nlu;
mod voice;

use nlu::KeywordClassifier;
use voice::TerminalVoice;

/// Dialogue Deduction - solve a murder by talking to your partner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the scenario and prompt choices
    #[arg(long)]
    seed: Option<u64>,

    /// Engine configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom means and clue catalogs (TOML)
    #[arg(long, value_name = "FILE")]
    case_file: Option<PathBuf>,

    /// Milliseconds of silence before a turn counts as no input
    #[arg(long)]
    no_input_timeout_ms: Option<u64>,

    /// Skip the instructions and settings questions
    #[arg(long)]
    skip_setup: bool,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so they never mix with the dialogue
    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(args.verbose)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(timeout_ms) = args.no_input_timeout_ms {
        config = config.with_no_input_timeout_ms(timeout_ms);
    }
    if args.skip_setup {
        config = config.without_setup_questions();
    }
    config.validate()?;

    let case = match &args.case_file {
        Some(path) => CaseFile::from_file(path)
            .with_context(|| format!("failed to load case file from {}", path.display()))?,
        None => CaseFile::builtin(),
    };

    print_banner(&config, &case);

    let voice = TerminalVoice::new(
        KeywordClassifier::new(&case),
        Duration::from_millis(config.voice.no_input_timeout_ms),
    );
    let mut controller = DialogueController::seeded(voice, config).with_case_file(case);
    let report = controller.run().await?;

    if args.json {
        println!("{}", report_json(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_banner(config: &EngineConfig, case: &CaseFile) {
    println!();
    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                                                               ║");
    println!("║            🔎  DIALOGUE DEDUCTION — CASE FILES  🔎            ║");
    println!("║                                                               ║");
    println!("║        Solve a murder using nothing but your voice            ║");
    println!("║                                                               ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("📁 Case File");
    println!("   ├─ {} means of murder", case.means.len());
    println!("   └─ {} clues", case.clues.len());
    println!();
    println!("⚙️  Settings");
    println!(
        "   ├─ Difficulty: {} suspects, {} items each",
        config.difficulty.suspects, config.difficulty.size
    );
    println!("   ├─ Evidence requests: {}", config.limits.max_queries);
    println!("   ├─ Guesses: {}", config.limits.max_solves);
    match config.seed {
        Some(seed) => println!("   └─ Seed: {}", seed),
        None => println!("   └─ Seed: random"),
    }
    println!();
    println!("💬 How to talk");
    println!("   ├─ Type what you would say and press Enter");
    println!(
        "   └─ An empty line or {} ms of silence counts as saying nothing",
        config.voice.no_input_timeout_ms
    );
    println!();
    println!("─────────────────────────────────────────────────────────────────");
    println!();
}

fn print_report(report: &GameReport) {
    println!();
    println!("─────────────────────────────────────────────────────────────────");
    match report.outcome {
        Outcome::Solved { score } => println!("✅ Case solved with a score of {}", score),
        Outcome::CaseCold => println!("❄️  The case went cold"),
    }
    println!("   ├─ Session: {}", report.session_id);
    println!("   ├─ Started: {}", report.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("   ├─ Evidence requested: {}", report.queries);
    println!("   ├─ Wrong guesses: {}", report.solves);
    println!("   └─ Known facts:");
    for fact in &report.knowledge {
        println!("      • {}", fact);
    }
    println!();
}

fn report_json(report: &GameReport) -> anyhow::Result<String> {
    serde_json::to_string_pretty(report).context("failed to encode the report")
}
