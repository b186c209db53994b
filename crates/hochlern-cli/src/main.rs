//! CLI for hochlern.
//!
//! Plays the role of the historical configuration form: it coerces the
//! twelve numeric fields from user-entered text (flags or a JSON file),
//! runs one simulation per invocation and prints a JSON report with the
//! achieved and oracle-maximum scores.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hochlern_core::SimConfig;
use hochlern_harness::{Phase, RunReport, Simulation};
use hochlern_markov::PayoffBandit;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one simulation and print a JSON report
    Run(RunArgs),
    /// Print the default configuration as JSON
    Defaults,
}

#[derive(Args)]
struct RunArgs {
    /// Path to a JSON config file (camelCase field names, form format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the environment RNG (omit for entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Seed for the agent RNG (omit for entropy)
    #[arg(long)]
    agent_seed: Option<u64>,

    /// Suppress phase progress on stderr
    #[arg(long)]
    quiet: bool,

    #[command(flatten)]
    fields: FieldOverrides,
}

/// Per-field overrides, applied on top of the file or the defaults.
/// Mirrors the thirteen form fields one to one.
#[derive(Args)]
struct FieldOverrides {
    #[arg(long)]
    high_payoff: Option<f32>,
    #[arg(long)]
    low_payoff: Option<f32>,
    #[arg(long)]
    start_high: Option<f32>,
    #[arg(long)]
    start_low: Option<f32>,
    #[arg(long)]
    high_given_high: Option<f32>,
    #[arg(long)]
    low_given_high: Option<f32>,
    #[arg(long)]
    high_given_low: Option<f32>,
    #[arg(long)]
    low_given_low: Option<f32>,
    #[arg(long)]
    discount_factor: Option<f32>,
    #[arg(long)]
    learning_rate: Option<f32>,
    #[arg(long)]
    num_periods: Option<usize>,
    #[arg(long)]
    num_learn_iterations: Option<usize>,
    #[arg(long)]
    num_test_iterations: Option<usize>,
}

impl FieldOverrides {
    fn apply(&self, cfg: &mut SimConfig) {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = self.$field {
                    cfg.$field = v;
                })*
            };
        }
        take!(
            high_payoff,
            low_payoff,
            start_high,
            start_low,
            high_given_high,
            low_given_high,
            high_given_low,
            low_given_low,
            discount_factor,
            learning_rate,
            num_periods,
            num_learn_iterations,
            num_test_iterations,
        );
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SimConfig> {
    match path {
        Some(p) => {
            let file =
                File::open(p).with_context(|| format!("Failed to open config file {p:?}"))?;
            let cfg = serde_json::from_reader(file)
                .with_context(|| format!("Failed to parse config file {p:?}"))?;
            Ok(cfg)
        }
        None => Ok(SimConfig::default()),
    }
}

fn run(args: &RunArgs) -> Result<()> {
    let mut cfg = load_config(args.config.as_ref())?;
    args.fields.apply(&mut cfg);

    let sim = Simulation::new(cfg).context("Config rejected")?;

    let mut rng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let agent_seed = args.agent_seed;
    let quiet = args.quiet;

    let result = sim
        .run(
            |cfg| PayoffBandit::from_config(cfg, agent_seed),
            &mut rng,
            |phase| {
                if !quiet {
                    match phase {
                        Phase::Training => eprintln!("Training model..."),
                        Phase::Testing => eprintln!("Testing results..."),
                    }
                }
            },
        )
        .context("Simulation failed")?;

    let report = RunReport::new(result);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Run(args) => run(args),
        Commands::Defaults => {
            println!("{}", serde_json::to_string_pretty(&SimConfig::default())?);
            Ok(())
        }
    }
}
