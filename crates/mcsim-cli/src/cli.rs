use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "mcsim developers",
    version,
    about = "mcsim - Metropolis Monte Carlo sampling of Lennard-Jones fluids in the canonical (NVT) ensemble.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a Metropolis Monte Carlo chain starting from a configuration file.
    Run(RunArgs),
    /// Print the potential energy of a configuration without sampling.
    Energy(EnergyArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    // --- Input / Output ---
    /// Path to the starting configuration (box length, particle count, `label x y z` records).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a simulation configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the final configuration to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the sampled energy-per-particle history as CSV.
    #[arg(long, value_name = "PATH")]
    pub energies: Option<PathBuf>,

    /// Write the sampled frames as a multi-frame XYZ trajectory.
    #[arg(long, value_name = "PATH")]
    pub trajectory: Option<PathBuf>,

    // --- Simulation Overrides ---
    /// Override the reduced temperature.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Override the number of trial moves.
    #[arg(short = 'n', long, value_name = "INT")]
    pub steps: Option<usize>,

    /// Override the maximum per-axis displacement of a trial move.
    #[arg(short = 'd', long, value_name = "FLOAT")]
    pub max_displacement: Option<f64>,

    /// Override the interaction cutoff radius.
    #[arg(long, value_name = "FLOAT")]
    pub cutoff: Option<f64>,

    /// Override the number of steps between recorded frames.
    #[arg(short = 'f', long, value_name = "INT")]
    pub sampling_frequency: Option<usize>,

    /// Seed the random stream for a reproducible run.
    #[arg(short = 's', long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Recompute the energy from scratch every INT steps and compare it with the running value.
    #[arg(long, value_name = "INT")]
    pub audit_frequency: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S simulation.num-steps=5000
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `energy` subcommand.
#[derive(Args, Debug)]
pub struct EnergyArgs {
    /// Path to the configuration file to evaluate.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Interaction cutoff radius.
    #[arg(long, value_name = "FLOAT", default_value_t = 3.0)]
    pub cutoff: f64,
}
