//! soilcd command-line interface.
//!
//! Runs the weekly cadmium transport model from a JSON scenario file and
//! command-line overrides.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Cadmium transport simulator for contaminated soils
#[derive(Parser)]
#[command(name = "soilcd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Weekly cadmium transport between surface and deep soil", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full horizon and print the trajectory
    Run(commands::run::RunArgs),
    /// Advance week by week up to a given week
    Step(commands::step::StepArgs),
    /// Show the validated parameters for a scenario
    Validate(commands::validate::ValidateArgs),
    /// Run one parameter across several values in parallel
    Sweep(commands::sweep::SweepArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Step(args) => commands::step::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Sweep(args) => commands::sweep::execute(args),
    }
}
