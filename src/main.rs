//! Runs the compressor controller once and prints the inference report.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mamdani_rs::compressor::{self, Frequency, Level};
use mamdani_rs::ControllerConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mamdani", version, about = "Fuzzy compressor frequency controller")]
struct Cli {
    /// Difference between measured and target temperature, K
    #[arg(long, default_value_t = compressor::DELTA_T, allow_negative_numbers = true)]
    delta_t: f64,

    /// Rate of temperature change, K/min
    #[arg(long, default_value_t = compressor::RATE, allow_negative_numbers = true)]
    rate: f64,

    /// Controller definition in TOML, instead of the built-in one
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the report can be piped
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let controller = match &cli.config {
        Some(path) => ControllerConfig::<Level, Level, Frequency>::load(path)
            .and_then(ControllerConfig::build)
            .with_context(|| format!("failed to load controller from {}", path.display()))?,
        None => compressor::controller()?,
    };

    let (_, trace) = controller.infer(cli.delta_t, cli.rate)?;

    println!("{trace}");

    Ok(())
}
