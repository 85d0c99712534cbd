//! Litecoin checkpoint builder
//!
//! Registers Litecoin as the active coin, then sanity-checks a checkpoint
//! list and writes the checkpoints old enough to ship.

use clap::Parser;
use coin_core::coin::{CoinRegistry, LitecoinDefinition};
use coin_core::config::ToolConfig;
use coin_core::tools::{run_checkpoint_builder, JsonCheckpointBuilder};
use coin_core::NetworkId;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "coin-checkpoints")]
#[command(about = "Build a checkpoint file for the active coin", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network tag (main, test, unitTest)
    #[arg(short, long)]
    network: Option<NetworkId>,

    /// Checkpoint list to read
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the accepted checkpoints
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Drop checkpoints newer than this unix time
    #[arg(long)]
    fast_catchup_time: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ToolConfig::load(path)?,
        None => ToolConfig::default(),
    };
    if let Some(network) = cli.network {
        config.network = network;
    }
    if let Some(input) = cli.input {
        config.checkpoints_path = input;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if cli.fast_catchup_time.is_some() {
        config.fast_catchup_time = cli.fast_catchup_time;
    }
    config.validate()?;

    let registry = CoinRegistry::new();
    let coin = Arc::new(LitecoinDefinition::new()?);
    let report = run_checkpoint_builder(&registry, coin, &JsonCheckpointBuilder, &config)?;

    println!("Network:     {}", config.network);
    println!("Loaded:      {}", report.loaded);
    println!("Written:     {}", report.written);
    if let Some(latest) = report.latest {
        println!("Latest:      {} @ {}", latest.height, latest.hash);
    }
    println!("Output:      {}", config.output_path.display());

    Ok(())
}
