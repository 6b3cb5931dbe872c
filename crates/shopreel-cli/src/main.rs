use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopreel_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "shopreel")]
#[command(author, version, about = "Seamless storefront carousels with a terminal preview")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(short = 'c', long = "config", global = true)]
    config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal preview
    Run,
    /// Run the item carousel on a virtual clock and print every frame
    Simulate {
        /// How much time to simulate
        #[arg(short = 'd', long, default_value_t = 20_000)]
        duration_ms: u64,
        /// Items visible at once (overrides config)
        #[arg(long)]
        visible: Option<usize>,
        /// Delay between advances (overrides config)
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Slide transition length (overrides config)
        #[arg(long)]
        transition_ms: Option<u64>,
        /// JSON catalog to take items from
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print JSON lines instead of a table
        #[arg(long)]
        json: bool,
        /// Run on the wall clock through the async driver
        #[arg(long)]
        realtime: bool,
    },
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config_path.unwrap_or_else(AppConfig::config_path);
    let config = if config_path.exists() {
        AppConfig::load_from(&config_path)?
    } else {
        AppConfig::default()
    };

    let tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, tui);

    let config = Arc::new(config);

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Simulate {
            duration_ms,
            visible,
            interval_ms,
            transition_ms,
            catalog,
            json,
            realtime,
        }) => {
            let options = commands::simulate::SimulateOptions {
                duration_ms,
                visible,
                interval_ms,
                transition_ms,
                catalog,
                json,
                realtime,
            };
            commands::simulate::run(&config, options).await
        }
        Some(Commands::Config { init }) => commands::config::run(&config, &config_path, init),
    }
}

/// RUST_LOG wins over the configured level. The TUI owns the terminal, so
/// its logs are dropped unless RUST_LOG asks for them.
fn init_logging(config: &AppConfig, tui: bool) {
    let env_filter = std::env::var("RUST_LOG").ok();
    let explicit = env_filter.is_some();

    let writer = if tui && !explicit {
        BoxMakeWriter::new(std::io::sink)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env_filter.unwrap_or_else(|| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(writer),
        )
        .init();
}
