//! User Accounts API - Application entry point
//!
//! CLI-based entry point that dispatches to the available commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_accounts_api::{
    cli::{Cli, Commands},
    commands,
    config::{Config, Environment},
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration (also reads .env)
    let (config, warnings) = Config::load();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose, config.environment);
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber.
///
/// `RUST_LOG` wins unless `--verbose` is given. Production logs are JSON.
fn init_tracing(verbose: bool, environment: Environment) {
    let default_level = if environment.is_production() {
        "info"
    } else {
        "debug"
    };

    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string())
    };

    let registry = tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));

    if environment.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
