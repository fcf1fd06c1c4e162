//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// User Accounts API - in-memory user management over HTTP
#[derive(Parser, Debug)]
#[command(name = "user-accounts-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
}

/// Arguments for the serve command.
///
/// Unset values fall back to `SERVER_HOST` / `SERVER_PORT` from the
/// environment, then to the built-in defaults.
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli =
            Cli::try_parse_from(["user-accounts-api", "-v", "serve", "--port", "8081"]).unwrap();
        assert!(cli.verbose);

        let Commands::Serve(args) = cli.command;
        assert_eq!(args.port, Some(8081));
        assert_eq!(args.host, None);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["user-accounts-api"]).is_err());
    }
}
