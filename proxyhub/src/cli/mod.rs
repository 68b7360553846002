//! CLI module for proxyhub
//!
//! Provides the command-line interface for the provider registry server.

pub mod check_source;
pub mod serve;

use clap::{Parser, Subcommand};

/// ProxyHub - Registry of proxy providers with round-robin endpoint selection
#[derive(Parser, Debug)]
#[command(name = "proxyhub")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    PROXYHUB_CONFIG              Config file path (default: proxyhub.toml)
    PROXYHUB_HOST                Bind address (default: 0.0.0.0)
    PROXYHUB_PORT                Listen port (default: 32780)
    PROXYHUB_DATABASE_URL        Database URL (default: sqlite://proxyhub.db)
    PROXYHUB_FETCH_TIMEOUT_SECS  Endpoint fetch timeout in seconds (default: 10)
    PROXYHUB_LOAD_ON_STARTUP     Load all providers at startup (default: false)
    PROXYHUB_SOURCE_FILE         JSON file with endpoint records per URL
    PROXYHUB_LOG_LEVEL           Log level (default: info)
    PROXYHUB_LOG_FORMAT          Log format: text or json (default: text)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the registry server
    Serve(serve::ServeArgs),
    /// Fetch endpoint records for a URL from the configured source and print them
    CheckSource(check_source::CheckSourceArgs),
}
