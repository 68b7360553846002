//! ProxyHub Server Entry Point

use clap::Parser;
use proxyhub::cli::{check_source, Cli, Commands};
use proxyhub::{config, logging, server};
use tracing::info;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config_path = config::config_file_path();
    let base = match config::load_server_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::CheckSource(args)) => check_source::execute(&base, &args).await,
        Some(Commands::Serve(args)) => server::run_server(args.apply(base)).await,
        None => {
            info!(config = %config_path.display(), "No subcommand given, starting server");
            server::run_server(base).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
