//! check-source subcommand
//!
//! Fetches endpoint records for a URL once and prints them as JSON.

use clap::Args;
use proxyhub_common::{
    config::ServerConfig,
    error::{ProxyHubError, ProxyHubResult},
    types::EndpointRecord,
};
use std::time::Duration;

use crate::server::build_source;
use crate::source::{validate_records, EndpointSource, FetchError};

/// Arguments for the check-source subcommand
#[derive(Args, Debug, Clone)]
pub struct CheckSourceArgs {
    /// Provider URL to fetch endpoint records for
    pub url: String,
}

/// Fetch and validate records without touching the registry
pub async fn fetch(config: &ServerConfig, url: &str) -> ProxyHubResult<Vec<EndpointRecord>> {
    let source = build_source(config).await?;
    let timeout = Duration::from_secs(config.fetch_timeout_secs);

    let records = tokio::time::timeout(timeout, source.fetch_endpoints(url))
        .await
        .map_err(|_| ProxyHubError::Internal(FetchError::Timeout(timeout).to_string()))?
        .map_err(|e| ProxyHubError::Internal(e.to_string()))?;
    validate_records(&records).map_err(|e| ProxyHubError::Internal(e.to_string()))?;
    Ok(records)
}

/// Execute the check-source command
pub async fn execute(config: &ServerConfig, args: &CheckSourceArgs) -> ProxyHubResult<()> {
    let records = fetch(config, &args.url).await?;
    let output = serde_json::to_string_pretty(&records)
        .map_err(|e| ProxyHubError::Internal(e.to_string()))?;
    println!("{}", output);
    eprintln!("{} endpoint record(s) for {}", records.len(), args.url);
    Ok(())
}
