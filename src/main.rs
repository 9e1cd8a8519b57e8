//! Steam Sentinel - batch validator for Steam session credentials
//!
//! Reads credentials from a JSON file, runs the validation pipeline
//! against Steam's endpoints, and writes an HTML report plus a JSON
//! export of the credentials that proved valid.

mod checker;
mod client;
mod config;
mod error;
mod input;
mod models;
mod report;
mod retry;
mod stats;
mod token;

use crate::checker::AccountChecker;
use crate::client::SteamClient;
use crate::config::AppConfig;
use crate::stats::Statistics;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    tracing::info!("Starting Steam Sentinel v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;
    tracing::info!(
        input = %config.input.path.display(),
        report = %config.report.output_path.display(),
        max_retries = config.checker.max_retries,
        "Configuration loaded"
    );

    // Read credentials
    let tokens = input::read_tokens(&config.input.path)?;
    if tokens.is_empty() {
        tracing::error!(file = %config.input.path.display(), "No tokens found");
        anyhow::bail!("no tokens to process");
    }
    tracing::info!(count = tokens.len(), "Processing Steam accounts");

    // Run the pipeline
    let client = SteamClient::new(&config.steam, &config.checker)?;
    let checker = AccountChecker::new(client, &config.checker);
    let records = checker.process_batch(&tokens).await;

    // Summarize
    let statistics = Statistics::compute(&records);
    tracing::info!(
        total = statistics.total,
        valid = statistics.valid,
        invalid = statistics.invalid,
        expired = statistics.expired,
        claim_valid = statistics.claim_valid,
        vac_banned = statistics.vac_banned,
        community_banned = statistics.community_banned,
        economy_banned = statistics.economy_banned,
        "Batch complete"
    );

    // Export valid credentials and write the report
    report::export_valid_tokens(&config.report.valid_tokens_path, &records)?;
    report::write_report(
        &config.report.output_path,
        &records,
        &statistics,
        &config.report.title,
    )?;

    tracing::info!(
        report = %config.report.output_path.display(),
        "Processing complete"
    );

    Ok(())
}

/// Set up structured logging (RUST_LOG overrides the default level)
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Load .env, then layered configuration, then validate
fn load_config() -> anyhow::Result<AppConfig> {
    // .env is optional; real deployments use environment variables
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()?;
    config.validate()?;
    Ok(config)
}
