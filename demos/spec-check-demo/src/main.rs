//! Command-line demo that runs the specification check against one webhook
//! payload.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use gate_adapters::github::{GithubConfig, GithubService};
use gate_policy::config::SpecificationConfig;
use gate_primitives::Credentials;
use gate_runtime::check::{Check, CheckOutcome, SpecificationCheck};
use gate_runtime::webhook::decode_event;

/// Evaluate a pull-request webhook payload against the specification rules.
#[derive(Parser, Debug)]
#[command(
    name = "spec-check-demo",
    about = "Evaluate a pull-request webhook payload against the specification rules"
)]
struct Args {
    /// Path to a `pull_request` webhook payload (JSON)
    payload: PathBuf,

    /// Path to a specification configuration document (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub API base URL, e.g. for a GitHub Enterprise instance
    #[arg(long)]
    api_url: Option<String>,

    /// Compute the verdict without writing a commit status
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();

    let token = std::env::var("GITHUB_TOKEN").context("GITHUB_TOKEN must be set")?;
    let credentials = Credentials::new(token);

    let payload = tokio::fs::read(&args.payload)
        .await
        .with_context(|| format!("failed to read {}", args.payload.display()))?;
    let event = decode_event(&payload)?;

    let config = match &args.config {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str::<SpecificationConfig>(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => SpecificationConfig::default(),
    };

    let mut github = GithubConfig::new();
    if let Some(api_url) = &args.api_url {
        github = github.with_base_url(api_url)?;
    }
    let hosting = Arc::new(GithubService::new(github)?);
    let check = SpecificationCheck::new(hosting, &config)?;

    if args.dry_run {
        let verdict = check.validate(&event, &credentials).await?;
        info!(
            succeeded = verdict.succeeded(),
            description = verdict.description(),
            "dry-run verdict"
        );
        return Ok(());
    }

    match check.execute(&event, &credentials).await? {
        CheckOutcome::Skipped => info!("event not eligible, no status written"),
        CheckOutcome::Reported(verdict) => info!(
            succeeded = verdict.succeeded(),
            description = verdict.description(),
            "commit status written"
        ),
    }

    Ok(())
}
