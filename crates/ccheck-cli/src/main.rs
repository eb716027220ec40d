//! # ccheck CLI entry point
//!
//! Parses command-line arguments, loads the run configuration and
//! dispatches to the subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ccheck_cli::check::{run_check, CheckArgs};
use ccheck_cli::classify::{run_classify, ClassifyArgs};
use ccheck_cli::config::{EventType, RunConfig};
use ccheck_cli::dry_run::DryRunApi;
use ccheck_cli::pr::{run_pr, PrArgs};
use ccheck_github_client::{GithubApiConfig, GithubClient, PullRequestApi};

/// Pull-request checks for the challenge catalogue.
///
/// Validates `doc.json` descriptors, classifies changed files, labels the
/// pull request and keeps the bot's report comments up to date.
#[derive(Parser, Debug)]
#[command(name = "ccheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalogue checkout to check. Defaults to the enclosing git repository.
    #[arg(long, global = true)]
    repo_root: Option<PathBuf>,

    /// Print labels and comments instead of sending them to GitHub.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Event to act on. Overrides EVENT_TYPE.
    #[arg(long, global = true, value_enum)]
    event: Option<EventType>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate changed doc.json descriptors and post the validation report.
    Check(CheckArgs),

    /// Classify changes, label the PR and post the challenge check report.
    Pr(PrArgs),

    /// Print the classification of the changed files as JSON.
    Classify(ClassifyArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Reports go to stdout; keep logs off it.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("ccheck v{} starting", env!("CARGO_PKG_VERSION"));

    let repo_root = cli
        .repo_root
        .clone()
        .or_else(resolve_repo_root)
        .unwrap_or_else(|| {
            tracing::warn!("Could not locate repository root; using current directory");
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        });

    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    match dispatch(&cli, repo_root).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

async fn dispatch(cli: &Cli, repo_root: PathBuf) -> anyhow::Result<u8> {
    match &cli.command {
        Commands::Classify(args) => run_classify(args, &repo_root),
        Commands::Check(args) => {
            let (config, api) = prepare(cli, repo_root)?;
            run_check(args, &config, api.as_ref()).await
        }
        Commands::Pr(args) => {
            let (config, api) = prepare(cli, repo_root)?;
            run_pr(args, &config, api.as_ref()).await
        }
    }
}

/// Load the run configuration and pick the GitHub implementation.
fn prepare(cli: &Cli, repo_root: PathBuf) -> anyhow::Result<(RunConfig, Box<dyn PullRequestApi>)> {
    let event_override = cli.event.map(|e| e.to_string());
    let mut config = RunConfig::from_lookup(
        |var| match (var, &event_override) {
            ("EVENT_TYPE", Some(event)) => Some(event.clone()),
            _ => std::env::var(var).ok(),
        },
        repo_root,
    )
    .context("loading run configuration")?;
    config.dry_run = cli.dry_run;
    tracing::debug!(?config, "run configuration");

    let api: Box<dyn PullRequestApi> = if config.dry_run {
        Box::new(DryRunApi)
    } else {
        let github = GithubApiConfig::from_env().context("loading GitHub API configuration")?;
        Box::new(GithubClient::new(github)?)
    };
    Ok((config, api))
}

/// Walk up from the current directory to the enclosing git checkout.
fn resolve_repo_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut dir = cwd.as_path();
    loop {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
