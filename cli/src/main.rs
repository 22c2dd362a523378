//! CLI for the Theme Star Ranker.
//!
//! Fetches the theme manifest, ranks every GitHub/GitLab entry by stars and
//! writes the markdown table, optionally committing and pushing it.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use theme_star_ranker::{
    load_config, ConfigError, FileConfig, RunSummary, Runner, RunnerConfig, RunnerError,
};
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Theme Star Ranker - Rank theme repositories by GitHub/GitLab stars.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL of the newline-delimited repository manifest.
    #[arg(long, env = "THEME_MANIFEST_URL")]
    manifest_url: Option<String>,

    /// Path of the generated markdown document.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token. Optional; raises the API rate limit.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Print the document instead of writing it.
    #[arg(long)]
    dry_run: bool,

    /// Commit and push the document after writing it.
    #[arg(long)]
    publish: bool,

    /// Remote to push to (defaults to the branch upstream).
    #[arg(long)]
    remote: Option<String>,

    /// Maximum concurrent API requests.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds (no timeout by default).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Handlebars template replacing the built-in document layout.
    #[arg(long)]
    template: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Pick up GITHUB_TOKEN and friends from a local .env before parsing
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    init_tracing();

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!(error = %e, "Failed to load .env file");
        }
    }

    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            if let Some(document) = &summary.document {
                println!("{document}");
            }
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output) on stderr
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Merges config file values with command-line flags; flags win.
fn build_config(args: Args) -> Result<RunnerConfig, ConfigError> {
    let mut file = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    if let Some(url) = args.manifest_url {
        file.manifest_url = Some(url);
    }

    let mut config = RunnerConfig::from_file(file).ok_or(ConfigError::MissingManifestUrl)?;
    config = config
        .with_token(args.token)
        .with_dry_run(args.dry_run)
        .with_publish(args.publish);

    if let Some(output) = args.output {
        config = config.with_output_path(output);
    }
    if let Some(remote) = args.remote {
        config = config.with_git_remote(remote);
    }
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if let Some(template) = args.template {
        config = config.with_template_path(template);
    }

    Ok(config)
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = build_config(args)?;
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Manifest entries: {}", summary.manifest_entries);
    println!("  Skipped (unknown host): {}", summary.skipped);
    println!("  Ranked: {}", summary.ranked);
    println!("  Stars fetched: {}", summary.fetched);
    println!("  Rate limited: {}", summary.rate_limited);
    println!("  Missing stars: {}", summary.missing_stars);
    println!("  Unparseable URLs: {}", summary.unparseable);

    if let Some(path) = &summary.output_path {
        println!("  Output: {}", path.display());
    }

    if let Some(report) = &summary.publish {
        let status = if report.pushed {
            "pushed"
        } else if report.unchanged {
            "unchanged"
        } else {
            "failed"
        };
        println!("  Publish: {status}");
    }
}
