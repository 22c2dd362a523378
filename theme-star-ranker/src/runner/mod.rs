//! Orchestrates a full ranking run.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::aggregator::Aggregator;
use crate::config::{load_template, validate_url};
use crate::manifest::fetch_manifest;
use crate::providers::{GitHubResolver, GitLabResolver, ProviderError};
use crate::publish::publish;
use crate::records::rank;
use crate::summary::RunSummary;
use crate::templates::DocumentRenderer;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// User agent sent with manifest and GitLab requests.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches the manifest, resolves star counts and writes the ranked document.
pub struct Runner {
    config: RunnerConfig,
    http: reqwest::Client,
    aggregator: Aggregator,
    renderer: DocumentRenderer,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured URL or template is invalid or a
    /// client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        validate_url("manifest-url", config.manifest_url())?;
        validate_url("github-api-url", config.github_api_url())?;
        validate_url("gitlab-url", config.gitlab_url())?;

        let http = build_http_client(config.timeout())?;
        let github = GitHubResolver::new(
            config.token().map(str::to_string),
            config.github_api_url(),
            config.timeout(),
        )?;
        if config.token().is_none() {
            warn!("No GitHub token configured, using unauthenticated requests");
        }
        let gitlab = GitLabResolver::new(http.clone(), config.gitlab_url());
        let aggregator = Aggregator::new(github, gitlab).with_concurrency(config.concurrency());

        let mut renderer = DocumentRenderer::new()?
            .with_title(config.title())
            .with_attribution(config.attribution());
        if let Some(path) = config.template_path() {
            renderer = renderer.with_template(&load_template(path)?)?;
        }

        Ok(Self {
            config,
            http,
            aggregator,
            renderer,
        })
    }

    /// Executes the full run, stamping the document with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be fetched or the document
    /// cannot be rendered or written. Per-repository failures never abort.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        self.run_at(Utc::now()).await
    }

    /// Executes the full run with a fixed timestamp.
    ///
    /// # Errors
    ///
    /// See [`Runner::run`].
    pub async fn run_at(&self, generated_at: DateTime<Utc>) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());

        let entries = fetch_manifest(&self.http, self.config.manifest_url()).await?;
        if entries.is_empty() {
            warn!("Manifest is empty");
        }
        info!(count = entries.len(), "Loaded manifest");
        summary.manifest_entries = entries.len();

        let aggregation = self.aggregator.aggregate(&entries).await;
        if aggregation.skipped_count() > 0 {
            info!(
                count = aggregation.skipped_count(),
                "Skipped entries from unrecognized providers"
            );
        }
        summary.record_aggregation(&aggregation);

        let ranked = rank(aggregation.into_records());
        let document = self.renderer.render(&ranked, generated_at)?;

        if self.config.dry_run() {
            info!(rows = ranked.len(), "Dry run, document not written");
            summary.document = Some(document);
            return Ok(summary);
        }

        let output_path = self.config.output_path();
        write_document(output_path, &document)?;
        info!(path = %output_path.display(), rows = ranked.len(), "Wrote document");
        summary.output_path = Some(output_path.to_path_buf());

        if self.config.publish() {
            let report = publish(output_path, generated_at, self.config.git_remote()).await;
            summary.publish = Some(report);
        }

        Ok(summary)
    }
}

fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, ProviderError> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Overwrites the document, creating parent directories as needed.
fn write_document(path: &Path, document: &str) -> Result<(), RunnerError> {
    let write_error = |source: std::io::Error| RunnerError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, document).map_err(write_error)
}
