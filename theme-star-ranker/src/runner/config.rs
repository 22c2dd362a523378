//! Runner configuration.

use crate::config::{normalize_token, FileConfig, DEFAULT_OUTPUT_PATH};
use crate::providers::github::DEFAULT_GITHUB_API_URL;
use crate::providers::gitlab::DEFAULT_GITLAB_URL;
use crate::templates::{DEFAULT_ATTRIBUTION, DEFAULT_TITLE};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a ranking run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// URL of the repository manifest.
    manifest_url: String,
    /// Path the document is written to.
    output_path: PathBuf,
    /// GitHub token; `None` means unauthenticated requests.
    token: Option<String>,
    /// Whether to print the document instead of writing it.
    dry_run: bool,
    /// Whether to commit and push the written document.
    publish: bool,
    /// Remote to push to; `None` uses the upstream.
    git_remote: Option<String>,
    /// Maximum lookups in flight.
    concurrency: usize,
    /// Per-request timeout; `None` waits indefinitely.
    timeout: Option<Duration>,
    /// Document title.
    title: String,
    /// Line shown under the title.
    attribution: String,
    /// Template replacing the built-in one.
    template_path: Option<PathBuf>,
    /// GitHub REST API base URL.
    github_api_url: String,
    /// GitLab instance URL.
    gitlab_url: String,
}

impl RunnerConfig {
    /// Creates a configuration with defaults for everything but the manifest URL.
    pub fn new(manifest_url: impl Into<String>) -> Self {
        Self {
            manifest_url: manifest_url.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            token: None,
            dry_run: false,
            publish: false,
            git_remote: None,
            concurrency: 1,
            timeout: None,
            title: DEFAULT_TITLE.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            template_path: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            gitlab_url: DEFAULT_GITLAB_URL.to_string(),
        }
    }

    /// Creates a configuration from config file values.
    ///
    /// Returns `None` when the file does not name a manifest URL.
    pub fn from_file(file: FileConfig) -> Option<Self> {
        let mut config = Self::new(file.manifest_url?);
        if let Some(path) = file.output_path {
            config.output_path = path;
        }
        if let Some(title) = file.title {
            config.title = title;
        }
        if let Some(attribution) = file.attribution {
            config.attribution = attribution;
        }
        if let Some(url) = file.github_api_url {
            config.github_api_url = url;
        }
        if let Some(url) = file.gitlab_url {
            config.gitlab_url = url;
        }
        if let Some(concurrency) = file.concurrency {
            config.concurrency = concurrency.max(1);
        }
        config.template_path = file.template_path;
        config.git_remote = file.git_remote;
        config.timeout = file.timeout_secs.map(Duration::from_secs);
        Some(config)
    }

    /// Sets the output path.
    pub fn with_output_path(mut self, output_path: PathBuf) -> Self {
        self.output_path = output_path;
        self
    }

    /// Sets the GitHub token. Empty tokens are ignored.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = normalize_token(token);
        self
    }

    /// Enables or disables dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enables or disables publishing.
    pub fn with_publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    /// Sets the remote to push to.
    pub fn with_git_remote(mut self, git_remote: impl Into<String>) -> Self {
        self.git_remote = Some(git_remote.into());
        self
    }

    /// Sets the maximum number of lookups in flight.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the attribution line.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    /// Sets a template file replacing the built-in one.
    pub fn with_template_path(mut self, template_path: PathBuf) -> Self {
        self.template_path = Some(template_path);
        self
    }

    /// Sets the GitHub API base URL.
    pub fn with_github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = url.into();
        self
    }

    /// Sets the GitLab instance URL.
    pub fn with_gitlab_url(mut self, url: impl Into<String>) -> Self {
        self.gitlab_url = url.into();
        self
    }

    /// Returns the manifest URL.
    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    /// Returns the output path.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns whether publishing is enabled.
    pub fn publish(&self) -> bool {
        self.publish
    }

    /// Returns the remote to push to.
    pub fn git_remote(&self) -> Option<&str> {
        self.git_remote.as_deref()
    }

    /// Returns the max lookups in flight.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the attribution line.
    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    /// Returns the template path.
    pub fn template_path(&self) -> Option<&Path> {
        self.template_path.as_deref()
    }

    /// Returns the GitHub API base URL.
    pub fn github_api_url(&self) -> &str {
        &self.github_api_url
    }

    /// Returns the GitLab instance URL.
    pub fn gitlab_url(&self) -> &str {
        &self.gitlab_url
    }
}
