//! GitHub star-count resolver.

use super::ProviderError;
use crate::normalize::{ensure_scheme, github_owner_repo};
use crate::rate_limit::{is_rate_limit_error, is_rate_limited, report_core_rate_limit};
use crate::records::{Resolution, StarOutcome, StarRecord};
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info_span, warn, Instrument};

/// Default GitHub REST API base URL.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// The part of `GET /repos/{owner}/{repo}` we read.
#[derive(Debug, Deserialize)]
struct RepositoryStars {
    stargazers_count: Option<u64>,
}

/// Resolves GitHub repository URLs to star counts.
#[derive(Clone)]
pub struct GitHubResolver {
    octocrab: Octocrab,
}

impl GitHubResolver {
    /// Builds a resolver.
    ///
    /// Without a token, requests are unauthenticated and subject to the lower
    /// anonymous rate limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL is invalid or the client cannot be built.
    pub fn new(
        token: Option<String>,
        api_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        install_crypto_provider();

        // Each lookup is a single request; failures degrade to zero stars.
        let mut builder = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .base_uri(api_url)?;
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        if timeout.is_some() {
            builder = builder
                .set_connect_timeout(timeout)
                .set_read_timeout(timeout);
        }

        Ok(Self {
            octocrab: builder.build()?,
        })
    }

    /// Logs the remaining core API budget against the planned lookups.
    pub async fn report_rate_limit(&self, planned_requests: usize) {
        report_core_rate_limit(&self.octocrab, planned_requests).await;
    }

    /// Fetches the star count of the repository named by `url`.
    ///
    /// Sub-paths, a `.git` suffix, query strings and fragments are dropped
    /// before the lookup. Rate limiting, failed calls and missing fields all
    /// yield zero stars.
    pub async fn resolve(&self, url: &str) -> Resolution {
        let Some((owner, repo)) = github_owner_repo(&ensure_scheme(url)) else {
            warn!(url, "Could not extract owner/repo from GitHub URL");
            return Resolution::unparseable(url);
        };

        let identifier = format!("{owner}/{repo}");
        let span = info_span!("github", repo = %identifier);

        async move {
            let route = format!("/repos/{owner}/{repo}");
            debug!(route = %route, "Fetching repository");

            let (stars, outcome) = match self.octocrab.get::<Value, _, ()>(&route, None).await {
                Ok(body) => stars_from_body(&body),
                Err(e) if is_rate_limit_error(&e) => {
                    warn!(error = %e, "GitHub API rate limit exceeded, recording zero stars");
                    (0, StarOutcome::RateLimited)
                }
                Err(e) => {
                    warn!(error = %e, "GitHub API request failed, recording zero stars");
                    (0, StarOutcome::MissingStars)
                }
            };

            Resolution::new(StarRecord::new(stars, identifier, url), outcome)
        }
        .instrument(span)
        .await
    }
}

/// Reads `stargazers_count` from a repository response.
fn stars_from_body(body: &Value) -> (u64, StarOutcome) {
    if body
        .get("message")
        .and_then(Value::as_str)
        .is_some_and(is_rate_limited)
    {
        warn!("GitHub API rate limit exceeded, recording zero stars");
        return (0, StarOutcome::RateLimited);
    }

    match RepositoryStars::deserialize(body) {
        Ok(RepositoryStars {
            stargazers_count: Some(stars),
        }) => (stars, StarOutcome::Fetched),
        _ => {
            warn!(response = %body, "GitHub response has no stargazers_count, recording zero stars");
            (0, StarOutcome::MissingStars)
        }
    }
}

/// Makes sure rustls has a process-wide crypto provider before the client is built.
fn install_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none() {
        let _ = rustls::crypto::ring::default_provider().install_default();
    }
}
