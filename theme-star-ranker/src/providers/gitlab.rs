//! GitLab star-count resolver.

use crate::normalize::{ensure_scheme, gitlab_project_path};
use crate::records::{Resolution, StarOutcome, StarRecord};
use serde::Deserialize;
use tracing::{debug, info_span, warn, Instrument};

/// Default GitLab instance URL.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com";

/// The part of `GET /api/v4/projects/{id}` we read.
#[derive(Debug, Deserialize)]
struct ProjectStars {
    star_count: Option<u64>,
}

/// Encodes a project path the way the GitLab API addresses projects.
///
/// Every `/` becomes `%2F`; no other character is touched.
#[must_use]
pub fn encode_project_path(path: &str) -> String {
    path.replace('/', "%2F")
}

/// Resolves GitLab project URLs to star counts.
///
/// Requests are always unauthenticated.
#[derive(Debug, Clone)]
pub struct GitLabResolver {
    client: reqwest::Client,
    base_url: String,
}

impl GitLabResolver {
    /// Creates a resolver that queries the instance at `base_url`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the star count of the project named by `url`.
    pub async fn resolve(&self, url: &str) -> Resolution {
        let Some(project_path) = gitlab_project_path(&ensure_scheme(url)) else {
            warn!(url, "Could not extract project path from GitLab URL");
            return Resolution::unparseable(url);
        };

        let span = info_span!("gitlab", project = %project_path);

        async move {
            let endpoint = format!(
                "{}/api/v4/projects/{}",
                self.base_url.trim_end_matches('/'),
                encode_project_path(&project_path)
            );
            debug!(endpoint = %endpoint, "Fetching project");

            let (stars, outcome) = match self.fetch_body(&endpoint).await {
                Ok(body) => stars_from_body(&body),
                Err(e) => {
                    warn!(error = %e, "GitLab API request failed, recording zero stars");
                    (0, StarOutcome::MissingStars)
                }
            };

            Resolution::new(StarRecord::new(stars, project_path, url), outcome)
        }
        .instrument(span)
        .await
    }

    async fn fetch_body(&self, endpoint: &str) -> Result<String, reqwest::Error> {
        self.client.get(endpoint).send().await?.text().await
    }
}

/// Reads `star_count` from a project response body.
fn stars_from_body(body: &str) -> (u64, StarOutcome) {
    match serde_json::from_str::<ProjectStars>(body) {
        Ok(ProjectStars {
            star_count: Some(stars),
        }) => (stars, StarOutcome::Fetched),
        _ => {
            warn!(response = %body, "GitLab response has no star_count, recording zero stars");
            (0, StarOutcome::MissingStars)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_replaces_only_slashes() {
        assert_eq!(encode_project_path("baz/qux"), "baz%2Fqux");
        assert_eq!(
            encode_project_path("group/sub-group/my.project_1"),
            "group%2Fsub-group%2Fmy.project_1"
        );
        assert_eq!(encode_project_path("a b+c%d"), "a b+c%d");
        assert_eq!(encode_project_path("single"), "single");
    }

    #[test]
    fn reads_star_count() {
        let body = r#"{"id": 7, "path_with_namespace": "baz/qux", "star_count": 7}"#;
        assert_eq!(stars_from_body(body), (7, StarOutcome::Fetched));
    }

    #[test]
    fn missing_star_count_defaults_to_zero() {
        assert_eq!(
            stars_from_body(r#"{"message":"404 Project Not Found"}"#),
            (0, StarOutcome::MissingStars)
        );
        assert_eq!(stars_from_body("<html>bad gateway</html>"), (0, StarOutcome::MissingStars));
    }
}
