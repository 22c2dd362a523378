//! Resolution of manifest entries into star records.

use crate::providers::{classify, GitHubResolver, GitLabResolver, ProviderKind};
use crate::records::{Resolution, StarRecord};
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

/// Records and skipped entries of one pass over the manifest.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// One resolution per GitHub/GitLab entry, in manifest order.
    pub resolutions: Vec<Resolution>,

    /// Entries that matched no known provider.
    pub skipped: Vec<String>,
}

impl Aggregation {
    /// Number of entries skipped because their provider is unknown.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Consumes the aggregation, keeping only the records.
    #[must_use]
    pub fn into_records(self) -> Vec<StarRecord> {
        self.resolutions.into_iter().map(|r| r.record).collect()
    }
}

/// Dispatches manifest entries to the matching provider resolver.
#[derive(Clone)]
pub struct Aggregator {
    github: GitHubResolver,
    gitlab: GitLabResolver,
    concurrency: usize,
}

impl Aggregator {
    /// Creates an aggregator that resolves one entry at a time.
    pub fn new(github: GitHubResolver, gitlab: GitLabResolver) -> Self {
        Self {
            github,
            gitlab,
            concurrency: 1,
        }
    }

    /// Allows up to `concurrency` lookups in flight. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Classifies and resolves every non-empty entry.
    ///
    /// Results keep manifest order regardless of the concurrency limit.
    pub async fn aggregate(&self, entries: &[String]) -> Aggregation {
        let mut skipped = Vec::new();
        let mut lookups = Vec::new();

        for entry in entries.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
            match classify(entry) {
                ProviderKind::Unknown => {
                    debug!(url = entry, "Skipping entry from unrecognized provider");
                    skipped.push(entry.to_string());
                }
                kind => lookups.push((kind, entry)),
            }
        }

        let github_lookups = lookups
            .iter()
            .filter(|(kind, _)| *kind == ProviderKind::GitHub)
            .count();
        if github_lookups > 0 {
            self.github.report_rate_limit(github_lookups).await;
        }

        info!(
            lookups = lookups.len(),
            skipped = skipped.len(),
            "Resolving star counts"
        );

        let resolutions: Vec<Resolution> = stream::iter(lookups)
            .map(|(kind, url)| self.resolve(kind, url))
            .buffered(self.concurrency)
            .collect()
            .await;

        Aggregation {
            resolutions,
            skipped,
        }
    }

    async fn resolve(&self, kind: ProviderKind, url: &str) -> Resolution {
        match kind {
            ProviderKind::GitHub => self.github.resolve(url).await,
            ProviderKind::GitLab => self.gitlab.resolve(url).await,
            ProviderKind::Unknown => Resolution::unparseable(url),
        }
    }
}
