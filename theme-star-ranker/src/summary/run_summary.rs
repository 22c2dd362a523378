//! Run summary types.

use crate::aggregator::Aggregation;
use crate::publish::PublishReport;
use crate::records::{Resolution, StarOutcome};
use std::path::PathBuf;

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of entries read from the manifest.
    pub manifest_entries: usize,

    /// Number of entries skipped because their provider is unknown.
    pub skipped: usize,

    /// Number of rows in the rendered table.
    pub ranked: usize,

    /// Number of star counts read successfully.
    pub fetched: usize,

    /// Number of entries that hit the GitHub rate limit.
    pub rate_limited: usize,

    /// Number of entries whose lookup failed or had no star field.
    pub missing_stars: usize,

    /// Number of entries whose repository path could not be parsed.
    pub unparseable: usize,

    /// Where the document was written, if it was.
    pub output_path: Option<PathBuf>,

    /// Publish result, if publishing was requested.
    pub publish: Option<PublishReport>,

    /// Whether this was a dry run.
    pub dry_run: bool,

    /// The rendered document, kept only on dry runs since nothing is written.
    pub document: Option<String>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    /// Updates the summary with one resolved entry.
    pub fn record_resolution(&mut self, resolution: &Resolution) {
        self.ranked += 1;
        match resolution.outcome {
            StarOutcome::Fetched => self.fetched += 1,
            StarOutcome::RateLimited => self.rate_limited += 1,
            StarOutcome::MissingStars => self.missing_stars += 1,
            StarOutcome::Unparseable => self.unparseable += 1,
        }
    }

    /// Updates the summary with a full manifest pass.
    pub fn record_aggregation(&mut self, aggregation: &Aggregation) {
        self.skipped += aggregation.skipped_count();
        for resolution in &aggregation.resolutions {
            self.record_resolution(resolution);
        }
    }

    /// Number of rows that defaulted to zero stars.
    #[must_use]
    pub fn degraded(&self) -> usize {
        self.rate_limited + self.missing_stars + self.unparseable
    }

    /// Returns true if every entry was resolved and publishing (if any) succeeded.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.degraded() == 0 && self.publish.as_ref().map_or(true, PublishReport::succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::StarRecord;

    #[test]
    fn can_record_aggregation() {
        let aggregation = Aggregation {
            resolutions: vec![
                Resolution::new(StarRecord::new(42, "foo/bar", "https://github.com/foo/bar"), StarOutcome::Fetched),
                Resolution::new(StarRecord::new(0, "a/b", "https://github.com/a/b"), StarOutcome::RateLimited),
                Resolution::unparseable("https://github.com/a"),
            ],
            skipped: vec!["https://example.com/x".to_string()],
        };

        let mut summary = RunSummary::new(false);
        summary.record_aggregation(&aggregation);

        assert_eq!(summary.ranked, 3);
        assert_eq!(summary.fetched, 1);
        assert_eq!(summary.rate_limited, 1);
        assert_eq!(summary.unparseable, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.degraded(), 2);
        assert!(!summary.all_success());
    }

    #[test]
    fn empty_summary_is_success() {
        let summary = RunSummary::new(true);
        assert!(summary.dry_run);
        assert!(summary.all_success());
    }
}
