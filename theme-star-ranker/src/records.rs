//! Star records and ranking.

use serde::Serialize;
use std::cmp::Reverse;

/// Identifier recorded when a repository path cannot be extracted from its URL.
pub const UNKNOWN_IDENTIFIER: &str = "Unknown";

/// Star count for a single manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarRecord {
    stars: u64,
    identifier: String,
    source_url: String,
}

impl StarRecord {
    /// Creates a record.
    pub fn new(stars: u64, identifier: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            stars,
            identifier: identifier.into(),
            source_url: source_url.into(),
        }
    }

    /// Creates a zero-star record for a URL whose repository path could not be parsed.
    pub fn unresolved(source_url: impl Into<String>) -> Self {
        Self::new(0, UNKNOWN_IDENTIFIER, source_url)
    }

    /// Number of stars.
    pub fn stars(&self) -> u64 {
        self.stars
    }

    /// `owner/repo`, GitLab project path, or [`UNKNOWN_IDENTIFIER`].
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The manifest line this record was created from.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

/// How the star count of a record was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StarOutcome {
    /// Star count read from the provider response.
    Fetched,

    /// GitHub answered with a rate-limit error.
    RateLimited,

    /// The call failed or the response had no star field.
    MissingStars,

    /// The repository path could not be extracted from the URL.
    Unparseable,
}

/// A resolved record together with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub record: StarRecord,
    pub outcome: StarOutcome,
}

impl Resolution {
    pub fn new(record: StarRecord, outcome: StarOutcome) -> Self {
        Self { record, outcome }
    }

    /// Zero stars for a URL that did not match the provider's path pattern.
    pub fn unparseable(source_url: &str) -> Self {
        Self::new(StarRecord::unresolved(source_url), StarOutcome::Unparseable)
    }
}

/// Records sorted by star count, highest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedList(Vec<StarRecord>);

impl RankedList {
    pub fn iter(&self) -> std::slice::Iter<'_, StarRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[StarRecord] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a StarRecord;
    type IntoIter = std::slice::Iter<'a, StarRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sorts records by star count, descending.
///
/// The sort is stable: records with equal counts keep their manifest order.
#[must_use]
pub fn rank(mut records: Vec<StarRecord>) -> RankedList {
    records.sort_by_key(|record| Reverse(record.stars));
    RankedList(records)
}
