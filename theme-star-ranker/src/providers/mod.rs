//! Hosting providers and their star-count resolvers.
//!
//! A manifest line is classified by substring match on the provider host and
//! then handed to the matching resolver. Resolvers never fail: every problem
//! degrades to a zero-star record with a warning.

mod error;
pub mod github;
pub mod gitlab;

pub use error::ProviderError;
pub use github::GitHubResolver;
pub use gitlab::{encode_project_path, GitLabResolver};

use serde::Serialize;

/// Host name matched for GitHub repositories.
pub const GITHUB_HOST: &str = "github.com";

/// Host name matched for GitLab repositories.
pub const GITLAB_HOST: &str = "gitlab.com";

/// Hosting provider of a repository URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    GitHub,
    GitLab,
    Unknown,
}

/// Classifies a URL by the provider host it mentions.
///
/// This is a substring check rather than a URL parse, so scheme-less entries
/// such as `gitlab.com/group/project` are recognized.
#[must_use]
pub fn classify(url: &str) -> ProviderKind {
    if url.contains(GITHUB_HOST) {
        ProviderKind::GitHub
    } else if url.contains(GITLAB_HOST) {
        ProviderKind::GitLab
    } else {
        ProviderKind::Unknown
    }
}
