//! Provider client error types.

use thiserror::Error;

/// Errors that can occur while constructing provider clients.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The GitHub client could not be built.
    #[error("Failed to build GitHub client: {0}")]
    GitHubClient(#[from] octocrab::Error),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
