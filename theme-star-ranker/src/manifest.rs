//! Manifest retrieval.
//!
//! The manifest is a plain-text list with one repository URL per line.

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while fetching the manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The request could not be sent or the body could not be read.
    #[error("Failed to fetch manifest '{url}': {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Manifest request to '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Fetches the manifest at `url` and returns its entries.
///
/// The request is made once, without retries.
///
/// # Errors
///
/// Returns [`ManifestError`] if the request fails or the status is not a success.
pub async fn fetch_manifest(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<String>, ManifestError> {
    info!(url, "Fetching manifest");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| ManifestError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ManifestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|source| ManifestError::Request {
            url: url.to_string(),
            source,
        })?;

    let entries = parse_manifest(&body);
    debug!(count = entries.len(), "Parsed manifest");
    Ok(entries)
}

/// Splits manifest text into entries.
///
/// Lines are trimmed and blank lines are dropped. Every other line is kept
/// for classification.
#[must_use]
pub fn parse_manifest(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
