//! GitHub rate-limit detection.
//!
//! Rate limiting is never waited out or retried: an entry that hits the limit
//! is recorded with zero stars. This module only detects the condition and
//! reports the remaining budget up front.

use octocrab::Octocrab;
use tracing::{debug, info, warn};

/// Message GitHub returns once the request budget is exhausted.
pub const RATE_LIMIT_MESSAGE: &str = "API rate limit exceeded";

/// Rate limit information for the core API.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Builds the info from raw API counts, saturating values that do not fit.
    #[must_use]
    pub fn from_counts(remaining: usize, limit: usize, reset: u64) -> Self {
        Self {
            remaining: u32::try_from(remaining).unwrap_or(u32::MAX),
            reset,
            limit: u32::try_from(limit).unwrap_or(u32::MAX),
        }
    }

    /// Returns true when fewer requests remain than are about to be made.
    #[must_use]
    pub fn is_insufficient_for(&self, requests: usize) -> bool {
        (self.remaining as usize) < requests
    }
}

/// Returns true if the text carries GitHub's rate-limit message.
#[must_use]
pub fn is_rate_limited(text: &str) -> bool {
    text.contains(RATE_LIMIT_MESSAGE)
}

/// Returns true if an API error was caused by rate limiting.
#[must_use]
pub fn is_rate_limit_error(error: &octocrab::Error) -> bool {
    match error {
        octocrab::Error::GitHub { source, .. } => is_rate_limited(&source.message),
        other => is_rate_limited(&other.to_string()),
    }
}

/// Checks the current rate limit status for the core API.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo::from_counts(
        core.remaining,
        core.limit,
        core.reset,
    ))
}

/// Logs whether the remaining budget covers the planned lookups.
///
/// Failures of the rate limit endpoint itself are only logged at debug level.
pub async fn report_core_rate_limit(octocrab: &Octocrab, planned_requests: usize) {
    match check_core_rate_limit(octocrab).await {
        Ok(info) if info.is_insufficient_for(planned_requests) => {
            warn!(
                remaining = info.remaining,
                limit = info.limit,
                reset = info.reset,
                planned = planned_requests,
                "GitHub rate limit is lower than the number of lookups, some entries will report zero stars"
            );
        }
        Ok(info) => {
            info!(
                remaining = info.remaining,
                limit = info.limit,
                planned = planned_requests,
                "GitHub rate limit"
            );
        }
        Err(e) => {
            debug!(error = %e, "Could not read GitHub rate limit");
        }
    }
}
