//! Committing and pushing the rendered document.
//!
//! Publishing never fails the run: each git step that fails is logged and
//! recorded in the [`PublishReport`], and later steps are skipped.

use crate::templates::format_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, info_span, warn, Instrument};

/// Errors from a single git invocation.
#[derive(Debug, Error)]
pub enum PublishError {
    /// git could not be started.
    #[error("Failed to execute git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// git exited with a failure status.
    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// Outcome of a publish attempt.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublishReport {
    /// The document was staged.
    pub staged: bool,

    /// A commit was created.
    pub committed: bool,

    /// The working tree already matched the previous commit.
    pub unchanged: bool,

    /// The commit was pushed.
    pub pushed: bool,

    /// Errors of the failed step, if any.
    pub errors: Vec<String>,
}

impl PublishReport {
    /// Returns true if the document ended up pushed or there was nothing to publish.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty() && (self.pushed || self.unchanged)
    }

    fn record_failure(&mut self, step: &str, error: &PublishError) {
        warn!(step, error = %error, "Publish step failed");
        self.errors.push(error.to_string());
    }
}

/// Builds the commit message for a run.
#[must_use]
pub fn commit_message(generated_at: DateTime<Utc>) -> String {
    format!("Update theme rankings: {}", format_timestamp(generated_at))
}

/// Stages, commits and pushes `document`.
///
/// git runs in the directory containing the document. When `remote` is
/// `None`, the branch's configured upstream is used.
pub async fn publish(
    document: &Path,
    generated_at: DateTime<Utc>,
    remote: Option<&str>,
) -> PublishReport {
    let span = info_span!("publish", path = %document.display());

    async {
        let mut report = PublishReport::default();

        let repo_dir = match document.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = document
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| document.display().to_string());

        if let Err(e) = run_git_command(repo_dir, &["add", "--", &file_name]).await {
            report.record_failure("add", &e);
            return report;
        }
        report.staged = true;

        // `git diff --cached --quiet` exits 1 when something is staged.
        if run_git_command(repo_dir, &["diff", "--cached", "--quiet", "--", &file_name])
            .await
            .is_ok()
        {
            info!("Document unchanged, nothing to commit");
            report.unchanged = true;
            return report;
        }

        let message = commit_message(generated_at);
        if let Err(e) = run_git_command(repo_dir, &["commit", "-m", &message]).await {
            report.record_failure("commit", &e);
            return report;
        }
        report.committed = true;

        let push_args: Vec<&str> = match remote {
            Some(remote) => vec!["push", remote, "HEAD"],
            None => vec!["push"],
        };
        if let Err(e) = run_git_command(repo_dir, &push_args).await {
            report.record_failure("push", &e);
            return report;
        }
        report.pushed = true;

        info!("Published document");
        report
    }
    .instrument(span)
    .await
}

/// Runs a git command.
async fn run_git_command(path: &Path, args: &[&str]) -> Result<(), PublishError> {
    debug!(args = %args.join(" "), "Running git");

    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| PublishError::Spawn {
            command: args.join(" "),
            source: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PublishError::Failed {
            command: args.join(" "),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 6, 0, 0).unwrap()
    }

    async fn git(dir: &Path, args: &[&str]) -> bool {
        run_git_command(dir, args).await.is_ok()
    }

    async fn init_repo() -> Option<TempDir> {
        let temp = TempDir::new().unwrap();
        if !git(temp.path(), &["init", "--quiet"]).await {
            return None;
        }
        git(temp.path(), &["config", "user.email", "ranker@example.com"]).await;
        git(temp.path(), &["config", "user.name", "Theme Ranker"]).await;
        git(temp.path(), &["config", "commit.gpgsign", "false"]).await;
        Some(temp)
    }

    fn head_message(dir: &Path) -> String {
        let output = std::process::Command::new("git")
            .args(["log", "-1", "--format=%s"])
            .current_dir(dir)
            .output()
            .unwrap();
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    #[test]
    fn commit_message_embeds_timestamp() {
        assert_eq!(
            commit_message(timestamp()),
            "Update theme rankings: 2026-10-18 06:00:00 UTC"
        );
    }

    #[tokio::test]
    async fn commits_and_reports_push_failure_without_remote() {
        // Skip when git is not available.
        let Some(repo) = init_repo().await else {
            return;
        };
        let document = repo.path().join("THEMES.md");
        fs::write(&document, "# Themes\n").unwrap();

        let report = publish(&document, timestamp(), Some("nowhere")).await;

        assert!(report.staged);
        assert!(report.committed);
        assert!(!report.pushed);
        assert_eq!(report.errors.len(), 1);
        assert!(!report.succeeded());
        assert_eq!(
            head_message(repo.path()),
            "Update theme rankings: 2026-10-18 06:00:00 UTC"
        );
    }

    #[tokio::test]
    async fn unchanged_document_is_not_committed() {
        let Some(repo) = init_repo().await else {
            return;
        };
        let document = repo.path().join("THEMES.md");
        fs::write(&document, "# Themes\n").unwrap();
        git(repo.path(), &["add", "THEMES.md"]).await;
        git(repo.path(), &["commit", "--quiet", "-m", "initial"]).await;

        let report = publish(&document, timestamp(), None).await;

        assert!(report.staged);
        assert!(report.unchanged);
        assert!(!report.committed);
        assert!(report.succeeded());
        assert_eq!(head_message(repo.path()), "initial");
    }

    #[tokio::test]
    async fn reports_failure_outside_a_repository() {
        let temp = TempDir::new().unwrap();
        let document = temp.path().join("THEMES.md");
        fs::write(&document, "# Themes\n").unwrap();

        let report = publish(&document, timestamp(), None).await;

        assert!(!report.staged);
        assert!(!report.succeeded());
        assert_eq!(report.errors.len(), 1);
    }
}
