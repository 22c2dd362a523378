//! Configuration file loading.
//!
//! Every setting in the file is optional; command-line flags take precedence
//! over file values and built-in defaults fill the rest.
//!
//! ```toml
//! manifest-url = "https://example.org/themes.txt"
//! output-path = "THEMES.md"
//! title = "Third-Party Themes"
//! concurrency = 1
//! ```

mod error;

pub use error::ConfigError;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Default output document path.
pub const DEFAULT_OUTPUT_PATH: &str = "THEMES.md";

/// Settings read from a TOML config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct FileConfig {
    /// URL of the newline-delimited repository list.
    pub manifest_url: Option<String>,

    /// Where the rendered document is written.
    pub output_path: Option<PathBuf>,

    /// Document title.
    pub title: Option<String>,

    /// Line shown under the title.
    pub attribution: Option<String>,

    /// Handlebars template replacing the built-in one.
    pub template_path: Option<PathBuf>,

    /// GitHub REST API base URL.
    pub github_api_url: Option<String>,

    /// GitLab instance URL.
    pub gitlab_url: Option<String>,

    /// Remote pushed to when publishing.
    pub git_remote: Option<String>,

    /// Maximum lookups in flight.
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Loads a TOML config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid config TOML.
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    debug!(path = %path.display(), "Loading config file");

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Reads a template file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_template(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Checks that `value` is an absolute http(s) URL.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] otherwise.
pub fn validate_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        }),
    }
}

/// Treats an empty or whitespace-only token as absent.
#[must_use]
pub fn normalize_token(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_reads_all_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ranker.toml");
        fs::write(
            &path,
            r#"
manifest-url = "https://example.org/themes.txt"
output-path = "docs/THEMES.md"
title = "Editor Themes"
attribution = "Generated nightly."
template-path = "template.hbs"
github-api-url = "https://github.example.com/api/v3"
gitlab-url = "https://gitlab.example.com"
git-remote = "origin"
concurrency = 4
timeout-secs = 30
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config.manifest_url.as_deref(),
            Some("https://example.org/themes.txt")
        );
        assert_eq!(config.output_path, Some(PathBuf::from("docs/THEMES.md")));
        assert_eq!(config.title.as_deref(), Some("Editor Themes"));
        assert_eq!(config.git_remote.as_deref(), Some("origin"));
        assert_eq!(config.concurrency, Some(4));
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn load_config_allows_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ranker.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(load_config(&path).unwrap(), FileConfig::default());
    }

    #[test]
    fn load_config_rejects_unknown_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ranker.toml");
        fs::write(&path, "manifest = \"https://example.org\"\n").unwrap();

        let result = load_config(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn load_config_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_config(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }

    #[test]
    fn validate_url_requires_http_scheme() {
        assert!(validate_url("manifest-url", "https://example.org/themes.txt").is_ok());
        assert!(validate_url("manifest-url", "http://127.0.0.1:8080/list").is_ok());
        assert!(matches!(
            validate_url("manifest-url", "example.org/themes.txt"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(validate_url("manifest-url", "ftp://example.org/themes.txt").is_err());
    }

    #[test]
    fn normalize_token_drops_empty_values() {
        assert_eq!(normalize_token(None), None);
        assert_eq!(normalize_token(Some(String::new())), None);
        assert_eq!(normalize_token(Some("  ".to_string())), None);
        assert_eq!(
            normalize_token(Some(" ghp_abc ".to_string())),
            Some("ghp_abc".to_string())
        );
    }
}
