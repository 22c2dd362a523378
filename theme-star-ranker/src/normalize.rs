//! Repository URL parsing and normalization.
//!
//! The resolvers use [`github_owner_repo`] and [`gitlab_project_path`] to
//! build API keys, while the renderer uses [`normalize`] to produce the
//! canonical link for each table row.

use crate::providers::{classify, ProviderKind, GITHUB_HOST, GITLAB_HOST};

/// GitLab separates the project path from sub-routes (`/-/tree/main`) with this marker.
const GITLAB_ROUTE_SEPARATOR: &str = "/-/";

/// Prefixes `https://` when the URL has no scheme.
#[must_use]
pub fn ensure_scheme(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Strips one trailing `.git` suffix.
#[must_use]
pub fn strip_git_suffix(value: &str) -> &str {
    value.strip_suffix(".git").unwrap_or(value)
}

/// Returns the path following `{host}/`, without query string or fragment.
fn path_after_host<'a>(url: &'a str, host: &str) -> Option<&'a str> {
    let marker = format!("{host}/");
    let start = url.find(&marker)? + marker.len();
    let rest = &url[start..];
    let end = rest.find(|c: char| c == '?' || c == '#').unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Extracts `(owner, repo)` from a GitHub URL.
///
/// Anything after the repository name (`/tree/main`, `/releases`, ...) is
/// dropped, as is a trailing `.git`.
///
/// Returns `None` when either segment is missing.
#[must_use]
pub fn github_owner_repo(url: &str) -> Option<(String, String)> {
    let path = path_after_host(url, GITHUB_HOST)?;
    let mut segments = path.split('/');

    let owner = segments.next().filter(|owner| !owner.is_empty())?;
    let repo = strip_git_suffix(segments.next()?);
    if repo.is_empty() {
        return None;
    }

    Some((owner.to_string(), repo.to_string()))
}

/// Extracts the full project path (`group/subgroup/project`) from a GitLab URL.
///
/// Returns `None` when nothing follows the host.
#[must_use]
pub fn gitlab_project_path(url: &str) -> Option<String> {
    let path = path_after_host(url, GITLAB_HOST)?;
    let path = path
        .split(GITLAB_ROUTE_SEPARATOR)
        .next()
        .unwrap_or(path)
        .trim_end_matches('/');
    let path = strip_git_suffix(path);

    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}

/// Reduces a repository URL to its canonical `https://<host>/<path>` form.
///
/// Unrecognized URLs, and recognized ones whose path cannot be extracted,
/// are returned unchanged.
#[must_use]
pub fn normalize(url: &str) -> String {
    let with_scheme = ensure_scheme(url);
    let normalized = match classify(url) {
        ProviderKind::GitHub => github_owner_repo(&with_scheme)
            .map(|(owner, repo)| format!("https://{GITHUB_HOST}/{owner}/{repo}")),
        ProviderKind::GitLab => {
            gitlab_project_path(&with_scheme).map(|path| format!("https://{GITLAB_HOST}/{path}"))
        }
        ProviderKind::Unknown => None,
    };

    normalized.unwrap_or_else(|| url.to_string())
}
