//! Markdown rendering of the ranked list using Handlebars.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, DocumentRenderer};

use chrono::{DateTime, Utc};

/// Built-in document template.
///
/// Available variables: `title`, `attribution`, `last_run` and `rows`, where
/// each row has `identifier`, `url` and `stars`.
pub const DEFAULT_TEMPLATE: &str = r"# {{title}}

{{attribution}}

Last run: {{last_run}}

| Repository | Stars |
| --- | --- |
{{#each rows~}}
| [{{identifier}}]({{url}}) | {{stars}} |
{{/each~}}
";

/// Default document title.
pub const DEFAULT_TITLE: &str = "Third-Party Themes";

/// Default attribution line.
pub const DEFAULT_ATTRIBUTION: &str =
    "Themes ranked by repository stars. This file is generated automatically from the theme manifest.";

/// Formats the run timestamp, e.g. `2026-10-18 09:30:00 UTC`.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_timestamp_in_utc() {
        let timestamp = Utc.with_ymd_and_hms(2026, 10, 18, 9, 5, 3).unwrap();
        assert_eq!(format_timestamp(timestamp), "2026-10-18 09:05:03 UTC");
    }
}
