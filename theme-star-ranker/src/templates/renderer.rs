//! Document renderer.

use super::{format_timestamp, TemplateError, DEFAULT_ATTRIBUTION, DEFAULT_TEMPLATE, DEFAULT_TITLE};
use crate::normalize::normalize;
use crate::records::RankedList;
use chrono::{DateTime, Utc};
use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use serde_json::json;

const DOCUMENT_TEMPLATE: &str = "document";

/// Creates a Handlebars registry for markdown output.
///
/// The registry is configured with:
/// - No HTML escaping (for markdown output)
/// - Strict mode (catches missing variables)
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    // Disable HTML escaping for markdown output
    hbs.register_escape_fn(no_escape);

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    hbs
}

/// One table row.
#[derive(Debug, Serialize)]
struct Row<'a> {
    identifier: &'a str,
    url: String,
    stars: u64,
}

/// Renders the ranked list as a markdown document.
pub struct DocumentRenderer {
    handlebars: Handlebars<'static>,
    title: String,
    attribution: String,
}

impl DocumentRenderer {
    /// Creates a renderer using the built-in template, title and attribution.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in template fails to register.
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(DOCUMENT_TEMPLATE, DEFAULT_TEMPLATE)?;
        Ok(Self {
            handlebars,
            title: DEFAULT_TITLE.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        })
    }

    /// Sets the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the attribution line.
    #[must_use]
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }

    /// Replaces the built-in template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template does not parse.
    pub fn with_template(mut self, template: &str) -> Result<Self, TemplateError> {
        self.handlebars
            .register_template_string(DOCUMENT_TEMPLATE, template)?;
        Ok(self)
    }

    /// Renders the document.
    ///
    /// Each row links to the normalized repository URL. Output depends only on
    /// `ranked` and `generated_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(
        &self,
        ranked: &RankedList,
        generated_at: DateTime<Utc>,
    ) -> Result<String, TemplateError> {
        let rows: Vec<Row<'_>> = ranked
            .iter()
            .map(|record| Row {
                identifier: record.identifier(),
                url: normalize(record.source_url()),
                stars: record.stars(),
            })
            .collect();

        let data = json!({
            "title": self.title,
            "attribution": self.attribution,
            "last_run": format_timestamp(generated_at),
            "rows": rows,
        });

        Ok(self.handlebars.render(DOCUMENT_TEMPLATE, &data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{rank, StarRecord};
    use chrono::TimeZone;

    fn sample_ranked() -> RankedList {
        rank(vec![
            StarRecord::new(7, "baz/qux", "gitlab.com/baz/qux.git"),
            StarRecord::new(42, "foo/bar", "https://github.com/foo/bar/tree/main"),
            StarRecord::unresolved("https://github.com/lonely"),
        ])
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn table_rows(document: &str) -> Vec<&str> {
        document
            .lines()
            .filter(|line| line.starts_with("| ["))
            .collect()
    }

    #[test]
    fn renders_header_and_rows_in_rank_order() {
        let renderer = DocumentRenderer::new().unwrap();
        let document = renderer.render(&sample_ranked(), timestamp()).unwrap();

        assert!(document.starts_with("# Third-Party Themes\n"));
        assert!(document.contains("Last run: 2026-10-18 12:00:00 UTC"));
        assert!(document.contains("| Repository | Stars |\n| --- | --- |\n"));
        assert_eq!(
            table_rows(&document),
            vec![
                "| [foo/bar](https://github.com/foo/bar) | 42 |",
                "| [baz/qux](https://gitlab.com/baz/qux) | 7 |",
                "| [Unknown](https://github.com/lonely) | 0 |",
            ]
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let renderer = DocumentRenderer::new().unwrap();
        let ranked = sample_ranked();

        let first = renderer.render(&ranked, timestamp()).unwrap();
        let second = renderer.render(&ranked, timestamp()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_list_renders_header_only() {
        let renderer = DocumentRenderer::new().unwrap();
        let document = renderer.render(&RankedList::default(), timestamp()).unwrap();

        assert!(document.ends_with("| --- | --- |\n"));
        assert!(table_rows(&document).is_empty());
    }

    #[test]
    fn title_and_attribution_are_configurable() {
        let renderer = DocumentRenderer::new()
            .unwrap()
            .with_title("Editor Themes")
            .with_attribution("Maintained by <the community>.");
        let document = renderer.render(&sample_ranked(), timestamp()).unwrap();

        assert!(document.starts_with("# Editor Themes\n"));
        // Should NOT escape HTML entities
        assert!(document.contains("Maintained by <the community>."));
    }

    #[test]
    fn custom_template_replaces_builtin() {
        let renderer = DocumentRenderer::new()
            .unwrap()
            .with_template("{{#each rows}}{{identifier}}={{stars}};{{/each}}")
            .unwrap();
        let document = renderer.render(&sample_ranked(), timestamp()).unwrap();

        assert_eq!(document, "foo/bar=42;baz/qux=7;Unknown=0;");
    }

    #[test]
    fn strict_mode_rejects_unknown_variables() {
        let renderer = DocumentRenderer::new()
            .unwrap()
            .with_template("{{nonexistent}}")
            .unwrap();

        assert!(renderer.render(&sample_ranked(), timestamp()).is_err());
    }
}
