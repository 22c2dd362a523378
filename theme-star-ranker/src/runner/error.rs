//! Runner error types.

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Provider client initialization errors.
    #[error(transparent)]
    Provider(#[from] crate::providers::ProviderError),

    /// The manifest could not be fetched.
    #[error(transparent)]
    Manifest(#[from] crate::manifest::ManifestError),

    /// The document could not be rendered.
    #[error(transparent)]
    Template(#[from] crate::templates::TemplateError),

    /// The document could not be written.
    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
