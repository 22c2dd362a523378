//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A configured URL does not parse.
    #[error("Invalid URL for '{field}': {value}")]
    InvalidUrl { field: &'static str, value: String },

    /// No manifest URL was provided.
    #[error("No manifest URL configured; pass --manifest-url or set manifest-url in the config file")]
    MissingManifestUrl,
}
