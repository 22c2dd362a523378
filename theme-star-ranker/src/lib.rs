#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod aggregator;
pub mod config;
pub mod manifest;
pub mod normalize;
pub mod providers;
pub mod publish;
pub mod rate_limit;
pub mod records;
pub mod runner;
pub mod summary;
pub mod templates;

pub use aggregator::{Aggregation, Aggregator};
pub use config::{load_config, ConfigError, FileConfig};
pub use manifest::{fetch_manifest, parse_manifest, ManifestError};
pub use normalize::normalize;
pub use providers::{
    classify, encode_project_path, GitHubResolver, GitLabResolver, ProviderError, ProviderKind,
};
pub use publish::{publish, PublishReport};
pub use records::{rank, RankedList, Resolution, StarOutcome, StarRecord, UNKNOWN_IDENTIFIER};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::RunSummary;
pub use templates::{DocumentRenderer, TemplateError};
