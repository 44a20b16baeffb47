//! Aggregator catalog sync
//!
//! Pulls the OpenRouter `/models` catalog and turns it into the curated
//! `openrouter_models.json` config consumed by the OpenRouter provider:
//!
//! - [`openrouter`]: HTTP client and the typed view over a catalog entry
//! - [`filter`]: which upstream vendors are kept
//! - [`scoring`]: the 1-20 intelligence score heuristic
//! - [`entry`]: capability extraction into a [`ModelEntry`]
//! - [`merge`]: overlaying hand-curated data from the existing config
//! - [`frontier`]: OpenRouter frontier models that may predate the API listing
//! - [`file`]: the on-disk config format
//! - [`sync`]: the end-to-end pipeline

pub mod entry;
pub mod file;
pub mod filter;
pub mod frontier;
pub mod merge;
pub mod openrouter;
pub mod scoring;
pub mod sync;

pub use entry::ModelEntry;
pub use file::{generate_readme, write_config, ModelConfigFile};
pub use filter::{should_include_model, EXCLUDED_PROVIDERS, PREFERRED_PROVIDERS};
pub use frontier::{apply_frontier_overrides, inject_frontier_models, FrontierModel, FRONTIER_MODELS};
pub use merge::{dedupe_aliases, merge_model_configs, CuratedConfig, CuratedEntry, MergeOutcome};
pub use openrouter::{OpenRouterClient, OpenRouterModel};
pub use scoring::estimate_intelligence_score;
pub use sync::{CatalogSync, SyncOptions, SyncReport};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while syncing the aggregator catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse catalog response: {reason}")]
    InvalidResponse { reason: String },

    #[error("No models returned from the catalog API")]
    EmptyCatalog,

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {context} - {source}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
