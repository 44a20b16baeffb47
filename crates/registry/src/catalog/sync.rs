//! End-to-end catalog sync

use super::file::write_config;
use super::frontier::{apply_frontier_overrides, inject_frontier_models};
use super::merge::{dedupe_aliases, merge_model_configs, CuratedConfig};
use super::openrouter::OpenRouterClient;
use super::{CatalogError, CatalogResult};
use crate::config::CatalogConfig;
use std::path::PathBuf;

/// Options for a single sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub output_path: PathBuf,
    pub keep_aliases: bool,
    pub include_frontier: bool,
}

impl From<&CatalogConfig> for SyncOptions {
    fn from(config: &CatalogConfig) -> Self {
        Self {
            output_path: config.output_path.clone(),
            keep_aliases: config.keep_aliases,
            include_frontier: config.include_frontier,
        }
    }
}

/// Summary of a completed sync
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Models returned by the API
    pub fetched: usize,
    /// Frontier models added because the API did not list them
    pub frontier_added: usize,
    pub included: usize,
    pub filtered: usize,
    /// Aliases removed because another model already claimed them
    pub dropped_aliases: usize,
    pub output_path: PathBuf,
}

/// Fetch, filter, score, merge and write the OpenRouter model config
pub struct CatalogSync {
    client: OpenRouterClient,
    options: SyncOptions,
}

impl CatalogSync {
    pub fn new(client: OpenRouterClient, options: SyncOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Run the sync using the current wall clock for recency scoring
    pub async fn run(&self) -> CatalogResult<SyncReport> {
        self.run_at(chrono::Utc::now().timestamp()).await
    }

    /// Run the sync as of `now` (unix seconds)
    pub async fn run_at(&self, now: i64) -> CatalogResult<SyncReport> {
        if !self.client.has_api_key() {
            tracing::warn!("OPENROUTER_API_KEY not set - requests may be rate-limited");
        }

        let mut api_models = self.client.fetch_models().await?;
        if api_models.is_empty() {
            tracing::error!("No models returned from OpenRouter API");
            return Err(CatalogError::EmptyCatalog);
        }
        let fetched = api_models.len();

        let frontier_added = if self.options.include_frontier {
            tracing::info!("Including OpenRouter frontier models...");
            inject_frontier_models(&mut api_models, now)
        } else {
            0
        };

        let curated = CuratedConfig::load(&self.options.output_path);
        let mut outcome =
            merge_model_configs(&api_models, &curated, self.options.keep_aliases, now);

        if self.options.include_frontier {
            apply_frontier_overrides(&mut outcome.models);
        }
        let dropped_aliases = dedupe_aliases(&mut outcome.models);

        write_config(&self.options.output_path, outcome.models)?;
        tracing::info!("Successfully synced OpenRouter models");

        Ok(SyncReport {
            fetched,
            frontier_added,
            included: outcome.included,
            filtered: outcome.filtered,
            dropped_aliases,
            output_path: self.options.output_path.clone(),
        })
    }
}
