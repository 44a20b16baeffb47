//! Model Registry
//!
//! Curated LLM metadata for a multi-provider gateway. The registry has two
//! halves:
//!
//! - [`catalog`]: synchronizes the OpenRouter model catalog, filters out
//!   vendors that have native integrations, scores each model and merges the
//!   result with hand-curated overrides into a JSON config file.
//! - [`providers`]: per-provider alias resolution and capability lookup, so a
//!   short name like `grok` always reaches the upstream API as its canonical
//!   model identifier.

pub mod catalog;
pub mod config;
pub mod providers;

pub use catalog::{
    CatalogError, CatalogSync, ModelConfigFile, ModelEntry, OpenRouterClient, SyncOptions,
    SyncReport,
};
pub use config::{CatalogConfig, Config, ConfigError, LoggingConfig, ProvidersConfig};
pub use providers::{
    CapabilityTable, ModelCapabilities, ModelProvider, ModelRequest, ModelResponse,
    ModelRestrictions, OpenRouterProvider, ProviderError, ProviderRegistry, ProviderType,
    TemperatureConstraint, XaiProvider,
};
