//! Provider alias resolution and capability lookup
//!
//! Every provider owns a [`CapabilityTable`] of canonical models. User-typed
//! names are resolved against that table before anything is sent upstream,
//! so the provider API only ever sees canonical identifiers.
//!
//! # Usage
//!
//! ```rust
//! use modelreg_registry::{ModelProvider, XaiProvider};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let xai = XaiProvider::new("xai-api-key")?;
//! assert_eq!(xai.resolve_model_name("grok"), "grok-4-1-fast-non-reasoning");
//!
//! let caps = xai.get_capabilities("grokfast")?;
//! assert_eq!(caps.context_window, 2_000_000);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod capabilities;
pub mod openai_compatible;
pub mod openrouter;
pub mod registry;
pub mod restrictions;
pub mod xai;

pub use capabilities::{CapabilityTable, ModelCapabilities, ProviderType, TemperatureConstraint};
pub use openai_compatible::OpenAiCompatibleClient;
pub use openrouter::OpenRouterProvider;
pub use registry::ProviderRegistry;
pub use restrictions::ModelRestrictions;
pub use xai::XaiProvider;

use crate::catalog::CatalogError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by provider lookups and calls
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unsupported model '{model}' for provider {provider}")]
    UnsupportedModel {
        model: String,
        provider: ProviderType,
    },

    #[error("No registered provider supports model '{model}'")]
    UnknownModel { model: String },

    #[error("Model '{model}' is not allowed by the {provider} restriction policy")]
    ModelNotAllowed {
        model: String,
        provider: ProviderType,
    },

    #[error("Alias '{alias}' is claimed by both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Model '{model}' is defined more than once")]
    DuplicateModel { model: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: ProviderType,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse {
        provider: ProviderType,
        reason: String,
    },

    #[error("Model catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A single-turn generation request
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    /// Canonical name or alias
    pub model_name: String,
    pub prompt: String,
    pub system_prompt: Option<String>,
    /// Falls back to the model's default temperature when unset
    pub temperature: Option<f64>,
    pub max_output_tokens: Option<u64>,
}

impl ModelRequest {
    pub fn new(model_name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            prompt: prompt.into(),
            system_prompt: None,
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u64) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Provider reply to a [`ModelRequest`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelResponse {
    pub content: String,
    /// Canonical model that served the request
    pub model_name: String,
    pub friendly_name: String,
    pub provider: ProviderType,
    pub usage: Usage,
    pub finish_reason: Option<String>,
}

/// A model provider with a fixed table of canonical models
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn provider_type(&self) -> ProviderType;

    /// Human-readable provider name, e.g. `X.AI`
    fn friendly_name(&self) -> &str;

    fn capability_table(&self) -> &CapabilityTable;

    fn restrictions(&self) -> &ModelRestrictions;

    /// Client used to dispatch chat completions
    fn client(&self) -> &OpenAiCompatibleClient;

    /// Canonical name for `model_name`, or the input unchanged when unknown
    fn resolve_model_name(&self, model_name: &str) -> String {
        self.capability_table()
            .resolve(model_name)
            .unwrap_or(model_name)
            .to_string()
    }

    /// Whether `model_name` resolves to a known model that restrictions allow
    fn validate_model_name(&self, model_name: &str) -> bool {
        let Some(canonical) = self.capability_table().resolve(model_name) else {
            return false;
        };

        let allowed = self.restrictions().is_allowed(model_name, canonical);
        if !allowed {
            tracing::debug!(
                "{} model '{}' ({}) blocked by restrictions",
                self.provider_type(),
                model_name,
                canonical
            );
        }
        allowed
    }

    /// Capability descriptor for a model name or alias
    fn get_capabilities(&self, model_name: &str) -> ProviderResult<ModelCapabilities> {
        let capabilities = self.capability_table().lookup(model_name).ok_or_else(|| {
            ProviderError::UnsupportedModel {
                model: model_name.to_string(),
                provider: self.provider_type(),
            }
        })?;

        if !self
            .restrictions()
            .is_allowed(model_name, &capabilities.model_name)
        {
            return Err(ProviderError::ModelNotAllowed {
                model: model_name.to_string(),
                provider: self.provider_type(),
            });
        }

        Ok(capabilities.clone())
    }

    /// Canonical models, highest intelligence score first
    fn list_models(&self) -> Vec<&ModelCapabilities> {
        let mut models: Vec<&ModelCapabilities> = self.capability_table().models().collect();
        models.sort_by(|a, b| {
            b.intelligence_score
                .cmp(&a.intelligence_score)
                .then_with(|| a.model_name.cmp(&b.model_name))
        });
        models
    }

    /// Resolve the requested model and dispatch the request upstream
    async fn generate_content(&self, request: ModelRequest) -> ProviderResult<ModelResponse> {
        let capabilities = self.get_capabilities(&request.model_name)?;
        if capabilities.model_name != request.model_name {
            tracing::debug!(
                "Resolved {} model '{}' to '{}'",
                self.provider_type(),
                request.model_name,
                capabilities.model_name
            );
        }
        self.client().chat_completion(&capabilities, &request).await
    }
}
