//! OpenRouter provider backed by the synced model config

use super::capabilities::{CapabilityTable, ModelCapabilities, ProviderType, TemperatureConstraint};
use super::openai_compatible::{OpenAiCompatibleClient, DEFAULT_REQUEST_TIMEOUT};
use super::restrictions::ModelRestrictions;
use super::{ModelProvider, ProviderResult};
use crate::catalog::{ModelConfigFile, ModelEntry};
use crate::config::{Config, DEFAULT_OPENROUTER_BASE_URL};
use std::path::Path;

pub const FRIENDLY_NAME: &str = "OpenRouter";

impl From<&ModelEntry> for ModelCapabilities {
    fn from(entry: &ModelEntry) -> Self {
        let temperature_constraint = match entry.temperature_constraint.as_deref() {
            Some(name) => TemperatureConstraint::from_name(name).unwrap_or_else(|| {
                tracing::warn!(
                    "Unknown temperature constraint '{}' for {}, using default range",
                    name,
                    entry.model_name
                );
                TemperatureConstraint::default()
            }),
            None => TemperatureConstraint::default(),
        };

        ModelCapabilities {
            provider: ProviderType::OpenRouter,
            model_name: entry.model_name.clone(),
            friendly_name: format!("{} ({})", FRIENDLY_NAME, entry.model_name),
            context_window: entry.context_window,
            max_output_tokens: entry.max_output_tokens,
            supports_extended_thinking: entry.supports_extended_thinking,
            supports_system_prompts: true,
            supports_streaming: true,
            supports_function_calling: entry.supports_function_calling,
            supports_json_mode: entry.supports_json_mode,
            supports_images: entry.supports_images,
            max_image_size_mb: entry.max_image_size_mb,
            supports_temperature: entry.supports_temperature,
            temperature_constraint,
            description: entry.description.clone(),
            aliases: entry.aliases.clone(),
            intelligence_score: entry.intelligence_score,
            allow_code_generation: entry.allow_code_generation.unwrap_or(false),
        }
    }
}

pub struct OpenRouterProvider {
    table: CapabilityTable,
    restrictions: ModelRestrictions,
    client: OpenAiCompatibleClient,
}

impl OpenRouterProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        config: &ModelConfigFile,
    ) -> ProviderResult<Self> {
        let table = CapabilityTable::new(config.models.iter().map(ModelCapabilities::from))?;
        let client = OpenAiCompatibleClient::new(
            ProviderType::OpenRouter,
            base_url,
            api_key,
            DEFAULT_REQUEST_TIMEOUT,
        )?;

        Ok(Self {
            table,
            restrictions: ModelRestrictions::unrestricted(),
            client,
        })
    }

    /// Provider against the public endpoint using a config file on disk
    pub fn from_file<P: AsRef<Path>>(api_key: impl Into<String>, path: P) -> ProviderResult<Self> {
        let config = ModelConfigFile::load(path)?;
        Self::new(api_key, DEFAULT_OPENROUTER_BASE_URL, &config)
    }

    pub fn with_restrictions(mut self, restrictions: ModelRestrictions) -> Self {
        self.restrictions = restrictions;
        self
    }

    /// Build from loaded configuration; `None` when no synced catalog exists yet
    pub fn from_config(config: &Config) -> ProviderResult<Option<Self>> {
        let path = &config.catalog.output_path;
        if !path.exists() {
            tracing::debug!(
                "No OpenRouter model config at {}, skipping OpenRouter provider",
                path.display()
            );
            return Ok(None);
        }

        let models = ModelConfigFile::load(path)?;
        let api_key = config.catalog.api_key.clone().unwrap_or_default();
        let provider = Self::new(api_key, config.providers.openrouter_base_url.clone(), &models)?
            .with_restrictions(ModelRestrictions::from_env(ProviderType::OpenRouter));
        tracing::info!(
            "Loaded {} OpenRouter models from {}",
            provider.table.len(),
            path.display()
        );
        Ok(Some(provider))
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl ModelProvider for OpenRouterProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::OpenRouter
    }

    fn friendly_name(&self) -> &str {
        FRIENDLY_NAME
    }

    fn capability_table(&self) -> &CapabilityTable {
        &self.table
    }

    fn restrictions(&self) -> &ModelRestrictions {
        &self.restrictions
    }

    fn client(&self) -> &OpenAiCompatibleClient {
        &self.client
    }
}
