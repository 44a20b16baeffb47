//! X.AI (Grok) provider

use super::capabilities::{CapabilityTable, ModelCapabilities, ProviderType, TemperatureConstraint};
use super::openai_compatible::{OpenAiCompatibleClient, DEFAULT_REQUEST_TIMEOUT};
use super::restrictions::ModelRestrictions;
use super::{ModelProvider, ProviderResult};
use crate::config::{Config, DEFAULT_XAI_BASE_URL};

pub const FRIENDLY_NAME: &str = "X.AI";

/// The only model served through the native xAI integration
pub const GROK_4_1_FAST_NON_REASONING: &str = "grok-4-1-fast-non-reasoning";

/// Capability records for every xAI model
pub fn xai_model_capabilities() -> Vec<ModelCapabilities> {
    vec![ModelCapabilities {
        provider: ProviderType::XAI,
        model_name: GROK_4_1_FAST_NON_REASONING.to_string(),
        friendly_name: format!("{} (Grok 4.1 Fast Non-Reasoning)", FRIENDLY_NAME),
        context_window: 2_000_000,
        max_output_tokens: 30_000,
        supports_extended_thinking: false,
        supports_system_prompts: true,
        supports_streaming: true,
        supports_function_calling: true,
        supports_json_mode: true,
        supports_images: true,
        max_image_size_mb: 20.0,
        supports_temperature: true,
        temperature_constraint: TemperatureConstraint::Range {
            min: 0.0,
            max: 2.0,
            default: 0.3,
        },
        description: "Grok 4.1 Fast Non-Reasoning (2M context) - Fast responses without \
                      extended reasoning, supports vision and function calling"
            .to_string(),
        aliases: [
            "grok",
            "grok4",
            "grok41",
            "grokfast",
            "grokcode",
            "grokheavy",
            "grok-4-1-fast-non-reasoning-latest",
        ]
        .iter()
        .map(|alias| alias.to_string())
        .collect(),
        intelligence_score: 18,
        allow_code_generation: false,
    }]
}

pub struct XaiProvider {
    table: CapabilityTable,
    restrictions: ModelRestrictions,
    client: OpenAiCompatibleClient,
}

impl XaiProvider {
    /// Provider against the public xAI endpoint with no model restrictions
    pub fn new(api_key: impl Into<String>) -> ProviderResult<Self> {
        Self::with_base_url(api_key, DEFAULT_XAI_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> ProviderResult<Self> {
        let table = CapabilityTable::new(xai_model_capabilities())?;
        let client = OpenAiCompatibleClient::new(
            ProviderType::XAI,
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

    pub fn with_restrictions(mut self, restrictions: ModelRestrictions) -> Self {
        self.restrictions = restrictions;
        self
    }

    /// Build from loaded configuration; restrictions come from `XAI_ALLOWED_MODELS`
    pub fn from_config(config: &Config) -> ProviderResult<Option<Self>> {
        let api_key = match config.get_xai_api_key() {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("{}, skipping xAI provider", e);
                return Ok(None);
            }
        };

        let provider = Self::with_base_url(api_key, config.providers.xai_base_url.clone())?
            .with_restrictions(ModelRestrictions::from_env(ProviderType::XAI));
        tracing::info!("Initialized xAI provider at {}", provider.base_url());
        Ok(Some(provider))
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn api_key(&self) -> &str {
        self.client.api_key()
    }
}

impl ModelProvider for XaiProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::XAI
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

impl std::fmt::Debug for XaiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XaiProvider")
            .field("base_url", &self.base_url())
            .field("models", &self.table.len())
            .field("restrictions", &self.restrictions)
            .finish()
    }
}
