//! Ordered lookup across all configured providers

use super::capabilities::{ModelCapabilities, ProviderType};
use super::openrouter::OpenRouterProvider;
use super::xai::XaiProvider;
use super::{ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderResult};
use crate::config::Config;

/// Providers in priority order. Native integrations are registered before
/// OpenRouter so a name both know resolves to the native provider.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn ModelProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn ModelProvider>) {
        tracing::debug!("Registered provider {}", provider.provider_type());
        self.providers.push(provider);
    }

    /// Every provider the configuration enables
    pub fn from_config(config: &Config) -> ProviderResult<Self> {
        let mut registry = Self::new();

        if let Some(xai) = XaiProvider::from_config(config)? {
            registry.register(Box::new(xai));
        }
        if let Some(openrouter) = OpenRouterProvider::from_config(config)? {
            registry.register(Box::new(openrouter));
        }

        if registry.is_empty() {
            tracing::warn!("No model providers configured");
        }
        Ok(registry)
    }

    pub fn providers(&self) -> impl Iterator<Item = &dyn ModelProvider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    pub fn provider(&self, provider_type: ProviderType) -> Option<&dyn ModelProvider> {
        self.providers()
            .find(|p| p.provider_type() == provider_type)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// First provider accepting `model_name`, with the canonical model it maps to
    pub fn resolve(&self, model_name: &str) -> Option<(ProviderType, String)> {
        self.provider_for(model_name)
            .map(|p| (p.provider_type(), p.resolve_model_name(model_name)))
    }

    pub fn provider_for(&self, model_name: &str) -> Option<&dyn ModelProvider> {
        self.providers().find(|p| p.validate_model_name(model_name))
    }

    pub fn get_capabilities(&self, model_name: &str) -> ProviderResult<ModelCapabilities> {
        self.accepting_provider(model_name)?
            .get_capabilities(model_name)
    }

    pub async fn generate_content(&self, request: ModelRequest) -> ProviderResult<ModelResponse> {
        self.accepting_provider(&request.model_name)?
            .generate_content(request)
            .await
    }

    /// Provider accepting `model_name`. A name that some provider knows but
    /// restricts reports that provider's `ModelNotAllowed`.
    fn accepting_provider(&self, model_name: &str) -> ProviderResult<&dyn ModelProvider> {
        if let Some(provider) = self.provider_for(model_name) {
            return Ok(provider);
        }

        if let Some(provider) = self
            .providers()
            .find(|p| p.capability_table().resolve(model_name).is_some())
        {
            return Err(ProviderError::ModelNotAllowed {
                model: model_name.to_string(),
                provider: provider.provider_type(),
            });
        }

        Err(ProviderError::UnknownModel {
            model: model_name.to_string(),
        })
    }
}
