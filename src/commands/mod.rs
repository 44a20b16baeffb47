pub mod capabilities;
pub mod list;
pub mod resolve;
pub mod sync;

use crate::ProviderArgs;
use anyhow::{bail, Result};
use modelreg_registry::{
    Config, ModelProvider, ModelRestrictions, OpenRouterProvider, ProviderRegistry,
    ProviderType, XaiProvider,
};

/// Registry for lookup commands.
///
/// Lookups never call the upstream APIs, so xAI is registered even without
/// an API key. OpenRouter needs a synced model config.
pub fn lookup_registry(config: &Config, args: &ProviderArgs) -> Result<ProviderRegistry> {
    let wants = |provider: ProviderType| args.provider.map_or(true, |p| p == provider);
    let mut registry = ProviderRegistry::new();

    if wants(ProviderType::XAI) {
        let api_key = config.get_xai_api_key().unwrap_or_default();
        let xai = XaiProvider::with_base_url(api_key, config.providers.xai_base_url.clone())?
            .with_restrictions(ModelRestrictions::from_env(ProviderType::XAI));
        registry.register(Box::new(xai));
    }

    if wants(ProviderType::OpenRouter) {
        let path = args
            .catalog
            .clone()
            .unwrap_or_else(|| config.catalog.output_path.clone());

        if path.exists() {
            let openrouter = OpenRouterProvider::from_file(
                config.catalog.api_key.clone().unwrap_or_default(),
                &path,
            )?
            .with_restrictions(ModelRestrictions::from_env(ProviderType::OpenRouter));
            registry.register(Box::new(openrouter));
        } else if args.provider == Some(ProviderType::OpenRouter) {
            bail!(
                "OpenRouter model config not found at {} (run `modelreg sync` first)",
                path.display()
            );
        } else {
            tracing::debug!("Skipping OpenRouter: no model config at {}", path.display());
        }
    }

    Ok(registry)
}

/// The single provider named on the command line, if any
pub fn selected_provider<'a>(
    registry: &'a ProviderRegistry,
    args: &ProviderArgs,
) -> Option<&'a dyn ModelProvider> {
    args.provider.and_then(|p| registry.provider(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn config_with_catalog(path: &Path) -> Config {
        let mut config = Config::default();
        config.catalog.output_path = path.to_path_buf();
        config
    }

    fn write_catalog(dir: &Path) -> PathBuf {
        let path = dir.join("openrouter_models.json");
        std::fs::write(
            &path,
            r#"{"models":[{"model_name":"mistralai/mistral-large","aliases":["mistral"]}]}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_xai_registered_without_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_catalog(&dir.path().join("missing.json"));

        let registry = lookup_registry(&config, &ProviderArgs::default()).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.provider(ProviderType::XAI).is_some());
        assert!(registry.provider(ProviderType::OpenRouter).is_none());
    }

    #[test]
    fn test_named_openrouter_requires_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_catalog(&dir.path().join("missing.json"));
        let args = ProviderArgs {
            provider: Some(ProviderType::OpenRouter),
            catalog: None,
        };

        let err = lookup_registry(&config, &args).err().unwrap();
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_catalog_flag_overrides_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = write_catalog(dir.path());
        let config = config_with_catalog(&dir.path().join("missing.json"));
        let args = ProviderArgs {
            provider: None,
            catalog: Some(catalog),
        };

        let registry = lookup_registry(&config, &args).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.resolve("mistral"),
            Some((ProviderType::OpenRouter, "mistralai/mistral-large".to_string()))
        );
        assert!(selected_provider(&registry, &args).is_none());
    }

    #[test]
    fn test_selected_provider() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_catalog(&write_catalog(dir.path()));

        let openrouter = ProviderArgs {
            provider: Some(ProviderType::OpenRouter),
            catalog: None,
        };
        let registry = lookup_registry(&config, &openrouter).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            selected_provider(&registry, &openrouter).map(|p| p.provider_type()),
            Some(ProviderType::OpenRouter)
        );

        let xai = ProviderArgs {
            provider: Some(ProviderType::XAI),
            catalog: None,
        };
        let registry = lookup_registry(&config, &xai).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.provider(ProviderType::OpenRouter).is_none());
        assert_eq!(
            selected_provider(&registry, &xai).map(|p| p.friendly_name()),
            Some("X.AI")
        );
    }
}
