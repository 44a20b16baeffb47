use super::{lookup_registry, selected_provider};
use crate::ProviderArgs;
use anyhow::Result;
use modelreg_registry::Config;

pub fn run(config: &Config, name: &str, args: &ProviderArgs) -> Result<()> {
    let registry = lookup_registry(config, args)?;

    // A named provider reports its own unsupported-model error
    if let Some(provider) = selected_provider(&registry, args) {
        let capabilities = provider.get_capabilities(name)?;
        println!("{} -> {} ({})", name, capabilities.model_name, provider.provider_type());
        return Ok(());
    }

    let capabilities = registry.get_capabilities(name)?;
    println!(
        "{} -> {} ({})",
        name, capabilities.model_name, capabilities.provider
    );
    Ok(())
}
