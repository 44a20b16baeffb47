use super::{lookup_registry, selected_provider};
use crate::ProviderArgs;
use anyhow::Result;
use modelreg_registry::Config;

pub fn run(config: &Config, name: &str, args: &ProviderArgs) -> Result<()> {
    let registry = lookup_registry(config, args)?;

    let capabilities = match selected_provider(&registry, args) {
        Some(provider) => provider.get_capabilities(name)?,
        None => registry.get_capabilities(name)?,
    };

    println!("{}", serde_json::to_string_pretty(&capabilities)?);
    Ok(())
}
