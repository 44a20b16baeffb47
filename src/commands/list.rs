use super::lookup_registry;
use crate::ProviderArgs;
use anyhow::Result;
use modelreg_registry::Config;

pub fn run(config: &Config, args: &ProviderArgs) -> Result<()> {
    let registry = lookup_registry(config, args)?;
    if registry.is_empty() {
        println!("No providers available");
        return Ok(());
    }

    for provider in registry.providers() {
        let models = provider.list_models();
        println!("\n🤖 {} ({} models):", provider.friendly_name(), models.len());

        for model in models {
            if model.aliases.is_empty() {
                println!("  [{:>2}] {}", model.intelligence_score, model.model_name);
            } else {
                println!(
                    "  [{:>2}] {} ({})",
                    model.intelligence_score,
                    model.model_name,
                    model.aliases.join(", ")
                );
            }
        }
    }

    if let Some(restricted) = registry
        .providers()
        .filter(|p| p.restrictions().is_restricted())
        .map(|p| p.provider_type().to_string())
        .reduce(|a, b| format!("{}, {}", a, b))
    {
        println!("\n⚠ Model restrictions active for: {}", restricted);
    }

    println!();
    Ok(())
}
