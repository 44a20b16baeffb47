use anyhow::{Context, Result};
use modelreg_registry::{CatalogSync, Config, OpenRouterClient, SyncOptions};
use std::path::PathBuf;

pub async fn run(
    mut config: Config,
    output: Option<PathBuf>,
    keep_aliases: bool,
    include_frontier: bool,
) -> Result<()> {
    if let Some(output) = output {
        config.catalog.output_path = output;
    }
    config.catalog.keep_aliases |= keep_aliases;
    config.catalog.include_frontier |= include_frontier;
    config.validate()?;

    let client = OpenRouterClient::from_config(&config.catalog)?;
    let sync = CatalogSync::new(client, SyncOptions::from(&config.catalog));
    let report = sync.run().await.context("OpenRouter model sync failed")?;

    println!("✓ Synced OpenRouter models to {}", report.output_path.display());
    println!("  • Fetched:  {}", report.fetched);
    if sync.options().include_frontier {
        println!("  • Frontier: {} added", report.frontier_added);
    }
    println!("  • Included: {}", report.included);
    println!("  • Filtered: {}", report.filtered);
    if report.dropped_aliases > 0 {
        println!("  • Dropped {} clashing aliases", report.dropped_aliases);
    }
    Ok(())
}
