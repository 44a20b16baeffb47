//! OpenRouter-authored frontier models
//!
//! These stealth/preview models can be announced before the catalog lists
//! them. When frontier sync is enabled they are injected into the fetched
//! catalog and their curated specs override whatever was extracted.

use super::entry::ModelEntry;
use super::openrouter::OpenRouterModel;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierModel {
    pub model_name: &'static str,
    pub aliases: &'static [&'static str],
    pub context_window: u64,
    pub max_output_tokens: u64,
    pub intelligence_score: u8,
    pub description: &'static str,
}

pub const FRONTIER_MODELS: &[FrontierModel] = &[
    FrontierModel {
        model_name: "openrouter/sonoma-dusk-alpha",
        aliases: &["sonoma-dusk", "dusk"],
        context_window: 128_000,
        max_output_tokens: 32_000,
        intelligence_score: 17,
        description: "OpenRouter Sonoma Dusk Alpha - Bleeding edge frontier model",
    },
    FrontierModel {
        model_name: "openrouter/sonoma-sky-alpha",
        aliases: &["sonoma-sky", "sky"],
        context_window: 128_000,
        max_output_tokens: 32_000,
        intelligence_score: 16,
        description: "OpenRouter Sonoma Sky Alpha - High-performance frontier model",
    },
    FrontierModel {
        model_name: "openrouter/horizon-beta",
        aliases: &["horizon"],
        context_window: 200_000,
        max_output_tokens: 64_000,
        intelligence_score: 18,
        description: "OpenRouter Horizon Beta - Advanced frontier model with large context",
    },
    FrontierModel {
        model_name: "openrouter/cypher-alpha",
        aliases: &["cypher"],
        context_window: 128_000,
        max_output_tokens: 32_000,
        intelligence_score: 16,
        description: "OpenRouter Cypher Alpha - Specialized reasoning model",
    },
];

pub fn find_frontier_model(model_name: &str) -> Option<&'static FrontierModel> {
    FRONTIER_MODELS.iter().find(|m| m.model_name == model_name)
}

/// Add a minimal catalog entry for every frontier model the API did not list.
/// Returns how many were added.
pub fn inject_frontier_models(catalog: &mut BTreeMap<String, OpenRouterModel>, now: i64) -> usize {
    let mut added = 0;
    for frontier in FRONTIER_MODELS {
        if catalog.contains_key(frontier.model_name) {
            continue;
        }

        let mut model = OpenRouterModel::new(frontier.model_name);
        model.name = frontier.description.to_string();
        model.description = frontier.description.to_string();
        model.context_length = Some(frontier.context_window);
        model.created = now;

        tracing::debug!("Injecting frontier model {}", frontier.model_name);
        catalog.insert(frontier.model_name.to_string(), model);
        added += 1;
    }
    added
}

/// Overwrite extracted specs with the curated frontier values
pub fn apply_frontier_overrides(entries: &mut [ModelEntry]) {
    for entry in entries.iter_mut() {
        if let Some(frontier) = find_frontier_model(&entry.model_name) {
            entry.aliases = frontier.aliases.iter().map(|a| a.to_string()).collect();
            entry.context_window = frontier.context_window;
            entry.max_output_tokens = frontier.max_output_tokens;
            entry.intelligence_score = frontier.intelligence_score;
            entry.description = frontier.description.to_string();
        }
    }
}
