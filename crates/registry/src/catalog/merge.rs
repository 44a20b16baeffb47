//! Merging catalog data with hand-curated config

use super::entry::ModelEntry;
use super::filter::should_include_model;
use super::openrouter::OpenRouterModel;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Curated fields read back from an existing config entry.
///
/// Every field is optional: only what the curator actually wrote is carried
/// over.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CuratedEntry {
    pub model_name: Option<String>,
    pub aliases: Option<Vec<String>>,
    pub intelligence_score: Option<u8>,
    pub supports_json_mode: Option<bool>,
    pub supports_function_calling: Option<bool>,
    pub supports_extended_thinking: Option<bool>,
    pub supports_images: Option<bool>,
    pub supports_temperature: Option<bool>,
    pub temperature_constraint: Option<String>,
    pub use_openai_response_api: Option<bool>,
    pub default_reasoning_effort: Option<String>,
    pub allow_code_generation: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct CuratedFile {
    #[serde(rename = "_README", default)]
    readme: Value,
    #[serde(default)]
    models: Vec<CuratedEntry>,
}

/// The curated state of an existing config file
#[derive(Debug, Clone, Default)]
pub struct CuratedConfig {
    pub readme: Value,
    pub models_by_name: HashMap<String, CuratedEntry>,
}

impl CuratedConfig {
    /// Load curated data from an existing config.
    ///
    /// A missing file is a first sync. A file that cannot be read or parsed is
    /// logged and treated the same way so a corrupt config never blocks a
    /// regeneration.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<CuratedFile>(&content).map_err(|e| e.to_string())
            });

        match parsed {
            Ok(file) => Self::from_entries(file.readme, file.models),
            Err(e) => {
                tracing::warn!("Could not load existing config: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_entries(readme: Value, entries: Vec<CuratedEntry>) -> Self {
        let models_by_name = entries
            .into_iter()
            .filter_map(|entry| entry.model_name.clone().map(|name| (name, entry)))
            .collect();
        Self {
            readme,
            models_by_name,
        }
    }

    pub fn get(&self, model_name: &str) -> Option<&CuratedEntry> {
        self.models_by_name.get(model_name)
    }

    pub fn is_empty(&self) -> bool {
        self.models_by_name.is_empty()
    }
}

impl CuratedEntry {
    /// Overlay curated data onto a freshly extracted entry
    pub fn apply_to(&self, entry: &mut ModelEntry, keep_aliases: bool) {
        if keep_aliases {
            if let Some(aliases) = &self.aliases {
                entry.aliases = aliases.clone();
            }
            if let Some(score) = self.intelligence_score {
                entry.intelligence_score = score;
            }
        }

        if let Some(v) = self.supports_json_mode {
            entry.supports_json_mode = v;
        }
        if let Some(v) = self.supports_function_calling {
            entry.supports_function_calling = v;
        }
        if let Some(v) = self.supports_extended_thinking {
            entry.supports_extended_thinking = v;
        }
        if let Some(v) = self.supports_images {
            entry.supports_images = v;
        }
        if let Some(v) = self.supports_temperature {
            entry.supports_temperature = v;
        }
        if let Some(v) = &self.temperature_constraint {
            entry.temperature_constraint = Some(v.clone());
        }
        if let Some(v) = self.use_openai_response_api {
            entry.use_openai_response_api = Some(v);
        }
        if let Some(v) = &self.default_reasoning_effort {
            entry.default_reasoning_effort = Some(v.clone());
        }
        if let Some(v) = self.allow_code_generation {
            entry.allow_code_generation = Some(v);
        }
    }
}

/// Result of merging the catalog with curated config
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub models: Vec<ModelEntry>,
    pub included: usize,
    pub filtered: usize,
}

/// Filter the catalog, extract entries and overlay curated data.
///
/// Entries come out in model id order.
pub fn merge_model_configs(
    api_models: &BTreeMap<String, OpenRouterModel>,
    curated: &CuratedConfig,
    keep_aliases: bool,
    now: i64,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    for (model_id, api_model) in api_models {
        if !should_include_model(model_id, api_model) {
            outcome.filtered += 1;
            continue;
        }
        outcome.included += 1;

        let mut entry = ModelEntry::from_api(api_model, now);
        if let Some(existing) = curated.get(model_id) {
            existing.apply_to(&mut entry, keep_aliases);
        }
        outcome.models.push(entry);
    }

    tracing::info!(
        "Filtered out {} models, keeping {}",
        outcome.filtered,
        outcome.included
    );
    outcome
}

/// Make every name in the config resolve to exactly one model.
///
/// Canonical names are claimed first, then aliases in entry order. An alias
/// already claimed by another model is dropped from the later entry. Returns
/// how many aliases were dropped.
pub fn dedupe_aliases(entries: &mut [ModelEntry]) -> usize {
    let mut owners: HashMap<String, String> = HashMap::new();
    for entry in entries.iter() {
        owners
            .entry(entry.model_name.to_lowercase())
            .or_insert_with(|| entry.model_name.clone());
    }

    let mut dropped = 0;
    for entry in entries.iter_mut() {
        let canonical = entry.model_name.clone();
        entry.aliases.retain(|alias| {
            let key = alias.to_lowercase();
            if let Some(owner) = owners.get(&key) {
                // Repeats and the entry's own name are dropped quietly
                if owner != &canonical {
                    tracing::warn!(
                        "Alias '{}' on {} already belongs to {}, dropping it",
                        alias,
                        canonical,
                        owner
                    );
                    dropped += 1;
                }
                return false;
            }
            owners.insert(key, canonical.clone());
            true
        });
    }
    dropped
}
