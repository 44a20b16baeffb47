//! Capability descriptors and the per-provider alias table

use super::ProviderError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Providers that expose model capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    XAI,
    OpenRouter,
}

impl ProviderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::XAI => "xai",
            ProviderType::OpenRouter => "openrouter",
        }
    }

    /// Prefix of provider-scoped environment variables
    pub fn env_prefix(&self) -> &'static str {
        match self {
            ProviderType::XAI => "XAI",
            ProviderType::OpenRouter => "OPENROUTER",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xai" | "x-ai" | "grok" => Ok(ProviderType::XAI),
            "openrouter" => Ok(ProviderType::OpenRouter),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

/// Temperature bounds a model accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemperatureConstraint {
    /// Only one value is accepted
    Fixed { value: f64 },
    /// Any value in `[min, max]`
    Range { min: f64, max: f64, default: f64 },
    /// One of a fixed set of values
    Discrete { values: Vec<f64>, default: f64 },
}

const TEMPERATURE_EPSILON: f64 = 1e-9;

impl Default for TemperatureConstraint {
    fn default() -> Self {
        TemperatureConstraint::Range {
            min: 0.0,
            max: 2.0,
            default: 0.3,
        }
    }
}

impl TemperatureConstraint {
    /// Build the conventional constraint for a config-file constraint name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "fixed" => Some(TemperatureConstraint::Fixed { value: 1.0 }),
            "range" => Some(TemperatureConstraint::default()),
            "discrete" => Some(TemperatureConstraint::Discrete {
                values: vec![0.0, 0.3, 0.7, 1.0],
                default: 0.3,
            }),
            _ => None,
        }
    }

    pub fn validate(&self, temperature: f64) -> bool {
        match self {
            TemperatureConstraint::Fixed { value } => {
                (temperature - value).abs() < TEMPERATURE_EPSILON
            }
            TemperatureConstraint::Range { min, max, .. } => {
                temperature >= *min && temperature <= *max
            }
            TemperatureConstraint::Discrete { values, .. } => values
                .iter()
                .any(|v| (temperature - v).abs() < TEMPERATURE_EPSILON),
        }
    }

    /// Nearest accepted value
    pub fn corrected(&self, temperature: f64) -> f64 {
        match self {
            TemperatureConstraint::Fixed { value } => *value,
            TemperatureConstraint::Range { min, max, .. } => temperature.clamp(*min, *max),
            TemperatureConstraint::Discrete { values, default } => values
                .iter()
                .copied()
                .min_by(|a, b| {
                    (a - temperature)
                        .abs()
                        .total_cmp(&(b - temperature).abs())
                })
                .unwrap_or(*default),
        }
    }

    pub fn default_temperature(&self) -> f64 {
        match self {
            TemperatureConstraint::Fixed { value } => *value,
            TemperatureConstraint::Range { default, .. } => *default,
            TemperatureConstraint::Discrete { default, .. } => *default,
        }
    }

    pub fn description(&self) -> String {
        match self {
            TemperatureConstraint::Fixed { value } => format!("Only supports temperature={}", value),
            TemperatureConstraint::Range { min, max, .. } => {
                format!("Supports temperature range [{}, {}]", min, max)
            }
            TemperatureConstraint::Discrete { values, .. } => {
                let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                format!("Supports temperatures: {}", rendered.join(", "))
            }
        }
    }
}

/// Fixed record of what a canonical model supports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCapabilities {
    pub provider: ProviderType,
    pub model_name: String,
    pub friendly_name: String,
    pub context_window: u64,
    pub max_output_tokens: u64,
    pub supports_extended_thinking: bool,
    pub supports_system_prompts: bool,
    pub supports_streaming: bool,
    pub supports_function_calling: bool,
    pub supports_json_mode: bool,
    pub supports_images: bool,
    pub max_image_size_mb: f64,
    pub supports_temperature: bool,
    pub temperature_constraint: TemperatureConstraint,
    pub description: String,
    /// Short names that resolve to `model_name`; never includes `model_name`
    pub aliases: Vec<String>,
    pub intelligence_score: u8,
    pub allow_code_generation: bool,
}

/// Canonical models of one provider plus their case-insensitive alias index
#[derive(Debug, Clone, Default)]
pub struct CapabilityTable {
    models: BTreeMap<String, ModelCapabilities>,
    /// Lowercased canonical names and aliases -> canonical name
    index: HashMap<String, String>,
}

impl CapabilityTable {
    /// Build a table, rejecting any name that would resolve two ways
    pub fn new<I>(models: I) -> Result<Self, ProviderError>
    where
        I: IntoIterator<Item = ModelCapabilities>,
    {
        let mut table = Self::default();

        for mut capabilities in models {
            let canonical = capabilities.model_name.clone();
            if table.models.contains_key(&canonical) {
                return Err(ProviderError::DuplicateModel { model: canonical });
            }

            capabilities
                .aliases
                .retain(|alias| !alias.eq_ignore_ascii_case(&canonical));

            let keys = std::iter::once(canonical.as_str())
                .chain(capabilities.aliases.iter().map(String::as_str))
                .map(str::to_lowercase)
                .collect::<Vec<_>>();
            for key in keys {
                if let Some(existing) = table.index.get(&key) {
                    if existing != &canonical {
                        return Err(ProviderError::DuplicateAlias {
                            alias: key,
                            first: existing.clone(),
                            second: canonical,
                        });
                    }
                    continue;
                }
                table.index.insert(key, canonical.clone());
            }

            table.models.insert(canonical, capabilities);
        }

        Ok(table)
    }

    /// Canonical name for a model name or alias.
    ///
    /// An exact canonical match wins; otherwise names and aliases are
    /// compared case-insensitively.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if let Some((canonical, _)) = self.models.get_key_value(name) {
            return Some(canonical.as_str());
        }
        self.index.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn lookup(&self, name: &str) -> Option<&ModelCapabilities> {
        self.resolve(name).and_then(|canonical| self.models.get(canonical))
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.models.contains_key(canonical)
    }

    /// Models in canonical name order
    pub fn models(&self) -> impl Iterator<Item = &ModelCapabilities> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
