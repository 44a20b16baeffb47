//! On-disk format of `openrouter_models.json`

use super::entry::ModelEntry;
use super::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

/// The generated model config: a descriptive README block plus the models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfigFile {
    #[serde(rename = "_README", default)]
    pub readme: Value,
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

impl ModelConfigFile {
    pub fn new(models: Vec<ModelEntry>) -> Self {
        Self {
            readme: generate_readme(),
            models,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| CatalogError::Serialization {
            context: format!("parsing {}", path.display()),
            source,
        })
    }

    pub fn to_json_pretty(&self) -> CatalogResult<String> {
        serde_json::to_string_pretty(self).map_err(|source| CatalogError::Serialization {
            context: "rendering model config".to_string(),
            source,
        })
    }
}

/// README block written at the top of the config
pub fn generate_readme() -> Value {
    json!({
        "description": "Model metadata for OpenRouter-backed providers.",
        "documentation": "docs/custom_models.md",
        "usage": "Models listed here are exposed through OpenRouter. Aliases are case-insensitive.",
        "field_notes": "Matches the ModelCapabilities descriptor returned by provider capability lookups.",
        "field_descriptions": {
            "model_name": "The model identifier - OpenRouter format (e.g., 'mistralai/mistral-large') or custom model name (e.g., 'llama3.2')",
            "aliases": "Array of short names users can type instead of the full model name",
            "context_window": "Total number of tokens the model can process (input + output combined)",
            "max_output_tokens": "Maximum number of tokens the model can generate in a single response",
            "supports_extended_thinking": "Whether the model supports extended reasoning tokens",
            "supports_json_mode": "Whether the model can guarantee valid JSON output",
            "supports_function_calling": "Whether the model supports function/tool calling",
            "supports_images": "Whether the model can process images/visual input",
            "max_image_size_mb": "Maximum total size in MB for all images combined (capped at 40MB max for custom models)",
            "supports_temperature": "Whether the model accepts temperature parameter in API calls (set to false for fixed-temperature reasoning models)",
            "temperature_constraint": "Type of temperature constraint: 'fixed' (fixed value), 'range' (continuous range), 'discrete' (specific values), or omit for default range",
            "use_openai_response_api": "Set to true when the model must use the /responses endpoint. Leave false/omit for standard chat completions.",
            "default_reasoning_effort": "Default reasoning effort level for models that support it (e.g., 'low', 'medium', 'high'). Omit if not applicable.",
            "description": "Human-readable description of the model",
            "intelligence_score": "1-20 human rating used as the primary signal for auto-mode model ordering",
            "allow_code_generation": "Whether this model can generate and suggest fully working code - complete with functions, files, and detailed implementation instructions - for your AI tool to use right away. Only set this to 'true' for a model more capable than the AI model / CLI you're currently using."
        }
    })
}

/// Write the config, creating parent directories as needed
pub fn write_config<P: AsRef<Path>>(path: P, models: Vec<ModelEntry>) -> CatalogResult<()> {
    let path = path.as_ref();
    let count = models.len();
    let rendered = ModelConfigFile::new(models).to_json_pretty()?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| CatalogError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    std::fs::write(path, rendered).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Updated config written to {}", path.display());
    tracing::info!("Total models: {}", count);
    Ok(())
}
