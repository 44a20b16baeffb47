//! Config entries extracted from catalog models

use super::openrouter::{OpenRouterModel, DEFAULT_CONTEXT_LENGTH};
use super::scoring::estimate_intelligence_score;
use serde::{Deserialize, Serialize};

/// Image budget advertised for vision-capable catalog models
pub const VISION_IMAGE_LIMIT_MB: f64 = 20.0;

/// One model record in `openrouter_models.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub model_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_token_limit")]
    pub context_window: u64,
    #[serde(default = "default_token_limit")]
    pub max_output_tokens: u64,
    #[serde(default)]
    pub supports_json_mode: bool,
    #[serde(default)]
    pub supports_function_calling: bool,
    #[serde(default)]
    pub supports_extended_thinking: bool,
    #[serde(default)]
    pub supports_images: bool,
    #[serde(default)]
    pub max_image_size_mb: f64,
    #[serde(default = "default_true")]
    pub supports_temperature: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_intelligence_score")]
    pub intelligence_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_constraint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_openai_response_api: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_reasoning_effort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_code_generation: Option<bool>,
}

fn default_true() -> bool {
    true
}

fn default_token_limit() -> u64 {
    DEFAULT_CONTEXT_LENGTH
}

/// Mid-range score for hand-added entries that leave it out
fn default_intelligence_score() -> u8 {
    10
}

impl ModelEntry {
    /// Derive an entry from catalog metadata.
    ///
    /// JSON mode, tool calling and temperature are assumed on; almost every
    /// OpenRouter backend accepts them and curated overrides can switch them
    /// off per model.
    pub fn from_api(model: &OpenRouterModel, now: i64) -> Self {
        let name = model.name.to_lowercase();
        let id = model.id.to_lowercase();

        let supports_images = model.modality().contains("vision") || name.contains("multimodal");
        let max_image_size_mb = if model.search_text().contains("vision") {
            VISION_IMAGE_LIMIT_MB
        } else {
            0.0
        };

        Self {
            model_name: model.id.clone(),
            aliases: Vec::new(),
            context_window: model.context_length_or_default(),
            max_output_tokens: model.max_completion_tokens_or_default(),
            supports_json_mode: true,
            supports_function_calling: true,
            supports_extended_thinking: name.contains("reasoning") || id.contains("r1"),
            supports_images,
            max_image_size_mb,
            supports_temperature: true,
            description: model.description.clone(),
            intelligence_score: estimate_intelligence_score(model, now),
            temperature_constraint: None,
            use_openai_response_api: None,
            default_reasoning_effort: None,
            allow_code_generation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_760_000_000;

    #[test]
    fn test_defaults_for_sparse_model() {
        let model = OpenRouterModel::new("mistralai/mistral-small");
        let entry = ModelEntry::from_api(&model, NOW);

        assert_eq!(entry.model_name, "mistralai/mistral-small");
        assert!(entry.aliases.is_empty());
        assert_eq!(entry.context_window, DEFAULT_CONTEXT_LENGTH);
        assert_eq!(entry.max_output_tokens, DEFAULT_CONTEXT_LENGTH);
        assert!(entry.supports_json_mode);
        assert!(entry.supports_function_calling);
        assert!(entry.supports_temperature);
        assert!(!entry.supports_extended_thinking);
        assert!(!entry.supports_images);
        assert_eq!(entry.max_image_size_mb, 0.0);
        assert_eq!(entry.description, "");
    }

    #[test]
    fn test_vision_model() {
        let mut model = OpenRouterModel::new("qwen/qwen2.5-vl-72b-instruct");
        model.name = "Qwen: Qwen2.5 VL 72B Instruct".to_string();
        model.architecture = Some(json!({"modality": "text+image->text", "input_modalities": ["vision"]}));

        let entry = ModelEntry::from_api(&model, NOW);
        // Modality string itself says "image", not "vision"
        assert!(!entry.supports_images);
        // ...but the record mentions vision somewhere
        assert_eq!(entry.max_image_size_mb, VISION_IMAGE_LIMIT_MB);

        model.architecture = Some(json!({"modality": "Text+Vision->Text"}));
        let entry = ModelEntry::from_api(&model, NOW);
        assert!(entry.supports_images);
    }

    #[test]
    fn test_multimodal_name_enables_images() {
        let mut model = OpenRouterModel::new("acme/omni");
        model.name = "Acme Multimodal Omni".to_string();
        let entry = ModelEntry::from_api(&model, NOW);
        assert!(entry.supports_images);
    }

    #[test]
    fn test_extended_thinking_detection() {
        let mut model = OpenRouterModel::new("deepseek/deepseek-r1-0528");
        let entry = ModelEntry::from_api(&model, NOW);
        assert!(entry.supports_extended_thinking);

        model.id = "acme/thinker".to_string();
        model.name = "Acme Reasoning Large".to_string();
        let entry = ModelEntry::from_api(&model, NOW);
        assert!(entry.supports_extended_thinking);
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let entry = ModelEntry::from_api(&OpenRouterModel::new("cohere/command-a"), NOW);
        let value = serde_json::to_value(&entry).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("temperature_constraint"));
        assert!(!object.contains_key("use_openai_response_api"));
        assert!(!object.contains_key("default_reasoning_effort"));
        assert!(!object.contains_key("allow_code_generation"));
        assert_eq!(object["model_name"], json!("cohere/command-a"));
    }

    #[test]
    fn test_hand_added_entry_gets_defaults() {
        let entry: ModelEntry = serde_json::from_value(json!({
            "model_name": "acme/custom",
            "aliases": ["custom"]
        }))
        .unwrap();

        assert_eq!(entry.context_window, DEFAULT_CONTEXT_LENGTH);
        assert_eq!(entry.max_output_tokens, DEFAULT_CONTEXT_LENGTH);
        assert_eq!(entry.intelligence_score, 10);
        assert!(entry.supports_temperature);
        assert!(!entry.supports_images);
        assert_eq!(entry.description, "");
    }
}
