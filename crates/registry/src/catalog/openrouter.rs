//! OpenRouter catalog client
//!
//! The catalog entries are only partially typed: the fields the filter,
//! scorer and extractor read are modelled explicitly and everything else is
//! kept verbatim so substring checks over the full record still work.

use super::{CatalogError, CatalogResult};
use crate::config::CatalogConfig;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// Context length assumed when the catalog does not report one
pub const DEFAULT_CONTEXT_LENGTH: u64 = 32_768;

/// One model as listed by the OpenRouter `/models` endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenRouterModel {
    pub id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    /// Unix timestamp (seconds)
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Value>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub supported_parameters: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_provider: Option<TopProvider>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Limits reported by the highest-ranked upstream host for a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_moderated: Option<bool>,
}

fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    })
}

impl OpenRouterModel {
    /// Minimal entry, used for models the API does not list yet
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Vendor prefix of the id (`mistralai` in `mistralai/mistral-large`)
    pub fn provider(&self) -> &str {
        provider_of(&self.id)
    }

    pub fn context_length_or_default(&self) -> u64 {
        self.context_length.unwrap_or(DEFAULT_CONTEXT_LENGTH)
    }

    /// Top-level limit first, then the top provider's, then the default
    pub fn max_completion_tokens_or_default(&self) -> u64 {
        self.max_completion_tokens
            .or_else(|| {
                self.top_provider
                    .as_ref()
                    .and_then(|tp| tp.max_completion_tokens)
            })
            .unwrap_or(DEFAULT_CONTEXT_LENGTH)
    }

    /// Lowercased `architecture.modality`, empty when absent
    pub fn modality(&self) -> String {
        self.architecture
            .as_ref()
            .and_then(|a| a.get("modality"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_lowercase()
    }

    /// Lowercased JSON rendering of the architecture block
    pub fn architecture_text(&self) -> String {
        match &self.architecture {
            Some(value) => value.to_string().to_lowercase(),
            None => String::new(),
        }
    }

    /// Lowercased JSON rendering of the whole record
    pub fn search_text(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Whether the catalog publishes a prompt or completion price
    pub fn has_pricing(&self) -> bool {
        let Some(pricing) = self.pricing.as_ref() else {
            return false;
        };
        ["prompt", "completion"]
            .iter()
            .any(|key| pricing.get(key).map(is_truthy).unwrap_or(false))
    }
}

/// Vendor prefix of a model id; the whole id when it has no `/`
pub fn provider_of(model_id: &str) -> &str {
    model_id.split('/').next().unwrap_or(model_id)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Client for the OpenRouter model catalog
pub struct OpenRouterClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenRouterClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.api_key.clone(),
            config.timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch every model in the catalog, keyed by model id
    pub async fn fetch_models(&self) -> CatalogResult<BTreeMap<String, OpenRouterModel>> {
        let url = format!("{}/models", self.base_url);
        tracing::info!("Fetching models from {}...", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CatalogError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| CatalogError::InvalidResponse {
                reason: e.to_string(),
            })?;

        let models = parse_catalog(&payload)?;
        tracing::info!("Successfully fetched {} models from OpenRouter", models.len());
        Ok(models)
    }
}

/// Parse the `data` array of a catalog response. Entries without an id, or
/// that do not match the expected shape, are skipped.
pub fn parse_catalog(payload: &Value) -> CatalogResult<BTreeMap<String, OpenRouterModel>> {
    let mut models = BTreeMap::new();

    let Some(data) = payload.get("data") else {
        return Ok(models);
    };
    let entries = data.as_array().ok_or_else(|| CatalogError::InvalidResponse {
        reason: "`data` is not an array".to_string(),
    })?;

    for raw in entries {
        let has_id = raw
            .get("id")
            .and_then(Value::as_str)
            .map(|id| !id.is_empty())
            .unwrap_or(false);
        if !has_id {
            tracing::debug!("Skipping catalog entry without an id");
            continue;
        }

        match serde_json::from_value::<OpenRouterModel>(raw.clone()) {
            Ok(model) => {
                tracing::debug!("Found model: {}", model.id);
                models.insert(model.id.clone(), model);
            }
            Err(e) => {
                tracing::debug!("Skipping malformed catalog entry: {}", e);
            }
        }
    }

    Ok(models)
}
