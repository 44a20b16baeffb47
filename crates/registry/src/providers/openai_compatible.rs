//! Chat completions client for OpenAI-compatible APIs (xAI, OpenRouter)

use super::capabilities::{ModelCapabilities, ProviderType};
use super::{ModelRequest, ModelResponse, ProviderError, ProviderResult, Usage};
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    provider: ProviderType,
}

impl OpenAiCompatibleClient {
    pub fn new(
        provider: ProviderType,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            provider,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Request body for `model`, which must already be resolved
    pub fn build_body(
        &self,
        capabilities: &ModelCapabilities,
        request: &ModelRequest,
    ) -> serde_json::Value {
        let mut messages = Vec::new();
        if let Some(system) = &request.system_prompt {
            if capabilities.supports_system_prompts {
                messages.push(serde_json::json!({ "role": "system", "content": system }));
            }
        }
        messages.push(serde_json::json!({ "role": "user", "content": request.prompt }));

        let mut body = serde_json::json!({
            "model": capabilities.model_name,
            "messages": messages,
        });

        if capabilities.supports_temperature {
            let constraint = &capabilities.temperature_constraint;
            let requested = request
                .temperature
                .unwrap_or_else(|| constraint.default_temperature());
            let temperature = constraint.corrected(requested);
            if (temperature - requested).abs() > f64::EPSILON {
                tracing::debug!(
                    "Adjusted temperature {} -> {} for {} ({})",
                    requested,
                    temperature,
                    capabilities.model_name,
                    constraint.description()
                );
            }
            body["temperature"] = serde_json::json!(temperature);
        }

        if let Some(max_tokens) = request.max_output_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens.min(capabilities.max_output_tokens));
        }

        body
    }

    pub async fn chat_completion(
        &self,
        capabilities: &ModelCapabilities,
        request: &ModelRequest,
    ) -> ProviderResult<ModelResponse> {
        let body = self.build_body(capabilities, request);
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::Api {
                provider: self.provider,
                status: status.as_u16(),
                body: error_text,
            });
        }

        let resp_json: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: self.provider,
                    reason: e.to_string(),
                })?;

        let parsed = self.parse_response(&resp_json, capabilities)?;
        tracing::info!(
            "LLM usage: provider={} model={} prompt_tokens={} completion_tokens={} total_tokens={} latency={:?}",
            self.provider,
            parsed.model_name,
            parsed.usage.prompt_tokens,
            parsed.usage.completion_tokens,
            parsed.usage.total_tokens,
            start.elapsed(),
        );
        Ok(parsed)
    }

    fn parse_response(
        &self,
        resp: &serde_json::Value,
        capabilities: &ModelCapabilities,
    ) -> ProviderResult<ModelResponse> {
        let choice = resp
            .get("choices")
            .and_then(|c| c.get(0))
            .ok_or_else(|| ProviderError::InvalidResponse {
                provider: self.provider,
                reason: "No choices in response".to_string(),
            })?;

        let content = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .unwrap_or("")
            .to_string();

        let finish_reason = choice
            .get("finish_reason")
            .and_then(|f| f.as_str())
            .map(str::to_string);

        let usage = resp
            .get("usage")
            .map(|u| Usage {
                prompt_tokens: u.get("prompt_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
                completion_tokens: u
                    .get("completion_tokens")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0),
                total_tokens: u.get("total_tokens").and_then(|v| v.as_u64()).unwrap_or(0),
            })
            .unwrap_or_default();

        let model_name = resp
            .get("model")
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .unwrap_or(&capabilities.model_name)
            .to_string();

        Ok(ModelResponse {
            content,
            model_name,
            friendly_name: capabilities.friendly_name.clone(),
            provider: self.provider,
            usage,
            finish_reason,
        })
    }
}
