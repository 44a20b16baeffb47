//! Provider Integration Tests
//!
//! Checks that aliases are resolved before requests reach the upstream
//! chat completions API.

use serde_json::json;
use serial_test::serial;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use modelreg_registry::{
    Config, ModelConfigFile, ModelEntry, ModelProvider, ModelRequest, ModelRestrictions,
    OpenRouterProvider, ProviderError, ProviderRegistry, ProviderType, XaiProvider,
};

const GROK: &str = "grok-4-1-fast-non-reasoning";

fn completion(model: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "Test response"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

#[tokio::test]
async fn test_generate_content_resolves_alias() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": GROK,
            "temperature": 0.7,
            "messages": [{"role": "user", "content": "Test prompt"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(GROK)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = XaiProvider::with_base_url("test-key", server.uri()).unwrap();
    let response = provider
        .generate_content(ModelRequest::new("grok", "Test prompt").with_temperature(0.7))
        .await
        .unwrap();

    assert_eq!(response.content, "Test response");
    assert_eq!(response.model_name, GROK);
    assert_eq!(response.friendly_name, "X.AI (Grok 4.1 Fast Non-Reasoning)");
    assert_eq!(response.provider, ProviderType::XAI);
    assert_eq!(response.usage.prompt_tokens, 10);
    assert_eq!(response.usage.completion_tokens, 5);
    assert_eq!(response.usage.total_tokens, 15);
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
}

#[tokio::test]
async fn test_generate_content_other_aliases() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "model": GROK })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(GROK)))
        .expect(3)
        .mount(&server)
        .await;

    let provider = XaiProvider::with_base_url("test-key", server.uri()).unwrap();
    for alias in ["grokfast", "grok4", "GROK-4-1-FAST-NON-REASONING-LATEST"] {
        let response = provider
            .generate_content(ModelRequest::new(alias, "hello"))
            .await
            .unwrap();
        assert_eq!(response.model_name, GROK);
    }
}

#[tokio::test]
async fn test_system_prompt_default_temperature_and_clamping() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": GROK,
            "temperature": 0.3,
            "messages": [
                {"role": "system", "content": "Be brief"},
                {"role": "user", "content": "hi"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(GROK)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "temperature": 2.0,
            "max_tokens": 30000
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(GROK)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = XaiProvider::with_base_url("test-key", server.uri()).unwrap();
    provider
        .generate_content(ModelRequest::new("grok", "hi").with_system_prompt("Be brief"))
        .await
        .unwrap();
    provider
        .generate_content(
            ModelRequest::new("grok", "hot")
                .with_temperature(3.5)
                .with_max_output_tokens(100_000),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_response_model_falls_back_to_canonical() {
    let server = MockServer::start().await;
    let mut body = completion(GROK);
    body.as_object_mut().unwrap().remove("model");
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let provider = XaiProvider::with_base_url("test-key", server.uri()).unwrap();
    let response = provider
        .generate_content(ModelRequest::new("grokcode", "hello"))
        .await
        .unwrap();
    assert_eq!(response.model_name, GROK);
}

#[tokio::test]
async fn test_unknown_model_never_reaches_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(GROK)))
        .expect(0)
        .mount(&server)
        .await;

    let provider = XaiProvider::with_base_url("test-key", server.uri()).unwrap();
    let err = provider
        .generate_content(ModelRequest::new("gpt-4", "hello"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unsupported model 'gpt-4' for provider xai");
}

#[tokio::test]
async fn test_restricted_alias_never_reaches_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(GROK)))
        .expect(0)
        .mount(&server)
        .await;

    let provider = XaiProvider::with_base_url("test-key", server.uri())
        .unwrap()
        .with_restrictions(ModelRestrictions::parse("grok"));
    let result = provider
        .generate_content(ModelRequest::new("grok4", "hello"))
        .await;
    assert!(matches!(result, Err(ProviderError::ModelNotAllowed { .. })));
}

#[tokio::test]
async fn test_api_error_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let provider = XaiProvider::with_base_url("test-key", server.uri()).unwrap();
    match provider
        .generate_content(ModelRequest::new("grok", "hello"))
        .await
    {
        Err(ProviderError::Api {
            provider,
            status,
            body,
        }) => {
            assert_eq!(provider, ProviderType::XAI);
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openrouter_omits_temperature_when_unsupported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "model": "openrouter/horizon-beta" })))
        .respond_with(move |request: &wiremock::Request| {
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            if body.get("temperature").is_some() {
                ResponseTemplate::new(400).set_body_string("temperature not supported")
            } else {
                ResponseTemplate::new(200).set_body_json(completion("openrouter/horizon-beta"))
            }
        })
        .expect(1)
        .mount(&server)
        .await;

    let entry = ModelEntry {
        model_name: "openrouter/horizon-beta".to_string(),
        aliases: vec!["horizon".to_string()],
        context_window: 200_000,
        max_output_tokens: 64_000,
        supports_json_mode: true,
        supports_function_calling: true,
        supports_extended_thinking: false,
        supports_images: false,
        max_image_size_mb: 0.0,
        supports_temperature: false,
        description: "Frontier model".to_string(),
        intelligence_score: 18,
        temperature_constraint: None,
        use_openai_response_api: None,
        default_reasoning_effort: None,
        allow_code_generation: None,
    };
    let provider =
        OpenRouterProvider::new("or-key", server.uri(), &ModelConfigFile::new(vec![entry]))
            .unwrap();

    let response = provider
        .generate_content(ModelRequest::new("Horizon", "hello").with_temperature(0.9))
        .await
        .unwrap();
    assert_eq!(response.provider, ProviderType::OpenRouter);
    assert_eq!(response.friendly_name, "OpenRouter (openrouter/horizon-beta)");
}

#[tokio::test]
#[serial]
async fn test_registry_from_config_reads_restrictions() {
    std::env::set_var("XAI_ALLOWED_MODELS", "grok");

    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.providers.xai_api_key = Some("test-key".to_string());
    config.catalog.output_path = dir.path().join("missing.json");

    let registry = ProviderRegistry::from_config(&config).unwrap();
    std::env::remove_var("XAI_ALLOWED_MODELS");

    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.resolve("grok"),
        Some((ProviderType::XAI, GROK.to_string()))
    );
    assert_eq!(registry.resolve("grok4"), None);
    assert!(matches!(
        registry.get_capabilities(GROK),
        Err(ProviderError::ModelNotAllowed { .. })
    ));
}

#[tokio::test]
async fn test_registry_dispatches_to_resolving_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({ "model": GROK })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(GROK)))
        .expect(1)
        .mount(&server)
        .await;

    let mut registry = ProviderRegistry::new();
    registry.register(Box::new(
        XaiProvider::with_base_url("test-key", server.uri()).unwrap(),
    ));

    let response = registry
        .generate_content(ModelRequest::new("grokheavy", "hello"))
        .await
        .unwrap();
    assert_eq!(response.model_name, GROK);

    let err = registry
        .generate_content(ModelRequest::new("mystery", "hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::UnknownModel { .. }));
}
