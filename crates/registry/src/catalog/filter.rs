//! Vendor filter for the aggregator catalog
//!
//! Models from vendors the gateway already talks to directly are dropped so
//! the same backend is not listed twice. xAI has a native integration too but
//! stays in: its Grok code specialists are only reachable through OpenRouter.

use super::openrouter::{provider_of, OpenRouterModel};

/// Vendors served by native integrations
pub const EXCLUDED_PROVIDERS: &[&str] = &["openai", "google", "anthropic", "perplexity"];

/// Open, research and specialist vendors that are always kept
pub const PREFERRED_PROVIDERS: &[&str] = &[
    // OpenRouter-authored frontier models
    "openrouter",
    "x-ai",
    "minimax",
    "mistralai",
    "meta-llama",
    "deepseek",
    "qwen",
    "z-ai",
    "thudm",
    "baidu",
    "tencent",
    "bytedance",
    "cohere",
    "allenai",
    "ibm-granite",
    "microsoft",
    "moonshotai",
    "nousresearch",
    "liquid",
    "nvidia",
];

/// Decide whether a catalog model belongs in the generated config
pub fn should_include_model(model_id: &str, model: &OpenRouterModel) -> bool {
    // Rate-limited free variants
    if model_id.contains(":free") {
        return false;
    }

    let provider = provider_of(model_id);
    if EXCLUDED_PROVIDERS.contains(&provider) {
        return false;
    }

    if PREFERRED_PROVIDERS.contains(&provider) {
        return true;
    }

    // Unknown vendors need published pricing and a non-trivial vendor name
    model.has_pricing() && provider.len() > 2
}
