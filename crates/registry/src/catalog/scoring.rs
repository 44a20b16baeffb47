//! Intelligence score heuristic
//!
//! OpenRouter publishes no capability ranking, so the score is estimated from
//! catalog metadata: recency, context size, reasoning markers in the name,
//! known specialist families, size tier and vision support. The result drives
//! auto-mode ordering and can be overridden by hand in the config file.

use super::openrouter::OpenRouterModel;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 20;
const BASE_SCORE: i32 = 5;

/// Models created within this window count as recent (six 30-day months)
pub const RECENCY_WINDOW_SECS: i64 = 6 * 30 * 24 * 3600;

/// Estimate a 1-20 capability score for a catalog model.
///
/// `now` is the current unix time in seconds.
pub fn estimate_intelligence_score(model: &OpenRouterModel, now: i64) -> u8 {
    let model_id = model.id.to_lowercase();
    let name = model.name.to_lowercase();

    let mut score = BASE_SCORE;
    score += recency_bonus(model.created, now);
    score += context_bonus(model.context_length_or_default());
    score += reasoning_bonus(&name);
    score += specialist_bonus(&model_id, &name);
    score += tier_adjustment(&name);

    let has_image_param = model.supported_parameters.iter().any(|p| p == "image");
    if model.architecture_text().contains("vision") || has_image_param {
        score += 1;
    }

    score.clamp(MIN_SCORE, MAX_SCORE) as u8
}

fn recency_bonus(created: i64, now: i64) -> i32 {
    if created > now - RECENCY_WINDOW_SECS {
        2
    } else {
        0
    }
}

fn context_bonus(context: u64) -> i32 {
    match context {
        c if c >= 1_000_000 => 4,
        c if c >= 256_000 => 3,
        c if c >= 200_000 => 2,
        c if c >= 100_000 => 1,
        _ => 0,
    }
}

fn reasoning_bonus(name: &str) -> i32 {
    if contains_any(name, &["reasoning", "r1", "deep-research", "deep-think"]) {
        3
    } else if contains_any(name, &["thinking", "pro"]) {
        2
    } else {
        0
    }
}

/// First matching family wins
fn specialist_bonus(model_id: &str, name: &str) -> i32 {
    let either = |needle_id: &str, needle_name: &str| {
        model_id.contains(needle_id) || name.contains(needle_name)
    };

    if model_id.contains("grok")
        && (model_id.contains("grok-4") || model_id.contains("grok-code"))
    {
        4
    } else if model_id.contains("minimax") {
        4
    } else if model_id.contains("qwen3-coder")
        || (model_id.contains("qwen") && name.contains("coder"))
    {
        4
    } else if model_id.contains("glm")
        && (model_id.contains("glm-4.6") || name.contains("glm 4.6"))
    {
        4
    } else if either("grok-3", "grok 3") {
        2
    } else if either("qwen3", "qwen3") {
        2
    } else if either("glm-4", "glm 4") && !model_id.contains("4.5") && !name.contains("4.5") {
        1
    } else if either("glm-4.5", "glm 4.5") {
        2
    } else if name.contains("jamba") && (name.contains("large") || name.contains("premier")) {
        2
    } else {
        0
    }
}

fn tier_adjustment(name: &str) -> i32 {
    if contains_any(name, &["70b", "405b", "480b", "1.7", "large", "max"]) {
        2
    } else if contains_any(name, &["mini", "small", "lite", "3b", "8b"]) {
        -1
    } else {
        0
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_760_000_000;
    const OLD: i64 = NOW - 2 * RECENCY_WINDOW_SECS;

    fn model(id: &str, name: &str, context: Option<u64>, created: i64) -> OpenRouterModel {
        let mut m = OpenRouterModel::new(id);
        m.name = name.to_string();
        m.context_length = context;
        m.created = created;
        m
    }

    #[test]
    fn test_plain_old_model_gets_base_score() {
        let m = model("acme/plain", "Acme Plain", Some(32_768), OLD);
        assert_eq!(estimate_intelligence_score(&m, NOW), 5);
    }

    #[test]
    fn test_missing_context_uses_default() {
        let m = model("acme/plain", "Acme Plain", None, OLD);
        assert_eq!(estimate_intelligence_score(&m, NOW), 5);
    }

    #[test]
    fn test_recency_bonus_boundary() {
        let cutoff = NOW - RECENCY_WINDOW_SECS;
        let at_cutoff = model("acme/plain", "Acme Plain", None, cutoff);
        let after_cutoff = model("acme/plain", "Acme Plain", None, cutoff + 1);
        assert_eq!(estimate_intelligence_score(&at_cutoff, NOW), 5);
        assert_eq!(estimate_intelligence_score(&after_cutoff, NOW), 7);
    }

    #[test]
    fn test_context_tiers() {
        let cases = [
            (99_999, 5),
            (100_000, 6),
            (200_000, 7),
            (256_000, 8),
            (1_000_000, 9),
        ];
        for (context, expected) in cases {
            let m = model("acme/plain", "Acme Plain", Some(context), OLD);
            assert_eq!(
                estimate_intelligence_score(&m, NOW),
                expected,
                "context {}",
                context
            );
        }
    }

    #[test]
    fn test_reasoning_markers() {
        let r1 = model("deepseek/deepseek-r1", "DeepSeek: R1", None, OLD);
        assert_eq!(estimate_intelligence_score(&r1, NOW), 8);

        let thinking = model("acme/t", "Acme Thinking", None, OLD);
        assert_eq!(estimate_intelligence_score(&thinking, NOW), 7);
    }

    #[test]
    fn test_grok_4_specialist() {
        // 5 base + 2 recent + 3 (256K) + 4 (grok-4) = 14
        let m = model("x-ai/grok-4", "xAI: Grok 4", Some(256_000), NOW - 100);
        assert_eq!(estimate_intelligence_score(&m, NOW), 14);
    }

    #[test]
    fn test_qwen_coder_large_tier() {
        // 5 + 3 (262K) + 4 (qwen3-coder) + 2 (480b) = 14
        let m = model(
            "qwen/qwen3-coder",
            "Qwen: Qwen3 Coder 480B A35B",
            Some(262_144),
            OLD,
        );
        assert_eq!(estimate_intelligence_score(&m, NOW), 14);
    }

    #[test]
    fn test_glm_ladder() {
        let glm46 = model("z-ai/glm-4.6", "Z.AI: GLM 4.6", None, OLD);
        assert_eq!(estimate_intelligence_score(&glm46, NOW), 9);

        let glm45 = model("z-ai/glm-4.5", "Z.AI: GLM 4.5", None, OLD);
        assert_eq!(estimate_intelligence_score(&glm45, NOW), 7);

        let glm4 = model("thudm/glm-4-32b", "THUDM: GLM 4 32B", None, OLD);
        assert_eq!(estimate_intelligence_score(&glm4, NOW), 6);
    }

    #[test]
    fn test_small_model_penalty() {
        let m = model("meta-llama/llama-3.1-8b-instruct", "Meta: Llama 3.1 8B Instruct", None, OLD);
        assert_eq!(estimate_intelligence_score(&m, NOW), 4);
    }

    #[test]
    fn test_vision_bonus_from_architecture_or_params() {
        let mut m = model("acme/see", "Acme See", None, OLD);
        m.architecture = Some(json!({"modality": "text+vision->text"}));
        assert_eq!(estimate_intelligence_score(&m, NOW), 6);

        let mut m = model("acme/see", "Acme See", None, OLD);
        m.supported_parameters = vec!["image".to_string()];
        assert_eq!(estimate_intelligence_score(&m, NOW), 6);

        // Only an exact "image" parameter counts
        let mut m = model("acme/see", "Acme See", None, OLD);
        m.supported_parameters = vec!["image_url".to_string()];
        assert_eq!(estimate_intelligence_score(&m, NOW), 5);
    }

    #[test]
    fn test_score_clamped_to_twenty() {
        let mut m = model(
            "x-ai/grok-4-max",
            "Grok 4 Max Reasoning",
            Some(2_000_000),
            NOW,
        );
        m.architecture = Some(json!({"modality": "vision"}));
        // 5 + 2 + 4 + 3 + 4 + 2 + 1 = 21
        assert_eq!(estimate_intelligence_score(&m, NOW), 20);
    }

    #[test]
    fn test_pro_marker() {
        let m = model("acme/p", "Acme Pro", None, OLD);
        assert_eq!(estimate_intelligence_score(&m, NOW), 7);
    }

    #[test]
    fn test_minimax_specialist() {
        let m = model("minimax/m2", "M2 Chat", None, OLD);
        assert_eq!(estimate_intelligence_score(&m, NOW), 9);
    }

    #[test]
    fn test_grok_3_specialist() {
        let by_id = model("x-ai/grok-3", "xAI: Grok 3", None, OLD);
        assert_eq!(estimate_intelligence_score(&by_id, NOW), 7);

        let by_name = model("acme/g3", "Grok 3 Beta", None, OLD);
        assert_eq!(estimate_intelligence_score(&by_name, NOW), 7);
    }

    #[test]
    fn test_qwen3_general_model() {
        let m = model("qwen/qwen3-235b-a22b", "Qwen: Qwen3 235B A22B", None, OLD);
        assert_eq!(estimate_intelligence_score(&m, NOW), 7);
    }

    #[test]
    fn test_jamba_needs_large_or_premier() {
        let premier = model("ai21/jamba-premier", "Jamba Premier", None, OLD);
        assert_eq!(estimate_intelligence_score(&premier, NOW), 7);

        let plain = model("ai21/jamba-instruct", "Jamba Instruct", None, OLD);
        assert_eq!(estimate_intelligence_score(&plain, NOW), 5);
    }

    #[test]
    fn test_first_specialist_match_wins() {
        // grok-4 (+4) is checked before the grok 3 rung (+2)
        let m = model(
            "x-ai/grok-4",
            "xAI: Grok 4 (successor to Grok 3)",
            None,
            OLD,
        );
        assert_eq!(estimate_intelligence_score(&m, NOW), 9);

        // qwen3-coder (+4) is checked before plain qwen3 (+2)
        let m = model("qwen/qwen3-coder", "Qwen3 Coder", None, OLD);
        assert_eq!(estimate_intelligence_score(&m, NOW), 9);
    }

    #[test]
    fn test_lowest_reachable_score() {
        // 5 base - 1 (mini); nothing else applies
        let m = model("acme/mini", "Acme Mini", Some(4_096), OLD);
        assert_eq!(estimate_intelligence_score(&m, NOW), 4);
    }
}
