//! LLM provider implementations for the Meeting Agent.
//!
//! All chat providers implement the `meetagent_core::Provider` trait;
//! transcription backends implement `Transcriber`.

pub mod openai_compat;
pub mod transcription;

pub use openai_compat::OpenAiCompatProvider;
pub use transcription::{Transcriber, WhisperTranscriber};

use meetagent_config::AppConfig;

/// Build the chat provider selected by configuration.
///
/// Per-provider overrides win over the global `api_key`; unknown provider
/// names fall back to their well-known base URL or an explicit `api_url`.
pub fn from_config(config: &AppConfig) -> OpenAiCompatProvider {
    let name = config.default_provider.as_str();
    let provider_config = config.providers.get(name);

    let api_key = provider_config
        .and_then(|p| p.api_key.clone())
        .or_else(|| config.api_key.clone())
        .unwrap_or_default();

    let base_url = provider_config
        .and_then(|p| p.api_url.clone())
        .unwrap_or_else(|| default_base_url(name));

    OpenAiCompatProvider::new(name, base_url, api_key)
}

/// Resolve the model to use, honoring per-provider overrides.
pub fn model_from_config(config: &AppConfig) -> String {
    config
        .providers
        .get(&config.default_provider)
        .and_then(|p| p.default_model.clone())
        .unwrap_or_else(|| config.default_model.clone())
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        "deepseek" => "https://api.deepseek.com/v1".into(),
        "groq" => "https://api.groq.com/openai/v1".into(),
        "together" => "https://api.together.xyz/v1".into(),
        "fireworks" => "https://api.fireworks.ai/inference/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetagent_config::ProviderConfig;
    use meetagent_core::Provider;

    #[test]
    fn default_base_urls() {
        assert!(default_base_url("openrouter").contains("openrouter.ai"));
        assert!(default_base_url("openai").contains("api.openai.com"));
        assert!(default_base_url("ollama").contains("localhost:11434"));
    }

    #[test]
    fn build_from_default_config() {
        let config = AppConfig::default();
        let provider = from_config(&config);
        assert_eq!(provider.name(), "openrouter");
        assert!(provider.base_url.contains("openrouter.ai"));
    }

    #[test]
    fn provider_overrides_win() {
        let mut config = AppConfig {
            api_key: Some("sk-global".into()),
            default_provider: "openai".into(),
            ..AppConfig::default()
        };
        config.providers.insert(
            "openai".into(),
            ProviderConfig {
                api_key: None,
                api_url: Some("http://localhost:9999/v1".into()),
                default_model: Some("gpt-4o".into()),
            },
        );

        let provider = from_config(&config);
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.base_url, "http://localhost:9999/v1");
        assert_eq!(model_from_config(&config), "gpt-4o");
    }

    #[test]
    fn model_falls_back_to_global_default() {
        let config = AppConfig::default();
        assert_eq!(model_from_config(&config), "openai/gpt-4o-mini");
    }
}
