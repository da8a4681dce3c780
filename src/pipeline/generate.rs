//! Answer generation: one LLM call per question.
//!
//! The session only knows the [`AnswerGenerator`] trait. The default
//! [`LlmAnswerGenerator`] drives an edgequake-llm provider; the grounding
//! rules live in [`crate::prompts`].
//!
//! Each question is a single attempt. There are no retries and no timeout:
//! the user sees the failure as an assistant message and can simply ask again.

use crate::config::ChatConfig;
use crate::error::GenerationError;
use crate::prompts::PromptPayload;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Model used when Gemini is picked without an explicit model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Produces an answer for a composed prompt.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    /// Return the generated text. An empty string is a valid (if unhelpful)
    /// answer; failures must be reported as `Err`.
    async fn generate(&self, prompt: &PromptPayload) -> Result<String, GenerationError>;
}

/// Default generator backed by an edgequake-llm provider.
///
/// The provider is resolved on first use and cached once resolution succeeds.
/// A failed resolution is not cached, so exporting a key and asking again
/// works without restarting.
pub struct LlmAnswerGenerator {
    config: ChatConfig,
    provider: OnceCell<Arc<dyn LLMProvider>>,
}

impl LlmAnswerGenerator {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            config,
            provider: OnceCell::new(),
        }
    }

    async fn provider(&self) -> Result<&Arc<dyn LLMProvider>, GenerationError> {
        self.provider
            .get_or_try_init(|| async { resolve_provider(&self.config) })
            .await
    }
}

#[async_trait]
impl AnswerGenerator for LlmAnswerGenerator {
    async fn generate(&self, prompt: &PromptPayload) -> Result<String, GenerationError> {
        let provider = self.provider().await?;
        let start = Instant::now();

        let messages = vec![
            ChatMessage::system(&prompt.system_instruction),
            ChatMessage::user(&prompt.user_query),
        ];
        let options = build_options(&self.config);

        debug!(
            "Sending query ({} chars of grounding text)",
            prompt.system_instruction.chars().count()
        );

        match provider.chat(&messages, Some(&options)).await {
            Ok(response) => {
                debug!(
                    "{} input tokens, {} output tokens, {:?}",
                    response.prompt_tokens,
                    response.completion_tokens,
                    start.elapsed()
                );
                Ok(response.content)
            }
            Err(e) => {
                warn!("Generation failed after {:?}: {}", start.elapsed(), e);
                Err(GenerationError::Api {
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Build `CompletionOptions` from the chat config.
fn build_options(config: &ChatConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}

/// Default model for a named provider when the config does not set one.
pub fn default_model_for(provider_name: &str) -> &'static str {
    match provider_name {
        "openai" | "azure" => "gpt-4.1-mini",
        "anthropic" => "claude-sonnet-4-20250514",
        "mistral" => "mistral-small-latest",
        "ollama" | "lmstudio" => "llama3.2",
        _ => DEFAULT_GEMINI_MODEL,
    }
}

fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, GenerationError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        GenerationError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`), used as-is.
/// 2. **Named provider** (`config.provider_name`) with `config.model` or the
///    provider's default model; the factory reads the matching API key.
/// 3. **Environment pair** `EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`.
/// 4. **Gemini key** `GEMINI_API_KEY`, the credential this assistant was
///    built around, with [`DEFAULT_GEMINI_MODEL`].
/// 5. **Auto-detection** via `ProviderFactory::from_env`.
pub fn resolve_provider(config: &ChatConfig) -> Result<Arc<dyn LLMProvider>, GenerationError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        let model = config.model.as_deref().unwrap_or_else(|| default_model_for(name));
        info!("Using provider '{}' with model '{}'", name, model);
        return create_provider(name, model);
    }

    if let (Ok(prov), Ok(model)) = (
        std::env::var("EDGEQUAKE_LLM_PROVIDER"),
        std::env::var("EDGEQUAKE_MODEL"),
    ) {
        if !prov.is_empty() && !model.is_empty() {
            return create_provider(&prov, &model);
        }
    }

    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            let model = config.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL);
            return create_provider("gemini", model);
        }
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| GenerationError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set GEMINI_API_KEY, OPENAI_API_KEY, or ANTHROPIC_API_KEY.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}
