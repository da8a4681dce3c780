//! Configuration for a document chat session.
//!
//! All knobs live in [`ChatConfig`], built via [`ChatConfigBuilder`]. The
//! config is cheap to clone and is shared by the session and its default
//! collaborators.
//!
//! The provider credential is deliberately *not* part of the config: it is
//! read from the environment the first time a question is asked, so a missing
//! key shows up as a failed answer rather than a failed start.

use crate::error::PdfChatError;
use crate::locale::Locale;
use crate::observer::{NoopObserver, SessionObserver};
use crate::prompts::{default_template, validate_template};
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;

/// Configuration for a [`crate::session::ChatSession`].
///
/// # Example
/// ```rust
/// use edgequake_pdfchat::{ChatConfig, Locale};
///
/// let config = ChatConfig::builder()
///     .model("gemini-2.5-flash")
///     .locale(Locale::Myanmar)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ChatConfig {
    /// LLM model identifier, e.g. "gemini-2.5-flash", "gpt-4.1-mini".
    /// If None, the provider default for the resolution path is used.
    pub model: Option<String>,

    /// LLM provider name (e.g. "gemini", "openai", "anthropic", "ollama").
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature. Default: 0.2.
    ///
    /// Grounded answers should paraphrase the document, not invent; a low
    /// temperature keeps them close to the source.
    pub temperature: f32,

    /// Maximum tokens the LLM may generate per answer. Default: 4096.
    pub max_tokens: usize,

    /// Language of fixed messages and the built-in grounding prompt.
    pub locale: Locale,

    /// Custom grounding template. Must contain `{document}` exactly once.
    /// If None, the locale's built-in template is used.
    pub prompt_template: Option<String>,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Session event hooks. Default: [`NoopObserver`].
    pub observer: Arc<dyn SessionObserver>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.2,
            max_tokens: 4096,
            locale: Locale::default(),
            prompt_template: None,
            password: None,
            download_timeout_secs: 120,
            observer: Arc::new(NoopObserver),
        }
    }
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("locale", &self.locale)
            .field("prompt_template", &self.prompt_template.as_ref().map(|t| t.len()))
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("download_timeout_secs", &self.download_timeout_secs)
            .finish()
    }
}

impl ChatConfig {
    /// Create a new builder for `ChatConfig`.
    pub fn builder() -> ChatConfigBuilder {
        ChatConfigBuilder {
            config: Self::default(),
        }
    }

    /// The grounding template in effect: the override or the locale default.
    pub fn template(&self) -> &str {
        self.prompt_template
            .as_deref()
            .unwrap_or_else(|| default_template(self.locale))
    }
}

/// Builder for [`ChatConfig`].
#[derive(Debug)]
pub struct ChatConfigBuilder {
    config: ChatConfig,
}

impl ChatConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    pub fn prompt_template(mut self, template: impl Into<String>) -> Self {
        self.config.prompt_template = Some(template.into());
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.config.observer = observer;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ChatConfig, PdfChatError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(PdfChatError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if let Some(ref template) = c.prompt_template {
            validate_template(template).map_err(PdfChatError::InvalidConfig)?;
        }
        if c.download_timeout_secs == 0 {
            return Err(PdfChatError::InvalidConfig(
                "download timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
