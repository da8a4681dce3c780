//! # edgequake-pdfchat
//!
//! Ask questions about a PDF and get answers grounded strictly in its text.
//!
//! ## How it works
//!
//! A [`ChatSession`] holds one document and one conversation. Uploading a PDF
//! extracts its text page by page and joins it with page markers. Every
//! question is then answered by a single LLM call whose system instruction
//! embeds the *whole* document text and tells the model to answer only from
//! it. Nothing is indexed or chunked; there is no retrieval step to get wrong.
//!
//! ```text
//! PDF bytes
//!  │
//!  ├─ 1. Extract   page text via pdfium (CPU-bound, spawn_blocking)
//!  ├─ 2. Assemble  "--- Page N ---" markers, blank-line separated
//!  │
//! question
//!  ├─ 3. Compose   grounding template + document text / raw question
//!  ├─ 4. Generate  one call to gemini / gpt / claude / …
//!  └─ 5. Record    user and assistant exchanges in the transcript
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_pdfchat::{ChatConfig, ChatSession, QueryOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider auto-detected from GEMINI_API_KEY / OPENAI_API_KEY / ANTHROPIC_API_KEY
//!     let mut session = ChatSession::new(ChatConfig::default());
//!
//!     let bytes = std::fs::read("policy.pdf")?;
//!     session.submit_file(&bytes, "policy.pdf").await?;
//!
//!     if let QueryOutcome::Answered = session.submit_query("What is the leave policy?").await? {
//!         println!("{}", session.transcript().last().unwrap().text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! For a single question there is [`ask`]:
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let answer = edgequake_pdfchat::ask("policy.pdf", "Who approves leave?", &Default::default()).await?;
//! println!("{}", answer.answer);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfchat` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! edgequake-pdfchat = { version = "0.1", default-features = false }
//! ```
//!
//! ## Document size
//!
//! The full text is resent with every question, so the document must fit in
//! the model's context window. Long-context models (`gemini-2.5-flash`, the
//! default when `GEMINI_API_KEY` is set) handle a few hundred pages.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod ask;
pub mod config;
pub mod error;
pub mod locale;
pub mod observer;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod transcript;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use ask::{ask, ask_bytes, ask_sync, ask_with_session, inspect, Answer};
pub use config::{ChatConfig, ChatConfigBuilder};
pub use error::{ExtractionError, GenerationError, PdfChatError};
pub use locale::{Locale, Messages};
pub use observer::{NoopObserver, Observer, SessionObserver};
pub use pipeline::extract::{inspect_bytes, DocumentInfo, ExtractedText, PdfiumExtractor, TextExtractor};
pub use pipeline::generate::{AnswerGenerator, LlmAnswerGenerator};
pub use pipeline::render::{MarkupRenderer, PlainTextRenderer, SafeHtmlRenderer};
pub use prompts::{compose_prompt, PromptPayload};
pub use session::{
    ChatSession, Document, DocumentStatus, QueryOutcome, QueryTicket, Rejection, RequestState,
    SessionState, UploadOutcome, UploadTicket,
};
pub use transcript::{Exchange, Sender, Transcript};
