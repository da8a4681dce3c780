//! One-shot entry points: load one document, ask one question, return.
//!
//! Each call runs a fresh [`ChatSession`] through one upload and one query.
//! Hosts that keep a conversation going should hold a session themselves.

use crate::config::ChatConfig;
use crate::error::PdfChatError;
use crate::pipeline::extract::{self, DocumentInfo};
use crate::pipeline::input;
use crate::session::{ChatSession, QueryOutcome, UploadOutcome};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// The result of [`ask`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Display name of the document.
    pub document: String,
    pub page_count: usize,
    pub question: String,
    pub answer: String,
    /// `true` when the model returned nothing and `answer` is the fallback message.
    pub fallback: bool,
    pub duration_ms: u64,
}

/// Answer `question` about the PDF at `input` (local path or HTTP/HTTPS URL).
///
/// # Errors
/// Input resolution failures, [`PdfChatError::Extraction`] when the document
/// cannot be read, [`PdfChatError::Generation`] when the model call fails, and
/// [`PdfChatError::Rejected`] for an empty question.
pub async fn ask(
    input_str: impl AsRef<str>,
    question: &str,
    config: &ChatConfig,
) -> Result<Answer, PdfChatError> {
    let resolved = input::resolve_input(input_str.as_ref(), config.download_timeout_secs).await?;
    ask_bytes(&resolved.bytes, &resolved.name, question, config).await
}

/// Answer `question` about a PDF already held in memory.
///
/// # Example
/// ```rust,no_run
/// use edgequake_pdfchat::{ask_bytes, ChatConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("policy.pdf")?;
/// let answer = ask_bytes(&bytes, "policy.pdf", "What is the leave policy?", &ChatConfig::default()).await?;
/// println!("{}", answer.answer);
/// # Ok(())
/// # }
/// ```
pub async fn ask_bytes(
    bytes: &[u8],
    name: &str,
    question: &str,
    config: &ChatConfig,
) -> Result<Answer, PdfChatError> {
    ask_with_session(ChatSession::new(config.clone()), bytes, name, question).await
}

/// Run one upload and one query through `session`.
///
/// Lets callers supply a session built with their own collaborators.
pub async fn ask_with_session(
    mut session: ChatSession,
    bytes: &[u8],
    name: &str,
    question: &str,
) -> Result<Answer, PdfChatError> {
    let start = Instant::now();

    let page_count = match session
        .submit_file(bytes, name)
        .await
        .map_err(PdfChatError::Rejected)?
    {
        UploadOutcome::Ready { pages } => pages,
        UploadOutcome::Failed { error, .. } => return Err(error.into()),
    };

    let fallback = match session
        .submit_query(question)
        .await
        .map_err(PdfChatError::Rejected)?
    {
        QueryOutcome::Answered => false,
        QueryOutcome::Fallback => true,
        QueryOutcome::Failed { error } => return Err(error.into()),
    };

    let answer = session
        .transcript()
        .last()
        .map(|e| e.text.clone())
        .unwrap_or_default();
    let duration_ms = start.elapsed().as_millis() as u64;
    info!("Answered '{}' about '{}' in {}ms", question, name, duration_ms);

    Ok(Answer {
        document: name.to_string(),
        page_count,
        question: question.to_string(),
        answer,
        fallback,
        duration_ms,
    })
}

/// Synchronous wrapper around [`ask`].
///
/// Creates a temporary tokio runtime internally.
pub fn ask_sync(
    input_str: impl AsRef<str>,
    question: &str,
    config: &ChatConfig,
) -> Result<Answer, PdfChatError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| PdfChatError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(ask(input_str, question, config))
}

/// Read PDF metadata without extracting text.
///
/// Does not require an LLM provider or API key.
pub async fn inspect(
    input_str: impl AsRef<str>,
    config: &ChatConfig,
) -> Result<DocumentInfo, PdfChatError> {
    let resolved = input::resolve_input(input_str.as_ref(), config.download_timeout_secs).await?;
    Ok(extract::inspect_bytes(&resolved.bytes, config.password.as_deref()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractionError, GenerationError};
    use crate::pipeline::extract::TextExtractor;
    use crate::pipeline::generate::AnswerGenerator;
    use crate::prompts::PromptPayload;
    use crate::session::Rejection;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct OnePage;

    #[async_trait]
    impl TextExtractor for OnePage {
        async fn extract_pages(&self, _: &[u8]) -> Result<Vec<String>, ExtractionError> {
            Ok(vec!["Annual leave is 10 days.".into()])
        }
    }

    struct Reply(Result<String, GenerationError>);

    #[async_trait]
    impl AnswerGenerator for Reply {
        async fn generate(&self, _: &PromptPayload) -> Result<String, GenerationError> {
            self.0.clone()
        }
    }

    fn session(reply: Result<String, GenerationError>) -> ChatSession {
        ChatSession::with_collaborators(
            ChatConfig::default(),
            Arc::new(OnePage),
            Arc::new(Reply(reply)),
        )
    }

    #[tokio::test]
    async fn returns_the_answer() {
        let answer = ask_with_session(session(Ok("10 days".into())), b"%PDF-1.7", "a.pdf", "Leave?")
            .await
            .unwrap();
        assert_eq!(answer.answer, "10 days");
        assert_eq!(answer.page_count, 1);
        assert!(!answer.fallback);
    }

    #[tokio::test]
    async fn empty_reply_is_fallback() {
        let answer = ask_with_session(session(Ok(String::new())), b"%PDF-1.7", "a.pdf", "Leave?")
            .await
            .unwrap();
        assert!(answer.fallback);
        assert!(!answer.answer.is_empty());
    }

    #[tokio::test]
    async fn extraction_error_is_surfaced() {
        let err = ask_with_session(session(Ok("x".into())), b"GIF89a", "a.gif", "q")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PdfChatError::Extraction(ExtractionError::NotAPdf { .. })
        ));
    }

    #[tokio::test]
    async fn generation_error_is_surfaced() {
        let reply = Err(GenerationError::Api {
            message: "connection reset".into(),
        });
        let err = ask_with_session(session(reply), b"%PDF-1.7", "a.pdf", "q")
            .await
            .unwrap_err();
        assert!(matches!(err, PdfChatError::Generation(GenerationError::Api { .. })));
    }

    #[tokio::test]
    async fn blank_question_is_rejected() {
        let err = ask_with_session(session(Ok("x".into())), b"%PDF-1.7", "a.pdf", "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, PdfChatError::Rejected(Rejection::EmptyQuery)));
    }
}
