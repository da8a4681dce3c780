//! The document chat session: one document, one transcript, one request at a time.
//!
//! ## States
//!
//! ```text
//!              begin_upload                 finish_upload(Ok)
//!   Empty ─────────────────▶ Extracting ─────────────────────▶ ReadyIdle ◀──┐
//!   Failed ◀──────────────── Extracting                          │         │
//!            finish_upload(Err)                     begin_query  │         │ finish_query
//!                                                                 ▼         │
//!                                                           ReadyPending ───┘
//! ```
//!
//! `Empty` and `Failed` both mean "no document"; `Failed` only remembers the
//! file that could not be read. `begin_upload` is also accepted from
//! `ReadyIdle` and resets the whole session. While `Extracting` or
//! `ReadyPending`, every new upload or query is rejected: there is no queue
//! and no cancellation.
//!
//! ## Two-phase actions
//!
//! Each async action is split into a synchronous `begin_*` (guards, records
//! the user exchange, enters the busy state) and a synchronous `finish_*`
//! (applies the collaborator's result). A host event loop can run the
//! collaborator call in between while the UI shows the pending state.
//! [`ChatSession::submit_file`] and [`ChatSession::submit_query`] do all three
//! steps for callers that just want to await the result. Dropping one of
//! those futures early (a timeout, a `select!`) fails the request as if the
//! collaborator had errored, so the session never stays busy. Hosts driving
//! `begin_*`/`finish_*` themselves call [`ChatSession::abandon_in_flight`]
//! after losing a ticket.

use crate::config::ChatConfig;
use crate::error::{ExtractionError, GenerationError};
use crate::locale::Messages;
use crate::pipeline::extract::{extract_document, ExtractedText, PdfiumExtractor, TextExtractor};
use crate::pipeline::generate::{AnswerGenerator, LlmAnswerGenerator};
use crate::prompts::{compose_prompt, PromptPayload};
use crate::transcript::{Exchange, Transcript};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A document whose text is ready to ground answers. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub full_text: String,
    pub page_count: usize,
}

/// Where the session's document is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Empty,
    Extracting,
    Ready,
    Failed,
}

/// The composite document × request state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No file chosen yet.
    Empty,
    /// The last upload could not be read. Behaves like `Empty`.
    Failed { name: String },
    /// Waiting for the extractor.
    Extracting { name: String },
    /// Document ready, nothing in flight.
    ReadyIdle { document: Document },
    /// Document ready, one question in flight.
    ReadyPending { document: Document },
}

/// Snapshot of the request side of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestState {
    pub pending: bool,
    pub last_error: Option<String>,
}

/// Why the session refused an action. A refused action changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the query is empty")]
    EmptyQuery,
    #[error("no document is ready")]
    NoDocument,
    #[error("a request is already in progress")]
    Busy,
    #[error("the result belongs to a request that is no longer in progress")]
    StaleTicket,
}

/// Proof that an upload was accepted; hand it back to [`ChatSession::finish_upload`].
#[derive(Debug)]
pub struct UploadTicket {
    seq: u64,
    name: String,
}

impl UploadTicket {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Proof that a query was accepted; carries the prompt to send.
#[derive(Debug)]
pub struct QueryTicket {
    seq: u64,
    prompt: PromptPayload,
}

impl QueryTicket {
    pub fn prompt(&self) -> &PromptPayload {
        &self.prompt
    }
}

/// Result of applying an extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Ready {
        pages: usize,
    },
    /// `clear_input` tells the host to reset its file picker so the same
    /// file can be chosen again.
    Failed {
        error: ExtractionError,
        clear_input: bool,
    },
}

/// Result of applying a generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Answered,
    /// The generator returned nothing; the fallback message was recorded.
    Fallback,
    Failed { error: GenerationError },
}

/// The session controller.
pub struct ChatSession {
    config: ChatConfig,
    extractor: Arc<dyn TextExtractor>,
    generator: Arc<dyn AnswerGenerator>,
    state: SessionState,
    transcript: Transcript,
    last_error: Option<String>,
    seq: u64,
}

impl ChatSession {
    /// A session using pdfium for extraction and edgequake-llm for answers.
    pub fn new(config: ChatConfig) -> Self {
        let extractor = Arc::new(PdfiumExtractor::new(config.password.clone()));
        let generator = Arc::new(LlmAnswerGenerator::new(config.clone()));
        Self::with_collaborators(config, extractor, generator)
    }

    /// A session with caller-supplied collaborators.
    pub fn with_collaborators(
        config: ChatConfig,
        extractor: Arc<dyn TextExtractor>,
        generator: Arc<dyn AnswerGenerator>,
    ) -> Self {
        Self {
            config,
            extractor,
            generator,
            state: SessionState::Empty,
            transcript: Transcript::new(),
            last_error: None,
            seq: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn messages(&self) -> &'static Messages {
        self.config.locale.messages()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.state {
            SessionState::ReadyIdle { document } | SessionState::ReadyPending { document } => {
                Some(document)
            }
            _ => None,
        }
    }

    pub fn document_status(&self) -> DocumentStatus {
        match self.state {
            SessionState::Empty => DocumentStatus::Empty,
            SessionState::Failed { .. } => DocumentStatus::Failed,
            SessionState::Extracting { .. } => DocumentStatus::Extracting,
            SessionState::ReadyIdle { .. } | SessionState::ReadyPending { .. } => {
                DocumentStatus::Ready
            }
        }
    }

    pub fn request_state(&self) -> RequestState {
        RequestState {
            pending: self.is_pending(),
            last_error: self.last_error.clone(),
        }
    }

    /// A question is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::ReadyPending { .. })
    }

    /// An extraction or a question is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            SessionState::Extracting { .. } | SessionState::ReadyPending { .. }
        )
    }

    pub fn can_accept_query(&self) -> bool {
        matches!(self.state, SessionState::ReadyIdle { .. })
    }

    /// Transient status line, e.g. while a file is being read.
    pub fn status_notice(&self) -> Option<String> {
        match &self.state {
            SessionState::Extracting { name } => Some(self.messages().reading_notice(name)),
            _ => None,
        }
    }

    // ── Upload ───────────────────────────────────────────────────────────

    /// Accept a new document and reset the session.
    ///
    /// Rejected with [`Rejection::Busy`] while an extraction or a question is
    /// in flight.
    pub fn begin_upload(&mut self, name: impl Into<String>) -> Result<UploadTicket, Rejection> {
        if self.is_busy() {
            debug!("Upload rejected: session busy");
            return Err(Rejection::Busy);
        }

        let name = name.into();
        self.seq += 1;
        self.transcript.clear();
        self.last_error = None;
        self.state = SessionState::Extracting { name: name.clone() };

        info!("Extracting '{}'", name);
        self.config.observer.on_extraction_start(&name);
        Ok(UploadTicket {
            seq: self.seq,
            name,
        })
    }

    /// Apply the extractor's result for `ticket`.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<ExtractedText, ExtractionError>,
    ) -> Result<UploadOutcome, Rejection> {
        let in_flight = matches!(
            &self.state,
            SessionState::Extracting { name } if *name == ticket.name
        );
        if !in_flight || ticket.seq != self.seq {
            return Err(Rejection::StaleTicket);
        }

        // A document with no text can ground nothing.
        let result = result.and_then(|extracted| {
            if extracted.page_count == 0 || extracted.full_text.trim().is_empty() {
                Err(ExtractionError::NoText {
                    pages: extracted.page_count,
                })
            } else {
                Ok(extracted)
            }
        });

        let messages = self.messages();
        match result {
            Ok(extracted) => {
                let chars = extracted.full_text.chars().count();
                info!(
                    "'{}' ready: {} pages, {} chars",
                    ticket.name, extracted.page_count, chars
                );
                self.config
                    .observer
                    .on_extraction_complete(&ticket.name, extracted.page_count, chars);

                let pages = extracted.page_count;
                self.transcript
                    .push(Exchange::assistant(messages.document_ready));
                self.state = SessionState::ReadyIdle {
                    document: Document {
                        name: ticket.name,
                        full_text: extracted.full_text,
                        page_count: pages,
                    },
                };
                Ok(UploadOutcome::Ready { pages })
            }
            Err(error) => {
                warn!("Extraction of '{}' failed: {}", ticket.name, error);
                self.config
                    .observer
                    .on_extraction_error(&ticket.name, &error.to_string());

                self.transcript.clear();
                self.last_error = Some(messages.extraction_failed.to_string());
                self.state = SessionState::Failed { name: ticket.name };
                Ok(UploadOutcome::Failed {
                    error,
                    clear_input: true,
                })
            }
        }
    }

    /// Upload `bytes` as `name`, extract, and apply the result.
    pub async fn submit_file(
        &mut self,
        bytes: &[u8],
        name: impl Into<String>,
    ) -> Result<UploadOutcome, Rejection> {
        let ticket = self.begin_upload(name)?;
        let extractor = Arc::clone(&self.extractor);
        let messages = self.messages();
        let mut guard = InFlightGuard::arm(self, ticket.seq);
        let result = extract_document(extractor.as_ref(), bytes, messages).await;
        let outcome = guard.disarm().finish_upload(ticket, result);
        outcome
    }

    // ── Query ────────────────────────────────────────────────────────────

    /// Accept a question: record it and compose its prompt.
    ///
    /// The user exchange is appended here, before any network call, so the
    /// question always precedes its answer in the transcript.
    pub fn begin_query(&mut self, text: &str) -> Result<QueryTicket, Rejection> {
        match &self.state {
            SessionState::ReadyIdle { .. } => {}
            SessionState::Extracting { .. } | SessionState::ReadyPending { .. } => {
                debug!("Query rejected: session busy");
                return Err(Rejection::Busy);
            }
            SessionState::Empty | SessionState::Failed { .. } => {
                debug!("Query rejected: no document");
                return Err(Rejection::NoDocument);
            }
        }
        if text.trim().is_empty() {
            return Err(Rejection::EmptyQuery);
        }

        let document = match std::mem::replace(&mut self.state, SessionState::Empty) {
            SessionState::ReadyIdle { document } => document,
            // Guarded above.
            other => {
                self.state = other;
                return Err(Rejection::Busy);
            }
        };

        self.seq += 1;
        self.last_error = None;
        self.transcript.push(Exchange::user(text));
        let prompt = compose_prompt(&document.full_text, text, self.config.template());
        self.state = SessionState::ReadyPending { document };

        info!("Query accepted ({} chars)", text.chars().count());
        self.config.observer.on_query_start(text);
        Ok(QueryTicket {
            seq: self.seq,
            prompt,
        })
    }

    /// Apply the generator's result for `ticket`.
    pub fn finish_query(
        &mut self,
        ticket: QueryTicket,
        result: Result<String, GenerationError>,
    ) -> Result<QueryOutcome, Rejection> {
        if !self.is_pending() || ticket.seq != self.seq {
            return Err(Rejection::StaleTicket);
        }

        let document = match std::mem::replace(&mut self.state, SessionState::Empty) {
            SessionState::ReadyPending { document } => document,
            other => {
                self.state = other;
                return Err(Rejection::StaleTicket);
            }
        };

        let messages = self.messages();
        let outcome = match result {
            Ok(answer) if answer.trim().is_empty() => {
                warn!("Generator returned an empty answer");
                self.transcript
                    .push(Exchange::assistant(messages.empty_answer_fallback));
                self.config
                    .observer
                    .on_answer(messages.empty_answer_fallback.chars().count());
                QueryOutcome::Fallback
            }
            Ok(answer) => {
                let chars = answer.chars().count();
                info!("Answer received ({} chars)", chars);
                self.transcript.push(Exchange::assistant(answer));
                self.config.observer.on_answer(chars);
                QueryOutcome::Answered
            }
            Err(error) => {
                warn!("Generation failed: {}", error);
                self.transcript
                    .push(Exchange::assistant(messages.generation_failed));
                self.last_error = Some(messages.generation_failed.to_string());
                self.config.observer.on_generation_error(&error.to_string());
                QueryOutcome::Failed { error }
            }
        };

        self.state = SessionState::ReadyIdle { document };
        Ok(outcome)
    }

    /// Ask `text`, await the generator, and apply the answer.
    pub async fn submit_query(&mut self, text: &str) -> Result<QueryOutcome, Rejection> {
        let ticket = self.begin_query(text)?;
        let generator = Arc::clone(&self.generator);
        let mut guard = InFlightGuard::arm(self, ticket.seq);
        let result = generator.generate(ticket.prompt()).await;
        let outcome = guard.disarm().finish_query(ticket, result);
        outcome
    }

    // ── Recovery ─────────────────────────────────────────────────────────

    /// Fail whatever extraction or question is in flight.
    ///
    /// For hosts that lost a ticket. An abandoned upload leaves the session
    /// `Failed`; an abandoned question records the generation error exchange
    /// and returns to `ReadyIdle`. Returns `false` when nothing was in flight.
    pub fn abandon_in_flight(&mut self) -> bool {
        let seq = self.seq;
        match &self.state {
            SessionState::Extracting { name } => {
                warn!("Upload of '{}' abandoned before extraction finished", name);
                let ticket = UploadTicket {
                    seq,
                    name: name.clone(),
                };
                self.finish_upload(
                    ticket,
                    Err(ExtractionError::Internal(
                        "upload abandoned before extraction finished".into(),
                    )),
                )
                .is_ok()
            }
            SessionState::ReadyPending { .. } => {
                warn!("Question abandoned before the answer arrived");
                let ticket = QueryTicket {
                    seq,
                    prompt: PromptPayload {
                        system_instruction: String::new(),
                        user_query: String::new(),
                    },
                };
                self.finish_query(
                    ticket,
                    Err(GenerationError::Internal(
                        "question abandoned before the answer arrived".into(),
                    )),
                )
                .is_ok()
            }
            _ => false,
        }
    }
}

/// Fails the in-flight request if a `submit_*` future is dropped before it
/// applies its result.
struct InFlightGuard<'a> {
    session: &'a mut ChatSession,
    seq: u64,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn arm(session: &'a mut ChatSession, seq: u64) -> Self {
        Self {
            session,
            seq,
            armed: true,
        }
    }

    fn disarm(&mut self) -> &mut ChatSession {
        self.armed = false;
        self.session
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.session.seq == self.seq {
            self.session.abandon_in_flight();
        }
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("state", &self.document_status())
            .field("pending", &self.is_pending())
            .field("transcript_len", &self.transcript.len())
            .field("last_error", &self.last_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Sender;
    use async_trait::async_trait;

    struct NeverCalled;

    #[async_trait]
    impl TextExtractor for NeverCalled {
        async fn extract_pages(&self, _: &[u8]) -> Result<Vec<String>, ExtractionError> {
            unreachable!()
        }
    }

    #[async_trait]
    impl AnswerGenerator for NeverCalled {
        async fn generate(&self, _: &PromptPayload) -> Result<String, GenerationError> {
            unreachable!()
        }
    }

    fn session() -> ChatSession {
        ChatSession::with_collaborators(
            ChatConfig::default(),
            Arc::new(NeverCalled),
            Arc::new(NeverCalled),
        )
    }

    fn extracted(text: &str) -> ExtractedText {
        ExtractedText {
            page_count: 1,
            full_text: format!("--- Page 1 ---\n{text}\n\n"),
        }
    }

    fn ready_session() -> ChatSession {
        let mut s = session();
        let t = s.begin_upload("doc.pdf").unwrap();
        s.finish_upload(t, Ok(extracted("content"))).unwrap();
        s
    }

    #[test]
    fn starts_empty() {
        let s = session();
        assert_eq!(s.document_status(), DocumentStatus::Empty);
        assert!(s.transcript().is_empty());
        assert_eq!(
            s.request_state(),
            RequestState {
                pending: false,
                last_error: None
            }
        );
    }

    #[test]
    fn extracting_shows_notice_and_blocks_everything() {
        let mut s = session();
        let _t = s.begin_upload("a.pdf").unwrap();
        assert_eq!(s.document_status(), DocumentStatus::Extracting);
        assert!(s.status_notice().unwrap().contains("'a.pdf'"));
        assert_eq!(s.begin_upload("b.pdf").unwrap_err(), Rejection::Busy);
        assert_eq!(s.begin_query("hi").unwrap_err(), Rejection::Busy);
    }

    #[test]
    fn successful_upload_adds_one_confirmation() {
        let s = ready_session();
        assert_eq!(s.document_status(), DocumentStatus::Ready);
        assert_eq!(s.transcript().len(), 1);
        let first = &s.transcript().entries()[0];
        assert_eq!(first.sender, Sender::Assistant);
        assert_eq!(first.text, s.messages().document_ready);
        assert!(s.status_notice().is_none());
    }

    #[test]
    fn failed_upload_clears_and_sets_error() {
        let mut s = ready_session();
        let t = s.begin_upload("bad.pdf").unwrap();
        let out = s
            .finish_upload(t, Err(ExtractionError::CorruptPdf { detail: "xref".into() }))
            .unwrap();

        assert!(matches!(out, UploadOutcome::Failed { clear_input: true, .. }));
        assert_eq!(s.document_status(), DocumentStatus::Failed);
        assert!(s.document().is_none());
        assert!(s.transcript().is_empty());
        assert_eq!(s.last_error(), Some(s.messages().extraction_failed));
        assert_eq!(s.begin_query("q").unwrap_err(), Rejection::NoDocument);
    }

    #[test]
    fn failed_state_accepts_new_upload() {
        let mut s = session();
        let t = s.begin_upload("bad.pdf").unwrap();
        s.finish_upload(t, Err(ExtractionError::NoText { pages: 1 })).unwrap();
        let t = s.begin_upload("good.pdf").unwrap();
        assert!(s.last_error().is_none());
        s.finish_upload(t, Ok(extracted("x"))).unwrap();
        assert_eq!(s.document().map(|d| d.name.as_str()), Some("good.pdf"));
    }

    #[test]
    fn begin_query_records_user_exchange_before_answer() {
        let mut s = ready_session();
        let ticket = s.begin_query("What is the leave policy?").unwrap();

        assert!(s.is_pending());
        assert_eq!(s.transcript().len(), 2);
        assert_eq!(
            s.transcript().last(),
            Some(&Exchange::user("What is the leave policy?"))
        );
        assert!(ticket.prompt().system_instruction.contains("content"));
        assert_eq!(ticket.prompt().user_query, "What is the leave policy?");
    }

    #[test]
    fn rejected_queries_change_nothing() {
        let mut s = ready_session();
        let before = s.transcript().clone();

        assert_eq!(s.begin_query("").unwrap_err(), Rejection::EmptyQuery);
        assert_eq!(s.begin_query(" \n\t ").unwrap_err(), Rejection::EmptyQuery);
        assert_eq!(s.transcript(), &before);
        assert!(!s.is_pending());

        let _ticket = s.begin_query("first").unwrap();
        let during = s.transcript().clone();
        assert_eq!(s.begin_query("second").unwrap_err(), Rejection::Busy);
        assert_eq!(s.begin_upload("other.pdf").unwrap_err(), Rejection::Busy);
        assert_eq!(s.transcript(), &during);
    }

    #[test]
    fn empty_answer_uses_fallback() {
        let mut s = ready_session();
        let t = s.begin_query("q").unwrap();
        let out = s.finish_query(t, Ok("   ".into())).unwrap();
        assert_eq!(out, QueryOutcome::Fallback);
        assert_eq!(
            s.transcript().last().unwrap().text,
            s.messages().empty_answer_fallback
        );
        assert!(s.last_error().is_none());
    }

    #[test]
    fn generation_error_keeps_document_and_history() {
        let mut s = ready_session();
        let t = s.begin_query("q").unwrap();
        let out = s
            .finish_query(
                t,
                Err(GenerationError::Api {
                    message: "503".into(),
                }),
            )
            .unwrap();

        assert!(matches!(out, QueryOutcome::Failed { .. }));
        assert_eq!(s.document_status(), DocumentStatus::Ready);
        assert_eq!(s.transcript().len(), 3);
        assert_eq!(
            s.transcript().last().unwrap().text,
            s.messages().generation_failed
        );
        assert_eq!(s.last_error(), Some(s.messages().generation_failed));
        assert!(s.can_accept_query());
    }

    #[test]
    fn new_query_clears_last_error() {
        let mut s = ready_session();
        let t = s.begin_query("q").unwrap();
        s.finish_query(t, Err(GenerationError::Internal("x".into())))
            .unwrap();
        assert!(s.last_error().is_some());
        let _t = s.begin_query("again").unwrap();
        assert!(s.last_error().is_none());
    }

    #[test]
    fn empty_extraction_is_no_text() {
        let mut s = session();
        let t = s.begin_upload("blank.pdf").unwrap();
        let out = s
            .finish_upload(
                t,
                Ok(ExtractedText {
                    page_count: 0,
                    full_text: String::new(),
                }),
            )
            .unwrap();
        assert_eq!(
            out,
            UploadOutcome::Failed {
                error: ExtractionError::NoText { pages: 0 },
                clear_input: true
            }
        );
        assert_eq!(s.document_status(), DocumentStatus::Failed);

        let t = s.begin_upload("spaces.pdf").unwrap();
        let out = s
            .finish_upload(
                t,
                Ok(ExtractedText {
                    page_count: 2,
                    full_text: " \n\n ".into(),
                }),
            )
            .unwrap();
        assert!(matches!(
            out,
            UploadOutcome::Failed {
                error: ExtractionError::NoText { pages: 2 },
                ..
            }
        ));
        assert!(s.document().is_none());
    }

    #[test]
    fn abandon_in_flight_unblocks_session() {
        let mut s = ready_session();
        let _lost = s.begin_query("q").unwrap();
        assert!(s.abandon_in_flight());
        assert!(s.can_accept_query());
        assert_eq!(s.transcript().len(), 3);
        assert_eq!(s.last_error(), Some(s.messages().generation_failed));

        let _lost = s.begin_upload("next.pdf").unwrap();
        assert!(s.abandon_in_flight());
        assert_eq!(s.document_status(), DocumentStatus::Failed);
        assert!(!s.abandon_in_flight());
        assert!(s.begin_upload("again.pdf").is_ok());
    }

    #[test]
    fn stale_tickets_are_refused() {
        let mut s = ready_session();
        let stale = s.begin_query("q").unwrap();
        // Forge a second ticket with an old sequence number.
        let forged = QueryTicket {
            seq: stale.seq - 1,
            prompt: stale.prompt.clone(),
        };
        assert_eq!(
            s.finish_query(forged, Ok("a".into())).unwrap_err(),
            Rejection::StaleTicket
        );
        assert!(s.is_pending());
        s.finish_query(stale, Ok("a".into())).unwrap();

        let late = QueryTicket {
            seq: s.seq,
            prompt: PromptPayload {
                system_instruction: String::new(),
                user_query: String::new(),
            },
        };
        assert_eq!(
            s.finish_query(late, Ok("b".into())).unwrap_err(),
            Rejection::StaleTicket
        );
        assert_eq!(s.transcript().len(), 3);
    }
}
