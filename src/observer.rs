//! Observer trait for session events.
//!
//! Inject an [`Arc<dyn SessionObserver>`] via
//! [`crate::config::ChatConfigBuilder::observer`] to hear about extraction and
//! answer lifecycle events (a spinner, a log sink, a status bar)
//! without the session knowing how the host displays anything.
//!
//! # Example
//!
//! ```rust
//! use edgequake_pdfchat::{ChatConfig, SessionObserver};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct AnswerCounter {
//!     answers: AtomicUsize,
//! }
//!
//! impl SessionObserver for AnswerCounter {
//!     fn on_answer(&self, chars: usize) {
//!         self.answers.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("answer: {chars} chars");
//!     }
//! }
//!
//! let config = ChatConfig::builder()
//!     .observer(Arc::new(AnswerCounter { answers: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by [`crate::session::ChatSession`] as actions start and finish.
///
/// All methods have default no-op implementations so implementors override
/// only what they need.
pub trait SessionObserver: Send + Sync {
    /// Called when a new document starts extracting.
    fn on_extraction_start(&self, name: &str) {
        let _ = name;
    }

    /// Called when a document is ready.
    ///
    /// # Arguments
    /// * `name`: document name as supplied by the caller
    /// * `pages`: number of pages extracted
    /// * `chars`: character count of the assembled text
    fn on_extraction_complete(&self, name: &str, pages: usize, chars: usize) {
        let _ = (name, pages, chars);
    }

    /// Called when extraction fails and the session drops the document.
    fn on_extraction_error(&self, name: &str, error: &str) {
        let _ = (name, error);
    }

    /// Called after the user exchange is recorded, before the generator runs.
    fn on_query_start(&self, query: &str) {
        let _ = query;
    }

    /// Called when an answer exchange has been appended.
    fn on_answer(&self, chars: usize) {
        let _ = chars;
    }

    /// Called when the generator fails.
    fn on_generation_error(&self, error: &str) {
        let _ = error;
    }
}

/// An observer that ignores every event. This is the default.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}

/// Convenience alias matching the type stored in [`crate::config::ChatConfig`].
pub type Observer = Arc<dyn SessionObserver>;
