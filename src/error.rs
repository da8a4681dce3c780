//! Error types for the edgequake-pdfchat library.
//!
//! Session actions fail in exactly two ways, and each has its own type:
//!
//! * [`ExtractionError`]: the uploaded document could not be turned into
//!   text. The session falls back to having no document and the transcript is
//!   discarded.
//!
//! * [`GenerationError`]: the answer request failed. The document stays
//!   loaded; one error exchange is appended and the user may ask again.
//!
//! Neither is fatal to the session. [`PdfChatError`] covers the failures that
//! happen *outside* a session action (bad configuration, unreadable input
//! path, download problems) and wraps the two session errors for the one-shot
//! [`crate::ask::ask`] API.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors returned by the library's top-level entry points.
#[derive(Debug, Error)]
pub enum PdfChatError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Session errors ────────────────────────────────────────────────────
    /// The document could not be extracted.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The answer could not be generated.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The session refused the action (busy, no document, empty query).
    #[error("Request rejected: {0}")]
    Rejected(crate::session::Rejection),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure to turn document bytes into page text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The bytes do not start with the `%PDF` signature.
    #[error("Input is not a PDF document (first bytes: {magic:?})")]
    NotAPdf { magic: Vec<u8> },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF is corrupt: {detail}")]
    CorruptPdf { detail: String },

    /// PDF requires a password but none was configured.
    #[error("PDF is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired,

    /// A password was configured but it is wrong.
    #[error("Wrong password for encrypted PDF")]
    WrongPassword,

    /// Every page came back empty (scanned or image-only document).
    #[error("No extractable text found in {pages} page(s); the PDF may be scanned images only")]
    NoText { pages: usize },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium, or place the platform library\n\
(libpdfium.so / libpdfium.dylib / pdfium.dll) next to the executable.\n"
    )]
    EngineUnavailable(String),

    /// Extraction task panicked or similar.
    #[error("Internal extraction error: {0}")]
    Internal(String),
}

/// Failure to obtain an answer from the generator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// No provider could be resolved (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The provider call failed (network, HTTP status, malformed response).
    #[error("LLM API error: {message}")]
    Api { message: String },

    /// Unexpected internal error.
    #[error("Internal generation error: {0}")]
    Internal(String),
}
