//! Text extraction: PDF bytes → page-marked plain text.
//!
//! The [`TextExtractor`] trait is the capability the session depends on; it
//! yields one string per page in document order. [`extract_document`] is the
//! adapter around it: it rejects non-PDF input up front, requires at least one
//! page with real text, and assembles the pages into the single text blob the
//! grounding prompt embeds:
//!
//! ```text
//! --- Page 1 ---
//! <page 1 text>
//!
//! --- Page 2 ---
//! <page 2 text>
//!
//! ```
//!
//! [`PdfiumExtractor`] is the default implementation. pdfium uses
//! thread-local state and is CPU-bound, so all calls run inside
//! `tokio::task::spawn_blocking`.

use crate::error::ExtractionError;
use crate::locale::Messages;
use async_trait::async_trait;
use pdfium_render::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// PDF files start with these four bytes.
pub const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Turns document bytes into ordered page texts.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract every page, first page first. Must not return early with a
    /// partial result.
    async fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// The assembled output of [`extract_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub page_count: usize,
    pub full_text: String,
}

/// Run `extractor` on `bytes` and assemble page-marked text.
pub async fn extract_document(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    messages: &Messages,
) -> Result<ExtractedText, ExtractionError> {
    check_magic(bytes)?;

    let pages = extractor.extract_pages(bytes).await?;
    if pages.iter().all(|p| p.trim().is_empty()) {
        return Err(ExtractionError::NoText { pages: pages.len() });
    }

    let full_text = assemble_pages(&pages, messages);
    debug!(
        "Assembled {} pages into {} chars",
        pages.len(),
        full_text.chars().count()
    );
    Ok(ExtractedText {
        page_count: pages.len(),
        full_text,
    })
}

/// Reject input that does not carry the PDF signature.
pub fn check_magic(bytes: &[u8]) -> Result<(), ExtractionError> {
    if bytes.len() >= PDF_MAGIC.len() && &bytes[..PDF_MAGIC.len()] == PDF_MAGIC {
        Ok(())
    } else {
        Err(ExtractionError::NotAPdf {
            magic: bytes.iter().take(PDF_MAGIC.len()).copied().collect(),
        })
    }
}

/// Prefix each page with its marker and join with blank lines.
pub fn assemble_pages(pages: &[String], messages: &Messages) -> String {
    let mut out = String::new();
    for (i, text) in pages.iter().enumerate() {
        out.push_str(&messages.page_marker(i + 1));
        out.push('\n');
        out.push_str(text);
        out.push_str("\n\n");
    }
    out
}

/// Collapse the runs of whitespace pdfium leaves between text objects.
pub fn normalise_page_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── pdfium implementation ────────────────────────────────────────────────

/// Default extractor backed by the pdfium library.
#[derive(Debug, Clone, Default)]
pub struct PdfiumExtractor {
    password: Option<String>,
}

impl PdfiumExtractor {
    pub fn new(password: Option<String>) -> Self {
        Self { password }
    }
}

#[async_trait]
impl TextExtractor for PdfiumExtractor {
    async fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let bytes = bytes.to_vec();
        let password = self.password.clone();

        tokio::task::spawn_blocking(move || extract_pages_blocking(&bytes, password.as_deref()))
            .await
            .map_err(|e| ExtractionError::Internal(format!("Extraction task panicked: {}", e)))?
    }
}

/// Bind to pdfium: `PDFIUM_LIB_PATH`, then the working directory, then the system.
pub fn bind_pdfium() -> Result<Pdfium, ExtractionError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(path) if !path.is_empty() => Pdfium::bind_to_library(&path),
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| ExtractionError::EngineUnavailable(format!("{:?}", e)))?;

    Ok(Pdfium::new(bindings))
}

fn load_error(e: PdfiumError, password: Option<&str>) -> ExtractionError {
    let err_str = format!("{:?}", e);
    if err_str.contains("Password") || err_str.contains("password") {
        if password.is_some() {
            ExtractionError::WrongPassword
        } else {
            ExtractionError::PasswordRequired
        }
    } else {
        ExtractionError::CorruptPdf { detail: err_str }
    }
}

fn extract_pages_blocking(
    bytes: &[u8],
    password: Option<&str>,
) -> Result<Vec<String>, ExtractionError> {
    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, password)
        .map_err(|e| load_error(e, password))?;

    let pages = document.pages();
    info!("PDF loaded: {} pages", pages.len());

    let mut texts = Vec::with_capacity(pages.len() as usize);
    for (idx, page) in pages.iter().enumerate() {
        let text = page.text().map_err(|e| ExtractionError::CorruptPdf {
            detail: format!("page {}: {:?}", idx + 1, e),
        })?;
        let normalised = normalise_page_text(&text.all());
        debug!("Page {}: {} chars", idx + 1, normalised.len());
        texts.push(normalised);
    }

    Ok(texts)
}

// ── Inspection ───────────────────────────────────────────────────────────

/// Document properties readable without an LLM provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
    pub pdf_version: String,
}

/// Read page count and metadata from PDF bytes.
pub async fn inspect_bytes(
    bytes: &[u8],
    password: Option<&str>,
) -> Result<DocumentInfo, ExtractionError> {
    check_magic(bytes)?;
    let bytes = bytes.to_vec();
    let pwd = password.map(|s| s.to_string());

    tokio::task::spawn_blocking(move || inspect_blocking(&bytes, pwd.as_deref()))
        .await
        .map_err(|e| ExtractionError::Internal(format!("Inspect task panicked: {}", e)))?
}

fn inspect_blocking(bytes: &[u8], password: Option<&str>) -> Result<DocumentInfo, ExtractionError> {
    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(bytes, password)
        .map_err(|e| load_error(e, password))?;

    let metadata = document.metadata();
    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentInfo {
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
        subject: get_meta(PdfDocumentMetadataTagType::Subject),
        creator: get_meta(PdfDocumentMetadataTagType::Creator),
        producer: get_meta(PdfDocumentMetadataTagType::Producer),
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
    })
}
