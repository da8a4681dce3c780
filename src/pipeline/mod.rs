//! Pipeline stages between a file on disk and an answer on screen.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ (prompts) ──▶ generate ──▶ render
//! (path/URL)  (pdfium)    (grounding)   (LLM)       (HTML/plain)
//! ```
//!
//! 1. [`input`]: load the user-supplied path or URL into memory
//! 2. [`extract`]: pull page text out of the PDF; runs in `spawn_blocking`
//!    because pdfium is not async-safe
//! 3. [`generate`]: one LLM call per question; the only stage with network I/O
//!    besides URL downloads
//! 4. [`render`]: turn transcript text into display markup
//!
//! [`extract`] and [`generate`] expose traits so the session can run against
//! other engines.

pub mod extract;
pub mod generate;
pub mod input;
pub mod render;
