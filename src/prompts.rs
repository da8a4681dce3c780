//! Grounding prompt composition.
//!
//! The generator keeps no memory between calls, so every request carries the
//! complete extracted document inside the system instruction. There is no
//! truncation, chunking or retrieval: answers can only be grounded in text
//! the model actually sees on that call.
//!
//! Callers can replace the built-in template via
//! [`crate::config::ChatConfigBuilder::prompt_template`]; the template must
//! contain the [`DOCUMENT_PLACEHOLDER`] exactly where the document goes.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// Placeholder substituted with the full document text.
pub const DOCUMENT_PLACEHOLDER: &str = "{document}";

/// The two parts of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    /// Persona, grounding rules and the verbatim document text.
    pub system_instruction: String,
    /// The user's question, unmodified.
    pub user_query: String,
}

/// Build the payload for one question about `full_text`.
///
/// Pure: the same inputs always produce the same payload.
pub fn compose_prompt(full_text: &str, user_query: &str, template: &str) -> PromptPayload {
    PromptPayload {
        system_instruction: template.replacen(DOCUMENT_PLACEHOLDER, full_text, 1),
        user_query: user_query.to_string(),
    }
}

/// The built-in grounding template for `locale`.
pub fn default_template(locale: Locale) -> &'static str {
    locale.messages().grounding_template
}

/// Check a custom template is usable.
pub fn validate_template(template: &str) -> Result<(), String> {
    match template.matches(DOCUMENT_PLACEHOLDER).count() {
        1 => Ok(()),
        0 => Err(format!(
            "prompt template must contain the {DOCUMENT_PLACEHOLDER} placeholder"
        )),
        n => Err(format!(
            "prompt template must contain {DOCUMENT_PLACEHOLDER} exactly once (found {n})"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_is_embedded_verbatim() {
        let doc = "--- Page 1 ---\nAnnual leave is 10 days.\n\n";
        let p = compose_prompt(doc, "How many days?", default_template(Locale::English));
        assert!(p.system_instruction.contains(doc));
        assert!(!p.system_instruction.contains(DOCUMENT_PLACEHOLDER));
        assert_eq!(p.user_query, "How many days?");
    }

    #[test]
    fn query_is_not_trimmed_or_rewritten() {
        let p = compose_prompt("text", "  what?  ", "{document}");
        assert_eq!(p.user_query, "  what?  ");
        assert_eq!(p.system_instruction, "text");
    }

    #[test]
    fn placeholder_inside_document_is_not_expanded_twice() {
        let p = compose_prompt("a {document} b", "q", "<{document}>");
        assert_eq!(p.system_instruction, "<a {document} b>");
    }

    #[test]
    fn english_template_keeps_rules() {
        let t = default_template(Locale::English);
        assert!(t.contains("Source Material Only"));
        assert!(t.contains("(Source - Page X)"));
        assert!(t.contains("What else can I help you with?"));
    }

    #[test]
    fn validate_template_counts_placeholders() {
        assert!(validate_template("Doc: {document}").is_ok());
        assert!(validate_template("no slot").is_err());
        assert!(validate_template("{document}{document}").is_err());
    }
}
