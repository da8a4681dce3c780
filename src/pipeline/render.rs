//! Markup rendering for transcript entries.
//!
//! Answers come back as Markdown written by a model that has just read an
//! arbitrary PDF, so the text is untrusted. [`SafeHtmlRenderer`] renders it to
//! HTML with every raw HTML fragment escaped and with script-capable link
//! targets neutralised. [`PlainTextRenderer`] is the pass-through used by the
//! terminal front-end.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Converts transcript text into display markup.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, text: &str) -> String;
}

/// Markdown → HTML with raw HTML escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeHtmlRenderer;

impl MarkupRenderer for SafeHtmlRenderer {
    fn render(&self, text: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let events = Parser::new_ext(text, options).map(sanitise_event);
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, events);
        out
    }
}

/// Returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl MarkupRenderer for PlainTextRenderer {
    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}

fn sanitise_event(event: Event<'_>) -> Event<'_> {
    match event {
        // Turning raw HTML into text makes push_html escape it.
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url
        .split(':')
        .next()
        .filter(|_| url.contains(':'))
        .map(|s| s.trim().to_ascii_lowercase());
    match scheme.as_deref() {
        Some("javascript") | Some("vbscript") | Some("data") => CowStr::Borrowed("#"),
        _ => url,
    }
}
