//! The append-only conversation log of one document session.

use serde::{Deserialize, Serialize};

/// Who produced an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub sender: Sender,
    pub text: String,
}

impl Exchange {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// Ordered exchanges; index is display order.
///
/// Entries are only ever appended. The whole log is dropped when the session
/// switches document, which is the only way it shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<Exchange>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, exchange: Exchange) {
        self.entries.push(exchange);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Exchange] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Exchange> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exchange> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Exchange;
    type IntoIter = std::slice::Iter<'a, Exchange>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order() {
        let mut t = Transcript::new();
        t.push(Exchange::assistant("ready"));
        t.push(Exchange::user("q"));
        t.push(Exchange::assistant("a"));

        let senders: Vec<Sender> = t.iter().map(|e| e.sender).collect();
        assert_eq!(senders, vec![Sender::Assistant, Sender::User, Sender::Assistant]);
        assert_eq!(t.last().map(|e| e.text.as_str()), Some("a"));
    }

    #[test]
    fn serialises_as_plain_array() {
        let mut t = Transcript::new();
        t.push(Exchange::user("hi"));
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[{"sender":"user","text":"hi"}]"#);
    }
}
