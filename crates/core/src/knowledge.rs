//! Knowledge base items and the JSON-lines loader.
//!
//! A [`KnowledgeItem`] is one question/answer pair. Items are numbered by their
//! position in load order, so indices are always contiguous `0..N`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::Path;

/// A retrievable question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    /// Position in load order.
    pub index: usize,
    pub question: String,
    pub answer: String,
}

impl KnowledgeItem {
    /// Creates an item at the given position.
    pub fn new(index: usize, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            index,
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Text indexed by BM25: `question + " " + answer`.
    pub fn lexical_text(&self) -> String {
        format!("{} {}", self.question, self.answer)
    }

    /// Text sent to the embedder: the lexical text with surrounding whitespace trimmed.
    pub fn embedding_text(&self) -> String {
        self.lexical_text().trim().to_string()
    }
}

/// Builds items from `(question, answer)` pairs, numbering them in order.
pub fn items_from_pairs<I, Q, A>(pairs: I) -> Vec<KnowledgeItem>
where
    I: IntoIterator<Item = (Q, A)>,
    Q: Into<String>,
    A: Into<String>,
{
    pairs
        .into_iter()
        .enumerate()
        .map(|(i, (q, a))| KnowledgeItem::new(i, q, a))
        .collect()
}

/// Parse JSON-lines text into knowledge items.
///
/// Blank lines are ignored. A line that is not a JSON object is skipped and
/// counted as malformed. `question` and `answer` default to empty text when
/// missing or not strings.
pub fn parse_knowledge(text: &str) -> Vec<KnowledgeItem> {
    let mut items = Vec::new();
    let mut malformed = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Map<String, Value>>(line) {
            Ok(record) => {
                let field = |name: &str| {
                    record
                        .get(name)
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                };
                items.push(KnowledgeItem::new(
                    items.len(),
                    field("question"),
                    field("answer"),
                ));
            }
            Err(e) => {
                malformed += 1;
                tracing::debug!("Skipping malformed knowledge record: {}", e);
            }
        }
    }

    if malformed > 0 {
        tracing::warn!(
            "Skipped {} malformed knowledge record(s), kept {}",
            malformed,
            items.len()
        );
    }
    items
}

/// Load a JSON-lines knowledge base from disk.
///
/// A missing file yields an empty list. Other I/O failures are returned.
pub fn load_knowledge(path: &Path) -> io::Result<Vec<KnowledgeItem>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("Knowledge base {:?} not found, starting empty", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };
    let items = parse_knowledge(&text);
    tracing::info!("Loaded {} knowledge items from {:?}", items.len(), path);
    Ok(items)
}
