//! Stopword list loaded from a plain-text file, one token per line.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Immutable set of tokens excluded from indexing and querying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Creates an empty stopword set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one stopword per line. Lines are trimmed and blank lines dropped.
    pub fn parse(text: &str) -> Self {
        text.lines().collect()
    }

    /// Load stopwords from disk. A missing file yields an empty set.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let stopwords = Self::parse(&text);
                tracing::info!("Loaded {} stopwords from {:?}", stopwords.len(), path);
                Ok(stopwords)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("Stopword file {:?} not found, using empty set", path);
                Ok(Self::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Stopwords as written in the source, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_blank() {
        let sw = Stopwords::parse("的\n  是  \n\n\t\nthe\n");
        assert_eq!(sw.len(), 3);
        assert!(sw.contains("的"));
        assert!(sw.contains("是"));
        assert!(sw.contains("the"));
        assert!(!sw.contains(""));
    }

    #[test]
    fn test_duplicates_collapse() {
        let sw = Stopwords::parse("a\na\n a ");
        assert_eq!(sw.len(), 1);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sw = Stopwords::load(&dir.path().join("nope.txt")).unwrap();
        assert!(sw.is_empty());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stopwords.txt");
        fs::write(&path, "的\n了\n").unwrap();
        let sw = Stopwords::load(&path).unwrap();
        assert_eq!(sw.len(), 2);
        assert!(sw.contains("了"));
    }
}
