//! Tokenization for documents and queries.
//!
//! [`Tokenizer`] is the pluggable segmentation capability. The default
//! [`UnicodeTokenizer`] lowercases and splits on Unicode word boundaries, which
//! handles mixed Latin/CJK text (Han runs segment per ideograph). [`analyze`]
//! applies the shared post-filter: empty tokens and stopwords are dropped, the
//! same way for documents and queries.
//!
//! Stopwords are compiled through the same tokenizer into a [`StopFilter`], so
//! they get the same normalization as the text they filter. A stopword that
//! segments into several tokens (`什么` → `什`, `么`) is removed wherever that
//! token run appears contiguously.

use crate::error::TokenizeError;
use crate::stopwords::Stopwords;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Segments text into an ordered token sequence.
///
/// Implementations must be deterministic for a given input.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError>;
}

/// Lowercasing UAX #29 word segmenter.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizeError> {
        let lowered = text.to_lowercase();
        Ok(lowered.unicode_words().map(str::to_string).collect())
    }
}

/// Stopwords normalized by a specific tokenizer.
#[derive(Debug, Clone, Default)]
pub struct StopFilter {
    /// Raw stopwords plus every stopword that tokenizes to exactly one token.
    words: HashSet<String>,
    /// Multi-token stopwords keyed by first token, longest first.
    phrases: HashMap<String, Vec<Vec<String>>>,
}

impl StopFilter {
    /// Run every stopword through `tokenizer`.
    pub fn compile(
        tokenizer: &dyn Tokenizer,
        stopwords: &Stopwords,
    ) -> Result<Self, TokenizeError> {
        let mut words = HashSet::with_capacity(stopwords.len());
        let mut phrases: HashMap<String, Vec<Vec<String>>> = HashMap::new();

        for word in stopwords.iter() {
            words.insert(word.to_string());
            let mut tokens = tokenizer.tokenize(word)?;
            tokens.retain(|t| !t.trim().is_empty());
            match tokens.len() {
                0 => {}
                1 => {
                    words.extend(tokens);
                }
                _ => phrases.entry(tokens[0].clone()).or_default().push(tokens),
            }
        }
        for candidates in phrases.values_mut() {
            candidates.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            candidates.dedup();
        }
        Ok(Self { words, phrases })
    }

    /// Drop whitespace-only tokens, stopword tokens, and stopword token runs.
    pub fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        let tokens: Vec<String> = tokens.into_iter().filter(|t| !t.trim().is_empty()).collect();
        let mut kept = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let run = self
                .phrases
                .get(&tokens[i])
                .and_then(|candidates| candidates.iter().find(|p| tokens[i..].starts_with(p)))
                .map(Vec::len);
            match run {
                Some(len) => i += len,
                None => {
                    if !self.words.contains(&tokens[i]) {
                        kept.push(tokens[i].clone());
                    }
                    i += 1;
                }
            }
        }
        kept
    }
}

/// Tokenize `text` and apply the stopword filter.
pub fn analyze(
    tokenizer: &dyn Tokenizer,
    filter: &StopFilter,
    text: &str,
) -> Result<Vec<String>, TokenizeError> {
    Ok(filter.apply(tokenizer.tokenize(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<&'static str>);

    impl Tokenizer for Fixed {
        fn tokenize(&self, _text: &str) -> Result<Vec<String>, TokenizeError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    fn compiled(stopwords: &str) -> StopFilter {
        StopFilter::compile(&UnicodeTokenizer, &Stopwords::parse(stopwords)).unwrap()
    }

    #[test]
    fn test_tokenize_latin() {
        let tokens = UnicodeTokenizer.tokenize("The Quick, brown fox!").unwrap();
        assert_eq!(tokens, ["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn test_tokenize_mixed_script() {
        let tokens = UnicodeTokenizer.tokenize("Bloch 球是叠加").unwrap();
        assert_eq!(tokens[0], "bloch");
        assert!(tokens.contains(&"叠".to_string()));
        assert!(tokens.contains(&"加".to_string()));
    }

    #[test]
    fn test_tokenize_deterministic() {
        let a = UnicodeTokenizer.tokenize("量子叠加表示多个状态").unwrap();
        let b = UnicodeTokenizer.tokenize("量子叠加表示多个状态").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_analyze_drops_blank_and_stopwords() {
        let tok = Fixed(vec!["量子", " ", "", "的", "叠加", "\t"]);
        let filter = StopFilter::compile(&tok, &Stopwords::new()).unwrap();
        let filter = StopFilter {
            words: ["的".to_string()].into_iter().collect(),
            ..filter
        };
        let tokens = analyze(&tok, &filter, "ignored").unwrap();
        assert_eq!(tokens, ["量子", "叠加"]);
    }

    #[test]
    fn test_analyze_all_stopwords_is_empty() {
        let tokens = analyze(&UnicodeTokenizer, &compiled("the\nof"), "the of THE").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_multi_char_cjk_stopword_removed_as_run() {
        let filter = compiled("什么");
        let tokens = analyze(&UnicodeTokenizer, &filter, "什么是叠加").unwrap();
        assert_eq!(tokens, ["是", "叠", "加"]);
    }

    #[test]
    fn test_phrase_stopword_keeps_isolated_chars() {
        let filter = compiled("我们");
        let tokens = analyze(&UnicodeTokenizer, &filter, "我 和 我们").unwrap();
        assert_eq!(tokens, ["我", "和"], "only the contiguous run is a stopword");
    }

    #[test]
    fn test_longest_phrase_wins() {
        let filter = compiled("什么\n什么是");
        let tokens = analyze(&UnicodeTokenizer, &filter, "什么是叠加").unwrap();
        assert_eq!(tokens, ["叠", "加"]);
    }

    #[test]
    fn test_uppercase_stopword_normalized_like_text() {
        let filter = compiled("The\nOF");
        let tokens = analyze(&UnicodeTokenizer, &filter, "The state of THE art").unwrap();
        assert_eq!(tokens, ["state", "art"]);
    }

    #[test]
    fn test_raw_stopword_still_matches_raw_token() {
        let tok = Fixed(vec!["，", "量子"]);
        let filter = StopFilter::compile(&UnicodeTokenizer, &Stopwords::parse("，")).unwrap();
        assert_eq!(analyze(&tok, &filter, "ignored").unwrap(), ["量子"]);
    }
}
