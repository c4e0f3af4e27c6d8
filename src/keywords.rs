//! Frequency-ranked keyword extraction.
//!
//! ```
//! use data_science_toolkit::keywords::{extract_keywords, KeywordOptions};
//!
//! let keywords = extract_keywords("python python python kod kod test", &KeywordOptions::default());
//! assert_eq!(keywords[0].term, "python");
//! assert_eq!(keywords[0].frequency, 3);
//! assert_eq!(keywords[1].term, "kod");
//! ```

use crate::text::{clean_text, POLISH_STOP_WORDS};
use serde::Serialize;
use std::collections::HashMap;

/// A term and the number of times it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    /// Lowercased, cleaned term.
    pub term: String,
    /// Number of occurrences in the text.
    pub frequency: usize,
}

/// Configuration for keyword extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordOptions {
    /// Maximum number of keywords returned.
    pub top_n: usize,
    /// Minimum term length in characters.
    pub min_length: usize,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            top_n: 10,
            min_length: 3,
        }
    }
}

/// Ranks the terms of `text` by frequency, skipping Polish stop words.
///
/// The text is lowercased and passed through [`clean_text`] before being
/// split on whitespace. Terms shorter than `min_length` are dropped. Ties
/// keep the order in which the terms first appear.
pub fn extract_keywords(text: &str, options: &KeywordOptions) -> Vec<Keyword> {
    rank_keywords(text, options, |w| POLISH_STOP_WORDS.contains(&w))
}

pub(crate) fn rank_keywords<F>(text: &str, options: &KeywordOptions, is_stop_word: F) -> Vec<Keyword>
where
    F: Fn(&str) -> bool,
{
    let cleaned = clean_text(&text.to_lowercase(), false);

    // first-occurrence order is kept in `ranked`, `index` maps term → slot
    let mut ranked: Vec<Keyword> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for word in cleaned.split_whitespace() {
        if word.chars().count() < options.min_length || is_stop_word(word) {
            continue;
        }
        match index.get(word) {
            Some(&slot) => ranked[slot].frequency += 1,
            None => {
                index.insert(word, ranked.len());
                ranked.push(Keyword {
                    term: word.to_string(),
                    frequency: 1,
                });
            }
        }
    }

    // stable sort, so ties stay in first-occurrence order
    ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    ranked.truncate(options.top_n);
    ranked
}

// ── Tests ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(keywords: &[Keyword]) -> Vec<(&str, usize)> {
        keywords.iter().map(|k| (k.term.as_str(), k.frequency)).collect()
    }

    #[test]
    fn ranks_by_frequency() {
        let out = extract_keywords("python python python kod kod test", &KeywordOptions::default());
        assert_eq!(pairs(&out), vec![("python", 3), ("kod", 2), ("test", 1)]);
    }

    #[test]
    fn lowercases_cleans_and_truncates() {
        let options = KeywordOptions {
            top_n: 2,
            ..KeywordOptions::default()
        };
        let out = extract_keywords(
            "Analiza danych i analiza tekstu to także analiza. Dane, dane!",
            &options,
        );
        assert_eq!(pairs(&out), vec![("analiza", 3), ("dane", 2)]);
    }

    #[test]
    fn min_length_in_characters() {
        let options = KeywordOptions {
            min_length: 4,
            ..KeywordOptions::default()
        };
        let out = extract_keywords("kot pies kot pies ryba", &options);
        assert_eq!(pairs(&out), vec![("pies", 2), ("ryba", 1)]);

        // "żal" is three characters even though it is four bytes
        let out = extract_keywords("żal żal", &KeywordOptions::default());
        assert_eq!(pairs(&out), vec![("żal", 2)]);
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let out = extract_keywords("zeta alfa beta alfa zeta beta", &KeywordOptions::default());
        assert_eq!(pairs(&out), vec![("zeta", 2), ("alfa", 2), ("beta", 2)]);
    }

    #[test]
    fn stop_words_are_skipped() {
        let out = extract_keywords("także także tylko dane", &KeywordOptions::default());
        assert_eq!(pairs(&out), vec![("dane", 1)]);
    }

    #[test]
    fn empty_text_gives_no_keywords() {
        assert!(extract_keywords("", &KeywordOptions::default()).is_empty());
        assert!(extract_keywords("a i w", &KeywordOptions::default()).is_empty());
    }

    #[test]
    fn serializes_as_record() {
        let json = serde_json::to_string(&Keyword {
            term: "kod".into(),
            frequency: 2,
        })
        .unwrap();
        assert_eq!(json, r#"{"term":"kod","frequency":2}"#);
    }
}
