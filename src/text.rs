//! Text cleaning, preprocessing, and surface features.
//!
//! [`clean_text`] is a stateless filter for social-media style text (URLs,
//! mentions, hashtags, symbols). [`TextAnalyzer`] carries a stop-word set
//! and keeps a log of every text it has preprocessed.
//!
//! ```
//! use data_science_toolkit::text::{clean_text, PreprocessOptions, TextAnalyzer};
//!
//! assert_eq!(clean_text("Nowy wpis! https://example.com #news", false), "Nowy wpis");
//!
//! let mut analyzer = TextAnalyzer::default();
//! let out = analyzer.preprocess("  Hello,   WORLD! ", &PreprocessOptions::default());
//! assert_eq!(out, "hello world");
//! assert_eq!(analyzer.processed_texts(), &["hello world"]);
//! ```

use crate::keywords::{rank_keywords, Keyword, KeywordOptions};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("valid regex literal"));

static MENTION_OR_HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+|#\w+").expect("valid regex literal"));

static SYMBOL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex literal"));

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex literal"));

static NON_ASCII: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").expect("valid regex literal"));

/// Built-in Polish stop words.
pub const POLISH_STOP_WORDS: &[&str] = &[
    "a", "aby", "ale", "albo", "bardzo", "bez", "być", "ci", "co", "czy", "dla", "do", "gdy", "go",
    "i", "ich", "ja", "jak", "jako", "je", "jego", "jej", "już", "ma", "może", "na", "nad", "nie",
    "o", "od", "po", "pod", "oraz", "się", "są", "ta", "tak", "te", "to", "tu", "w", "we", "z",
    "za", "że", "przez", "przy", "także", "tylko",
];

/// Collapses whitespace runs to a single space and trims both ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes URLs, `@mentions`, `#hashtags`, and symbols from `text`.
///
/// Every character that is neither a word character nor whitespace is
/// replaced by a space. With `aggressive`, digit runs and non-ASCII
/// characters are removed as well. Whitespace is collapsed at the end.
///
/// Applying the function twice gives the same result as applying it once.
pub fn clean_text(text: &str, aggressive: bool) -> String {
    let text = URL.replace_all(text, "");
    let text = MENTION_OR_HASHTAG.replace_all(&text, "");
    let mut text = SYMBOL.replace_all(&text, " ").into_owned();

    if aggressive {
        text = DIGITS.replace_all(&text, "").into_owned();
        text = NON_ASCII.replace_all(&text, "").into_owned();
    }

    collapse_whitespace(&text)
}

/// Language of the built-in stop-word set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Polish, with [`POLISH_STOP_WORDS`].
    #[default]
    Polish,
}

impl Language {
    /// The built-in stop words for this language.
    pub fn stop_words(self) -> &'static [&'static str] {
        match self {
            Self::Polish => POLISH_STOP_WORDS,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polish => write!(f, "polish"),
        }
    }
}

/// Options for [`TextAnalyzer::preprocess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Strip ASCII punctuation.
    pub remove_punctuation: bool,
    /// Strip digit runs.
    pub remove_numbers: bool,
    /// Lowercase the text.
    pub to_lowercase: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            remove_punctuation: true,
            remove_numbers: false,
            to_lowercase: true,
        }
    }
}

/// Surface statistics of a text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextFeatures {
    /// Unicode scalar values, whitespace included.
    pub char_count: usize,
    /// Whitespace-separated tokens.
    pub word_count: usize,
    /// Non-blank fragments between `.` characters.
    pub sentence_count: usize,
    /// Mean word length in characters; 0 when there are no words.
    pub avg_word_length: f64,
    /// Distinct tokens, compared exactly.
    pub unique_words: usize,
    /// `unique_words / word_count`; 0 when there are no words.
    pub lexical_diversity: f64,
    /// ASCII punctuation characters.
    pub punctuation_count: usize,
}

/// Computes [`TextFeatures`] for `text`.
///
/// Words are whitespace-separated tokens taken as-is, so punctuation
/// attached to a word counts toward its length.
pub fn extract_features(text: &str) -> TextFeatures {
    let words: Vec<&str> = text.split_whitespace().collect();
    let unique: HashSet<&str> = words.iter().copied().collect();
    let sentence_count = text.split('.').filter(|s| !s.trim().is_empty()).count();

    let (avg_word_length, lexical_diversity) = if words.is_empty() {
        (0.0, 0.0)
    } else {
        let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
        let n = words.len() as f64;
        (total_chars as f64 / n, unique.len() as f64 / n)
    };

    TextFeatures {
        char_count: text.chars().count(),
        word_count: words.len(),
        sentence_count,
        avg_word_length,
        unique_words: unique.len(),
        lexical_diversity,
        punctuation_count: text.chars().filter(char::is_ascii_punctuation).count(),
    }
}

/// Stateful text analyzer.
///
/// Holds a stop-word set used by [`extract_keywords`](Self::extract_keywords)
/// and an append-only log of preprocessed texts.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    language: Language,
    stop_words: HashSet<String>,
    processed_texts: Vec<String>,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl TextAnalyzer {
    /// Creates an analyzer with the built-in stop words of `language`.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            stop_words: language.stop_words().iter().map(|w| w.to_string()).collect(),
            processed_texts: Vec::new(),
        }
    }

    /// Replaces the stop-word set.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Language the analyzer was created for.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The current stop-word set.
    pub fn stop_words(&self) -> &HashSet<String> {
        &self.stop_words
    }

    /// Whether `word` is in the stop-word set.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Every result returned by [`preprocess`](Self::preprocess), oldest first.
    pub fn processed_texts(&self) -> &[String] {
        &self.processed_texts
    }

    /// Normalizes `text` and records the result.
    ///
    /// Steps, in order: compatibility decomposition (NFKD), optional
    /// lowercasing, whitespace collapse, optional ASCII punctuation
    /// removal, optional digit-run removal, final whitespace collapse.
    /// Any `Display` value is accepted and rendered first.
    pub fn preprocess(&mut self, text: impl fmt::Display, options: &PreprocessOptions) -> String {
        let mut text: String = text.to_string().nfkd().collect();

        if options.to_lowercase {
            text = text.to_lowercase();
        }
        text = collapse_whitespace(&text);

        if options.remove_punctuation {
            text.retain(|c| !c.is_ascii_punctuation());
        }
        if options.remove_numbers {
            text = DIGITS.replace_all(&text, "").into_owned();
        }
        let text = collapse_whitespace(&text);

        self.processed_texts.push(text.clone());
        text
    }

    /// See [`extract_features`].
    pub fn extract_features(&self, text: &str) -> TextFeatures {
        extract_features(text)
    }

    /// Ranks the keywords of `text`, filtering with this analyzer's stop words.
    pub fn extract_keywords(&self, text: &str, options: &KeywordOptions) -> Vec<Keyword> {
        rank_keywords(text, options, |w| self.is_stop_word(w))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
