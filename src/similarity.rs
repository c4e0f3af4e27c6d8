//! Set-based similarity between two texts.
//!
//! Both texts are lowercased, passed through [`clean_text`], and reduced to
//! the set of their whitespace tokens. Term frequency is ignored.
//!
//! ```
//! use data_science_toolkit::similarity::{text_similarity, SimilarityMethod};
//!
//! let s = text_similarity("Kot lubi mleko", "kot lubi wodę", SimilarityMethod::Jaccard);
//! assert_eq!(s, 0.5);
//! ```

use crate::error::ToolkitError;
use crate::text::clean_text;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Similarity measure for [`text_similarity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimilarityMethod {
    /// `|A ∩ B| / |A ∪ B|`.
    #[default]
    Jaccard,
    /// Cosine of the 0/1 indicator vectors, `|A ∩ B| / sqrt(|A|·|B|)`.
    Cosine,
}

impl FromStr for SimilarityMethod {
    type Err = ToolkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jaccard" => Ok(Self::Jaccard),
            "cosine" => Ok(Self::Cosine),
            other => Err(ToolkitError::UnsupportedMethod {
                kind: "similarity",
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jaccard => write!(f, "jaccard"),
            Self::Cosine => write!(f, "cosine"),
        }
    }
}

fn token_set(text: &str) -> HashSet<String> {
    clean_text(&text.to_lowercase(), false)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Similarity of `a` and `b` in `[0, 1]`.
///
/// Returns 0 when both token sets are empty (Jaccard) or either one is
/// empty (Cosine).
pub fn text_similarity(a: &str, b: &str, method: SimilarityMethod) -> f64 {
    let a = token_set(a);
    let b = token_set(b);
    let common = a.intersection(&b).count() as f64;

    match method {
        SimilarityMethod::Jaccard => {
            let union = a.union(&b).count();
            if union == 0 {
                0.0
            } else {
                common / union as f64
            }
        }
        SimilarityMethod::Cosine => {
            let magnitude = ((a.len() * b.len()) as f64).sqrt();
            if magnitude == 0.0 {
                0.0
            } else {
                common / magnitude
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
