//! Question subset selection for survey export.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::domain::survey::{LocalizedText, Question};

/// How to pick questions out of the full pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QuestionSelection {
    /// The whole pool, unmodified.
    #[default]
    All,
    /// Explicit keys, kept in the pool's relative order. Keys that match
    /// nothing are silently dropped.
    Keys(Vec<String>),
    /// A uniformly shuffled subset of `min(n, total)` questions.
    Random(usize),
}

impl QuestionSelection {
    /// Builds a selection from the caller's raw parts: explicit keys win,
    /// then a positive random count, then everything.
    pub fn from_parts(question_keys: Vec<String>, random_count: usize) -> Self {
        if !question_keys.is_empty() {
            QuestionSelection::Keys(question_keys)
        } else if random_count > 0 {
            QuestionSelection::Random(random_count)
        } else {
            QuestionSelection::All
        }
    }
}

/// Applies a selection to the question pool.
pub fn select_questions(pool: &[Question], selection: &QuestionSelection) -> Vec<Question> {
    match selection {
        QuestionSelection::Keys(keys) if !keys.is_empty() => pool
            .iter()
            .filter(|q| keys.iter().any(|k| k == &q.key))
            .cloned()
            .collect(),
        QuestionSelection::Random(count) if *count > 0 => {
            let mut shuffled = pool.to_vec();
            shuffled.shuffle(&mut rand::thread_rng());
            shuffled.truncate((*count).min(pool.len()));
            shuffled
        }
        _ => pool.to_vec(),
    }
}

// Ordinal prefixes carried over from source numbering: "1. ", "第 3 题：", "(2) ".
static ARABIC_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("static regex"));
static CJK_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^第\s*\d+\s*题[：:]\s*").expect("static regex"));
static PAREN_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d+\)\s*").expect("static regex"));

/// Strips a leading ordinal prefix from every language entry of a title,
/// so exported subsets renumber cleanly.
pub fn strip_ordinal_prefix(title: &mut LocalizedText) {
    for text in title.values_mut() {
        let stripped = ARABIC_PREFIX_RE.replace(text, "");
        let stripped = CJK_PREFIX_RE.replace(&stripped, "");
        let stripped = PAREN_PREFIX_RE.replace(&stripped, "");
        *text = stripped.into_owned();
    }
}
