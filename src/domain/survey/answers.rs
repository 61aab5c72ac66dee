//! A respondent's recorded answers, keyed by question key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The recorded answer for one question.
///
/// Values are option-value strings; multi-select questions record the
/// same shape per chosen option at scoring time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub value: String,
}

impl Answer {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// All answers of one survey run.
pub type AnswerSheet = BTreeMap<String, Answer>;
