//! Per-dimension score accumulation and severity tiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::survey::{AnswerSheet, WeightTable};

/// Sums, for every dimension in the weight table, the weight of each
/// answered option. Missing lookups contribute 0; every dimension of the
/// table appears in the result even when nothing accumulated.
pub fn dimension_scores(weights: &WeightTable, answers: &AnswerSheet) -> BTreeMap<String, f64> {
    let mut scores: BTreeMap<String, f64> =
        weights.dimensions().map(|d| (d.to_string(), 0.0)).collect();

    for (dimension, per_question) in &weights.0 {
        for (question_key, per_option) in per_question {
            let Some(answer) = answers.get(question_key) else {
                continue;
            };
            if let Some(weight) = per_option.get(&answer.value) {
                *scores.entry(dimension.clone()).or_insert(0.0) += weight;
            }
        }
    }
    scores
}

/// Sum of all dimension scores; feeds the severity tier.
pub fn total_score(scores: &BTreeMap<String, f64>) -> f64 {
    scores.values().sum()
}

/// Overall severity derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Mild,
    Elevated,
    Severe,
}

/// Tier thresholds. These are presentation policy, not a contract of the
/// scoring core, so they are configurable; the defaults mirror the
/// original survey runtime (Ⅱ at 5, Ⅲ at 10).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityPolicy {
    pub elevated_at: f64,
    pub severe_at: f64,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self {
            elevated_at: 5.0,
            severe_at: 10.0,
        }
    }
}

impl SeverityPolicy {
    /// Classifies a total score. Boundaries are inclusive.
    pub fn classify(&self, total: f64) -> SeverityTier {
        if total >= self.severe_at {
            SeverityTier::Severe
        } else if total >= self.elevated_at {
            SeverityTier::Elevated
        } else {
            SeverityTier::Mild
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::Answer;

    fn weights() -> WeightTable {
        let mut wt = WeightTable::default();
        wt.set("stress", "q1", "a", 3.0);
        wt.set("stress", "q2", "b", 2.5);
        wt.set("sleep", "q1", "a", 1.0);
        wt.set("mood", "q9", "x", 4.0);
        wt
    }

    #[test]
    fn sums_weights_for_answered_options() {
        let mut answers = AnswerSheet::new();
        answers.insert("q1".into(), Answer::new("a"));
        answers.insert("q2".into(), Answer::new("b"));

        let scores = dimension_scores(&weights(), &answers);
        assert_eq!(scores["stress"], 5.5);
        assert_eq!(scores["sleep"], 1.0);
        // Unanswered dimensions still appear, at zero.
        assert_eq!(scores["mood"], 0.0);
    }

    #[test]
    fn unmatched_answers_contribute_nothing() {
        let mut answers = AnswerSheet::new();
        answers.insert("q1".into(), Answer::new("z"));
        answers.insert("unknown".into(), Answer::new("a"));

        let scores = dimension_scores(&weights(), &answers);
        assert_eq!(total_score(&scores), 0.0);
    }

    #[test]
    fn empty_weight_table_yields_no_dimensions() {
        let scores = dimension_scores(&WeightTable::default(), &AnswerSheet::new());
        assert!(scores.is_empty());
    }

    #[test]
    fn severity_boundaries_are_inclusive() {
        let policy = SeverityPolicy::default();
        assert_eq!(policy.classify(4.9), SeverityTier::Mild);
        assert_eq!(policy.classify(5.0), SeverityTier::Elevated);
        assert_eq!(policy.classify(9.9), SeverityTier::Elevated);
        assert_eq!(policy.classify(10.0), SeverityTier::Severe);
    }

    #[test]
    fn severity_thresholds_are_configurable() {
        let policy = SeverityPolicy {
            elevated_at: 1.0,
            severe_at: 2.0,
        };
        assert_eq!(policy.classify(1.5), SeverityTier::Elevated);
        assert_eq!(policy.classify(2.0), SeverityTier::Severe);
    }
}
