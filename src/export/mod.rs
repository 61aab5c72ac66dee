//! Export-time components: question selection, scoring, rule evaluation,
//! and survey bundle assembly.

mod bundle;
mod rule_engine;
mod scoring;
mod selector;

pub use bundle::{assemble, referenced_products, SurveyBundle};
pub use rule_engine::{condition_matches, evaluate_rules, RecommendationPick, RuleOutcome};
pub use scoring::{dimension_scores, total_score, SeverityPolicy, SeverityTier};
pub use selector::{select_questions, strip_ordinal_prefix, QuestionSelection};

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::survey::{AnswerSheet, SurveyTemplate};

/// The full evaluation of one completed survey run.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyOutcome {
    pub scores: BTreeMap<String, f64>,
    pub total: f64,
    pub tier: SeverityTier,
    pub conclusions: Vec<String>,
    pub recommendations: Vec<RecommendationPick>,
}

/// Scores the answers against the template's weight table, classifies the
/// severity tier, and filters the rule set — the whole answer-side pass in
/// one call.
pub fn evaluate_survey(
    template: &SurveyTemplate,
    answers: &AnswerSheet,
    policy: &SeverityPolicy,
    lang: &str,
) -> SurveyOutcome {
    let scores = dimension_scores(&template.weights, answers);
    let total = total_score(&scores);
    let tier = policy.classify(total);
    let rules = evaluate_rules(&template.rules, answers, &scores, lang);

    SurveyOutcome {
        scores,
        total,
        tier,
        conclusions: rules.conclusions,
        recommendations: rules.recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::Answer;

    #[test]
    fn evaluate_survey_combines_scoring_and_rules() {
        let template: SurveyTemplate = serde_json::from_value(serde_json::json!({
            "meta": {"name": "t", "lang_default": "zh"},
            "Q": [{"key": "q1", "opts": [["a", "A"], ["b", "B"]]}],
            "WT": {"stress": {"q1": {"a": 6.0}}},
            "UI": {},
            "rules": {
                "conclusions": [
                    {"if": {"dim": {"stress": ">=5"}}, "text": {"zh": "压力偏高"}}
                ],
                "recommendations": []
            },
            "products": []
        }))
        .unwrap();

        let mut answers = AnswerSheet::new();
        answers.insert("q1".into(), Answer::new("a"));

        let outcome = evaluate_survey(&template, &answers, &SeverityPolicy::default(), "zh");
        assert_eq!(outcome.scores["stress"], 6.0);
        assert_eq!(outcome.total, 6.0);
        assert_eq!(outcome.tier, SeverityTier::Elevated);
        assert_eq!(outcome.conclusions, vec!["压力偏高"]);
        assert!(outcome.recommendations.is_empty());
    }
}
