//! Condition-tree evaluation over computed scores and recorded answers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::survey::{AnswerSheet, Condition, RuleSet};

// "operator number" comparison strings, e.g. ">=5", "== 2.5", "<-1".
static COMPARISON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([<>]=?|==)\s*(-?\d+(?:\.\d+)?)$").expect("static regex"));

/// Evaluates one condition node.
///
/// Shapes are checked in a fixed order; the first present shape decides.
/// A node with no recognized shape — and a `dim` clause whose comparison
/// string does not parse — evaluates to false rather than erroring, so
/// partially broken rule sets degrade instead of failing the export.
pub fn condition_matches(
    condition: &Condition,
    answers: &AnswerSheet,
    scores: &BTreeMap<String, f64>,
) -> bool {
    if let Some(all) = &condition.all {
        return all.iter().all(|c| condition_matches(c, answers, scores));
    }
    if let Some(any) = &condition.any {
        return any.iter().any(|c| condition_matches(c, answers, scores));
    }
    if let Some(not) = &condition.not {
        return !condition_matches(not, answers, scores);
    }
    if let Some(dim) = &condition.dim {
        return dim_clauses_match(dim, scores);
    }
    if let (Some(question_key), Some(expected)) = (&condition.q, &condition.v) {
        return match expected {
            Value::String(v) => answers
                .get(question_key)
                .map_or(false, |answer| answer.value == *v),
            _ => false,
        };
    }
    false
}

/// Every listed dimension must satisfy its comparison.
fn dim_clauses_match(clauses: &BTreeMap<String, Value>, scores: &BTreeMap<String, f64>) -> bool {
    for (dimension, raw) in clauses {
        let actual = scores.get(dimension).copied().unwrap_or(0.0);
        let spec = match raw {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let Some(caps) = COMPARISON_RE.captures(&spec) else {
            return false;
        };
        let operator = &caps[1];
        let Ok(threshold) = caps[2].parse::<f64>() else {
            return false;
        };
        let holds = match operator {
            ">=" => actual >= threshold,
            ">" => actual > threshold,
            "<=" => actual <= threshold,
            "<" => actual < threshold,
            "==" => actual == threshold,
            _ => false,
        };
        if !holds {
            return false;
        }
    }
    true
}

/// One matched recommendation, resolved to its catalog code and display
/// title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationPick {
    pub code: Option<String>,
    pub title: String,
}

/// Conclusions and recommendations whose conditions held, in declaration
/// order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleOutcome {
    pub conclusions: Vec<String>,
    pub recommendations: Vec<RecommendationPick>,
}

/// Filters the rule set against the given answers and scores.
pub fn evaluate_rules(
    rules: &RuleSet,
    answers: &AnswerSheet,
    scores: &BTreeMap<String, f64>,
    lang: &str,
) -> RuleOutcome {
    let mut outcome = RuleOutcome::default();

    for conclusion in &rules.conclusions {
        let matched = conclusion
            .condition
            .as_ref()
            .map_or(false, |c| condition_matches(c, answers, scores));
        if matched {
            outcome
                .conclusions
                .push(conclusion.text.resolve(lang).to_string());
        }
    }

    for recommendation in &rules.recommendations {
        let matched = recommendation
            .condition
            .as_ref()
            .map_or(false, |c| condition_matches(c, answers, scores));
        if matched {
            let product = recommendation.product.as_ref();
            outcome.recommendations.push(RecommendationPick {
                code: product.and_then(|p| p.code.clone()),
                title: product
                    .and_then(|p| p.title.as_ref())
                    .map(|t| t.resolve(lang).to_string())
                    .unwrap_or_default(),
            });
        }
    }

    outcome
}
