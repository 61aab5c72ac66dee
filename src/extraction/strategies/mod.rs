//! The seven encoding heuristics, in chain priority order.

mod dom_blocks;
mod embedded_json;
mod input_groups;
mod loose_json;
mod parallel_arrays;
mod question_defs;
mod var_assignments;

pub(crate) use dom_blocks::DomBlocks;
pub(crate) use embedded_json::EmbeddedJson;
pub(crate) use input_groups::InputGroups;
pub(crate) use loose_json::LooseJson;
pub(crate) use parallel_arrays::ParallelArrays;
pub(crate) use question_defs::QuestionDefs;
pub(crate) use var_assignments::VarAssignments;

use serde_json::Value;

use crate::domain::survey::{Product, Question, RuleSet, SurveyTemplate, UiText, WeightTable};

/// Decodes a `Q` value into a non-empty question list, or rejects it.
///
/// A non-array, an empty array, or entries that do not fit the canonical
/// question shape are all structural violations: the caller must treat its
/// candidate as no match.
pub(super) fn decode_questions(value: &Value) -> Option<Vec<Question>> {
    if !value.is_array() {
        return None;
    }
    let questions: Vec<Question> = serde_json::from_value(value.clone()).ok()?;
    if questions.is_empty() {
        return None;
    }
    Some(questions)
}

/// Decodes an ancillary value (`WT`/`UI`/`rules`/`products`), degrading to
/// the empty default when it is absent or of the wrong shape.
pub(super) fn decode_or_default<T: Default + serde::de::DeserializeOwned>(
    value: Option<&Value>,
) -> T {
    value
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default()
}

/// Decodes a whole `{Q, WT, UI, rules, products}` object. Only `Q` is
/// load-bearing; the rest fall back to empty containers.
pub(super) fn decode_record(value: &Value) -> Option<SurveyTemplate> {
    let questions = decode_questions(value.get("Q")?)?;
    Some(SurveyTemplate {
        meta: Default::default(),
        questions,
        weights: decode_or_default::<WeightTable>(value.get("WT")),
        ui: decode_or_default::<UiText>(value.get("UI")),
        rules: decode_or_default::<RuleSet>(value.get("rules")),
        products: decode_or_default::<Vec<Product>>(value.get("products")),
    })
}

/// Coerces a score value the way the originals are written: numbers pass
/// through, numeric strings parse, anything else contributes nothing.
pub(super) fn coerce_weight(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_questions_rejects_non_arrays_and_empties() {
        assert!(decode_questions(&json!(42)).is_none());
        assert!(decode_questions(&json!({"key": "q1"})).is_none());
        assert!(decode_questions(&json!([])).is_none());
    }

    #[test]
    fn decode_questions_rejects_scalar_entries() {
        assert!(decode_questions(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn decode_record_defaults_ancillary_fields() {
        let record = decode_record(&json!({
            "Q": [{"key": "q1", "opts": [["a", "A"]]}],
            "WT": "garbage",
        }))
        .unwrap();
        assert_eq!(record.questions.len(), 1);
        assert!(record.weights.is_empty());
        assert!(record.rules.is_empty());
    }

    #[test]
    fn coerce_weight_handles_loose_inputs() {
        assert_eq!(coerce_weight(&json!(2)), 2.0);
        assert_eq!(coerce_weight(&json!("1.5")), 1.5);
        assert_eq!(coerce_weight(&json!("abc")), 0.0);
        assert_eq!(coerce_weight(&json!(null)), 0.0);
    }
}
