//! Strategy 5: the parallel-array encoding — a `QT` table of
//! `[key, values, kind]` rows, an optional nested `SC` score map, and
//! optional per-language label dictionaries `I18NQ`/`I18NO`.

use scraper::Html;
use serde_json::{Map, Value};

use crate::domain::survey::{
    scalar_to_string, LocalizedText, OptionPair, Question, QuestionType, SurveyTemplate,
    WeightTable,
};
use crate::extraction::dom::script_texts;
use crate::extraction::sandbox::{eval_literal, SandboxBudget};
use crate::extraction::slicer::find_var_literal;
use crate::extraction::strategy::ExtractionStrategy;

use super::coerce_weight;

pub(crate) struct ParallelArrays {
    pub budget: SandboxBudget,
}

impl ParallelArrays {
    fn eval_var(&self, src: &str, name: &str) -> Option<Value> {
        let literal = find_var_literal(src, name)?;
        eval_literal(literal, name, self.budget)
    }
}

/// Picks the `zh` (or `zh-CN`) sub-dictionary out of an i18n map.
fn zh_labels(value: Option<Value>) -> Map<String, Value> {
    let Some(Value::Object(map)) = value else {
        return Map::new();
    };
    match map.get("zh").or_else(|| map.get("zh-CN")) {
        Some(Value::Object(labels)) => labels.clone(),
        _ => Map::new(),
    }
}

impl ExtractionStrategy for ParallelArrays {
    fn name(&self) -> &'static str {
        "parallel-arrays"
    }

    fn try_extract(&self, doc: &Html) -> Option<SurveyTemplate> {
        for src in script_texts(doc) {
            let qt = match self.eval_var(&src, "QT") {
                Some(Value::Array(rows)) if !rows.is_empty() => rows,
                _ => continue,
            };

            let sc = self.eval_var(&src, "SC");
            let zh_q = zh_labels(self.eval_var(&src, "I18NQ"));
            let zh_o = zh_labels(self.eval_var(&src, "I18NO"));

            let questions: Vec<Question> = qt
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let key = row
                        .get(0)
                        .and_then(scalar_to_string)
                        .filter(|k| !k.is_empty())
                        .unwrap_or_else(|| format!("q_{}", i + 1));
                    let values = row
                        .get(1)
                        .and_then(Value::as_array)
                        .cloned()
                        .unwrap_or_default();
                    let kind = if row.get(2).and_then(Value::as_str) == Some("multi") {
                        QuestionType::Multi
                    } else {
                        QuestionType::Single
                    };
                    let title = zh_q
                        .get(&key)
                        .and_then(scalar_to_string)
                        .unwrap_or_else(|| key.clone());
                    let opts = values
                        .iter()
                        .filter_map(scalar_to_string)
                        .map(|v| {
                            let label = zh_o
                                .get(&v)
                                .and_then(scalar_to_string)
                                .unwrap_or_else(|| v.clone());
                            OptionPair::new(v, label)
                        })
                        .collect();
                    Question::new(key, kind, LocalizedText::zh(title), opts)
                })
                .collect();

            // SC is question key -> option value -> dimension -> score;
            // the weight table inverts that to dimension-first.
            let mut weights = WeightTable::default();
            if let Some(Value::Object(per_question)) = sc {
                for (question_key, option_map) in &per_question {
                    let Some(option_map) = option_map.as_object() else {
                        continue;
                    };
                    for (option_value, dims) in option_map {
                        let Some(dims) = dims.as_object() else {
                            continue;
                        };
                        for (dim, score) in dims {
                            weights.set(
                                dim.clone(),
                                question_key.clone(),
                                option_value.clone(),
                                coerce_weight(score),
                            );
                        }
                    }
                }
            }

            if !questions.is_empty() {
                return Some(SurveyTemplate {
                    questions,
                    weights,
                    ..SurveyTemplate::default()
                });
            }
        }
        None
    }
}
