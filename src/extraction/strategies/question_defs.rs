//! Strategy 4: a compact `QUESTIONS` literal of per-question objects whose
//! options carry per-dimension scores. Options are flattened into the
//! canonical pair list and every score is expanded into the three-level
//! weight table.

use scraper::Html;
use serde_json::Value;

use crate::domain::survey::{
    scalar_to_string, LocalizedText, OptionPair, Question, QuestionType, SurveyTemplate,
    WeightTable,
};
use crate::extraction::dom::script_texts;
use crate::extraction::sandbox::{eval_literal, SandboxBudget};
use crate::extraction::slicer::find_var_literal;
use crate::extraction::strategy::ExtractionStrategy;

use super::coerce_weight;

pub(crate) struct QuestionDefs {
    pub budget: SandboxBudget,
}

impl ExtractionStrategy for QuestionDefs {
    fn name(&self) -> &'static str {
        "question-defs"
    }

    fn try_extract(&self, doc: &Html) -> Option<SurveyTemplate> {
        for src in script_texts(doc) {
            let literal = match find_var_literal(&src, "QUESTIONS") {
                Some(literal) => literal,
                None => continue,
            };
            let data = match eval_literal(literal, "QUESTIONS", self.budget) {
                Some(Value::Array(entries)) if !entries.is_empty() => entries,
                _ => continue,
            };

            let mut questions = Vec::with_capacity(data.len());
            let mut weights = WeightTable::default();

            for (i, entry) in data.iter().enumerate() {
                let key = entry
                    .get("key")
                    .and_then(scalar_to_string)
                    .filter(|k| !k.is_empty())
                    .unwrap_or_else(|| format!("q_{}", i + 1));

                let title = match entry.get("title") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Object(map)) => map
                        .get("zh")
                        .or_else(|| map.get("en"))
                        .and_then(scalar_to_string)
                        .unwrap_or_else(|| key.clone()),
                    _ => key.clone(),
                };

                let kind = entry
                    .get("type")
                    .and_then(Value::as_str)
                    .map(QuestionType::classify)
                    .unwrap_or_default();

                let raw_opts = entry
                    .get("options")
                    .or_else(|| entry.get("opts"))
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();

                let mut opts = Vec::with_capacity(raw_opts.len());
                for op in &raw_opts {
                    let label = op
                        .get("label")
                        .and_then(scalar_to_string)
                        .or_else(|| op.get("text").and_then(scalar_to_string))
                        .or_else(|| op.get("value").and_then(scalar_to_string));
                    let label = match label {
                        Some(label) => label,
                        None => continue,
                    };
                    let value = op
                        .get("value")
                        .and_then(scalar_to_string)
                        .unwrap_or_else(|| label.clone());

                    if let Some(Value::Object(scores)) = op.get("scores") {
                        for (dim, score) in scores {
                            weights.set(dim.clone(), key.clone(), value.clone(), coerce_weight(score));
                        }
                    }
                    opts.push(OptionPair::new(value, label));
                }

                questions.push(Question::new(key, kind, LocalizedText::zh(title), opts));
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

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Option<SurveyTemplate> {
        QuestionDefs {
            budget: SandboxBudget::default(),
        }
        .try_extract(&Html::parse_document(html))
    }

    #[test]
    fn expands_per_option_scores_into_weight_table() {
        let html = r#"<script>
            const QUESTIONS = [
                {
                    key: 'sleep_q',
                    title: '睡眠如何',
                    type: 'single',
                    options: [
                        {value: 'bad', label: '很差', scores: {sleep: 3, stress: 1}},
                        {value: 'ok', label: '一般', scores: {sleep: 1}},
                    ],
                },
                {title: {zh: '第二题'}, type: 'checkbox', options: [{value: 1, text: '选我'}]},
            ];
        </script>"#;

        let template = extract(html).unwrap();
        assert_eq!(template.questions.len(), 2);

        let first = &template.questions[0];
        assert_eq!(first.key, "sleep_q");
        assert_eq!(first.title.resolve("zh"), "睡眠如何");
        assert_eq!(first.opts.len(), 2);
        assert_eq!(template.weights.weight("sleep", "sleep_q", "bad"), Some(3.0));
        assert_eq!(template.weights.weight("stress", "sleep_q", "bad"), Some(1.0));
        assert_eq!(template.weights.weight("sleep", "sleep_q", "ok"), Some(1.0));

        let second = &template.questions[1];
        assert_eq!(second.key, "q_2");
        assert_eq!(second.kind, QuestionType::Multi);
        assert_eq!(second.opts[0].value, "1");
        assert_eq!(second.opts[0].label, "选我");
    }

    #[test]
    fn empty_or_scalar_questions_literal_is_no_match() {
        assert!(extract("<script>var QUESTIONS = [];</script>").is_none());
        assert!(extract("<script>var QUESTIONS = {a: 1};</script>").is_none());
    }
}
