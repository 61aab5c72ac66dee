//! The canonical template record and its catalog metadata.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, TemplateId, Timestamp};

use super::{Product, Question, RuleSet, UiText, WeightTable};

fn default_lang() -> String {
    "zh".to_string()
}

/// Derived template identity: display name and default language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMeta {
    #[serde(default)]
    pub name: String,

    #[serde(default = "default_lang")]
    pub lang_default: String,
}

impl Default for TemplateMeta {
    fn default() -> Self {
        Self {
            name: String::new(),
            lang_default: default_lang(),
        }
    }
}

/// The canonical survey shape produced by extraction:
/// `{ meta, Q, WT, UI, rules, products }`.
///
/// Every field is always present, defaulting to an empty container, so a
/// zero-question extraction still serializes into the persisted layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyTemplate {
    #[serde(default)]
    pub meta: TemplateMeta,

    #[serde(rename = "Q", default)]
    pub questions: Vec<Question>,

    #[serde(rename = "WT", default)]
    pub weights: WeightTable,

    #[serde(rename = "UI", default)]
    pub ui: UiText,

    #[serde(default)]
    pub rules: RuleSet,

    #[serde(default)]
    pub products: Vec<Product>,
}

/// A persisted template: identifier plus canonical survey data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: TemplateId,

    #[serde(flatten)]
    pub template: SurveyTemplate,
}

/// One catalog index entry, kept small enough to list without loading
/// template files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: TemplateId,
    pub name: String,

    #[serde(default = "default_lang")]
    pub lang_default: String,

    #[serde(default)]
    pub count_q: usize,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_template_serializes_all_fields() {
        let template = SurveyTemplate::default();
        let value = serde_json::to_value(&template).unwrap();
        for field in ["meta", "Q", "WT", "UI", "rules", "products"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(value["meta"]["lang_default"], "zh");
    }

    #[test]
    fn record_flattens_template_fields() {
        let record = TemplateRecord {
            id: TemplateId::new("tpl_x").unwrap(),
            template: SurveyTemplate::default(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "tpl_x");
        assert!(value.get("Q").is_some());
    }
}
