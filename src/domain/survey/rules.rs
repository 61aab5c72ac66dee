//! Conditional rule trees for conclusions and product recommendations.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::LocalizedText;

/// Optional rule definitions attached to a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub conclusions: Vec<Conclusion>,

    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.conclusions.is_empty() && self.recommendations.is_empty()
    }
}

/// A conclusion shown when its condition holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conclusion {
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    #[serde(default)]
    pub text: LocalizedText,
}

/// A product recommendation emitted when its condition holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRef>,
}

/// Reference from a recommendation into the product catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<LocalizedText>,
}

/// One node of a boolean condition tree.
///
/// Shapes are checked in a fixed order (`all`, `any`, `not`, `dim`,
/// `q`+`v`); a node carrying none of them evaluates to false. Dimension
/// comparisons are strings like `">=5"`; an unparseable operator makes the
/// node false rather than erroring, so rule authors can degrade gracefully.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Vec<Condition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Vec<Condition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Condition>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dim: Option<BTreeMap<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_nested_condition_trees() {
        let rules: RuleSet = serde_json::from_str(
            r#"{
                "conclusions": [
                    {"if": {"all": [{"dim": {"stress": ">=5"}}]}, "text": {"zh": "压力偏高"}}
                ],
                "recommendations": [
                    {"if": {"q": "q1", "v": "a"}, "product": {"code": "p1"}}
                ]
            }"#,
        )
        .unwrap();

        let cond = rules.conclusions[0].condition.as_ref().unwrap();
        let all = cond.all.as_ref().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].dim.is_some());

        let reco = &rules.recommendations[0];
        assert_eq!(reco.product.as_ref().unwrap().code.as_deref(), Some("p1"));
    }

    #[test]
    fn empty_object_is_empty_rule_set() {
        let rules: RuleSet = serde_json::from_str("{}").unwrap();
        assert!(rules.is_empty());
    }
}
