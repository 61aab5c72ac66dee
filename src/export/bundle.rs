//! Assembly of the self-contained survey bundle handed to the renderer.

use serde::Serialize;

use crate::domain::survey::{
    Product, Question, RuleSet, SurveyTemplate, TemplateMeta, UiText, WeightTable,
};

use super::selector::{select_questions, strip_ordinal_prefix, QuestionSelection};

/// Everything a rendered survey needs, in the canonical shape. The
/// rendering itself (markup, styling) is an external concern; this bundle
/// is only required to serialize directly into it.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyBundle {
    pub meta: TemplateMeta,

    #[serde(rename = "Q")]
    pub questions: Vec<Question>,

    #[serde(rename = "WT")]
    pub weights: WeightTable,

    #[serde(rename = "UI")]
    pub ui: UiText,

    pub rules: RuleSet,

    pub products: Vec<Product>,
}

/// Restricts a catalog to active products actually referenced by the rule
/// set's recommendations.
pub fn referenced_products(rules: &RuleSet, catalog: &[Product]) -> Vec<Product> {
    let codes: Vec<&str> = rules
        .recommendations
        .iter()
        .filter_map(|r| r.product.as_ref()?.code.as_deref())
        .collect();

    catalog
        .iter()
        .filter(|p| !p.id.is_empty() && codes.contains(&p.id.as_str()) && p.is_active())
        .cloned()
        .collect()
}

/// Selects questions, cleans their titles of stale ordinals, and packs the
/// bundle with the products its rules can recommend.
pub fn assemble(
    template: &SurveyTemplate,
    selection: &QuestionSelection,
    catalog: &[Product],
) -> SurveyBundle {
    let mut questions = select_questions(&template.questions, selection);
    for question in &mut questions {
        strip_ordinal_prefix(&mut question.title);
    }

    SurveyBundle {
        meta: template.meta.clone(),
        questions,
        weights: template.weights.clone(),
        ui: template.ui.clone(),
        rules: template.rules.clone(),
        products: referenced_products(&template.rules, catalog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::{LocalizedText, OptionPair, QuestionType};

    fn product(id: &str, active: Option<bool>) -> Product {
        Product {
            id: id.to_string(),
            active,
            ..Product::default()
        }
    }

    fn rules_referencing(codes: &[&str]) -> RuleSet {
        serde_json::from_value(serde_json::json!({
            "recommendations": codes
                .iter()
                .map(|c| serde_json::json!({"if": {"dim": {"x": ">=0"}}, "product": {"code": c}}))
                .collect::<Vec<_>>()
        }))
        .unwrap()
    }

    #[test]
    fn keeps_only_referenced_active_products() {
        let catalog = vec![
            product("p1", None),
            product("p2", Some(false)),
            product("p3", Some(true)),
            product("unreferenced", None),
        ];
        let picked = referenced_products(&rules_referencing(&["p1", "p2", "p3"]), &catalog);
        let ids: Vec<_> = picked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn assemble_cleans_selected_titles() {
        let template = SurveyTemplate {
            questions: vec![Question::new(
                "q1",
                QuestionType::Single,
                LocalizedText::zh("3. 是否头痛"),
                vec![OptionPair::new("a", "A")],
            )],
            ..SurveyTemplate::default()
        };
        let bundle = assemble(&template, &QuestionSelection::All, &[]);
        assert_eq!(bundle.questions[0].title.resolve("zh"), "是否头痛");
        // The source template is untouched.
        assert_eq!(template.questions[0].title.resolve("zh"), "3. 是否头痛");
    }

    #[test]
    fn bundle_serializes_canonical_field_names() {
        let bundle = assemble(&SurveyTemplate::default(), &QuestionSelection::All, &[]);
        let value = serde_json::to_value(&bundle).unwrap();
        for field in ["meta", "Q", "WT", "UI", "rules", "products"] {
            assert!(value.get(field).is_some(), "missing field {field}");
        }
    }
}
