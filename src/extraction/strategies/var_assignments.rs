//! Strategy 2: top-level `Q`/`WT`/`UI`/`rules`/`products` variable
//! assignments inside any script, recovered with the literal slicer and
//! the sandboxed evaluator.
//!
//! Each variable is sliced and evaluated independently: one malformed or
//! slow literal loses that variable only, never the whole attempt.

use scraper::Html;
use serde_json::Value;

use crate::domain::survey::{Product, RuleSet, SurveyTemplate, UiText, WeightTable};
use crate::extraction::dom::script_texts;
use crate::extraction::sandbox::{eval_literal, SandboxBudget};
use crate::extraction::slicer::find_var_literal;
use crate::extraction::strategy::ExtractionStrategy;

use super::{decode_or_default, decode_questions};

pub(crate) struct VarAssignments {
    pub budget: SandboxBudget,
}

impl VarAssignments {
    fn eval_var(&self, src: &str, name: &str) -> Option<Value> {
        let literal = find_var_literal(src, name)?;
        eval_literal(literal, name, self.budget)
    }
}

impl ExtractionStrategy for VarAssignments {
    fn name(&self) -> &'static str {
        "var-assignments"
    }

    fn try_extract(&self, doc: &Html) -> Option<SurveyTemplate> {
        for src in script_texts(doc) {
            if src.is_empty() {
                continue;
            }

            let q = match self.eval_var(&src, "Q") {
                Some(value) => value,
                None => continue,
            };
            let questions = match decode_questions(&q) {
                Some(questions) => questions,
                None => continue,
            };

            let weights = decode_or_default::<WeightTable>(self.eval_var(&src, "WT").as_ref());
            let ui = decode_or_default::<UiText>(self.eval_var(&src, "UI").as_ref());
            let rules = decode_or_default::<RuleSet>(self.eval_var(&src, "rules").as_ref());
            let products =
                decode_or_default::<Vec<Product>>(self.eval_var(&src, "products").as_ref());

            return Some(SurveyTemplate {
                meta: Default::default(),
                questions,
                weights,
                ui,
                rules,
                products,
            });
        }
        None
    }
}
