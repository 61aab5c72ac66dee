//! HTML to canonical survey template extraction.
//!
//! The entry point parses the document once and walks an ordered chain of
//! strategies — from the designated strict-JSON block down to raw input
//! scanning — stopping at the first one that yields a non-empty question
//! set. Extraction is synchronous and stateless per invocation: concurrent
//! imports need no coordination, and nothing here is fatal. An input no
//! strategy recognizes produces an empty canonical record, not an error.

mod dom;
mod normalizer;
pub mod sandbox;
pub mod slicer;
mod strategies;
mod strategy;

pub use sandbox::SandboxBudget;

use scraper::Html;
use tracing::debug;

use crate::domain::survey::SurveyTemplate;

use strategies::{
    DomBlocks, EmbeddedJson, InputGroups, LooseJson, ParallelArrays, QuestionDefs, VarAssignments,
};
use strategy::ExtractionStrategy;

/// The extraction chain, configured once and reusable across documents.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(SandboxBudget::default())
    }
}

impl Extractor {
    /// Builds the chain in priority order with the given evaluation budget.
    pub fn new(budget: SandboxBudget) -> Self {
        Self {
            strategies: vec![
                Box::new(EmbeddedJson),
                Box::new(VarAssignments { budget }),
                Box::new(LooseJson),
                Box::new(QuestionDefs { budget }),
                Box::new(ParallelArrays { budget }),
                Box::new(DomBlocks),
                Box::new(InputGroups),
            ],
        }
    }

    /// Extracts the canonical `{meta, Q, WT, UI, rules, products}` record
    /// from raw HTML text.
    ///
    /// Document-derived metadata (cleaned `<title>`, root `lang`) always
    /// overwrites whatever the matching strategy produced, and empty
    /// question keys are synthesized as `q_<n>`.
    pub fn extract(&self, html: &str) -> SurveyTemplate {
        let doc = Html::parse_document(html);
        let meta = normalizer::document_meta(&doc);

        let mut record = SurveyTemplate::default();
        for strategy in &self.strategies {
            match strategy.try_extract(&doc) {
                Some(candidate) if !candidate.questions.is_empty() => {
                    debug!(
                        strategy = strategy.name(),
                        questions = candidate.questions.len(),
                        "extraction strategy matched"
                    );
                    record = candidate;
                    break;
                }
                _ => {
                    debug!(strategy = strategy.name(), "extraction strategy passed");
                }
            }
        }

        normalizer::apply_document_meta(&mut record, meta);
        normalizer::synthesize_keys(&mut record.questions);
        record
    }
}

/// Extracts with the default evaluation budget. See [`Extractor::extract`].
pub fn extract(html: &str) -> SurveyTemplate {
    Extractor::default().extract(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_input_yields_an_empty_record() {
        let record = extract("<html><head><title>空白页</title></head><body><p>文字</p></body></html>");
        assert!(record.questions.is_empty());
        assert!(record.weights.is_empty());
        assert_eq!(record.meta.name, "空白页");
        assert_eq!(record.meta.lang_default, "zh");
    }

    #[test]
    fn higher_priority_strategy_wins() {
        // Both the TEMPLATE block and a Q variable are present; the strict
        // JSON block is tried first.
        let html = r#"<html><body>
            <script id="TEMPLATE">{"Q":[{"key":"from_json","opts":[["a","A"]]}]}</script>
            <script>var Q = [{key: 'from_var', opts: [['b', 'B']]}];</script>
        </body></html>"#;
        let record = extract(html);
        assert_eq!(record.questions[0].key, "from_json");
    }

    #[test]
    fn malformed_script_falls_through_to_dom_scanning() {
        let html = r#"<html lang="zh-CN"><head><title>评估</title></head><body>
            <script>var Q = [1, 2,</script>
            <div class="question" data-key="k1">
                <h3>标题</h3>
                <ul><li data-value="a">选项一</li></ul>
            </div>
        </body></html>"#;
        let record = extract(html);
        assert_eq!(record.questions.len(), 1);
        assert_eq!(record.questions[0].key, "k1");
    }

    #[test]
    fn document_meta_overwrites_strategy_meta() {
        let html = r#"<html lang="en-GB"><head><title>Vendor · Stress Check</title></head><body>
            <script id="TEMPLATE">{"Q":[{"key":"q1","opts":[["a","A"]]}],"meta":{"name":"ignored"}}</script>
        </body></html>"#;
        let record = extract(html);
        assert_eq!(record.meta.name, "Stress Check");
        assert_eq!(record.meta.lang_default, "en");
    }

    #[test]
    fn keys_are_synthesized_after_any_strategy() {
        let html = r#"<script id="TEMPLATE">{"Q":[
            {"title":{"zh":"无键一"},"opts":[["a","A"]]},
            {"key":"named","opts":[["b","B"]]}
        ]}</script>"#;
        let record = extract(html);
        assert_eq!(record.questions[0].key, "q_1");
        assert_eq!(record.questions[1].key, "named");
    }
}
