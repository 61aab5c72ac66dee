//! Strategy 6: question blocks marked up in the DOM itself — elements
//! matching `.question`/`[data-q]`/`[data-q-key]` with a title node and
//! list-item or `.option` children.
//!
//! A block that names a question (key or title) but yields no options is a
//! structural violation: the whole candidate is rejected so a partially
//! recognized page never produces a truncated template.

use scraper::{ElementRef, Html};

use crate::domain::survey::{LocalizedText, OptionPair, Question, QuestionType, SurveyTemplate};
use crate::extraction::dom::{element_text, BLOCK_ITEM_SEL, BLOCK_TITLE_SEL, QUESTION_BLOCK_SEL};
use crate::extraction::strategy::ExtractionStrategy;

pub(crate) struct DomBlocks;

fn block_key(block: ElementRef<'_>) -> String {
    let el = block.value();
    el.attr("data-key")
        .or_else(|| el.attr("data-q-key"))
        .or_else(|| el.attr("data-q"))
        .unwrap_or_default()
        .to_string()
}

fn block_options(block: ElementRef<'_>) -> Vec<OptionPair> {
    block
        .select(&BLOCK_ITEM_SEL)
        .enumerate()
        .filter_map(|(i, item)| {
            let value = item
                .value()
                .attr("data-value")
                .or_else(|| item.value().attr("value"))
                .map(str::to_string)
                .unwrap_or_else(|| (i + 1).to_string());
            let label = element_text(item);
            (!label.is_empty()).then(|| OptionPair::new(value, label))
        })
        .collect()
}

impl ExtractionStrategy for DomBlocks {
    fn name(&self) -> &'static str {
        "dom-blocks"
    }

    fn try_extract(&self, doc: &Html) -> Option<SurveyTemplate> {
        let mut questions = Vec::new();

        for block in doc.select(&QUESTION_BLOCK_SEL) {
            let key = block_key(block);
            let title = block
                .select(&BLOCK_TITLE_SEL)
                .next()
                .map(element_text)
                .unwrap_or_default();

            // Unnamed fragments that merely match the marker are ignored.
            if key.is_empty() && title.is_empty() {
                continue;
            }

            let opts = block_options(block);
            if opts.is_empty() {
                return None;
            }

            let key = if key.is_empty() {
                format!("q_{}", questions.len() + 1)
            } else {
                key
            };
            let display = if title.is_empty() { key.clone() } else { title };
            questions.push(Question::new(
                key,
                QuestionType::Single,
                LocalizedText::zh(display),
                opts,
            ));
        }

        (!questions.is_empty()).then(|| SurveyTemplate {
            questions,
            ..SurveyTemplate::default()
        })
    }
}
