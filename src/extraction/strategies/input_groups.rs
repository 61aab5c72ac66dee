//! Strategy 7: the last resort — raw radio/checkbox inputs grouped by
//! their `name` attribute. Titles come from a nearby heading-like node
//! (walking up to four ancestor levels), labels from an enclosing
//! `<label>`, a `label[for]` reference, or the input's trailing text node.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::domain::survey::{LocalizedText, OptionPair, Question, QuestionType, SurveyTemplate};
use crate::extraction::dom::{element_text, normalize_ws, CHOICE_INPUT_SEL, GROUP_TITLE_SEL};
use crate::extraction::strategy::ExtractionStrategy;

// Leading enumeration markers like "A、", "b.", "C．".
static ENUM_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Da-d]\s*[、.．]\s*").expect("static regex"));

pub(crate) struct InputGroups;

/// Walks up at most four ancestor levels looking for a heading-like node.
fn group_title(input: ElementRef<'_>) -> Option<String> {
    let mut cursor = input.parent();
    for _ in 0..4 {
        let node = cursor?;
        if let Some(element) = ElementRef::wrap(node) {
            if let Some(heading) = element.select(&GROUP_TITLE_SEL).next() {
                return Some(element_text(heading));
            }
        }
        cursor = node.parent();
    }
    None
}

/// Label text for one input, before prefix stripping.
fn option_label(doc: &Html, input: ElementRef<'_>) -> String {
    // Enclosing <label> wins.
    if let Some(parent) = input.parent().and_then(ElementRef::wrap) {
        if parent.value().name() == "label" {
            return element_text(parent);
        }
    }

    // Then a label[for] reference to the input's id.
    if let Some(id) = input.value().attr("id") {
        if !id.contains('"') {
            if let Ok(selector) = Selector::parse(&format!("label[for=\"{id}\"]")) {
                if let Some(label) = doc.select(&selector).next() {
                    return element_text(label);
                }
            }
        }
    }

    // Finally the text node right after the input.
    if let Some(sibling) = input.next_sibling() {
        if let scraper::Node::Text(text) = sibling.value() {
            return normalize_ws(&text.text);
        }
    }

    String::new()
}

impl ExtractionStrategy for InputGroups {
    fn name(&self) -> &'static str {
        "input-groups"
    }

    fn try_extract(&self, doc: &Html) -> Option<SurveyTemplate> {
        // Group inputs by name, preserving first-seen document order.
        let mut order: Vec<String> = Vec::new();
        let mut groups: Vec<Vec<ElementRef<'_>>> = Vec::new();
        for input in doc.select(&CHOICE_INPUT_SEL) {
            let el = input.value();
            let name = el
                .attr("name")
                .or_else(|| el.attr("data-name"))
                .unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            match order.iter().position(|n| n.as_str() == name) {
                Some(i) => groups[i].push(input),
                None => {
                    order.push(name.to_string());
                    groups.push(vec![input]);
                }
            }
        }
        if order.is_empty() {
            return None;
        }

        let mut questions = Vec::with_capacity(order.len());
        for (name, inputs) in order.into_iter().zip(groups) {
            let first = inputs[0];
            let title = group_title(first)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| name.clone());

            let kind = if first.value().attr("type") == Some("checkbox") {
                QuestionType::Multi
            } else {
                QuestionType::Single
            };

            let mut opts = Vec::with_capacity(inputs.len());
            for input in &inputs {
                let value = input
                    .value()
                    .attr("value")
                    .map(str::to_string)
                    .unwrap_or_else(|| (opts.len() + 1).to_string());
                let raw = option_label(doc, *input);
                let stripped = ENUM_PREFIX_RE.replace(&raw, "");
                let label = stripped.trim();
                let label = if label.is_empty() {
                    value.clone()
                } else {
                    label.to_string()
                };
                opts.push(OptionPair::new(value, label));
            }

            questions.push(Question::new(
                name,
                kind,
                LocalizedText::zh(title),
                opts,
            ));
        }

        (!questions.is_empty()).then(|| SurveyTemplate {
            questions,
            ..SurveyTemplate::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Option<SurveyTemplate> {
        InputGroups.try_extract(&Html::parse_document(html))
    }

    #[test]
    fn groups_inputs_by_name_with_heading_title() {
        let html = r#"
            <div>
                <h3>第1题：症状</h3>
                <input type="radio" name="q1" id="q1a" value="a">
                <label for="q1a">A、很严重</label>
                <input type="radio" name="q1" id="q1b" value="b">
                <label for="q1b">B、一般</label>
            </div>
        "#;

        let template = extract(html).unwrap();
        let q = &template.questions[0];
        assert_eq!(q.key, "q1");
        assert_eq!(q.kind, QuestionType::Single);
        assert_eq!(q.title.resolve("zh"), "第1题：症状");
        assert_eq!(q.opts[0], OptionPair::new("a", "很严重"));
        assert_eq!(q.opts[1], OptionPair::new("b", "一般"));
    }

    #[test]
    fn enclosing_label_supplies_text() {
        let html = r#"
            <form>
                <p class="q">有哪些习惯？</p>
                <label><input type="checkbox" name="habits" value="tea"> a. 喝茶</label>
                <label><input type="checkbox" name="habits" value="coffee"> b. 喝咖啡</label>
            </form>
        "#;

        let template = extract(html).unwrap();
        let q = &template.questions[0];
        assert_eq!(q.kind, QuestionType::Multi);
        assert_eq!(q.opts[0], OptionPair::new("tea", "喝茶"));
        assert_eq!(q.opts[1], OptionPair::new("coffee", "喝咖啡"));
    }

    #[test]
    fn trailing_text_node_is_the_last_resort_label() {
        let html = r#"
            <div><h4>选择</h4>
                <input type="radio" name="pick" value="x"> C、第三个
            </div>
        "#;
        let template = extract(html).unwrap();
        assert_eq!(template.questions[0].opts[0], OptionPair::new("x", "第三个"));
    }

    #[test]
    fn missing_labels_fall_back_to_value_and_name() {
        let html = r#"<input type="radio" name="alone" value="only">"#;
        let template = extract(html).unwrap();
        let q = &template.questions[0];
        assert_eq!(q.title.resolve("zh"), "alone");
        assert_eq!(q.opts[0], OptionPair::new("only", "only"));
    }

    #[test]
    fn unnamed_inputs_are_ignored() {
        assert!(extract(r#"<input type="radio" value="a">"#).is_none());
    }

    #[test]
    fn groups_preserve_document_order() {
        let html = r#"
            <div><h3>甲</h3><input type="radio" name="b_second" value="1"> one</div>
            <div><h3>乙</h3><input type="radio" name="a_first" value="1"> one</div>
        "#;
        let template = extract(html).unwrap();
        assert_eq!(template.questions[0].key, "b_second");
        assert_eq!(template.questions[1].key, "a_first");
    }
}
