//! Canonical cleanup: document-derived metadata and key synthesis.
//!
//! Whatever a strategy produced, the document itself is authoritative for
//! display metadata: `<title>` (with vendor segments stripped) and the root
//! `lang` attribute always overwrite strategy-supplied `meta` fields.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::domain::survey::{Question, SurveyTemplate, TemplateMeta};

use super::dom::{element_text, TITLE_SEL};

pub(crate) const UNTITLED_NAME: &str = "未命名模板";

// Leading "vendor ·" segment, up to and including the first interpunct.
static LEADING_SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.*?·\s*").expect("static regex"));

// Trailing "- suffix" / "| suffix" / "｜ suffix" part.
static TRAILING_SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[-|｜].*$").expect("static regex"));

/// Derives `{name, lang_default}` from the parsed document.
pub(crate) fn document_meta(doc: &Html) -> TemplateMeta {
    let raw_title = doc
        .select(&TITLE_SEL)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let stripped = LEADING_SEGMENT_RE.replace(&raw_title, "");
    let stripped = TRAILING_SEGMENT_RE.replace(&stripped, "");
    let cleaned = stripped.trim();

    let name = if !cleaned.is_empty() {
        cleaned.to_string()
    } else if !raw_title.is_empty() {
        raw_title
    } else {
        UNTITLED_NAME.to_string()
    };

    let lang_attr = doc
        .root_element()
        .value()
        .attr("lang")
        .unwrap_or_default();

    let lang_default = if lang_attr.is_empty() {
        "zh".to_string()
    } else if lang_attr.to_ascii_lowercase().starts_with("zh") {
        "zh".to_string()
    } else {
        let primary = lang_attr.split('-').next().unwrap_or_default();
        if primary.is_empty() {
            "zh".to_string()
        } else {
            primary.to_string()
        }
    };

    TemplateMeta { name, lang_default }
}

/// Overwrites the template's display metadata with the document-derived
/// values. Strategy output stays authoritative for question/weight data.
pub(crate) fn apply_document_meta(template: &mut SurveyTemplate, meta: TemplateMeta) {
    template.meta = meta;
}

/// Fills empty question keys with positional `q_<n>` keys.
pub(crate) fn synthesize_keys(questions: &mut [Question]) {
    for (i, question) in questions.iter_mut().enumerate() {
        if question.key.is_empty() {
            question.key = format!("q_{}", i + 1);
        }
    }
}
