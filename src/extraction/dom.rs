//! Shared DOM helpers: precompiled selectors and text normalization.
//!
//! `Selector::parse` is moderately expensive, so the fixed selectors used
//! by the strategies are compiled once and shared.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

pub(crate) static SCRIPT_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("static selector"));

pub(crate) static TEMPLATE_SCRIPT_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script#TEMPLATE").expect("static selector"));

pub(crate) static TITLE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("static selector"));

pub(crate) static QUESTION_BLOCK_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".question, [data-q], [data-q-key]").expect("static selector"));

pub(crate) static BLOCK_TITLE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".title, .q, .question-title, h3, h4").expect("static selector"));

pub(crate) static BLOCK_ITEM_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li, [data-value], .option").expect("static selector"));

pub(crate) static GROUP_TITLE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".q, .question-title, h3, h4").expect("static selector"));

pub(crate) static CHOICE_INPUT_SEL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("input[type=\"radio\"], input[type=\"checkbox\"]").expect("static selector")
});

/// Collapses all whitespace runs to single spaces and trims the ends.
pub(crate) fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenated text content of an element, whitespace-normalized.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    normalize_ws(&element.text().collect::<String>())
}

/// The text content of every `<script>` element, in document order.
pub(crate) fn script_texts(doc: &Html) -> Vec<String> {
    doc.select(&SCRIPT_SEL)
        .map(|s| s.text().collect::<String>())
        .collect()
}
