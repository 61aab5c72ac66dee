//! Strategy 3: any script whose text looks like it carries a JSON object
//! with a `"Q":[` member. The first balanced `{...}` block is sliced out
//! and strict-JSON-parsed.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use serde_json::Value;

use crate::domain::survey::SurveyTemplate;
use crate::extraction::dom::script_texts;
use crate::extraction::slicer::slice_literal;
use crate::extraction::strategy::ExtractionStrategy;

use super::decode_record;

static Q_MEMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""Q"\s*:\s*\["#).expect("static regex"));

pub(crate) struct LooseJson;

impl ExtractionStrategy for LooseJson {
    fn name(&self) -> &'static str {
        "loose-json"
    }

    fn try_extract(&self, doc: &Html) -> Option<SurveyTemplate> {
        for src in script_texts(doc) {
            if !Q_MEMBER_RE.is_match(&src) {
                continue;
            }
            let start = match src.find('{') {
                Some(start) => start,
                None => continue,
            };
            let block = match slice_literal(&src, start) {
                Some(block) => block,
                None => continue,
            };
            let value: Value = match serde_json::from_str(block) {
                Ok(value) => value,
                Err(_) => continue,
            };
            if let Some(record) = decode_record(&value) {
                return Some(record);
            }
        }
        None
    }
}
