//! Strategy 1: the designated `script#TEMPLATE` element carrying strict
//! JSON with a `Q` array. Highest confidence, tried first.

use scraper::Html;
use serde_json::Value;

use crate::domain::survey::SurveyTemplate;
use crate::extraction::dom::TEMPLATE_SCRIPT_SEL;
use crate::extraction::strategy::ExtractionStrategy;

use super::decode_record;

pub(crate) struct EmbeddedJson;

impl ExtractionStrategy for EmbeddedJson {
    fn name(&self) -> &'static str {
        "embedded-json"
    }

    fn try_extract(&self, doc: &Html) -> Option<SurveyTemplate> {
        let node = doc.select(&TEMPLATE_SCRIPT_SEL).next()?;
        let text = node.text().collect::<String>();
        let value: Value = serde_json::from_str(&text).ok()?;
        decode_record(&value)
    }
}
