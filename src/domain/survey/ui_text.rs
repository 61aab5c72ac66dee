//! Per-language UI label text carried through from the source document.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Labels for one language. Values stay as raw JSON because sources nest
/// structures here (dimension display names, severity captions).
pub type UiStrings = BTreeMap<String, Value>;

/// UI text keyed by language code. May be empty; consumers supply defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiText(pub BTreeMap<String, UiStrings>);

impl UiText {
    /// Returns a plain-string label for a language, if present.
    pub fn label(&self, lang: &str, key: &str) -> Option<&str> {
        self.0.get(lang)?.get(key)?.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_lookup_skips_non_string_values() {
        let ui: UiText = serde_json::from_str(
            r#"{"zh":{"next":"下一步","dim":{"stress":"压力"}}}"#,
        )
        .unwrap();
        assert_eq!(ui.label("zh", "next"), Some("下一步"));
        assert_eq!(ui.label("zh", "dim"), None);
        assert_eq!(ui.label("en", "next"), None);
    }
}
