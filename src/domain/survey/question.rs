//! Question value objects - localized titles and ordered option pairs.
//!
//! Source documents encode questions loosely (bare-string titles, numeric
//! option values, unknown type strings), so deserialization here is
//! deliberately tolerant: everything folds into the canonical shape rather
//! than failing the surrounding strategy.

use serde::de::{Deserializer, Error as DeError};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Coerces a scalar JSON value into its display string.
///
/// Containers and null yield `None`; the caller decides the fallback.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Localized display text keyed by language code (`zh` at minimum).
///
/// A bare string in source data is folded into a `zh` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocalizedText(pub BTreeMap<String, String>);

impl LocalizedText {
    /// Creates a text with a single `zh` entry.
    pub fn zh(text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert("zh".to_string(), text.into());
        Self(map)
    }

    /// Returns the entry for a language code, if present.
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// Resolves display text: requested language, then `zh`, then empty.
    pub fn resolve(&self, lang: &str) -> &str {
        self.get(lang).or_else(|| self.get("zh")).unwrap_or("")
    }

    /// True when no language carries any text.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|t| t.is_empty())
    }

    /// Mutable access to every language's text, for cleanup passes.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.0.values_mut()
    }
}

impl<'de> Deserialize<'de> for LocalizedText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => LocalizedText::zh(s),
            Value::Object(map) => LocalizedText(
                map.into_iter()
                    .filter_map(|(lang, text)| scalar_to_string(&text).map(|t| (lang, t)))
                    .collect(),
            ),
            _ => LocalizedText::default(),
        })
    }
}

/// Whether a question accepts one answer or several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Single,
    Multi,
}

impl QuestionType {
    /// Classifies a source type string: `multi`/`checkbox` select many,
    /// anything else (including unknown strings) is single-choice.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "multi" | "checkbox" => QuestionType::Multi,
            _ => QuestionType::Single,
        }
    }
}

impl<'de> Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => QuestionType::classify(&s),
            _ => QuestionType::Single,
        })
    }
}

/// One answer option: a stored value and its display label.
///
/// Serialized as a two-element array `[value, label]`, matching the
/// persisted `Q.json` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionPair {
    pub value: String,
    pub label: String,
}

impl OptionPair {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl Serialize for OptionPair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.value)?;
        seq.serialize_element(&self.label)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for OptionPair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let items = value
            .as_array()
            .ok_or_else(|| D::Error::custom("option must be a [value, label] pair"))?;
        let first = items
            .first()
            .and_then(scalar_to_string)
            .ok_or_else(|| D::Error::custom("option value must be a scalar"))?;
        let label = items
            .get(1)
            .and_then(scalar_to_string)
            .unwrap_or_else(|| first.clone());
        Ok(OptionPair::new(first, label))
    }
}

/// A survey question in canonical form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub key: String,

    #[serde(rename = "type", default)]
    pub kind: QuestionType,

    #[serde(default)]
    pub title: LocalizedText,

    #[serde(default)]
    pub opts: Vec<OptionPair>,
}

impl Question {
    pub fn new(
        key: impl Into<String>,
        kind: QuestionType,
        title: LocalizedText,
        opts: Vec<OptionPair>,
    ) -> Self {
        Self {
            key: key.into(),
            kind,
            title,
            opts,
        }
    }
}
