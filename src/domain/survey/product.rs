//! Product catalog entries referenced by rule recommendations.

use serde::{Deserialize, Serialize};

/// One purchasable product or service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Short description shown alongside the recommendation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Suggested course length (free text, e.g. "8-12 周").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Products are active unless explicitly disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }
}
