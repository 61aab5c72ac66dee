//! The three-level weight mapping: dimension -> question key -> option value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scoring weights accumulated per dimension.
///
/// Absent entries contribute nothing; lookups never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable(pub BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>);

impl WeightTable {
    /// Looks up the weight one answered option contributes to a dimension.
    pub fn weight(&self, dimension: &str, question_key: &str, option_value: &str) -> Option<f64> {
        self.0
            .get(dimension)?
            .get(question_key)?
            .get(option_value)
            .copied()
    }

    /// Records a weight, creating intermediate levels as needed.
    pub fn set(
        &mut self,
        dimension: impl Into<String>,
        question_key: impl Into<String>,
        option_value: impl Into<String>,
        weight: f64,
    ) {
        self.0
            .entry(dimension.into())
            .or_default()
            .entry(question_key.into())
            .or_default()
            .insert(option_value.into(), weight);
    }

    /// Iterates the dimension names in the table.
    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
