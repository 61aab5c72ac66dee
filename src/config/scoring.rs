//! Scoring configuration - severity tier thresholds.

use serde::Deserialize;

use crate::export::SeverityPolicy;

fn default_elevated_at() -> f64 {
    5.0
}

fn default_severe_at() -> f64 {
    10.0
}

/// Severity thresholds are presentation policy, so they are configuration
/// rather than constants.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_elevated_at")]
    pub elevated_at: f64,

    #[serde(default = "default_severe_at")]
    pub severe_at: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            elevated_at: default_elevated_at(),
            severe_at: default_severe_at(),
        }
    }
}

impl ScoringConfig {
    /// The severity policy this configuration describes.
    pub fn policy(&self) -> SeverityPolicy {
        SeverityPolicy {
            elevated_at: self.elevated_at,
            severe_at: self.severe_at,
        }
    }
}
