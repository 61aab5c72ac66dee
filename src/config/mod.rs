//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `SURVEYFORGE`
//! prefix and `__` as the nesting separator; every field has a default, so
//! an empty environment yields a working configuration.
//!
//! # Environment Variable Format
//!
//! - `SURVEYFORGE__STORAGE__DATA_DIR=/var/lib/surveyforge`
//! - `SURVEYFORGE__EXTRACTION__EVAL_TIMEOUT_MS=120`
//! - `SURVEYFORGE__SCORING__SEVERE_AT=12`

mod error;
mod extraction;
mod scoring;
mod storage;

pub use error::ConfigError;
pub use extraction::ExtractionConfig;
pub use scoring::ScoringConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// File store location.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Sandbox evaluation budget.
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Severity tier thresholds.
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl AppConfig {
    /// Loads configuration from the environment (and a `.env` file when
    /// present).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SURVEYFORGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extraction.eval_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "extraction.eval_timeout_ms must be positive".to_string(),
            ));
        }
        if self.scoring.severe_at < self.scoring.elevated_at {
            return Err(ConfigError::Invalid(format!(
                "scoring.severe_at ({}) must not be below scoring.elevated_at ({})",
                self.scoring.severe_at, self.scoring.elevated_at
            )));
        }
        Ok(())
    }
}
