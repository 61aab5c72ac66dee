//! Extraction configuration - the sandbox evaluation budget.

use serde::Deserialize;

use crate::extraction::SandboxBudget;

fn default_eval_timeout_ms() -> u64 {
    80
}

fn default_loop_iteration_limit() -> u64 {
    100_000
}

fn default_recursion_limit() -> usize {
    128
}

/// Budget for evaluating one script literal.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Wall-clock budget per attempted variable, in milliseconds.
    #[serde(default = "default_eval_timeout_ms")]
    pub eval_timeout_ms: u64,

    #[serde(default = "default_loop_iteration_limit")]
    pub loop_iteration_limit: u64,

    #[serde(default = "default_recursion_limit")]
    pub recursion_limit: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            eval_timeout_ms: default_eval_timeout_ms(),
            loop_iteration_limit: default_loop_iteration_limit(),
            recursion_limit: default_recursion_limit(),
        }
    }
}

impl ExtractionConfig {
    /// The sandbox budget this configuration describes.
    pub fn budget(&self) -> SandboxBudget {
        SandboxBudget {
            wall_ms: self.eval_timeout_ms,
            loop_iteration_limit: self.loop_iteration_limit,
            recursion_limit: self.recursion_limit,
        }
    }
}
