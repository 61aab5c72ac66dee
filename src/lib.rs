//! Surveyforge - survey template extraction, storage, and export.
//!
//! Recovers a normalized question/option/weight model from heterogeneous
//! HTML encodings of a survey (embedded JSON, script variable literals,
//! DOM question blocks, raw input groups), persists the canonical records
//! as flat JSON files, and assembles randomized survey bundles with
//! weighted scoring and rule-based recommendations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod export;
pub mod extraction;
pub mod ports;

pub use extraction::{extract, Extractor, SandboxBudget};
