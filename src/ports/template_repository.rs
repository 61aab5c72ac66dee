//! Template Repository Port - persistence interface for template records.

use async_trait::async_trait;

use crate::domain::foundation::{CategoryId, TemplateId};
use crate::domain::survey::{TemplateRecord, TemplateSummary};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateStoreError {
    #[error("template not found: {0}")]
    TemplateNotFound(TemplateId),

    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    #[error("category already exists: {0}")]
    CategoryExists(CategoryId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to serialize record: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Port for persisting and loading template records.
///
/// One record maps to one directory of JSON files plus an index entry;
/// writes are assumed sequential per template identifier.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Persists a record and upserts its index entry.
    ///
    /// A `category` of `None` keeps any category the template already has;
    /// re-saving under an existing id overwrites the record's files and
    /// refreshes the index entry in place.
    async fn save(
        &self,
        record: &TemplateRecord,
        category: Option<&CategoryId>,
    ) -> Result<TemplateSummary, TemplateStoreError>;

    /// Loads a full record.
    ///
    /// # Errors
    /// Returns `TemplateStoreError::TemplateNotFound` if no record exists.
    async fn load(&self, id: &TemplateId) -> Result<TemplateRecord, TemplateStoreError>;

    /// Deletes a record's files and its index entry.
    async fn delete(&self, id: &TemplateId) -> Result<(), TemplateStoreError>;

    /// Lists the catalog index.
    async fn list(&self) -> Result<Vec<TemplateSummary>, TemplateStoreError>;

    /// Assigns (or clears, with `None`) a template's category.
    ///
    /// # Errors
    /// Returns `CategoryNotFound` when assigning an unknown category.
    async fn assign_category(
        &self,
        id: &TemplateId,
        category: Option<&CategoryId>,
    ) -> Result<(), TemplateStoreError>;

    /// Checks whether a record exists.
    async fn exists(&self, id: &TemplateId) -> Result<bool, TemplateStoreError>;
}
