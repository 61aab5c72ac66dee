//! Category Repository Port - CRUD for template categories.

use async_trait::async_trait;

use crate::domain::foundation::CategoryId;
use crate::domain::survey::Category;

use super::TemplateStoreError;

/// Port for managing the category list.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Lists all categories.
    async fn list(&self) -> Result<Vec<Category>, TemplateStoreError>;

    /// Creates a category.
    ///
    /// # Errors
    /// Returns `CategoryExists` when the id is already taken.
    async fn create(&self, category: Category) -> Result<(), TemplateStoreError>;

    /// Renames a category.
    async fn rename(&self, id: &CategoryId, name: &str) -> Result<(), TemplateStoreError>;

    /// Deletes a category and detaches its member templates (their records
    /// survive, uncategorized). Returns how many templates were detached.
    async fn delete(&self, id: &CategoryId) -> Result<usize, TemplateStoreError>;
}
