//! Category management handlers: create, rename, delete-with-detach, and
//! template assignment.

use std::sync::Arc;

use crate::domain::foundation::{CategoryId, TemplateId};
use crate::domain::survey::Category;
use crate::ports::{CategoryRepository, TemplateRepository, TemplateStoreError};

/// Command to create a category; the id may be caller-supplied.
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub id: Option<CategoryId>,
    pub name: String,
}

/// Handler for category lifecycle operations.
pub struct CategoryHandler {
    categories: Arc<dyn CategoryRepository>,
    templates: Arc<dyn TemplateRepository>,
}

impl CategoryHandler {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        templates: Arc<dyn TemplateRepository>,
    ) -> Self {
        Self {
            categories,
            templates,
        }
    }

    pub async fn list(&self) -> Result<Vec<Category>, TemplateStoreError> {
        self.categories.list().await
    }

    pub async fn create(&self, cmd: CreateCategoryCommand) -> Result<Category, TemplateStoreError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(TemplateStoreError::InvalidInput(
                "category name cannot be empty".to_string(),
            ));
        }
        let category = Category::new(cmd.id.unwrap_or_else(CategoryId::generate), name);
        self.categories.create(category.clone()).await?;
        Ok(category)
    }

    pub async fn rename(&self, id: &CategoryId, name: &str) -> Result<(), TemplateStoreError> {
        self.categories.rename(id, name).await
    }

    /// Deletes a category; member templates are detached, never deleted.
    pub async fn delete(&self, id: &CategoryId) -> Result<usize, TemplateStoreError> {
        self.categories.delete(id).await
    }

    /// Assigns a template to a category, or clears it with `None`.
    pub async fn assign_template(
        &self,
        template: &TemplateId,
        category: Option<&CategoryId>,
    ) -> Result<(), TemplateStoreError> {
        self.templates.assign_category(template, category).await
    }
}
