//! File-based Template Store Adapter
//!
//! Persists one directory per template under a data root:
//! `templates/<id>/{Q.json, WT.json, UI.json, meta.json[, rules.json,
//! products.json]}`, plus a flat `templates.json` index, a
//! `categories.json` list, and a shared `products.json` catalog.
//!
//! Reads of missing or corrupt files fall back to supplied defaults so a
//! half-written data directory degrades instead of erroring.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::domain::foundation::{CategoryId, TemplateId, Timestamp};
use crate::domain::survey::{
    Category, Product, RuleSet, SurveyTemplate, TemplateMeta, TemplateRecord, TemplateSummary,
    UiText, WeightTable,
};
use crate::ports::{CategoryRepository, ProductCatalog, TemplateRepository, TemplateStoreError};

/// The `meta.json` shape: template meta plus its own id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedMeta {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    lang_default: String,
}

/// File-based storage for template records, categories, and products.
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    data_dir: PathBuf,
}

impl FileTemplateStore {
    /// Creates a store rooted at a data directory.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    fn template_dir(&self, id: &TemplateId) -> PathBuf {
        self.data_dir.join("templates").join(id.as_str())
    }

    fn index_path(&self) -> PathBuf {
        self.data_dir.join("templates.json")
    }

    fn categories_path(&self) -> PathBuf {
        self.data_dir.join("categories.json")
    }

    fn products_path(&self) -> PathBuf {
        self.data_dir.join("products.json")
    }

    /// Reads a JSON file, falling back when it is missing or corrupt.
    async fn read_json_or<T: DeserializeOwned>(&self, path: &Path, fallback: T) -> T {
        match fs::read_to_string(path).await {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(error) => {
                    debug!(path = %path.display(), %error, "corrupt JSON file, using fallback");
                    fallback
                }
            },
            Err(_) => fallback,
        }
    }

    async fn write_json<T: Serialize>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), TemplateStoreError> {
        let json = serde_json::to_vec_pretty(value)
            .map_err(|e| TemplateStoreError::Serialization(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| TemplateStoreError::Io(e.to_string()))?;
        }
        fs::write(path, json)
            .await
            .map_err(|e| TemplateStoreError::Io(e.to_string()))
    }

    async fn read_index(&self) -> Vec<TemplateSummary> {
        self.read_json_or(&self.index_path(), Vec::new()).await
    }

    async fn write_index(&self, index: &[TemplateSummary]) -> Result<(), TemplateStoreError> {
        self.write_json(&self.index_path(), &index).await
    }

    async fn read_categories(&self) -> Vec<Category> {
        self.read_json_or(&self.categories_path(), Vec::new()).await
    }

    async fn category_exists(&self, id: &CategoryId) -> bool {
        self.read_categories().await.iter().any(|c| &c.id == id)
    }
}

#[async_trait]
impl TemplateRepository for FileTemplateStore {
    async fn save(
        &self,
        record: &TemplateRecord,
        category: Option<&CategoryId>,
    ) -> Result<TemplateSummary, TemplateStoreError> {
        let dir = self.template_dir(&record.id);
        let template = &record.template;

        let meta = PersistedMeta {
            id: record.id.to_string(),
            name: template.meta.name.clone(),
            lang_default: template.meta.lang_default.clone(),
        };

        let q_path = dir.join("Q.json");
        let wt_path = dir.join("WT.json");
        let ui_path = dir.join("UI.json");
        let meta_path = dir.join("meta.json");
        tokio::try_join!(
            self.write_json(&q_path, &template.questions),
            self.write_json(&wt_path, &template.weights),
            self.write_json(&ui_path, &template.ui),
            self.write_json(&meta_path, &meta),
        )?;

        // Rules and products are optional files in the layout.
        if !template.rules.is_empty() {
            self.write_json(&dir.join("rules.json"), &template.rules)
                .await?;
        }
        if !template.products.is_empty() {
            self.write_json(&dir.join("products.json"), &template.products)
                .await?;
        }

        let mut index = self.read_index().await;
        let summary = match index.iter_mut().find(|e| e.id == record.id) {
            Some(entry) => {
                entry.name = template.meta.name.clone();
                entry.lang_default = template.meta.lang_default.clone();
                entry.count_q = template.questions.len();
                if category.is_some() {
                    entry.category_id = category.cloned();
                }
                entry.clone()
            }
            None => {
                let entry = TemplateSummary {
                    id: record.id.clone(),
                    name: template.meta.name.clone(),
                    lang_default: template.meta.lang_default.clone(),
                    count_q: template.questions.len(),
                    category_id: category.cloned(),
                    created_at: Timestamp::now(),
                };
                index.push(entry.clone());
                entry
            }
        };
        self.write_index(&index).await?;

        info!(
            template = %record.id,
            questions = template.questions.len(),
            "template saved"
        );
        Ok(summary)
    }

    async fn load(&self, id: &TemplateId) -> Result<TemplateRecord, TemplateStoreError> {
        let dir = self.template_dir(id);
        if !dir.exists() {
            return Err(TemplateStoreError::TemplateNotFound(id.clone()));
        }

        let questions = self.read_json_or(&dir.join("Q.json"), Vec::new()).await;
        let weights = self
            .read_json_or(&dir.join("WT.json"), WeightTable::default())
            .await;
        let ui = self.read_json_or(&dir.join("UI.json"), UiText::default()).await;
        let persisted: PersistedMeta = self
            .read_json_or(&dir.join("meta.json"), PersistedMeta::default())
            .await;
        let rules = self
            .read_json_or(&dir.join("rules.json"), RuleSet::default())
            .await;
        let products: Vec<Product> = self
            .read_json_or(&dir.join("products.json"), Vec::new())
            .await;

        let meta = TemplateMeta {
            name: if persisted.name.is_empty() {
                id.to_string()
            } else {
                persisted.name
            },
            lang_default: if persisted.lang_default.is_empty() {
                "zh".to_string()
            } else {
                persisted.lang_default
            },
        };

        Ok(TemplateRecord {
            id: id.clone(),
            template: SurveyTemplate {
                meta,
                questions,
                weights,
                ui,
                rules,
                products,
            },
        })
    }

    async fn delete(&self, id: &TemplateId) -> Result<(), TemplateStoreError> {
        let mut index = self.read_index().await;
        let before = index.len();
        index.retain(|e| &e.id != id);
        if index.len() == before {
            return Err(TemplateStoreError::TemplateNotFound(id.clone()));
        }
        self.write_index(&index).await?;

        let dir = self.template_dir(id);
        if dir.exists() {
            fs::remove_dir_all(&dir)
                .await
                .map_err(|e| TemplateStoreError::Io(e.to_string()))?;
        }

        info!(template = %id, "template deleted");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<TemplateSummary>, TemplateStoreError> {
        Ok(self.read_index().await)
    }

    async fn assign_category(
        &self,
        id: &TemplateId,
        category: Option<&CategoryId>,
    ) -> Result<(), TemplateStoreError> {
        if let Some(category) = category {
            if !self.category_exists(category).await {
                return Err(TemplateStoreError::CategoryNotFound(category.clone()));
            }
        }

        let mut index = self.read_index().await;
        let entry = index
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| TemplateStoreError::TemplateNotFound(id.clone()))?;
        entry.category_id = category.cloned();
        self.write_index(&index).await
    }

    async fn exists(&self, id: &TemplateId) -> Result<bool, TemplateStoreError> {
        Ok(self.template_dir(id).exists())
    }
}

#[async_trait]
impl CategoryRepository for FileTemplateStore {
    async fn list(&self) -> Result<Vec<Category>, TemplateStoreError> {
        Ok(self.read_categories().await)
    }

    async fn create(&self, category: Category) -> Result<(), TemplateStoreError> {
        let mut categories = self.read_categories().await;
        if categories.iter().any(|c| c.id == category.id) {
            return Err(TemplateStoreError::CategoryExists(category.id));
        }
        categories.push(category);
        self.write_json(&self.categories_path(), &categories).await
    }

    async fn rename(&self, id: &CategoryId, name: &str) -> Result<(), TemplateStoreError> {
        let mut categories = self.read_categories().await;
        let category = categories
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| TemplateStoreError::CategoryNotFound(id.clone()))?;
        category.name = name.to_string();
        self.write_json(&self.categories_path(), &categories).await
    }

    async fn delete(&self, id: &CategoryId) -> Result<usize, TemplateStoreError> {
        let mut categories = self.read_categories().await;
        let before = categories.len();
        categories.retain(|c| &c.id != id);
        if categories.len() == before {
            return Err(TemplateStoreError::CategoryNotFound(id.clone()));
        }
        self.write_json(&self.categories_path(), &categories).await?;

        // Detach member templates; their records stay on disk.
        let mut index = self.read_index().await;
        let mut detached = 0;
        for entry in index.iter_mut() {
            if entry.category_id.as_ref() == Some(id) {
                entry.category_id = None;
                detached += 1;
            }
        }
        if detached > 0 {
            self.write_index(&index).await?;
        }

        info!(category = %id, detached, "category deleted");
        Ok(detached)
    }
}

#[async_trait]
impl ProductCatalog for FileTemplateStore {
    async fn all(&self) -> Result<Vec<Product>, TemplateStoreError> {
        Ok(self.read_json_or(&self.products_path(), Vec::new()).await)
    }
}
