//! Product Catalog Port - read access to the shared product list.

use async_trait::async_trait;

use crate::domain::survey::Product;

use super::TemplateStoreError;

/// Port for reading the product catalog referenced by rule
/// recommendations.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns every catalog entry, active or not; filtering is the
    /// consumer's concern.
    async fn all(&self) -> Result<Vec<Product>, TemplateStoreError>;
}
