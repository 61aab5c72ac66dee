//! Ports - interfaces between the domain and the outside world.

mod category_repository;
mod product_catalog;
mod template_repository;

pub use category_repository::CategoryRepository;
pub use product_catalog::ProductCatalog;
pub use template_repository::{TemplateRepository, TemplateStoreError};
