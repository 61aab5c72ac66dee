//! ImportTemplateHandler - runs extraction and persists the result.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{CategoryId, TemplateId};
use crate::domain::survey::TemplateRecord;
use crate::extraction::Extractor;
use crate::ports::{TemplateRepository, TemplateStoreError};

/// Command to import one HTML document as a template.
#[derive(Debug, Clone)]
pub struct ImportTemplateCommand {
    pub html: String,
    /// Explicit id; a fresh one is generated when absent. Importing under
    /// an existing id overwrites that record.
    pub template_id: Option<TemplateId>,
    /// Display-name override; the document-derived name is used otherwise.
    pub name: Option<String>,
    pub category: Option<CategoryId>,
}

/// Result of a successful import.
///
/// A zero `question_count` is reportable, not an error: persisting an
/// empty record and telling the caller is the contract.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub template_id: TemplateId,
    pub name: String,
    pub question_count: usize,
    pub category: Option<CategoryId>,
}

/// Handler for importing templates.
pub struct ImportTemplateHandler {
    repository: Arc<dyn TemplateRepository>,
    extractor: Arc<Extractor>,
}

impl ImportTemplateHandler {
    pub fn new(repository: Arc<dyn TemplateRepository>, extractor: Arc<Extractor>) -> Self {
        Self {
            repository,
            extractor,
        }
    }

    pub async fn handle(
        &self,
        cmd: ImportTemplateCommand,
    ) -> Result<ImportOutcome, TemplateStoreError> {
        // 1. Extract the canonical record.
        let mut template = self.extractor.extract(&cmd.html);

        // 2. Apply caller overrides.
        if let Some(name) = cmd.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            template.meta.name = name.to_string();
        }

        if template.questions.is_empty() {
            warn!("import recognized no questions; persisting an empty template");
        }

        // 3. Persist and index.
        let id = cmd.template_id.unwrap_or_else(TemplateId::generate);
        let record = TemplateRecord { id, template };
        let summary = self.repository.save(&record, cmd.category.as_ref()).await?;

        info!(
            template = %summary.id,
            questions = summary.count_q,
            "template imported"
        );

        Ok(ImportOutcome {
            template_id: summary.id,
            name: summary.name,
            question_count: summary.count_q,
            category: summary.category_id,
        })
    }
}
