//! ExportSurveyHandler - assembles a renderable survey bundle from one
//! template, or from a category's merged question pool.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CategoryId, TemplateId};
use crate::domain::survey::{SurveyTemplate, TemplateMeta};
use crate::export::{assemble, QuestionSelection, SurveyBundle};
use crate::ports::{CategoryRepository, ProductCatalog, TemplateRepository, TemplateStoreError};

use super::aggregate_questions::{AggregateQuestionsHandler, AggregateQuestionsQuery};

/// Command to export one template as a survey bundle.
#[derive(Debug, Clone)]
pub struct ExportSurveyCommand {
    pub template_id: TemplateId,
    /// Explicit question keys; wins over `random_count` when non-empty.
    pub question_keys: Vec<String>,
    /// Random sample size; `0` exports every question.
    pub random_count: usize,
}

/// Command to export a random sample of a category's merged pool.
#[derive(Debug, Clone)]
pub struct ExportCategorySurveyCommand {
    pub category: CategoryId,
    pub random_count: usize,
}

/// Handler for survey exports.
pub struct ExportSurveyHandler {
    repository: Arc<dyn TemplateRepository>,
    categories: Arc<dyn CategoryRepository>,
    catalog: Arc<dyn ProductCatalog>,
}

impl ExportSurveyHandler {
    pub fn new(
        repository: Arc<dyn TemplateRepository>,
        categories: Arc<dyn CategoryRepository>,
        catalog: Arc<dyn ProductCatalog>,
    ) -> Self {
        Self {
            repository,
            categories,
            catalog,
        }
    }

    /// Products referenced by a template's rules come from the template's
    /// own list when it has one, else from the shared catalog.
    async fn catalog_for(
        &self,
        template: &SurveyTemplate,
    ) -> Result<Vec<crate::domain::survey::Product>, TemplateStoreError> {
        if template.products.is_empty() {
            self.catalog.all().await
        } else {
            Ok(template.products.clone())
        }
    }

    pub async fn handle(
        &self,
        cmd: ExportSurveyCommand,
    ) -> Result<SurveyBundle, TemplateStoreError> {
        let record = self.repository.load(&cmd.template_id).await?;
        let selection = QuestionSelection::from_parts(cmd.question_keys, cmd.random_count);
        let catalog = self.catalog_for(&record.template).await?;

        let bundle = assemble(&record.template, &selection, &catalog);
        info!(
            template = %cmd.template_id,
            questions = bundle.questions.len(),
            "survey bundle exported"
        );
        Ok(bundle)
    }

    pub async fn handle_category(
        &self,
        cmd: ExportCategorySurveyCommand,
    ) -> Result<SurveyBundle, TemplateStoreError> {
        // The pooled export has no single source template, so the bundle
        // carries the questions plus the category's name only.
        let aggregate = AggregateQuestionsHandler::new(self.repository.clone())
            .handle(AggregateQuestionsQuery {
                category: cmd.category.clone(),
            })
            .await?;

        let name = self
            .categories
            .list()
            .await?
            .into_iter()
            .find(|c| c.id == cmd.category)
            .map(|c| c.name)
            .unwrap_or_else(|| cmd.category.to_string());

        let pool = SurveyTemplate {
            meta: TemplateMeta {
                name,
                lang_default: "zh".to_string(),
            },
            questions: aggregate.questions.into_iter().map(|q| q.question).collect(),
            ..SurveyTemplate::default()
        };

        let selection = QuestionSelection::from_parts(Vec::new(), cmd.random_count);
        let bundle = assemble(&pool, &selection, &[]);
        info!(
            category = %cmd.category,
            questions = bundle.questions.len(),
            "category survey bundle exported"
        );
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::FileTemplateStore;
    use crate::domain::survey::{
        Category, LocalizedText, OptionPair, Product, Question, QuestionType, TemplateRecord,
    };
    use tempfile::TempDir;

    fn handler(store: &Arc<FileTemplateStore>) -> ExportSurveyHandler {
        ExportSurveyHandler::new(store.clone(), store.clone(), store.clone())
    }

    fn template_with_rules() -> SurveyTemplate {
        serde_json::from_value(serde_json::json!({
            "meta": {"name": "评估", "lang_default": "zh"},
            "Q": [
                {"key": "q1", "title": {"zh": "1. 第一题"}, "opts": [["a", "A"]]},
                {"key": "q2", "title": {"zh": "2. 第二题"}, "opts": [["b", "B"]]},
                {"key": "q3", "title": {"zh": "3. 第三题"}, "opts": [["c", "C"]]}
            ],
            "WT": {},
            "UI": {},
            "rules": {
                "recommendations": [
                    {"if": {"dim": {"stress": ">=0"}}, "product": {"code": "p1"}}
                ]
            },
            "products": []
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn exports_selected_keys_with_cleaned_titles() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FileTemplateStore::new(temp.path()));
        let id = TemplateId::new("tpl_e").unwrap();
        store
            .save(
                &TemplateRecord {
                    id: id.clone(),
                    template: template_with_rules(),
                },
                None,
            )
            .await
            .unwrap();

        let bundle = handler(&store)
            .handle(ExportSurveyCommand {
                template_id: id,
                question_keys: vec!["q3".into(), "q1".into()],
                random_count: 5,
            })
            .await
            .unwrap();

        let keys: Vec<_> = bundle.questions.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["q1", "q3"]);
        assert_eq!(bundle.questions[0].title.resolve("zh"), "第一题");
    }

    #[tokio::test]
    async fn shared_catalog_supplies_referenced_products() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("products.json"),
            r#"[{"id":"p1","name":"修复课程"},{"id":"p2","name":"未引用"}]"#,
        )
        .unwrap();

        let store = Arc::new(FileTemplateStore::new(temp.path()));
        let id = TemplateId::new("tpl_p").unwrap();
        store
            .save(
                &TemplateRecord {
                    id: id.clone(),
                    template: template_with_rules(),
                },
                None,
            )
            .await
            .unwrap();

        let bundle = handler(&store)
            .handle(ExportSurveyCommand {
                template_id: id,
                question_keys: vec![],
                random_count: 0,
            })
            .await
            .unwrap();

        assert_eq!(bundle.products.len(), 1);
        assert_eq!(bundle.products[0].id, "p1");
    }

    #[tokio::test]
    async fn template_products_override_the_shared_catalog() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FileTemplateStore::new(temp.path()));
        let id = TemplateId::new("tpl_own").unwrap();
        let mut template = template_with_rules();
        template.products = vec![Product {
            id: "p1".to_string(),
            name: Some("随模板".to_string()),
            ..Product::default()
        }];
        store
            .save(&TemplateRecord { id: id.clone(), template }, None)
            .await
            .unwrap();

        let bundle = handler(&store)
            .handle(ExportSurveyCommand {
                template_id: id,
                question_keys: vec![],
                random_count: 0,
            })
            .await
            .unwrap();

        assert_eq!(bundle.products[0].name.as_deref(), Some("随模板"));
    }

    #[tokio::test]
    async fn missing_template_errors() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FileTemplateStore::new(temp.path()));
        let result = handler(&store)
            .handle(ExportSurveyCommand {
                template_id: TemplateId::new("ghost").unwrap(),
                question_keys: vec![],
                random_count: 0,
            })
            .await;
        assert!(matches!(
            result,
            Err(TemplateStoreError::TemplateNotFound(_))
        ));
    }

    #[tokio::test]
    async fn category_export_samples_the_merged_pool() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FileTemplateStore::new(temp.path()));
        let cat = CategoryId::new("c1").unwrap();
        CategoryRepository::create(store.as_ref(), Category::new(cat.clone(), "产后"))
            .await
            .unwrap();

        for (tpl, keys) in [("tpl_1", ["q1", "q2"]), ("tpl_2", ["q2", "q3"])] {
            let template = SurveyTemplate {
                meta: TemplateMeta {
                    name: tpl.to_string(),
                    lang_default: "zh".to_string(),
                },
                questions: keys
                    .iter()
                    .map(|k| {
                        Question::new(
                            *k,
                            QuestionType::Single,
                            LocalizedText::zh(*k),
                            vec![OptionPair::new("a", "A")],
                        )
                    })
                    .collect(),
                ..SurveyTemplate::default()
            };
            store
                .save(
                    &TemplateRecord {
                        id: TemplateId::new(tpl).unwrap(),
                        template,
                    },
                    Some(&cat),
                )
                .await
                .unwrap();
        }

        let bundle = handler(&store)
            .handle_category(ExportCategorySurveyCommand {
                category: cat,
                random_count: 2,
            })
            .await
            .unwrap();

        assert_eq!(bundle.meta.name, "产后");
        assert_eq!(bundle.questions.len(), 2);
        // Sampling is over the deduplicated pool of q1..q3.
        for q in &bundle.questions {
            assert!(["q1", "q2", "q3"].contains(&q.key.as_str()));
        }
    }
}
