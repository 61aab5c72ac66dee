//! AggregateQuestionsHandler - merges a category's question pool.
//!
//! Templates within one category routinely re-import the same source
//! document, so the pool is deduplicated by question key: the first
//! occurrence wins and later ones only contribute their template's name to
//! the provenance list.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::domain::foundation::{CategoryId, TemplateId};
use crate::domain::survey::Question;
use crate::ports::{TemplateRepository, TemplateStoreError};

/// Query for a category's merged question pool.
#[derive(Debug, Clone)]
pub struct AggregateQuestionsQuery {
    pub category: CategoryId,
}

/// One question tagged with its provenance.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub template_id: TemplateId,
    pub template_name: String,
    /// Names of every template that contributed this key.
    pub source_templates: Vec<String>,
}

/// The merged pool plus its dedup accounting:
/// `original_count - count_q() == merged_count`.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionAggregate {
    pub category: CategoryId,
    pub questions: Vec<AggregatedQuestion>,
    pub original_count: usize,
    pub merged_count: usize,
}

impl QuestionAggregate {
    /// Number of unique questions after the merge.
    pub fn count_q(&self) -> usize {
        self.questions.len()
    }
}

/// Handler computing the aggregate.
pub struct AggregateQuestionsHandler {
    repository: Arc<dyn TemplateRepository>,
}

impl AggregateQuestionsHandler {
    pub fn new(repository: Arc<dyn TemplateRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: AggregateQuestionsQuery,
    ) -> Result<QuestionAggregate, TemplateStoreError> {
        // 1. Gather every member template's questions, tagged with origin.
        let members: Vec<_> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|s| s.category_id.as_ref() == Some(&query.category))
            .collect();

        let mut original_count = 0;
        let mut questions: Vec<AggregatedQuestion> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for summary in members {
            let record = match self.repository.load(&summary.id).await {
                Ok(record) => record,
                Err(error) => {
                    warn!(template = %summary.id, %error, "skipping unreadable template");
                    continue;
                }
            };

            // 2. Deduplicate by key, first occurrence wins.
            for question in record.template.questions {
                original_count += 1;
                match by_key.get(&question.key) {
                    Some(&i) => {
                        let existing = &mut questions[i];
                        if !existing.source_templates.contains(&summary.name) {
                            existing.source_templates.push(summary.name.clone());
                        }
                    }
                    None => {
                        by_key.insert(question.key.clone(), questions.len());
                        questions.push(AggregatedQuestion {
                            question,
                            template_id: summary.id.clone(),
                            template_name: summary.name.clone(),
                            source_templates: vec![summary.name.clone()],
                        });
                    }
                }
            }
        }

        let merged_count = original_count - questions.len();
        Ok(QuestionAggregate {
            category: query.category,
            questions,
            original_count,
            merged_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::FileTemplateStore;
    use crate::domain::survey::{
        Category, LocalizedText, OptionPair, QuestionType, SurveyTemplate, TemplateMeta,
        TemplateRecord,
    };
    use crate::ports::CategoryRepository;
    use tempfile::TempDir;

    fn question(key: &str) -> Question {
        Question::new(
            key,
            QuestionType::Single,
            LocalizedText::zh(format!("题 {key}")),
            vec![OptionPair::new("a", "A")],
        )
    }

    fn record(id: &str, name: &str, keys: &[&str]) -> TemplateRecord {
        TemplateRecord {
            id: TemplateId::new(id).unwrap(),
            template: SurveyTemplate {
                meta: TemplateMeta {
                    name: name.to_string(),
                    lang_default: "zh".to_string(),
                },
                questions: keys.iter().map(|k| question(k)).collect(),
                ..SurveyTemplate::default()
            },
        }
    }

    #[tokio::test]
    async fn overlapping_keys_are_merged_with_provenance() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FileTemplateStore::new(temp.path()));
        let cat = CategoryId::new("c1").unwrap();
        CategoryRepository::create(store.as_ref(), Category::new(cat.clone(), "分类"))
            .await
            .unwrap();

        store
            .save(&record("tpl_a", "模板甲", &["q1", "q2"]), Some(&cat))
            .await
            .unwrap();
        store
            .save(&record("tpl_b", "模板乙", &["q2", "q3"]), Some(&cat))
            .await
            .unwrap();

        let aggregate = AggregateQuestionsHandler::new(store)
            .handle(AggregateQuestionsQuery {
                category: cat.clone(),
            })
            .await
            .unwrap();

        assert_eq!(aggregate.original_count, 4);
        assert_eq!(aggregate.count_q(), 3);
        assert_eq!(aggregate.merged_count, 1);
        assert_eq!(
            aggregate.original_count - aggregate.count_q(),
            aggregate.merged_count
        );

        let q2 = aggregate
            .questions
            .iter()
            .find(|q| q.question.key == "q2")
            .unwrap();
        assert_eq!(q2.template_name, "模板甲");
        assert_eq!(q2.source_templates, vec!["模板甲", "模板乙"]);
    }

    #[tokio::test]
    async fn other_categories_are_excluded() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FileTemplateStore::new(temp.path()));
        let cat = CategoryId::new("mine").unwrap();
        let other = CategoryId::new("other").unwrap();
        for (id, name) in [(&cat, "我的"), (&other, "别的")] {
            CategoryRepository::create(store.as_ref(), Category::new(id.clone(), name))
                .await
                .unwrap();
        }

        store
            .save(&record("tpl_mine", "甲", &["q1"]), Some(&cat))
            .await
            .unwrap();
        store
            .save(&record("tpl_other", "乙", &["q9"]), Some(&other))
            .await
            .unwrap();
        store.save(&record("tpl_loose", "丙", &["q8"]), None).await.unwrap();

        let aggregate = AggregateQuestionsHandler::new(store)
            .handle(AggregateQuestionsQuery { category: cat })
            .await
            .unwrap();

        assert_eq!(aggregate.count_q(), 1);
        assert_eq!(aggregate.questions[0].question.key, "q1");
    }

    #[tokio::test]
    async fn empty_category_yields_empty_aggregate() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(FileTemplateStore::new(temp.path()));

        let aggregate = AggregateQuestionsHandler::new(store)
            .handle(AggregateQuestionsQuery {
                category: CategoryId::new("hollow").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(aggregate.count_q(), 0);
        assert_eq!(aggregate.original_count, 0);
        assert_eq!(aggregate.merged_count, 0);
    }
}
