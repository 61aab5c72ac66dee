//! Application command handlers.

mod aggregate_questions;
mod categories;
mod export_survey;
mod import_template;

pub use aggregate_questions::{
    AggregatedQuestion, AggregateQuestionsHandler, AggregateQuestionsQuery, QuestionAggregate,
};
pub use categories::{CategoryHandler, CreateCategoryCommand};
pub use export_survey::{ExportCategorySurveyCommand, ExportSurveyCommand, ExportSurveyHandler};
pub use import_template::{ImportOutcome, ImportTemplateCommand, ImportTemplateHandler};
