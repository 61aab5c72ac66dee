//! Survey domain - the canonical question/weight/rule model.
//!
//! Everything extraction produces and the store persists is defined here.

mod answers;
mod category;
mod product;
mod question;
mod rules;
mod template;
mod ui_text;
mod weight_table;

pub use answers::{Answer, AnswerSheet};
pub use category::Category;
pub use product::Product;
pub use question::{LocalizedText, OptionPair, Question, QuestionType};
pub use rules::{Conclusion, Condition, ProductRef, Recommendation, RuleSet};
pub use template::{SurveyTemplate, TemplateMeta, TemplateRecord, TemplateSummary};
pub use ui_text::{UiStrings, UiText};
pub use weight_table::WeightTable;

pub(crate) use question::scalar_to_string;
