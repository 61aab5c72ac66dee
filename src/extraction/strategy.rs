//! The strategy-chain contract.

use scraper::Html;

use crate::domain::survey::SurveyTemplate;

/// One self-contained heuristic for recognizing a particular encoding of
/// survey data inside a parsed document.
///
/// Strategies are pure: document in, candidate out, no state between
/// invocations. A strategy that recognizes nothing, or whose candidate
/// violates its own structural expectations, returns `None` so the chain
/// can move on — a partial or corrupt record must never escape.
pub(crate) trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn try_extract(&self, doc: &Html) -> Option<SurveyTemplate>;
}
