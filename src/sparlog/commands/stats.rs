use crate::commands::{CmdResult, Insights};
use crate::error::Result;
use crate::metrics;
use crate::store::Storage;

/// Aggregate stats plus the three insights over the full visible log.
///
/// In remote mode "visible" means every user's entries, unscoped, matching
/// the reference behavior.
pub fn run(storage: &Storage) -> Result<CmdResult> {
    let items = storage.list_all()?;

    let mut result = CmdResult::default();
    result.stats = Some(metrics::stats(&items));
    result.insights = Some(Insights {
        smart_score: metrics::engagement_score(&items),
        top_category: metrics::top_category_by_savings(&items),
        best_week: metrics::best_week_by_savings(&items),
    });
    Ok(result)
}
