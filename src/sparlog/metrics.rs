//! Derived metrics over the purchase log.
//!
//! Everything here is pure and synchronous: functions take the log as a
//! slice and do no I/O. Savings always come from
//! [`PurchaseEntry::savings`], never from a stored field.

use chrono::Datelike;

use crate::model::PurchaseEntry;

/// Bucket for entries without a category, and the sentinel for an empty log.
pub const FALLBACK_CATEGORY: &str = "Other";
/// Sentinel week label for an empty log.
pub const EMPTY_WEEK_LABEL: &str = "-";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub total_spent: f64,
    pub total_saved: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySavings {
    pub category: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekSavings {
    pub week: String,
    pub amount: i64,
}

pub fn stats(items: &[PurchaseEntry]) -> Stats {
    Stats {
        count: items.len(),
        total_spent: items.iter().map(|e| e.amount).sum(),
        total_saved: items.iter().map(|e| e.savings()).sum(),
    }
}

/// The "SmartScore": a 0-100 blend of purchase frequency, average discount,
/// note usage, and category diversity over the full log.
pub fn engagement_score(items: &[PurchaseEntry]) -> u32 {
    // Explicit, not derived: keeps log2(1) edge noise out of the formula.
    if items.is_empty() {
        return 0;
    }

    let n = items.len() as f64;
    let frequency = ((n + 1.0).log2() / 5.0).min(1.0);
    let avg_discount = items.iter().map(|e| e.discount_percent).sum::<f64>() / n;
    let noted = items.iter().filter(|e| !e.note.trim().is_empty()).count() as f64 / n;

    let mut seen: Vec<&str> = Vec::new();
    for entry in items {
        let category = category_of(entry);
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    let diversity = (seen.len() as f64 / 6.0).min(1.0);

    let score = frequency * 30.0 + avg_discount * 0.3 + noted * 20.0 + diversity * 20.0;
    score.min(100.0).round() as u32
}

pub fn top_category_by_savings(items: &[PurchaseEntry]) -> CategorySavings {
    let mut groups: Vec<(String, f64)> = Vec::new();
    for entry in items {
        let category = category_of(entry);
        match groups.iter_mut().find(|(c, _)| c.as_str() == category) {
            Some((_, sum)) => *sum += entry.savings(),
            None => groups.push((category.to_string(), entry.savings())),
        }
    }

    // Strict comparison keeps the first-encountered group on ties.
    let mut best: Option<(String, f64)> = None;
    for (category, sum) in groups {
        if best.as_ref().is_none_or(|(_, b)| sum > *b) {
            best = Some((category, sum));
        }
    }

    match best {
        Some((category, sum)) => CategorySavings {
            category,
            amount: sum.round() as i64,
        },
        None => CategorySavings {
            category: FALLBACK_CATEGORY.to_string(),
            amount: 0,
        },
    }
}

/// Best ISO-8601 week (Thursday-anchored numbering) by summed savings.
/// Labelled `"<iso_year>-W<week>"`; entries with unparseable dates are skipped.
pub fn best_week_by_savings(items: &[PurchaseEntry]) -> WeekSavings {
    let mut weeks: Vec<(String, f64)> = Vec::new();
    for entry in items {
        let Some(date) = entry.local_date() else {
            continue;
        };
        let iso = date.iso_week();
        let label = format!("{}-W{}", iso.year(), iso.week());
        match weeks.iter_mut().find(|(w, _)| w.as_str() == label) {
            Some((_, sum)) => *sum += entry.savings(),
            None => weeks.push((label, entry.savings())),
        }
    }

    let mut best: Option<(String, f64)> = None;
    for (week, sum) in weeks {
        if best.as_ref().is_none_or(|(_, b)| sum > *b) {
            best = Some((week, sum));
        }
    }

    match best {
        Some((week, sum)) => WeekSavings {
            week,
            amount: sum.round() as i64,
        },
        None => WeekSavings {
            week: EMPTY_WEEK_LABEL.to_string(),
            amount: 0,
        },
    }
}

fn category_of(entry: &PurchaseEntry) -> &str {
    if entry.category.trim().is_empty() {
        FALLBACK_CATEGORY
    } else {
        &entry.category
    }
}
