//! Historical average of a line item across months

use tracing::debug;

use crate::error::BudgetResult;
use crate::models::{BudgetDocument, MonthId, Money};
use crate::storage::Storage;

use super::month::MonthRegistry;

/// Mean amount of an item over the months that have it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalAverage {
    pub average: Money,
    pub sample_count: usize,
}

/// Average an item over every registered month except `exclude`
///
/// From each month only the first item in `category` named exactly
/// `item_name` is looked at; a month whose match is zero is skipped.
pub fn average_for_item(
    storage: &Storage,
    registry: &MonthRegistry,
    exclude: &MonthId,
    category: &str,
    item_name: &str,
) -> BudgetResult<Option<HistoricalAverage>> {
    let mut documents = Vec::new();
    for month in registry.months().iter().filter(|m| *m != exclude) {
        match storage.months.load(month)? {
            Some(document) => documents.push(document),
            None => debug!(month = %month, "registered month has no stored document"),
        }
    }
    Ok(average_across(documents.iter(), category, item_name))
}

/// Average an item over already loaded documents
pub fn average_across<'d>(
    documents: impl IntoIterator<Item = &'d BudgetDocument>,
    category: &str,
    item_name: &str,
) -> Option<HistoricalAverage> {
    let samples: Vec<i64> = documents
        .into_iter()
        .filter_map(|doc| {
            doc.items_in(category)
                .iter()
                .find(|item| item.name == item_name)
                .filter(|item| !item.amount.is_zero())
                .map(|item| item.amount.cents())
        })
        .collect();

    if samples.is_empty() {
        return None;
    }

    let total: i128 = samples.iter().map(|&cents| i128::from(cents)).sum();
    let average = (total as f64 / samples.len() as f64).round() as i64;
    Some(HistoricalAverage {
        average: Money::from_cents(average),
        sample_count: samples.len(),
    })
}
