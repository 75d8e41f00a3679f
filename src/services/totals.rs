//! Budget totals
//!
//! Per-category totals, section totals and the projected ending balance of
//! one month. Everything here is a pure function of the document.

use std::collections::BTreeMap;

use crate::models::{BudgetDocument, CategoryKey, CategoryKind, Money};

/// Computed totals for one document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Totals {
    /// Sum of item amounts for every item list, including orphaned ones
    pub per_category: BTreeMap<CategoryKey, Money>,
    /// Sum over income categories
    pub income_total: Money,
    /// Sum over expense categories
    pub expense_total: Money,
    /// `starting_balance + income_total - expense_total`
    pub ending_balance: Money,
}

impl Totals {
    /// Total for one category, zero if it has no items
    pub fn category(&self, key: &str) -> Money {
        self.per_category.get(key).copied().unwrap_or_default()
    }

    /// Whether the projected ending balance is negative
    pub fn is_overdrawn(&self) -> bool {
        self.ending_balance.is_negative()
    }
}

/// Compute all totals for a document
///
/// Item lists without category metadata get a per-category total but count
/// toward neither section.
pub fn compute_totals(document: &BudgetDocument) -> Totals {
    let per_category: BTreeMap<CategoryKey, Money> = document
        .items
        .iter()
        .map(|(key, items)| (key.clone(), items.iter().map(|item| item.amount).sum()))
        .collect();

    let mut income_total = Money::zero();
    let mut expense_total = Money::zero();
    for (key, meta) in &document.categories {
        let total = per_category.get(key).copied().unwrap_or_default();
        match meta.kind {
            CategoryKind::Income => income_total += total,
            CategoryKind::Expense => expense_total += total,
        }
    }

    Totals {
        per_category,
        income_total,
        expense_total,
        ending_balance: document.starting_balance + income_total - expense_total,
    }
}
