//! One-time upgrade of stored documents
//!
//! Documents written before categories were user-defined have no
//! `customCategories` block. For those, the four built-in categories are
//! restored and every other non-empty item list gets metadata inferred from
//! its key: keys containing "income" are income, everything else is an
//! expense. Documents that do have a metadata block are taken as-is, so a
//! list without metadata there stays orphaned.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};

use super::category::{CategoryKey, CategoryKind, CategoryMeta};
use super::document::{BudgetDocument, LineItem, RawDocument};

/// The categories every budget started with
pub(crate) fn default_categories() -> Vec<(CategoryKey, CategoryMeta)> {
    vec![
        (
            "income".into(),
            CategoryMeta::new("Income Items", CategoryKind::Income),
        ),
        (
            "credit".into(),
            CategoryMeta::new("Credit Cards", CategoryKind::Expense),
        ),
        (
            "monthly".into(),
            CategoryMeta::new("Recurring Expenses", CategoryKind::Expense),
        ),
        (
            "utils".into(),
            CategoryMeta::new("Utilities", CategoryKind::Expense),
        ),
    ]
}

/// Convert a stored document into the current model
pub fn upgrade(raw: RawDocument) -> BudgetDocument {
    let mut items: BTreeMap<CategoryKey, Vec<LineItem>> = BTreeMap::new();
    for (field, value) in raw.extra {
        match value {
            Value::Array(entries) => {
                let list = parse_items(&field, entries);
                items.insert(CategoryKey::from(field), list);
            }
            _ => debug!(field = %field, "ignoring non-list field in budget document"),
        }
    }

    let legacy = raw.custom_categories.is_none();
    let mut categories = raw.custom_categories.unwrap_or_default();

    if legacy {
        for (key, meta) in default_categories() {
            categories.insert(key, meta);
        }

        let inferred: Vec<CategoryKey> = items
            .iter()
            .filter(|(key, list)| !list.is_empty() && !categories.contains_key(key.as_str()))
            .map(|(key, _)| key.clone())
            .collect();

        for key in inferred {
            let meta = CategoryMeta::new(
                display_name_from_key(key.as_str()),
                infer_kind(key.as_str()),
            );
            debug!(category = %key, kind = %meta.kind, "inferred category metadata");
            categories.insert(key, meta);
        }
    }

    for key in categories.keys() {
        items.entry(key.clone()).or_default();
    }

    BudgetDocument {
        starting_balance: raw.starting_balance,
        categories,
        items,
    }
}

/// Whether a legacy key names an income list
pub fn infer_kind(key: &str) -> CategoryKind {
    if key.to_lowercase().contains("income") {
        CategoryKind::Income
    } else {
        CategoryKind::Expense
    }
}

fn display_name_from_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn parse_items(field: &str, entries: Vec<Value>) -> Vec<LineItem> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<LineItem>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(category = field, index, error = %e, "dropping unreadable line item");
                None
            }
        })
        .collect()
}
