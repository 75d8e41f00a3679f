//! CSV export of one month's line items

use std::io::Write;

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::BudgetDocument;

#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    category: &'a str,
    category_name: &'a str,
    section: &'a str,
    item: &'a str,
    amount: String,
    date: &'a str,
}

/// Write every line item of a document as one CSV row
///
/// Rows follow category key order, then item position. Lists without
/// metadata are written with section `uncategorized`.
pub fn export_items_csv<W: Write>(document: &BudgetDocument, writer: W) -> BudgetResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for (key, items) in &document.items {
        let meta = document.category(key.as_str());
        let category_name = meta.map_or(key.as_str(), |m| m.display_name.as_str());
        let section = match meta {
            Some(m) if m.kind.is_income() => "income",
            Some(_) => "expense",
            None => "uncategorized",
        };

        for item in items {
            csv_writer
                .serialize(ItemRow {
                    category: key.as_str(),
                    category_name,
                    section,
                    item: &item.name,
                    amount: item.amount.format_with_symbol(""),
                    date: item.date.as_deref().unwrap_or(""),
                })
                .map_err(|e| BudgetError::Export(e.to_string()))?;
            rows += 1;
        }
    }

    csv_writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(rows)
}
