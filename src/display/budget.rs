//! Budget display formatting
//!
//! Renders one month as plain text: income and expense sections with their
//! categories, uncategorized lists, and the totals summary.

use crate::models::{BudgetDocument, CategoryKind, LineItem, MonthId, Money};
use crate::services::{HistoricalAverage, Totals};

/// Options for [`format_budget`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetView<'a> {
    pub currency_symbol: &'a str,
    /// Leave out items whose amount is zero
    pub hide_zeros: bool,
    /// Show only this section; uncategorized lists are left out too
    pub section: Option<CategoryKind>,
}

/// Format a month's budget
///
/// Items are listed by name, each tagged with its stored index, which is
/// what the item commands take.
pub fn format_budget(
    month: &MonthId,
    document: &BudgetDocument,
    totals: &Totals,
    view: BudgetView<'_>,
) -> String {
    let symbol = view.currency_symbol;
    let mut output = String::new();

    output.push_str(&format!("Budget for {} ({})\n", month.long_name(), month));
    output.push_str(&format!("{}\n", "=".repeat(50)));
    output.push_str(&format!(
        "Starting balance: {}\n",
        document.starting_balance.format_grouped(symbol)
    ));

    for (title, kind, section_total) in [
        ("INCOME", CategoryKind::Income, totals.income_total),
        ("EXPENSES", CategoryKind::Expense, totals.expense_total),
    ] {
        if view.section.is_some_and(|only| only != kind) {
            continue;
        }

        output.push('\n');
        output.push_str(&format!(
            "{:<36}{:>14}\n",
            title,
            section_total.format_grouped(symbol)
        ));

        let categories = document.categories_of_kind(kind);
        if categories.is_empty() {
            output.push_str("  (no categories)\n");
        }
        for (key, meta) in categories {
            output.push_str(&format_category_header(
                &meta.display_name,
                key.as_str(),
                totals.category(key.as_str()),
                symbol,
            ));
            output.push_str(&format_items(
                document.items_in(key.as_str()),
                symbol,
                view.hide_zeros,
            ));
        }
    }

    let orphans = document.orphaned_keys();
    if view.section.is_none() && !orphans.is_empty() {
        output.push_str("\nUNCATEGORIZED (not counted in totals)\n");
        for key in orphans {
            output.push_str(&format_category_header(
                key.as_str(),
                key.as_str(),
                totals.category(key.as_str()),
                symbol,
            ));
            output.push_str(&format_items(
                document.items_in(key.as_str()),
                symbol,
                view.hide_zeros,
            ));
        }
    }

    output.push('\n');
    output.push_str(&format_totals(document, totals, symbol));
    output
}

fn format_category_header(name: &str, key: &str, total: Money, symbol: &str) -> String {
    let label = format!("  {} [{}]", name, key);
    format!("{:<36}{:>14}\n", label, total.format_grouped(symbol))
}

fn format_items(items: &[LineItem], symbol: &str, hide_zeros: bool) -> String {
    let mut rows: Vec<(usize, &LineItem)> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| !(hide_zeros && item.amount.is_zero()))
        .collect();
    rows.sort_by(|(_, a), (_, b)| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let mut output = String::new();
    for (index, item) in rows {
        let label = format!("    {:>2}. {}", index, item.name);
        output.push_str(&format!(
            "{:<36}{:>14}",
            label,
            item.amount.format_grouped(symbol)
        ));
        if let Some(date) = &item.date {
            output.push_str(&format!("  {}", date));
        }
        output.push('\n');
    }
    output
}

/// Format the totals summary
pub fn format_totals(document: &BudgetDocument, totals: &Totals, symbol: &str) -> String {
    let mut output = String::new();
    let rows = [
        ("Starting balance", document.starting_balance),
        ("Total income", totals.income_total),
        ("Total expenses", totals.expense_total),
    ];
    for (label, amount) in rows {
        output.push_str(&format!("{:<20}{:>16}\n", label, amount.format_grouped(symbol)));
    }
    output.push_str(&format!("{:-<36}\n", ""));
    output.push_str(&format!(
        "{:<20}{:>16}",
        "Ending balance",
        totals.ending_balance.format_grouped(symbol)
    ));
    if totals.is_overdrawn() {
        output.push_str("  (overdrawn)");
    }
    output.push('\n');
    output
}

/// Describe the historical average for an item
pub fn format_average(
    item_name: &str,
    average: Option<&HistoricalAverage>,
    symbol: &str,
) -> String {
    match average {
        Some(avg) => format!(
            "{}: average from {} previous month{}: {}",
            item_name,
            avg.sample_count,
            if avg.sample_count == 1 { "" } else { "s" },
            avg.average.format_grouped(symbol)
        ),
        None => format!("{}: no amounts in other months", item_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::compute_totals;
    use crate::storage::seed_document;

    fn render(document: &BudgetDocument, hide_zeros: bool) -> String {
        render_view(
            document,
            BudgetView {
                currency_symbol: "$",
                hide_zeros,
                section: None,
            },
        )
    }

    fn render_view(document: &BudgetDocument, view: BudgetView<'_>) -> String {
        let month = MonthId::parse("1.5.25").unwrap();
        let totals = compute_totals(document);
        format_budget(&month, document, &totals, view)
    }

    #[test]
    fn test_seed_budget_view() {
        let output = render(&seed_document(), false);

        assert!(output.starts_with("Budget for January 5, 2025 (1.5.25)"));
        assert!(output.contains("Starting balance: $18,000.00"));
        assert!(output.contains("Credit Cards [credit]"));
        assert!(output.contains("$7,818.29"));
        assert!(output.contains("UNCATEGORIZED"));
        assert!(output.contains("House Insurance"));
    }

    #[test]
    fn test_items_sorted_by_name_with_stored_index() {
        let output = render(&seed_document(), false);
        let amex = output.find(" 1. Amex").unwrap();
        let chase = output.find(" 0. Chase").unwrap();
        let fidelity = output.find(" 2. Fidelity").unwrap();
        assert!(amex < chase && chase < fidelity);
    }

    #[test]
    fn test_hide_zeros() {
        let mut doc = seed_document();
        doc.items.get_mut("utils").unwrap()[1].amount = Money::zero();

        assert!(render(&doc, false).contains("Fios"));
        assert!(!render(&doc, true).contains("Fios"));
    }

    #[test]
    fn test_single_section() {
        let income_only = render_view(
            &seed_document(),
            BudgetView {
                currency_symbol: "$",
                hide_zeros: false,
                section: Some(CategoryKind::Income),
            },
        );
        assert!(income_only.contains("INCOME"));
        assert!(income_only.contains("Monthly Income"));
        assert!(!income_only.contains("EXPENSES"));
        assert!(!income_only.contains("Chase"));
        assert!(!income_only.contains("UNCATEGORIZED"));
        assert!(income_only.contains("Ending balance"));

        let expenses_only = render_view(
            &seed_document(),
            BudgetView {
                currency_symbol: "$",
                hide_zeros: false,
                section: Some(CategoryKind::Expense),
            },
        );
        assert!(expenses_only.contains("Credit Cards [credit]"));
        assert!(!expenses_only.contains("Income Items"));
    }

    #[test]
    fn test_overdrawn_marker() {
        let mut doc = seed_document();
        doc.starting_balance = Money::zero();
        let totals = compute_totals(&doc);

        let output = format_totals(&doc, &totals, "$");
        assert!(output.contains("Ending balance"));
        assert!(output.contains("-$2,521.29  (overdrawn)"));
    }

    #[test]
    fn test_format_average() {
        let avg = HistoricalAverage {
            average: Money::from_cents(15000),
            sample_count: 2,
        };
        assert_eq!(
            format_average("Coffee", Some(&avg), "$"),
            "Coffee: average from 2 previous months: $150.00"
        );
        assert_eq!(
            format_average("Coffee", None, "$"),
            "Coffee: no amounts in other months"
        );
    }
}
