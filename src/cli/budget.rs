//! Budget view CLI commands: show, totals, balance and average

use clap::ValueEnum;

use crate::display::{format_average, format_budget, format_totals, BudgetView};
use crate::error::BudgetResult;
use crate::models::{CategoryKind, Money, MonthId};
use crate::services::compute_totals;
use crate::session::Session;

/// Budget section filter for `budget show`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Income,
    Expense,
}

impl From<Section> for CategoryKind {
    fn from(section: Section) -> Self {
        match section {
            Section::Income => CategoryKind::Income,
            Section::Expense => CategoryKind::Expense,
        }
    }
}

/// Print a month's budget (the active month unless one is given)
pub fn show_budget(
    session: &Session,
    month: Option<MonthId>,
    hide_zeros: bool,
    section: Option<Section>,
) -> BudgetResult<()> {
    let month = month.unwrap_or_else(|| session.active_month().clone());
    let document = session.month_document(&month)?;
    let totals = compute_totals(&document);

    let view = BudgetView {
        currency_symbol: &session.settings().currency_symbol,
        hide_zeros,
        section: section.map(CategoryKind::from),
    };
    print!("{}", format_budget(&month, &document, &totals, view));
    Ok(())
}

/// Print the active month's totals
pub fn show_totals(session: &Session) -> BudgetResult<()> {
    let symbol = &session.settings().currency_symbol;
    let totals = session.totals();

    println!("{} ({})", session.active_month().long_name(), session.active_month());
    for (key, meta) in &session.document().categories {
        println!(
            "  {:<30}{:>14}",
            format!("{} [{}]", meta.display_name, key),
            totals.category(key.as_str()).format_grouped(symbol)
        );
    }
    println!();
    print!("{}", format_totals(session.document(), &totals, symbol));
    Ok(())
}

/// Set the active month's starting balance
pub fn set_balance(session: &mut Session, amount: &str) -> BudgetResult<()> {
    let amount = Money::parse_lenient(amount);
    session.set_starting_balance(amount)?;

    let symbol = &session.settings().currency_symbol;
    println!("Starting balance: {}", amount.format_grouped(symbol));
    println!("Ending balance:   {}", session.totals().ending_balance.format_grouped(symbol));
    Ok(())
}

/// Print an item's average over the other months
pub fn show_average(session: &Session, category: &str, item_name: &str) -> BudgetResult<()> {
    let average = session.average_for_item(category, item_name)?;
    println!(
        "{}",
        format_average(item_name, average.as_ref(), &session.settings().currency_symbol)
    );
    Ok(())
}
