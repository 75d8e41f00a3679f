//! Terminal output formatting
//!
//! Every formatter returns a `String`; printing is left to the CLI.

pub mod budget;
pub mod month;

pub use budget::{format_average, format_budget, format_totals, BudgetView};
pub use month::format_month_list;
