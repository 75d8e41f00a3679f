//! Service layer for Budget Planner
//!
//! Totals and category operations are pure functions over one document.
//! Month management and the historical average work against storage.

pub mod category;
pub mod history;
pub mod month;
pub mod totals;

pub use history::{average_for_item, HistoricalAverage};
pub use month::{MonthRegistry, MonthService};
pub use totals::{compute_totals, Totals};
