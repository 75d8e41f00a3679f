//! Month list formatting

use crate::services::MonthRegistry;

/// Format the registered months, most recent first, marking the active one
pub fn format_month_list(registry: &MonthRegistry) -> String {
    if registry.is_empty() {
        return "No months found.".to_string();
    }

    let id_width = registry
        .months()
        .iter()
        .map(|m| m.as_str().len())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!("  {:<id_width$}  {}\n", "Month", "Date", id_width = id_width));
    output.push_str(&format!("  {:-<id_width$}  {:-<20}\n", "", "", id_width = id_width));

    for month in registry.months() {
        let marker = if registry.active() == Some(month) { "*" } else { " " };
        output.push_str(&format!(
            "{} {:<id_width$}  {}\n",
            marker,
            month.as_str(),
            month.long_name(),
            id_width = id_width
        ));
    }

    output
}
