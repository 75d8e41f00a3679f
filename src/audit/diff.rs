//! Change summaries for audit entries

use serde::Serialize;
use serde_json::Value;

const MAX_STRING_LEN: usize = 40;

/// Summarize the top-level fields that differ between two states
///
/// Returns `None` when nothing changed.
pub fn generate_diff<T: Serialize>(before: &T, after: &T) -> Option<String> {
    let before = serde_json::to_value(before).ok()?;
    let after = serde_json::to_value(after).ok()?;

    let changes = match (&before, &after) {
        (Value::Object(old), Value::Object(new)) => {
            let mut changes: Vec<String> = old
                .iter()
                .filter(|(key, value)| new.get(*key) != Some(value))
                .map(|(key, value)| {
                    let updated = new
                        .get(key)
                        .map_or_else(|| "(removed)".to_string(), format_value);
                    format!("{}: {} -> {}", key, format_value(value), updated)
                })
                .collect();
            changes.extend(
                new.iter()
                    .filter(|(key, _)| !old.contains_key(*key))
                    .map(|(key, value)| format!("{}: (added) -> {}", key, format_value(value))),
            );
            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(&before),
            format_value(&after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_LEN => {
            let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
