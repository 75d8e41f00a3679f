//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A whole month document
    Month,
    Category,
    LineItem,
    StartingBalance,
    /// A bulk import replacing every month
    Import,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Month => write!(f, "Month"),
            EntityType::Category => write!(f, "Category"),
            EntityType::LineItem => write!(f, "LineItem"),
            EntityType::StartingBalance => write!(f, "StartingBalance"),
            EntityType::Import => write!(f, "Import"),
        }
    }
}

/// A single audit log entry
///
/// `entity_id` is the month id for months, and `<month>/<category>` or
/// `<month>/<category>#<index>` for things inside a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub entity_type: EntityType,

    pub entity_id: String,

    /// Human-readable name (category display name, item name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// Entry for a newly created entity
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Create, entity_type, entity_id.into(), entity_name);
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    /// Entry for a changed entity, with an optional summary of what changed
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        let mut entry = Self::new(Operation::Update, entity_type, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        entry.diff_summary = diff_summary;
        entry
    }

    /// Entry for a removed entity
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Delete, entity_type, entity_id.into(), entity_name);
        entry.before = serde_json::to_value(entity).ok();
        entry
    }

    /// One or two lines for terminal output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(
            EntityType::Category,
            "1.5.25/side_gigs",
            Some("Side Gigs".to_string()),
            &json!({"displayName": "Side Gigs", "type": "income"}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert_eq!(entry.after.unwrap()["type"], "income");
    }

    #[test]
    fn test_update_and_delete_entries() {
        let before = json!({"name": "Coffee", "amount": 200});
        let after = json!({"name": "Coffee", "amount": 250});

        let update = AuditEntry::update(
            EntityType::LineItem,
            "1.5.25/monthly#1",
            Some("Coffee".to_string()),
            &before,
            &after,
            Some("amount: 200 -> 250".to_string()),
        );
        assert_eq!(update.operation, Operation::Update);
        assert!(update.before.is_some() && update.after.is_some());

        let delete = AuditEntry::delete(EntityType::LineItem, "1.5.25/monthly#1", None, &after);
        assert!(delete.before.is_some());
        assert!(delete.after.is_none());
    }

    #[test]
    fn test_entity_type_wire_name() {
        let json = serde_json::to_string(&EntityType::StartingBalance).unwrap();
        assert_eq!(json, "\"starting_balance\"");
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            EntityType::Category,
            "1.5.25/utils",
            Some("Bills".to_string()),
            &json!({"displayName": "Utilities"}),
            &json!({"displayName": "Bills"}),
            Some("displayName: \"Utilities\" -> \"Bills\"".to_string()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE Category 1.5.25/utils (Bills)"));
        assert!(formatted.contains("Changes: displayName"));
    }
}
