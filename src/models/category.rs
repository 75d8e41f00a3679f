//! Category keys and metadata
//!
//! A category is identified by a stable key slugged from the name the user
//! first gave it. Renaming only changes the display name.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable identifier for a category within a document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Derive a key from a display name
    ///
    /// Lowercases the trimmed name and replaces every character outside
    /// `[a-z0-9]` with an underscore ("Side Gigs" -> "side_gigs").
    pub fn from_display_name(name: &str) -> Self {
        let key = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Self(key)
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for CategoryKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for CategoryKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which section of the budget a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Display name and section for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

impl CategoryMeta {
    pub fn new(display_name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            display_name: display_name.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_display_name() {
        assert_eq!(CategoryKey::from_display_name("Side Gigs").as_str(), "side_gigs");
        assert_eq!(CategoryKey::from_display_name("  Utilities ").as_str(), "utilities");
        assert_eq!(CategoryKey::from_display_name("Car/Gas #2").as_str(), "car_gas__2");
        assert_eq!(CategoryKey::from_display_name("Café").as_str(), "caf_");
    }

    #[test]
    fn test_meta_wire_format() {
        let meta = CategoryMeta::new("Income Items", CategoryKind::Income);
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"displayName":"Income Items","type":"income"}"#);

        let parsed: CategoryMeta =
            serde_json::from_str(r#"{"displayName":"Utilities","type":"expense"}"#).unwrap();
        assert_eq!(parsed.kind, CategoryKind::Expense);
    }
}
