//! The per-month budget document
//!
//! On disk a document is a flat JSON object: `startingBalance`,
//! `customCategories`, and one top-level array of line items per category
//! key. Loading goes through [`RawDocument`] so that legacy documents are
//! upgraded exactly once, at deserialization time.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::category::{CategoryKey, CategoryKind, CategoryMeta};
use super::migrate;
use super::money::Money;

pub(crate) const STARTING_BALANCE_FIELD: &str = "startingBalance";
pub(crate) const CATEGORIES_FIELD: &str = "customCategories";

/// A named amount within a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub amount: Money,

    /// Optional free-form date attached to the item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            amount,
            date: None,
        }
    }
}

/// One month of budget data
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawDocument")]
pub struct BudgetDocument {
    /// Balance at the start of the period
    pub starting_balance: Money,

    /// Category metadata by key
    pub categories: BTreeMap<CategoryKey, CategoryMeta>,

    /// Line items by category key
    pub items: BTreeMap<CategoryKey, Vec<LineItem>>,
}

impl BudgetDocument {
    /// Create an empty document with the given starting balance
    pub fn new(starting_balance: Money) -> Self {
        Self {
            starting_balance,
            ..Default::default()
        }
    }

    /// Metadata for a category, if it has any
    pub fn category(&self, key: &str) -> Option<&CategoryMeta> {
        self.categories.get(key)
    }

    /// Items in a category (empty if the category has no list)
    pub fn items_in(&self, key: &str) -> &[LineItem] {
        self.items.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Categories of one section, sorted by display name
    pub fn categories_of_kind(&self, kind: CategoryKind) -> Vec<(&CategoryKey, &CategoryMeta)> {
        let mut list: Vec<_> = self
            .categories
            .iter()
            .filter(|(_, meta)| meta.kind == kind)
            .collect();
        list.sort_by_key(|(_, meta)| meta.display_name.to_lowercase());
        list
    }

    /// Keys with item data but no metadata
    ///
    /// These are kept and shown, but excluded from section totals.
    pub fn orphaned_keys(&self) -> Vec<&CategoryKey> {
        self.items
            .keys()
            .filter(|key| !self.categories.contains_key(key.as_str()))
            .collect()
    }

    /// Number of line items across all categories
    pub fn item_count(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }
}

impl Serialize for BudgetDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.items.len() + 2))?;
        map.serialize_entry(STARTING_BALANCE_FIELD, &self.starting_balance)?;
        map.serialize_entry(CATEGORIES_FIELD, &self.categories)?;
        for (key, items) in &self.items {
            if key.as_str() == STARTING_BALANCE_FIELD || key.as_str() == CATEGORIES_FIELD {
                continue;
            }
            map.serialize_entry(key.as_str(), items)?;
        }
        map.end()
    }
}

/// Document as it appears on disk, before migration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    #[serde(rename = "startingBalance", default)]
    pub starting_balance: Money,

    /// Absent in documents written before categories were user-defined
    #[serde(rename = "customCategories", default)]
    pub custom_categories: Option<BTreeMap<CategoryKey, CategoryMeta>>,

    /// Every other top-level field; arrays are item lists
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl From<RawDocument> for BudgetDocument {
    fn from(raw: RawDocument) -> Self {
        migrate::upgrade(raw)
    }
}
