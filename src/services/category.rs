//! Category and line item operations
//!
//! Each operation validates before it touches the document, so a failed
//! call leaves the document exactly as it was. Persisting the result is the
//! caller's job (see [`crate::session::Session`]).

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetDocument, CategoryKey, CategoryKind, CategoryMeta, LineItem, Money};

/// Add a category, returning its derived key
///
/// An orphaned item list under the same key is replaced by an empty list.
pub fn add_category(
    document: &mut BudgetDocument,
    display_name: &str,
    kind: CategoryKind,
) -> BudgetResult<CategoryKey> {
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(BudgetError::Validation(
            "Category name cannot be empty".into(),
        ));
    }

    let key = CategoryKey::from_display_name(display_name);
    if document.categories.contains_key(key.as_str()) && document.items.contains_key(key.as_str()) {
        return Err(BudgetError::duplicate_category(key.as_str()));
    }

    document
        .categories
        .insert(key.clone(), CategoryMeta::new(display_name, kind));
    document.items.insert(key.clone(), Vec::new());
    Ok(key)
}

/// Change a category's display name; its key never changes
pub fn rename_category(
    document: &mut BudgetDocument,
    key: &str,
    new_display_name: &str,
) -> BudgetResult<()> {
    let new_display_name = new_display_name.trim();
    if new_display_name.is_empty() {
        return Err(BudgetError::Validation(
            "Category name cannot be empty".into(),
        ));
    }

    let meta = document
        .categories
        .get_mut(key)
        .ok_or_else(|| BudgetError::UnknownCategory(key.to_string()))?;
    meta.display_name = new_display_name.to_string();
    Ok(())
}

/// Remove a category's metadata and items
///
/// Returns whether anything was removed. Deleting an absent key is a no-op.
pub fn delete_category(document: &mut BudgetDocument, key: &str) -> bool {
    let had_meta = document.categories.remove(key).is_some();
    let had_items = document.items.remove(key).is_some();
    had_meta || had_items
}

/// Append an item, returning its index
pub fn add_item(
    document: &mut BudgetDocument,
    key: &str,
    name: &str,
    amount: Money,
) -> BudgetResult<usize> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BudgetError::Validation("Item name cannot be empty".into()));
    }

    if !document.categories.contains_key(key) && !document.items.contains_key(key) {
        return Err(BudgetError::UnknownCategory(key.to_string()));
    }

    let items = document.items.entry(CategoryKey::from(key)).or_default();
    items.push(LineItem::new(name, amount));
    Ok(items.len() - 1)
}

/// Rename the item at `index`
pub fn rename_item(
    document: &mut BudgetDocument,
    key: &str,
    index: usize,
    new_name: &str,
) -> BudgetResult<()> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(BudgetError::Validation("Item name cannot be empty".into()));
    }

    item_mut(document, key, index)?.name = new_name.to_string();
    Ok(())
}

/// Remove the item at `index`, returning it
///
/// Later items shift down by one.
pub fn delete_item(
    document: &mut BudgetDocument,
    key: &str,
    index: usize,
) -> BudgetResult<LineItem> {
    let items = items_mut(document, key)?;
    if index >= items.len() {
        return Err(BudgetError::index_out_of_range(key, index, items.len()));
    }
    Ok(items.remove(index))
}

/// Set the amount of the item at `index`
pub fn update_item_amount(
    document: &mut BudgetDocument,
    key: &str,
    index: usize,
    amount: Money,
) -> BudgetResult<()> {
    item_mut(document, key, index)?.amount = amount;
    Ok(())
}

/// Set or clear the date of the item at `index`
pub fn set_item_date(
    document: &mut BudgetDocument,
    key: &str,
    index: usize,
    date: Option<&str>,
) -> BudgetResult<()> {
    let date = date.map(str::trim).filter(|d| !d.is_empty());
    item_mut(document, key, index)?.date = date.map(str::to_string);
    Ok(())
}

pub fn set_starting_balance(document: &mut BudgetDocument, amount: Money) {
    document.starting_balance = amount;
}

fn items_mut<'d>(
    document: &'d mut BudgetDocument,
    key: &str,
) -> BudgetResult<&'d mut Vec<LineItem>> {
    if let Some(items) = document.items.get_mut(key) {
        return Ok(items);
    }
    if document.categories.contains_key(key) {
        // Metadata without a list behaves like an empty list
        return Err(BudgetError::index_out_of_range(key, 0, 0));
    }
    Err(BudgetError::UnknownCategory(key.to_string()))
}

fn item_mut<'d>(
    document: &'d mut BudgetDocument,
    key: &str,
    index: usize,
) -> BudgetResult<&'d mut LineItem> {
    let items = items_mut(document, key)?;
    let len = items.len();
    items
        .get_mut(index)
        .ok_or_else(|| BudgetError::index_out_of_range(key, index, len))
}
