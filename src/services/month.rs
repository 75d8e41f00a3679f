//! Month service
//!
//! Keeps the registry of known months and which one is active, and creates,
//! deletes and selects months. Every change is persisted immediately.

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetDocument, MonthId, MonthOrder, Money};
use crate::storage::{seed_document, Storage};

/// Known months, most recent first, and the active one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthRegistry {
    months: Vec<MonthId>,
    active: Option<MonthId>,
    order: MonthOrder,
}

impl MonthRegistry {
    /// Build a registry from an unordered list of months
    ///
    /// A preferred active month that is not in the list is ignored and the
    /// first month in display order is used instead.
    pub fn new(mut months: Vec<MonthId>, preferred: Option<MonthId>, order: MonthOrder) -> Self {
        order.sort(&mut months);
        months.dedup();
        let active = preferred
            .filter(|id| months.contains(id))
            .or_else(|| months.first().cloned());
        Self {
            months,
            active,
            order,
        }
    }

    /// Load the registry from storage
    pub fn load(storage: &Storage, order: MonthOrder) -> BudgetResult<Self> {
        let months = storage.months.list()?;
        let state = storage.state.load()?;
        Ok(Self::new(months, state.active_month, order))
    }

    /// Months in display order
    pub fn months(&self) -> &[MonthId] {
        &self.months
    }

    pub fn active(&self) -> Option<&MonthId> {
        self.active.as_ref()
    }

    pub fn contains(&self, id: &MonthId) -> bool {
        self.months.contains(id)
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn order(&self) -> MonthOrder {
        self.order
    }

    fn insert(&mut self, id: MonthId) {
        if !self.contains(&id) {
            self.months.push(id);
            self.order.sort(&mut self.months);
        }
    }

    fn remove(&mut self, id: &MonthId) {
        self.months.retain(|m| m != id);
        if self.active.as_ref() == Some(id) {
            self.active = self.months.first().cloned();
        }
    }
}

/// Service for month management
pub struct MonthService<'a> {
    storage: &'a Storage,
}

impl<'a> MonthService<'a> {
    /// Create a new month service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create the first month from the built-in starter budget
    pub fn create_seed_month(
        &self,
        registry: &mut MonthRegistry,
        today: NaiveDate,
    ) -> BudgetResult<MonthId> {
        let id = MonthId::from_date(today);
        if registry.contains(&id) || self.storage.months.exists(&id) {
            return Err(BudgetError::DuplicateMonth(id.to_string()));
        }

        let document = seed_document();
        self.storage.months.save(&id, &document)?;
        registry.insert(id.clone());
        self.activate(registry, &id)?;

        self.storage
            .log_create(EntityType::Month, id.as_str(), Some(id.long_name()), &document);
        info!(month = %id, "created starter month");

        Ok(id)
    }

    /// Create a month for `date` by copying `template`
    ///
    /// The copy keeps every category and item but starts from a zero
    /// balance.
    pub fn create_month(
        &self,
        registry: &mut MonthRegistry,
        template: &MonthId,
        date: NaiveDate,
    ) -> BudgetResult<MonthId> {
        let id = MonthId::from_date(date);
        if registry.contains(&id) {
            return Err(BudgetError::DuplicateMonth(id.to_string()));
        }
        if !registry.contains(template) {
            return Err(BudgetError::UnknownMonth(template.to_string()));
        }

        let mut document = self.storage.months.get(template)?;
        document.starting_balance = Money::zero();

        self.storage.months.save(&id, &document)?;
        registry.insert(id.clone());
        self.activate(registry, &id)?;

        self.storage
            .log_create(EntityType::Month, id.as_str(), Some(id.long_name()), &document);
        info!(month = %id, template = %template, "created month from template");

        Ok(id)
    }

    /// Delete a month; the registry always keeps at least one
    pub fn delete_month(&self, registry: &mut MonthRegistry, id: &MonthId) -> BudgetResult<()> {
        if !registry.contains(id) {
            return Err(BudgetError::UnknownMonth(id.to_string()));
        }
        if registry.len() <= 1 {
            return Err(BudgetError::LastMonthUndeletable);
        }

        let before = self.storage.months.load(id)?.unwrap_or_default();
        self.storage.months.delete(id)?;

        let was_active = registry.active() == Some(id);
        registry.remove(id);
        if was_active {
            if let Some(next) = registry.active().cloned() {
                self.activate(registry, &next)?;
            }
        }

        self.storage
            .log_delete(EntityType::Month, id.as_str(), Some(id.long_name()), &before);
        info!(month = %id, "deleted month");

        Ok(())
    }

    /// Make `id` the active month
    pub fn select_month(&self, registry: &mut MonthRegistry, id: &MonthId) -> BudgetResult<()> {
        if !registry.contains(id) {
            return Err(BudgetError::UnknownMonth(id.to_string()));
        }
        self.activate(registry, id)
    }

    /// Load the document for a registered month
    pub fn document(&self, registry: &MonthRegistry, id: &MonthId) -> BudgetResult<BudgetDocument> {
        if !registry.contains(id) {
            return Err(BudgetError::UnknownMonth(id.to_string()));
        }
        self.storage.months.get(id)
    }

    fn activate(&self, registry: &mut MonthRegistry, id: &MonthId) -> BudgetResult<()> {
        registry.active = Some(id.clone());

        let mut state = self.storage.state.load()?;
        if state.active_month.as_ref() != Some(id) {
            state.active_month = Some(id.clone());
            self.storage.state.save(&state)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn id(s: &str) -> MonthId {
        MonthId::parse(s).unwrap()
    }

    #[test]
    fn test_create_seed_month() {
        let (_temp, storage) = create_test_storage();
        let service = MonthService::new(&storage);
        let mut registry = MonthRegistry::load(&storage, MonthOrder::default()).unwrap();
        assert!(registry.is_empty());

        let month = service.create_seed_month(&mut registry, date(2025, 1, 5)).unwrap();

        assert_eq!(month, id("1.5.25"));
        assert_eq!(registry.active(), Some(&month));
        assert_eq!(storage.months.get(&month).unwrap(), seed_document());
        assert_eq!(storage.state.load().unwrap().active_month, Some(month));

        assert!(matches!(
            service.create_seed_month(&mut registry, date(2025, 1, 5)),
            Err(BudgetError::DuplicateMonth(_))
        ));
    }

    #[test]
    fn test_create_month_from_template() {
        let (_temp, storage) = create_test_storage();
        let service = MonthService::new(&storage);
        let mut registry = MonthRegistry::load(&storage, MonthOrder::default()).unwrap();
        let first = service.create_seed_month(&mut registry, date(2025, 1, 5)).unwrap();

        let second = service
            .create_month(&mut registry, &first, date(2025, 2, 5))
            .unwrap();

        let template = storage.months.get(&first).unwrap();
        let copy = storage.months.get(&second).unwrap();
        assert!(copy.starting_balance.is_zero());
        assert_eq!(copy.categories, template.categories);
        assert_eq!(copy.items, template.items);
        assert_eq!(registry.active(), Some(&second));
        assert_eq!(registry.months(), &[second.clone(), first.clone()]);
    }

    #[test]
    fn test_create_month_errors() {
        let (_temp, storage) = create_test_storage();
        let service = MonthService::new(&storage);
        let mut registry = MonthRegistry::load(&storage, MonthOrder::default()).unwrap();
        let first = service.create_seed_month(&mut registry, date(2025, 1, 5)).unwrap();

        assert!(matches!(
            service.create_month(&mut registry, &first, date(2025, 1, 5)),
            Err(BudgetError::DuplicateMonth(_))
        ));
        assert!(matches!(
            service.create_month(&mut registry, &id("9.9.24"), date(2025, 3, 1)),
            Err(BudgetError::UnknownMonth(_))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_delete_last_month_is_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = MonthService::new(&storage);
        let mut registry = MonthRegistry::load(&storage, MonthOrder::default()).unwrap();
        let only = service.create_seed_month(&mut registry, date(2025, 1, 5)).unwrap();

        assert!(matches!(
            service.delete_month(&mut registry, &only),
            Err(BudgetError::LastMonthUndeletable)
        ));
        assert_eq!(registry.len(), 1);
        assert!(storage.months.exists(&only));
    }

    #[test]
    fn test_delete_active_month_falls_back_to_first() {
        let (_temp, storage) = create_test_storage();
        let service = MonthService::new(&storage);
        let mut registry = MonthRegistry::load(&storage, MonthOrder::default()).unwrap();
        let jan = service.create_seed_month(&mut registry, date(2025, 1, 5)).unwrap();
        let feb = service.create_month(&mut registry, &jan, date(2025, 2, 5)).unwrap();
        let mar = service.create_month(&mut registry, &feb, date(2025, 3, 5)).unwrap();

        service.select_month(&mut registry, &feb).unwrap();
        service.delete_month(&mut registry, &feb).unwrap();

        assert_eq!(registry.active(), Some(&mar));
        assert_eq!(storage.state.load().unwrap().active_month, Some(mar));
        assert!(!storage.months.exists(&feb));

        assert!(matches!(
            service.delete_month(&mut registry, &feb),
            Err(BudgetError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_delete_inactive_month_keeps_selection() {
        let (_temp, storage) = create_test_storage();
        let service = MonthService::new(&storage);
        let mut registry = MonthRegistry::load(&storage, MonthOrder::default()).unwrap();
        let jan = service.create_seed_month(&mut registry, date(2025, 1, 5)).unwrap();
        let feb = service.create_month(&mut registry, &jan, date(2025, 2, 5)).unwrap();

        service.delete_month(&mut registry, &jan).unwrap();
        assert_eq!(registry.active(), Some(&feb));
    }

    #[test]
    fn test_select_unknown_month() {
        let (_temp, storage) = create_test_storage();
        let service = MonthService::new(&storage);
        let mut registry = MonthRegistry::load(&storage, MonthOrder::default()).unwrap();
        service.create_seed_month(&mut registry, date(2025, 1, 5)).unwrap();

        assert!(matches!(
            service.select_month(&mut registry, &id("2.2.22")),
            Err(BudgetError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_registry_ordering() {
        let months = vec![id("9.1.25"), id("10.1.25"), id("12.1.24")];

        let lexicographic = MonthRegistry::new(months.clone(), None, MonthOrder::Lexicographic);
        assert_eq!(
            lexicographic.months(),
            &[id("9.1.25"), id("12.1.24"), id("10.1.25")]
        );
        assert_eq!(lexicographic.active(), Some(&id("9.1.25")));

        let chronological =
            MonthRegistry::new(months, Some(id("12.1.24")), MonthOrder::Chronological);
        assert_eq!(
            chronological.months(),
            &[id("10.1.25"), id("9.1.25"), id("12.1.24")]
        );
        assert_eq!(chronological.active(), Some(&id("12.1.24")));
    }

    #[test]
    fn test_stale_active_month_is_replaced() {
        let registry =
            MonthRegistry::new(vec![id("1.5.25")], Some(id("3.3.23")), MonthOrder::default());
        assert_eq!(registry.active(), Some(&id("1.5.25")));
    }
}
