//! The working session
//!
//! A [`Session`] owns everything one invocation works with: storage,
//! settings, the month registry and the active month's document. Document
//! edits go through the pure operations in [`crate::services::category`];
//! after each successful edit the whole document is saved and the change
//! is written to the audit log.

use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, warn};

use crate::audit::{generate_diff, EntityType};
use crate::config::paths::BudgetPaths;
use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{import_archive, read_archive, ImportResult};
use crate::models::{BudgetDocument, CategoryKey, CategoryKind, MonthId, Money};
use crate::services::category;
use crate::services::{
    average_for_item, compute_totals, HistoricalAverage, MonthRegistry, MonthService, Totals,
};
use crate::storage::Storage;

/// Shown once, the first time the tool runs
pub const WELCOME_MESSAGE: &str = "Welcome to Budget Planner! \
    A starter budget has been created for this month. \
    Edit it with `budget category` and `budget item`, \
    then use `budget month new` to carry it forward.";

pub struct Session {
    storage: Storage,
    settings: Settings,
    registry: MonthRegistry,
    active: MonthId,
    document: BudgetDocument,
}

impl Session {
    /// Open the data directory, creating the starter month on first run
    pub fn open(paths: BudgetPaths) -> BudgetResult<Self> {
        Self::open_at(paths, Local::now().date_naive())
    }

    /// Like [`Session::open`], with an explicit "today"
    pub fn open_at(paths: BudgetPaths, today: NaiveDate) -> BudgetResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let storage = Storage::new(paths)?;
        let mut registry = MonthRegistry::load(&storage, settings.month_order)?;

        if registry.is_empty() {
            MonthService::new(&storage).create_seed_month(&mut registry, today)?;
        }

        let active = registry
            .active()
            .cloned()
            .ok_or_else(|| BudgetError::Storage("No active month".into()))?;
        let document = storage.months.get(&active)?;
        debug!(month = %active, months = registry.len(), "session opened");

        Ok(Self {
            storage,
            settings,
            registry,
            active,
            document,
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &MonthRegistry {
        &self.registry
    }

    pub fn active_month(&self) -> &MonthId {
        &self.active
    }

    /// The active month's document as currently held in memory
    pub fn document(&self) -> &BudgetDocument {
        &self.document
    }

    pub fn totals(&self) -> Totals {
        compute_totals(&self.document)
    }

    /// Load any registered month without changing the active one
    pub fn month_document(&self, month: &MonthId) -> BudgetResult<BudgetDocument> {
        if month == &self.active {
            return Ok(self.document.clone());
        }
        MonthService::new(&self.storage).document(&self.registry, month)
    }

    /// Returns the welcome message the first time it is asked for
    pub fn take_welcome(&mut self) -> BudgetResult<Option<&'static str>> {
        let mut state = self.storage.state.load()?;
        if state.info_shown {
            return Ok(None);
        }
        state.info_shown = true;
        self.storage.state.save(&state)?;
        Ok(Some(WELCOME_MESSAGE))
    }

    // === Categories ===

    pub fn add_category(
        &mut self,
        display_name: &str,
        kind: CategoryKind,
    ) -> BudgetResult<CategoryKey> {
        let key = category::add_category(&mut self.document, display_name, kind)?;
        self.save()?;

        if let Some(meta) = self.document.category(key.as_str()) {
            self.storage.log_create(
                EntityType::Category,
                self.entity_id(key.as_str()),
                Some(meta.display_name.clone()),
                meta,
            );
        }
        Ok(key)
    }

    pub fn rename_category(&mut self, key: &str, new_display_name: &str) -> BudgetResult<()> {
        let before = self.document.category(key).cloned();
        category::rename_category(&mut self.document, key, new_display_name)?;
        self.save()?;

        if let (Some(before), Some(after)) = (before, self.document.category(key)) {
            self.storage.log_update(
                EntityType::Category,
                self.entity_id(key),
                Some(after.display_name.clone()),
                &before,
                after,
                generate_diff(&before, after),
            );
        }
        Ok(())
    }

    /// Delete a category; returns whether it existed
    pub fn delete_category(&mut self, key: &str) -> BudgetResult<bool> {
        let meta = self.document.category(key).cloned();
        let items = self.document.items_in(key).to_vec();
        if !category::delete_category(&mut self.document, key) {
            return Ok(false);
        }
        self.save()?;

        self.storage.log_delete(
            EntityType::Category,
            self.entity_id(key),
            meta.as_ref().map(|m| m.display_name.clone()),
            &serde_json::json!({ "meta": meta, "items": items }),
        );
        Ok(true)
    }

    // === Items ===

    pub fn add_item(&mut self, key: &str, name: &str, amount: Money) -> BudgetResult<usize> {
        let index = category::add_item(&mut self.document, key, name, amount)?;
        self.save()?;

        let item = &self.document.items_in(key)[index];
        self.storage.log_create(
            EntityType::LineItem,
            self.item_id(key, index),
            Some(item.name.clone()),
            item,
        );
        Ok(index)
    }

    pub fn rename_item(&mut self, key: &str, index: usize, new_name: &str) -> BudgetResult<()> {
        self.update_item(key, index, |doc| category::rename_item(doc, key, index, new_name))
    }

    pub fn update_item_amount(
        &mut self,
        key: &str,
        index: usize,
        amount: Money,
    ) -> BudgetResult<()> {
        self.update_item(key, index, |doc| {
            category::update_item_amount(doc, key, index, amount)
        })
    }

    pub fn set_item_date(
        &mut self,
        key: &str,
        index: usize,
        date: Option<&str>,
    ) -> BudgetResult<()> {
        self.update_item(key, index, |doc| category::set_item_date(doc, key, index, date))
    }

    pub fn delete_item(&mut self, key: &str, index: usize) -> BudgetResult<()> {
        let removed = category::delete_item(&mut self.document, key, index)?;
        self.save()?;

        self.storage.log_delete(
            EntityType::LineItem,
            self.item_id(key, index),
            Some(removed.name.clone()),
            &removed,
        );
        Ok(())
    }

    pub fn set_starting_balance(&mut self, amount: Money) -> BudgetResult<()> {
        let before = self.document.starting_balance;
        category::set_starting_balance(&mut self.document, amount);
        self.save()?;

        self.storage.log_update(
            EntityType::StartingBalance,
            self.active.as_str(),
            None,
            &before,
            &amount,
            generate_diff(&before, &amount),
        );
        Ok(())
    }

    /// Average of an item across every other month
    pub fn average_for_item(
        &self,
        key: &str,
        item_name: &str,
    ) -> BudgetResult<Option<HistoricalAverage>> {
        average_for_item(&self.storage, &self.registry, &self.active, key, item_name)
    }

    // === Months ===

    /// Create a month for `date` from the active month and switch to it
    pub fn new_month(&mut self, date: NaiveDate) -> BudgetResult<MonthId> {
        let template = self.active.clone();
        let month = MonthService::new(&self.storage).create_month(
            &mut self.registry,
            &template,
            date,
        )?;
        self.reload_active()?;
        Ok(month)
    }

    pub fn delete_month(&mut self, month: &MonthId) -> BudgetResult<()> {
        MonthService::new(&self.storage).delete_month(&mut self.registry, month)?;
        self.reload_active()
    }

    pub fn select_month(&mut self, month: &MonthId) -> BudgetResult<()> {
        MonthService::new(&self.storage).select_month(&mut self.registry, month)?;
        self.reload_active()
    }

    /// Replace all months with the contents of an export or backup file
    pub fn import_file(&mut self, path: &Path) -> BudgetResult<ImportResult> {
        let archive = read_archive(path)?;
        let result = import_archive(&self.storage, &self.settings, archive)?;

        self.registry = MonthRegistry::load(&self.storage, self.settings.month_order)?;
        self.reload_active()?;
        Ok(result)
    }

    fn update_item<F>(&mut self, key: &str, index: usize, edit: F) -> BudgetResult<()>
    where
        F: FnOnce(&mut BudgetDocument) -> BudgetResult<()>,
    {
        let before = self.document.items_in(key).get(index).cloned();
        edit(&mut self.document)?;
        self.save()?;

        if let (Some(before), Some(after)) = (before, self.document.items_in(key).get(index)) {
            self.storage.log_update(
                EntityType::LineItem,
                self.item_id(key, index),
                Some(after.name.clone()),
                &before,
                after,
                generate_diff(&before, after),
            );
        }
        Ok(())
    }

    fn reload_active(&mut self) -> BudgetResult<()> {
        let active = self
            .registry
            .active()
            .cloned()
            .ok_or_else(|| BudgetError::Storage("No active month".into()))?;
        self.document = self.storage.months.get(&active)?;
        self.active = active;
        Ok(())
    }

    // The edited document stays in memory even when the write fails
    fn save(&self) -> BudgetResult<()> {
        self.storage
            .months
            .save(&self.active, &self.document)
            .map_err(|e| {
                warn!(month = %self.active, error = %e, "failed to save budget document");
                match e {
                    BudgetError::Storage(_) => e,
                    other => BudgetError::Storage(other.to_string()),
                }
            })
    }

    fn entity_id(&self, key: &str) -> String {
        format!("{}/{}", self.active, key)
    }

    fn item_id(&self, key: &str, index: usize) -> String {
        format!("{}/{}#{}", self.active, key, index)
    }
}
