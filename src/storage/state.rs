//! Application state that survives between runs
//!
//! Holds which month is active and whether the one-time welcome message
//! has been shown.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BudgetResult;
use crate::models::MonthId;

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Month the user last selected
    #[serde(default)]
    pub active_month: Option<MonthId>,

    /// Whether the welcome message has been shown
    #[serde(default)]
    pub info_shown: bool,
}

/// Loads and saves [`AppState`]
pub struct StateRepository {
    path: PathBuf,
}

impl StateRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load state, defaulting when no state file exists yet
    pub fn load(&self) -> BudgetResult<AppState> {
        read_json(&self.path)
    }

    pub fn save(&self, state: &AppState) -> BudgetResult<()> {
        write_json_atomic(&self.path, state)
    }
}
