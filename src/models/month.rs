//! Month identifiers and registry ordering
//!
//! A month is named by the calendar date it was created for, written
//! `M.D.YY` without leading zeros on month or day ("1.5.25").

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Identifier of one budget period
///
/// Ordering is plain string ordering, which is what the registry uses by
/// default. It is not chronological ("12.1.24" > "10.1.25").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthId(String);

impl MonthId {
    /// Build the identifier for a calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self(format!(
            "{}.{}.{:02}",
            date.month(),
            date.day(),
            date.year().rem_euclid(100)
        ))
    }

    /// Parse and validate an identifier
    pub fn parse(s: &str) -> Result<Self, MonthIdError> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(MonthIdError::InvalidFormat(s.to_string()));
        }

        let numeric = |p: &str| {
            !p.is_empty() && p.len() <= 2 && p.chars().all(|c| c.is_ascii_digit())
        };
        // Month and day never carry a leading zero: "01.05.25" would alias "1.5.25"
        let unpadded = |p: &str| numeric(p) && !(p.len() > 1 && p.starts_with('0'));
        if !unpadded(parts[0])
            || !unpadded(parts[1])
            || parts[2].len() != 2
            || !numeric(parts[2])
        {
            return Err(MonthIdError::InvalidFormat(s.to_string()));
        }

        let month: u32 = parts[0]
            .parse()
            .map_err(|_| MonthIdError::InvalidFormat(s.to_string()))?;
        let day: u32 = parts[1]
            .parse()
            .map_err(|_| MonthIdError::InvalidFormat(s.to_string()))?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(MonthIdError::InvalidFormat(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar date this identifier names, assuming years 2000-2099
    pub fn date(&self) -> Option<NaiveDate> {
        let mut parts = self.0.split('.').map(|p| p.parse::<u32>().ok());
        let month = parts.next()??;
        let day = parts.next()??;
        let year = parts.next()??;
        NaiveDate::from_ymd_opt(2000 + year as i32, month, day)
    }

    /// Long form for display ("January 5, 2025")
    pub fn long_name(&self) -> String {
        let mut parts = self.0.split('.').map(|p| p.parse::<u32>().ok());
        match (parts.next().flatten(), parts.next().flatten(), parts.next().flatten()) {
            (Some(month @ 1..=12), Some(day), Some(year)) => format!(
                "{} {}, {}",
                MONTH_NAMES[(month - 1) as usize],
                day,
                2000 + year
            ),
            _ => self.0.clone(),
        }
    }
}

impl FromStr for MonthId {
    type Err = MonthIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthId {
    type Error = MonthIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<MonthId> for String {
    fn from(id: MonthId) -> Self {
        id.0
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error type for month identifier parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthIdError {
    InvalidFormat(String),
}

impl fmt::Display for MonthIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthIdError::InvalidFormat(s) => {
                write!(f, "Invalid month identifier '{}', expected M.D.YY", s)
            }
        }
    }
}

impl std::error::Error for MonthIdError {}

/// How the registry orders months for "most recent first" display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonthOrder {
    /// Descending plain-string order of the identifiers
    #[default]
    Lexicographic,
    /// Descending calendar order of the dates the identifiers name
    Chronological,
}

impl MonthOrder {
    /// Sort months most recent first
    pub fn sort(&self, months: &mut [MonthId]) {
        match self {
            Self::Lexicographic => months.sort_by(|a, b| b.cmp(a)),
            Self::Chronological => {
                months.sort_by(|a, b| b.date().cmp(&a.date()).then_with(|| b.cmp(a)))
            }
        }
    }
}
