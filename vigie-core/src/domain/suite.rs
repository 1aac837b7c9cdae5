// vigie-core/src/domain/suite.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How suite names are derived from the run date.
///
/// Both schemes existed in production; `PerTable` is the default because it
/// keeps names collision-free when several tables are processed in one run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SuiteNamingScheme {
    /// `<yyyymmdd>_<table>`
    #[default]
    PerTable,
    /// `<yyyymmdd>_expectation_suite` (one shared name for the whole run)
    RunWide,
}

impl SuiteNamingScheme {
    pub fn suite_name(&self, date: NaiveDate, table: &str) -> String {
        let stamp = date.format("%Y%m%d");
        match self {
            SuiteNamingScheme::PerTable => format!("{}_{}", stamp, table),
            SuiteNamingScheme::RunWide => format!("{}_expectation_suite", stamp),
        }
    }
}

/// A single declarative data-quality rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    ColumnToExist { column: String },
    ColumnValuesNotNull { column: String },
    ColumnValuesUnique { column: String },
    RowCountBetween { min: u64, max: u64 },
}

impl Expectation {
    /// Human-readable label used in validation results and data docs.
    pub fn describe(&self) -> String {
        match self {
            Expectation::ColumnToExist { column } => {
                format!("expect column '{}' to exist", column)
            }
            Expectation::ColumnValuesNotNull { column } => {
                format!("expect values in '{}' to not be null", column)
            }
            Expectation::ColumnValuesUnique { column } => {
                format!("expect values in '{}' to be unique", column)
            }
            Expectation::RowCountBetween { min, max } => {
                format!("expect row count to be between {} and {}", min, max)
            }
        }
    }
}

/// Named, persisted bundle of expectations for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectationSuite {
    pub name: String,
    pub table: String,
    pub created_at: String,
    pub expectations: Vec<Expectation>,
}
