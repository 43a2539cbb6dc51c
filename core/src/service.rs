use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::db::Database;
use crate::error::{EntryError, StorageError};
use crate::models::{
    LEVEL_LABEL, Notification, PlotPoint, PlotView, Reading, TABLE_TITLE, TIMESTAMP_LABEL,
    TableView,
};
use crate::validate::validate_entry;

pub const SAVED_MESSAGE: &str = "Blood sugar data added successfully!";
pub const FORMAT_MESSAGE: &str = "Invalid date or time format. Please use MM-DD-YYYY for date and HH:MM (24-hour format) for time.";
pub const NUMERIC_MESSAGE: &str = "Invalid blood sugar level. Please enter a valid number.";
pub const NO_DATA_MESSAGE: &str = "No blood sugar data available.";
pub const NO_PLOT_DATA_MESSAGE: &str = "No blood sugar data available for plotting.";

/// Result of submitting the entry form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryOutcome {
    pub notification: Notification,
    /// Set only when the reading reached the store; the form should be cleared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<Reading>,
}

/// Either something to render or a notice in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum Outcome<T> {
    Render(T),
    Notify(Notification),
}

impl From<&EntryError> for Notification {
    fn from(err: &EntryError) -> Self {
        match err {
            EntryError::Format { .. } => Notification::error("Error", FORMAT_MESSAGE),
            EntryError::Numeric { .. } => Notification::error("Error", NUMERIC_MESSAGE),
            EntryError::Storage(e) => storage_notice(e),
        }
    }
}

fn storage_notice(err: &StorageError) -> Notification {
    Notification::error("Database Error", err.to_string())
}

/// The three user-facing workflows over one store.
pub struct SugarService {
    db: Database,
}

impl SugarService {
    pub fn new(db_path: &Path) -> Result<Self, StorageError> {
        let db = Database::open(db_path)?;
        Ok(Self { db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Validate the raw form text and store it. Rejected input never touches the store.
    pub fn add_entry(&self, date: &str, time: &str, level: &str) -> EntryOutcome {
        match self.try_add(date, time, level) {
            Ok(reading) => EntryOutcome {
                notification: Notification::info("Success", SAVED_MESSAGE),
                saved: Some(reading),
            },
            Err(err) => {
                warn!(error = %err, "entry rejected");
                EntryOutcome {
                    notification: Notification::from(&err),
                    saved: None,
                }
            }
        }
    }

    fn try_add(&self, date: &str, time: &str, level: &str) -> Result<Reading, EntryError> {
        let (timestamp, level) = validate_entry(date, time, level)?;
        Ok(self.db.upsert(timestamp, level)?)
    }

    pub fn view_entries(&self) -> Outcome<TableView> {
        match self.db.fetch_all_ordered() {
            Ok(rows) if rows.is_empty() => {
                Outcome::Notify(Notification::warning("No Data", NO_DATA_MESSAGE))
            }
            Ok(rows) => Outcome::Render(TableView {
                title: TABLE_TITLE,
                headers: [TIMESTAMP_LABEL, LEVEL_LABEL],
                rows,
            }),
            Err(err) => {
                warn!(error = %err, "view failed");
                Outcome::Notify(storage_notice(&err))
            }
        }
    }

    pub fn plot_entries(&self) -> Outcome<PlotView> {
        match self.db.fetch_all_ordered() {
            Ok(rows) if rows.is_empty() => {
                Outcome::Notify(Notification::warning("No Data", NO_PLOT_DATA_MESSAGE))
            }
            Ok(rows) => Outcome::Render(PlotView::new(rows.iter().map(PlotPoint::from).collect())),
            Err(err) => {
                warn!(error = %err, "plot failed");
                Outcome::Notify(storage_notice(&err))
            }
        }
    }

    /// Drop every stored reading.
    pub fn reset(&self) -> Result<(), StorageError> {
        self.db.initialize()
    }
}
