//! Append-only report log kept as a JSON array under one key of a [`KeyValueStore`].

mod export;
mod model;

pub use export::{export_filename, message_preview, render_csv, CsvExport, CSV_HEADER};
pub use model::{Report, ReportFields, ReportStatus};

use crate::error::Result;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Local, Utc};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ReportStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl ReportStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Record a new report stamped with the current time.
    pub fn append(&self, fields: ReportFields) -> Result<Report> {
        self.append_at(fields, Utc::now())
    }

    /// Record a new report stamped with `now`. The whole collection is rewritten.
    /// Unreadable or corrupted existing data is an error and is left untouched.
    pub fn append_at(&self, fields: ReportFields, now: DateTime<Utc>) -> Result<Report> {
        let mut reports = self.load()?;
        let report = Report::new(fields, now);
        reports.push(report.clone());
        let encoded = serde_json::to_string(&reports)?;
        self.backend.set(&self.key, &encoded)?;
        debug!(id = report.id, total = reports.len(), "report appended");
        Ok(report)
    }

    /// Only a missing key starts a fresh collection.
    fn load(&self) -> Result<Vec<Report>> {
        match self.backend.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// All reports in insertion order. Missing or unreadable data yields an empty list.
    pub fn list(&self) -> Vec<Report> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "report store unreadable, treating as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Report>>(&raw) {
            Ok(reports) => reports,
            Err(e) => {
                warn!(key = %self.key, error = %e, "report data corrupted, treating as empty");
                Vec::new()
            }
        }
    }

    /// CSV of every report, or `None` when there is nothing to export.
    pub fn export_csv(&self, now: DateTime<Utc>) -> Option<CsvExport> {
        let reports = self.list();
        if reports.is_empty() {
            return None;
        }
        Some(CsvExport {
            filename: export_filename(now),
            content: render_csv(&reports, &Local),
            rows: reports.len(),
        })
    }
}
