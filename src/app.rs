//! Form-submit and export actions: the glue between a front end and the report store.

use crate::error::Result;
use crate::notify::{
    Notification, EXPORTED_MESSAGE, NOTHING_TO_EXPORT_MESSAGE, SUBMITTED_MESSAGE,
};
use crate::reports::{ReportFields, ReportStore};
use crate::validation::{validate, VALIDATION_ERROR_MESSAGE};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// Validate and store one submission. Invalid input stores nothing.
pub fn submit(store: &ReportStore, fields: ReportFields) -> Result<Notification> {
    if !validate(&fields) {
        return Ok(Notification::error(VALIDATION_ERROR_MESSAGE));
    }
    let report = store.append(fields)?;
    info!(id = report.id, subject = %report.subject, "scam report submitted");
    Ok(Notification::success(SUBMITTED_MESSAGE))
}

/// Outcome of an export: the notification plus the written file, if any.
#[derive(Debug)]
pub struct ExportOutcome {
    pub notification: Notification,
    pub path: Option<PathBuf>,
}

/// Write every stored report as CSV into `out_dir`.
pub fn export(store: &ReportStore, out_dir: &Path, now: DateTime<Utc>) -> Result<ExportOutcome> {
    let Some(csv) = store.export_csv(now) else {
        return Ok(ExportOutcome {
            notification: Notification::info(NOTHING_TO_EXPORT_MESSAGE),
            path: None,
        });
    };
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&csv.filename);
    std::fs::write(&path, csv.content.as_bytes())?;
    info!(path = %path.display(), rows = csv.rows, "reports exported");
    Ok(ExportOutcome {
        notification: Notification::success(EXPORTED_MESSAGE),
        path: Some(path),
    })
}
