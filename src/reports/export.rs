//! CSV rendering of the report collection, in the layout the website's export button produced.
//!
//! Quoted fields are wrapped in `"` without escaping embedded quotes or commas, so a name
//! or message containing either yields a malformed row. Kept for compatibility with
//! existing exports.

use super::Report;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt::Display;

pub const CSV_HEADER: &str = "ID,Name,Email,Phone,Subject,Message,Date,Status";

const MESSAGE_PREVIEW_CHARS: usize = 50;

/// A rendered export, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub rows: usize,
}

/// `scam-reports-2026-10-18.csv`
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("scam-reports-{}.csv", now.format("%Y-%m-%d"))
}

/// First 50 characters of the message, always followed by `...`.
pub fn message_preview(message: &str) -> String {
    let head: String = message.chars().take(MESSAGE_PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Render all reports; dates are shown as `M/D/YYYY` in `tz`.
pub fn render_csv<Tz>(reports: &[Report], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    for report in reports {
        let date = report.timestamp.with_timezone(tz).format("%-m/%-d/%Y");
        csv.push_str(&format!(
            "{},\"{}\",{},{},\"{}\",\"{}\",{},{}\n",
            report.id,
            report.name,
            report.email,
            report.phone.as_deref().unwrap_or("N/A"),
            report.subject,
            message_preview(&report.message),
            date,
            report.status,
        ));
    }
    csv
}
