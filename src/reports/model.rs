use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Form input for one scam report, as typed by the reporter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFields {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ReportFields {
    /// Phone number if one was given; an empty string counts as absent.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted scam report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Creation time in milliseconds since the epoch
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, with = "phone_field")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub status: ReportStatus,
}

impl Report {
    /// Stamp `fields` with `now`, truncated to the millisecond precision that is persisted.
    pub fn new(fields: ReportFields, now: DateTime<Utc>) -> Self {
        let now = now.trunc_subsecs(3);
        let phone = fields.phone().map(str::to_string);
        Self {
            id: now.timestamp_millis(),
            name: fields.name,
            email: fields.email,
            phone,
            subject: fields.subject,
            message: fields.message,
            timestamp: now,
            status: ReportStatus::Pending,
        }
    }
}

/// `2026-10-18T09:30:00.000Z`, the layout browsers produce for `toISOString`.
mod iso_millis {
    use super::*;

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Absent phone is stored as `""`; `""`, `null` and a missing field all read back as `None`.
mod phone_field {
    use super::*;

    pub fn serialize<S: Serializer>(phone: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(phone.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.filter(|p| !p.is_empty()))
    }
}
