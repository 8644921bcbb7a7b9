//! ScamAware: report toolkit for a scam-awareness site.
//!
//! Modular structure:
//! - [`reports`]: Append-only report store and CSV export
//! - [`storage`]: Key-value backends (encrypted SQLite, memory)
//! - [`validation`]: Report form validation
//! - [`risk`]: Heuristic scam risk scoring
//! - [`app`]: Submit and export actions with user notifications
//! - [`logging`]: Structured logging

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod reports;
pub mod risk;
pub mod storage;
pub mod validation;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use logging::StructuredLogger;
pub use notify::{Notification, NotificationKind};
pub use reports::{Report, ReportFields, ReportStatus, ReportStore};
pub use risk::{assess_scam_risk, RiskAssessment, RiskAssessor};
pub use storage::{KeyValueStore, MemoryStore, SecureStore};
pub use validation::{is_valid_email, validate};
