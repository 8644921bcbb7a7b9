//! Integration test: config load, report store round-trip over both backends, export, risk scoring.

use chrono::{DateTime, TimeZone, Utc};
use scamaware::{
    app,
    config::{AppConfig, RiskConfig, StorageBackend},
    notify::{NotificationKind, EXPORTED_MESSAGE, NOTHING_TO_EXPORT_MESSAGE, SUBMITTED_MESSAGE},
    reports::{ReportFields, ReportStatus, ReportStore},
    risk::{assess_scam_risk, RiskAssessor},
    storage::{KeyValueStore, MemoryStore, SecureStore},
    validation::VALIDATION_ERROR_MESSAGE,
    Error,
};
use std::path::Path;
use std::sync::Arc;

const KEY: &str = "scamReports";

fn fields() -> ReportFields {
    ReportFields {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        phone: Some("555-0100".into()),
        subject: "Scam".into(),
        message: "This is a sufficiently long message.".into(),
    }
}

fn memory_store() -> (Arc<MemoryStore>, ReportStore) {
    let backend = Arc::new(MemoryStore::new());
    let store = ReportStore::new(backend.clone(), KEY);
    (backend, store)
}

fn at(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, h, 0, 0).unwrap()
}

#[test]
fn config_load_default() {
    let c = AppConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.storage.key, "scamReports");
    assert_eq!(c.storage.backend, StorageBackend::Sqlite);
    assert_eq!(c.risk.suspicious_threshold, 30);
    assert_eq!(c.risk.max_score, 100);
}

#[test]
fn config_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"storage": {"backend": "memory"}}"#).unwrap();
    let c = AppConfig::load(&path);
    assert_eq!(c.storage.backend, StorageBackend::Memory);
    assert_eq!(c.storage.key, "scamReports");
    assert_eq!(c.log.level, "warn");
}

#[test]
fn config_malformed_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    let c = AppConfig::load(&path);
    assert_eq!(c.storage.backend, StorageBackend::Sqlite);
}

#[test]
fn append_then_list_returns_input() {
    let (_, store) = memory_store();
    let before = Utc::now();
    let appended = store.append(fields()).unwrap();
    let reports = store.list();
    assert_eq!(reports.len(), 1);
    let last = reports.last().unwrap();
    assert_eq!(last, &appended);
    assert_eq!(last.name, "Jane Doe");
    assert_eq!(last.email, "jane@example.com");
    assert_eq!(last.phone.as_deref(), Some("555-0100"));
    assert_eq!(last.subject, "Scam");
    assert_eq!(last.message, "This is a sufficiently long message.");
    assert_eq!(last.status, ReportStatus::Pending);
    assert!(last.timestamp >= before - chrono::Duration::milliseconds(1));
    assert_eq!(last.id, last.timestamp.timestamp_millis());
}

#[test]
fn fields_are_stored_untrimmed() {
    let (_, store) = memory_store();
    let mut f = fields();
    f.name = "  Jane Doe ".into();
    f.message = "  padded message text  ".into();
    store.append(f).unwrap();
    let r = &store.list()[0];
    assert_eq!(r.name, "  Jane Doe ");
    assert_eq!(r.message, "  padded message text  ");
}

#[test]
fn list_keeps_insertion_order() {
    let (_, store) = memory_store();
    for (i, subject) in ["first", "second", "third"].iter().enumerate() {
        let mut f = fields();
        f.subject = subject.to_string();
        store.append_at(f, at(i as u32 + 1)).unwrap();
    }
    let subjects: Vec<String> = store.list().into_iter().map(|r| r.subject).collect();
    assert_eq!(subjects, vec!["first", "second", "third"]);
}

#[test]
fn persisted_layout_matches_site() {
    let (backend, store) = memory_store();
    let mut f = fields();
    f.phone = None;
    store.append_at(f, at(9)).unwrap();
    let raw = backend.get(KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value[0];
    assert_eq!(entry["id"], at(9).timestamp_millis());
    assert_eq!(entry["phone"], "");
    assert_eq!(entry["timestamp"], "2026-10-18T09:00:00.000Z");
    assert_eq!(entry["status"], "pending");
}

#[test]
fn reads_records_written_by_the_site() {
    let (backend, store) = memory_store();
    backend
        .set(
            KEY,
            r#"[{"id":1760778000000,"name":"Ann","email":"ann@x.io","phone":"","subject":"Call","message":"They asked for gift cards","timestamp":"2025-10-18T09:00:00.000Z","status":"pending"},
                {"id":1760778000001,"name":"Bo","email":"bo@x.io","subject":"Text","message":"Package held at customs","timestamp":"2025-10-18T09:00:00.001Z","status":"pending"}]"#,
        )
        .unwrap();
    let reports = store.list();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].phone, None);
    assert_eq!(reports[1].phone, None);
    assert_eq!(reports[1].id, 1760778000001);
}

#[test]
fn empty_phone_is_absent() {
    let (_, store) = memory_store();
    let mut f = fields();
    f.phone = Some(String::new());
    let r = store.append(f).unwrap();
    assert_eq!(r.phone, None);
}

#[test]
fn list_on_empty_store_is_empty() {
    let (_, store) = memory_store();
    assert!(store.list().is_empty());
}

#[test]
fn list_on_corrupted_data_is_empty() {
    let (backend, store) = memory_store();
    backend.set(KEY, "{ definitely not json").unwrap();
    assert!(store.list().is_empty());
    backend.set(KEY, r#"{"id": 1}"#).unwrap();
    assert!(store.list().is_empty());
}

#[test]
fn append_over_corrupted_data_fails_and_keeps_value() {
    let (backend, store) = memory_store();
    backend.set(KEY, "garbage").unwrap();
    let err = store.append(fields()).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert_eq!(backend.get(KEY).unwrap().as_deref(), Some("garbage"));
}

#[test]
fn submit_over_corrupted_data_is_an_error() {
    let (backend, store) = memory_store();
    backend.set(KEY, r#"[{"id": "not a number"}]"#).unwrap();
    assert!(app::submit(&store, fields()).is_err());
    assert_eq!(
        backend.get(KEY).unwrap().as_deref(),
        Some(r#"[{"id": "not a number"}]"#)
    );
}

#[test]
fn append_under_wrong_secret_keeps_existing_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.db");
    {
        let backend = Arc::new(SecureStore::open(&path, b"right").unwrap());
        let store = ReportStore::new(backend, KEY);
        store.append_at(fields(), at(1)).unwrap();
        store.append_at(fields(), at(2)).unwrap();
    }
    {
        let backend = Arc::new(SecureStore::open(&path, b"wrong").unwrap());
        let store = ReportStore::new(backend, KEY);
        let err = store.append_at(fields(), at(3)).unwrap_err();
        assert!(matches!(err, Error::Crypto(_)));
    }
    let backend = Arc::new(SecureStore::open(&path, b"right").unwrap());
    let reports = ReportStore::new(backend, KEY).list();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[1].id, at(2).timestamp_millis());
}

#[test]
fn quota_exceeded_surfaces_and_keeps_collection() {
    let backend = Arc::new(MemoryStore::with_quota(400));
    let store = ReportStore::new(backend, KEY);
    store.append(fields()).unwrap();
    let err = store.append(fields()).unwrap_err();
    assert!(matches!(err, Error::QuotaExceeded { quota: 400, .. }));
    assert_eq!(store.list().len(), 1);
}

#[test]
fn secure_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.db");
    {
        let backend = Arc::new(SecureStore::open(&path, b"test-secret").unwrap());
        let store = ReportStore::new(backend, KEY);
        store.append(fields()).unwrap();
    }
    let backend = Arc::new(SecureStore::open(&path, b"test-secret").unwrap());
    let store = ReportStore::new(backend, KEY);
    let reports = store.list();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].subject, "Scam");
}

#[test]
fn secure_store_encrypts_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.db");
    let backend = SecureStore::open(&path, b"test-secret").unwrap();
    backend.set(KEY, "jane@example.com").unwrap();
    drop(backend);
    let raw = std::fs::read(&path).unwrap();
    let needle = b"jane@example.com";
    assert!(!raw.windows(needle.len()).any(|w| w == needle));
}

#[test]
fn secure_store_wrong_secret_lists_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.db");
    {
        let backend = Arc::new(SecureStore::open(&path, b"right").unwrap());
        ReportStore::new(backend, KEY).append(fields()).unwrap();
    }
    let backend = Arc::new(SecureStore::open(&path, b"wrong").unwrap());
    let store = ReportStore::new(backend.clone(), KEY);
    assert!(store.list().is_empty());
    assert!(backend.get(KEY).is_err());
}

#[test]
fn secure_store_undecodable_value_lists_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reports.db");
    let backend = Arc::new(SecureStore::open(&path, b"test-secret").unwrap());
    backend.set_raw(KEY, "%%% not base64 %%%").unwrap();
    let store = ReportStore::new(backend, KEY);
    assert!(store.list().is_empty());
}

#[test]
fn submit_valid_form_stores_report() {
    let (_, store) = memory_store();
    let n = app::submit(&store, fields()).unwrap();
    assert_eq!(n.kind, NotificationKind::Success);
    assert_eq!(n.message, SUBMITTED_MESSAGE);
    assert_eq!(store.list().len(), 1);
}

#[test]
fn submit_invalid_form_stores_nothing() {
    let (_, store) = memory_store();
    let mut f = fields();
    f.message = "short".into();
    let n = app::submit(&store, f).unwrap();
    assert!(n.is_error());
    assert_eq!(n.message, VALIDATION_ERROR_MESSAGE);
    assert!(store.list().is_empty());
}

#[test]
fn submit_does_not_assess_risk() {
    let (_, store) = memory_store();
    let mut f = fields();
    f.message = "URGENT: verify account now, click here, payment required".into();
    app::submit(&store, f).unwrap();
    let stored = serde_json::to_value(&store.list()[0]).unwrap();
    assert!(stored.get("score").is_none());
}

#[test]
fn export_with_no_reports_writes_nothing() {
    let (_, store) = memory_store();
    let dir = tempfile::tempdir().unwrap();
    assert!(store.export_csv(at(12)).is_none());
    let outcome = app::export(&store, dir.path(), at(12)).unwrap();
    assert_eq!(outcome.notification.kind, NotificationKind::Info);
    assert_eq!(outcome.notification.message, NOTHING_TO_EXPORT_MESSAGE);
    assert!(outcome.path.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn export_truncates_long_messages() {
    let (_, store) = memory_store();
    let mut f = fields();
    f.message = "This message is definitely longer than fifty characters in total.".into();
    store.append_at(f, at(12)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let outcome = app::export(&store, dir.path(), at(12)).unwrap();
    assert_eq!(outcome.notification.message, EXPORTED_MESSAGE);
    let path = outcome.path.unwrap();
    assert_eq!(path.file_name().unwrap(), "scam-reports-2026-10-18.csv");
    let csv = std::fs::read_to_string(path).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.contains(",\"This message is definitely longer than fifty chara...\","));
    assert!(row.ends_with(",pending"));
    assert!(row.starts_with(&format!("{},\"Jane Doe\",jane@example.com,555-0100,\"Scam\",", at(12).timestamp_millis())));
}

#[test]
fn export_has_one_row_per_report() {
    let (_, store) = memory_store();
    store.append_at(fields(), at(1)).unwrap();
    store.append_at(fields(), at(2)).unwrap();
    let csv = store.export_csv(at(3)).unwrap();
    assert_eq!(csv.rows, 2);
    assert_eq!(csv.content.lines().count(), 3);
}

#[test]
fn risk_mixed_phishing_message() {
    let r = assess_scam_risk(
        "a@b.com",
        "Please verify your account immediately, click here to confirm identity",
    );
    // urgency: immediately, confirm, verify (30); patterns: click here, confirm identity (30)
    assert_eq!(r.score, 60);
    assert!(r.is_likely_suspicious);
    assert_eq!(
        r.factors,
        vec![
            "Contains urgency word: \"immediately\"",
            "Contains urgency word: \"confirm\"",
            "Contains urgency word: \"verify\"",
            "Suspicious pattern detected",
            "Suspicious pattern detected",
        ]
    );
}

#[test]
fn risk_invalid_email_only() {
    let r = assess_scam_risk("bad-email", "Hello, just checking in.");
    assert_eq!(r.score, 20);
    assert!(!r.is_likely_suspicious);
    assert_eq!(r.factors, vec!["Invalid email format"]);
}

#[test]
fn risk_clean_message_scores_zero() {
    let r = assess_scam_risk("friend@example.com", "See you at lunch tomorrow.");
    assert_eq!(r.score, 0);
    assert!(r.factors.is_empty());
    assert!(!r.is_likely_suspicious);
}

#[test]
fn risk_is_case_insensitive_on_message() {
    let r = assess_scam_risk("a@b.com", "CLICK HERE for a LIMITED TIME offer");
    assert_eq!(r.score, 30);
    assert!(!r.is_likely_suspicious);
}

#[test]
fn risk_score_clamped_to_cap() {
    let r = assess_scam_risk(
        "nope",
        "URGENT: act now and update, immediately confirm and verify account. \
         Click here, confirm identity, payment required, limited time.",
    );
    // 6 urgency words, 5 patterns, bad email: 60 + 75 + 20 = 155
    assert_eq!(r.factors.len(), 12);
    assert_eq!(r.score, 100);
    assert!(r.is_likely_suspicious);
}

#[test]
fn risk_threshold_is_configurable() {
    let assessor = RiskAssessor::new(RiskConfig {
        suspicious_threshold: 10,
        max_score: 50,
    });
    let r = assessor.assess("bad-email", "act now, urgent, update, verify, confirm");
    assert_eq!(r.score, 50);
    assert!(r.is_likely_suspicious);
}
