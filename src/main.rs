//! ScamAware entrypoint: submit, list and export scam reports, or score a message.

use clap::Parser;
use scamaware::{
    app,
    cli::{Cli, Commands},
    config::{AppConfig, StorageBackend},
    logging::StructuredLogger,
    reports::{ReportFields, ReportStore},
    risk::RiskAssessor,
    storage::{KeyValueStore, MemoryStore, SecureStore},
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

const FALLBACK_SECRET: &str = "scamaware-local-secret";

fn open_store(config: &AppConfig) -> Result<ReportStore, Box<dyn std::error::Error + Send + Sync>> {
    let backend: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Sqlite => {
            std::fs::create_dir_all(&config.data_dir)?;
            let path = config.data_dir.join("reports.db");
            let secret = config.store_secret().unwrap_or_else(|| {
                warn!("no store secret configured, using built-in fallback");
                FALLBACK_SECRET.to_string()
            });
            let store = SecureStore::open(&path, secret.as_bytes())?
                .with_quota(config.storage.quota_bytes);
            Arc::new(store)
        }
        StorageBackend::Memory => match config.storage.quota_bytes {
            Some(quota) => Arc::new(MemoryStore::with_quota(quota)),
            None => Arc::new(MemoryStore::new()),
        },
    };
    Ok(ReportStore::new(backend, config.storage.key.clone()))
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config);

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(config = ?cli.config, data_dir = ?config.data_dir, "scamaware starting");

    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Submit {
            name,
            email,
            phone,
            subject,
            message,
        } => {
            if config.storage.backend == StorageBackend::Memory {
                warn!("memory backend selected, the report is discarded when this process exits");
            }
            let store = open_store(&config)?;
            let fields = ReportFields {
                name,
                email,
                phone,
                subject,
                message,
            };
            let notification = app::submit(&store, fields)?;
            if cli.json {
                StructuredLogger::emit_json(&notification, &mut out)?;
            } else if !notification.is_error() {
                writeln!(out, "{notification}")?;
            }
            if notification.is_error() {
                if !cli.json {
                    eprintln!("{notification}");
                }
                std::process::exit(1);
            }
        }
        Commands::List => {
            let store = open_store(&config)?;
            let reports = store.list();
            if cli.json {
                StructuredLogger::emit_json(&reports, &mut out)?;
            } else if reports.is_empty() {
                writeln!(out, "No reports")?;
            } else {
                for r in &reports {
                    writeln!(
                        out,
                        "{}  {}  {}  {}  <{}>",
                        r.id,
                        r.timestamp.to_rfc3339(),
                        r.status,
                        r.subject,
                        r.email
                    )?;
                }
            }
        }
        Commands::Export { out_dir } => {
            let store = open_store(&config)?;
            let dir = out_dir
                .or_else(|| config.export.out_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let outcome = app::export(&store, &dir, chrono::Utc::now())?;
            if cli.json {
                let body = serde_json::json!({
                    "kind": outcome.notification.kind,
                    "message": outcome.notification.message,
                    "path": outcome.path,
                });
                StructuredLogger::emit_json(&body, &mut out)?;
            } else {
                writeln!(out, "{}", outcome.notification)?;
                if let Some(path) = &outcome.path {
                    writeln!(out, "{}", path.display())?;
                }
            }
        }
        Commands::Assess { email, message } => {
            let assessment = RiskAssessor::new(config.risk.clone()).assess(&email, &message);
            if cli.json {
                StructuredLogger::emit_json(&assessment, &mut out)?;
            } else {
                writeln!(out, "score: {}", assessment.score)?;
                writeln!(out, "suspicious: {}", assessment.is_likely_suspicious)?;
                for factor in &assessment.factors {
                    writeln!(out, "- {factor}")?;
                }
            }
        }
    }

    Ok(())
}
