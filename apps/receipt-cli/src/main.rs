//! Titan Receipt Codes CLI
//!
//! Generate, decode and look up receipt codes from the terminal.
//!
//! ## Commands
//! - `generate`: wire code, lookup URL and QR image URL for a receipt
//! - `barcode`: barcode payload for a receipt
//! - `decode`: show how a scanned string decodes, without touching the store
//! - `lookup`: public lookup against the receipt store
//! - `admin-lookup`: back-office lookup, full receipt view
//! - `status`: migration state and receipt count of the store
//!
//! Every command prints a JSON document on stdout.

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use receipt_core::codec;
use receipt_core::dto::{GenerateBarcodeRequest, GenerateQrCodeRequest, LookupRequest};
use receipt_core::{BarcodeFormat, CodeType};
use receipt_db::{Database, DbConfig};
use receipt_lookup::{MemoryReceiptStore, ReceiptCodeService, ReceiptStore};

use crate::config::CliConfig;

/// Titan Receipt Codes CLI
#[derive(Parser, Debug)]
#[command(name = "receipt-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn,receipt=info")]
    log_level: String,

    /// SQLite receipt store (overrides RECEIPT_DB_PATH)
    #[arg(long)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the QR code data for a receipt
    Generate {
        /// Receipt number
        receipt: String,

        /// Store id to embed (defaults to RECEIPT_STORE_ID)
        #[arg(short, long)]
        store: Option<String>,

        /// QR image size in pixels
        #[arg(long)]
        size: Option<u32>,
    },

    /// Generate barcode data for a receipt
    Barcode {
        /// Receipt number
        receipt: String,

        /// Barcode symbology (code128, code39, ean13, qr)
        #[arg(short, long, default_value = "code128")]
        format: BarcodeFormat,

        #[arg(long)]
        width: Option<u32>,

        #[arg(long)]
        height: Option<u32>,
    },

    /// Decode a scanned string and check its checksum
    Decode {
        /// Scanned text: wire code, lookup URL or receipt number
        code: String,
    },

    /// Public receipt lookup
    Lookup {
        /// Scanned or typed code
        code: String,

        /// How the code was captured (qr, barcode, receipt_number)
        #[arg(short = 't', long = "type", default_value = "qr")]
        code_type: CodeType,
    },

    /// Back-office receipt lookup
    AdminLookup {
        /// Scanned or typed code
        code: String,

        /// How the code was captured (informational)
        #[arg(short = 't', long = "type", default_value = "qr")]
        code_type: CodeType,
    },

    /// Show migration state and receipt count of the store
    Status,
}

/// `decode` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DecodeReport {
    payload: Option<codec::CodePayload>,
    checksum_valid: bool,
    scanned: Option<codec::ScannedCode>,
}

/// `status` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    path: String,
    migrations_available: usize,
    migrations_applied: usize,
    receipt_count: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut config = CliConfig::load().context("Failed to load configuration")?;
    if let Some(db) = cli.db {
        config.db_path = db.into();
    }

    match cli.command {
        Commands::Generate {
            receipt,
            store,
            size,
        } => {
            let mut codes = config.codes.clone();
            if let Some(size) = size {
                codes = codes.with_qr_size(size);
            }
            let service = offline_service(codes);

            let response = service.generate_qr_code(&GenerateQrCodeRequest {
                receipt_number: receipt,
                store_id: store,
            });
            print_json(&response, response.success)
        }

        Commands::Barcode {
            receipt,
            format,
            width,
            height,
        } => {
            let service = offline_service(config.codes.clone());

            let response = service.generate_barcode(&GenerateBarcodeRequest {
                receipt_number: receipt,
                format: Some(format),
                width,
                height,
            });
            print_json(&response, response.success)
        }

        Commands::Decode { code } => {
            let service = offline_service(config.codes.clone());

            let payload = service.decode(&code);
            let checksum_valid = payload
                .as_ref()
                .map(codec::validate_checksum)
                .unwrap_or(false);
            let report = DecodeReport {
                payload,
                checksum_valid,
                scanned: service.parse_scanned_code(&code),
            };
            let ok = report.payload.is_some();
            print_json(&report, ok)
        }

        Commands::Lookup { code, code_type } => {
            let (db, service) = connected_service(&config).await?;

            let result = service
                .lookup_receipt(&LookupRequest::new(code, code_type))
                .await;
            db.close().await;
            print_json(&result, result.success && result.found)
        }

        Commands::AdminLookup { code, code_type } => {
            let (db, service) = connected_service(&config).await?;

            let result = service.scan_and_lookup(&code, code_type).await;
            db.close().await;
            print_json(&result, result.success && result.found)
        }

        Commands::Status => {
            let db = open_existing(&config, false).await?;
            let status = db.status().await;
            db.close().await;
            let status = status.context("Failed to read receipt store status")?;

            let report = StatusReport {
                path: config.db_path.display().to_string(),
                migrations_available: status.migrations.available,
                migrations_applied: status.migrations.applied,
                receipt_count: status.receipt_count,
            };
            print_json(&report, status.migrations.is_current())
        }
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Service for commands that never read receipts.
fn offline_service(codes: receipt_core::ReceiptCodeConfig) -> ReceiptCodeService {
    let store: Arc<dyn ReceiptStore> = Arc::new(MemoryReceiptStore::new());
    ReceiptCodeService::new(store, codes)
}

/// Opens a store that must already exist; a mistyped path is an error.
async fn open_existing(config: &CliConfig, migrate: bool) -> Result<Database> {
    let db_config = DbConfig::new(config.db_path.clone())
        .create_if_missing(false)
        .run_migrations(migrate);

    let db = Database::new(db_config)
        .await
        .with_context(|| format!("Failed to open receipt store {}", config.db_path.display()))?;
    info!(path = %config.db_path.display(), "Receipt store opened");
    Ok(db)
}

async fn connected_service(config: &CliConfig) -> Result<(Database, ReceiptCodeService)> {
    let db = open_existing(config, true).await?;
    let service = ReceiptCodeService::new(Arc::new(db.clone()), config.codes.clone());
    Ok((db, service))
}

fn print_json<T: Serialize>(value: &T, ok: bool) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_lookup_type() {
        let cli = Cli::parse_from(["receipt-cli", "lookup", "RCP-001", "--type", "receipt_number"]);
        match cli.command {
            Commands::Lookup { code, code_type } => {
                assert_eq!(code, "RCP-001");
                assert_eq!(code_type, CodeType::ReceiptNumber);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::parse_from([
            "receipt-cli",
            "generate",
            "RCP-001",
            "--store",
            "STORE-A",
            "--size",
            "300",
        ]);
        match cli.command {
            Commands::Generate {
                receipt,
                store,
                size,
            } => {
                assert_eq!(receipt, "RCP-001");
                assert_eq!(store.as_deref(), Some("STORE-A"));
                assert_eq!(size, Some(300));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_does_not_create_missing_store() {
        let path = std::env::temp_dir().join("receipt-cli-missing-store.db");
        let _ = std::fs::remove_file(&path);

        let config = CliConfig {
            codes: receipt_core::ReceiptCodeConfig::default(),
            db_path: path.clone(),
        };

        assert!(connected_service(&config).await.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::parse_from(["receipt-cli", "--db", "/tmp/r.db", "status"]);
        assert!(matches!(cli.command, Commands::Status));
        assert_eq!(cli.db.as_deref(), Some("/tmp/r.db"));
    }

    #[test]
    fn test_bad_barcode_format_rejected() {
        assert!(Cli::try_parse_from(["receipt-cli", "barcode", "RCP-001", "-f", "pdf417"]).is_err());
    }
}
