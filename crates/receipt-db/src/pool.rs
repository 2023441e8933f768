//! # Receipt Store Connection
//!
//! Opens the SQLite receipt store and hands out repositories.
//!
//! ```text
//! DbConfig ──► Database::new ──► SqlitePool ──► receipts() ──► ReceiptRepository
//!                   │
//!                   ├── file:   WAL journal, optional create
//!                   ├── memory: one connection, kept alive for the pool's life
//!                   └── run_migrations (unless disabled)
//! ```
//!
//! Readers (scanner lookups) open with `create_if_missing(false)` so a wrong
//! path fails loudly instead of producing an empty store. Writers (seed,
//! import) create the file on first use.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::receipt::ReceiptRepository;

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// How to open the receipt store.
///
/// ```rust,ignore
/// // Lookup tooling: the store must already exist.
/// let config = DbConfig::new("receipts.db").create_if_missing(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool size. Default: 5
    pub max_connections: u32,

    /// How long a query waits for a free connection. Default: 30 seconds
    pub acquire_timeout: Duration,

    /// Create the file when it does not exist. Default: true
    pub create_if_missing: bool,

    /// Apply pending migrations on open. Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            create_if_missing: true,
            run_migrations: true,
        }
    }

    /// Private in-memory store, used by tests.
    ///
    /// Every `Database::new` with this config gets its own isolated database.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            create_if_missing: true,
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(self.create_if_missing)
                .journal_mode(SqliteJournalMode::Wal)
        };

        // Foreign keys are off by default in SQLite.
        Ok(options
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true))
    }
}

// =============================================================================
// Status
// =============================================================================

/// Snapshot reported by `receipt-cli status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStatus {
    pub migrations: MigrationStatus,
    /// `None` until the schema exists.
    pub receipt_count: Option<i64>,
}

// =============================================================================
// Database
// =============================================================================

/// Handle to an open receipt store. Clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store described by `config`.
    ///
    /// ## Errors
    /// - `DbError::ConnectionFailed` when the file cannot be opened, including
    ///   a missing file with `create_if_missing(false)`
    /// - `DbError::MigrationFailed` when a pending migration fails
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening receipt store");

        let in_memory = config.is_in_memory();
        let options = config.connect_options()?;

        // An in-memory database lives only as long as its connection.
        let (idle_timeout, max_lifetime) = if in_memory {
            (None, None)
        } else {
            (Some(Duration::from_secs(600)), Some(Duration::from_secs(1800)))
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(u32::from(in_memory))
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(idle_timeout)
            .max_lifetime(max_lifetime)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, in_memory, "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            migrations::run_migrations(&db.pool).await?;
        }

        Ok(db)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn receipts(&self) -> ReceiptRepository {
        ReceiptRepository::new(self.pool.clone())
    }

    /// Migration state and, once the schema exists, the number of receipts.
    pub async fn status(&self) -> DbResult<StoreStatus> {
        let migrations = migrations::migration_status(&self.pool).await?;

        let receipt_count = if migrations.applied > 0 {
            Some(self.receipts().count().await?)
        } else {
            None
        };

        Ok(StoreStatus {
            migrations,
            receipt_count,
        })
    }

    /// Closes the pool. Later queries fail with `DbError::ConnectionFailed`.
    pub async fn close(&self) {
        debug!("Closing receipt store");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
