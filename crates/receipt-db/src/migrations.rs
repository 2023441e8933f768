//! # Schema Migrations
//!
//! The receipt schema ships inside the binary. SQL files live in
//! `migrations/sqlite/` at the workspace root and are applied in file-name
//! order; sqlx records each one in `_sqlx_migrations`.
//!
//! ```text
//! migrations/sqlite/
//! └── 001_receipts.sql     receipts + receipt_items, receipt_number UNIQUE
//! ```
//!
//! A file that has been applied anywhere is frozen. Schema changes go in a
//! new `NNN_description.sql`.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// How far a store's schema is behind the embedded migrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Migrations embedded in this build.
    pub available: usize,
    /// Migrations recorded as successfully applied.
    pub applied: usize,
}

impl MigrationStatus {
    pub fn pending(&self) -> usize {
        self.available.saturating_sub(self.applied)
    }

    /// True when every embedded migration has been applied.
    pub fn is_current(&self) -> bool {
        self.pending() == 0
    }
}

/// Applies every pending migration. Already-applied files are skipped.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    debug!(available = MIGRATOR.migrations.len(), "Schema up to date");
    Ok(())
}

/// Reads the migration state of a store.
///
/// A store that never ran migrations has no `_sqlx_migrations` table and
/// reports zero applied. Query failures (including a closed pool) are
/// returned as errors.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;

    let applied: i64 = if tracked == 0 {
        0
    } else {
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?
    };

    Ok(MigrationStatus {
        available: MIGRATOR.migrations.len(),
        applied: usize::try_from(applied)
            .map_err(|_| DbError::Internal(format!("Negative migration count: {applied}")))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_migrated_store_is_current() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let status = migration_status(db.pool()).await.unwrap();
        assert_eq!(status, MigrationStatus { available: 1, applied: 1 });
        assert!(status.is_current());
    }

    #[tokio::test]
    async fn test_unmigrated_store_reports_pending() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();

        let status = migration_status(db.pool()).await.unwrap();
        assert_eq!(status.applied, 0);
        assert_eq!(status.pending(), 1);
        assert!(!status.is_current());
    }

    #[tokio::test]
    async fn test_closed_pool_is_an_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(matches!(
            migration_status(db.pool()).await,
            Err(DbError::ConnectionFailed(_))
        ));
    }
}
