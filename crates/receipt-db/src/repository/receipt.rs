//! # Receipt Repository
//!
//! Database operations for receipts and receipt items.
//!
//! ## Lookup Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  find_by_receipt_number("RCP-001")                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT r.*, (SELECT COUNT(*) FROM receipt_items ...) AS item_count    │
//! │  FROM receipts r WHERE r.receipt_number = ?1     (exact, UNIQUE index) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ReceiptRow ──► ReceiptRecord (receipt-core)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use receipt_core::ReceiptRecord;

// =============================================================================
// Input Types
// =============================================================================

/// A receipt to insert, with its line items.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReceipt {
    pub receipt_number: String,
    pub transaction_date: NaiveDate,
    pub transaction_time: NaiveTime,
    pub subtotal_cents: i64,
    pub tax_rate_bps: u32,
    pub tax_amount_cents: i64,
    pub grand_total_cents: i64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<NewReceiptItem>,
}

impl NewReceipt {
    /// Builds a receipt whose totals are derived from its items.
    ///
    /// Tax is rounded half-up to the cent: `(subtotal * bps + 5000) / 10000`.
    pub fn from_items(
        receipt_number: impl Into<String>,
        transaction_date: NaiveDate,
        transaction_time: NaiveTime,
        tax_rate_bps: u32,
        items: Vec<NewReceiptItem>,
    ) -> Self {
        let subtotal_cents: i64 = items.iter().map(NewReceiptItem::line_total_cents).sum();
        let tax_amount_cents =
            ((i128::from(subtotal_cents) * i128::from(tax_rate_bps) + 5000) / 10000) as i64;

        NewReceipt {
            receipt_number: receipt_number.into(),
            transaction_date,
            transaction_time,
            subtotal_cents,
            tax_rate_bps,
            tax_amount_cents,
            grand_total_cents: subtotal_cents + tax_amount_cents,
            customer_name: None,
            customer_phone: None,
            customer_email: None,
            notes: None,
            items,
        }
    }

    /// Sets the customer contact fields.
    pub fn with_customer(
        mut self,
        name: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Self {
        self.customer_name = name.map(str::to_string);
        self.customer_phone = phone.map(str::to_string);
        self.customer_email = email.map(str::to_string);
        self
    }

    /// Sets the free-form notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A line item to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReceiptItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl NewReceiptItem {
    pub fn new(name: impl Into<String>, quantity: i64, unit_price_cents: i64) -> Self {
        NewReceiptItem {
            name: name.into(),
            quantity,
            unit_price_cents,
        }
    }

    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }
}

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
struct ReceiptRow {
    id: String,
    receipt_number: String,
    transaction_date: NaiveDate,
    transaction_time: NaiveTime,
    subtotal_cents: i64,
    tax_rate_bps: i64,
    tax_amount_cents: i64,
    grand_total_cents: i64,
    customer_name: Option<String>,
    customer_phone: Option<String>,
    customer_email: Option<String>,
    notes: Option<String>,
    item_count: i64,
    created_at: DateTime<Utc>,
}

impl ReceiptRow {
    fn into_record(self) -> DbResult<ReceiptRecord> {
        let tax_rate_bps = u32::try_from(self.tax_rate_bps).map_err(|_| {
            DbError::Internal(format!(
                "receipt {} has out-of-range tax_rate_bps {}",
                self.id, self.tax_rate_bps
            ))
        })?;

        Ok(ReceiptRecord {
            id: self.id,
            receipt_number: self.receipt_number,
            transaction_date: self.transaction_date,
            transaction_time: self.transaction_time,
            subtotal_cents: self.subtotal_cents,
            tax_rate_bps,
            tax_amount_cents: self.tax_amount_cents,
            grand_total_cents: self.grand_total_cents,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
            notes: self.notes,
            item_count: self.item_count,
            created_at: self.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for receipt database operations.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Finds a receipt by its exact receipt number.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - receipt exists, `item_count` filled in
    /// * `Ok(None)` - no such receipt
    /// * `Err(DbError)` - the query itself failed
    pub async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> DbResult<Option<ReceiptRecord>> {
        debug!(receipt_number = %receipt_number, "Finding receipt");

        let row = sqlx::query_as::<_, ReceiptRow>(
            r#"
            SELECT
                r.id,
                r.receipt_number,
                r.transaction_date,
                r.transaction_time,
                r.subtotal_cents,
                r.tax_rate_bps,
                r.tax_amount_cents,
                r.grand_total_cents,
                r.customer_name,
                r.customer_phone,
                r.customer_email,
                r.notes,
                (SELECT COUNT(*) FROM receipt_items i WHERE i.receipt_id = r.id) AS item_count,
                r.created_at
            FROM receipts r
            WHERE r.receipt_number = ?1
            "#,
        )
        .bind(receipt_number)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ReceiptRow::into_record).transpose()
    }

    /// Inserts a receipt and its items in one transaction.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` when the receipt number already exists.
    pub async fn insert_receipt(&self, receipt: &NewReceipt) -> DbResult<ReceiptRecord> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(
            id = %id,
            receipt_number = %receipt.receipt_number,
            items = receipt.items.len(),
            "Inserting receipt"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO receipts (
                id, receipt_number, transaction_date, transaction_time,
                subtotal_cents, tax_rate_bps, tax_amount_cents, grand_total_cents,
                customer_name, customer_phone, customer_email, notes,
                created_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8,
                ?9, ?10, ?11, ?12,
                ?13
            )
            "#,
        )
        .bind(&id)
        .bind(&receipt.receipt_number)
        .bind(receipt.transaction_date)
        .bind(receipt.transaction_time)
        .bind(receipt.subtotal_cents)
        .bind(i64::from(receipt.tax_rate_bps))
        .bind(receipt.tax_amount_cents)
        .bind(receipt.grand_total_cents)
        .bind(&receipt.customer_name)
        .bind(&receipt.customer_phone)
        .bind(&receipt.customer_email)
        .bind(&receipt.notes)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => {
                DbError::duplicate(field, receipt.receipt_number.clone())
            }
            other => other,
        })?;

        for item in &receipt.items {
            insert_item(&mut tx, &id, item).await?;
        }

        tx.commit().await?;

        Ok(ReceiptRecord {
            id,
            receipt_number: receipt.receipt_number.clone(),
            transaction_date: receipt.transaction_date,
            transaction_time: receipt.transaction_time,
            subtotal_cents: receipt.subtotal_cents,
            tax_rate_bps: receipt.tax_rate_bps,
            tax_amount_cents: receipt.tax_amount_cents,
            grand_total_cents: receipt.grand_total_cents,
            customer_name: receipt.customer_name.clone(),
            customer_phone: receipt.customer_phone.clone(),
            customer_email: receipt.customer_email.clone(),
            notes: receipt.notes.clone(),
            item_count: receipt.items.len() as i64,
            created_at: now,
        })
    }

    /// Adds a line item to an existing receipt. Totals are not recomputed.
    ///
    /// ## Returns
    /// The new item id.
    pub async fn add_item(&self, receipt_id: &str, item: &NewReceiptItem) -> DbResult<String> {
        debug!(receipt_id = %receipt_id, name = %item.name, "Adding receipt item");

        let mut conn = self.pool.acquire().await?;
        insert_item(&mut conn, receipt_id, item)
            .await
            .map_err(|e| match e {
                DbError::ForeignKeyViolation { .. } => DbError::not_found("Receipt", receipt_id),
                other => other,
            })
    }

    /// Counts stored receipts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn insert_item(
    conn: &mut sqlx::SqliteConnection,
    receipt_id: &str,
    item: &NewReceiptItem,
) -> DbResult<String> {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO receipt_items (
            id, receipt_id, name, quantity, unit_price_cents, line_total_cents
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&id)
    .bind(receipt_id)
    .bind(&item.name)
    .bind(item.quantity)
    .bind(item.unit_price_cents)
    .bind(item.line_total_cents())
    .execute(conn)
    .await?;

    Ok(id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_receipt(receipt_number: &str) -> NewReceipt {
        NewReceipt::from_items(
            receipt_number,
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            NaiveTime::from_hms_opt(14, 3, 0).unwrap(),
            825,
            vec![
                NewReceiptItem::new("Coca-Cola 330ml", 2, 199),
                NewReceiptItem::new("Chips Lays Classic", 1, 249),
            ],
        )
        .with_customer(Some("Ada"), Some("555-0100"), Some("ada@example.com"))
        .with_notes("gift wrap")
    }

    #[test]
    fn test_totals_from_items() {
        let receipt = sample_receipt("RCP-001");
        assert_eq!(receipt.subtotal_cents, 647);
        assert_eq!(receipt.tax_amount_cents, 53);
        assert_eq!(receipt.grand_total_cents, 700);
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = test_db().await;
        let repo = db.receipts();

        let inserted = repo.insert_receipt(&sample_receipt("RCP-001")).await.unwrap();
        let found = repo.find_by_receipt_number("RCP-001").await.unwrap().unwrap();

        assert_eq!(found.id, inserted.id);
        assert_eq!(found.item_count, 2);
        assert_eq!(found.tax_rate_bps, 825);
        assert_eq!(found.grand_total_cents, 700);
        assert_eq!(found.customer_email.as_deref(), Some("ada@example.com"));
        assert_eq!(found.notes.as_deref(), Some("gift wrap"));
        assert_eq!(found.transaction_date, inserted.transaction_date);
        assert_eq!(found.transaction_time, inserted.transaction_time);
    }

    #[tokio::test]
    async fn test_find_is_exact_match() {
        let db = test_db().await;
        let repo = db.receipts();
        repo.insert_receipt(&sample_receipt("RCP-001")).await.unwrap();

        assert!(repo.find_by_receipt_number("rcp-001").await.unwrap().is_none());
        assert!(repo.find_by_receipt_number("RCP-00").await.unwrap().is_none());
        assert!(repo.find_by_receipt_number(" RCP-001").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_receipt_number() {
        let db = test_db().await;
        let repo = db.receipts();
        repo.insert_receipt(&sample_receipt("RCP-001")).await.unwrap();

        let err = repo.insert_receipt(&sample_receipt("RCP-001")).await.unwrap_err();
        match err {
            DbError::UniqueViolation { value, .. } => assert_eq!(value, "RCP-001"),
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_item_updates_count() {
        let db = test_db().await;
        let repo = db.receipts();
        let receipt = repo.insert_receipt(&sample_receipt("RCP-002")).await.unwrap();

        repo.add_item(&receipt.id, &NewReceiptItem::new("Gum", 1, 99))
            .await
            .unwrap();

        let found = repo.find_by_receipt_number("RCP-002").await.unwrap().unwrap();
        assert_eq!(found.item_count, 3);
    }

    #[tokio::test]
    async fn test_add_item_to_missing_receipt() {
        let db = test_db().await;
        let err = db
            .receipts()
            .add_item("no-such-id", &NewReceiptItem::new("Gum", 1, 99))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_closed_pool_reports_unavailable() {
        let db = test_db().await;
        db.close().await;

        let err = db
            .receipts()
            .find_by_receipt_number("RCP-001")
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
    }
}
