//! Shared fixtures and store doubles for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use receipt_core::ReceiptRecord;

use crate::error::{StoreError, StoreResult};
use crate::store::{MemoryReceiptStore, ReceiptStore};

pub fn sample_record(receipt_number: &str) -> ReceiptRecord {
    ReceiptRecord {
        id: format!("id-{receipt_number}"),
        receipt_number: receipt_number.to_string(),
        transaction_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        transaction_time: NaiveTime::from_hms_opt(14, 3, 0).unwrap(),
        subtotal_cents: 1000,
        tax_rate_bps: 825,
        tax_amount_cents: 83,
        grand_total_cents: 1083,
        customer_name: Some("Ada".to_string()),
        customer_phone: Some("555-0100".to_string()),
        customer_email: Some("ada@example.com".to_string()),
        notes: Some("gift wrap".to_string()),
        item_count: 2,
        created_at: Utc.with_ymd_and_hms(2026, 1, 31, 14, 3, 5).unwrap(),
    }
}

/// Store whose every query fails.
pub struct FailingStore;

#[async_trait]
impl ReceiptStore for FailingStore {
    async fn find_by_receipt_number(&self, _: &str) -> StoreResult<Option<ReceiptRecord>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Wraps a memory store and counts queries.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryReceiptStore,
    queries: AtomicUsize,
}

impl CountingStore {
    pub fn with_receipts(receipts: impl IntoIterator<Item = ReceiptRecord>) -> Self {
        CountingStore {
            inner: MemoryReceiptStore::with_receipts(receipts),
            queries: AtomicUsize::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReceiptStore for CountingStore {
    async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> StoreResult<Option<ReceiptRecord>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_receipt_number(receipt_number).await
    }
}
