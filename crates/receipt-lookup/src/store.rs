//! # Receipt Store Seam
//!
//! The one query the resolvers need, behind a trait so they never depend on
//! SQLite directly.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────────────────────┐
//! │  ReceiptLookup...    │        │  impl ReceiptStore for               │
//! │  resolvers           │──dyn──►│  ├── ReceiptRepository  (receipt-db) │
//! │  Arc<dyn ReceiptStore>│        │  ├── Database           (receipt-db) │
//! └──────────────────────┘        │  └── MemoryReceiptStore (this file)  │
//!                                 └──────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use receipt_core::ReceiptRecord;
use receipt_db::{Database, ReceiptRepository};

use crate::error::StoreResult;

/// Read access to stored receipts.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Exact-match lookup. `Ok(None)` means the store answered and holds no
    /// such receipt.
    async fn find_by_receipt_number(&self, receipt_number: &str)
        -> StoreResult<Option<ReceiptRecord>>;
}

#[async_trait]
impl ReceiptStore for ReceiptRepository {
    async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> StoreResult<Option<ReceiptRecord>> {
        Ok(ReceiptRepository::find_by_receipt_number(self, receipt_number).await?)
    }
}

#[async_trait]
impl ReceiptStore for Database {
    async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> StoreResult<Option<ReceiptRecord>> {
        Ok(self.receipts().find_by_receipt_number(receipt_number).await?)
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Receipt store kept in a map, keyed by receipt number.
///
/// For tests and demos that should not touch a database file.
#[derive(Debug, Default)]
pub struct MemoryReceiptStore {
    receipts: RwLock<HashMap<String, ReceiptRecord>>,
}

impl MemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-filled with `receipts`.
    pub fn with_receipts(receipts: impl IntoIterator<Item = ReceiptRecord>) -> Self {
        let receipts = receipts
            .into_iter()
            .map(|r| (r.receipt_number.clone(), r))
            .collect();

        MemoryReceiptStore {
            receipts: RwLock::new(receipts),
        }
    }

    /// Inserts or replaces a receipt.
    pub async fn insert(&self, receipt: ReceiptRecord) {
        self.receipts
            .write()
            .await
            .insert(receipt.receipt_number.clone(), receipt);
    }

    pub async fn len(&self) -> usize {
        self.receipts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.receipts.read().await.is_empty()
    }
}

#[async_trait]
impl ReceiptStore for MemoryReceiptStore {
    async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> StoreResult<Option<ReceiptRecord>> {
        Ok(self.receipts.read().await.get(receipt_number).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_record;

    #[tokio::test]
    async fn test_memory_store_exact_match() {
        let store = MemoryReceiptStore::with_receipts([sample_record("RCP-777")]);

        assert!(store.find_by_receipt_number("RCP-777").await.unwrap().is_some());
        assert!(store.find_by_receipt_number("rcp-777").await.unwrap().is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_store_insert_replaces() {
        let store = MemoryReceiptStore::new();
        assert!(store.is_empty().await);

        store.insert(sample_record("RCP-1")).await;
        let mut updated = sample_record("RCP-1");
        updated.notes = Some("reprinted".to_string());
        store.insert(updated).await;

        let found = store.find_by_receipt_number("RCP-1").await.unwrap().unwrap();
        assert_eq!(found.notes.as_deref(), Some("reprinted"));
        assert_eq!(store.len().await, 1);
    }
}
