//! # receipt-lookup: Scan Resolution for Titan Receipt Codes
//!
//! Resolves scanned receipt codes against a receipt store and shapes the
//! answer for the caller.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  lookup page / admin scanner / receipt-cli                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 receipt-lookup (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ReceiptCodeService ──► ReceiptLookupResolver (public)        │   │
//! │  │        │            └──► AdminReceiptLookupResolver (admin)    │   │
//! │  │        │                          │                             │   │
//! │  │        ▼                          ▼                             │   │
//! │  │   receipt-core              Arc<dyn ReceiptStore>               │   │
//! │  │   (generator, codec)              │                             │   │
//! │  └───────────────────────────────────┼─────────────────────────────┘   │
//! │                                      ▼                                  │
//! │                    receipt-db (SQLite) or MemoryReceiptStore           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use receipt_core::{dto::LookupRequest, CodeType, ReceiptCodeConfig};
//! use receipt_db::{Database, DbConfig};
//! use receipt_lookup::ReceiptCodeService;
//!
//! let db = Database::new(DbConfig::new("receipts.db")).await?;
//! let service = ReceiptCodeService::new(Arc::new(db), ReceiptCodeConfig::default());
//!
//! let result = service
//!     .lookup_receipt(&LookupRequest::new("RCP:1:DEFAULT:RCP-001:3UGJW6", CodeType::Qr))
//!     .await;
//! ```

pub mod error;
pub mod resolver;
pub mod service;
pub mod store;

#[cfg(test)]
mod test_support;

pub use error::{StoreError, StoreResult};
pub use resolver::{AdminReceiptLookupResolver, ReceiptLookupResolver};
pub use service::ReceiptCodeService;
pub use store::{MemoryReceiptStore, ReceiptStore};
