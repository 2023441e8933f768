//! # Repository Module
//!
//! Database repository implementations for the receipt store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Lookup resolver                                                       │
//! │       │                                                                 │
//! │       │  db.receipts().find_by_receipt_number("RCP-001")               │
//! │       ▼                                                                 │
//! │  ReceiptRepository                                                     │
//! │  ├── find_by_receipt_number(&self, receipt_number)                     │
//! │  ├── insert_receipt(&self, receipt)                                    │
//! │  ├── add_item(&self, receipt_id, item)                                 │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod receipt;
