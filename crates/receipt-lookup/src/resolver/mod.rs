//! # Lookup Resolvers
//!
//! Both resolvers recover a receipt number from a scan and ask the store for
//! it. They differ in how much they trust the scan and how much they reveal.
//!
//! ```text
//! ┌──────────────────┬──────────────────────────────┬───────────────────────┐
//! │                  │ ReceiptLookupResolver        │ AdminReceiptLookup... │
//! ├──────────────────┼──────────────────────────────┼───────────────────────┤
//! │ caller           │ anyone (customer's phone)    │ authenticated staff   │
//! │ decodes          │ wire, URL, bare (qr only)    │ wire only ("RCP:")    │
//! │ checksum         │ enforced on wire codes       │ never                 │
//! │ undecodable code │ invalid_code                 │ used verbatim         │
//! │ returns          │ PublicReceiptView            │ AdminReceiptView      │
//! └──────────────────┴──────────────────────────────┴───────────────────────┘
//! ```
//!
//! Every outcome, including store failures, comes back as a result value.

pub mod admin;
pub mod public;

pub use admin::AdminReceiptLookupResolver;
pub use public::ReceiptLookupResolver;
