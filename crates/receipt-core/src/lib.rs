//! # receipt-core: Receipt Code Logic for Titan POS
//!
//! This crate owns the receipt barcode/QR code contract: the checksum, the
//! `RCP:` wire format, the lookup/image URLs and the receipt projections
//! returned to scanners. It contains no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Code Data Flow                              │
//! │                                                                         │
//! │  Receipt created ──► CodeGenerator ──► wire code + lookup URL + image  │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                   checksum + codec  ◄──── shared by producer/consumer  │
//! │                          ▲                                              │
//! │                          │                                              │
//! │  Code scanned ──► receipt-lookup resolvers ──► receipt-db store        │
//! │                          │                                              │
//! │                          ▼                                              │
//! │          PublicReceiptView / AdminReceiptView                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`checksum`] - 6-character integrity tag over (receipt number, store id)
//! - [`codec`] - `RCP:` wire format, lookup URL and bare identifier decoding
//! - [`generator`] - Scannable payload generation (wire code, URLs, barcode)
//! - [`config`] - Immutable receipt code configuration
//! - [`types`] - Receipt record, projections, code kinds
//! - [`dto`] - Request/response shapes exchanged with callers
//! - [`validation`] - Request validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use receipt_core::codec;
//! use receipt_core::config::ReceiptCodeConfig;
//! use receipt_core::generator::CodeGenerator;
//!
//! let config = ReceiptCodeConfig::default();
//! let generated = CodeGenerator::new(&config).generate("RCP-001", None).unwrap();
//!
//! assert_eq!(generated.wire_code, "RCP:1:DEFAULT:RCP-001:3UGJW6");
//!
//! let payload = codec::decode(&generated.wire_code, &config).unwrap();
//! assert!(codec::validate_checksum(&payload));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checksum;
pub mod codec;
pub mod config;
pub mod dto;
pub mod error;
pub mod generator;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use codec::{CodePayload, ScannedCode};
pub use config::ReceiptCodeConfig;
pub use error::{CodeError, ValidationError};
pub use generator::{CodeGenerator, GeneratedBarcode, GeneratedCode};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix that marks a native receipt wire code.
pub const WIRE_PREFIX: &str = "RCP:";

/// Current revision of the wire format.
pub const CURRENT_CODE_VERSION: u32 = 1;

/// Store identifier used when none is configured or supplied.
pub const DEFAULT_STORE_ID: &str = "DEFAULT";

/// External QR image rendering endpoint.
pub const DEFAULT_QR_IMAGE_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code";

/// Maximum receipt number length accepted from callers.
pub const MAX_RECEIPT_NUMBER_LEN: usize = 50;

/// Maximum store identifier length accepted from callers.
pub const MAX_STORE_ID_LEN: usize = 50;

/// Maximum scanned code length accepted from callers.
///
/// Lookup URLs are longer than wire codes, hence the larger bound.
pub const MAX_SCAN_CODE_LEN: usize = 500;
