//! # Receipt Code Configuration
//!
//! Environment-specific defaults for code generation and lookup.
//!
//! ## Immutability
//! A `ReceiptCodeConfig` is a plain value. Generators and resolvers receive it
//! at construction and never see it change; "reconfiguring" means building a
//! new value (via the `with_*` methods) and a new service around it.
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  service_a ──► Arc<Config { store_id: "DEFAULT" }>                      │
//! │                                                                         │
//! │  service_b = service_a.reconfigure(                                    │
//! │      service_a.config().clone().with_store_id("STORE-7"))              │
//! │                                                                         │
//! │  service_b ──► Arc<Config { store_id: "STORE-7" }>   (new value)       │
//! │  service_a ──► unchanged                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{CURRENT_CODE_VERSION, DEFAULT_QR_IMAGE_SERVICE, DEFAULT_STORE_ID};

/// Configuration for barcode/QR code generation and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptCodeConfig {
    /// Store identifier embedded in codes and used when a scan carries none.
    pub store_id: String,

    /// Base URL of the public receipt lookup page (may be empty for
    /// site-relative links).
    pub lookup_base_url: String,

    /// External QR image rendering endpoint.
    pub qr_image_service_base: String,

    /// QR code size in pixels.
    pub default_qr_size: u32,

    /// Barcode width in pixels.
    pub default_barcode_width: u32,

    /// Barcode height in pixels.
    pub default_barcode_height: u32,

    /// Wire format revision written into new codes.
    pub qr_version: u32,
}

impl Default for ReceiptCodeConfig {
    fn default() -> Self {
        ReceiptCodeConfig {
            store_id: DEFAULT_STORE_ID.to_string(),
            lookup_base_url: String::new(),
            qr_image_service_base: DEFAULT_QR_IMAGE_SERVICE.to_string(),
            default_qr_size: 200,
            default_barcode_width: 200,
            default_barcode_height: 80,
            qr_version: CURRENT_CODE_VERSION,
        }
    }
}

impl ReceiptCodeConfig {
    /// Sets the store identifier. Blank values keep the current one.
    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        let store_id = store_id.into();
        if !store_id.trim().is_empty() {
            self.store_id = store_id;
        }
        self
    }

    /// Sets the lookup page base URL.
    pub fn with_lookup_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.lookup_base_url = base_url.into();
        self
    }

    /// Sets the QR image rendering endpoint.
    pub fn with_qr_image_service_base(mut self, base_url: impl Into<String>) -> Self {
        self.qr_image_service_base = base_url.into();
        self
    }

    /// Sets the default QR code size in pixels.
    pub fn with_qr_size(mut self, size: u32) -> Self {
        self.default_qr_size = size;
        self
    }

    /// Sets the default barcode dimensions in pixels.
    pub fn with_barcode_size(mut self, width: u32, height: u32) -> Self {
        self.default_barcode_width = width;
        self.default_barcode_height = height;
        self
    }
}
