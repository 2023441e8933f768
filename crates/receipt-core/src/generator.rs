//! # Code Generator
//!
//! Builds everything a printed receipt needs to be scanned later.
//!
//! ```text
//! generate("RCP-001", None)
//!      │
//!      ├── store    = config.store_id                       "DEFAULT"
//!      ├── wire     = encode(signed(receipt, store))        "RCP:1:DEFAULT:RCP-001:3UGJW6"
//!      ├── lookup   = <base>/receipt/<enc>?store=<enc>      "/receipt/RCP-001?store=DEFAULT"
//!      └── image    = <qr service>/?size=NxN&data=<enc(lookup)>
//! ```
//!
//! The rendered QR image encodes the lookup URL, not the wire code: a phone
//! camera opens the lookup page directly, while the admin scanner still reads
//! wire codes printed as text or barcodes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::codec::{encode, encode_uri_component, CodePayload};
use crate::config::ReceiptCodeConfig;
use crate::error::CodeResult;
use crate::types::BarcodeFormat;
use crate::validation::{validate_receipt_number, validate_store_id};

/// Scannable bundle for one receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    pub wire_code: String,
    pub image_url: String,
    pub lookup_url: String,
    pub size: u32,
}

/// Normalized 1D barcode content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBarcode {
    pub barcode_data: String,
    pub format: BarcodeFormat,
}

/// Produces codes and URLs from a borrowed configuration.
///
/// Stateless apart from the configuration; cheap to build per call.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator<'a> {
    config: &'a ReceiptCodeConfig,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(config: &'a ReceiptCodeConfig) -> Self {
        CodeGenerator { config }
    }

    /// Generates the wire code, lookup URL and QR image URL for a receipt.
    ///
    /// `store_id` falls back to the configured store when `None` or blank.
    ///
    /// ## Errors
    /// `CodeError::Validation` wrapping:
    /// - `ValidationError::Required` for a blank receipt number
    /// - `ValidationError::TooLong` for oversized fields
    /// - `ValidationError::InvalidFormat` when a field contains `:`
    pub fn generate(
        &self,
        receipt_number: &str,
        store_id: Option<&str>,
    ) -> CodeResult<GeneratedCode> {
        validate_receipt_number(receipt_number)?;
        validate_store_id(store_id)?;

        let store_id = self.resolve_store(store_id);
        let payload = CodePayload::signed(receipt_number, store_id, self.config.qr_version);
        let lookup_url = self.lookup_url(receipt_number, store_id);
        let size = self.config.default_qr_size;

        Ok(GeneratedCode {
            wire_code: encode(&payload),
            image_url: self.image_url(&lookup_url, size),
            lookup_url,
            size,
        })
    }

    /// `<base>/receipt/<receipt>?store=<store>`, both components escaped.
    pub fn lookup_url(&self, receipt_number: &str, store_id: &str) -> String {
        format!(
            "{}/receipt/{}?store={}",
            self.config.lookup_base_url,
            encode_uri_component(receipt_number),
            encode_uri_component(store_id)
        )
    }

    /// QR image URL for a receipt, optionally overriding the pixel size.
    pub fn qr_image_url(
        &self,
        receipt_number: &str,
        store_id: Option<&str>,
        size: Option<u32>,
    ) -> String {
        let lookup_url = self.lookup_url(receipt_number, self.resolve_store(store_id));
        self.image_url(&lookup_url, size.unwrap_or(self.config.default_qr_size))
    }

    /// QR image URL whose lookup link carries no `store` parameter.
    ///
    /// Kept for receipts printed before store ids were embedded.
    pub fn simple_qr_image_url(&self, receipt_number: &str, size: Option<u32>) -> String {
        let lookup_url = format!(
            "{}/receipt/{}",
            self.config.lookup_base_url,
            encode_uri_component(receipt_number)
        );
        self.image_url(&lookup_url, size.unwrap_or(self.config.default_qr_size))
    }

    /// Normalizes a receipt number for a 1D barcode: keeps `[A-Za-z0-9-]`
    /// and upper-cases the result.
    pub fn barcode(
        &self,
        receipt_number: &str,
        format: BarcodeFormat,
    ) -> CodeResult<GeneratedBarcode> {
        validate_receipt_number(receipt_number)?;

        let barcode_data = receipt_number
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        Ok(GeneratedBarcode {
            barcode_data,
            format,
        })
    }

    fn resolve_store<'s>(&'s self, store_id: Option<&'s str>) -> &'s str {
        match store_id {
            Some(store_id) if !store_id.trim().is_empty() => store_id,
            _ => &self.config.store_id,
        }
    }

    fn image_url(&self, data: &str, size: u32) -> String {
        format!(
            "{}/?size={size}x{size}&data={}",
            self.config.qr_image_service_base,
            encode_uri_component(data)
        )
    }
}
