//! # Domain Types
//!
//! Receipt record, the two read projections, and the code kinds a scanner
//! can hand in.
//!
//! ## Projections
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ReceiptRecord (store)                             │
//! │                                                                         │
//! │   id, receipt_number, transaction date/time, subtotal, tax rate/amount, │
//! │   grand_total, customer name/phone/email, notes, item_count, created_at │
//! │          │                                        │                    │
//! │          ▼                                        ▼                    │
//! │  ┌──────────────────────┐            ┌──────────────────────────┐      │
//! │  │  PublicReceiptView   │            │    AdminReceiptView      │      │
//! │  │  (unauthenticated)   │            │    (authenticated)       │      │
//! │  │  identity, date/time │            │    everything, incl.     │      │
//! │  │  total, name, count, │            │    phone, email, notes,  │      │
//! │  │  store id            │            │    tax breakdown         │      │
//! │  └──────────────────────┘            └──────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Money follows the Titan convention: integer cents, tax rate in basis points.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Code Type
// =============================================================================

/// The kind of code a caller claims to have scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CodeType {
    /// QR code: native wire code, lookup URL, or bare identifier.
    Qr,
    /// 1D barcode: the receipt number itself, no checksum.
    Barcode,
    /// Manually typed receipt number.
    ReceiptNumber,
}

impl CodeType {
    /// Wire names accepted by [`FromStr`].
    pub const ALLOWED: [&'static str; 3] = ["qr", "barcode", "receipt_number"];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeType::Qr => "qr",
            CodeType::Barcode => "barcode",
            CodeType::ReceiptNumber => "receipt_number",
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qr" => Ok(CodeType::Qr),
            "barcode" => Ok(CodeType::Barcode),
            "receipt_number" => Ok(CodeType::ReceiptNumber),
            _ => Err(ValidationError::NotAllowed {
                field: "code type".to_string(),
                allowed: CodeType::ALLOWED.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Not Found Reason
// =============================================================================

/// Why a public lookup produced no receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// Blank, malformed, or checksum-failing code.
    InvalidCode,
    /// Code was fine; no such receipt in the store.
    ReceiptNotFound,
    /// Reserved for per-store lookups; never produced yet.
    StoreMismatch,
    /// Reserved for receipt retention windows; never produced yet.
    Expired,
}

// =============================================================================
// Barcode Format
// =============================================================================

/// Symbologies a barcode can be rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeFormat {
    #[default]
    Code128,
    Code39,
    Ean13,
    Qr,
}

impl BarcodeFormat {
    /// Wire names accepted by [`FromStr`].
    pub const ALLOWED: [&'static str; 4] = ["code128", "code39", "ean13", "qr"];

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeFormat::Code128 => "code128",
            BarcodeFormat::Code39 => "code39",
            BarcodeFormat::Ean13 => "ean13",
            BarcodeFormat::Qr => "qr",
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarcodeFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code128" => Ok(BarcodeFormat::Code128),
            "code39" => Ok(BarcodeFormat::Code39),
            "ean13" => Ok(BarcodeFormat::Ean13),
            "qr" => Ok(BarcodeFormat::Qr),
            _ => Err(ValidationError::NotAllowed {
                field: "barcode format".to_string(),
                allowed: BarcodeFormat::ALLOWED.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Receipt Record
// =============================================================================

/// A stored receipt as returned by the receipt store.
///
/// Owned and persisted by the store; this crate only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRecord {
    pub id: String,
    pub receipt_number: String,
    pub transaction_date: NaiveDate,
    pub transaction_time: NaiveTime,
    pub subtotal_cents: i64,
    /// Tax rate in basis points (825 = 8.25%).
    pub tax_rate_bps: u32,
    pub tax_amount_cents: i64,
    pub grand_total_cents: i64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    /// Number of line items on the receipt.
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ReceiptRecord {
    /// Limited projection for unauthenticated callers.
    pub fn public_view(&self, store_id: &str) -> PublicReceiptView {
        PublicReceiptView {
            id: self.id.clone(),
            receipt_number: self.receipt_number.clone(),
            transaction_date: self.transaction_date,
            transaction_time: self.transaction_time,
            grand_total_cents: self.grand_total_cents,
            customer_name: self.customer_name.clone(),
            store_id: store_id.to_string(),
            item_count: self.item_count,
        }
    }

    /// Full projection for authenticated back-office callers.
    pub fn admin_view(&self) -> AdminReceiptView {
        AdminReceiptView {
            id: self.id.clone(),
            receipt_number: self.receipt_number.clone(),
            transaction_date: self.transaction_date,
            transaction_time: self.transaction_time,
            subtotal_cents: self.subtotal_cents,
            tax_rate_bps: self.tax_rate_bps,
            tax_amount_cents: self.tax_amount_cents,
            grand_total_cents: self.grand_total_cents,
            customer_name: self.customer_name.clone(),
            customer_phone: self.customer_phone.clone(),
            customer_email: self.customer_email.clone(),
            notes: self.notes.clone(),
            item_count: self.item_count,
            created_at: self.created_at,
        }
    }
}

// =============================================================================
// Views
// =============================================================================

/// Receipt as shown to a customer who scanned their own receipt.
///
/// Never carries phone, email, notes or the tax breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PublicReceiptView {
    pub id: String,
    pub receipt_number: String,
    #[ts(as = "String")]
    pub transaction_date: NaiveDate,
    #[ts(as = "String")]
    pub transaction_time: NaiveTime,
    pub grand_total_cents: i64,
    pub customer_name: Option<String>,
    pub store_id: String,
    pub item_count: i64,
}

/// Receipt as shown in the admin scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdminReceiptView {
    pub id: String,
    pub receipt_number: String,
    #[ts(as = "String")]
    pub transaction_date: NaiveDate,
    #[ts(as = "String")]
    pub transaction_time: NaiveTime,
    pub subtotal_cents: i64,
    pub tax_rate_bps: u32,
    pub tax_amount_cents: i64,
    pub grand_total_cents: i64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
    pub item_count: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ReceiptRecord {
        ReceiptRecord {
            id: "0b8a3c1e-6a0f-4b8e-9d7e-1f2a3b4c5d6e".to_string(),
            receipt_number: "RCP-777".to_string(),
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
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_code_type_parsing() {
        assert_eq!("qr".parse::<CodeType>().unwrap(), CodeType::Qr);
        assert_eq!("barcode".parse::<CodeType>().unwrap(), CodeType::Barcode);
        assert_eq!(
            "receipt_number".parse::<CodeType>().unwrap(),
            CodeType::ReceiptNumber
        );
        assert!("QR".parse::<CodeType>().is_err());
        assert!("nfc".parse::<CodeType>().is_err());
    }

    #[test]
    fn test_barcode_format_parsing() {
        assert_eq!(BarcodeFormat::default(), BarcodeFormat::Code128);
        assert_eq!("ean13".parse::<BarcodeFormat>().unwrap(), BarcodeFormat::Ean13);
        assert!("pdf417".parse::<BarcodeFormat>().is_err());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(CodeType::ReceiptNumber).unwrap(),
            "receipt_number"
        );
        assert_eq!(
            serde_json::to_value(NotFoundReason::ReceiptNotFound).unwrap(),
            "receipt_not_found"
        );
        assert_eq!(serde_json::to_value(BarcodeFormat::Code39).unwrap(), "code39");
    }

    #[test]
    fn test_public_view_omits_private_fields() {
        let view = sample_record().public_view("STORE-A");
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["receiptNumber"], "RCP-777");
        assert_eq!(json["storeId"], "STORE-A");
        assert_eq!(json["grandTotalCents"], 1083);
        assert_eq!(json["transactionDate"], "2026-01-31");
        assert!(json.get("customerPhone").is_none());
        assert!(json.get("customerEmail").is_none());
        assert!(json.get("notes").is_none());
        assert!(json.get("taxAmountCents").is_none());
    }

    #[test]
    fn test_admin_view_carries_everything() {
        let record = sample_record();
        let view = record.admin_view();

        assert_eq!(view.customer_phone.as_deref(), Some("555-0100"));
        assert_eq!(view.customer_email.as_deref(), Some("ada@example.com"));
        assert_eq!(view.notes.as_deref(), Some("gift wrap"));
        assert_eq!(view.tax_rate_bps, 825);
        assert_eq!(view.created_at, record.created_at);
    }
}
