//! # Request/Response DTOs
//!
//! Shapes exchanged with scanners, the lookup page and the admin console.
//!
//! ## Lookup Outcome Flags
//! ```text
//! ┌──────────────────────────────┬─────────┬───────┬───────────────────┐
//! │ Outcome                      │ success │ found │ notFoundReason    │
//! ├──────────────────────────────┼─────────┼───────┼───────────────────┤
//! │ blank / malformed / tampered │ false   │ false │ invalid_code      │
//! │ valid code, no such receipt  │ true    │ false │ receipt_not_found │
//! │ valid code, receipt exists   │ true    │ true  │ -                 │
//! │ store query failed           │ false   │ false │ -                 │
//! └──────────────────────────────┴─────────┴───────┴───────────────────┘
//! ```
//! `success` says the lookup ran; `found` says a receipt came back.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::generator::{GeneratedBarcode, GeneratedCode};
use crate::types::{AdminReceiptView, BarcodeFormat, CodeType, NotFoundReason, PublicReceiptView};

// =============================================================================
// Messages
// =============================================================================

pub const MSG_CODE_REQUIRED: &str = "Code is required";
pub const MSG_INVALID_QR: &str = "Invalid QR code data";
pub const MSG_QR_VALIDATION_FAILED: &str = "QR code validation failed";
pub const MSG_RECEIPT_NUMBER_REQUIRED: &str = "Receipt number is required";
pub const MSG_LOOKUP_FAILED: &str = "Failed to lookup receipt";

// =============================================================================
// Requests
// =============================================================================

/// A scanned or typed code and what the caller thinks it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    /// Untrusted raw text.
    pub code: String,
    pub code_type: CodeType,
}

impl LookupRequest {
    pub fn new(code: impl Into<String>, code_type: CodeType) -> Self {
        LookupRequest {
            code: code.into(),
            code_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrCodeRequest {
    pub receipt_number: String,
    #[serde(default)]
    #[ts(optional)]
    pub store_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBarcodeRequest {
    pub receipt_number: String,
    #[serde(default)]
    #[ts(optional)]
    pub format: Option<BarcodeFormat>,
    #[serde(default)]
    #[ts(optional)]
    pub width: Option<u32>,
    #[serde(default)]
    #[ts(optional)]
    pub height: Option<u32>,
}

// =============================================================================
// Generation Responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQrCodeResponse {
    pub success: bool,
    /// Native wire code; empty on failure.
    pub qr_code_data: String,
    /// External image service URL rendering `lookup_url`.
    pub qr_code_url: String,
    pub lookup_url: String,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl GenerateQrCodeResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        GenerateQrCodeResponse {
            success: false,
            qr_code_data: String::new(),
            qr_code_url: String::new(),
            lookup_url: String::new(),
            size: 0,
            error: Some(error.into()),
        }
    }
}

impl From<GeneratedCode> for GenerateQrCodeResponse {
    fn from(code: GeneratedCode) -> Self {
        GenerateQrCodeResponse {
            success: true,
            qr_code_data: code.wire_code,
            qr_code_url: code.image_url,
            lookup_url: code.lookup_url,
            size: code.size,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBarcodeResponse {
    pub success: bool,
    pub barcode_data: String,
    pub format: BarcodeFormat,
    /// Render width in pixels.
    pub width: u32,
    /// Render height in pixels.
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl GenerateBarcodeResponse {
    pub fn success(barcode: GeneratedBarcode, width: u32, height: u32) -> Self {
        GenerateBarcodeResponse {
            success: true,
            barcode_data: barcode.barcode_data,
            format: barcode.format,
            width,
            height,
            error: None,
        }
    }

    pub fn failure(format: BarcodeFormat, error: impl Into<String>) -> Self {
        GenerateBarcodeResponse {
            success: false,
            barcode_data: String::new(),
            format,
            width: 0,
            height: 0,
            error: Some(error.into()),
        }
    }
}

// =============================================================================
// Lookup Responses
// =============================================================================

/// Public lookup outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub success: bool,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub receipt: Option<PublicReceiptView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub not_found_reason: Option<NotFoundReason>,
}

impl LookupResult {
    pub fn found(receipt: PublicReceiptView) -> Self {
        LookupResult {
            success: true,
            found: true,
            receipt: Some(receipt),
            error: None,
            not_found_reason: None,
        }
    }

    pub fn not_found() -> Self {
        LookupResult {
            success: true,
            found: false,
            receipt: None,
            error: None,
            not_found_reason: Some(NotFoundReason::ReceiptNotFound),
        }
    }

    /// The code itself was unusable; the store was never queried.
    pub fn invalid_code(error: impl Into<String>) -> Self {
        LookupResult {
            success: false,
            found: false,
            receipt: None,
            error: Some(error.into()),
            not_found_reason: Some(NotFoundReason::InvalidCode),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        LookupResult {
            success: false,
            found: false,
            receipt: None,
            error: Some(error.into()),
            not_found_reason: None,
        }
    }
}

/// Admin lookup outcome. Carries no `notFoundReason`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdminLookupResult {
    pub success: bool,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub receipt: Option<AdminReceiptView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
}

impl AdminLookupResult {
    pub fn found(receipt: AdminReceiptView) -> Self {
        AdminLookupResult {
            success: true,
            found: true,
            receipt: Some(receipt),
            error: None,
        }
    }

    pub fn not_found() -> Self {
        AdminLookupResult {
            success: true,
            found: false,
            receipt: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        AdminLookupResult {
            success: false,
            found: false,
            receipt: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sample_view() -> PublicReceiptView {
        PublicReceiptView {
            id: "r-1".to_string(),
            receipt_number: "RCP-001".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            transaction_time: NaiveTime::from_hms_opt(14, 3, 0).unwrap(),
            grand_total_cents: 700,
            customer_name: None,
            store_id: "DEFAULT".to_string(),
            item_count: 2,
        }
    }

    #[test]
    fn test_lookup_request_wire_shape() {
        let request: LookupRequest =
            serde_json::from_str(r#"{"code":"RCP-001","codeType":"receipt_number"}"#).unwrap();
        assert_eq!(request, LookupRequest::new("RCP-001", CodeType::ReceiptNumber));
    }

    #[test]
    fn test_not_found_serialization() {
        let json = serde_json::to_value(LookupResult::not_found()).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["found"], false);
        assert_eq!(json["notFoundReason"], "receipt_not_found");
        assert!(json.get("receipt").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_absent_fields_are_optional_in_bindings() {
        let decl = LookupResult::decl();
        assert!(decl.contains("receipt?: PublicReceiptView"));
        assert!(decl.contains("error?: string"));
        assert!(decl.contains("notFoundReason?: NotFoundReason"));

        let json = serde_json::to_value(LookupResult::found(sample_view())).unwrap();
        assert!(json.get("error").is_none());
        assert!(json.get("notFoundReason").is_none());
    }

    #[test]
    fn test_invalid_code_serialization() {
        let json = serde_json::to_value(LookupResult::invalid_code(MSG_CODE_REQUIRED)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Code is required");
        assert_eq!(json["notFoundReason"], "invalid_code");
    }

    #[test]
    fn test_qr_failure_clears_payload() {
        let response = GenerateQrCodeResponse::failure(MSG_RECEIPT_NUMBER_REQUIRED);
        assert!(!response.success);
        assert_eq!(response.qr_code_data, "");
        assert_eq!(response.size, 0);
        assert_eq!(response.error.as_deref(), Some("Receipt number is required"));
    }

    #[test]
    fn test_barcode_request_defaults() {
        let request: GenerateBarcodeRequest =
            serde_json::from_str(r#"{"receiptNumber":"RCP-001"}"#).unwrap();
        assert_eq!(request.format, None);
        assert_eq!(request.width, None);
    }
}
