//! Input validation for receipt code requests.
//!
//! Lengths are counted in characters, not bytes.

use crate::error::ValidationError;
use crate::{MAX_RECEIPT_NUMBER_LEN, MAX_SCAN_CODE_LEN, MAX_STORE_ID_LEN};

/// Field delimiter of the wire format; not allowed inside encoded fields.
const FIELD_DELIMITER: char = ':';

/// Validates a receipt number destined for a code.
pub fn validate_receipt_number(receipt_number: &str) -> Result<(), ValidationError> {
    validate_field("Receipt number", receipt_number, MAX_RECEIPT_NUMBER_LEN)
}

/// Validates an optional store id. `None` and blank values pass; the caller
/// falls back to the configured store.
pub fn validate_store_id(store_id: Option<&str>) -> Result<(), ValidationError> {
    match store_id {
        Some(store_id) if !store_id.trim().is_empty() => {
            validate_field("Store ID", store_id, MAX_STORE_ID_LEN)
        }
        _ => Ok(()),
    }
}

/// Validates raw scanner input before it reaches the decoder.
pub fn validate_scan_code(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::required("Code"));
    }
    check_length("Code", code, MAX_SCAN_CODE_LEN)
}

fn validate_field(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    check_length(field, value, max)?;

    if value.contains(FIELD_DELIMITER) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("must not contain '{FIELD_DELIMITER}'"),
        });
    }

    Ok(())
}

fn check_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number_rules() {
        assert!(validate_receipt_number("RCP-001").is_ok());
        assert_eq!(
            validate_receipt_number("  "),
            Err(ValidationError::required("Receipt number"))
        );
        assert!(matches!(
            validate_receipt_number(&"9".repeat(51)),
            Err(ValidationError::TooLong { max: 50, .. })
        ));
        assert!(validate_receipt_number(&"9".repeat(50)).is_ok());
        assert!(matches!(
            validate_receipt_number("RCP:001"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(validate_receipt_number(&"É".repeat(50)).is_ok());
    }

    #[test]
    fn test_store_id_is_optional() {
        assert!(validate_store_id(None).is_ok());
        assert!(validate_store_id(Some("")).is_ok());
        assert!(validate_store_id(Some("STORE-A")).is_ok());
        assert!(validate_store_id(Some("A:B")).is_err());
        assert!(validate_store_id(Some(&"S".repeat(51))).is_err());
    }

    #[test]
    fn test_scan_code_rules() {
        assert_eq!(
            validate_scan_code(""),
            Err(ValidationError::required("Code"))
        );
        assert!(validate_scan_code("RCP:1:DEFAULT:RCP-001:3UGJW6").is_ok());
        assert!(validate_scan_code(&"x".repeat(501)).is_err());
    }
}
