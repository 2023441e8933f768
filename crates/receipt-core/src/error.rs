//! # Error Types
//!
//! Domain-specific error types for receipt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  receipt-core errors (this file)                                       │
//! │  ├── CodeError        - Scanned code could not be trusted              │
//! │  └── ValidationError  - Missing/oversized request input                │
//! │                                                                         │
//! │  receipt-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  receipt-lookup errors                                                 │
//! │  └── StoreError       - Receipt store unavailable / query failed       │
//! │                                                                         │
//! │  None of these cross the service boundary: each is folded into a      │
//! │  structured `{ success, found, error }` response.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Code Error
// =============================================================================

/// Reasons a scanned code cannot be resolved to a receipt identity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    /// The scanned text is not a recognizable receipt code.
    ///
    /// ## When This Occurs
    /// - `RCP:` prefix with fewer than five `:`-separated fields
    /// - Blank input handed to the decoder
    #[error("Invalid QR code data")]
    MalformedCode,

    /// The wire code decoded but its checksum does not match its contents.
    ///
    /// ## User Workflow
    /// ```text
    /// Camera scan: RCP:1:DEFAULT:RCP-001:3UGJW7   (last char garbled)
    ///      │
    ///      ▼
    /// checksum("RCP-001", "DEFAULT") = 3UGJW6 ≠ 3UGJW7
    ///      │
    ///      ▼
    /// ChecksumMismatch ─► notFoundReason: invalid_code
    /// ```
    #[error("QR code validation failed")]
    ChecksumMismatch { expected: String, actual: String },

    /// Generator input rejected (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Display strings double as the `error` text of structured responses, so
/// `Required { field: "Receipt number" }` renders "Receipt number is required".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., reserved delimiter inside a field).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("Invalid {field}: must be one of {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CodeError.
pub type CodeResult<T> = Result<T, CodeError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_match_response_text() {
        assert_eq!(
            ValidationError::required("Receipt number").to_string(),
            "Receipt number is required"
        );
        assert_eq!(ValidationError::required("Code").to_string(), "Code is required");

        let err = ValidationError::TooLong {
            field: "Code".to_string(),
            max: 500,
        };
        assert_eq!(err.to_string(), "Code must not exceed 500 characters");
    }

    #[test]
    fn test_code_error_messages() {
        assert_eq!(CodeError::MalformedCode.to_string(), "Invalid QR code data");

        let err = CodeError::ChecksumMismatch {
            expected: "3UGJW6".to_string(),
            actual: "XXXXXX".to_string(),
        };
        assert_eq!(err.to_string(), "QR code validation failed");
    }

    #[test]
    fn test_validation_converts_to_code_error() {
        let code_err: CodeError = ValidationError::required("Code").into();
        assert!(matches!(code_err, CodeError::Validation(_)));
        assert_eq!(code_err.to_string(), "Code is required");
    }
}
