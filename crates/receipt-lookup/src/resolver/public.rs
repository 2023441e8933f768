//! Public receipt lookup.

use std::sync::Arc;

use tracing::{debug, error, warn};

use receipt_core::codec;
use receipt_core::dto::{LookupRequest, LookupResult, MSG_CODE_REQUIRED, MSG_LOOKUP_FAILED};
use receipt_core::error::{CodeError, CodeResult};
use receipt_core::{CodeType, ReceiptCodeConfig};

use crate::store::ReceiptStore;

/// Receipt number recovered from a scan, plus the store it named (if any).
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedCode {
    receipt_number: String,
    store_id: Option<String>,
}

/// Resolves scans from unauthenticated callers into limited receipt views.
///
/// ## Flow
/// ```text
/// LookupRequest { code, codeType }
///      │
///      ├── blank code ─────────────────────────► invalid_code "Code is required"
///      │
///      ├── qr ──► decode ──► None ─────────────► invalid_code "Invalid QR code data"
///      │            │
///      │            └──► checksum mismatch ────► invalid_code "QR code validation failed"
///      │                                          (store never queried)
///      ├── barcode ──► trim
///      └── receipt_number ──► as typed
///      │
///      ▼
/// store.find_by_receipt_number
///      ├── Some ──► found, PublicReceiptView
///      ├── None ──► success, receipt_not_found
///      └── Err ───► failure "Failed to lookup receipt"
/// ```
#[derive(Clone)]
pub struct ReceiptLookupResolver {
    store: Arc<dyn ReceiptStore>,
    config: Arc<ReceiptCodeConfig>,
}

impl ReceiptLookupResolver {
    pub fn new(store: Arc<dyn ReceiptStore>, config: Arc<ReceiptCodeConfig>) -> Self {
        ReceiptLookupResolver { store, config }
    }

    /// Looks up the receipt a scan refers to.
    pub async fn lookup(&self, request: &LookupRequest) -> LookupResult {
        if request.code.trim().is_empty() {
            return LookupResult::invalid_code(MSG_CODE_REQUIRED);
        }

        let resolved = match self.resolve(&request.code, request.code_type) {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!(code_type = %request.code_type, error = ?err, "Rejected scanned code");
                return LookupResult::invalid_code(err.to_string());
            }
        };

        debug!(
            receipt_number = %resolved.receipt_number,
            code_type = %request.code_type,
            "Looking up receipt"
        );

        match self.store.find_by_receipt_number(&resolved.receipt_number).await {
            Ok(Some(record)) => {
                let store_id = resolved
                    .store_id
                    .as_deref()
                    .unwrap_or(&self.config.store_id);
                LookupResult::found(record.public_view(store_id))
            }
            Ok(None) => {
                debug!(receipt_number = %resolved.receipt_number, "Receipt not found");
                LookupResult::not_found()
            }
            Err(err) => {
                error!(
                    receipt_number = %resolved.receipt_number,
                    error = %err,
                    "Receipt lookup failed"
                );
                LookupResult::failure(MSG_LOOKUP_FAILED)
            }
        }
    }

    fn resolve(&self, code: &str, code_type: CodeType) -> CodeResult<ResolvedCode> {
        match code_type {
            CodeType::Qr => {
                let payload = codec::decode(code, &self.config).ok_or(CodeError::MalformedCode)?;
                codec::verify_checksum(&payload)?;

                Ok(ResolvedCode {
                    receipt_number: payload.receipt_number,
                    store_id: Some(payload.store_id).filter(|s| !s.is_empty()),
                })
            }
            CodeType::Barcode => Ok(ResolvedCode {
                receipt_number: code.trim().to_string(),
                store_id: None,
            }),
            CodeType::ReceiptNumber => Ok(ResolvedCode {
                receipt_number: code.to_string(),
                store_id: None,
            }),
        }
    }
}
