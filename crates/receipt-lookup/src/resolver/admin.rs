//! Admin receipt lookup.

use std::sync::Arc;

use tracing::{debug, error};

use receipt_core::codec;
use receipt_core::dto::{AdminLookupResult, MSG_CODE_REQUIRED, MSG_LOOKUP_FAILED};
use receipt_core::WIRE_PREFIX;

use crate::store::ReceiptStore;

/// Resolves scans from the back-office scanner into full receipt views.
///
/// Only strings starting with `RCP:` are decoded; anything else, including
/// lookup URLs and wire codes too short to decode, is looked up verbatim.
/// Checksums are not checked on this path.
#[derive(Clone)]
pub struct AdminReceiptLookupResolver {
    store: Arc<dyn ReceiptStore>,
}

impl AdminReceiptLookupResolver {
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        AdminReceiptLookupResolver { store }
    }

    pub async fn lookup(&self, code: &str) -> AdminLookupResult {
        if code.trim().is_empty() {
            return AdminLookupResult::failure(MSG_CODE_REQUIRED);
        }

        let receipt_number = receipt_number_of(code);
        debug!(receipt_number = %receipt_number, "Admin receipt lookup");

        match self.store.find_by_receipt_number(&receipt_number).await {
            Ok(Some(record)) => AdminLookupResult::found(record.admin_view()),
            Ok(None) => AdminLookupResult::not_found(),
            Err(err) => {
                error!(receipt_number = %receipt_number, error = %err, "Admin receipt lookup failed");
                AdminLookupResult::failure(MSG_LOOKUP_FAILED)
            }
        }
    }
}

fn receipt_number_of(code: &str) -> String {
    if code.starts_with(WIRE_PREFIX) {
        if let Some(payload) = codec::decode_wire(code) {
            return payload.receipt_number;
        }
    }
    code.to_string()
}
