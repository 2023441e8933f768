//! # Receipt Code Service
//!
//! The facade the lookup page, the admin scanner and the CLI talk to. It
//! validates requests, delegates to the generator and resolvers, and always
//! answers with a response value.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Generation (pure)              │  Lookup (one store query)             │
//! │  ─────────────────              │  ────────────────────────             │
//! │  generate_qr_code               │  lookup_receipt            (public)   │
//! │  generate_barcode               │  lookup_by_receipt_number  (public)   │
//! │  qr_image_url                   │  admin_lookup_receipt      (admin)    │
//! │  simple_qr_image_url            │  scan_and_lookup           (admin)    │
//! │                                 │                                       │
//! │  Pre-parsing (pure)             │  Configuration                        │
//! │  ─────────────────              │  ─────────────                        │
//! │  decode                         │  config / store_id                    │
//! │  parse_scanned_code             │  reconfigure ──► new service          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use receipt_core::codec::{self, CodePayload, ScannedCode};
use receipt_core::dto::{
    AdminLookupResult, GenerateBarcodeRequest, GenerateBarcodeResponse, GenerateQrCodeRequest,
    GenerateQrCodeResponse, LookupRequest, LookupResult, MSG_CODE_REQUIRED,
    MSG_RECEIPT_NUMBER_REQUIRED,
};
use receipt_core::validation::validate_scan_code;
use receipt_core::{CodeGenerator, CodeType, ReceiptCodeConfig};

use crate::resolver::{AdminReceiptLookupResolver, ReceiptLookupResolver};
use crate::store::ReceiptStore;

/// Receipt code generation and lookup over one store and one configuration.
///
/// Cloning is cheap; clones share the store and configuration.
#[derive(Clone)]
pub struct ReceiptCodeService {
    config: Arc<ReceiptCodeConfig>,
    store: Arc<dyn ReceiptStore>,
    public: ReceiptLookupResolver,
    admin: AdminReceiptLookupResolver,
}

impl ReceiptCodeService {
    pub fn new(store: Arc<dyn ReceiptStore>, config: ReceiptCodeConfig) -> Self {
        let config = Arc::new(config);

        info!(
            store_id = %config.store_id,
            lookup_base_url = %config.lookup_base_url,
            qr_version = config.qr_version,
            "Receipt code service configured"
        );

        ReceiptCodeService {
            public: ReceiptLookupResolver::new(store.clone(), config.clone()),
            admin: AdminReceiptLookupResolver::new(store.clone()),
            config,
            store,
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn config(&self) -> &ReceiptCodeConfig {
        &self.config
    }

    /// Returns a new service over the same store with `config`.
    ///
    /// `self` keeps its configuration; in-flight lookups on either service are
    /// unaffected.
    pub fn reconfigure(&self, config: ReceiptCodeConfig) -> Self {
        ReceiptCodeService::new(self.store.clone(), config)
    }

    pub fn store_id(&self) -> &str {
        &self.config.store_id
    }

    fn generator(&self) -> CodeGenerator<'_> {
        CodeGenerator::new(&self.config)
    }

    // =========================================================================
    // Generation
    // =========================================================================

    pub fn generate_qr_code(&self, request: &GenerateQrCodeRequest) -> GenerateQrCodeResponse {
        match self
            .generator()
            .generate(&request.receipt_number, request.store_id.as_deref())
        {
            Ok(code) => {
                debug!(receipt_number = %request.receipt_number, "Generated receipt QR code");
                GenerateQrCodeResponse::from(code)
            }
            Err(err) => GenerateQrCodeResponse::failure(err.to_string()),
        }
    }

    pub fn generate_barcode(&self, request: &GenerateBarcodeRequest) -> GenerateBarcodeResponse {
        let format = request.format.unwrap_or_default();

        match self.generator().barcode(&request.receipt_number, format) {
            Ok(barcode) => GenerateBarcodeResponse::success(
                barcode,
                request.width.unwrap_or(self.config.default_barcode_width),
                request.height.unwrap_or(self.config.default_barcode_height),
            ),
            Err(err) => GenerateBarcodeResponse::failure(format, err.to_string()),
        }
    }

    pub fn qr_image_url(
        &self,
        receipt_number: &str,
        store_id: Option<&str>,
        size: Option<u32>,
    ) -> String {
        self.generator().qr_image_url(receipt_number, store_id, size)
    }

    pub fn simple_qr_image_url(&self, receipt_number: &str, size: Option<u32>) -> String {
        self.generator().simple_qr_image_url(receipt_number, size)
    }

    // =========================================================================
    // Public Lookup
    // =========================================================================

    /// Public lookup of a scanned or typed code.
    pub async fn lookup_receipt(&self, request: &LookupRequest) -> LookupResult {
        if let Err(err) = validate_scan_code(&request.code) {
            return LookupResult::invalid_code(err.to_string());
        }
        self.public.lookup(request).await
    }

    /// Public lookup by a typed receipt number. Surrounding whitespace is
    /// ignored.
    pub async fn lookup_by_receipt_number(&self, receipt_number: &str) -> LookupResult {
        let receipt_number = receipt_number.trim();
        if receipt_number.is_empty() {
            return LookupResult::invalid_code(MSG_RECEIPT_NUMBER_REQUIRED);
        }

        self.lookup_receipt(&LookupRequest::new(receipt_number, CodeType::ReceiptNumber))
            .await
    }

    // =========================================================================
    // Admin Lookup
    // =========================================================================

    pub async fn admin_lookup_receipt(&self, code: &str) -> AdminLookupResult {
        if let Err(err) = validate_scan_code(code) {
            return AdminLookupResult::failure(err.to_string());
        }
        self.admin.lookup(code).await
    }

    /// Admin scanner entry point. The declared code type is informational;
    /// the admin decode rule applies to every scan.
    pub async fn scan_and_lookup(&self, code: &str, code_type: CodeType) -> AdminLookupResult {
        let code = code.trim();
        if code.is_empty() {
            return AdminLookupResult::failure(MSG_CODE_REQUIRED);
        }

        debug!(code_type = %code_type, "Admin scan");
        self.admin_lookup_receipt(code).await
    }

    // =========================================================================
    // Pre-parsing
    // =========================================================================

    /// Decodes a scan using this service's configured defaults.
    pub fn decode(&self, raw: &str) -> Option<CodePayload> {
        codec::decode(raw, &self.config)
    }

    /// Pre-parses a scan without applying defaults.
    pub fn parse_scanned_code(&self, raw: &str) -> Option<ScannedCode> {
        codec::parse_scanned_code(raw)
    }
}
