//! # Code Codec
//!
//! Encodes a receipt identity into the `RCP:` wire format and recovers an
//! identity from whatever a scanner hands back.
//!
//! ## Wire Format
//! ```text
//! RCP:<version>:<store_id>:<receipt_number>:<checksum>
//!
//! RCP:1:DEFAULT:RCP-001:3UGJW6
//! │   │ │       │       └── checksum(receipt_number, store_id)
//! │   │ │       └────────── receipt number
//! │   │ └────────────────── store id
//! │   └──────────────────── format revision
//! └──────────────────────── tag
//! ```
//! Fields are joined by a bare `:` with no escaping, so `:` is reserved and
//! the generator refuses to encode fields that contain it.
//!
//! ## Decode Order
//! ```text
//! raw ──► blank? ─────────────────────────────► None
//!    │
//!    ├──► starts with "RCP:" ──► ≥ 5 fields? ──► payload (checksum kept)
//!    │                               └── no ───► None
//!    │
//!    ├──► contains "/receipt/<value>" ─────────► payload (checksum empty,
//!    │                                           store from ?store=)
//!    │
//!    └──► anything else ───────────────────────► payload (trimmed text as
//!                                                receipt number, checksum empty)
//! ```
//!
//! ## Checksum Enforcement
//! Only native wire codes carry a checksum. URL and bare-identifier decodes
//! come back with an empty checksum and [`validate_checksum`] accepts them
//! unconditionally: the tag protects camera-scanned wire codes, while URLs
//! and typed numbers are trusted as given.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::checksum::checksum;
use crate::config::ReceiptCodeConfig;
use crate::error::{CodeError, CodeResult};
use crate::WIRE_PREFIX;

/// Path marker of a receipt lookup URL.
const RECEIPT_PATH: &str = "/receipt/";

/// Query parameter carrying the store id in a lookup URL.
const STORE_PARAM: &str = "store";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// =============================================================================
// Payload Types
// =============================================================================

/// A receipt identity as carried by a scannable code.
///
/// Built fresh on every encode/decode; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CodePayload {
    pub receipt_number: String,
    pub store_id: String,
    /// Wire format revision. `None` when a wire code carried a non-numeric
    /// or negative version field; such codes are still accepted.
    pub version: Option<u32>,
    /// Empty when the source carried no checksum (URL or bare identifier).
    pub checksum: String,
}

impl CodePayload {
    /// Builds a payload with a freshly computed checksum.
    pub fn signed(receipt_number: &str, store_id: &str, version: u32) -> Self {
        CodePayload {
            receipt_number: receipt_number.to_string(),
            store_id: store_id.to_string(),
            version: Some(version),
            checksum: checksum(receipt_number, store_id),
        }
    }

    /// Returns true when the payload carries a checksum to verify.
    pub fn has_checksum(&self) -> bool {
        !self.checksum.is_empty()
    }
}

/// Result of pre-parsing a scanned string in a client.
///
/// Unlike [`CodePayload`], the store id stays `None` when the scan did not
/// name one, so the caller can tell "default store" from "no store given".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ScannedCode {
    pub receipt_number: String,
    pub store_id: Option<String>,
}

/// Receipt number and optional store recovered from a lookup URL.
struct LookupLink {
    receipt_number: String,
    store_id: Option<String>,
}

// =============================================================================
// Encode
// =============================================================================

/// Encodes a payload into the wire format.
///
/// ## Example
/// ```rust
/// use receipt_core::codec::{encode, CodePayload};
///
/// let payload = CodePayload::signed("RCP-001", "STORE-A", 1);
/// assert_eq!(encode(&payload), "RCP:1:STORE-A:RCP-001:AH2IXQ");
/// ```
pub fn encode(payload: &CodePayload) -> String {
    let version = payload.version.map(|v| v.to_string()).unwrap_or_default();
    format!(
        "{}{}:{}:{}:{}",
        WIRE_PREFIX, version, payload.store_id, payload.receipt_number, payload.checksum
    )
}

// =============================================================================
// Decode
// =============================================================================

/// Decodes a scanned string into a payload.
///
/// Returns `None` for blank input and for `RCP:` strings with fewer than five
/// fields. Everything else decodes: lookup URLs take their store from the
/// `store` query parameter (falling back to the configured store), and any
/// other text becomes the receipt number.
///
/// ## Example
/// ```rust
/// use receipt_core::codec::decode;
/// use receipt_core::config::ReceiptCodeConfig;
///
/// let config = ReceiptCodeConfig::default();
///
/// let wire = decode("RCP:1:STORE-A:RCP-001:ABC123", &config).unwrap();
/// assert_eq!(wire.store_id, "STORE-A");
///
/// let link = decode("https://x/receipt/RCP-002?store=STORE-B", &config).unwrap();
/// assert_eq!(link.receipt_number, "RCP-002");
/// assert_eq!(link.store_id, "STORE-B");
///
/// assert!(decode("   ", &config).is_none());
/// ```
pub fn decode(raw: &str, config: &ReceiptCodeConfig) -> Option<CodePayload> {
    if raw.trim().is_empty() {
        return None;
    }

    if raw.starts_with(WIRE_PREFIX) {
        return decode_wire(raw);
    }

    if let Some(link) = parse_lookup_link(raw) {
        return Some(CodePayload {
            receipt_number: link.receipt_number,
            store_id: link.store_id.unwrap_or_else(|| config.store_id.clone()),
            version: Some(config.qr_version),
            checksum: String::new(),
        });
    }

    Some(CodePayload {
        receipt_number: raw.trim().to_string(),
        store_id: config.store_id.clone(),
        version: Some(config.qr_version),
        checksum: String::new(),
    })
}

/// Decodes a native wire code. Fields past the fifth are ignored.
///
/// Returns `None` unless `raw` starts with `RCP:` and has at least five
/// `:`-separated fields.
pub fn decode_wire(raw: &str) -> Option<CodePayload> {
    if !raw.starts_with(WIRE_PREFIX) {
        return None;
    }

    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() < 5 {
        return None;
    }

    Some(CodePayload {
        version: parse_leading_int(parts[1]),
        store_id: parts[2].to_string(),
        receipt_number: parts[3].to_string(),
        checksum: parts[4].to_string(),
    })
}

/// Pre-parses a scanned string without applying any configured defaults.
///
/// Wire codes that fail to decode fall through to the URL and bare forms,
/// so a truncated `RCP:` string is returned verbatim as a receipt number.
pub fn parse_scanned_code(raw: &str) -> Option<ScannedCode> {
    if raw.trim().is_empty() {
        return None;
    }

    if let Some(payload) = decode_wire(raw) {
        return Some(ScannedCode {
            receipt_number: payload.receipt_number,
            store_id: Some(payload.store_id),
        });
    }

    if let Some(link) = parse_lookup_link(raw) {
        return Some(ScannedCode {
            receipt_number: link.receipt_number,
            store_id: link.store_id,
        });
    }

    Some(ScannedCode {
        receipt_number: raw.trim().to_string(),
        store_id: None,
    })
}

// =============================================================================
// Checksum Validation
// =============================================================================

/// Verifies the payload checksum.
///
/// Payloads without a checksum pass; see the module docs for why.
pub fn verify_checksum(payload: &CodePayload) -> CodeResult<()> {
    if !payload.has_checksum() {
        return Ok(());
    }

    let expected = checksum(&payload.receipt_number, &payload.store_id);
    if expected == payload.checksum {
        Ok(())
    } else {
        Err(CodeError::ChecksumMismatch {
            expected,
            actual: payload.checksum.clone(),
        })
    }
}

/// Returns true when [`verify_checksum`] passes.
pub fn validate_checksum(payload: &CodePayload) -> bool {
    verify_checksum(payload).is_ok()
}

// =============================================================================
// URL Helpers
// =============================================================================

/// Escapes a value the way `encodeURIComponent` does.
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Finds the first non-empty `/receipt/<value>` segment and the `store`
/// query parameter, if any.
fn parse_lookup_link(raw: &str) -> Option<LookupLink> {
    let segment = raw.match_indices(RECEIPT_PATH).find_map(|(idx, marker)| {
        let rest = &raw[idx + marker.len()..];
        let end = rest.find(['?', '/']).unwrap_or(rest.len());
        (end > 0).then(|| &rest[..end])
    })?;

    // Invalid UTF-8 escapes become U+FFFD; the link form still applies.
    let receipt_number = percent_decode_str(segment).decode_utf8_lossy().into_owned();

    let store_id = raw.split_once('?').and_then(|(_, query)| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == STORE_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    });

    Some(LookupLink {
        receipt_number,
        store_id,
    })
}

/// Parses an optionally signed run of leading decimal digits, ignoring
/// leading whitespace and any trailing garbage (`"1abc"` → 1, `"+2"` → 2).
///
/// Returns `None` when there are no digits or the value is not a valid
/// version (negative or too large for `u32`).
fn parse_leading_int(field: &str) -> Option<u32> {
    let field = field.trim_start();
    let (negative, unsigned) = match field.as_bytes().first() {
        Some(b'-') => (true, &field[1..]),
        Some(b'+') => (false, &field[1..]),
        _ => (false, field),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let magnitude: u64 = unsigned[..digits_end].parse().ok()?;

    if negative && magnitude != 0 {
        return None;
    }
    u32::try_from(magnitude).ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ReceiptCodeConfig {
        ReceiptCodeConfig::default()
    }

    #[test]
    fn test_round_trip_validates() {
        for (receipt, store) in [
            ("RCP-001", "DEFAULT"),
            ("20260131-01-0001", "STORE-A"),
            ("A", "B"),
        ] {
            let payload = CodePayload::signed(receipt, store, 1);
            let decoded = decode(&encode(&payload), &config()).unwrap();
            assert_eq!(decoded, payload);
            assert!(validate_checksum(&decoded));
        }
    }

    #[test]
    fn test_blank_input_never_decodes() {
        assert!(decode("", &config()).is_none());
        assert!(decode("   ", &config()).is_none());
        assert!(decode("\t\n", &config()).is_none());
        assert!(parse_scanned_code("").is_none());
    }

    #[test]
    fn test_decode_wire_fields() {
        let payload = decode("RCP:1:STORE-A:RCP-001:ABC123", &config()).unwrap();
        assert_eq!(payload.version, Some(1));
        assert_eq!(payload.store_id, "STORE-A");
        assert_eq!(payload.receipt_number, "RCP-001");
        assert_eq!(payload.checksum, "ABC123");
    }

    #[test]
    fn test_decode_wire_too_few_fields() {
        assert!(decode("RCP:1:STORE-A:RCP-001", &config()).is_none());
        assert!(decode("RCP:", &config()).is_none());
    }

    #[test]
    fn test_decode_wire_ignores_extra_fields() {
        let payload = decode("RCP:1:S:R:C:extra", &config()).unwrap();
        assert_eq!(payload.receipt_number, "R");
        assert_eq!(payload.checksum, "C");
    }

    #[test]
    fn test_decode_wire_non_numeric_version_passes_through() {
        let payload = decode("RCP:x:DEFAULT:RCP-001:3UGJW6", &config()).unwrap();
        assert_eq!(payload.version, None);
        assert!(validate_checksum(&payload));

        let payload = decode("RCP:2beta:DEFAULT:RCP-001:3UGJW6", &config()).unwrap();
        assert_eq!(payload.version, Some(2));
    }

    #[test]
    fn test_decode_lookup_url() {
        let payload = decode("https://x/receipt/RCP-002?store=STORE-B", &config()).unwrap();
        assert_eq!(payload.receipt_number, "RCP-002");
        assert_eq!(payload.store_id, "STORE-B");
        assert_eq!(payload.version, Some(1));
        assert_eq!(payload.checksum, "");
    }

    #[test]
    fn test_decode_lookup_url_without_store_uses_default() {
        let config = config().with_store_id("STORE-Z");
        let payload = decode("/receipt/RCP-002", &config).unwrap();
        assert_eq!(payload.receipt_number, "RCP-002");
        assert_eq!(payload.store_id, "STORE-Z");
    }

    #[test]
    fn test_decode_lookup_url_percent_decodes() {
        let payload = decode(
            "https://shop.example/receipt/RCP%20001%2Fx?store=MAIN%20ST",
            &config(),
        )
        .unwrap();
        assert_eq!(payload.receipt_number, "RCP 001/x");
        assert_eq!(payload.store_id, "MAIN ST");
    }

    #[test]
    fn test_decode_lookup_url_segment_terminators() {
        let payload = decode("https://x/receipt/RCP-9/details", &config()).unwrap();
        assert_eq!(payload.receipt_number, "RCP-9");

        let payload = decode("https://x/receipt//receipt/RCP-10", &config()).unwrap();
        assert_eq!(payload.receipt_number, "RCP-10");
    }

    #[test]
    fn test_decode_lookup_url_with_invalid_utf8_escape() {
        let raw = "https://x/receipt/RCP%FF01?store=STORE-B";

        let payload = decode(raw, &config()).unwrap();
        assert_eq!(payload.receipt_number, "RCP\u{FFFD}01");
        assert_eq!(payload.store_id, "STORE-B");
        assert_eq!(payload.checksum, "");

        let scanned = parse_scanned_code(raw).unwrap();
        assert_eq!(scanned.receipt_number, "RCP\u{FFFD}01");
        assert_eq!(scanned.store_id.as_deref(), Some("STORE-B"));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("1"), Some(1));
        assert_eq!(parse_leading_int(" 12abc"), Some(12));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("-0"), Some(0));
        assert_eq!(parse_leading_int("-1"), None);
        assert_eq!(parse_leading_int("+"), None);
        assert_eq!(parse_leading_int("x1"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999"), None);
    }

    #[test]
    fn test_decode_bare_identifier() {
        let payload = decode("  RCP-003 ", &config()).unwrap();
        assert_eq!(payload.receipt_number, "RCP-003");
        assert_eq!(payload.store_id, "DEFAULT");
        assert_eq!(payload.checksum, "");
        assert!(validate_checksum(&payload));
    }

    #[test]
    fn test_tampered_checksum_fails() {
        let mut payload = CodePayload::signed("RCP-001", "DEFAULT", 1);
        payload.checksum = "3UGJW7".to_string();

        assert!(!validate_checksum(&payload));
        assert_eq!(
            verify_checksum(&payload),
            Err(CodeError::ChecksumMismatch {
                expected: "3UGJW6".to_string(),
                actual: "3UGJW7".to_string(),
            })
        );
    }

    #[test]
    fn test_checksum_binds_store_id() {
        let mut payload = CodePayload::signed("RCP-001", "STORE-A", 1);
        payload.store_id = "STORE-B".to_string();
        assert!(!validate_checksum(&payload));
    }

    #[test]
    fn test_parse_scanned_code_keeps_missing_store_as_none() {
        let wire = parse_scanned_code("RCP:1:STORE-A:RCP-001:AH2IXQ").unwrap();
        assert_eq!(wire.store_id.as_deref(), Some("STORE-A"));

        let link = parse_scanned_code("https://x/receipt/RCP-002").unwrap();
        assert_eq!(link.receipt_number, "RCP-002");
        assert_eq!(link.store_id, None);

        let bare = parse_scanned_code(" RCP-003 ").unwrap();
        assert_eq!(bare.receipt_number, "RCP-003");
        assert_eq!(bare.store_id, None);

        let truncated = parse_scanned_code("RCP:1:STORE-A").unwrap();
        assert_eq!(truncated.receipt_number, "RCP:1:STORE-A");
    }

    #[test]
    fn test_encode_uri_component_matches_browser() {
        assert_eq!(encode_uri_component("RCP 001/x"), "RCP%20001%2Fx");
        assert_eq!(encode_uri_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
        assert_eq!(
            encode_uri_component("https://shop.example/receipt/RCP-001?store=DEFAULT"),
            "https%3A%2F%2Fshop.example%2Freceipt%2FRCP-001%3Fstore%3DDEFAULT"
        );
    }

    #[test]
    fn test_encode_without_version() {
        let payload = CodePayload {
            receipt_number: "R".to_string(),
            store_id: "S".to_string(),
            version: None,
            checksum: "C".to_string(),
        };
        assert_eq!(encode(&payload), "RCP::S:R:C");
    }
}
