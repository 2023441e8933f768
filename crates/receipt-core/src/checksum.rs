//! # Checksum
//!
//! Integrity tag embedded in every native wire code.
//!
//! ## Algorithm
//! ```text
//! input = receipt_number + ":" + store_id
//!
//! hash = 0 (i32)
//! for each UTF-16 code unit c in input:
//!     hash = (hash << 5) - hash + c        (wrapping, i.e. hash * 31 + c)
//!
//! tag = upper(base36(|hash|))[..6]
//! ```
//!
//! The tag guards against camera mis-reads and typos. It is NOT a security
//! control: anyone can compute it, so it says nothing about forgery.

/// Maximum length of a checksum tag.
pub const CHECKSUM_LEN: usize = 6;

const BASE36_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Computes the checksum tag for a receipt identity.
///
/// Small hash magnitudes produce tags shorter than six characters; they are
/// returned as-is, never padded.
///
/// ## Example
/// ```rust
/// use receipt_core::checksum::checksum;
///
/// assert_eq!(checksum("RCP-001", "DEFAULT"), "3UGJW6");
/// assert_eq!(checksum("", ""), "1M");
/// ```
pub fn checksum(receipt_number: &str, store_id: &str) -> String {
    let hash = receipt_number
        .encode_utf16()
        .chain(":".encode_utf16())
        .chain(store_id.encode_utf16())
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        });

    let mut tag = to_base36(hash.unsigned_abs());
    tag.truncate(CHECKSUM_LEN);
    tag
}

/// Renders a value in upper-case base 36.
fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    // Only ASCII digits were pushed.
    digits.into_iter().map(char::from).collect()
}
