//! Fixed-width little-endian word decoding with an ASCII projection.
//!
//! These helpers are total over every byte input: 16- and 32-bit words are
//! sign-extended from their two's-complement bit pattern, 8-bit words stay
//! unsigned. The char projection maps bytes in `0..=127` to their ASCII
//! character and everything else to [`PLACEHOLDER`].

/// Character used for bytes outside the 7-bit ASCII range.
pub const PLACEHOLDER: char = '?';

/// Project a single byte onto a printable-ish character.
///
/// # Examples
/// ```
/// use jsfscan_core::words::{PLACEHOLDER, ascii_projection};
///
/// assert_eq!(ascii_projection(b'A'), 'A');
/// assert_eq!(ascii_projection(0xC8), PLACEHOLDER);
/// ```
pub fn ascii_projection(byte: u8) -> char {
    if byte.is_ascii() {
        byte as char
    } else {
        PLACEHOLDER
    }
}

/// Decode one byte: unsigned value plus its char projection.
///
/// # Examples
/// ```
/// use jsfscan_core::words::decode8;
///
/// assert_eq!(decode8(65), (65, 'A'));
/// assert_eq!(decode8(255), (255, '?'));
/// ```
pub fn decode8(byte: u8) -> (u8, char) {
    (byte, ascii_projection(byte))
}

/// Decode two bytes (lowest-order first) as a signed 16-bit word.
///
/// # Examples
/// ```
/// use jsfscan_core::words::decode16;
///
/// assert_eq!(decode16(65, 66), (16961, "AB".to_string()));
/// assert_eq!(decode16(0xFF, 0xFF).0, -1);
/// ```
pub fn decode16(lo: u8, hi: u8) -> (i16, String) {
    let value = i16::from_le_bytes([lo, hi]);
    (value, project(&[lo, hi]))
}

/// Decode four bytes (lowest-order first) as a signed 32-bit word.
///
/// # Examples
/// ```
/// use jsfscan_core::words::decode32;
///
/// assert_eq!(decode32(65, 66, 67, 68), (1_145_258_561, "ABCD".to_string()));
/// assert_eq!(decode32(0xFF, 0xFF, 0xFF, 0xFF).0, -1);
/// ```
pub fn decode32(b0: u8, b1: u8, b2: u8, b3: u8) -> (i32, String) {
    let value = i32::from_le_bytes([b0, b1, b2, b3]);
    (value, project(&[b0, b1, b2, b3]))
}

pub(crate) fn project(bytes: &[u8]) -> String {
    bytes.iter().copied().map(ascii_projection).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode8_ascii_range_is_identity() {
        for byte in 0u8..=127 {
            assert_eq!(decode8(byte), (byte, byte as char));
        }
    }

    #[test]
    fn decode8_high_bytes_use_placeholder() {
        for byte in 128u8..=255 {
            assert_eq!(decode8(byte), (byte, PLACEHOLDER));
        }
    }

    #[test]
    fn decode16_known_values() {
        assert_eq!(decode16(32, 33), (8480, " !".to_string()));
        assert_eq!(decode16(0, 127), (32512, "\u{0}\u{7f}".to_string()));
        assert_eq!(decode16(255, 255), (-1, "??".to_string()));
        assert_eq!(decode16(128, 200), (-14208, "??".to_string()));
    }

    #[test]
    fn decode16_sign_bit_boundary() {
        assert_eq!(decode16(0xFF, 0x7F).0, i16::MAX);
        assert_eq!(decode16(0x00, 0x80).0, i16::MIN);
    }

    #[test]
    fn decode32_known_values() {
        assert_eq!(decode32(48, 49, 50, 51), (858_927_408, "0123".to_string()));
        assert_eq!(decode32(32, 33, 34, 35), (589_439_264, " !\"#".to_string()));
        assert_eq!(
            decode32(128, 150, 200, 250),
            (-87_517_568, "????".to_string())
        );
    }

    #[test]
    fn decode32_sign_bit_boundary() {
        assert_eq!(decode32(0xFF, 0xFF, 0xFF, 0x7F).0, i32::MAX);
        assert_eq!(decode32(0, 0, 0, 0x80).0, i32::MIN);
    }
}
