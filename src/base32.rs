//! RFC 4648 Base32 codec for shared-secret text representation.
//!
//! OTP secrets are conventionally exchanged as [Base32][4648] text rather
//! than raw bytes. This module implements the standard alphabet
//! (`A`–`Z`, `2`–`7`) with `=` padding to eight-character boundaries.
//!
//! [4648]: https://datatracker.ietf.org/doc/html/rfc4648

use crate::Error;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Encodes a byte sequence as Base32 text.
///
/// Bits are consumed most-significant first and partitioned into 5-bit
/// groups; a partial final group is right-padded with zero bits, and the
/// output is right-padded with `=` to a multiple of eight characters.
/// Every input is encodable, and the empty input yields the empty string
/// (with no padding).
///
/// # Examples
///
/// ```rust
/// assert_eq!(rfc_6238::encode_base32(b"foo"), "MZXW6===");
/// assert_eq!(rfc_6238::encode_base32(b""), "");
/// ```
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8 / 5 + 8) & !7);
    let mut buffer = 0u32;
    let mut bits = 0u32;
    for &byte in data {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(char::from(ALPHABET[(buffer >> bits) as usize & 0x1f]));
        }
    }
    if bits > 0 {
        // Final group, right-padded with zero bits
        out.push(char::from(ALPHABET[(buffer << (5 - bits)) as usize & 0x1f]));
    }
    while out.len() % 8 != 0 {
        out.push('=');
    }
    out
}

/// Decodes Base32 text into the byte sequence it represents.
///
/// Trailing `=` padding is ignored and lookup is case-insensitive. Each
/// remaining character contributes five bits; full bytes are emitted as
/// they complete, and a trailing group shorter than eight bits is
/// *discarded*. Dropping the partial group (rather than erroring) is an
/// intentional part of this codec's contract: secrets in circulation are
/// lengths for which no partial trailing byte arises, and existing
/// consumers depend on the truncating behavior for interoperability.
/// Decoding the empty string yields an empty vector.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`] if a character (other than trailing
/// padding) falls outside the Base32 alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>, Error> {
    let text = text.trim_end_matches('=');
    let mut out = Vec::with_capacity(text.len() * 5 / 8);
    let mut buffer = 0u32;
    let mut bits = 0u32;
    for c in text.chars() {
        let value = lookup(c).ok_or(Error::InvalidEncoding(c))?;
        buffer = (buffer << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
    }
    // Any leftover bits form a group shorter than a byte and are dropped.
    Ok(out)
}

/// Maps a character to its 5-bit alphabet value.
///
/// Returns `None` for characters outside the alphabet. `'A'` legitimately
/// decodes to zero, so absence must be signalled out of band rather than
/// by a sentinel value.
fn lookup(c: char) -> Option<u8> {
    match c.to_ascii_uppercase() {
        c @ 'A'..='Z' => Some(c as u8 - b'A'),
        c @ '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_values() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "MY======");
        assert_eq!(encode(b"foo"), "MZXW6===");
        assert_eq!(encode(b"hello"), "NBSWY3DP");
        assert_eq!(encode(b"Hello!\xde\xad\xbe\xef"), "JBSWY3DPEHPK3PXP");
    }

    #[test]
    fn decode_known_values() {
        assert_eq!(decode("").unwrap(), b"");
        assert_eq!(decode("MZXW6===").unwrap(), b"foo");
        assert_eq!(decode("NBSWY3DP").unwrap(), b"hello");
        assert_eq!(decode("JBSWY3DPEHPK3PXP").unwrap(), b"Hello!\xde\xad\xbe\xef");
    }

    #[test]
    fn decode_is_case_insensitive() {
        assert_eq!(
            decode("jbswy3dpehpk3pxp").unwrap(),
            decode("JBSWY3DPEHPK3PXP").unwrap()
        );
    }

    #[test]
    fn decode_without_padding() {
        assert_eq!(decode("MZXW6").unwrap(), b"foo");
    }

    #[test]
    fn round_trip_multiple_of_five() {
        let bytes = b"12345678901234567890";
        assert_eq!(decode(&encode(bytes)).unwrap(), &bytes[..]);
    }

    #[test]
    fn partial_trailing_group_is_dropped() {
        // A lone symbol carries only five bits, too few for a byte.
        assert_eq!(decode("A").unwrap(), b"");
        // Nine symbols carry 45 bits; the final five are discarded.
        assert_eq!(decode("NBSWY3DPA").unwrap(), b"hello");
    }

    #[test]
    fn zero_value_symbol_is_valid() {
        // 'A' decodes to 0 and must not be mistaken for a failed lookup.
        assert_eq!(decode("AAAAAAAA").unwrap(), [0u8; 5]);
    }

    #[test]
    fn invalid_characters_are_rejected() {
        assert!(matches!(decode("1!!!"), Err(Error::InvalidEncoding('1'))));
        assert!(matches!(decode("ABC0"), Err(Error::InvalidEncoding('0'))));
        assert!(matches!(decode("ABC 123"), Err(Error::InvalidEncoding(' '))));
    }
}
