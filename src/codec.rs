//! Byte-level encoding rules.
//!
//! The protocol's hash inputs are length-sensitive: every integer entering
//! a hash computation is first converted to its minimal big-endian byte
//! encoding and then left-zero-padded (`PAD()`) to the modulus byte
//! length, so inputs stay length-stable regardless of a value's natural
//! magnitude.

use base64::{prelude::BASE64_STANDARD, Engine as _};
use num_bigint::{BigInt, Sign};

use crate::errors::DomainError;

/// Minimal big-endian encoding of the magnitude of `value`.
pub fn int_to_bytes(value: &BigInt) -> Vec<u8> {
    value.to_bytes_be().1
}

/// Nonnegative integer from big-endian bytes.
pub fn bytes_to_int(bytes: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

/// Left-zero-pad `input` to exactly `len` bytes.
///
/// An input already at or beyond the target length is returned unchanged.
pub fn pad(input: &[u8], len: usize) -> Vec<u8> {
    if input.len() >= len {
        return input.to_vec();
    }
    let mut out = vec![0u8; len];
    out[len - input.len()..].copy_from_slice(input);
    out
}

/// `PAD()` applied to an integer: minimal big-endian encoding, then
/// left-zero-padded to `len` bytes.
pub fn pad_int(value: &BigInt, len: usize) -> Vec<u8> {
    pad(&int_to_bytes(value), len)
}

/// Standard base64 for transport.
pub fn base64_encode(data: &[u8]) -> String {
    BASE64_STANDARD.encode(data)
}

pub fn base64_decode(data: &str) -> Result<Vec<u8>, DomainError> {
    BASE64_STANDARD
        .decode(data)
        .map_err(|_| DomainError::InvalidEncoding)
}

/// UTF-8 bytes of a string.
pub fn utf8_bytes(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}

/// Byte-wise exclusive-or of two equal-length buffers.
pub fn xor(a: &[u8], b: &[u8]) -> Result<Vec<u8>, DomainError> {
    if a.len() != b.len() {
        return Err(DomainError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x ^ y).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_round_trip_is_minimal() {
        let v = BigInt::from(0x0102u32);
        assert_eq!(int_to_bytes(&v), [0x01, 0x02]);
        assert_eq!(bytes_to_int(&[0x00, 0x01, 0x02]), v);
        assert_eq!(int_to_bytes(&BigInt::from(0u32)), [0x00]);
    }

    #[test]
    fn pad_left_fills_with_zeros() {
        assert_eq!(pad(&[0xAB], 3), [0x00, 0x00, 0xAB]);
        assert_eq!(pad(&[1, 2, 3], 3), [1, 2, 3]);
        // longer than the target stays untouched
        assert_eq!(pad(&[1, 2, 3, 4], 3), [1, 2, 3, 4]);
        assert_eq!(pad_int(&BigInt::from(5u32), 4), [0, 0, 0, 5]);
    }

    #[test]
    fn base64_round_trip() {
        assert_eq!(base64_encode(b"hello"), "aGVsbG8=");
        assert_eq!(base64_decode("aGVsbG8=").unwrap(), b"hello");
        assert_eq!(
            base64_decode("not*base64"),
            Err(DomainError::InvalidEncoding)
        );
    }

    #[test]
    fn xor_requires_equal_lengths() {
        assert_eq!(xor(&[0xF0, 0x0F], &[0xFF, 0xFF]).unwrap(), [0x0F, 0xF0]);
        assert_eq!(
            xor(&[1, 2], &[1]),
            Err(DomainError::LengthMismatch { left: 2, right: 1 })
        );
    }

    #[test]
    fn utf8_encoding() {
        assert_eq!(utf8_bytes("a:b"), b"a:b");
    }
}
