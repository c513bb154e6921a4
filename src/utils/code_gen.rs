//! Short code generation
//!
//! Codes are drawn from the operating system's secure random source. Each
//! character is picked independently and uniformly from a 62 symbol alphabet.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::errors::{Result, TinylinkError};

/// `0-9A-Za-z`
pub const CODE_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Bytes at or above this bound are discarded (62 * 4 = 248).
const ACCEPT_BELOW: u8 = (u8::MAX / CODE_ALPHABET.len() as u8) * CODE_ALPHABET.len() as u8;

/// Generate a random short code of exactly `length` characters.
///
/// No uniqueness check is done here, the caller owns collision handling.
pub fn generate_random_code(length: usize) -> Result<String> {
    generate_code_with(&mut OsRng, length)
}

/// Same as [`generate_random_code`] but with an explicit random source.
pub fn generate_code_with<R>(rng: &mut R, length: usize) -> Result<String>
where
    R: TryRngCore + ?Sized,
{
    let mut code = String::with_capacity(length);
    let mut buf = [0u8; 32];

    while code.len() < length {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| TinylinkError::random_source(format!("reading random bytes: {}", e)))?;

        // 拒绝采样，保证每个字符等概率
        for &byte in buf.iter().filter(|&&b| b < ACCEPT_BELOW) {
            if code.len() == length {
                break;
            }
            code.push(CODE_ALPHABET[(byte % CODE_ALPHABET.len() as u8) as usize] as char);
        }
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fmt;

    struct BrokenSource;

    #[derive(Debug)]
    struct SourceUnavailable;

    impl fmt::Display for SourceUnavailable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "entropy source unavailable")
        }
    }

    impl std::error::Error for SourceUnavailable {}

    impl TryRngCore for BrokenSource {
        type Error = SourceUnavailable;

        fn try_next_u32(&mut self) -> std::result::Result<u32, Self::Error> {
            Err(SourceUnavailable)
        }

        fn try_next_u64(&mut self) -> std::result::Result<u64, Self::Error> {
            Err(SourceUnavailable)
        }

        fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> std::result::Result<(), Self::Error> {
            Err(SourceUnavailable)
        }
    }

    /// Always yields the same byte.
    struct ConstantSource(u8);

    impl TryRngCore for ConstantSource {
        type Error = SourceUnavailable;

        fn try_next_u32(&mut self) -> std::result::Result<u32, Self::Error> {
            Ok(u32::from_le_bytes([self.0; 4]))
        }

        fn try_next_u64(&mut self) -> std::result::Result<u64, Self::Error> {
            Ok(u64::from_le_bytes([self.0; 8]))
        }

        fn try_fill_bytes(&mut self, dst: &mut [u8]) -> std::result::Result<(), Self::Error> {
            dst.fill(self.0);
            Ok(())
        }
    }

    #[test]
    fn test_accept_bound() {
        assert_eq!(ACCEPT_BELOW, 248);
    }

    #[test]
    fn test_code_length_and_alphabet() {
        for length in 1..=64 {
            let code = generate_random_code(length).unwrap();
            assert_eq!(code.len(), length);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_codes_differ() {
        let codes: HashSet<String> = (0..200)
            .map(|_| generate_random_code(12).unwrap())
            .collect();
        assert_eq!(codes.len(), 200);
    }

    #[test]
    fn test_byte_maps_onto_alphabet() {
        // 61 % 62 = 61 -> 'z'
        let code = generate_code_with(&mut ConstantSource(61), 4).unwrap();
        assert_eq!(code, "zzzz");
        // 62 % 62 = 0 -> '0'
        let code = generate_code_with(&mut ConstantSource(62), 3).unwrap();
        assert_eq!(code, "000");
    }

    #[test]
    fn test_broken_source_is_random_source_error() {
        let err = generate_code_with(&mut BrokenSource, 6).unwrap_err();
        assert!(matches!(err, TinylinkError::RandomSource(_)));
        assert!(err.message().contains("entropy source unavailable"));
    }
}
