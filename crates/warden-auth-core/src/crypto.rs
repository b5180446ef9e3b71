//! Cryptographic utilities for secure operations
//!
//! This module provides security-critical primitives that must be implemented
//! correctly to prevent timing attacks and other side-channel vulnerabilities.

use jsonwebtoken::{DecodingKey, EncodingKey};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Shared symmetric signing key.
///
/// Validated once at construction; cloning is cheap.
#[derive(Clone)]
pub struct SigningKey {
    key_bytes: Arc<[u8]>,
}

impl SigningKey {
    /// Minimum allowed key length in bytes (256 bits)
    pub const MIN_KEY_LENGTH: usize = 32;

    /// Create a new signing key from bytes.
    ///
    /// # Errors
    /// Returns error if key is too short (less than 32 bytes).
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, SigningKeyError> {
        let key_bytes = key.as_ref();
        if key_bytes.len() < Self::MIN_KEY_LENGTH {
            return Err(SigningKeyError::KeyTooShort {
                actual: key_bytes.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        Ok(Self {
            key_bytes: Arc::from(key_bytes),
        })
    }

    /// Key for producing signatures
    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.key_bytes)
    }

    /// Key for checking signatures
    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.key_bytes)
    }

    pub fn len(&self) -> usize {
        self.key_bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_bytes.is_empty()
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_length", &self.key_bytes.len())
            .finish_non_exhaustive()
    }
}

/// Errors that can occur when creating a signing key
#[derive(Debug, Clone, thiserror::Error)]
pub enum SigningKeyError {
    #[error("signing key too short: got {actual} bytes, need at least {minimum}")]
    KeyTooShort { actual: usize, minimum: usize },
}

/// Constant-time byte slice comparison.
///
/// Returns `false` immediately if lengths differ (length is not secret);
/// otherwise the running time does not depend on where the slices differ.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Constant-time string comparison.
#[inline]
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq_equal() {
        assert!(constant_time_eq(b"hello world", b"hello world"));
    }

    #[test]
    fn test_constant_time_eq_different() {
        assert!(!constant_time_eq(b"hello world", b"hello worle"));
    }

    #[test]
    fn test_constant_time_eq_different_lengths() {
        assert!(!constant_time_eq(b"hello", b"hello world"));
    }

    #[test]
    fn test_constant_time_eq_empty() {
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_constant_time_str_eq() {
        assert!(constant_time_str_eq("marker", "marker"));
        assert!(!constant_time_str_eq("marker", "markeR"));
    }

    #[test]
    fn test_signing_key_too_short() {
        let result = SigningKey::new("short");
        assert!(matches!(
            result,
            Err(SigningKeyError::KeyTooShort { actual: 5, minimum: 32 })
        ));
    }

    #[test]
    fn test_signing_key_valid() {
        let key = SigningKey::new("k".repeat(32)).unwrap();
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn test_signing_key_debug_hides_material() {
        let key = SigningKey::new("super-secret-signing-key-material!").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("key_length"));
    }
}
