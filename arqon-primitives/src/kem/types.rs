#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Validated byte containers for KEM material.
//!
//! Public keys and ciphertexts are plain bytes tagged with their mechanism
//! and length-checked at construction, so every downstream consumer can
//! rely on the sizes being exact. Shared secrets are zeroized on drop and
//! compared only in constant time.

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::KemError;
use crate::kem::mechanism::Mechanism;

/// A KEM public (encapsulation) key.
///
/// Public keys can be freely copied and serialized; any party holding one
/// may encapsulate against it without access to the owning session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KemPublicKey {
    mechanism: Mechanism,
    bytes: Vec<u8>,
}

impl KemPublicKey {
    /// Creates a public key from raw bytes.
    ///
    /// # Errors
    /// Returns [`KemError::InvalidKeyLength`] if `bytes` does not have the
    /// exact public key length for `mechanism`.
    pub fn new(mechanism: Mechanism, bytes: Vec<u8>) -> Result<Self, KemError> {
        let expected = mechanism.public_key_len();
        if bytes.len() != expected {
            return Err(KemError::InvalidKeyLength {
                mechanism: mechanism.name(),
                expected,
                actual: bytes.len(),
                key_type: "public key",
            });
        }
        Ok(Self { mechanism, bytes })
    }

    /// Restores a public key previously serialized with
    /// [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    /// Returns [`KemError::InvalidKeyLength`] on a length mismatch.
    pub fn from_bytes(bytes: &[u8], mechanism: Mechanism) -> Result<Self, KemError> {
        Self::new(mechanism, bytes.to_vec())
    }

    /// Serializes the public key for storage or transmission.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Returns the raw public key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the key and returns the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the mechanism this key belongs to.
    #[must_use]
    pub const fn mechanism(&self) -> Mechanism {
        self.mechanism
    }
}

/// A KEM ciphertext.
///
/// Ciphertexts received from a peer are untrusted input; construction only
/// guarantees the length is exact for the mechanism, nothing more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KemCiphertext {
    mechanism: Mechanism,
    bytes: Vec<u8>,
}

impl KemCiphertext {
    /// Creates a ciphertext from raw bytes.
    ///
    /// # Errors
    /// Returns [`KemError::InvalidCiphertextLength`] if `bytes` does not
    /// have the exact ciphertext length for `mechanism`.
    pub fn new(mechanism: Mechanism, bytes: Vec<u8>) -> Result<Self, KemError> {
        let expected = mechanism.ciphertext_len();
        if bytes.len() != expected {
            return Err(KemError::InvalidCiphertextLength {
                mechanism: mechanism.name(),
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self { mechanism, bytes })
    }

    /// Restores a ciphertext previously serialized with
    /// [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    /// Returns [`KemError::InvalidCiphertextLength`] on a length mismatch.
    pub fn from_bytes(bytes: &[u8], mechanism: Mechanism) -> Result<Self, KemError> {
        Self::new(mechanism, bytes.to_vec())
    }

    /// Serializes the ciphertext for transmission.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Returns the raw ciphertext bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the ciphertext and returns the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the mechanism this ciphertext belongs to.
    #[must_use]
    pub const fn mechanism(&self) -> Mechanism {
        self.mechanism
    }
}

/// A shared secret established through encapsulation or decapsulation.
///
/// Equality is the only operation defined on shared secrets, and it runs
/// in constant time.
///
/// # Security Note
/// - `Clone` is intentionally not implemented to prevent copies of secret
///   material
/// - The buffer is private and zeroized on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: Box<[u8]>,
}

impl SharedSecret {
    /// Wraps shared-secret bytes produced by the backend.
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes: bytes.into_boxed_slice() }
    }

    /// Returns the raw secret bytes.
    ///
    /// Callers feeding the secret into a KDF should avoid copying it into
    /// buffers that outlive the borrow.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the secret length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecret").field("len", &self.bytes.len()).finish_non_exhaustive()
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedSecret {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn public_key_length_is_validated() {
        for mechanism in Mechanism::ALL {
            let exact = vec![0u8; mechanism.public_key_len()];
            assert!(KemPublicKey::new(mechanism, exact).is_ok());

            let short = vec![0u8; mechanism.public_key_len() - 1];
            assert!(KemPublicKey::new(mechanism, short).is_err(), "{mechanism} short pk accepted");

            let long = vec![0u8; mechanism.public_key_len() + 1];
            assert!(KemPublicKey::new(mechanism, long).is_err(), "{mechanism} long pk accepted");
        }
    }

    #[test]
    fn ciphertext_length_is_validated() {
        for mechanism in Mechanism::ALL {
            let exact = vec![0u8; mechanism.ciphertext_len()];
            assert!(KemCiphertext::new(mechanism, exact).is_ok());

            let result = KemCiphertext::new(mechanism, vec![0u8; 100]);
            match result {
                Err(KemError::InvalidCiphertextLength { expected, actual, .. }) => {
                    assert_eq!(expected, mechanism.ciphertext_len());
                    assert_eq!(actual, 100);
                }
                other => panic!("expected InvalidCiphertextLength, got {other:?}"),
            }
        }
    }

    #[test]
    fn public_key_serialization_round_trip() {
        let bytes = vec![7u8; Mechanism::MlKem768.public_key_len()];
        let pk = KemPublicKey::new(Mechanism::MlKem768, bytes.clone()).unwrap();
        let restored = KemPublicKey::from_bytes(&pk.to_bytes(), Mechanism::MlKem768).unwrap();
        assert_eq!(restored.as_bytes(), bytes.as_slice());
        assert_eq!(restored.mechanism(), Mechanism::MlKem768);
    }

    #[test]
    fn shared_secret_constant_time_equality() {
        let a = SharedSecret::new(vec![1u8; 32]);
        let b = SharedSecret::new(vec![1u8; 32]);
        let c = SharedSecret::new(vec![2u8; 32]);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(bool::from(a.ct_eq(&b)));
        assert!(!bool::from(a.ct_eq(&c)));
    }

    #[test]
    fn shared_secret_zeroizes_in_place() {
        let mut secret = SharedSecret::new(vec![0xA5u8; 32]);
        secret.zeroize();
        assert_eq!(secret.len(), 32, "zeroize must not change the buffer length");
        assert!(secret.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn shared_secret_debug_is_redacted() {
        let secret = SharedSecret::new(vec![0xA5u8; 32]);
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("a5"), "debug output leaked secret bytes: {rendered}");
        assert!(rendered.contains("len"));
    }
}
