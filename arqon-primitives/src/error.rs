//! Error types for arqon-primitives operations.

use thiserror::Error;

/// Errors reported by the native KEM backend binding.
///
/// Length mismatches are detected by this crate before the backend is
/// invoked; the remaining variants wrap failures reported by aws-lc-rs
/// itself.
#[derive(Debug, Error)]
pub enum KemError {
    /// Key generation failed inside the backend.
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Encapsulation failed inside the backend.
    #[error("Encapsulation failed: {0}")]
    Encapsulation(String),

    /// Decapsulation failed inside the backend.
    ///
    /// This is not the implicit-rejection path: a corrupted ciphertext of
    /// the correct length decapsulates successfully to a garbage secret.
    /// This variant only occurs on genuine backend failures.
    #[error("Decapsulation failed: {0}")]
    Decapsulation(String),

    /// A key buffer had the wrong length for its mechanism.
    #[error("Invalid key length: {mechanism} requires a {expected}-byte {key_type}, got {actual} bytes")]
    InvalidKeyLength {
        /// Mechanism name the key was constructed for.
        mechanism: &'static str,
        /// Expected length in bytes.
        expected: usize,
        /// Actual length received.
        actual: usize,
        /// Which kind of key ("public key" or "secret key").
        key_type: &'static str,
    },

    /// A ciphertext buffer had the wrong length for its mechanism.
    #[error("Invalid ciphertext length for {mechanism}: expected {expected}, got {actual}")]
    InvalidCiphertextLength {
        /// Mechanism name the ciphertext was constructed for.
        mechanism: &'static str,
        /// Expected length in bytes.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// The mechanism has no backend binding in this build.
    #[error("Mechanism not available in this build: {0}")]
    MechanismNotAvailable(&'static str),
}

/// Result type alias for arqon-primitives operations.
pub type Result<T> = std::result::Result<T, KemError>;
