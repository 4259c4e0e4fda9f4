#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Error types for Arqon core operations.
//!
//! The taxonomy keeps three caller-facing distinctions sharp:
//!
//! - [`CoreError::MechanismNotSupported`] — the name is unknown to the
//!   catalog entirely (a typo, or an algorithm this library never heard
//!   of). Fix the name.
//! - [`CoreError::MechanismNotEnabled`] — the name is known but unusable
//!   in this build (feature not compiled in, or vetoed by platform
//!   policy). Rebuild or reconfigure.
//! - [`CoreError::Backend`] — the native backend reported an unexpected
//!   internal failure. Distinct from implicit rejection, which is not an
//!   error at all.

use thiserror::Error;

use arqon_primitives::KemError;

/// Errors that can occur during Arqon core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The mechanism name is not in the catalog at all.
    ///
    /// Not retryable; the caller passed a name the backend's build has
    /// never heard of.
    #[error("Mechanism not supported: {0}")]
    MechanismNotSupported(String),

    /// The mechanism is in the catalog but cannot be instantiated in this
    /// build.
    ///
    /// Not retryable by the caller alone; enabling it requires rebuilding
    /// with the corresponding feature or lifting the platform policy veto.
    #[error("Mechanism not enabled in this build: {0}")]
    MechanismNotEnabled(String),

    /// A ciphertext passed to decapsulation had the wrong byte length.
    ///
    /// Detected before any backend call. Distinct from a corrupted
    /// ciphertext of the correct length, which decapsulates via implicit
    /// rejection.
    #[error("Invalid ciphertext length for {mechanism}: expected {expected}, got {actual}")]
    InvalidCiphertextLength {
        /// Mechanism the session is bound to.
        mechanism: &'static str,
        /// Expected ciphertext length in bytes.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// A public key had the wrong byte length for its mechanism.
    #[error("Invalid public key length for {mechanism}: expected {expected}, got {actual}")]
    InvalidPublicKeyLength {
        /// Mechanism the key was presented for.
        mechanism: &'static str,
        /// Expected public key length in bytes.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// Decapsulation was attempted before the session generated a keypair.
    #[error("Session has no key material: call generate_keypair first")]
    MissingKeyPair,

    /// An operation was attempted on a closed session.
    #[error("Session is closed")]
    SessionClosed,

    /// A second keypair generation was attempted with
    /// [`RekeyPolicy::Reject`](crate::config::RekeyPolicy::Reject).
    #[error("Session already holds a keypair and rekeying is not permitted")]
    RekeyNotPermitted,

    /// A power-up self-test failed; the library must not be used.
    #[error("Power-up self-test failed: {0}")]
    SelfTestFailed(String),

    /// The native backend reported an unexpected internal error.
    #[error("Backend failure: {0}")]
    Backend(#[from] KemError),
}

/// Result type alias for Arqon core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
