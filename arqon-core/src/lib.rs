//! # Arqon Core
//!
//! Session-based post-quantum key encapsulation over the AWS-LC backend.
//!
//! Arqon presents one uniform API across every KEM mechanism the backend
//! ships: open a session for a mechanism by name, generate a keypair,
//! encapsulate against any public key, decapsulate with the session's
//! own secret key. The mechanism catalog keeps a strict two-tier status —
//! *supported* (the name is known to this build) versus *enabled* (the
//! mechanism can actually be instantiated) — and the session factory
//! reports the two as different errors, because the remediation differs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use arqon_core::{KemSession, encapsulate, enabled_kem_mechanisms};
//! use rand::rngs::OsRng;
//!
//! let mut rng = OsRng;
//!
//! // Pick any enabled mechanism.
//! for name in enabled_kem_mechanisms() {
//!     // Receiver: the session owns the secret key for its lifetime.
//!     let mut session = KemSession::open(name)?;
//!     let public_key = session.generate_keypair(&mut rng)?;
//!
//!     // Sender: encapsulation needs only the public key.
//!     let (ciphertext, secret_sender) = encapsulate(&mut rng, &public_key)?;
//!
//!     // Receiver: recover the shared secret.
//!     let secret_receiver = session.decapsulate(ciphertext.as_bytes())?;
//!     assert_eq!(secret_sender, secret_receiver);
//! }
//! # Ok::<(), arqon_core::CoreError>(())
//! ```
//!
//! ## Catalog Status
//!
//! - [`supported_kem_mechanisms`] lists every name this build recognizes.
//! - [`enabled_kem_mechanisms`] lists the usable subset (always a subset,
//!   by construction).
//! - [`KemSession::open`] fails with
//!   [`CoreError::MechanismNotSupported`] for unknown names and
//!   [`CoreError::MechanismNotEnabled`] for known-but-unusable ones.
//!
//! ## Session Lifecycle
//!
//! A session is bound to one mechanism and holds at most one keypair:
//!
//! 1. **Opened** through the factory (catalog check, no key material yet)
//! 2. **Keyed** by [`generate_keypair`](KemSession::generate_keypair),
//!    which returns only the public key
//! 3. **Closed** by [`close`](KemSession::close) or by going out of
//!    scope — either way the secret key buffer is wiped exactly once
//!
//! Decapsulation keys cannot be serialized out of the backend, so
//! sessions are ephemeral by design: generate a fresh keypair per
//! session and keep the session alive for as long as the key is needed.
//!
//! ## Concurrency
//!
//! The API is synchronous and blocking. A session is single-owner: give
//! each logical actor its own, or serialize access externally. The
//! stateless [`encapsulate`] function is safe to call from any number of
//! threads against the same public key.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

/// The KEM mechanism catalog: supported/enabled listings and lookups.
pub mod catalog;
/// Per-session configuration types.
pub mod config;
/// Error types and result alias.
pub mod error;
/// Security-conscious logging utilities.
pub mod logging;
/// KEM sessions and the stateless encapsulation path.
pub mod session;

use std::sync::atomic::{AtomicBool, Ordering};

use lazy_static::lazy_static;
use rand::rngs::OsRng;

pub use arqon_primitives::{
    KemCiphertext, KemError, KemPublicKey, Mechanism, SharedSecret,
};

pub use catalog::{
    enabled_kem_mechanisms, is_kem_enabled, is_kem_supported, supported_kem_mechanisms,
};
pub use config::{RekeyPolicy, SessionConfig};
pub use error::{CoreError, Result};
pub use session::{KemSession, encapsulate, import_public_key};

/// Library version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Power-up self-test status; set once init() has run the KEM roundtrips.
lazy_static! {
    static ref SELF_TESTS_PASSED: AtomicBool = AtomicBool::new(false);
}

/// Initializes the library and runs power-up self-tests.
///
/// For every enabled mechanism, one full keypair → encapsulate →
/// decapsulate roundtrip is executed and the recovered secret compared
/// against the encapsulated one. The catalog subset invariant is checked
/// alongside. Idempotent: subsequent calls re-run the tests.
///
/// # Errors
///
/// Returns [`CoreError::SelfTestFailed`] if any roundtrip mismatches or
/// the catalog invariant is violated, and [`CoreError::Backend`] if a
/// backend operation fails outright.
pub fn init() -> Result<()> {
    run_power_up_self_tests()?;
    SELF_TESTS_PASSED.store(true, Ordering::SeqCst);
    tracing::info!(version = VERSION, "arqon-core initialized");
    Ok(())
}

/// Returns true once [`init`] has completed successfully.
#[must_use]
pub fn self_tests_passed() -> bool {
    SELF_TESTS_PASSED.load(Ordering::SeqCst)
}

fn run_power_up_self_tests() -> Result<()> {
    for name in enabled_kem_mechanisms() {
        if !is_kem_supported(name) {
            return Err(CoreError::SelfTestFailed(format!(
                "catalog invariant violated: {name} enabled but not supported"
            )));
        }

        let mut rng = OsRng;
        let mut session = KemSession::open(name)?;
        let public_key = session.generate_keypair(&mut rng)?;
        let (ciphertext, secret_enc) = encapsulate(&mut rng, &public_key)?;
        let secret_dec = session.decapsulate(ciphertext.as_bytes())?;

        if secret_enc != secret_dec {
            return Err(CoreError::SelfTestFailed(format!("{name} roundtrip mismatch")));
        }
    }
    Ok(())
}
