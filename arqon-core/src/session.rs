#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! KEM sessions: the stateful owner of one mechanism's key material.
//!
//! A [`KemSession`] is bound to exactly one mechanism for its whole
//! lifetime and holds at most one keypair. The secret key never leaves
//! the session — [`generate_keypair`](KemSession::generate_keypair)
//! returns only the public half, and decapsulation consumes the secret
//! in place. Teardown is scoped: [`close`](KemSession::close) is
//! idempotent and also runs from `Drop`, so the secret key buffer is
//! wiped on every exit path, including unwinding.
//!
//! Encapsulation is deliberately *not* tied to session state: the free
//! function [`encapsulate`] needs only a public key, so the encapsulating
//! party never has to share a session (or a secret) with the key's owner.
//! The method on [`KemSession`] is a convenience that delegates to it.
//!
//! Sessions are not designed for concurrent mutation. Give each logical
//! actor its own session, or serialize access externally; the stateless
//! [`encapsulate`] path is safe from any number of threads.
//!
//! ## Example
//!
//! ```no_run
//! use arqon_core::{KemSession, encapsulate};
//! use rand::rngs::OsRng;
//!
//! let mut rng = OsRng;
//!
//! // Receiver side: open a session and publish the public key.
//! let mut receiver = KemSession::open("ML-KEM-768")?;
//! let public_key = receiver.generate_keypair(&mut rng)?;
//!
//! // Sender side: no session needed, only the public key.
//! let (ciphertext, secret_sender) = encapsulate(&mut rng, &public_key)?;
//!
//! // Receiver recovers the same secret from the ciphertext.
//! let secret_receiver = receiver.decapsulate(ciphertext.as_bytes())?;
//! assert_eq!(secret_sender, secret_receiver);
//! # Ok::<(), arqon_core::CoreError>(())
//! ```

use tracing::instrument;

use arqon_primitives::{
    Kem, KemCiphertext, KemError, KemKeyPair, KemPublicKey, Mechanism, SharedSecret,
};

use crate::catalog;
use crate::config::{RekeyPolicy, SessionConfig};
use crate::error::{CoreError, Result};

/// Imports a peer's public key received over transport.
///
/// Resolves the mechanism by name (same three-way check as the session
/// factory) and validates the key length before constructing the typed
/// key. This is the sender-side entry point when only raw bytes and a
/// mechanism name crossed the wire.
///
/// # Errors
///
/// - [`CoreError::MechanismNotSupported`] /
///   [`CoreError::MechanismNotEnabled`] — catalog check on `name`
/// - [`CoreError::InvalidPublicKeyLength`] — `bytes` has the wrong
///   length for the mechanism
pub fn import_public_key(name: &str, bytes: &[u8]) -> Result<KemPublicKey> {
    let mechanism = catalog::resolve(name)?;
    KemPublicKey::from_bytes(bytes, mechanism).map_err(|e| match e {
        KemError::InvalidKeyLength { mechanism, expected, actual, .. } => {
            CoreError::InvalidPublicKeyLength { mechanism, expected, actual }
        }
        other => CoreError::Backend(other),
    })
}

/// Encapsulates a fresh shared secret against a public key.
///
/// Stateless path: callable by any holder of the public key, with no
/// session and no secret key. Every call draws fresh randomness, so two
/// encapsulations against the same key produce different ciphertexts and
/// different secrets.
///
/// # Errors
///
/// Returns [`CoreError::MechanismNotEnabled`] if the key's mechanism is
/// not usable in this build, or [`CoreError::Backend`] if the backend
/// rejects the key or fails internally.
#[instrument(level = "debug", skip(rng, public_key), fields(mechanism = %public_key.mechanism()))]
pub fn encapsulate<R: rand::Rng + rand::CryptoRng>(
    rng: &mut R,
    public_key: &KemPublicKey,
) -> Result<(KemCiphertext, SharedSecret)> {
    let mechanism = public_key.mechanism();
    if !catalog::is_kem_enabled(mechanism.name()) {
        return Err(CoreError::MechanismNotEnabled(mechanism.name().to_string()));
    }

    crate::log_kem_operation_start!("encapsulate", mechanism = %mechanism);
    let (shared_secret, ciphertext) = Kem::encapsulate(rng, public_key).map_err(|e| {
        crate::log_kem_operation_error!("encapsulate", e, mechanism = %mechanism);
        CoreError::Backend(e)
    })?;
    crate::log_kem_operation_complete!("encapsulate", mechanism = %mechanism);

    Ok((ciphertext, shared_secret))
}

/// A KEM session bound to one mechanism.
///
/// Constructed through [`KemSession::open`], which performs the catalog
/// check; a session value therefore always refers to a mechanism that was
/// enabled at construction time.
#[derive(Debug)]
pub struct KemSession {
    mechanism: Mechanism,
    config: SessionConfig,
    keypair: Option<KemKeyPair>,
    closed: bool,
}

impl KemSession {
    /// Opens a session for the named mechanism with the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MechanismNotSupported`] — `name` is not in the
    ///   catalog at all
    /// - [`CoreError::MechanismNotEnabled`] — `name` is known but cannot
    ///   be instantiated in this build
    ///
    /// # Example
    ///
    /// ```no_run
    /// use arqon_core::{CoreError, KemSession};
    ///
    /// let session = KemSession::open("ML-KEM-768")?;
    /// assert_eq!(session.mechanism().name(), "ML-KEM-768");
    ///
    /// assert!(matches!(
    ///     KemSession::open("bogus"),
    ///     Err(CoreError::MechanismNotSupported(_))
    /// ));
    /// # Ok::<(), CoreError>(())
    /// ```
    pub fn open(name: &str) -> Result<Self> {
        Self::open_with_config(name, SessionConfig::default())
    }

    /// Opens a session for the named mechanism with an explicit
    /// configuration.
    ///
    /// # Errors
    ///
    /// Same as [`open`](Self::open).
    #[instrument(level = "debug", skip(config))]
    pub fn open_with_config(name: &str, config: SessionConfig) -> Result<Self> {
        let mechanism = catalog::resolve(name)?;
        tracing::debug!(mechanism = %mechanism, "KEM session opened");
        Ok(Self { mechanism, config, keypair: None, closed: false })
    }

    /// Returns the mechanism this session is bound to.
    #[must_use]
    pub const fn mechanism(&self) -> Mechanism {
        self.mechanism
    }

    /// Returns the session's public key, if a keypair has been generated.
    #[must_use]
    pub fn public_key(&self) -> Option<&KemPublicKey> {
        self.keypair.as_ref().map(KemKeyPair::public_key)
    }

    /// Returns true once [`close`](Self::close) has run.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Generates a keypair and returns the public key.
    ///
    /// The secret key stays inside the session and is never returned to
    /// the caller. If the session already holds a keypair, the configured
    /// [`RekeyPolicy`] decides: `Regenerate` (default) replaces the pair
    /// and immediately drops the old secret; `Reject` fails without
    /// touching it.
    ///
    /// # Errors
    ///
    /// - [`CoreError::SessionClosed`] if the session was closed
    /// - [`CoreError::RekeyNotPermitted`] under `RekeyPolicy::Reject` when
    ///   a keypair already exists
    /// - [`CoreError::Backend`] if the backend fails
    #[instrument(level = "debug", skip(self, rng), fields(mechanism = %self.mechanism))]
    pub fn generate_keypair<R: rand::Rng + rand::CryptoRng>(
        &mut self,
        rng: &mut R,
    ) -> Result<KemPublicKey> {
        self.ensure_open()?;
        if self.keypair.is_some() && self.config.rekey_policy == RekeyPolicy::Reject {
            return Err(CoreError::RekeyNotPermitted);
        }

        crate::log_kem_operation_start!("generate_keypair", mechanism = %self.mechanism);
        let keypair = Kem::generate_keypair(rng, self.mechanism).map_err(|e| {
            crate::log_kem_operation_error!("generate_keypair", e, mechanism = %self.mechanism);
            CoreError::Backend(e)
        })?;
        crate::log_kem_operation_complete!("generate_keypair", mechanism = %self.mechanism);

        let public = keypair.public_key().clone();
        // Replacing the option drops the previous pair; the backend wipes
        // the old secret buffer at that moment.
        if self.keypair.replace(keypair).is_some() {
            tracing::debug!(mechanism = %self.mechanism, "session keypair regenerated");
        }
        Ok(public)
    }

    /// Encapsulates against the given public key.
    ///
    /// Convenience method delegating to the stateless [`encapsulate`]
    /// free function — the key does not have to be this session's own.
    ///
    /// # Errors
    ///
    /// [`CoreError::SessionClosed`] if the session was closed, otherwise
    /// as for [`encapsulate`].
    pub fn encapsulate<R: rand::Rng + rand::CryptoRng>(
        &self,
        rng: &mut R,
        public_key: &KemPublicKey,
    ) -> Result<(KemCiphertext, SharedSecret)> {
        self.ensure_open()?;
        encapsulate(rng, public_key)
    }

    /// Decapsulates a ciphertext with the session's own secret key.
    ///
    /// The length is validated against the session mechanism before the
    /// backend is invoked. A correct-length ciphertext always yields a
    /// secret: corrupted or adversarial input decapsulates to the
    /// backend's implicit-rejection value instead of failing, so callers
    /// cannot distinguish a tampered ciphertext by error behavior.
    ///
    /// # Errors
    ///
    /// - [`CoreError::SessionClosed`] if the session was closed
    /// - [`CoreError::MissingKeyPair`] if no keypair was generated
    /// - [`CoreError::InvalidCiphertextLength`] if `ciphertext` has the
    ///   wrong length — a usage error, distinct from corruption
    /// - [`CoreError::Backend`] if the backend reports an internal
    ///   failure
    #[instrument(
        level = "debug",
        skip(self, ciphertext),
        fields(mechanism = %self.mechanism, ct_len = ciphertext.len())
    )]
    pub fn decapsulate(&self, ciphertext: &[u8]) -> Result<SharedSecret> {
        self.ensure_open()?;
        let keypair = self.keypair.as_ref().ok_or(CoreError::MissingKeyPair)?;

        let expected = self.mechanism.ciphertext_len();
        if ciphertext.len() != expected {
            return Err(CoreError::InvalidCiphertextLength {
                mechanism: self.mechanism.name(),
                expected,
                actual: ciphertext.len(),
            });
        }

        crate::log_kem_operation_start!("decapsulate", mechanism = %self.mechanism);
        let ct = KemCiphertext::new(self.mechanism, ciphertext.to_vec())?;
        let shared_secret = Kem::decapsulate(keypair.secret_key(), &ct).map_err(|e| {
            crate::log_kem_operation_error!("decapsulate", e, mechanism = %self.mechanism);
            CoreError::Backend(e)
        })?;
        crate::log_kem_operation_complete!("decapsulate", mechanism = %self.mechanism);

        Ok(shared_secret)
    }

    /// Tears the session down, dropping the keypair.
    ///
    /// The backend wipes the secret key buffer when the handle drops.
    /// Safe to call any number of times; runs automatically from `Drop`,
    /// so secret material never outlives the session's scope.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if self.keypair.take().is_some() {
            tracing::debug!(mechanism = %self.mechanism, "session key material destroyed");
        }
        self.closed = true;
        tracing::debug!(mechanism = %self.mechanism, "KEM session closed");
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(CoreError::SessionClosed);
        }
        Ok(())
    }
}

impl Drop for KemSession {
    fn drop(&mut self) {
        self.close();
    }
}
