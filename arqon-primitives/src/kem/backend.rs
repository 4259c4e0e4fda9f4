#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Primitive KEM operations over aws-lc-rs.
//!
//! AWS-LC intentionally does not expose decapsulation-key serialization,
//! so the secret half of a keypair lives only as the opaque
//! [`KemSecretKey`] handle returned by key generation. Keeping that handle
//! alive for the lifetime of a session — and dropping it to tear the key
//! down — is the supported usage pattern; there is no way to copy the key
//! material out of it.
//!
//! The backend wipes the underlying secret buffer when the handle is
//! dropped, which makes ownership of [`KemSecretKey`] the unconditional
//! zeroize-then-free step for every exit path, including unwinding.

use aws_lc_rs::kem::{Ciphertext, DecapsulationKey, EncapsulationKey};
use tracing::instrument;

use crate::error::KemError;
use crate::kem::mechanism::Mechanism;
use crate::kem::types::{KemCiphertext, KemPublicKey, SharedSecret};

/// Opaque handle to a decapsulation (secret) key.
///
/// # Security Note
/// - `Clone` is intentionally not implemented
/// - The key bytes are never observable through this type; `Debug` prints
///   only the mechanism
/// - Dropping the handle zeroizes the backend buffer
pub struct KemSecretKey {
    mechanism: Mechanism,
    handle: DecapsulationKey,
}

impl KemSecretKey {
    /// Returns the mechanism this key belongs to.
    #[must_use]
    pub const fn mechanism(&self) -> Mechanism {
        self.mechanism
    }
}

impl std::fmt::Debug for KemSecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KemSecretKey").field("mechanism", &self.mechanism).finish_non_exhaustive()
    }
}

/// A generated keypair: a shareable public key plus the session-owned
/// secret handle.
#[derive(Debug)]
pub struct KemKeyPair {
    public: KemPublicKey,
    secret: KemSecretKey,
}

impl KemKeyPair {
    /// Returns the public key.
    #[must_use]
    pub fn public_key(&self) -> &KemPublicKey {
        &self.public
    }

    /// Returns the secret key handle.
    #[must_use]
    pub fn secret_key(&self) -> &KemSecretKey {
        &self.secret
    }

    /// Returns the mechanism this keypair belongs to.
    #[must_use]
    pub const fn mechanism(&self) -> Mechanism {
        self.public.mechanism()
    }
}

/// The four primitive KEM operations.
///
/// Stateless facade over aws-lc-rs, mirroring the shape of the backend
/// API: generation produces the secret handle, encapsulation needs only
/// public bytes, decapsulation needs the handle.
pub struct Kem;

impl Kem {
    /// Generates a keypair for the given mechanism.
    ///
    /// The `_rng` parameter documents the contract that key generation
    /// consumes cryptographically secure randomness; aws-lc-rs draws from
    /// its internal FIPS-approved DRBG and ignores external generators.
    ///
    /// # Errors
    ///
    /// Returns [`KemError::MechanismNotAvailable`] if the mechanism has no
    /// backend binding in this build, or [`KemError::KeyGeneration`] if
    /// the backend fails.
    #[instrument(level = "debug", skip(_rng), fields(mechanism = %mechanism))]
    pub fn generate_keypair<R: rand::Rng + rand::CryptoRng>(
        _rng: &mut R,
        mechanism: Mechanism,
    ) -> Result<KemKeyPair, KemError> {
        let algorithm =
            mechanism.backend().ok_or(KemError::MechanismNotAvailable(mechanism.name()))?;

        let handle = DecapsulationKey::generate(algorithm)
            .map_err(|e| KemError::KeyGeneration(format!("backend key generation failed: {e}")))?;

        let encaps_key = handle.encapsulation_key().map_err(|e| {
            KemError::KeyGeneration(format!("failed to derive encapsulation key: {e}"))
        })?;

        let pk_bytes = encaps_key
            .key_bytes()
            .map_err(|e| KemError::KeyGeneration(format!("failed to serialize public key: {e}")))?;

        let public = KemPublicKey::new(mechanism, pk_bytes.as_ref().to_vec())?;
        Ok(KemKeyPair { public, secret: KemSecretKey { mechanism, handle } })
    }

    /// Encapsulates a fresh shared secret against a public key.
    ///
    /// Pure function of the public key and fresh backend randomness; no
    /// session or secret key is involved, so any holder of the public key
    /// may call this, from any thread.
    ///
    /// # Errors
    ///
    /// Returns [`KemError::MechanismNotAvailable`] if the key's mechanism
    /// has no backend binding, or [`KemError::Encapsulation`] if the
    /// backend rejects the key or fails internally.
    #[instrument(
        level = "debug",
        skip(_rng, public_key),
        fields(mechanism = %public_key.mechanism())
    )]
    pub fn encapsulate<R: rand::Rng + rand::CryptoRng>(
        _rng: &mut R,
        public_key: &KemPublicKey,
    ) -> Result<(SharedSecret, KemCiphertext), KemError> {
        let mechanism = public_key.mechanism();
        let algorithm =
            mechanism.backend().ok_or(KemError::MechanismNotAvailable(mechanism.name()))?;

        let encaps_key = EncapsulationKey::new(algorithm, public_key.as_bytes())
            .map_err(|e| KemError::Encapsulation(format!("invalid public key: {e}")))?;

        let (ciphertext, shared_secret) = encaps_key
            .encapsulate()
            .map_err(|e| KemError::Encapsulation(format!("backend encapsulation failed: {e}")))?;

        let ss_bytes = shared_secret.as_ref();
        if ss_bytes.len() != mechanism.shared_secret_len() {
            return Err(KemError::Encapsulation(format!(
                "unexpected shared secret length: expected {}, got {}",
                mechanism.shared_secret_len(),
                ss_bytes.len()
            )));
        }

        let ct = KemCiphertext::new(mechanism, ciphertext.as_ref().to_vec())?;
        Ok((SharedSecret::new(ss_bytes.to_vec()), ct))
    }

    /// Decapsulates a ciphertext with the given secret key handle.
    ///
    /// A ciphertext of the correct length always decapsulates: corrupted
    /// or adversarial input yields the backend's implicit-rejection secret
    /// rather than an error. Length validation happens at
    /// [`KemCiphertext`] construction, before this call.
    ///
    /// # Errors
    ///
    /// Returns [`KemError::Decapsulation`] if the ciphertext belongs to a
    /// different mechanism than the key, or if the backend reports an
    /// internal failure.
    #[instrument(
        level = "debug",
        skip(secret_key, ciphertext),
        fields(mechanism = %secret_key.mechanism())
    )]
    pub fn decapsulate(
        secret_key: &KemSecretKey,
        ciphertext: &KemCiphertext,
    ) -> Result<SharedSecret, KemError> {
        if secret_key.mechanism() != ciphertext.mechanism() {
            return Err(KemError::Decapsulation(format!(
                "mechanism mismatch: secret key is {}, ciphertext is {}",
                secret_key.mechanism().name(),
                ciphertext.mechanism().name()
            )));
        }

        let shared_secret = secret_key
            .handle
            .decapsulate(Ciphertext::from(ciphertext.as_bytes()))
            .map_err(|e| KemError::Decapsulation(format!("backend decapsulation failed: {e}")))?;

        Ok(SharedSecret::new(shared_secret.as_ref().to_vec()))
    }
}
