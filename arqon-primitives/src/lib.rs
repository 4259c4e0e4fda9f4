#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # Arqon Primitives
//!
//! Native-backend bindings for the Arqon key-encapsulation library.
//!
//! This crate owns the lowest layer of the stack: the static mechanism
//! descriptors (names and fixed byte lengths), the binding to the AWS-LC
//! cryptographic backend via `aws-lc-rs`, and the sensitive-buffer types
//! that carry key material and shared secrets.
//!
//! Higher-level concerns — the name-based catalog, session lifecycle, and
//! the public error taxonomy — live in `arqon-core`. Application code
//! should normally depend on that crate instead of this one.
//!
//! ## Mechanisms
//!
//! | Name           | Public key | Secret key | Ciphertext | Shared secret |
//! |----------------|------------|------------|------------|---------------|
//! | `ML-KEM-512`   | 800        | 1632       | 768        | 32            |
//! | `ML-KEM-768`   | 1184       | 2400       | 1088       | 32            |
//! | `ML-KEM-1024`  | 1568       | 3168       | 1568       | 32            |
//! | `Kyber512-R3`  | 800        | 1632       | 768        | 32            |
//! | `Kyber768-R3`  | 1184       | 2400       | 1088       | 32            |
//! | `Kyber1024-R3` | 1568       | 3168       | 1568       | 32            |
//!
//! The ML-KEM parameter sets (FIPS 203) are backed by aws-lc-rs and are
//! compiled in through the `ml-kem-512`/`ml-kem-768`/`ml-kem-1024` cargo
//! features (all on by default). The `Kyber*-R3` round-3 draft names are
//! retained in the descriptor table for catalog compatibility; no stable
//! backend binding exists for them, so they can never be instantiated.
//!
//! ## Feature Flags
//!
//! - **`ml-kem-512`** — compile in the ML-KEM-512 backend binding
//! - **`ml-kem-768`** — compile in the ML-KEM-768 backend binding
//! - **`ml-kem-1024`** — compile in the ML-KEM-1024 backend binding
//!
//! ## Security Properties
//!
//! - **IND-CCA2** for all backed mechanisms, per the AWS-LC implementation
//! - **Constant-time** secret handling inside the backend
//! - **Zeroization**: decapsulation keys are wiped by the backend when the
//!   owning handle is dropped; [`SharedSecret`] buffers are wiped on drop

pub mod error;
pub mod kem;

pub use error::{KemError, Result};
pub use kem::backend::{Kem, KemKeyPair, KemSecretKey};
pub use kem::mechanism::Mechanism;
pub use kem::types::{KemCiphertext, KemPublicKey, SharedSecret};
