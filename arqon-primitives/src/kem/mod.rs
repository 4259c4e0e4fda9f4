#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # Key Encapsulation Mechanism backend binding
//!
//! This module binds the Arqon mechanism descriptors to the AWS-LC
//! implementation and exposes the four primitive operations: keypair
//! generation, encapsulation, decapsulation, and (implicitly, through
//! ownership) key teardown.
//!
//! ## Example
//!
//! ```no_run
//! use arqon_primitives::kem::backend::Kem;
//! use arqon_primitives::kem::mechanism::Mechanism;
//! use rand::rngs::OsRng;
//!
//! let mut rng = OsRng;
//! let keypair = Kem::generate_keypair(&mut rng, Mechanism::MlKem768)?;
//! let (shared_secret, ciphertext) = Kem::encapsulate(&mut rng, keypair.public_key())?;
//! let recovered = Kem::decapsulate(keypair.secret_key(), &ciphertext)?;
//! assert_eq!(shared_secret, recovered);
//! # Ok::<(), arqon_primitives::KemError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`mechanism`]: static mechanism descriptors (names, byte lengths,
//!   backend bindings)
//! - [`types`]: validated byte containers for public keys, ciphertexts,
//!   and shared secrets
//! - [`backend`]: the primitive operations over aws-lc-rs

pub mod backend;
pub mod mechanism;
pub mod types;
