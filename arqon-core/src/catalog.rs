#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! The KEM mechanism catalog.
//!
//! Two-tier status for every mechanism name:
//!
//! - **supported** — the name exists in the descriptor table of this
//!   build, whether or not it can be instantiated. Asking for anything
//!   else is a caller error (a typo, or an algorithm this library does
//!   not know).
//! - **enabled** — supported, with a compiled-in backend binding, and not
//!   vetoed by platform policy. Only enabled mechanisms can back a
//!   session.
//!
//! Both listings are derived from the same static table
//! ([`Mechanism::ALL`]), so `enabled ⊆ supported` holds by construction
//! rather than by convention. Results are pure and stable for the process
//! lifetime: mechanism availability is fixed once the binary is built.

use arqon_primitives::Mechanism;

use crate::error::{CoreError, Result};

mod policy {
    //! Platform mechanism policy.
    //!
    //! Names matched by a pattern here are held back from the enabled set
    //! on the corresponding platform even when their binding is compiled
    //! in. Patterns match by substring so a whole family can be vetoed at
    //! once. Both lists are empty for the mechanisms this release ships;
    //! the seam stays in place for parameter sets with OS-specific
    //! restrictions.

    #[cfg(windows)]
    const DISABLED_PATTERNS: &[&str] = &[];
    #[cfg(not(windows))]
    const DISABLED_PATTERNS: &[&str] = &[];

    pub(super) fn platform_disabled(name: &str) -> bool {
        DISABLED_PATTERNS.iter().any(|pattern| name.contains(pattern))
    }
}

/// Whether `mechanism` is usable in this build on this platform.
fn mechanism_enabled(mechanism: Mechanism) -> bool {
    mechanism.is_available() && !policy::platform_disabled(mechanism.name())
}

/// Every mechanism name this build recognizes, in catalog order.
///
/// Inclusion says nothing about usability; see
/// [`enabled_kem_mechanisms`] for the instantiable subset.
#[must_use]
pub fn supported_kem_mechanisms() -> Vec<&'static str> {
    Mechanism::ALL.iter().map(|m| m.name()).collect()
}

/// The mechanism names that can actually back a session in this build,
/// in catalog order.
#[must_use]
pub fn enabled_kem_mechanisms() -> Vec<&'static str> {
    Mechanism::ALL
        .iter()
        .copied()
        .filter(|m| mechanism_enabled(*m))
        .map(|m| m.name())
        .collect()
}

/// Returns true if `name` is in the catalog (exact, case-sensitive).
#[must_use]
pub fn is_kem_supported(name: &str) -> bool {
    Mechanism::from_name(name).is_some()
}

/// Returns true if `name` is in the catalog and usable in this build.
#[must_use]
pub fn is_kem_enabled(name: &str) -> bool {
    Mechanism::from_name(name).is_some_and(mechanism_enabled)
}

/// Resolves a mechanism name for session construction.
///
/// This is the three-way check behind the session factory: an unknown
/// name and a known-but-unusable name fail with different errors because
/// the caller's remediation differs (fix the name vs. rebuild the
/// backend).
///
/// # Errors
///
/// - [`CoreError::MechanismNotSupported`] if `name` is not in the catalog
/// - [`CoreError::MechanismNotEnabled`] if it is, but cannot be
///   instantiated in this build
pub fn resolve(name: &str) -> Result<Mechanism> {
    match Mechanism::from_name(name) {
        None => Err(CoreError::MechanismNotSupported(name.to_string())),
        Some(mechanism) if !mechanism_enabled(mechanism) => {
            Err(CoreError::MechanismNotEnabled(name.to_string()))
        }
        Some(mechanism) => Ok(mechanism),
    }
}
