#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Configuration types for KEM sessions.

/// Policy for a second `generate_keypair` call on a session that already
/// holds key material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RekeyPolicy {
    /// Generate a fresh keypair and immediately drop (zeroize) the prior
    /// secret key. Ciphertexts encapsulated to the old public key can no
    /// longer be decapsulated to their original secret.
    ///
    /// This is the default: a session that regenerates is treated as a
    /// deliberate key rotation.
    #[default]
    Regenerate,

    /// Reject the second call with
    /// [`CoreError::RekeyNotPermitted`](crate::error::CoreError::RekeyNotPermitted),
    /// leaving the existing keypair untouched.
    Reject,
}

/// Per-session configuration.
///
/// # Examples
/// ```
/// use arqon_core::config::{RekeyPolicy, SessionConfig};
///
/// let config = SessionConfig::new().with_rekey_policy(RekeyPolicy::Reject);
/// assert_eq!(config.rekey_policy, RekeyPolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// How a keyed session responds to another `generate_keypair` call.
    ///
    /// Default: [`RekeyPolicy::Regenerate`].
    pub rekey_policy: RekeyPolicy,
}

impl SessionConfig {
    /// Creates a configuration with the default policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rekey policy.
    #[must_use]
    pub const fn with_rekey_policy(mut self, policy: RekeyPolicy) -> Self {
        self.rekey_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_regenerate() {
        assert_eq!(SessionConfig::default().rekey_policy, RekeyPolicy::Regenerate);
        assert_eq!(SessionConfig::new().rekey_policy, RekeyPolicy::Regenerate);
    }

    #[test]
    fn builder_overrides_policy() {
        let config = SessionConfig::new().with_rekey_policy(RekeyPolicy::Reject);
        assert_eq!(config.rekey_policy, RekeyPolicy::Reject);
    }
}
