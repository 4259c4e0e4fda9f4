#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Static KEM mechanism descriptors.
//!
//! A [`Mechanism`] names one parameter set known to this build and carries
//! its fixed byte lengths plus the (optional) aws-lc-rs binding. The full
//! descriptor table is the single source of truth for both the supported
//! set (every variant) and the enabled set (variants whose binding was
//! compiled in) — the subset relationship between the two holds by
//! construction because both are derived from [`Mechanism::ALL`].

use std::fmt;

use aws_lc_rs::kem::Algorithm as AwsKemAlgorithm;

/// A KEM parameter set known to the descriptor table.
///
/// Every variant is *supported* (the name resolves, lengths are known).
/// Whether a variant is *available* — instantiable through the backend —
/// depends on the cargo features this crate was built with; see
/// [`Mechanism::is_available`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mechanism {
    /// ML-KEM-512 (FIPS 203), NIST security category 1.
    MlKem512,
    /// ML-KEM-768 (FIPS 203), NIST security category 3.
    MlKem768,
    /// ML-KEM-1024 (FIPS 203), NIST security category 5.
    MlKem1024,
    /// Kyber round-3 draft, category 1. Catalog name only; no binding.
    Kyber512R3,
    /// Kyber round-3 draft, category 3. Catalog name only; no binding.
    Kyber768R3,
    /// Kyber round-3 draft, category 5. Catalog name only; no binding.
    Kyber1024R3,
}

impl Mechanism {
    /// Every mechanism in the descriptor table, in catalog order.
    ///
    /// The order here is the order reported by the catalog listing
    /// functions and is stable across releases.
    pub const ALL: [Mechanism; 6] = [
        Mechanism::MlKem512,
        Mechanism::MlKem768,
        Mechanism::MlKem1024,
        Mechanism::Kyber512R3,
        Mechanism::Kyber768R3,
        Mechanism::Kyber1024R3,
    ];

    /// Returns the canonical mechanism name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Mechanism::MlKem512 => "ML-KEM-512",
            Mechanism::MlKem768 => "ML-KEM-768",
            Mechanism::MlKem1024 => "ML-KEM-1024",
            Mechanism::Kyber512R3 => "Kyber512-R3",
            Mechanism::Kyber768R3 => "Kyber768-R3",
            Mechanism::Kyber1024R3 => "Kyber1024-R3",
        }
    }

    /// Looks up a mechanism by its canonical name.
    ///
    /// Matching is exact and case-sensitive; `None` means the name is
    /// unknown to this build entirely.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Mechanism> {
        Mechanism::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Returns the public key size in bytes.
    #[must_use]
    pub const fn public_key_len(&self) -> usize {
        match self {
            Mechanism::MlKem512 | Mechanism::Kyber512R3 => 800,
            Mechanism::MlKem768 | Mechanism::Kyber768R3 => 1184,
            Mechanism::MlKem1024 | Mechanism::Kyber1024R3 => 1568,
        }
    }

    /// Returns the secret key size in bytes.
    #[must_use]
    pub const fn secret_key_len(&self) -> usize {
        match self {
            Mechanism::MlKem512 | Mechanism::Kyber512R3 => 1632,
            Mechanism::MlKem768 | Mechanism::Kyber768R3 => 2400,
            Mechanism::MlKem1024 | Mechanism::Kyber1024R3 => 3168,
        }
    }

    /// Returns the ciphertext size in bytes.
    #[must_use]
    pub const fn ciphertext_len(&self) -> usize {
        match self {
            Mechanism::MlKem512 | Mechanism::Kyber512R3 => 768,
            Mechanism::MlKem768 | Mechanism::Kyber768R3 => 1088,
            Mechanism::MlKem1024 | Mechanism::Kyber1024R3 => 1568,
        }
    }

    /// Returns the shared secret size in bytes (32 for all mechanisms).
    #[must_use]
    pub const fn shared_secret_len(&self) -> usize {
        32
    }

    /// Returns the NIST security category.
    #[must_use]
    pub const fn security_category(&self) -> usize {
        match self {
            Mechanism::MlKem512 | Mechanism::Kyber512R3 => 1,
            Mechanism::MlKem768 | Mechanism::Kyber768R3 => 3,
            Mechanism::MlKem1024 | Mechanism::Kyber1024R3 => 5,
        }
    }

    /// Whether a backend binding for this mechanism was compiled in.
    ///
    /// The draft Kyber rows always report `false`: aws-lc-rs no longer
    /// ships the round-3 parameter sets, so the names stay recognizable
    /// without ever being instantiable.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend().is_some()
    }

    /// Resolves the aws-lc-rs algorithm for this mechanism, if the
    /// corresponding cargo feature was enabled at build time.
    pub(crate) fn backend(&self) -> Option<&'static AwsKemAlgorithm> {
        match self {
            #[cfg(feature = "ml-kem-512")]
            Mechanism::MlKem512 => Some(&aws_lc_rs::kem::ML_KEM_512),
            #[cfg(not(feature = "ml-kem-512"))]
            Mechanism::MlKem512 => None,

            #[cfg(feature = "ml-kem-768")]
            Mechanism::MlKem768 => Some(&aws_lc_rs::kem::ML_KEM_768),
            #[cfg(not(feature = "ml-kem-768"))]
            Mechanism::MlKem768 => None,

            #[cfg(feature = "ml-kem-1024")]
            Mechanism::MlKem1024 => Some(&aws_lc_rs::kem::ML_KEM_1024),
            #[cfg(not(feature = "ml-kem-1024"))]
            Mechanism::MlKem1024 => None,

            Mechanism::Kyber512R3 | Mechanism::Kyber768R3 | Mechanism::Kyber1024R3 => None,
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn names_are_canonical() {
        assert_eq!(Mechanism::MlKem512.name(), "ML-KEM-512");
        assert_eq!(Mechanism::MlKem768.name(), "ML-KEM-768");
        assert_eq!(Mechanism::MlKem1024.name(), "ML-KEM-1024");
        assert_eq!(Mechanism::Kyber768R3.name(), "Kyber768-R3");
    }

    #[test]
    fn from_name_is_exact_and_case_sensitive() {
        assert_eq!(Mechanism::from_name("ML-KEM-768"), Some(Mechanism::MlKem768));
        assert_eq!(Mechanism::from_name("ml-kem-768"), None);
        assert_eq!(Mechanism::from_name("ML-KEM-768 "), None);
        assert_eq!(Mechanism::from_name("bogus"), None);
    }

    #[test]
    fn round_trips_through_name() {
        for mechanism in Mechanism::ALL {
            assert_eq!(Mechanism::from_name(mechanism.name()), Some(mechanism));
        }
    }

    #[test]
    fn fips_203_lengths() {
        let expected = [
            (Mechanism::MlKem512, 800, 1632, 768),
            (Mechanism::MlKem768, 1184, 2400, 1088),
            (Mechanism::MlKem1024, 1568, 3168, 1568),
        ];
        for (mechanism, pk, sk, ct) in expected {
            assert_eq!(mechanism.public_key_len(), pk, "{mechanism} pk");
            assert_eq!(mechanism.secret_key_len(), sk, "{mechanism} sk");
            assert_eq!(mechanism.ciphertext_len(), ct, "{mechanism} ct");
            assert_eq!(mechanism.shared_secret_len(), 32, "{mechanism} ss");
        }
    }

    #[test]
    fn draft_mechanisms_share_round3_lengths() {
        assert_eq!(Mechanism::Kyber512R3.public_key_len(), Mechanism::MlKem512.public_key_len());
        assert_eq!(Mechanism::Kyber768R3.ciphertext_len(), Mechanism::MlKem768.ciphertext_len());
        assert_eq!(Mechanism::Kyber1024R3.secret_key_len(), Mechanism::MlKem1024.secret_key_len());
    }

    #[test]
    fn draft_mechanisms_are_never_available() {
        assert!(!Mechanism::Kyber512R3.is_available());
        assert!(!Mechanism::Kyber768R3.is_available());
        assert!(!Mechanism::Kyber1024R3.is_available());
    }

    #[cfg(feature = "ml-kem-768")]
    #[test]
    fn ml_kem_768_is_available_when_compiled_in() {
        assert!(Mechanism::MlKem768.is_available());
    }

    #[test]
    fn catalog_order_is_stable() {
        let names: Vec<&str> = Mechanism::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            [
                "ML-KEM-512",
                "ML-KEM-768",
                "ML-KEM-1024",
                "Kyber512-R3",
                "Kyber768-R3",
                "Kyber1024-R3"
            ]
        );
    }
}
