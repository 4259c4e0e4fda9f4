//! Session lifecycle and teardown tests.
//!
//! Covers the factory/usage errors, the ciphertext length gate, idempotent
//! close, the rekey policies, and library initialization.

#![allow(clippy::panic, clippy::unwrap_used, clippy::expect_used, clippy::panic_in_result_fn)]

use arqon_core::{
    CoreError, KemSession, RekeyPolicy, SessionConfig, enabled_kem_mechanisms, encapsulate,
};
use rand::rngs::OsRng;

fn open_first_enabled() -> Option<KemSession> {
    let name = enabled_kem_mechanisms().first().copied()?;
    Some(KemSession::open(name).expect("open session"))
}

// ============================================================================
// Ciphertext Length Gate
// ============================================================================

#[test]
fn wrong_length_ciphertext_is_a_usage_error() {
    let mut rng = OsRng;
    for name in enabled_kem_mechanisms() {
        let mut session = KemSession::open(name).expect("open session");
        session.generate_keypair(&mut rng).expect("generate keypair");
        let expected = session.mechanism().ciphertext_len();

        for actual in [0, 1, expected - 1, expected + 1, expected * 2] {
            match session.decapsulate(&vec![0u8; actual]) {
                Err(CoreError::InvalidCiphertextLength {
                    mechanism,
                    expected: reported_expected,
                    actual: reported_actual,
                }) => {
                    assert_eq!(mechanism, name);
                    assert_eq!(reported_expected, expected);
                    assert_eq!(reported_actual, actual);
                }
                other => panic!(
                    "{name}: expected InvalidCiphertextLength for {actual}-byte input, got {other:?}"
                ),
            }
        }
    }
}

#[test]
fn empty_ciphertext_reports_length_error() {
    // A keyed session with a wrong-length ciphertext must report the
    // length error, not a backend failure: the backend is never reached.
    let mut rng = OsRng;
    let Some(mut session) = open_first_enabled() else { return };
    session.generate_keypair(&mut rng).expect("generate keypair");

    let result = session.decapsulate(&[]);
    assert!(
        matches!(result, Err(CoreError::InvalidCiphertextLength { .. })),
        "expected InvalidCiphertextLength, got {result:?}"
    );
}

// ============================================================================
// Close Semantics
// ============================================================================

#[test]
fn double_close_does_not_fail() {
    let Some(mut session) = open_first_enabled() else { return };
    session.close();
    session.close();
    assert!(session.is_closed());
}

#[test]
fn closing_one_session_leaves_others_intact() {
    let mut rng = OsRng;
    let Some(name) = enabled_kem_mechanisms().first().copied() else {
        return;
    };

    let mut doomed = KemSession::open(name).expect("open doomed session");
    let mut survivor = KemSession::open(name).expect("open surviving session");

    doomed.generate_keypair(&mut rng).expect("generate keypair");
    let survivor_pk = survivor.generate_keypair(&mut rng).expect("generate keypair");
    let (ciphertext, secret_sender) = encapsulate(&mut rng, &survivor_pk).expect("encapsulate");

    doomed.close();
    doomed.close();

    let secret_receiver =
        survivor.decapsulate(ciphertext.as_bytes()).expect("survivor must keep working");
    assert_eq!(secret_sender, secret_receiver, "closing one session corrupted another");
}

#[test]
fn drop_tears_down_without_close() {
    let mut rng = OsRng;
    let Some(name) = enabled_kem_mechanisms().first().copied() else {
        return;
    };

    let (ciphertext, secret_sender, survivor_secret) = {
        let mut inner = KemSession::open(name).expect("open inner session");
        let pk = inner.generate_keypair(&mut rng).expect("generate keypair");
        let (ct, ss) = encapsulate(&mut rng, &pk).expect("encapsulate");
        let recovered = inner.decapsulate(ct.as_bytes()).expect("decapsulate");
        (ct, ss, recovered)
        // inner drops here; Drop must run close() without panicking
    };

    assert_eq!(secret_sender, survivor_secret);
    drop(ciphertext);
}

// ============================================================================
// Rekey Policies
// ============================================================================

#[test]
fn regenerate_policy_invalidates_previous_secret() {
    let mut rng = OsRng;
    for name in enabled_kem_mechanisms() {
        let mut session = KemSession::open(name).expect("open session");

        let pk1 = session.generate_keypair(&mut rng).expect("first keypair");
        let (ct1, ss1) = encapsulate(&mut rng, &pk1).expect("encapsulate to first key");

        let pk2 = session.generate_keypair(&mut rng).expect("regenerate");
        assert_ne!(pk1.as_bytes(), pk2.as_bytes(), "{name}: regeneration repeated a public key");

        // The old ciphertext now meets a different secret key; implicit
        // rejection yields some secret, but not the original one.
        let recovered = session.decapsulate(ct1.as_bytes()).expect("decapsulate");
        assert_ne!(ss1, recovered, "{name}: old secret survived regeneration");
    }
}

#[test]
fn reject_policy_refuses_second_generation() {
    let mut rng = OsRng;
    let Some(name) = enabled_kem_mechanisms().first().copied() else {
        return;
    };

    let config = SessionConfig::new().with_rekey_policy(RekeyPolicy::Reject);
    let mut session = KemSession::open_with_config(name, config).expect("open session");

    let pk = session.generate_keypair(&mut rng).expect("first keypair");
    let (ciphertext, secret_sender) = encapsulate(&mut rng, &pk).expect("encapsulate");

    match session.generate_keypair(&mut rng) {
        Err(CoreError::RekeyNotPermitted) => {}
        other => panic!("expected RekeyNotPermitted, got {other:?}"),
    }

    // The refused rekey must leave the original keypair fully functional.
    let secret_receiver = session.decapsulate(ciphertext.as_bytes()).expect("decapsulate");
    assert_eq!(secret_sender, secret_receiver, "reject policy disturbed the existing keypair");
    assert_eq!(session.public_key().map(|pk| pk.to_bytes()), Some(pk.to_bytes()));
}

// ============================================================================
// Public Key Import
// ============================================================================

#[test]
fn import_public_key_validates_name_and_length() {
    let mut rng = OsRng;
    let Some(name) = enabled_kem_mechanisms().first().copied() else {
        return;
    };

    let mut session = KemSession::open(name).expect("open session");
    let pk = session.generate_keypair(&mut rng).expect("generate keypair");
    let bytes = pk.to_bytes();

    // Honest import round-trips.
    let imported = arqon_core::import_public_key(name, &bytes).expect("import");
    assert_eq!(imported.as_bytes(), bytes.as_slice());

    // Unknown and disabled names fail through the catalog check.
    assert!(matches!(
        arqon_core::import_public_key("bogus", &bytes),
        Err(CoreError::MechanismNotSupported(_))
    ));
    assert!(matches!(
        arqon_core::import_public_key("Kyber768-R3", &bytes),
        Err(CoreError::MechanismNotEnabled(_))
    ));

    // Truncated key bytes report the structured length error.
    match arqon_core::import_public_key(name, &bytes[..bytes.len() - 1]) {
        Err(CoreError::InvalidPublicKeyLength { mechanism, expected, actual }) => {
            assert_eq!(mechanism, name);
            assert_eq!(expected, bytes.len());
            assert_eq!(actual, bytes.len() - 1);
        }
        other => panic!("expected InvalidPublicKeyLength, got {other:?}"),
    }
}

// ============================================================================
// Usage Errors
// ============================================================================

#[test]
fn decapsulate_before_keygen_fails() {
    let Some(session) = open_first_enabled() else { return };
    let ct = vec![0u8; session.mechanism().ciphertext_len()];
    assert!(matches!(session.decapsulate(&ct), Err(CoreError::MissingKeyPair)));
}

#[test]
fn closed_session_rejects_all_operations() {
    let mut rng = OsRng;
    let Some(mut session) = open_first_enabled() else { return };
    let pk = session.generate_keypair(&mut rng).expect("generate keypair");
    let ct_len = session.mechanism().ciphertext_len();
    session.close();

    assert!(matches!(session.generate_keypair(&mut rng), Err(CoreError::SessionClosed)));
    assert!(matches!(session.encapsulate(&mut rng, &pk), Err(CoreError::SessionClosed)));
    assert!(matches!(session.decapsulate(&vec![0u8; ct_len]), Err(CoreError::SessionClosed)));
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn init_self_tests_pass() {
    arqon_core::init().expect("power-up self-tests");
    assert!(arqon_core::self_tests_passed());
}
