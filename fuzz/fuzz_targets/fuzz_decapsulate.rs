#![no_main]

use libfuzzer_sys::fuzz_target;

use arqon_core::{CoreError, KemSession, enabled_kem_mechanisms};
use rand::rngs::OsRng;

// Arbitrary peer bytes fed into decapsulation must either hit the length
// gate or decapsulate through implicit rejection. Any panic or backend
// error surfacing here is a bug.
fuzz_target!(|data: &[u8]| {
    let Some(name) = enabled_kem_mechanisms().first().copied() else {
        return;
    };

    let mut rng = OsRng;
    let mut session = KemSession::open(name).expect("open session");
    session.generate_keypair(&mut rng).expect("generate keypair");

    match session.decapsulate(data) {
        Ok(_) => {}
        Err(CoreError::InvalidCiphertextLength { expected, actual, .. }) => {
            assert_ne!(expected, actual);
            assert_ne!(data.len(), expected);
        }
        Err(other) => panic!("unexpected error from decapsulate: {other:?}"),
    }
});
