#![no_main]

use libfuzzer_sys::fuzz_target;

use arqon_core::{KemSession, is_kem_enabled, is_kem_supported};

// The catalog invariant (enabled implies supported) and the factory
// contract (no session for unknown or disabled names) must hold for any
// input string.
fuzz_target!(|data: &[u8]| {
    let Ok(name) = std::str::from_utf8(data) else {
        return;
    };

    let supported = is_kem_supported(name);
    let enabled = is_kem_enabled(name);
    assert!(supported || !enabled, "enabled mechanism missing from supported set: {name}");

    if !enabled {
        assert!(KemSession::open(name).is_err(), "session constructed for {name}");
    }
});
