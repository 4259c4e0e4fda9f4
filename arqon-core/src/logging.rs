#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Security-conscious logging utilities.
//!
//! Structured logging with `tracing`, with one hard rule: no key material,
//! shared secret, or ciphertext bytes ever reach a log line. Byte buffers
//! are rendered through [`sanitize_bytes`], which shows only the length
//! and, for larger buffers, a SHA-256 fingerprint usable for correlation.
//!
//! ## Usage
//!
//! ```no_run
//! use arqon_core::logging::{init_tracing, sanitize_bytes};
//!
//! // Sets the global subscriber; call once per process.
//! init_tracing().expect("failed to init tracing");
//!
//! let ciphertext = vec![0u8; 1088];
//! tracing::debug!("received ciphertext: {}", sanitize_bytes(&ciphertext));
//! ```

use std::fmt;

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Compute the first 16 hex characters of a SHA-256 hash.
///
/// Provides a fingerprint for correlating buffers across log lines without
/// revealing content.
fn sha256_first_16_hex(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    let digest = hasher.finalize();
    // SHA-256 always yields 32 bytes; .get(..8) cannot fail.
    digest.get(..8).map_or_else(|| hex::encode(digest), hex::encode)
}

/// Render byte data safely for logging.
///
/// - Buffers of 32 bytes or fewer (potential secrets): length only.
/// - Larger buffers: length plus a SHA-256 fingerprint.
///
/// # Example
///
/// ```
/// use arqon_core::logging::sanitize_bytes;
///
/// assert_eq!(format!("{}", sanitize_bytes(&[1, 2, 3])), "[3 bytes]");
///
/// let rendered = format!("{}", sanitize_bytes(&[0u8; 1088]));
/// assert!(rendered.contains("1088 bytes"));
/// assert!(rendered.contains("fingerprint:"));
/// ```
#[must_use]
pub fn sanitize_bytes(data: &[u8]) -> SanitizedBytes<'_> {
    SanitizedBytes(data)
}

/// Display wrapper produced by [`sanitize_bytes`].
pub struct SanitizedBytes<'a>(&'a [u8]);

impl fmt::Display for SanitizedBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() <= 32 {
            write!(f, "[{} bytes]", self.0.len())
        } else {
            write!(f, "[{} bytes, fingerprint: {}]", self.0.len(), sha256_first_16_hex(self.0))
        }
    }
}

/// Initialize tracing with security-conscious defaults.
///
/// Sets up environment-based filtering (`RUST_LOG`, defaulting to
/// `arqon=info`) with a compact formatting layer.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arqon=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .try_init()?;

    info!("Arqon logging initialized");
    Ok(())
}

/// Log a KEM operation start at TRACE level.
#[macro_export]
macro_rules! log_kem_operation_start {
    ($op:expr, $($field:tt)*) => {
        tracing::trace!(
            target: "kem::operation",
            operation = $op,
            phase = "start",
            $($field)*
        );
    };
    ($op:expr) => {
        tracing::trace!(
            target: "kem::operation",
            operation = $op,
            phase = "start",
        );
    };
}

/// Log a KEM operation completion at TRACE level.
#[macro_export]
macro_rules! log_kem_operation_complete {
    ($op:expr, $($field:tt)*) => {
        tracing::trace!(
            target: "kem::operation",
            operation = $op,
            phase = "complete",
            $($field)*
        );
    };
    ($op:expr) => {
        tracing::trace!(
            target: "kem::operation",
            operation = $op,
            phase = "complete",
        );
    };
}

/// Log a KEM operation error at ERROR level.
#[macro_export]
macro_rules! log_kem_operation_error {
    ($op:expr, $error:expr, $($field:tt)*) => {
        tracing::error!(
            target: "kem::operation",
            operation = $op,
            error = %$error,
            phase = "error",
            $($field)*
        );
    };
    ($op:expr, $error:expr) => {
        tracing::error!(
            target: "kem::operation",
            operation = $op,
            error = %$error,
            phase = "error",
        );
    };
}
