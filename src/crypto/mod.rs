//! Fixed-time comparison primitives.
//!
//! Standard slice equality returns on the first differing byte, which leaks
//! the position of a mismatch through response latency. Everything that
//! compares a caller-supplied secret goes through this module instead.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Compares two byte strings without short-circuiting on content.
///
/// Inputs of different length never match. Only the lengths are observable
/// through timing, never the position of the first difference.
///
/// ```rust
/// use resume_gate::crypto::constant_time_eq;
///
/// assert!(constant_time_eq(b"hunter2", b"hunter2"));
/// assert!(!constant_time_eq(b"hunter2", b"hunter3"));
/// assert!(!constant_time_eq(b"hunter2", b"hunter22"));
/// ```
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Compares the SHA-256 digests of both inputs in fixed time.
///
/// Both sides are reduced to 32 bytes first, so neither the input lengths nor
/// the mismatch position influence the comparison.
pub fn digest_eq(a: &[u8], b: &[u8]) -> bool {
    let a = Sha256::digest(a);
    let b = Sha256::digest(b);
    a.as_slice().ct_eq(b.as_slice()).into()
}
