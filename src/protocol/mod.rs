//! Commit, encode and verify.
//!
//! The three operations collaborators call:
//!
//! - [`generate`]: secret in, `(nonce, commitment)` out
//! - [`encode`]: `(commitment, nonce)` in, proof token out
//! - [`verify`]: `(commitment, proof)` in, validity out

/// Proof token encoding.
pub mod encoder;
/// Commitment generation.
pub mod generator;
/// Proof verification and commitment opening.
pub mod verifier;

pub use encoder::{encode, encode_token};
pub use generator::{Generator, DEFAULT_NONCE_LEN, DEFAULT_SALT};
pub use verifier::{VerificationPolicy, VerificationResult, Verifier};

use crate::primitives::{Commitment, Nonce, Secret, SecureRng};
use crate::Result;

/// Commits to `secret` with the default SHA-256 generator and OS randomness.
///
/// # Errors
///
/// Returns [`Error::EmptySecret`](crate::Error::EmptySecret) if `secret` is blank.
pub fn generate(secret: &str) -> Result<(Nonce, Commitment)> {
    let secret = Secret::new(secret)?;
    Generator::default().generate(&mut SecureRng::new(), secret)
}

/// Verifies `proof` against `commitment` under [`VerificationPolicy::Bound`].
pub fn verify(commitment: &str, proof: &str) -> bool {
    Verifier::default().verify(commitment, proof)
}
