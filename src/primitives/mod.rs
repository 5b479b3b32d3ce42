//! Core building blocks for indicator commitments.
//!
//! - **digest**: commitment digests (SHA-256 and the legacy rolling digest)
//! - **gadgets**: secret, nonce, commitment and proof token types
//! - **rng**: secure randomness and base-36 nonce drawing

/// Commitment digest algorithms.
pub mod digest;
/// Protocol gadgets (secret, nonce, commitment, proof token).
pub mod gadgets;
/// Cryptographically secure random number generation.
pub mod rng;

pub use digest::{CommitmentDigest, DigestAlgorithm, RollingDigest, Sha256Digest};
pub use gadgets::{Commitment, Nonce, ProofToken, Secret, PROOF_PREFIX};
pub use rng::{draw_nonce, SecureRng};
