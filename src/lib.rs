//! # Indicator commitments
//!
//! Share a threat indicator (a file hash, an IP address, a domain, a URL) without
//! disclosing it. The holder commits to the indicator under a random nonce and
//! hands out the commitment together with a proof token; anyone can check that
//! the token belongs to the commitment, and the holder can later open the
//! commitment by revealing the indicator and nonce.
//!
//! ## Quick start
//!
//! ```rust
//! use indicator_zkp::{encode_token, Generator, Secret, SecureRng, Verifier};
//!
//! let mut rng = SecureRng::new();
//! let secret = Secret::new("44d88612fea8a8f36de82e1278abb02f").unwrap();
//!
//! let (nonce, commitment) = Generator::default().generate(&mut rng, secret).unwrap();
//! let proof = encode_token(&commitment, &nonce).to_string();
//!
//! let verifier = Verifier::default();
//! assert!(verifier.verify(commitment.as_str(), &proof));
//! ```
//!
//! ## Security
//!
//! - Secrets and nonces are zeroized on drop and redacted in `Debug` output
//! - Commitments default to SHA-256; the rolling digest exists only for legacy tokens
//! - A proof token shows that it was issued for a commitment, not that the holder
//!   knows the secret; use [`Verifier::open`] when the secret is disclosed

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Configuration loading.
pub mod config;
/// Error types.
pub mod error;
/// Core primitives (digests, gadgets, randomness).
pub mod primitives;
/// Generator, encoder and verifier.
pub mod protocol;
/// Session and submission workflows.
pub mod workflow;

pub use config::{LatencySettings, ZkpConfig};
pub use error::Error;
pub use primitives::{
    draw_nonce, Commitment, CommitmentDigest, DigestAlgorithm, Nonce, ProofToken, RollingDigest,
    Secret, SecureRng, Sha256Digest, PROOF_PREFIX,
};
pub use protocol::{
    encode, encode_token, generate, verify, Generator, VerificationPolicy, VerificationResult,
    Verifier,
};
pub use workflow::{
    GeneratedProof, IndicatorKind, Mode, OperationState, ProofSession, ProofSubmission, Settlement,
    Severity, SubmissionGate, SubmissionReceipt,
};

/// Result type for library operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
