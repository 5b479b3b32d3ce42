//! Error types for indicator commitments and proofs

use crate::workflow::Mode;

/// Main error types for the library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The secret was empty or whitespace only; nothing was generated.
    #[error("Secret cannot be empty")]
    EmptySecret,

    /// The commitment was empty or whitespace only; nothing was verified.
    #[error("Commitment cannot be empty")]
    EmptyCommitment,

    /// The proof was empty or whitespace only; nothing was verified.
    #[error("Proof cannot be empty")]
    EmptyProof,

    /// A nonce is too short or contains characters outside base-36.
    #[error("Invalid nonce: {0}")]
    InvalidNonce(String),

    /// A commitment is not a lowercase hexadecimal digest.
    #[error("Invalid commitment: {0}")]
    InvalidCommitment(String),

    /// The proof token does not have the `zkp_<commitment>_<fragment>` shape.
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// The commitment embedded in the proof differs from the supplied commitment.
    #[error("Proof is bound to a different commitment")]
    CommitmentMismatch,

    /// A revealed secret and nonce do not reproduce the commitment.
    #[error("Opening does not match the commitment")]
    OpeningMismatch,

    /// The workflow mode already has an operation in flight.
    #[error("{0} operation already in progress")]
    Busy(Mode),

    /// Configuration is malformed or contains invalid values.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A submission was refused for a reason other than proof validity.
    #[error("Submission rejected: {0}")]
    Rejected(String),
}
