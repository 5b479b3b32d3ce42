//! Caller-facing workflows built on the protocol.
//!
//! - **session**: generate and verify modes with a per-mode state machine
//! - **submission**: gate that accepts indicator submissions backed by a proof
//! - **state**: operation lifecycle shared by the session modes

use std::fmt;

/// Generate/verify session.
pub mod session;
/// Operation lifecycle states.
pub mod state;
/// Submit-via-proof gate.
pub mod submission;

pub use session::ProofSession;
pub use state::{GeneratedProof, OperationState, Settlement};
pub use submission::{IndicatorKind, ProofSubmission, Severity, SubmissionGate, SubmissionReceipt};

/// The two independent workflow modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Commit to a secret and issue a proof.
    Generate,
    /// Check a commitment/proof pair.
    Verify,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generate => f.write_str("generate"),
            Self::Verify => f.write_str("verify"),
        }
    }
}
