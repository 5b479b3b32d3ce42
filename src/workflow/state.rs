use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Mode;
use crate::protocol::VerificationResult;
use crate::{Error, Result};

/// Public outputs of a settled generate operation.
///
/// The nonce is not part of it: only the commitment and the proof leave the
/// generate workflow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedProof {
    /// Commitment to the secret, lowercase hex.
    pub commitment: String,
    /// Proof token for the commitment.
    pub proof: String,
}

/// What an operation settled with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// A commitment and proof were produced.
    Generated(GeneratedProof),
    /// A commitment/proof pair was judged.
    Verified(VerificationResult),
    /// The operation was refused before it ran.
    Rejected(Error),
}

/// Lifecycle of a single workflow mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OperationState {
    /// Nothing has run since the last reset.
    #[default]
    Idle,
    /// An operation is in flight; new input is turned away.
    InProgress,
    /// The last operation finished.
    Settled(Settlement),
}

/// State slot for one workflow mode.
///
/// The lock is only held for state transitions, never across an `.await`.
#[derive(Debug)]
pub(crate) struct ModeSlot {
    mode: Mode,
    state: Mutex<OperationState>,
}

impl ModeSlot {
    pub(crate) fn new(mode: Mode) -> Self {
        Self {
            mode,
            state: Mutex::new(OperationState::Idle),
        }
    }

    fn lock(&self) -> MutexGuard<'_, OperationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn snapshot(&self) -> OperationState {
        self.lock().clone()
    }

    pub(crate) fn reset(&self) {
        let mut state = self.lock();
        if *state != OperationState::InProgress {
            *state = OperationState::Idle;
        }
    }

    /// Moves the slot to in-progress.
    ///
    /// # Errors
    /// Returns [`Error::Busy`] if an operation is already in flight.
    pub(crate) fn begin(&self) -> Result<InFlight<'_>> {
        let mut state = self.lock();
        if *state == OperationState::InProgress {
            return Err(Error::Busy(self.mode));
        }
        *state = OperationState::InProgress;
        Ok(InFlight {
            slot: self,
            settled: false,
        })
    }
}

/// Guard for an in-flight operation.
///
/// Dropping it without settling (a cancelled future) puts the slot back to idle.
#[derive(Debug)]
pub(crate) struct InFlight<'a> {
    slot: &'a ModeSlot,
    settled: bool,
}

impl InFlight<'_> {
    pub(crate) fn settle(mut self, settlement: Settlement) {
        *self.slot.lock() = OperationState::Settled(settlement);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.slot.lock() = OperationState::Idle;
        }
    }
}
