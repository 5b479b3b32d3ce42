use std::sync::{Mutex, PoisonError};

use rand_core::CryptoRngCore;
use tracing::{debug, info, warn};

use super::state::{GeneratedProof, ModeSlot, OperationState, Settlement};
use super::Mode;
use crate::config::{LatencySettings, ZkpConfig};
use crate::primitives::{Secret, SecureRng};
use crate::protocol::{encode_token, Generator, VerificationResult, Verifier};
use crate::{Error, Result};

/// Prover/verifier workflow with two independent modes.
///
/// Each mode runs at most one operation at a time and moves through
/// idle → in-progress → settled. The modes share nothing; values move from one
/// to the other only when the caller copies the commitment and proof across.
///
/// # Examples
///
/// ```rust
/// use indicator_zkp::{ProofSession, ZkpConfig};
///
/// # #[tokio::main]
/// # async fn main() {
/// let session = ProofSession::new(&ZkpConfig::default()).unwrap();
/// let issued = session.generate("a4b3c2d1e5f6").await.unwrap();
/// let result = session.verify(&issued.commitment, &issued.proof).await.unwrap();
/// assert!(result.valid);
/// # }
/// ```
pub struct ProofSession<R: CryptoRngCore + Send = SecureRng> {
    generator: Generator,
    verifier: Verifier,
    latency: LatencySettings,
    rng: Mutex<R>,
    generate_slot: ModeSlot,
    verify_slot: ModeSlot,
}

impl ProofSession<SecureRng> {
    /// Creates a session drawing nonces from the operating system.
    pub fn new(config: &ZkpConfig) -> Result<Self> {
        Self::with_rng(config, SecureRng::new())
    }
}

impl<R: CryptoRngCore + Send> ProofSession<R> {
    /// Creates a session with an injected randomness source.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `config` fails validation.
    pub fn with_rng(config: &ZkpConfig, rng: R) -> Result<Self> {
        Ok(Self {
            generator: Generator::from_config(config)?,
            verifier: Verifier::from_config(config)?,
            latency: config.latency.clone(),
            rng: Mutex::new(rng),
            generate_slot: ModeSlot::new(Mode::Generate),
            verify_slot: ModeSlot::new(Mode::Verify),
        })
    }

    /// Commits to `secret` and derives its proof token.
    ///
    /// The nonce is zeroized once the token is encoded; only the commitment and
    /// proof are returned.
    ///
    /// # Errors
    ///
    /// - [`Error::Busy`] if a generate operation is already in flight
    /// - [`Error::EmptySecret`] if `secret` is blank (the mode settles as rejected)
    pub async fn generate(&self, secret: &str) -> Result<GeneratedProof> {
        let op = self.generate_slot.begin()?;

        let secret = match Secret::new(secret) {
            Ok(secret) => secret,
            Err(e) => {
                warn!(mode = %Mode::Generate, reason = %e, "operation refused");
                op.settle(Settlement::Rejected(e.clone()));
                return Err(e);
            }
        };

        pause(self.latency.generate()).await;

        let issued = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.generator.generate(&mut *rng, secret)
        };
        let (nonce, commitment) = match issued {
            Ok(issued) => issued,
            Err(e) => {
                op.settle(Settlement::Rejected(e.clone()));
                return Err(e);
            }
        };

        let proof = encode_token(&commitment, &nonce).to_string();
        drop(nonce);

        info!(commitment = %commitment, digest = %self.generator.digest(), "proof generated");

        let generated = GeneratedProof {
            commitment: commitment.to_string(),
            proof,
        };
        op.settle(Settlement::Generated(generated.clone()));
        Ok(generated)
    }

    /// Judges a commitment/proof pair.
    ///
    /// # Errors
    ///
    /// - [`Error::Busy`] if a verify operation is already in flight
    /// - [`Error::EmptyCommitment`] / [`Error::EmptyProof`] for blank inputs (the
    ///   mode settles as rejected)
    pub async fn verify(&self, commitment: &str, proof: &str) -> Result<VerificationResult> {
        let op = self.verify_slot.begin()?;

        if let Err(e) = refuse_blank(commitment, proof) {
            warn!(mode = %Mode::Verify, reason = %e, "operation refused");
            op.settle(Settlement::Rejected(e.clone()));
            return Err(e);
        }

        pause(self.latency.verify()).await;

        let result = self.verifier.evaluate(commitment, proof)?;
        match &result.reason {
            None => info!(commitment = commitment.trim(), "proof verified"),
            Some(reason) => info!(commitment = commitment.trim(), %reason, "proof not verified"),
        }

        op.settle(Settlement::Verified(result.clone()));
        Ok(result)
    }

    /// Snapshot of a mode's state.
    pub fn state(&self, mode: Mode) -> OperationState {
        self.slot(mode).snapshot()
    }

    /// Returns a settled mode to idle. In-flight operations are left alone.
    pub fn reset(&self, mode: Mode) {
        debug!(%mode, "resetting workflow mode");
        self.slot(mode).reset();
    }

    fn slot(&self, mode: Mode) -> &ModeSlot {
        match mode {
            Mode::Generate => &self.generate_slot,
            Mode::Verify => &self.verify_slot,
        }
    }
}

pub(crate) fn refuse_blank(commitment: &str, proof: &str) -> Result<()> {
    if commitment.trim().is_empty() {
        return Err(Error::EmptyCommitment);
    }
    if proof.trim().is_empty() {
        return Err(Error::EmptyProof);
    }
    Ok(())
}

pub(crate) async fn pause(delay: std::time::Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::VerificationPolicy;

    fn session() -> ProofSession {
        ProofSession::new(&ZkpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn generate_settles_with_outputs() {
        let session = session();
        assert_eq!(session.state(Mode::Generate), OperationState::Idle);

        let issued = session.generate("a4b3c2d1e5f6").await.unwrap();
        assert!(issued.proof.starts_with("zkp_"));
        assert_eq!(
            session.state(Mode::Generate),
            OperationState::Settled(Settlement::Generated(issued))
        );
        assert_eq!(session.state(Mode::Verify), OperationState::Idle);
    }

    #[tokio::test]
    async fn blank_secret_is_refused() {
        let session = session();
        assert_eq!(session.generate("   ").await, Err(Error::EmptySecret));
        assert_eq!(
            session.state(Mode::Generate),
            OperationState::Settled(Settlement::Rejected(Error::EmptySecret))
        );

        session.reset(Mode::Generate);
        assert_eq!(session.state(Mode::Generate), OperationState::Idle);
    }

    #[tokio::test]
    async fn verify_round_trip_and_mismatch() {
        let session = session();
        let first = session.generate("198.51.100.7").await.unwrap();
        let second = session.generate("198.51.100.8").await.unwrap();

        let ok = session.verify(&first.commitment, &first.proof).await.unwrap();
        assert!(ok.valid);

        let crossed = session
            .verify(&second.commitment, &first.proof)
            .await
            .unwrap();
        assert!(!crossed.valid);
        assert_eq!(crossed.reason, Some(Error::CommitmentMismatch));
    }

    #[tokio::test]
    async fn format_only_session_accepts_unrelated_commitment() {
        let config = ZkpConfig {
            policy: VerificationPolicy::FormatOnly,
            ..ZkpConfig::default()
        };
        let session = ProofSession::new(&config).unwrap();
        let result = session
            .verify("anything-nonempty", "zkp_deadbeef_abcd")
            .await
            .unwrap();
        assert!(result.valid);
    }

    #[tokio::test]
    async fn blank_verify_inputs_are_refused() {
        let session = session();
        assert_eq!(
            session.verify("", "zkp_x_y").await,
            Err(Error::EmptyCommitment)
        );
        assert_eq!(session.verify("c", "").await, Err(Error::EmptyProof));
    }
}
