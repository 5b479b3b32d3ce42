use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::debug;

use super::generator::{derive_commitment, DEFAULT_SALT};
use crate::config::ZkpConfig;
use crate::primitives::{
    Commitment, CommitmentDigest, DigestAlgorithm, Nonce, ProofToken, Secret, PROOF_PREFIX,
};
use crate::{Error, Result};

/// How strictly a proof token is tied to the commitment it is checked against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPolicy {
    /// Parse the token and require its embedded commitment to equal the supplied one.
    #[default]
    Bound,
    /// Accept any token starting with `zkp_` against any non-empty commitment.
    ///
    /// Kept for compatibility with tokens checked by earlier deployments. Any
    /// well-formed proof validates against an unrelated commitment under this policy.
    FormatOnly,
}

impl std::str::FromStr for VerificationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "bound" | "strict" => Ok(Self::Bound),
            "format_only" | "legacy" => Ok(Self::FormatOnly),
            other => Err(Error::Config(format!("unknown verification policy '{other}'"))),
        }
    }
}

/// Validity flag plus the reason a proof was turned down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the proof was accepted.
    pub valid: bool,
    /// The failed check, when `valid` is false.
    pub reason: Option<Error>,
}

impl VerificationResult {
    fn from_check(check: Result<()>) -> Self {
        match check {
            Ok(()) => Self {
                valid: true,
                reason: None,
            },
            Err(e) => Self {
                valid: false,
                reason: Some(e),
            },
        }
    }
}

/// Verifier for indicator proof tokens.
///
/// A verifier never sees the secret. Under [`VerificationPolicy::Bound`] it
/// accepts a token only if the token is well formed and carries exactly the
/// commitment it is checked against. Acceptance means the token is bound to the
/// commitment, not that knowledge of the secret was proven.
#[derive(Clone, Debug)]
pub struct Verifier<D: CommitmentDigest = DigestAlgorithm> {
    policy: VerificationPolicy,
    digest: D,
    salt: String,
}

impl Verifier<DigestAlgorithm> {
    /// Creates a verifier using the default digest and salt.
    pub fn new(policy: VerificationPolicy) -> Self {
        Self::with_digest(policy, DigestAlgorithm::default())
    }

    /// Creates a verifier from validated configuration.
    pub fn from_config(config: &ZkpConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            policy: config.policy,
            digest: config.digest,
            salt: config.salt.clone(),
        })
    }
}

impl Default for Verifier<DigestAlgorithm> {
    fn default() -> Self {
        Self::new(VerificationPolicy::default())
    }
}

impl<D: CommitmentDigest> Verifier<D> {
    /// Creates a verifier that opens commitments with `digest`.
    pub fn with_digest(policy: VerificationPolicy, digest: D) -> Self {
        Self {
            policy,
            digest,
            salt: DEFAULT_SALT.to_string(),
        }
    }

    /// Replaces the salt used when opening commitments.
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Returns the active policy.
    pub fn policy(&self) -> VerificationPolicy {
        self.policy
    }

    /// Checks `proof` against `commitment`.
    ///
    /// Returns `Ok(())` if the proof is accepted, `Err` naming the failed check otherwise.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyCommitment`] / [`Error::EmptyProof`] for blank inputs
    /// - [`Error::MalformedProof`] if the token shape is wrong
    /// - [`Error::CommitmentMismatch`] if the token carries another commitment
    pub fn check(&self, commitment: &str, proof: &str) -> Result<()> {
        let commitment = commitment.trim();
        let trimmed = proof.trim();

        if commitment.is_empty() {
            return Err(Error::EmptyCommitment);
        }
        if trimmed.is_empty() {
            return Err(Error::EmptyProof);
        }

        match self.policy {
            // the legacy check looks at the proof exactly as supplied
            VerificationPolicy::FormatOnly => {
                if proof.starts_with(PROOF_PREFIX) {
                    Ok(())
                } else {
                    Err(Error::MalformedProof(format!(
                        "missing '{PROOF_PREFIX}' prefix"
                    )))
                }
            }
            VerificationPolicy::Bound => {
                let token = ProofToken::parse(trimmed)?;
                let embedded = token.commitment().as_str().as_bytes();
                if bool::from(embedded.ct_eq(commitment.as_bytes())) {
                    Ok(())
                } else {
                    Err(Error::CommitmentMismatch)
                }
            }
        }
    }

    /// Returns `true` if [`Verifier::check`] accepts the pair.
    ///
    /// Blank inputs are never valid.
    pub fn verify(&self, commitment: &str, proof: &str) -> bool {
        match self.check(commitment, proof) {
            Ok(()) => true,
            Err(e) => {
                debug!(commitment = commitment.trim(), reason = %e, "proof rejected");
                false
            }
        }
    }

    /// Judges a pair, separating refusals from rejections.
    ///
    /// Blank inputs are refused with `Err`; every other outcome is a
    /// [`VerificationResult`].
    pub fn evaluate(&self, commitment: &str, proof: &str) -> Result<VerificationResult> {
        match self.check(commitment, proof) {
            Err(e @ (Error::EmptyCommitment | Error::EmptyProof)) => Err(e),
            other => Ok(VerificationResult::from_check(other)),
        }
    }

    /// Opens a commitment: checks that `secret` and `nonce` reproduce it.
    ///
    /// The secret is consumed and zeroized before returning.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyCommitment`] / [`Error::InvalidCommitment`] for a bad commitment
    /// - [`Error::InvalidNonce`] for a bad nonce
    /// - [`Error::OpeningMismatch`] if the recomputed digest differs
    pub fn open(&self, commitment: &str, secret: Secret, nonce: &str) -> Result<()> {
        let commitment = Commitment::parse(commitment)?;
        let nonce = Nonce::new(nonce)?;
        self.open_parsed(&commitment, &secret, &nonce)
    }

    /// Opens the commitment carried by `proof`.
    ///
    /// Additionally requires the token's nonce fragment to be the prefix of `nonce`.
    pub fn open_proof(&self, proof: &str, secret: Secret, nonce: &str) -> Result<()> {
        let token = ProofToken::parse(proof)?;
        let nonce = Nonce::new(nonce)?;

        if !bool::from(token.fragment().as_bytes().ct_eq(nonce.prefix().as_bytes())) {
            debug!(commitment = %token.commitment(), "nonce fragment does not match opening");
            return Err(Error::OpeningMismatch);
        }

        self.open_parsed(token.commitment(), &secret, &nonce)
    }

    fn open_parsed(&self, commitment: &Commitment, secret: &Secret, nonce: &Nonce) -> Result<()> {
        let recomputed = derive_commitment(&self.digest, secret, nonce, &self.salt);
        if bool::from(recomputed.ct_eq(commitment)) {
            Ok(())
        } else {
            debug!(commitment = %commitment, digest = self.digest.name(), "opening rejected");
            Err(Error::OpeningMismatch)
        }
    }
}
