use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::session::{pause, refuse_blank};
use crate::config::ZkpConfig;
use crate::primitives::{Commitment, CommitmentDigest, Sha256Digest};
use crate::protocol::Verifier;
use crate::{Error, Result};

const MAX_TAGS: usize = 32;
const MAX_TAG_LEN: usize = 64;
const MAX_SOURCE_LEN: usize = 256;

/// Category of threat indicator a proof stands for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// File hash.
    #[default]
    Hash,
    /// IP address.
    Ip,
    /// Domain name.
    Domain,
    /// URL.
    Url,
}

impl IndicatorKind {
    /// Identifier used on the command line and in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Ip => "ip",
            Self::Domain => "domain",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(Self::Hash),
            "ip" => Ok(Self::Ip),
            "domain" => Ok(Self::Domain),
            "url" => Ok(Self::Url),
            other => Err(Error::Rejected(format!("unknown indicator kind '{other}'"))),
        }
    }
}

/// Reported severity of the indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Low.
    Low,
    /// Medium.
    #[default]
    Medium,
    /// High.
    High,
    /// Critical.
    Critical,
}

impl Severity {
    /// Identifier used on the command line and in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(Error::Rejected(format!("unknown severity '{other}'"))),
        }
    }
}

/// An indicator submitted by proof instead of by value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProofSubmission {
    /// Commitment to the undisclosed indicator.
    pub commitment: String,
    /// Proof token issued with the commitment.
    pub proof: String,
    /// Indicator category.
    pub kind: IndicatorKind,
    /// Reported severity.
    pub severity: Severity,
    /// Comma-separated tags.
    pub tags: String,
    /// Optional free-form source label.
    pub source: Option<String>,
}

/// Acknowledgement of an accepted submission.
///
/// Receipts are returned to the caller; nothing is stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// SHA-256 of the submitted proof token, lowercase hex.
    pub id: String,
    /// The commitment the submission is bound to.
    pub commitment: Commitment,
    /// Indicator category.
    pub kind: IndicatorKind,
    /// Reported severity.
    pub severity: Severity,
    /// Normalised tags: trimmed, lowercased, deduplicated, in first-seen order.
    pub tags: Vec<String>,
    /// Trimmed source label, if any.
    pub source: Option<String>,
    /// When the gate accepted the submission.
    pub accepted_at: SystemTime,
}

/// Gate that accepts indicator submissions only with a valid proof.
#[derive(Clone, Debug)]
pub struct SubmissionGate {
    verifier: Verifier,
    delay: std::time::Duration,
}

impl SubmissionGate {
    /// Creates a gate with no artificial delay.
    pub fn new(verifier: Verifier) -> Self {
        Self {
            verifier,
            delay: std::time::Duration::ZERO,
        }
    }

    /// Creates a gate from validated configuration.
    pub fn from_config(config: &ZkpConfig) -> Result<Self> {
        Ok(Self {
            verifier: Verifier::from_config(config)?,
            delay: config.latency.submit(),
        })
    }

    /// Verifies the submission's proof and issues a receipt.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyCommitment`] / [`Error::EmptyProof`] for blank inputs
    /// - [`Error::InvalidCommitment`] if the commitment is not lowercase hex
    /// - [`Error::MalformedProof`] / [`Error::CommitmentMismatch`] if the proof
    ///   does not verify
    /// - [`Error::Rejected`] for oversized tags or source labels
    pub async fn submit(&self, submission: ProofSubmission) -> Result<SubmissionReceipt> {
        refuse_blank(&submission.commitment, &submission.proof)?;

        let tags = normalize_tags(&submission.tags)?;
        let source = normalize_source(submission.source.as_deref())?;
        let commitment = Commitment::parse(&submission.commitment)?;

        pause(self.delay).await;

        if let Err(e) = self.verifier.check(commitment.as_str(), &submission.proof) {
            warn!(commitment = %commitment, reason = %e, "submission refused");
            return Err(e);
        }

        let receipt = SubmissionReceipt {
            id: Sha256Digest.digest_hex(submission.proof.trim()),
            commitment,
            kind: submission.kind,
            severity: submission.severity,
            tags,
            source,
            accepted_at: SystemTime::now(),
        };

        info!(
            id = %receipt.id,
            kind = %receipt.kind,
            severity = %receipt.severity,
            "submission accepted"
        );

        Ok(receipt)
    }
}

fn normalize_tags(raw: &str) -> Result<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();

    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if tag.chars().count() > MAX_TAG_LEN {
            return Err(Error::Rejected(format!(
                "tag exceeds {MAX_TAG_LEN} characters"
            )));
        }
        let tag = tag.to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    if tags.len() > MAX_TAGS {
        return Err(Error::Rejected(format!("more than {MAX_TAGS} tags")));
    }

    Ok(tags)
}

fn normalize_source(raw: Option<&str>) -> Result<Option<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(source) if source.chars().count() > MAX_SOURCE_LEN => Err(Error::Rejected(
            format!("source exceeds {MAX_SOURCE_LEN} characters"),
        )),
        Some(source) => Ok(Some(source.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_normalised() {
        assert_eq!(
            normalize_tags(" Malware, banking,,trojan , malware ").unwrap(),
            vec!["malware", "banking", "trojan"]
        );
        assert!(normalize_tags("").unwrap().is_empty());
        assert!(normalize_tags(&"x".repeat(MAX_TAG_LEN + 1)).is_err());

        let many: Vec<String> = (0..=MAX_TAGS).map(|i| format!("t{i}")).collect();
        assert!(matches!(
            normalize_tags(&many.join(",")),
            Err(Error::Rejected(_))
        ));
    }

    #[test]
    fn source_is_optional() {
        assert_eq!(normalize_source(None).unwrap(), None);
        assert_eq!(normalize_source(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_source(Some(" partner feed ")).unwrap(),
            Some("partner feed".to_string())
        );
        assert!(normalize_source(Some(&"s".repeat(MAX_SOURCE_LEN + 1))).is_err());
    }

    #[test]
    fn kind_and_severity_parse() {
        assert_eq!("IP".parse::<IndicatorKind>().unwrap(), IndicatorKind::Ip);
        assert!("email".parse::<IndicatorKind>().is_err());
        assert_eq!(Severity::default(), Severity::Medium);
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert!(Severity::Critical > Severity::High);
    }

    #[tokio::test]
    async fn gate_accepts_bound_proof() {
        let gate = SubmissionGate::new(Verifier::default());
        let receipt = gate
            .submit(ProofSubmission {
                commitment: "c0ffee".to_string(),
                proof: "zkp_c0ffee_ab12".to_string(),
                kind: IndicatorKind::Domain,
                severity: Severity::High,
                tags: "phishing, APT29".to_string(),
                source: None,
            })
            .await
            .unwrap();

        assert_eq!(receipt.commitment.as_str(), "c0ffee");
        assert_eq!(receipt.tags, vec!["phishing", "apt29"]);
        assert_eq!(receipt.id, Sha256Digest.digest_hex("zkp_c0ffee_ab12"));
        assert_eq!(receipt.kind, IndicatorKind::Domain);
    }

    #[tokio::test]
    async fn gate_rejects_mismatched_proof() {
        let gate = SubmissionGate::new(Verifier::default());
        let err = gate
            .submit(ProofSubmission {
                commitment: "c0ffee".to_string(),
                proof: "zkp_deadbeef_ab12".to_string(),
                ..ProofSubmission::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, Error::CommitmentMismatch);
    }
}
