//! Protocol gadgets for indicator commitments.
//!
//! This module contains the core data structures passed between the generator,
//! the encoder and the verifier: secret, nonce, commitment and proof token.

use std::fmt;
use std::str::FromStr;

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::rng::BASE36_ALPHABET;
use crate::{Error, Result};

/// Literal prefix of every proof token.
pub const PROOF_PREFIX: &str = "zkp_";

/// Separator between the embedded commitment and the nonce fragment.
const FRAGMENT_SEPARATOR: char = '_';

fn is_base36(s: &str) -> bool {
    s.bytes().all(|b| BASE36_ALPHABET.contains(&b))
}

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// The sensitive value being committed to, such as a file hash or an IP address.
///
/// # Security
///
/// - The secret is zeroized when dropped, including when construction fails
/// - `Debug` output is redacted
/// - Never log, store or transmit a secret
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(String);

impl Secret {
    /// Wraps `value` as a secret.
    ///
    /// The value is taken as-is; surrounding whitespace is part of the secret.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySecret`] if `value` is empty after trimming. The
    /// rejected value is zeroized before returning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indicator_zkp::Secret;
    ///
    /// assert!(Secret::new("44d88612fea8a8f36de82e1278abb02f").is_ok());
    /// assert!(Secret::new("   ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let secret = Self(value.into());
        if secret.0.trim().is_empty() {
            return Err(Error::EmptySecret);
        }
        Ok(secret)
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Per-proof random blinding value.
///
/// Base-36 text of at least [`Nonce::MIN_LEN`] characters. The full nonce feeds
/// the commitment; only [`Nonce::prefix`] ever appears in a proof token.
///
/// Automatically zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Nonce(String);

impl Nonce {
    /// Minimum nonce length, and the length of the fragment embedded in proofs.
    pub const MIN_LEN: usize = 4;

    /// Creates a nonce from base-36 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNonce`] if the value is shorter than
    /// [`Nonce::MIN_LEN`] or contains characters outside `0-9a-z`.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let nonce = Self(value.into());
        if nonce.0.len() < Self::MIN_LEN {
            return Err(Error::InvalidNonce(format!(
                "expected at least {} characters",
                Self::MIN_LEN
            )));
        }
        if !is_base36(&nonce.0) {
            return Err(Error::InvalidNonce(
                "only characters 0-9 and a-z are allowed".to_string(),
            ));
        }
        Ok(nonce)
    }

    /// Returns the full nonce.
    ///
    /// # Security
    ///
    /// Only the holder of the secret should ever see this value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the fragment embedded in proof tokens.
    pub fn prefix(&self) -> &str {
        // base-36 is ASCII, so byte indexing lands on a char boundary
        &self.0[..Self::MIN_LEN]
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({}…)", self.prefix())
    }
}

/// Public digest binding a secret and nonce.
///
/// Always non-empty lowercase hexadecimal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Commitment(String);

impl Commitment {
    /// Parses a commitment, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyCommitment`] if nothing remains after trimming
    /// - [`Error::InvalidCommitment`] if the value is not lowercase hex
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::EmptyCommitment);
        }
        if !is_lower_hex(value) {
            return Err(Error::InvalidCommitment(
                "expected lowercase hexadecimal digits".to_string(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub(crate) fn from_digest(hex: String) -> Self {
        debug_assert!(!hex.is_empty() && is_lower_hex(&hex));
        Self(hex)
    }

    /// Returns the hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ConstantTimeEq for Commitment {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_bytes().ct_eq(other.0.as_bytes())
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Commitment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Portable proof token: `zkp_<commitment>_<nonce-fragment>`.
///
/// # Security
///
/// A token is public. It carries the commitment it was issued for and the first
/// four characters of the nonce, which is not enough to reopen the commitment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProofToken {
    commitment: Commitment,
    fragment: String,
}

impl ProofToken {
    /// Creates a token for `commitment`, embedding the nonce prefix.
    pub fn new(commitment: Commitment, nonce: &Nonce) -> Self {
        Self {
            commitment,
            fragment: nonce.prefix().to_string(),
        }
    }

    /// Parses a token in canonical form, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyProof`] if nothing remains after trimming
    /// - [`Error::MalformedProof`] if the prefix, the embedded commitment, the
    ///   separator or the four-character base-36 fragment is missing or invalid
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::EmptyProof);
        }

        let body = value
            .strip_prefix(PROOF_PREFIX)
            .ok_or_else(|| Error::MalformedProof(format!("missing '{PROOF_PREFIX}' prefix")))?;

        let (commitment, fragment) = body.split_once(FRAGMENT_SEPARATOR).ok_or_else(|| {
            Error::MalformedProof("missing separator before nonce fragment".to_string())
        })?;

        if commitment.is_empty() {
            return Err(Error::MalformedProof(
                "embedded commitment is empty".to_string(),
            ));
        }
        if !is_lower_hex(commitment) {
            return Err(Error::MalformedProof(
                "embedded commitment is not lowercase hex".to_string(),
            ));
        }
        if fragment.len() != Nonce::MIN_LEN || !is_base36(fragment) {
            return Err(Error::MalformedProof(format!(
                "nonce fragment must be {} base-36 characters",
                Nonce::MIN_LEN
            )));
        }

        Ok(Self {
            commitment: Commitment(commitment.to_string()),
            fragment: fragment.to_string(),
        })
    }

    /// Returns the commitment embedded in the token.
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Returns the embedded nonce fragment.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

impl fmt::Display for ProofToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PROOF_PREFIX}{}{FRAGMENT_SEPARATOR}{}",
            self.commitment, self.fragment
        )
    }
}

impl FromStr for ProofToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
