//! Commitment digests.
//!
//! A digest turns the concatenation `secret ∥ nonce ∥ salt` into a lowercase
//! hexadecimal string. Two algorithms share that contract:
//!
//! - [`Sha256Digest`]: SHA-256, 64 hex characters. The default.
//! - [`RollingDigest`]: a 32-bit rolling accumulator kept for compatibility
//!   with commitments issued by earlier deployments. It is fast but **not**
//!   collision resistant and must not be relied on for binding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Error;

/// Text in, lowercase hex out.
pub trait CommitmentDigest {
    /// Stable identifier used in configuration and logs.
    fn name(&self) -> &'static str;

    /// Digests the UTF-8 text `input`.
    fn digest_hex(&self, input: &str) -> String;
}

/// SHA-256 commitment digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256Digest;

impl CommitmentDigest for Sha256Digest {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn digest_hex(&self, input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Legacy 32-bit rolling digest.
///
/// For each UTF-16 code unit `c`: `acc = acc * 31 + c`, wrapping at 32 bits.
/// The output is the magnitude of the final signed accumulator in hex, with no
/// padding, so it is between 1 and 8 characters long.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RollingDigest;

impl RollingDigest {
    /// Returns the raw signed accumulator for `input`.
    pub fn accumulate(input: &str) -> i32 {
        input.encode_utf16().fold(0i32, |acc, unit| {
            // (acc << 5) - acc, i.e. acc * 31
            acc.wrapping_shl(5)
                .wrapping_sub(acc)
                .wrapping_add(i32::from(unit))
        })
    }
}

impl CommitmentDigest for RollingDigest {
    fn name(&self) -> &'static str {
        "rolling"
    }

    fn digest_hex(&self, input: &str) -> String {
        format!("{:x}", Self::accumulate(input).unsigned_abs())
    }
}

/// Digest selection for configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestAlgorithm {
    /// [`Sha256Digest`].
    #[default]
    Sha256,
    /// [`RollingDigest`].
    Rolling,
}

impl CommitmentDigest for DigestAlgorithm {
    fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => Sha256Digest.name(),
            Self::Rolling => RollingDigest.name(),
        }
    }

    fn digest_hex(&self, input: &str) -> String {
        match self {
            Self::Sha256 => Sha256Digest.digest_hex(input),
            Self::Rolling => RollingDigest.digest_hex(input),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "rolling" | "legacy" => Ok(Self::Rolling),
            other => Err(Error::Config(format!("unknown digest algorithm '{other}'"))),
        }
    }
}
