use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::primitives::{DigestAlgorithm, Nonce};
use crate::protocol::{VerificationPolicy, DEFAULT_NONCE_LEN, DEFAULT_SALT};
use crate::{Error, Result};

/// Default location of the TOML configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/zkp.toml";

/// Commitment and verification configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZkpConfig {
    /// Digest used for commitments.
    pub digest: DigestAlgorithm,
    /// System-wide salt appended to every commitment input.
    pub salt: String,
    /// Length of freshly drawn nonces.
    pub nonce_length: usize,
    /// How proofs are tied to commitments during verification.
    pub policy: VerificationPolicy,
    /// Artificial delays for workflow operations.
    pub latency: LatencySettings,
}

impl Default for ZkpConfig {
    fn default() -> Self {
        Self {
            digest: DigestAlgorithm::default(),
            salt: DEFAULT_SALT.to_string(),
            nonce_length: DEFAULT_NONCE_LEN,
            policy: VerificationPolicy::default(),
            latency: LatencySettings::default(),
        }
    }
}

/// Artificial delays applied by workflow sessions, in milliseconds.
///
/// All zero by default. Front ends that want visible progress set these.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencySettings {
    /// Delay before a generate operation settles.
    pub generate_ms: u64,
    /// Delay before a verify operation settles.
    pub verify_ms: u64,
    /// Delay before a proof submission is accepted.
    pub submit_ms: u64,
}

impl LatencySettings {
    /// Generate delay as a [`Duration`].
    pub fn generate(&self) -> Duration {
        Duration::from_millis(self.generate_ms)
    }

    /// Verify delay as a [`Duration`].
    pub fn verify(&self) -> Duration {
        Duration::from_millis(self.verify_ms)
    }

    /// Submit delay as a [`Duration`].
    pub fn submit(&self) -> Duration {
        Duration::from_millis(self.submit_ms)
    }
}

impl ZkpConfig {
    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `ZKP_` prefix (e.g., `ZKP_NONCE_LENGTH=16`)
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    /// 4. Built-in defaults
    ///
    /// The TOML file path can be set via `ZKP_CONFIG_PATH`. If not set, defaults to
    /// [`DEFAULT_CONFIG_PATH`]. A missing file is silently skipped.
    ///
    /// Nested keys use a double underscore:
    /// ```bash
    /// ZKP_DIGEST=sha256
    /// ZKP_SALT=salt
    /// ZKP_NONCE_LENGTH=11
    /// ZKP_POLICY=bound
    /// ZKP_LATENCY__GENERATE_MS=1500
    /// ZKP_LATENCY__VERIFY_MS=1200
    /// ```
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the configuration is malformed or fails
    /// [`ZkpConfig::validate`].
    pub fn from_env() -> Result<Self> {
        // Attempt to load .env file (silently ignore if it doesn't exist)
        let _ = dotenvy::dotenv();

        let config_path =
            std::env::var("ZKP_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Self::from_figment(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Toml::file(&config_path))
                .merge(Env::prefixed("ZKP_").ignore(&["config_path"]).split("__")),
        )
    }

    /// Extracts and validates configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the nonce is too short to embed a fragment or
    /// the salt is empty.
    pub fn validate(&self) -> Result<()> {
        if self.nonce_length < Nonce::MIN_LEN {
            return Err(Error::Config(format!(
                "nonce_length must be at least {}",
                Nonce::MIN_LEN
            )));
        }

        if self.salt.is_empty() {
            return Err(Error::Config("salt cannot be empty".to_string()));
        }

        Ok(())
    }
}
