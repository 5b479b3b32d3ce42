use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::config::ZkpConfig;
use crate::primitives::{draw_nonce, Commitment, CommitmentDigest, DigestAlgorithm, Nonce, Secret};
use crate::Result;

/// System-wide salt appended to every commitment input.
pub const DEFAULT_SALT: &str = "salt";

/// Nonce length used unless configured otherwise.
pub const DEFAULT_NONCE_LEN: usize = 11;

/// Digests `secret ∥ nonce ∥ salt` into a commitment.
///
/// The concatenated input is zeroized once the digest is computed.
pub(crate) fn derive_commitment<D: CommitmentDigest>(
    digest: &D,
    secret: &Secret,
    nonce: &Nonce,
    salt: &str,
) -> Commitment {
    let secret = secret.expose();
    let mut input = Zeroizing::new(String::with_capacity(
        secret.len() + nonce.as_str().len() + salt.len(),
    ));
    input.push_str(secret);
    input.push_str(nonce.as_str());
    input.push_str(salt);

    Commitment::from_digest(digest.digest_hex(&input))
}

/// Commitment generator.
///
/// Commits to a secret indicator under a freshly drawn nonce. The commitment can
/// be shared; the nonce stays with the prover and is only needed again to open
/// the commitment.
///
/// # Security
///
/// - Pass a [`SecureRng`](crate::SecureRng) (or another `CryptoRngCore`) to [`Generator::generate`]
/// - The secret is consumed and zeroized before `generate` returns, on every path
/// - Never log or transmit the returned [`Nonce`]
#[derive(Clone, Debug)]
pub struct Generator<D: CommitmentDigest = DigestAlgorithm> {
    digest: D,
    salt: String,
    nonce_len: usize,
}

impl Generator<DigestAlgorithm> {
    /// Creates a generator from validated configuration.
    pub fn from_config(config: &ZkpConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            digest: config.digest,
            salt: config.salt.clone(),
            nonce_len: config.nonce_length,
        })
    }
}

impl Default for Generator<DigestAlgorithm> {
    fn default() -> Self {
        Self::new(DigestAlgorithm::default())
    }
}

impl<D: CommitmentDigest> Generator<D> {
    /// Creates a generator with the default salt and nonce length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indicator_zkp::{Generator, Sha256Digest};
    ///
    /// let generator = Generator::new(Sha256Digest);
    /// ```
    pub fn new(digest: D) -> Self {
        Self {
            digest,
            salt: DEFAULT_SALT.to_string(),
            nonce_len: DEFAULT_NONCE_LEN,
        }
    }

    /// Replaces the salt.
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Replaces the nonce length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNonce`](crate::Error::InvalidNonce) if `len` is
    /// below [`Nonce::MIN_LEN`].
    pub fn with_nonce_len(mut self, len: usize) -> Result<Self> {
        if len < Nonce::MIN_LEN {
            return Err(crate::Error::InvalidNonce(format!(
                "nonce length {len} is below the minimum of {}",
                Nonce::MIN_LEN
            )));
        }
        self.nonce_len = len;
        Ok(self)
    }

    /// Returns the digest in use.
    pub fn digest(&self) -> &D {
        &self.digest
    }

    /// Commits to `secret` under a fresh nonce.
    ///
    /// Returns the nonce and the commitment. Two calls with the same secret
    /// produce different pairs with overwhelming probability.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indicator_zkp::{Generator, Secret, SecureRng};
    ///
    /// let mut rng = SecureRng::new();
    /// let secret = Secret::new("198.51.100.23").unwrap();
    /// let (nonce, commitment) = Generator::default().generate(&mut rng, secret).unwrap();
    ///
    /// assert!(nonce.as_str().len() >= 4);
    /// assert_eq!(commitment.as_str().len(), 64);
    /// ```
    pub fn generate<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        secret: Secret,
    ) -> Result<(Nonce, Commitment)> {
        let nonce = draw_nonce(rng, self.nonce_len)?;
        let commitment = self.commit(&secret, &nonce);
        drop(secret);

        Ok((nonce, commitment))
    }

    /// Deterministically recomputes the commitment for a known secret and nonce.
    pub fn commit(&self, secret: &Secret, nonce: &Nonce) -> Commitment {
        derive_commitment(&self.digest, secret, nonce, &self.salt)
    }
}
