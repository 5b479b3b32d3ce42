use crate::primitives::{Commitment, Nonce, ProofToken};
use crate::Result;

/// Packages a commitment and its nonce into a proof token.
///
/// Only the first four nonce characters are embedded.
pub fn encode_token(commitment: &Commitment, nonce: &Nonce) -> ProofToken {
    ProofToken::new(commitment.clone(), nonce)
}

/// Text form of [`encode_token`]: `"zkp_" + commitment + "_" + nonce[0..4]`.
///
/// Pure and deterministic.
///
/// # Errors
///
/// - [`Error::EmptyCommitment`](crate::Error::EmptyCommitment) for a blank commitment
/// - [`Error::InvalidCommitment`](crate::Error::InvalidCommitment) if it is not lowercase hex
/// - [`Error::InvalidNonce`](crate::Error::InvalidNonce) if the nonce is shorter than four
///   characters or not base-36
///
/// # Examples
///
/// ```rust
/// use indicator_zkp::encode;
///
/// assert_eq!(encode("3fa9c1", "k2j9x8q").unwrap(), "zkp_3fa9c1_k2j9");
/// ```
pub fn encode(commitment: &str, nonce: &str) -> Result<String> {
    let commitment = Commitment::parse(commitment)?;
    let nonce = Nonce::new(nonce)?;
    Ok(encode_token(&commitment, &nonce).to_string())
}
