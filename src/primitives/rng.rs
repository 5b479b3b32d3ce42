//! Cryptographically secure randomness and nonce drawing.

use rand::Rng;
use rand_core::{CryptoRng, CryptoRngCore, OsRng, RngCore};

use super::Nonce;
use crate::{Error, Result};

/// Alphabet of a base-36 nonce, in digit order.
pub const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Cryptographically secure random number generator.
///
/// This is a thin wrapper around `OsRng` so that every nonce in the crate is
/// drawn from the operating system's entropy source unless a test injects its own.
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new cryptographically secure random number generator.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

/// Draws a fresh base-36 nonce of `len` characters.
///
/// Each character is sampled uniformly from [`BASE36_ALPHABET`].
///
/// # Errors
///
/// Returns [`Error::InvalidNonce`] if `len` is below [`Nonce::MIN_LEN`].
pub fn draw_nonce<R: CryptoRngCore>(rng: &mut R, len: usize) -> Result<Nonce> {
    if len < Nonce::MIN_LEN {
        return Err(Error::InvalidNonce(format!(
            "nonce length {len} is below the minimum of {}",
            Nonce::MIN_LEN
        )));
    }

    let value: String = (0..len)
        .map(|_| char::from(BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())]))
        .collect();

    Nonce::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_requested_length() {
        let mut rng = SecureRng::new();
        let nonce = draw_nonce(&mut rng, 11).unwrap();
        assert_eq!(nonce.as_str().len(), 11);
        assert!(nonce.as_str().bytes().all(|b| BASE36_ALPHABET.contains(&b)));
    }

    #[test]
    fn rejects_short_length() {
        let mut rng = SecureRng::new();
        assert!(matches!(
            draw_nonce(&mut rng, 3),
            Err(Error::InvalidNonce(_))
        ));
    }

    #[test]
    fn consecutive_draws_differ() {
        let mut rng = SecureRng::new();
        let a = draw_nonce(&mut rng, 16).unwrap();
        let b = draw_nonce(&mut rng, 16).unwrap();
        assert_ne!(a.as_str(), b.as_str());
    }
}
