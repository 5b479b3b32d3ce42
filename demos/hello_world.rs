//! Basic usage of indicator commitments.
//!
//! This example demonstrates:
//! - Committing to a secret indicator under a fresh nonce
//! - Encoding the commitment into a proof token
//! - Verifying the token against the commitment
//! - Seeing a foreign commitment rejected
//! - Opening the commitment once the indicator is disclosed

use indicator_zkp::{encode_token, Generator, Secret, SecureRng, Verifier};

fn main() {
    println!("Indicator Commitments: Basic Example\n");

    println!("Step 1: Initialize generator and RNG");
    let generator = Generator::default();
    let mut rng = SecureRng::new();
    println!("  Using SHA-256 commitments with the default salt\n");

    println!("Step 2: Prover commits to a secret indicator");
    let indicator = "44d88612fea8a8f36de82e1278abb02f";
    let secret = Secret::new(indicator).expect("indicator is not blank");
    let (nonce, commitment) = generator
        .generate(&mut rng, secret)
        .expect("Generation should succeed");
    println!("  Commitment: {commitment}");
    println!("  (The secret was zeroized; the nonce stays with the prover)\n");

    println!("Step 3: Encode the proof token");
    let proof = encode_token(&commitment, &nonce).to_string();
    println!("  Proof: {proof}\n");

    println!("Step 4: Verifier checks the pair");
    let verifier = Verifier::default();
    match verifier.check(commitment.as_str(), &proof) {
        Ok(()) => println!("  Proof is VALID for this commitment"),
        Err(e) => println!("  Proof is INVALID: {e}"),
    }

    println!("\nStep 5: The same proof against an unrelated commitment");
    match verifier.check("deadbeef", &proof) {
        Ok(()) => println!("  Unexpectedly accepted"),
        Err(e) => println!("  Rejected: {e}"),
    }

    println!("\nStep 6: Prover discloses the indicator and nonce");
    let disclosed = Secret::new(indicator).expect("indicator is not blank");
    match verifier.open(commitment.as_str(), disclosed, nonce.as_str()) {
        Ok(()) => println!("  Opening matches the commitment"),
        Err(e) => println!("  Opening rejected: {e}"),
    }

    println!("\nThe verifier learned nothing about the indicator until it was disclosed.");
}
