mod common;

use std::collections::HashSet;

use indicator_zkp::{
    encode, encode_token, Commitment, CommitmentDigest, Generator, Nonce, ProofToken,
    RollingDigest, Secret, SecureRng, Sha256Digest, VerificationPolicy, Verifier,
};
use proptest::prelude::*;

fn secret_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,48}[!-~][ -~]{0,16}"
}

proptest! {
    #[test]
    fn generate_yields_hex_commitment_and_usable_nonce(secret in secret_strategy()) {
        let mut rng = SecureRng::new();
        let (nonce, commitment) = Generator::default()
            .generate(&mut rng, Secret::new(secret).expect("secret is non-blank"))
            .expect("generation should succeed");

        prop_assert!(common::is_lower_hex(commitment.as_str()));
        prop_assert!(nonce.as_str().len() >= Nonce::MIN_LEN);
    }

    #[test]
    fn round_trip_verifies_under_both_policies(secret in secret_strategy()) {
        let mut rng = SecureRng::new();
        let (nonce, commitment) = Generator::default()
            .generate(&mut rng, Secret::new(secret).expect("secret is non-blank"))
            .expect("generation should succeed");
        let proof = encode(commitment.as_str(), nonce.as_str()).expect("encoding should succeed");

        for policy in [VerificationPolicy::Bound, VerificationPolicy::FormatOnly] {
            prop_assert!(Verifier::new(policy).verify(commitment.as_str(), &proof));
        }
    }

    #[test]
    fn encode_matches_token_shape_and_is_deterministic(
        commitment in "[0-9a-f]{1,64}",
        nonce in "[0-9a-z]{4,16}",
    ) {
        let first = encode(&commitment, &nonce).expect("encoding should succeed");
        let second = encode(&commitment, &nonce).expect("encoding should succeed");

        prop_assert_eq!(&first, &second);
        prop_assert!(common::is_proof_shaped(&first));
        prop_assert_eq!(first, format!("zkp_{}_{}", commitment, &nonce[..4]));
    }

    #[test]
    fn token_parse_inverts_display(
        commitment in "[0-9a-f]{1,64}",
        nonce in "[0-9a-z]{4,16}",
    ) {
        let token = encode_token(
            &Commitment::parse(&commitment).expect("valid commitment"),
            &Nonce::new(nonce).expect("valid nonce"),
        );
        let parsed: ProofToken = token.to_string().parse().expect("canonical token parses");
        prop_assert_eq!(parsed, token);
    }

    #[test]
    fn bound_policy_rejects_any_other_commitment(
        embedded in "[0-9a-f]{1,64}",
        supplied in "[0-9a-f]{1,64}",
        fragment in "[0-9a-z]{4}",
    ) {
        prop_assume!(embedded != supplied);
        let proof = format!("zkp_{embedded}_{fragment}");
        prop_assert!(!Verifier::default().verify(&supplied, &proof));
    }

    #[test]
    fn digests_are_deterministic_lower_hex(input in ".{0,64}") {
        let digests: [&dyn CommitmentDigest; 2] = [&Sha256Digest, &RollingDigest];
        for digest in digests {
            let a = digest.digest_hex(&input);
            prop_assert_eq!(&a, &digest.digest_hex(&input));
            prop_assert!(common::is_lower_hex(&a));
        }
    }

    #[test]
    fn arbitrary_text_never_panics_verifier(commitment in ".{0,32}", proof in ".{0,80}") {
        let _ = Verifier::default().check(&commitment, &proof);
        let _ = ProofToken::parse(&proof);
    }

    #[test]
    fn multibyte_text_split_at_char_midpoint_never_panics(text in "\\PC{0,40}") {
        let mid = text
            .char_indices()
            .nth(text.chars().count() / 2)
            .map_or(text.len(), |(i, _)| i);
        let (commitment, proof) = text.split_at(mid);
        let _ = Verifier::default().check(commitment, proof);
    }
}

#[test]
fn char_midpoint_split_handles_two_byte_input() {
    let text = "\u{e9}";
    let mid = text
        .char_indices()
        .nth(text.chars().count() / 2)
        .map_or(text.len(), |(i, _)| i);
    assert_eq!(text.split_at(mid), ("", "\u{e9}"));
    assert_eq!(
        Verifier::default().check("", "\u{e9}"),
        Err(indicator_zkp::Error::EmptyCommitment)
    );
}

#[test]
fn repeated_generation_yields_distinct_pairs() {
    let mut rng = SecureRng::new();
    let generator = Generator::default();
    let mut nonces = HashSet::new();
    let mut commitments = HashSet::new();

    for _ in 0..256 {
        let (nonce, commitment) = generator
            .generate(&mut rng, Secret::new("same secret every time").unwrap())
            .unwrap();
        nonces.insert(nonce.as_str().to_string());
        commitments.insert(commitment);
    }

    // 36^11 possible nonces; allow a single collision at most
    assert!(nonces.len() >= 255);
    assert!(commitments.len() >= 255);
}
