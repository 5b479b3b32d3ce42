use indicator_zkp::{
    encode_token, Error, Generator, Nonce, ProofToken, Secret, SecureRng, VerificationPolicy,
    Verifier,
};

fn issue(secret: &str) -> (Nonce, String, String) {
    let mut rng = SecureRng::new();
    let (nonce, commitment) = Generator::default()
        .generate(&mut rng, Secret::new(secret).expect("secret is non-blank"))
        .expect("generation should succeed");
    let proof = encode_token(&commitment, &nonce).to_string();
    (nonce, commitment.to_string(), proof)
}

#[test]
fn reject_proof_replayed_against_other_commitment() {
    let (_, commitment_a, proof_a) = issue("185.220.101.1");
    let (_, commitment_b, proof_b) = issue("185.220.101.2");

    let verifier = Verifier::new(VerificationPolicy::Bound);
    assert!(verifier.verify(&commitment_a, &proof_a));
    assert!(verifier.verify(&commitment_b, &proof_b));

    assert_eq!(
        verifier.check(&commitment_a, &proof_b),
        Err(Error::CommitmentMismatch),
        "Proof issued for another commitment must not verify"
    );
    assert_eq!(
        verifier.check(&commitment_b, &proof_a),
        Err(Error::CommitmentMismatch)
    );
}

#[test]
fn reject_proof_with_tampered_commitment() {
    let (_, commitment, proof) = issue("d41d8cd98f00b204e9800998ecf8427e");

    let mut bytes = proof.clone().into_bytes();
    let idx = "zkp_".len() + 5;
    bytes[idx] = if bytes[idx] == b'0' { b'1' } else { b'0' };
    let tampered = String::from_utf8(bytes).unwrap();

    assert_eq!(
        Verifier::default().check(&commitment, &tampered),
        Err(Error::CommitmentMismatch),
        "Tampered proof should fail verification"
    );
}

#[test]
fn reject_truncated_and_extended_commitments() {
    let (_, commitment, proof) = issue("phish.example.com");
    let verifier = Verifier::default();

    let truncated = &commitment[..commitment.len() - 1];
    assert_eq!(verifier.check(truncated, &proof), Err(Error::CommitmentMismatch));

    let extended = format!("{commitment}0");
    assert_eq!(verifier.check(&extended, &proof), Err(Error::CommitmentMismatch));
}

#[test]
fn reject_malformed_tokens() {
    let verifier = Verifier::default();
    for bad in [
        "zkp",
        "ZKP_abc_1234",
        "zkp_abc-1234",
        "zkp_abc_12345",
        "zkp_abc_12!4",
        "zkp_ABC_1234",
    ] {
        assert!(
            matches!(verifier.check("abc", bad), Err(Error::MalformedProof(_))),
            "{bad} should be rejected as malformed"
        );
    }
}

#[test]
fn whitespace_around_inputs_is_ignored() {
    let (_, commitment, proof) = issue("203.0.113.50");
    let verifier = Verifier::default();
    assert!(verifier.verify(&format!("  {commitment}\n"), &format!("\t{proof} ")));
}

#[test]
fn opening_requires_exact_secret_and_nonce() {
    let (nonce, commitment, proof) = issue("ransom.example.org");
    let verifier = Verifier::default();

    assert!(verifier
        .open(&commitment, Secret::new("ransom.example.org").unwrap(), nonce.as_str())
        .is_ok());

    assert_eq!(
        verifier.open(&commitment, Secret::new("ransom.example.org ").unwrap(), nonce.as_str()),
        Err(Error::OpeningMismatch),
        "Secrets are committed byte for byte"
    );

    let other_nonce = if nonce.as_str().starts_with('a') {
        format!("b{}", &nonce.as_str()[1..])
    } else {
        format!("a{}", &nonce.as_str()[1..])
    };
    assert_eq!(
        verifier.open(&commitment, Secret::new("ransom.example.org").unwrap(), &other_nonce),
        Err(Error::OpeningMismatch)
    );

    assert!(verifier
        .open_proof(&proof, Secret::new("ransom.example.org").unwrap(), nonce.as_str())
        .is_ok());
}

#[test]
fn proof_token_does_not_reveal_full_nonce() {
    let (nonce, commitment, proof) = issue("c2.example.net");
    let token = ProofToken::parse(&proof).unwrap();

    assert_eq!(token.commitment().as_str(), commitment);
    assert_eq!(token.fragment(), nonce.prefix());
    assert!(nonce.as_str().len() > token.fragment().len());
    assert!(!proof.contains(nonce.as_str()));
}

#[test]
fn debug_output_redacts_secret_and_nonce() {
    let secret = Secret::new("top-secret-indicator").unwrap();
    assert!(!format!("{secret:?}").contains("top-secret-indicator"));

    let nonce = Nonce::new("k2j9x8q7w6e5").unwrap();
    let debug = format!("{nonce:?}");
    assert!(debug.contains("k2j9"));
    assert!(!debug.contains("x8q7w6e5"));
}
