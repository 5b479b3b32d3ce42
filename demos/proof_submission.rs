//! Submitting a threat indicator by proof.
//!
//! This example demonstrates:
//! - A contributor generating a commitment and proof in a workflow session
//! - A collector gating submissions on proof verification
//! - A proof copied next to the wrong commitment being refused
//! - A resubmission while an operation is in flight being turned away

use indicator_zkp::{
    Error, IndicatorKind, LatencySettings, Mode, ProofSession, ProofSubmission, Severity,
    SubmissionGate, ZkpConfig,
};

#[tokio::main]
async fn main() {
    println!("Indicator Submission by Proof\n");

    let config = ZkpConfig {
        latency: LatencySettings {
            generate_ms: 300,
            verify_ms: 200,
            submit_ms: 200,
        },
        ..ZkpConfig::default()
    };

    let session = ProofSession::new(&config).expect("default configuration is valid");
    let gate = SubmissionGate::from_config(&config).expect("default configuration is valid");

    println!("Contributor: generating proofs for two indicators");
    let domain = session
        .generate("login-verify.example.net")
        .await
        .expect("Generation should succeed");
    let address = session
        .generate("192.0.2.44")
        .await
        .expect("Generation should succeed");
    println!("  domain  -> {}", domain.proof);
    println!("  address -> {}\n", address.proof);

    println!("Contributor: submitting the domain by proof");
    let submission = ProofSubmission {
        commitment: domain.commitment.clone(),
        proof: domain.proof.clone(),
        kind: IndicatorKind::Domain,
        severity: Severity::High,
        tags: "phishing, credential-harvest".to_string(),
        source: Some("mail gateway".to_string()),
    };
    match gate.submit(submission).await {
        Ok(receipt) => println!(
            "  Collector: accepted {} ({} / {}), tags: {}\n",
            receipt.id,
            receipt.kind,
            receipt.severity,
            receipt.tags.join(", ")
        ),
        Err(e) => println!("  Collector: refused: {e}\n"),
    }

    println!("Contributor: pasting the address proof next to the domain commitment");
    let crossed = ProofSubmission {
        commitment: domain.commitment.clone(),
        proof: address.proof.clone(),
        kind: IndicatorKind::Ip,
        ..ProofSubmission::default()
    };
    match gate.submit(crossed).await {
        Ok(_) => println!("  Collector: unexpectedly accepted\n"),
        Err(e) => println!("  Collector: refused: {e}\n"),
    }

    println!("Contributor: double-clicking generate");
    let (first, second) = tokio::join!(session.generate("198.51.100.9"), async {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        session.generate("198.51.100.9").await
    });
    println!("  first click:  {}", if first.is_ok() { "generated" } else { "failed" });
    match second {
        Err(Error::Busy(Mode::Generate)) => println!("  second click: ignored, already in progress"),
        other => println!("  second click: {other:?}"),
    }
}
