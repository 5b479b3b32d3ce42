#![no_main]

use indicator_zkp::{ProofToken, Verifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(token) = ProofToken::parse(text) {
        // canonical form must survive a second parse
        let reparsed = ProofToken::parse(&token.to_string()).expect("canonical token parses");
        assert_eq!(reparsed, token);
        assert!(Verifier::default().verify(token.commitment().as_str(), text));
    }

    let mid = text
        .char_indices()
        .nth(text.chars().count() / 2)
        .map_or(text.len(), |(i, _)| i);
    let (commitment, proof) = text.split_at(mid);
    let _ = Verifier::default().check(commitment, proof);
});
