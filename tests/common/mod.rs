//! Common test utilities shared across integration tests.

/// Initialize test tracing (call once at the beginning of tests).
///
/// Sets up tracing with DEBUG output from this crate to the test writer.
/// Subsequent calls are safe and will be ignored.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("indicator_zkp=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Returns true if `s` is non-empty lowercase hex.
#[allow(dead_code)]
pub fn is_lower_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
}

/// Returns true if `s` has the shape `zkp_<hex>_<4 chars>`.
#[allow(dead_code)]
pub fn is_proof_shaped(s: &str) -> bool {
    let Some(body) = s.strip_prefix("zkp_") else {
        return false;
    };
    let Some((commitment, fragment)) = body.split_once('_') else {
        return false;
    };
    is_lower_hex(commitment) && fragment.chars().count() == 4
}
