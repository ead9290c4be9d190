use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::invalid_config("x")
            .to_string()
            .contains("invalid config:")
    );
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn timeline_mismatch_reports_both_lengths() {
    let err = ReelError::TimelineMismatch {
        declared: 1200,
        computed: 1040,
    };
    let msg = err.to_string();
    assert!(msg.starts_with("timeline mismatch:"));
    assert!(msg.contains("1200"));
    assert!(msg.contains("1040"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
