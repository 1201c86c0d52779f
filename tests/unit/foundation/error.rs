use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CueframeError::structural("x")
            .to_string()
            .contains("structural error:")
    );
    assert!(
        CueframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CueframeError::schedule("x")
            .to_string()
            .contains("schedule error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CueframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
