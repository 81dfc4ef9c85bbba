use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlidecastError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SlidecastError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        SlidecastError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = SlidecastError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
