use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayerframeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LayerframeError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        LayerframeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn render_errors_carry_layer_and_frame() {
    let err = LayerframeError::render_frame("layer_0_1", 7, "surface crashed");
    let msg = err.to_string();
    assert!(msg.contains("layer_0_1"));
    assert!(msg.contains("frame 7"));
    assert!(msg.contains("surface crashed"));
    assert_eq!(err.layer_id(), Some("layer_0_1"));

    let err = LayerframeError::render("logo", "timeout");
    assert!(!err.to_string().contains("frame"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayerframeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.layer_id(), None);
}
