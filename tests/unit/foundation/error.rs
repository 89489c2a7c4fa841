use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OverlayError::invalid_format("x")
            .to_string()
            .contains("invalid format:")
    );
    assert!(
        OverlayError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(OverlayError::font("x").to_string().contains("font error:"));
    assert!(
        OverlayError::unsupported_format("tiff")
            .to_string()
            .contains("unsupported output format: tiff")
    );
}

#[test]
fn overlay_selection_errors_are_config_errors() {
    assert!(OverlayError::ConflictingOverlay.is_config());
    assert!(OverlayError::MissingOverlay.is_config());
    assert!(
        OverlayError::ConflictingOverlay
            .to_string()
            .starts_with("configuration error:")
    );
    assert!(!OverlayError::font("x").is_config());
}

#[test]
fn oversize_reports_both_sizes() {
    let err = OverlayError::OverlayTooLarge {
        overlay_width: 30,
        overlay_height: 10,
        underlay_width: 20,
        underlay_height: 20,
    };
    let msg = err.to_string();
    assert!(msg.contains("30x10"));
    assert!(msg.contains("20x20"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OverlayError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_config());
}
