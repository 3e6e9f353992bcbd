use super::*;
use crate::foundation::core::SlotSide;

#[test]
fn parses_host_attribute_json() {
    let cfg = RenderConfig::from_json_str(
        r#"{"radius": 40.0, "leftImageUrl": "a/left.png", "rightImageUrl": "a/right.png", "imageLibrary": 1}"#,
    )
    .unwrap();
    assert_eq!(cfg.radius, 40.0);
    assert_eq!(cfg.left_url.as_deref(), Some("a/left.png"));
    assert_eq!(cfg.right_url.as_deref(), Some("a/right.png"));
    assert_eq!(cfg.backend, BackendKind::Drawable);
}

#[test]
fn urls_and_backend_default_when_absent() {
    let cfg = RenderConfig::from_json_str(r#"{"radius": 12.5}"#).unwrap();
    assert_eq!(cfg.left_url, None);
    assert_eq!(cfg.right_url, None);
    assert_eq!(cfg.backend, BackendKind::Direct);
}

#[test]
fn backend_serializes_as_integer_tag() {
    let json = serde_json::to_string(&BackendKind::Drawable).unwrap();
    assert_eq!(json, "1");
    let json = serde_json::to_string(&BackendKind::Direct).unwrap();
    assert_eq!(json, "0");
}

#[test]
fn unknown_backend_tag_is_rejected() {
    let err = RenderConfig::from_json_str(r#"{"radius": 1.0, "imageLibrary": 2}"#);
    assert!(err.is_err());
}

#[test]
fn url_for_maps_slots() {
    let cfg = RenderConfig {
        radius: 10.0,
        left_url: Some("l".to_string()),
        right_url: None,
        backend: BackendKind::Direct,
    };
    assert_eq!(cfg.url_for(SlotSide::Left), Some("l"));
    assert_eq!(cfg.url_for(SlotSide::Right), None);
}

#[test]
fn non_positive_radius_is_accepted() {
    // Degenerate geometry renders nothing; it is never a config error.
    let cfg = RenderConfig::from_json_str(r#"{"radius": 0.0}"#).unwrap();
    assert_eq!(cfg.radius, 0.0);
    let cfg = RenderConfig::from_json_str(r#"{"radius": -3.0}"#).unwrap();
    assert_eq!(cfg.radius, -3.0);
}
