use super::*;

#[test]
fn defaults_validate() {
    RenderConfig::default().validate().unwrap();
}

#[test]
fn odd_resolution_is_rejected() {
    let mut cfg = RenderConfig::default();
    cfg.resolution = Resolution {
        width: 1281,
        height: 720,
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn zero_wrap_width_is_rejected() {
    let mut cfg = RenderConfig::default();
    cfg.layout.wrap_chars = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn bullets_must_start_above_bottom_margin() {
    let mut cfg = RenderConfig::default();
    cfg.layout.bullets_top = 600.0;
    assert!(cfg.validate().is_err());
    assert_eq!(RenderConfig::default().bullets_bottom(), 560.0);
}

#[test]
fn keyword_url_substitutes_placeholders() {
    let f = FetchConfig::default();
    assert_eq!(
        f.keyword_url(Resolution::HD_720, "storm,coast"),
        "https://loremflickr.com/1280/720/storm,coast"
    );
}

#[test]
fn partial_json_override_keeps_other_defaults() {
    let cfg: RenderConfig =
        serde_json::from_str(r#"{ "layout": { "wrap_chars": 30 }, "fetch": { "timeout_secs": 3 } }"#)
            .unwrap();
    assert_eq!(cfg.layout.wrap_chars, 30);
    assert_eq!(cfg.layout.max_lines_per_bullet, 2);
    assert_eq!(cfg.fetch.timeout_secs, 3);
    assert_eq!(cfg.resolution, Resolution::HD_720);
}

#[test]
fn wrap_width_widens_without_illustration() {
    let l = TextLayout::default();
    assert_eq!(l.wrap_width(true), 44);
    assert!(l.wrap_width(false) > l.wrap_width(true));
}
