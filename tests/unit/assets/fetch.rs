use super::*;

fn unreachable_cfg() -> FetchConfig {
    FetchConfig {
        timeout_secs: 2,
        // Port 9 (discard) is closed on test hosts, so the connection is refused immediately.
        keyword_url_template: "http://127.0.0.1:9/{width}/{height}/{query}".to_string(),
        ..FetchConfig::default()
    }
}

#[test]
fn sanitize_strips_symbols_and_joins_words() {
    assert_eq!(
        sanitize_query("Storm hits coast! (live)", ",", "news"),
        "Storm,hits,coast,live"
    );
    assert_eq!(
        sanitize_query("  COVID-19   update ", ",", "news"),
        "COVID-19,update"
    );
}

#[test]
fn sanitize_empty_uses_default() {
    assert_eq!(sanitize_query("?!…", ",", "news"), "news");
    assert_eq!(sanitize_query("", "+", "world"), "world");
}

#[test]
fn malformed_url_yields_none() {
    let src = HttpImageSource::new(&unreachable_cfg(), Resolution::HD_720).unwrap();
    assert!(src.fetch_by_url("not a url at all").is_none());
    assert!(src.fetch_by_url("").is_none());
}

#[test]
fn unreachable_host_yields_none_for_url() {
    let src = HttpImageSource::new(&unreachable_cfg(), Resolution::HD_720).unwrap();
    assert!(src.fetch_by_url("http://127.0.0.1:9/og.jpg").is_none());
}

#[test]
fn unreachable_keyword_source_yields_fallback_of_target_size() {
    let src = HttpImageSource::new(&unreachable_cfg(), Resolution::HD_720).unwrap();
    let img = src.fetch_by_keyword("storm coast");
    assert_eq!(img.dimensions(), (1280, 720));
    assert_eq!(img.get_pixel(640, 360).0, [12, 12, 12, 255]);
}

#[test]
fn offline_source_is_deterministic() {
    let src = OfflineImageSource::new(Resolution::new(8, 6).unwrap(), Rgba8::rgb(1, 2, 3));
    assert!(src.fetch_by_url("https://example.com/a.jpg").is_none());
    let a = src.fetch_by_keyword("x");
    let b = src.fetch_by_keyword("y");
    assert_eq!(a, b);
    assert_eq!(a.dimensions(), (8, 6));
}

#[test]
fn zero_timeout_config_is_rejected() {
    let cfg = FetchConfig {
        timeout_secs: 0,
        ..FetchConfig::default()
    };
    assert!(HttpImageSource::new(&cfg, Resolution::HD_720).is_err());
}
