use super::*;

fn nowhere() -> FontCandidates {
    FontCandidates {
        regular: vec![PathBuf::from("/definitely/missing/regular.ttf")],
        bold: vec![PathBuf::from("/definitely/missing/bold.ttf")],
        system_fallback: false,
    }
}

#[test]
fn missing_candidates_fall_back_to_builtin() {
    let book = FontBook::load(&nowhere());
    assert_eq!(
        book.resolve(42.0, FontWeight::Bold),
        ResolvedFont::Builtin { size_px: 42.0 }
    );
    assert_eq!(book.fontdb().len(), 0);
}

#[test]
fn non_font_file_is_skipped() {
    let dir = std::path::PathBuf::from("target").join("font_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let bogus = dir.join("not_a_font.ttf");
    std::fs::write(&bogus, b"definitely not a font").unwrap();

    let book = FontBook::load(&FontCandidates {
        regular: vec![bogus],
        bold: vec![],
        system_fallback: false,
    });
    assert!(matches!(
        book.resolve(20.0, FontWeight::Regular),
        ResolvedFont::Builtin { .. }
    ));
}

#[test]
fn builtin_only_resolves_every_weight() {
    let book = FontBook::builtin_only();
    for w in [FontWeight::Regular, FontWeight::Bold] {
        assert_eq!(book.resolve(10.0, w).size_px(), 10.0);
        assert!(book.family(w).is_none());
    }
}

#[test]
fn bold_falls_back_to_regular_family() {
    let book = FontBook {
        db: Arc::new(fontdb::Database::new()),
        regular: Some("Test Sans".to_string()),
        bold: None,
    };
    assert_eq!(
        book.resolve(30.0, FontWeight::Bold),
        ResolvedFont::Face {
            family: "Test Sans".to_string(),
            weight: FontWeight::Bold,
            size_px: 30.0,
        }
    );
}

#[test]
fn default_candidates_cover_both_weights() {
    let c = FontCandidates::default();
    assert!(!c.regular.is_empty());
    assert!(!c.bold.is_empty());
    assert!(c.system_fallback);
}
