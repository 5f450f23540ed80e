use super::*;

#[test]
fn missing_font_file_is_an_error() {
    let err = FontSource::from_file(Path::new("target/no/such/font.ttf")).unwrap_err();
    assert!(err.to_string().contains("font.ttf"));
}

#[test]
fn garbage_font_bytes_register_no_family() {
    let font = FontSource {
        bytes: Arc::new(b"not a font".to_vec()),
        index: 0,
        origin: "garbage".into(),
    };
    assert!(TextLayoutEngine::new(&font).is_err());
}

#[test]
fn cli_font_overrides_config_font() {
    let cfg = PathBuf::from("cfg.ttf");
    assert_eq!(
        pick_font_path(Some(PathBuf::from("cli.ttf")), Some(&cfg)),
        Some(PathBuf::from("cli.ttf"))
    );
    assert_eq!(pick_font_path(None, Some(&cfg)), Some(cfg));
    assert_eq!(pick_font_path(None, None), None);
}

#[test]
fn shaping_is_cached_when_a_system_font_exists() {
    // Font-less CI images have nothing to shape with.
    let Ok(font) = FontSource::system_sans() else {
        return;
    };
    let mut engine = TextLayoutEngine::new(&font).unwrap();
    let a = engine.shape("42", 24.0).unwrap();
    let b = engine.shape("42", 24.0).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(a.width > 0.0);
    engine.shape("42", 12.0).unwrap();
    assert_eq!(engine.cached(), 2);
    assert!(engine.shape("x", 0.0).is_err());
}

#[test]
fn collection_face_picks_its_own_family() {
    let families = || vec![("Regular", vec![0, 2]), ("Mono", vec![1]), ("Serif", vec![3])];
    assert_eq!(family_for_face(families(), 1), Some("Mono"));
    assert_eq!(family_for_face(families(), 2), Some("Regular"));
    assert_eq!(family_for_face(families(), 3), Some("Serif"));
    // Unknown faces fall back to the first family.
    assert_eq!(family_for_face(families(), 9), Some("Regular"));
    assert_eq!(family_for_face(Vec::<(u8, Vec<u32>)>::new(), 0), None);
}
