use super::*;

fn red() -> CellStyle {
    CellStyle::outline(Rgba8::rgb(255, 0, 0), 4.0)
}

#[test]
fn uniform_resolves_to_len_copies() {
    let styles = StyleSpec::Uniform(red()).resolve(3).unwrap();
    assert_eq!(styles, vec![red(); 3]);
    assert!(StyleSpec::Uniform(red()).resolve(0).unwrap().is_empty());
}

#[test]
fn per_index_length_mismatch_is_rejected() {
    let err = StyleSpec::PerIndex(vec![red(), red()])
        .resolve(3)
        .unwrap_err();
    assert!(matches!(err, SceneError::InvalidArgument(_)));

    let ok = StyleSpec::PerIndex(vec![red(), CellStyle::default()])
        .resolve(2)
        .unwrap();
    assert_eq!(ok[1], CellStyle::default());
}

#[test]
fn negative_stroke_width_is_rejected() {
    let bad = CellStyle::outline(Rgba8::WHITE, -1.0);
    assert!(StyleSpec::Uniform(bad).resolve(1).is_err());
    let nan = CellStyle::outline(Rgba8::WHITE, f64::NAN);
    assert!(nan.validate().is_err());
}

#[test]
fn default_style_for_new_slots() {
    assert_eq!(StyleSpec::Uniform(red()).default_style(), red());
    assert_eq!(
        StyleSpec::PerIndex(vec![red(), CellStyle::default()]).default_style(),
        red()
    );
    assert_eq!(
        StyleSpec::PerIndex(Vec::new()).default_style(),
        CellStyle::default()
    );
}

#[test]
fn lerp_blends_stroke_and_width() {
    let a = CellStyle::outline(Rgba8::rgb(0, 0, 0), 2.0);
    let b = CellStyle::outline(Rgba8::rgb(200, 0, 0), 6.0).with_fill(Rgba8::rgb(0, 0, 200));
    let mid = a.lerp(&b, 0.5);
    assert_eq!(mid.stroke, Rgba8::rgb(100, 0, 0));
    assert_eq!(mid.stroke_width, 4.0);
    assert_eq!(mid.fill, Rgba8::rgba(0, 0, 100, 128));
    assert_eq!(a.lerp(&b, 1.0), b);
}
