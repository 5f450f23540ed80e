use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

#[test]
fn config_validation_catches_bad_values() {
    let ok = EncodeConfig::mp4("target/out.mp4", 10, 10, fps30());
    ok.validate().unwrap();

    assert!(
        EncodeConfig {
            width: 0,
            ..ok.clone()
        }
        .validate()
        .is_err()
    );
    assert!(
        EncodeConfig {
            width: 11,
            ..ok.clone()
        }
        .validate()
        .is_err()
    );
    assert!(EncodeConfig { crf: 52, ..ok }.validate().is_err());
}

#[test]
fn flatten_premul_over_black_produces_expected_rgb() {
    // Premultiplied red at 50% alpha.
    let src = vec![128u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, Rgba8::rgb(0, 0, 0)).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_straight_over_white() {
    let src = vec![0u8, 0, 0, 0, 10, 20, 30, 255];
    let mut dst = vec![0u8; 8];
    flatten_to_opaque_rgba8(&mut dst, &src, false, Rgba8::WHITE).unwrap();
    assert_eq!(dst, vec![255, 255, 255, 255, 10, 20, 30, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, Rgba8::WHITE).is_err());
}

#[test]
fn ensure_parent_dir_accepts_bare_file_names() {
    ensure_parent_dir(Path::new("out.mp4")).unwrap();
    ensure_parent_dir(Path::new("target/unit_encode/nested/out.mp4")).unwrap();
    assert!(Path::new("target/unit_encode/nested").is_dir());
}
