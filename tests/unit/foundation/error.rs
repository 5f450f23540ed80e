use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SceneError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        SceneError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SceneError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        SceneError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn out_of_range_reports_index_and_len() {
    let msg = SceneError::out_of_range(9, 4).to_string();
    assert!(msg.contains('9'));
    assert!(msg.contains("len 4"));
}

#[test]
fn check_index_accepts_only_in_bounds() {
    assert!(check_index(0, 1).is_ok());
    assert!(matches!(
        check_index(1, 1),
        Err(SceneError::IndexOutOfRange { index: 1, len: 1 })
    ));
    assert!(check_index(0, 0).is_err());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SceneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn serde_json_errors_convert() {
    let err: SceneError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, SceneError::Serde(_)));
}
