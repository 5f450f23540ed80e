use super::*;
use crate::algorithms::tests::{assert_plays, with_array};

#[test]
fn prefix_table_starts_at_zero() {
    assert_eq!(prefix_sums(&[3, 1, 4, 1, 5]).unwrap(), vec![0, 3, 4, 8, 9, 14]);
    assert_eq!(prefix_sums(&[]).unwrap(), vec![0]);
}

#[test]
fn range_sums_match_direct_sums() {
    let values = [3i64, -1, 4, 1, -5, 9, 2, 6];
    let prefix = prefix_sums(&values).unwrap();
    for lo in 0..=values.len() {
        for hi in lo..=values.len() {
            let direct: i64 = values[lo..hi].iter().sum();
            assert_eq!(range_sum(&prefix, lo, hi), Some(direct));
        }
    }
    assert_eq!(range_sum(&prefix, 3, 2), None);
    assert_eq!(range_sum(&prefix, 0, values.len() + 1), None);
}

#[test]
fn prefixes_outside_i64_are_rejected() {
    let err = prefix_sums(&[i64::MAX, 1]).unwrap_err();
    assert!(matches!(err, SceneError::InvalidArgument(_)));
    assert!(err.to_string().contains("overflows i64"));
    // Large values are fine as long as every prefix fits.
    assert_eq!(
        prefix_sums(&[i64::MAX, -1, 1]).unwrap(),
        vec![0, i64::MAX, i64::MAX - 1, i64::MAX]
    );
    assert_eq!(range_sum(&[i64::MIN, i64::MAX], 0, 1), None);
}

#[test]
fn scene_rejects_overflowing_input() {
    assert!(matches!(
        scene(&with_array(&[i64::MAX, 1])),
        Err(SceneError::InvalidArgument(_))
    ));
    assert!(matches!(
        scene(&with_array(&[i64::MIN, -1])),
        Err(SceneError::InvalidArgument(_))
    ));
}

#[test]
fn scene_plays() {
    assert_plays(&scene(&SceneConfig::default()).unwrap());
    assert_plays(&scene(&with_array(&[7])).unwrap());
}
