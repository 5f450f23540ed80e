use super::*;
use crate::{
    algorithms::tests::{assert_plays, with_array},
    config::Inputs,
};

#[test]
fn finds_the_same_values_as_std() {
    let values = [1i64, 3, 3, 5, 8, 13, 21];
    for target in -1..=22 {
        let ours = binary_search(&values, target).map(|i| values[i]);
        let expected = values.binary_search(&target).ok().map(|i| values[i]);
        assert_eq!(ours, expected, "target {target}");
    }
    assert_eq!(binary_search(&[], 4), None);
}

#[test]
fn scene_plays_for_hit_and_miss() {
    let scene = scene(&SceneConfig::default()).unwrap();
    assert_plays(&scene);

    let cfg = SceneConfig {
        inputs: Inputs {
            array: Some(vec![1, 2, 4, 8]),
            target: Some(5),
            ..Inputs::default()
        },
        ..SceneConfig::default()
    };
    let missing = super::scene(&cfg).unwrap();
    assert_plays(&missing);
}

#[test]
fn unsorted_input_is_rejected() {
    let err = scene(&with_array(&[3, 1, 2])).unwrap_err();
    assert!(matches!(err, SceneError::InvalidArgument(_)));
}
