use super::*;
use crate::algorithms::tests::{assert_plays, final_labels, with_array};

#[test]
fn sorts_like_std() {
    for input in [
        vec![12i64, 11, 13, 5, 6, 3],
        vec![],
        vec![1],
        vec![2, 2, 1, 1],
        vec![-5, 10, -20, 0],
    ] {
        let mut ours = input.clone();
        insertion_sort(&mut ours);
        let mut expected = input;
        expected.sort();
        assert_eq!(ours, expected);
    }
}

#[test]
fn final_frame_shows_the_sorted_row_without_holes() {
    let scene = scene(&with_array(&[3, 1, 2])).unwrap();
    assert_plays(&scene);
    let labels = final_labels(&scene);
    assert_eq!(labels[labels.len() - 3..].to_vec(), vec!["1", "2", "3"]);
    assert!(labels.iter().all(|l| !l.is_empty()), "{labels:?}");
}

#[test]
fn single_element_builds() {
    assert_plays(&scene(&with_array(&[42])).unwrap());
}
