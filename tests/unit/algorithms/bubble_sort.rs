use super::*;
use crate::algorithms::tests::{assert_plays, final_labels, with_array};

#[test]
fn sorts_like_std() {
    for input in [
        vec![5i64, 1, 4, 2, 8],
        vec![],
        vec![7],
        vec![3, 3, -1, 0, 3],
        vec![1, 2, 3, 4],
    ] {
        let mut ours = input.clone();
        bubble_sort(&mut ours);
        let mut expected = input;
        expected.sort();
        assert_eq!(ours, expected);
    }
}

#[test]
fn final_frame_shows_the_sorted_row() {
    let scene = scene(&with_array(&[4, 3, 1, 2])).unwrap();
    assert_plays(&scene);
    let labels = final_labels(&scene);
    // Title and caption sit above the row.
    assert_eq!(labels[labels.len() - 4..].to_vec(), vec!["1", "2", "3", "4"]);
}

#[test]
fn already_sorted_input_stops_after_one_pass() {
    let sorted = scene(&with_array(&[1, 2, 3, 4, 5])).unwrap();
    let reversed = scene(&with_array(&[5, 4, 3, 2, 1])).unwrap();
    assert!(sorted.duration() < reversed.duration());
}
