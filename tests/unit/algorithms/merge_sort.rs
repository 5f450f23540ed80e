use super::*;
use crate::algorithms::tests::{assert_plays, final_labels, with_array};

#[test]
fn sorts_like_std() {
    for input in [
        vec![38i64, 27, 43, 3, 9, 82, 10, 1],
        vec![],
        vec![4],
        vec![5, -1, 5, 0, -1],
    ] {
        let mut expected = input.clone();
        expected.sort();
        assert_eq!(merge_sort(&input), expected);
    }
}

#[test]
fn final_frame_shows_only_the_sorted_row() {
    let scene = scene(&with_array(&[4, 1, 3, 2, 5])).unwrap();
    assert_plays(&scene);
    let labels = final_labels(&scene);
    // Title, caption, then the row; the temporary merge rows are gone.
    assert_eq!(labels.len(), 7, "{labels:?}");
    assert_eq!(labels[2..].to_vec(), vec!["1", "2", "3", "4", "5"]);
}
