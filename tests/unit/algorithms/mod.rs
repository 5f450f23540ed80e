use super::*;
use crate::{
    config::Inputs,
    eval::evaluator::{Drawable, Evaluator},
    foundation::core::FrameIndex,
};

/// Build checks shared by the per-algorithm tests: the scene has frames and its first, middle and
/// last frames evaluate.
pub(crate) fn assert_plays(scene: &Scene) {
    assert!(scene.duration() > 0);
    let eval = Evaluator::new(scene).unwrap();
    let last = eval.duration() - 1;
    for f in [0, last / 2, last] {
        let frame = eval.eval_frame(FrameIndex(f)).unwrap();
        assert!(!frame.nodes.is_empty(), "frame {f} is empty");
    }
}

/// Labels visible on the final frame, left to right.
pub(crate) fn final_labels(scene: &Scene) -> Vec<String> {
    let eval = Evaluator::new(scene).unwrap();
    let frame = eval.eval_frame(FrameIndex(eval.duration() - 1)).unwrap();
    let mut labels: Vec<(f64, f64, String)> = frame
        .nodes
        .iter()
        .filter_map(|n| match &n.draw {
            Drawable::Text { text, .. } if n.opacity > 0.99 => {
                Some((n.center.y, n.center.x, text.clone()))
            }
            _ => None,
        })
        .collect();
    labels.sort_by(|a, b| a.partial_cmp(b).unwrap());
    labels.into_iter().map(|(_, _, t)| t).collect()
}

pub(crate) fn with_array(values: &[i64]) -> SceneConfig {
    SceneConfig {
        inputs: Inputs {
            array: Some(values.to_vec()),
            ..Inputs::default()
        },
        ..SceneConfig::default()
    }
}

#[test]
fn every_algorithm_builds_and_plays_with_defaults() {
    let cfg = SceneConfig::default();
    for algo in Algorithm::ALL {
        let scene = algo.build(&cfg).unwrap();
        assert_eq!(scene.name, algo.name());
        assert_eq!(scene.title, algo.title());
        assert_plays(&scene);
    }
}

#[test]
fn names_round_trip_through_from_str() {
    for algo in Algorithm::ALL {
        assert_eq!(algo.name().parse::<Algorithm>().unwrap(), algo);
        assert_eq!(algo.to_string(), algo.name());
    }
    assert_eq!(
        "Merge_Sort".parse::<Algorithm>().unwrap(),
        Algorithm::MergeSort
    );
    let err = "quick-sort".parse::<Algorithm>().unwrap_err();
    assert!(matches!(err, SceneError::InvalidArgument(_)));
    assert!(err.to_string().contains("binary-search"));
}

#[test]
fn build_rejects_invalid_config() {
    let mut cfg = SceneConfig::default();
    cfg.timing.step_secs = 0.0;
    assert!(matches!(
        Algorithm::BubbleSort.build(&cfg),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn empty_input_array_is_rejected() {
    let err = input_array(&with_array(&[]), &[1, 2]).unwrap_err();
    assert!(matches!(err, SceneError::InvalidArgument(_)));
    assert_eq!(input_array(&SceneConfig::default(), &[1, 2]).unwrap(), vec![1, 2]);
}

#[test]
fn fitted_shrinks_long_rows_to_the_canvas() {
    let cfg = SceneConfig::default();
    assert_eq!(fitted(&cfg, 5, 1), cfg);

    let small = fitted(&cfg, 40, 1);
    let width = small.geometry.row_width(40);
    assert!(width <= f64::from(cfg.canvas.width) * 0.92 + 1e-6);
    assert!(small.geometry.width < cfg.geometry.width);
    assert!(small.label_size_px < cfg.label_size_px);
}

#[test]
fn long_inputs_still_build() {
    let values: Vec<i64> = (0..30).rev().collect();
    let scene = Algorithm::InsertionSort.build(&with_array(&values)).unwrap();
    assert_plays(&scene);
}
