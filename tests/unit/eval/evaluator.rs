use super::*;
use crate::{animation::ease::Ease, foundation::core::Rgba8};

fn step(ops: Vec<VisualOp>, duration: u64) -> Step {
    Step {
        ops,
        duration,
        ease: Ease::Linear,
    }
}

fn scene(steps: Vec<Step>) -> Scene {
    Scene {
        name: "eval".into(),
        title: "Eval".into(),
        fps: Fps::new(30, 1).unwrap(),
        canvas: Canvas {
            width: 200,
            height: 100,
        },
        background: Rgba8::rgb(0, 0, 0),
        steps,
    }
}

fn cell(id: u64, x: f64) -> VisualOp {
    VisualOp::create_rect(
        NodeId(id),
        Point::new(x, 50.0),
        Size::new(20.0, 20.0),
        CellStyle::default(),
    )
}

fn label(id: u64, x: f64, text: &str) -> VisualOp {
    VisualOp::create_text(NodeId(id), Point::new(x, 50.0), text, 12.0, Rgba8::WHITE)
}

fn node(frame: &EvaluatedFrame, id: u64) -> &EvaluatedNode {
    frame
        .nodes
        .iter()
        .find(|n| n.id == NodeId(id))
        .unwrap_or_else(|| panic!("node {id} not visible at frame {}", frame.frame.0))
}

#[test]
fn create_fades_in_and_completes_on_last_frame() {
    let ev = Evaluator::new(&scene(vec![step(vec![cell(0, 10.0)], 4)])).unwrap();
    let first = ev.eval_frame(FrameIndex(0)).unwrap();
    assert_eq!(node(&first, 0).opacity, 0.25);
    let last = ev.eval_frame(FrameIndex(3)).unwrap();
    assert_eq!(node(&last, 0).opacity, 1.0);
}

#[test]
fn move_interpolates_between_step_boundaries() {
    let ev = Evaluator::new(&scene(vec![
        step(vec![cell(0, 10.0)], 1),
        step(
            vec![VisualOp::MoveTo {
                id: NodeId(0),
                center: Point::new(110.0, 50.0),
            }],
            4,
        ),
    ]))
    .unwrap();
    assert_eq!(node(&ev.eval_frame(FrameIndex(0)).unwrap(), 0).center.x, 10.0);
    assert_eq!(node(&ev.eval_frame(FrameIndex(2)).unwrap(), 0).center.x, 60.0);
    assert_eq!(node(&ev.eval_frame(FrameIndex(4)).unwrap(), 0).center.x, 110.0);
}

#[test]
fn removed_nodes_fade_out_then_vanish() {
    let ev = Evaluator::new(&scene(vec![
        step(vec![cell(0, 10.0)], 1),
        step(vec![VisualOp::Remove { id: NodeId(0) }], 2),
        step(vec![], 1),
    ]))
    .unwrap();
    assert_eq!(node(&ev.eval_frame(FrameIndex(1)).unwrap(), 0).opacity, 0.5);
    assert!(ev.eval_frame(FrameIndex(2)).unwrap().nodes.is_empty());
    assert!(ev.eval_frame(FrameIndex(3)).unwrap().nodes.is_empty());
}

#[test]
fn set_text_swaps_content_halfway() {
    let ev = Evaluator::new(&scene(vec![
        step(vec![label(0, 10.0, "old")], 1),
        step(
            vec![VisualOp::SetText {
                id: NodeId(0),
                text: "new".into(),
            }],
            4,
        ),
    ]))
    .unwrap();
    let text_at = |f: u64| match &node(&ev.eval_frame(FrameIndex(f)).unwrap(), 0).draw {
        Drawable::Text { text, .. } => text.clone(),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(text_at(1), "old");
    assert_eq!(text_at(4), "new");
    // p = 0.5 exactly: the swap frame is fully transparent.
    assert!(
        ev.eval_frame(FrameIndex(2))
            .unwrap()
            .nodes
            .iter()
            .all(|n| n.id != NodeId(0))
    );
}

#[test]
fn restyle_and_recolor_blend() {
    let hot = CellStyle::outline(Rgba8::rgb(255, 255, 0), 5.0);
    let ev = Evaluator::new(&scene(vec![
        step(vec![cell(0, 10.0), label(1, 10.0, "7")], 1),
        step(
            vec![
                VisualOp::Restyle {
                    id: NodeId(0),
                    style: hot,
                },
                VisualOp::Recolor {
                    id: NodeId(1),
                    color: Rgba8::rgb(0, 0, 0),
                },
            ],
            2,
        ),
    ]))
    .unwrap();
    let mid = ev.eval_frame(FrameIndex(1)).unwrap();
    let Drawable::Rect { style, .. } = &node(&mid, 0).draw else {
        panic!("expected rect");
    };
    assert_eq!(style.stroke_width, 4.0);
    let Drawable::Text { color, .. } = &node(&mid, 1).draw else {
        panic!("expected text");
    };
    assert_eq!(*color, Rgba8::rgb(128, 128, 128));

    let end = ev.eval_frame(FrameIndex(2)).unwrap();
    let Drawable::Rect { style, .. } = &node(&end, 0).draw else {
        panic!("expected rect");
    };
    assert_eq!(*style, hot);
}

#[test]
fn rects_paint_before_text() {
    let ev = Evaluator::new(&scene(vec![step(
        vec![label(0, 10.0, "a"), cell(1, 10.0), cell(2, 40.0)],
        1,
    )]))
    .unwrap();
    let frame = ev.eval_frame(FrameIndex(0)).unwrap();
    let ids: Vec<u64> = frame.nodes.iter().map(|n| n.id.0).collect();
    assert_eq!(ids, vec![1, 2, 0]);
}

#[test]
fn out_of_bounds_and_invalid_scenes_are_errors() {
    let ev = Evaluator::new(&scene(vec![step(vec![cell(0, 10.0)], 2)])).unwrap();
    assert_eq!(ev.duration(), 2);
    assert!(matches!(
        ev.eval_frame(FrameIndex(2)),
        Err(SceneError::Evaluation(_))
    ));
    assert!(Evaluator::new(&scene(vec![])).is_err());
}

#[test]
fn step_at_maps_frames_to_steps() {
    let ev = Evaluator::new(&scene(vec![
        step(vec![cell(0, 10.0)], 3),
        step(vec![], 2),
    ]))
    .unwrap();
    let steps: Vec<usize> = (0..5)
        .map(|f| ev.step_at(FrameIndex(f)).unwrap())
        .collect();
    assert_eq!(steps, vec![0, 0, 0, 1, 1]);
}
