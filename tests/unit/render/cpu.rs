use super::*;
use crate::{
    foundation::core::{Canvas, FrameIndex},
    scene::node::NodeId,
};

fn frame(nodes: Vec<EvaluatedNode>) -> EvaluatedFrame {
    EvaluatedFrame {
        frame: FrameIndex(0),
        canvas: Canvas {
            width: 40,
            height: 20,
        },
        background: Rgba8::rgb(10, 20, 30),
        nodes,
    }
}

fn filled(opacity: f64) -> EvaluatedNode {
    EvaluatedNode {
        id: NodeId(0),
        center: Point::new(10.0, 10.0),
        opacity,
        draw: Drawable::Rect {
            size: Size::new(10.0, 10.0),
            style: CellStyle::outline(Rgba8::TRANSPARENT, 0.0).with_fill(Rgba8::rgb(255, 0, 0)),
        },
    }
}

#[test]
fn background_fills_the_canvas() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let out = backend.render(&frame(vec![])).unwrap();
    assert_eq!((out.width, out.height), (40, 20));
    assert_eq!(out.data.len(), 40 * 20 * 4);
    assert_eq!(out.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(out.pixel(39, 19), Some([10, 20, 30, 255]));
}

#[test]
fn filled_cell_covers_its_rect_only() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let out = backend.render(&frame(vec![filled(1.0)])).unwrap();
    assert_eq!(out.pixel(10, 10), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(30, 10), Some([10, 20, 30, 255]));
}

#[test]
fn opacity_blends_with_background() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let out = backend.render(&frame(vec![filled(0.5)])).unwrap();
    let [r, _, b, a] = out.pixel(10, 10).unwrap();
    assert_eq!(a, 255);
    assert!((120..=140).contains(&r), "r = {r}");
    assert!((10..=20).contains(&b), "b = {b}");
}

#[test]
fn outline_leaves_interior_untouched() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let node = EvaluatedNode {
        id: NodeId(0),
        center: Point::new(20.0, 10.0),
        opacity: 1.0,
        draw: Drawable::Rect {
            size: Size::new(16.0, 16.0),
            style: CellStyle::outline(Rgba8::WHITE, 2.0),
        },
    };
    let out = backend.render(&frame(vec![node])).unwrap();
    assert_eq!(out.pixel(20, 10), Some([10, 20, 30, 255]));
    assert_eq!(out.pixel(12, 10), Some([255, 255, 255, 255]));
}

#[test]
fn text_with_a_missing_font_file_is_an_error() {
    let mut backend = CpuBackend::new(RenderSettings {
        font_path: Some("target/no/such/font.ttf".into()),
    });
    let node = EvaluatedNode {
        id: NodeId(1),
        center: Point::new(20.0, 10.0),
        opacity: 1.0,
        draw: Drawable::Text {
            text: "7".into(),
            size_px: 12.0,
            color: Rgba8::WHITE,
        },
    };
    assert!(backend.render(&frame(vec![node])).is_err());
    // Empty labels never need a font.
    let empty = EvaluatedNode {
        id: NodeId(2),
        center: Point::new(20.0, 10.0),
        opacity: 1.0,
        draw: Drawable::Text {
            text: String::new(),
            size_px: 12.0,
            color: Rgba8::WHITE,
        },
    };
    backend.render(&frame(vec![empty])).unwrap();
}
