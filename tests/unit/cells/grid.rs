use super::*;
use crate::foundation::core::Rgba8;

fn crossed() -> CellStyle {
    CellStyle::outline(Rgba8::rgb(90, 90, 90), 2.0).with_fill(Rgba8::rgba(60, 60, 60, 200))
}

fn grid(rows: usize, cols: usize, n: i64) -> CellGrid {
    CellGrid::new(
        rows,
        cols,
        (1..=n).map(CellValue::Int),
        CellGeometry::default(),
        Point::ZERO,
        CellStyle::default().into(),
        &IdAllocator::new(),
    )
    .unwrap()
}

#[test]
fn short_inputs_pad_with_empty_slots() {
    let g = grid(2, 3, 4);
    assert_eq!(g.len(), 6);
    assert_eq!(g.value(3).unwrap(), &CellValue::Int(4));
    assert_eq!(g.value(4).unwrap(), &CellValue::Empty);
    assert_eq!(g.value(5).unwrap(), &CellValue::Empty);
}

#[test]
fn too_many_values_or_empty_shape_is_rejected() {
    let ids = IdAllocator::new();
    let err = CellGrid::new(
        1,
        2,
        [1i64, 2, 3],
        CellGeometry::default(),
        Point::ZERO,
        CellStyle::default().into(),
        &ids,
    )
    .unwrap_err();
    assert!(matches!(err, SceneError::InvalidArgument(_)));
    assert!(
        CellGrid::new(
            0,
            2,
            Vec::<i64>::new(),
            CellGeometry::default(),
            Point::ZERO,
            CellStyle::default().into(),
            &ids,
        )
        .is_err()
    );
}

#[test]
fn coordinates_round_trip() {
    let g = grid(3, 4, 12);
    assert_eq!(g.index_of(2, 1).unwrap(), 9);
    assert_eq!(g.coords_of(9).unwrap(), (2, 1));
    assert!(g.index_of(3, 0).is_err());
    assert!(g.index_of(0, 4).is_err());
    assert!(g.coords_of(12).is_err());
}

#[test]
fn marking_one_index_leaves_neighbours_alone() {
    let mut g = grid(2, 5, 10);
    for _ in 0..3 {
        g.highlight(7, crossed()).unwrap();
    }
    for i in 0..g.len() {
        let expected = if i == 7 {
            crossed()
        } else {
            CellStyle::default()
        };
        assert_eq!(g.style_at(i).unwrap(), expected, "index {i}");
    }
}

#[test]
fn rects_are_laid_out_row_major() {
    let g = grid(2, 3, 6);
    let geo = CellGeometry::default();
    let r = g.cell_rect(4).unwrap();
    assert_eq!(r.x0, geo.pitch_x());
    assert_eq!(r.y0, geo.pitch_y());
    assert!(g.cell_rect(6).is_err());
}

#[test]
fn swap_and_set_value_keep_slots_whole() {
    let mut g = grid(1, 3, 3);
    let s0 = g.slot(0).unwrap().clone();
    g.swap(0, 2).unwrap();
    assert_eq!(g.slot(2).unwrap(), &s0);

    let retired = g.set_value(2, CellValue::Marker("x".into())).unwrap();
    assert_eq!(retired, s0.label);
    assert_eq!(g.slot(2).unwrap().cell, s0.cell);
    g.reset_styles();
    assert!(g.highlight_range(2, 1, crossed()).is_err());
}
