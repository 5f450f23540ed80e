use super::*;
use crate::{
    cells::collection::CellCollection,
    cells::layout::CellGeometry,
    cells::style::CellStyle,
    foundation::core::Point,
    scene::node::IdAllocator,
};

fn row(ids: &IdAllocator, values: &[i64]) -> CellCollection {
    CellCollection::new(
        values.iter().copied(),
        CellGeometry::default(),
        Point::new(10.0, 10.0),
        CellStyle::default().into(),
        ids,
    )
    .unwrap()
}

fn synced(stage: &mut Stage, cells: &CellCollection) -> Vec<VisualOp> {
    let ops = stage.sync_cells(cells, 24.0, Rgba8::WHITE);
    stage.apply_all(&ops).unwrap();
    ops
}

#[test]
fn first_sync_creates_cells_and_labels() {
    let ids = IdAllocator::new();
    let cells = row(&ids, &[3, 1, 2]);
    let mut stage = Stage::new();
    let ops = synced(&mut stage, &cells);
    assert_eq!(ops.len(), 6);
    assert!(ops.iter().all(|op| matches!(op, VisualOp::Create { .. })));
    assert_eq!(stage.len(), 6);
    let label = stage.get(cells.slot(0).unwrap().label.0).unwrap();
    assert_eq!(label.text(), Some("3"));
    assert_eq!(label.center, cells.cell_center(0).unwrap());
}

#[test]
fn sync_of_unchanged_layout_is_empty() {
    let ids = IdAllocator::new();
    let cells = row(&ids, &[3, 1, 2]);
    let mut stage = Stage::new();
    synced(&mut stage, &cells);
    assert!(stage.sync_cells(&cells, 24.0, Rgba8::WHITE).is_empty());
}

#[test]
fn swap_emits_moves_for_both_cells_and_labels() {
    let ids = IdAllocator::new();
    let mut cells = row(&ids, &[3, 1, 2]);
    let mut stage = Stage::new();
    synced(&mut stage, &cells);

    cells.swap(0, 1).unwrap();
    let ops = synced(&mut stage, &cells);

    assert_eq!(ops.len(), 4);
    assert!(ops.iter().all(|op| matches!(op, VisualOp::MoveTo { .. })));
    let moved_label = stage.get(cells.slot(0).unwrap().label.0).unwrap();
    assert_eq!(moved_label.text(), Some("1"));
    assert_eq!(moved_label.center, cells.cell_center(0).unwrap());
}

#[test]
fn repeated_highlight_emits_one_restyle() {
    let ids = IdAllocator::new();
    let mut cells = row(&ids, &[3, 1, 2]);
    let mut stage = Stage::new();
    synced(&mut stage, &cells);
    let hot = CellStyle::outline(Rgba8::rgb(255, 200, 0), 6.0);

    cells.highlight(1, 2, hot).unwrap();
    let first = synced(&mut stage, &cells);
    cells.highlight(1, 2, hot).unwrap();
    let second = synced(&mut stage, &cells);

    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|op| matches!(op, VisualOp::Restyle { .. })));
    assert!(second.is_empty());
}

#[test]
fn insert_creates_new_slot_and_shifts_the_rest() {
    let ids = IdAllocator::new();
    let mut cells = row(&ids, &[1, 3]);
    let mut stage = Stage::new();
    synced(&mut stage, &cells);

    cells.insert(1, 2i64).unwrap();
    let ops = synced(&mut stage, &cells);

    let creates = ops
        .iter()
        .filter(|op| matches!(op, VisualOp::Create { .. }))
        .count();
    let moves = ops
        .iter()
        .filter(|op| matches!(op, VisualOp::MoveTo { .. }))
        .count();
    assert_eq!(creates, 2);
    assert_eq!(moves, 2);
}

#[test]
fn apply_rejects_unknown_and_duplicate_nodes() {
    let mut stage = Stage::new();
    assert!(
        stage
            .apply(&VisualOp::Remove { id: NodeId(9) })
            .is_err()
    );
    let create = VisualOp::create_text(NodeId(1), Point::ZERO, "x", 12.0, Rgba8::WHITE);
    stage.apply(&create).unwrap();
    assert!(stage.apply(&create).is_err());
    stage
        .apply(&VisualOp::SetText {
            id: NodeId(1),
            text: "y".into(),
        })
        .unwrap();
    assert_eq!(stage.get(NodeId(1)).unwrap().text(), Some("y"));

    let rect = VisualOp::create_rect(
        NodeId(2),
        Point::ZERO,
        Size::new(4.0, 4.0),
        CellStyle::default(),
    );
    stage.apply(&rect).unwrap();
    assert!(
        stage
            .apply(&VisualOp::SetText {
                id: NodeId(2),
                text: "z".into(),
            })
            .is_err()
    );
}
