use std::{cell::Cell, rc::Rc};

use crate::{
    cells::style::CellStyle,
    foundation::core::{Point, Rgba8, Size},
};

/// Stable handle of one on-screen item.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

/// Handle of the rectangle that renders one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ShapeId(pub NodeId);

/// Handle of the text that renders one slot's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LabelId(pub NodeId);

/// Monotonic node id source.
///
/// Clones share the same counter, so cell collections, grids and the script stage can all mint
/// ids without colliding.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: Rc<Cell<u64>>,
}

impl IdAllocator {
    /// Fresh allocator starting at id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the next id.
    pub fn next_id(&self) -> NodeId {
        let id = self.next.get();
        self.next.set(id + 1);
        NodeId(id)
    }

    /// Mint a shape handle.
    pub fn next_shape(&self) -> ShapeId {
        ShapeId(self.next_id())
    }

    /// Mint a label handle.
    pub fn next_label(&self) -> LabelId {
        LabelId(self.next_id())
    }
}

/// What a node draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// Axis-aligned rectangle of the given size, centered on the node center.
    Rect {
        /// Rectangle size in pixels.
        size: Size,
    },
    /// Single line of text centered on the node center.
    Text {
        /// Text content.
        text: String,
        /// Font size in pixels.
        size_px: f32,
    },
}

/// Full visual state of one node at a step boundary.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeState {
    /// Shape or text payload.
    pub kind: NodeKind,
    /// Center position in canvas pixels.
    pub center: Point,
    /// Stroke/fill style (rectangles).
    pub style: CellStyle,
    /// Text color (text nodes).
    pub color: Rgba8,
}

impl NodeState {
    /// Text content, if this is a text node.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { text, .. } => Some(text),
            NodeKind::Rect { .. } => None,
        }
    }
}
