use crate::{
    animation::ease::Ease,
    cells::style::CellStyle,
    foundation::core::{Point, Rgba8, Size},
    scene::node::{NodeId, NodeKind, NodeState},
};

/// Declarative visual operation, animated over the duration of its step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum VisualOp {
    /// Add a node; it fades in.
    Create {
        /// New node id (must not exist yet).
        id: NodeId,
        /// Initial state.
        state: NodeState,
    },
    /// Drop a node; it fades out.
    Remove {
        /// Existing node id.
        id: NodeId,
    },
    /// Slide a node to a new center.
    MoveTo {
        /// Existing node id.
        id: NodeId,
        /// Target center.
        center: Point,
    },
    /// Blend a rectangle to a new style.
    Restyle {
        /// Existing node id.
        id: NodeId,
        /// Target style.
        style: CellStyle,
    },
    /// Blend a text node to a new color.
    Recolor {
        /// Existing node id.
        id: NodeId,
        /// Target color.
        color: Rgba8,
    },
    /// Cross-fade a text node to new content.
    SetText {
        /// Existing text node id.
        id: NodeId,
        /// New content.
        text: String,
    },
}

impl VisualOp {
    /// Node the operation targets.
    pub fn target(&self) -> NodeId {
        match self {
            Self::Create { id, .. }
            | Self::Remove { id }
            | Self::MoveTo { id, .. }
            | Self::Restyle { id, .. }
            | Self::Recolor { id, .. }
            | Self::SetText { id, .. } => *id,
        }
    }

    /// Shorthand for creating a rectangle node.
    pub fn create_rect(id: NodeId, center: Point, size: Size, style: CellStyle) -> Self {
        Self::Create {
            id,
            state: NodeState {
                kind: NodeKind::Rect { size },
                center,
                style,
                color: Rgba8::TRANSPARENT,
            },
        }
    }

    /// Shorthand for creating a text node.
    pub fn create_text(
        id: NodeId,
        center: Point,
        text: impl Into<String>,
        size_px: f32,
        color: Rgba8,
    ) -> Self {
        Self::Create {
            id,
            state: NodeState {
                kind: NodeKind::Text {
                    text: text.into(),
                    size_px,
                },
                center,
                style: CellStyle::outline(Rgba8::TRANSPARENT, 0.0),
                color,
            },
        }
    }
}

/// Group of operations animated together.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Step {
    /// Operations applied during this step; empty for a pause.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ops: Vec<VisualOp>,
    /// Step length in frames (> 0).
    pub duration: u64,
    /// Rate function for the step's progress.
    #[serde(default)]
    pub ease: Ease,
}
