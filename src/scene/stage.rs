use std::collections::BTreeMap;

use crate::{
    cells::collection::CellLayout,
    foundation::core::{Rgba8, Size},
    foundation::error::{SceneError, SceneResult},
    scene::node::{NodeId, NodeKind, NodeState},
    scene::ops::VisualOp,
};

/// Authoritative visual state of every node at one point of a script.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stage {
    nodes: BTreeMap<NodeId, NodeState>,
}

impl Stage {
    /// Empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of node `id`, if present.
    pub fn get(&self, id: NodeId) -> Option<&NodeState> {
        self.nodes.get(&id)
    }

    /// `true` when node `id` is on stage.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes on stage.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when nothing is on stage.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in id (creation) order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeState)> {
        self.nodes.iter().map(|(id, state)| (*id, state))
    }

    /// Apply one operation at full progress.
    pub fn apply(&mut self, op: &VisualOp) -> SceneResult<()> {
        match op {
            VisualOp::Create { id, state } => {
                if self.nodes.contains_key(id) {
                    return Err(SceneError::validation(format!(
                        "node {} is created twice",
                        id.0
                    )));
                }
                self.nodes.insert(*id, state.clone());
            }
            VisualOp::Remove { id } => {
                self.nodes
                    .remove(id)
                    .ok_or_else(|| missing_node(*id, "remove"))?;
            }
            VisualOp::MoveTo { id, center } => {
                self.node_mut(*id, "move")?.center = *center;
            }
            VisualOp::Restyle { id, style } => {
                style.validate()?;
                self.node_mut(*id, "restyle")?.style = *style;
            }
            VisualOp::Recolor { id, color } => {
                self.node_mut(*id, "recolor")?.color = *color;
            }
            VisualOp::SetText { id, text } => {
                let node = self.node_mut(*id, "set text on")?;
                let NodeKind::Text { text: current, .. } = &mut node.kind else {
                    return Err(SceneError::validation(format!(
                        "node {} is not a text node",
                        id.0
                    )));
                };
                current.clone_from(text);
            }
        }
        Ok(())
    }

    /// Apply a batch of operations in order.
    pub fn apply_all<'a>(&mut self, ops: impl IntoIterator<Item = &'a VisualOp>) -> SceneResult<()> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }

    /// Operations that bring the stage in line with `cells`.
    ///
    /// Missing cells and labels are created; existing ones are moved, restyled or re-texted only
    /// where they differ, so syncing an unchanged layout yields no operations.
    pub fn sync_cells(
        &self,
        cells: &impl CellLayout,
        label_size_px: f32,
        label_color: Rgba8,
    ) -> Vec<VisualOp> {
        let mut ops = Vec::new();
        for (index, slot) in cells.slots().iter().enumerate() {
            let rect = cells.slot_rect(index);
            let center = rect.center();

            match self.nodes.get(&slot.cell.0) {
                None => ops.push(VisualOp::create_rect(
                    slot.cell.0,
                    center,
                    Size::new(rect.width(), rect.height()),
                    slot.style,
                )),
                Some(node) => {
                    if node.center != center {
                        ops.push(VisualOp::MoveTo {
                            id: slot.cell.0,
                            center,
                        });
                    }
                    if node.style != slot.style {
                        ops.push(VisualOp::Restyle {
                            id: slot.cell.0,
                            style: slot.style,
                        });
                    }
                }
            }

            let text = slot.value.to_string();
            match self.nodes.get(&slot.label.0) {
                None => ops.push(VisualOp::create_text(
                    slot.label.0,
                    center,
                    text,
                    label_size_px,
                    label_color,
                )),
                Some(node) => {
                    if node.center != center {
                        ops.push(VisualOp::MoveTo {
                            id: slot.label.0,
                            center,
                        });
                    }
                    if node.text() != Some(text.as_str()) {
                        ops.push(VisualOp::SetText {
                            id: slot.label.0,
                            text,
                        });
                    }
                }
            }
        }
        ops
    }

    fn node_mut(&mut self, id: NodeId, action: &str) -> SceneResult<&mut NodeState> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| missing_node(id, action))
    }
}

fn missing_node(id: NodeId, action: &str) -> SceneError {
    SceneError::validation(format!("cannot {action} unknown node {}", id.0))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
