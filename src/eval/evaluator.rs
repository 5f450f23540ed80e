use std::collections::BTreeMap;

use crate::{
    cells::style::CellStyle,
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rgba8, Size},
    foundation::error::{SceneError, SceneResult},
    foundation::math::{lerp_point, lerp_rgba},
    scene::model::Scene,
    scene::node::{NodeId, NodeKind, NodeState},
    scene::ops::{Step, VisualOp},
    scene::stage::Stage,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything visible at one frame, in paint order.
pub struct EvaluatedFrame {
    /// Evaluated frame index.
    pub frame: FrameIndex,
    /// Output canvas.
    pub canvas: Canvas,
    /// Clear color.
    pub background: Rgba8,
    /// Visible nodes: rectangles first, then text, each group in id order.
    pub nodes: Vec<EvaluatedNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One node resolved for a specific frame.
pub struct EvaluatedNode {
    /// Node id.
    pub id: NodeId,
    /// Center in canvas pixels.
    pub center: Point,
    /// Node opacity in `(0, 1]`.
    pub opacity: f64,
    /// What to draw.
    pub draw: Drawable,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Resolved drawing payload.
pub enum Drawable {
    /// Cell rectangle.
    Rect {
        /// Rectangle size.
        size: Size,
        /// Interpolated style.
        style: CellStyle,
    },
    /// Text line.
    Text {
        /// Text content.
        text: String,
        /// Font size in pixels.
        size_px: f32,
        /// Interpolated color.
        color: Rgba8,
    },
}

/// Frame sampler for one scene.
///
/// Stage snapshots at every step boundary are computed once, so sampling any frame costs a
/// single step's worth of interpolation and frames can be evaluated in any order.
#[derive(Clone, Debug)]
pub struct Evaluator {
    fps: Fps,
    canvas: Canvas,
    background: Rgba8,
    steps: Vec<Step>,
    starts: Vec<u64>,
    before: Vec<Stage>,
    duration: u64,
}

impl Evaluator {
    /// Validate `scene` and precompute its step boundaries.
    #[tracing::instrument(skip(scene), fields(scene = %scene.name))]
    pub fn new(scene: &Scene) -> SceneResult<Self> {
        scene.validate()?;

        let mut stage = Stage::new();
        let mut starts = Vec::with_capacity(scene.steps.len());
        let mut before = Vec::with_capacity(scene.steps.len());
        let mut t = 0u64;
        for step in &scene.steps {
            starts.push(t);
            before.push(stage.clone());
            stage.apply_all(&step.ops)?;
            t = t
                .checked_add(step.duration)
                .ok_or_else(|| SceneError::validation("scene duration overflows u64"))?;
        }

        Ok(Self {
            fps: scene.fps,
            canvas: scene.canvas,
            background: scene.background,
            steps: scene.steps.clone(),
            starts,
            before,
            duration: t,
        })
    }

    /// Total frames.
    pub fn duration(&self) -> u64 {
        self.duration
    }

    /// Whole-scene frame range.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration),
        }
    }

    /// Timeline frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Index of the step playing at `frame`.
    pub fn step_at(&self, frame: FrameIndex) -> SceneResult<usize> {
        if frame.0 >= self.duration {
            return Err(SceneError::evaluation(format!(
                "frame {} is out of bounds (duration {})",
                frame.0, self.duration
            )));
        }
        Ok(self.starts.partition_point(|&s| s <= frame.0) - 1)
    }

    /// Resolve every visible node at `frame`.
    ///
    /// The last frame of a step shows that step fully applied.
    #[tracing::instrument(skip(self))]
    pub fn eval_frame(&self, frame: FrameIndex) -> SceneResult<EvaluatedFrame> {
        let index = self.step_at(frame)?;
        let step = &self.steps[index];
        let local = frame.0 - self.starts[index];
        let p = step
            .ease
            .apply((local + 1) as f64 / step.duration as f64);

        let mut working: BTreeMap<NodeId, Working> = self.before[index]
            .iter()
            .map(|(id, state)| (id, Working::shown(state.clone())))
            .collect();
        for op in &step.ops {
            apply_partial(&mut working, op, p)?;
        }

        let (rects, texts): (Vec<_>, Vec<_>) = working
            .into_iter()
            .filter(|(_, w)| w.opacity > 0.0)
            .map(|(id, w)| w.into_node(id))
            .partition(|n| matches!(n.draw, Drawable::Rect { .. }));
        let mut nodes = rects;
        nodes.extend(texts);

        Ok(EvaluatedFrame {
            frame,
            canvas: self.canvas,
            background: self.background,
            nodes,
        })
    }
}

struct Working {
    state: NodeState,
    opacity: f64,
}

impl Working {
    fn shown(state: NodeState) -> Self {
        Self {
            state,
            opacity: 1.0,
        }
    }

    fn into_node(self, id: NodeId) -> EvaluatedNode {
        let draw = match self.state.kind {
            NodeKind::Rect { size } => Drawable::Rect {
                size,
                style: self.state.style,
            },
            NodeKind::Text { text, size_px } => Drawable::Text {
                text,
                size_px,
                color: self.state.color,
            },
        };
        EvaluatedNode {
            id,
            center: self.state.center,
            opacity: self.opacity.clamp(0.0, 1.0),
            draw,
        }
    }
}

fn apply_partial(
    working: &mut BTreeMap<NodeId, Working>,
    op: &VisualOp,
    p: f64,
) -> SceneResult<()> {
    if let VisualOp::Create { id, state } = op {
        working.insert(
            *id,
            Working {
                state: state.clone(),
                opacity: p,
            },
        );
        return Ok(());
    }

    let id = op.target();
    let w = working
        .get_mut(&id)
        .ok_or_else(|| SceneError::evaluation(format!("unknown node {}", id.0)))?;
    match op {
        VisualOp::Create { .. } => {}
        VisualOp::Remove { .. } => w.opacity *= 1.0 - p,
        VisualOp::MoveTo { center, .. } => {
            w.state.center = lerp_point(w.state.center, *center, p);
        }
        VisualOp::Restyle { style, .. } => w.state.style = w.state.style.lerp(style, p),
        VisualOp::Recolor { color, .. } => w.state.color = lerp_rgba(w.state.color, *color, p),
        VisualOp::SetText { text, .. } => {
            // Old text fades out over the first half, new text fades in over the second.
            if p >= 0.5
                && let NodeKind::Text { text: current, .. } = &mut w.state.kind
            {
                current.clone_from(text);
            }
            w.opacity *= (2.0 * p - 1.0).abs();
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
