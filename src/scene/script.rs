use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    cells::collection::{CellLayout, Slot},
    config::SceneConfig,
    foundation::core::{Point, Rgba8},
    foundation::error::{SceneError, SceneResult},
    scene::model::Scene,
    scene::node::{IdAllocator, LabelId, NodeId},
    scene::ops::{Step, VisualOp},
    scene::stage::Stage,
};

/// Records a scene: keeps a [`Stage`] in step with the timeline being built.
///
/// Algorithm scripts mutate their cell collections, then ask the script for the operations that
/// bring the stage in line and `play` them as one step.
pub struct Script {
    name: String,
    title: String,
    cfg: SceneConfig,
    ids: IdAllocator,
    stage: Stage,
    steps: Vec<Step>,
    caption: Option<NodeId>,
    pointers: BTreeMap<String, NodeId>,
    pointer_lanes: BTreeMap<String, usize>,
}

impl Script {
    /// Start a script; the title is shown at the top of the canvas from the first step.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        cfg: &SceneConfig,
    ) -> SceneResult<Self> {
        cfg.validate()?;
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SceneError::validation("scene name must be non-empty"));
        }
        Ok(Self {
            name,
            title: title.into(),
            cfg: cfg.clone(),
            ids: IdAllocator::new(),
            stage: Stage::new(),
            steps: Vec::new(),
            caption: None,
            pointers: BTreeMap::new(),
            pointer_lanes: BTreeMap::new(),
        })
    }

    /// Id source to hand to cell collections and grids of this scene.
    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Configuration the script was started with.
    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    /// Current stage state.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Number of recorded steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Animate `ops` over `secs` with the default ease; an empty batch records nothing.
    pub fn play(&mut self, ops: Vec<VisualOp>, secs: f64) -> SceneResult<()> {
        self.play_with(ops, secs, Ease::default())
    }

    /// Animate `ops` over `secs` with an explicit ease.
    pub fn play_with(&mut self, ops: Vec<VisualOp>, secs: f64, ease: Ease) -> SceneResult<()> {
        if ops.is_empty() {
            return Ok(());
        }
        self.stage.apply_all(&ops)?;
        self.steps.push(Step {
            ops,
            duration: self.cfg.frames(secs).max(1),
            ease,
        });
        Ok(())
    }

    /// One configured animation step.
    pub fn step(&mut self, ops: Vec<VisualOp>) -> SceneResult<()> {
        let secs = self.cfg.timing.step_secs;
        self.play(ops, secs)
    }

    /// Hold the current frame.
    pub fn wait(&mut self, secs: f64) {
        let duration = self.cfg.frames(secs);
        if duration == 0 {
            return;
        }
        self.steps.push(Step {
            ops: Vec::new(),
            duration,
            ease: Ease::Linear,
        });
    }

    /// Configured pause between phases.
    pub fn pause(&mut self) {
        let secs = self.cfg.timing.pause_secs;
        self.wait(secs);
    }

    /// Operations that bring the stage in line with `cells`.
    pub fn sync(&self, cells: &impl CellLayout) -> Vec<VisualOp> {
        self.stage
            .sync_cells(cells, self.cfg.label_size_px, self.cfg.palette.label)
    }

    /// Sync `cells` as one configured step.
    pub fn show(&mut self, cells: &impl CellLayout) -> SceneResult<()> {
        let ops = self.sync(cells);
        self.step(ops)
    }

    /// Title and first layout fade in together over the intro time.
    pub fn intro(&mut self, cells: &impl CellLayout) -> SceneResult<()> {
        let mut ops = vec![VisualOp::create_text(
            self.ids.next_id(),
            Point::new(self.canvas_center_x(), f64::from(self.cfg.caption_size_px)),
            self.title.clone(),
            self.cfg.caption_size_px,
            self.cfg.palette.caption,
        )];
        ops.extend(self.sync(cells));
        let secs = self.cfg.timing.intro_secs;
        self.play(ops, secs)
    }

    /// Create or update the caption line below the title.
    pub fn caption(&mut self, text: impl Into<String>) -> Vec<VisualOp> {
        let text = text.into();
        let existing = self.caption.filter(|id| self.stage.contains(*id));
        if let Some(id) = existing {
            if self.stage.get(id).and_then(|n| n.text()) == Some(text.as_str()) {
                return Vec::new();
            }
            return vec![VisualOp::SetText { id, text }];
        }

        let id = self.ids.next_id();
        self.caption = Some(id);
        let y = f64::from(self.cfg.caption_size_px) * 2.6;
        vec![VisualOp::create_text(
            id,
            Point::new(self.canvas_center_x(), y),
            text,
            self.cfg.caption_size_px * 0.8,
            self.cfg.palette.caption,
        )]
    }

    /// Free-standing text node, e.g. a formula.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        center: Point,
        size_px: f32,
        color: Rgba8,
    ) -> (NodeId, VisualOp) {
        let id = self.ids.next_id();
        (id, VisualOp::create_text(id, center, text, size_px, color))
    }

    /// Place (or move) the named index pointer under position `index` of `cells`.
    ///
    /// `index` may be one past the end, which is where `hi`-style exclusive bounds point. Each name
    /// keeps its own row below the cells so pointers sharing an index stay readable.
    pub fn pointer(
        &mut self,
        name: &str,
        cells: &impl CellLayout,
        index: usize,
    ) -> SceneResult<Vec<VisualOp>> {
        if index > cells.slots().len() {
            return Err(SceneError::out_of_range(index, cells.slots().len()));
        }
        let rect = cells.slot_rect(index);
        let size_px = self.cfg.label_size_px * 0.75;
        let next_lane = self.pointer_lanes.len();
        let lane = *self
            .pointer_lanes
            .entry(name.to_string())
            .or_insert(next_lane);
        let line = f64::from(size_px) * 1.2;
        let center = Point::new(rect.center().x, rect.y1 + line * (1.0 + lane as f64));

        match self.pointers.get(name).copied() {
            Some(id) if self.stage.contains(id) => {
                if self.stage.get(id).map(|n| n.center) == Some(center) {
                    Ok(Vec::new())
                } else {
                    Ok(vec![VisualOp::MoveTo { id, center }])
                }
            }
            _ => {
                let id = self.ids.next_id();
                self.pointers.insert(name.to_string(), id);
                Ok(vec![VisualOp::create_text(
                    id,
                    center,
                    name,
                    size_px,
                    self.cfg.palette.pointer,
                )])
            }
        }
    }

    /// Remove the named pointer if it is on stage.
    pub fn drop_pointer(&mut self, name: &str) -> Vec<VisualOp> {
        match self.pointers.remove(name) {
            Some(id) if self.stage.contains(id) => vec![VisualOp::Remove { id }],
            _ => Vec::new(),
        }
    }

    /// Fade out a label retired by `set_value`, if it was ever shown.
    pub fn retire_label(&self, label: LabelId) -> Vec<VisualOp> {
        if self.stage.contains(label.0) {
            vec![VisualOp::Remove { id: label.0 }]
        } else {
            Vec::new()
        }
    }

    /// Fade out the cell and label of a slot removed from its collection.
    pub fn retire_slot(&self, slot: &Slot) -> Vec<VisualOp> {
        [slot.cell.0, slot.label.0]
            .into_iter()
            .filter(|id| self.stage.contains(*id))
            .map(|id| VisualOp::Remove { id })
            .collect()
    }

    /// Hold the final frame and produce the validated scene.
    pub fn finish(mut self) -> SceneResult<Scene> {
        let secs = self.cfg.timing.outro_secs;
        self.wait(secs);
        let scene = Scene {
            name: self.name,
            title: self.title,
            fps: self.cfg.fps,
            canvas: self.cfg.canvas,
            background: self.cfg.background,
            steps: self.steps,
        };
        scene.validate()?;
        tracing::debug!(
            scene = %scene.name,
            steps = scene.steps.len(),
            frames = scene.duration(),
            "scene recorded"
        );
        Ok(scene)
    }

    fn canvas_center_x(&self) -> f64 {
        f64::from(self.cfg.canvas.width) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/script.rs"]
mod tests;
