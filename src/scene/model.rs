use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8},
    foundation::error::{SceneError, SceneResult},
    scene::ops::Step,
    scene::stage::Stage,
};

/// A complete, renderable scene.
///
/// A scene is pure data: it can be built by an algorithm script, written to JSON and loaded back
/// for rendering.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Machine name (e.g. `bubble-sort`).
    pub name: String,
    /// Human readable title.
    pub title: String,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Clear color behind every frame.
    pub background: Rgba8,
    /// Timed steps in playback order.
    pub steps: Vec<Step>,
}

impl Scene {
    /// Total length in frames; saturates for scenes that fail [`Scene::validate`].
    pub fn duration(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |t, s| t.saturating_add(s.duration))
    }

    /// Whole-scene frame range.
    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.duration()),
        }
    }

    /// Validate timing and replay every operation against a scratch stage.
    pub fn validate(&self) -> SceneResult<()> {
        if self.name.trim().is_empty() {
            return Err(SceneError::validation("scene name must be non-empty"));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(SceneError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SceneError::validation("canvas width/height must be > 0"));
        }
        if self.steps.is_empty() {
            return Err(SceneError::validation("scene must have at least one step"));
        }

        let mut stage = Stage::new();
        let mut total = 0u64;
        for (i, step) in self.steps.iter().enumerate() {
            if step.duration == 0 {
                return Err(SceneError::validation(format!(
                    "step {i} has zero duration"
                )));
            }
            total = total
                .checked_add(step.duration)
                .ok_or_else(|| SceneError::validation("scene duration overflows u64"))?;
            stage
                .apply_all(&step.ops)
                .map_err(|e| SceneError::validation(format!("step {i}: {e}")))?;
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json(text: &str) -> SceneResult<Self> {
        let scene: Self = serde_json::from_str(text)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Read and validate a scene JSON file.
    pub fn load(path: &Path) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Write the scene as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> SceneResult<()> {
        crate::encode::ffmpeg::ensure_parent_dir(path)?;
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("write scene '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
