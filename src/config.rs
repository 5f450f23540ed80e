//! Scene configuration.
//!
//! Every field has a default, so a config file only needs the values it overrides:
//!
//! ```json
//! { "canvas": { "width": 1920, "height": 1080 }, "timing": { "step_secs": 0.4 } }
//! ```
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    cells::layout::CellGeometry,
    cells::style::CellStyle,
    foundation::core::{Canvas, Fps, Rgba8},
    foundation::error::{SceneError, SceneResult},
};

/// Everything a scene script needs besides the algorithm itself.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Output canvas.
    pub canvas: Canvas,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Clear color.
    pub background: Rgba8,
    /// Cell size and spacing.
    pub geometry: CellGeometry,
    /// Step and pause lengths.
    pub timing: Timing,
    /// Highlight styles and text colors.
    pub palette: Palette,
    /// Font size of cell labels.
    pub label_size_px: f32,
    /// Font size of captions and titles.
    pub caption_size_px: f32,
    /// Font file used for all text; falls back to a system sans-serif face.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    /// Per-run overrides of the algorithm inputs.
    pub inputs: Inputs,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            fps: Fps { num: 30, den: 1 },
            background: Rgba8::rgb(18, 20, 28),
            geometry: CellGeometry::default(),
            timing: Timing::default(),
            palette: Palette::default(),
            label_size_px: 32.0,
            caption_size_px: 36.0,
            font_path: None,
            inputs: Inputs::default(),
        }
    }
}

/// Durations in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Title card and initial cell fade-in.
    pub intro_secs: f64,
    /// One animated step (compare, swap, move).
    pub step_secs: f64,
    /// Pause between logical phases.
    pub pause_secs: f64,
    /// Hold on the final frame.
    pub outro_secs: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            intro_secs: 1.0,
            step_secs: 0.6,
            pause_secs: 0.4,
            outro_secs: 1.5,
        }
    }
}

/// Named styles shared by all scenes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Untouched cells.
    pub idle: CellStyle,
    /// Cells being compared or moved.
    pub active: CellStyle,
    /// Cells in final position / confirmed results.
    pub done: CellStyle,
    /// Cells ruled out (discarded halves, crossed-out composites).
    pub dimmed: CellStyle,
    /// The answer of a search.
    pub found: CellStyle,
    /// The current window or range.
    pub window: CellStyle,
    /// Cell label color.
    pub label: Rgba8,
    /// Caption and title color.
    pub caption: Rgba8,
    /// Index pointer color (`lo`, `hi`, `i`, ...).
    pub pointer: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            idle: CellStyle::outline(Rgba8::rgb(236, 239, 244), 3.0),
            active: CellStyle::outline(Rgba8::rgb(255, 214, 10), 6.0)
                .with_fill(Rgba8::rgba(255, 214, 10, 48)),
            done: CellStyle::outline(Rgba8::rgb(76, 175, 80), 4.0)
                .with_fill(Rgba8::rgba(76, 175, 80, 96)),
            dimmed: CellStyle::outline(Rgba8::rgb(90, 94, 104), 2.0)
                .with_fill(Rgba8::rgba(40, 42, 50, 200)),
            found: CellStyle::outline(Rgba8::rgb(66, 165, 245), 6.0)
                .with_fill(Rgba8::rgba(66, 165, 245, 96)),
            window: CellStyle::outline(Rgba8::rgb(255, 138, 101), 6.0)
                .with_fill(Rgba8::rgba(255, 138, 101, 48)),
            label: Rgba8::rgb(236, 239, 244),
            caption: Rgba8::rgb(236, 239, 244),
            pointer: Rgba8::rgb(255, 214, 10),
        }
    }
}

/// Optional input overrides; each scene falls back to its own textbook example.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Inputs {
    /// Input array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array: Option<Vec<i64>>,
    /// Search target (binary search).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<i64>,
    /// Window length (sliding window).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<usize>,
    /// Upper bound (sieve).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SceneConfig {
    /// Reject values no scene can be built from.
    pub fn validate(&self) -> SceneResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SceneError::validation("canvas width/height must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        self.geometry.validate()?;

        for (name, secs) in [
            ("intro_secs", self.timing.intro_secs),
            ("step_secs", self.timing.step_secs),
            ("pause_secs", self.timing.pause_secs),
            ("outro_secs", self.timing.outro_secs),
        ] {
            if !secs.is_finite() || secs < 0.0 {
                return Err(SceneError::validation(format!(
                    "timing.{name} must be finite and >= 0"
                )));
            }
        }
        if self.timing.step_secs <= 0.0 {
            return Err(SceneError::validation("timing.step_secs must be > 0"));
        }

        for (name, size) in [
            ("label_size_px", self.label_size_px),
            ("caption_size_px", self.caption_size_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(SceneError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        let p = &self.palette;
        for style in [p.idle, p.active, p.done, p.dimmed, p.found, p.window] {
            style
                .validate()
                .map_err(|e| SceneError::validation(format!("palette: {e}")))?;
        }
        Ok(())
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(text: &str) -> SceneResult<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a config JSON file.
    pub fn load(path: &Path) -> SceneResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Convert seconds to frames at the configured rate.
    pub fn frames(&self, secs: f64) -> u64 {
        self.fps.secs_to_frames(secs)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
