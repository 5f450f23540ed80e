use std::path::PathBuf;

use crate::{
    eval::evaluator::EvaluatedFrame,
    foundation::error::{SceneError, SceneResult},
};

/// Rendered RGBA8 frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Settings shared by every backend instance of one render.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Font used for all text; `None` picks a sans-serif system font.
    pub font_path: Option<PathBuf>,
}

/// Turns evaluated frames into pixels.
pub trait RenderBackend {
    /// Render one evaluated frame.
    fn render(&mut self, frame: &EvaluatedFrame) -> SceneResult<FrameRGBA>;

    /// Settings for spawning per-thread copies of this backend, if it supports parallel rendering.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

/// Available rendering backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// vello_cpu rasterizer.
    #[default]
    Cpu,
}

/// Instantiate a backend.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> SceneResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}

pub(crate) fn canvas_dims_u16(width: u32, height: u32) -> SceneResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SceneError::evaluation("canvas width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SceneError::evaluation("canvas height exceeds u16"))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
