//! algoscene turns classic algorithms into short explainer videos.
//!
//! Each algorithm runs a textbook implementation over a row (or grid) of cells while a
//! [`Script`] records what changed as a timeline of declarative [`VisualOp`]s. The resulting
//! [`Scene`] is plain data:
//!
//! - build it with [`Algorithm::build`] (or script your own with [`Script`])
//! - evaluate any frame with an [`Evaluator`]
//! - rasterize with a [`RenderBackend`] and encode MP4 through `ffmpeg` with [`render_to_mp4`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// Algorithm implementations and their scene scripts.
pub mod algorithms;
pub(crate) mod cells;
/// Scene configuration (canvas, timing, palette, inputs).
pub mod config;
pub(crate) mod encode;
pub(crate) mod eval;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::foundation::core::{
    Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Size, Vec2,
};
pub use crate::foundation::error::{SceneError, SceneResult};

pub use crate::algorithms::Algorithm;
pub use crate::animation::ease::Ease;
pub use crate::cells::collection::{CellCollection, CellLayout, CellValue, Slot};
pub use crate::cells::grid::CellGrid;
pub use crate::cells::layout::CellGeometry;
pub use crate::cells::style::{CellStyle, StyleSpec};
pub use crate::config::SceneConfig;
pub use crate::encode::ffmpeg::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path};
pub use crate::eval::evaluator::{Drawable, EvaluatedFrame, EvaluatedNode, Evaluator};
pub use crate::eval::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, RenderToMp4Opts, render_frame, render_frames,
    render_frames_with_stats, render_to_mp4,
};
pub use crate::render::text::{FontSource, pick_font_path};
pub use crate::scene::model::Scene;
pub use crate::scene::node::{IdAllocator, LabelId, NodeId, NodeKind, NodeState, ShapeId};
pub use crate::scene::ops::{Step, VisualOp};
pub use crate::scene::script::Script;
pub use crate::scene::stage::Stage;
