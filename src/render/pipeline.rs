use std::{collections::HashMap, path::PathBuf};

use rayon::prelude::*;

use crate::{
    encode::ffmpeg::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path},
    eval::evaluator::{EvaluatedFrame, Evaluator},
    eval::fingerprint::{FrameFingerprint, fingerprint_frame},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{SceneError, SceneResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::cpu::CpuBackend,
    scene::model::Scene,
};

/// Evaluate and render a single frame.
pub fn render_frame(
    scene: &Scene,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> SceneResult<FrameRGBA> {
    let evaluator = Evaluator::new(scene)?;
    backend.render(&evaluator.eval_frame(frame)?)
}

/// Render a range of frames sequentially (inclusive start, exclusive end).
pub fn render_frames(
    scene: &Scene,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
) -> SceneResult<Vec<FrameRGBA>> {
    render_frames_with_stats(scene, range, backend, &RenderThreading::default())
        .map(|(frames, _)| frames)
}

/// Threading and chunking knobs for multi-frame renders.
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Render frames of a chunk on a rayon pool, one backend per worker.
    pub parallel: bool,
    /// Frames evaluated and rendered per chunk; bounds memory use.
    pub chunk_size: usize,
    /// Pool size; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Render identical frames of a chunk once, in both sequential and parallel mode.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: false,
        }
    }
}

/// Frame accounting for a multi-frame render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames produced.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused from an identical earlier frame.
    pub frames_elided: u64,
}

impl RenderStats {
    fn add(&mut self, other: RenderStats) {
        self.frames_total += other.frames_total;
        self.frames_rendered += other.frames_rendered;
        self.frames_elided += other.frames_elided;
    }
}

/// Render `range` into memory, reporting how many frames were rasterized.
pub fn render_frames_with_stats(
    scene: &Scene,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> SceneResult<(Vec<FrameRGBA>, RenderStats)> {
    let evaluator = Evaluator::new(scene)?;
    check_range(&evaluator, range)?;

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let mut stats = RenderStats::default();
    let mut renderer = ChunkRenderer::new(backend, threading)?;
    for chunk in chunks(range, threading.chunk_size) {
        let (mut frames, chunk_stats) = renderer.render(&evaluator, chunk)?;
        out.append(&mut frames);
        stats.add(chunk_stats);
    }
    Ok((out, stats))
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Frame range to render; `None` renders the whole scene.
    pub range: Option<FrameRange>,
    /// Whether to overwrite an existing output file.
    pub overwrite: bool,
    /// x264 constant rate factor.
    pub crf: u8,
    /// Render threading/chunking configuration.
    pub threading: RenderThreading,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            range: None,
            overwrite: true,
            crf: 18,
            threading: RenderThreading::default(),
        }
    }
}

/// Render a scene to MP4 through the system `ffmpeg` binary.
///
/// Frames are streamed chunk by chunk, so memory use is bounded by the chunk size rather than the
/// scene length.
#[tracing::instrument(skip(scene, out_path, opts, backend), fields(scene = %scene.name))]
pub fn render_to_mp4(
    scene: &Scene,
    out_path: impl Into<PathBuf>,
    opts: RenderToMp4Opts,
    backend: &mut dyn RenderBackend,
) -> SceneResult<RenderStats> {
    let evaluator = Evaluator::new(scene)?;
    let range = opts.range.unwrap_or_else(|| evaluator.frame_range());
    check_range(&evaluator, range)?;
    if !is_ffmpeg_on_path() {
        return Err(SceneError::evaluation(
            "ffmpeg is required for MP4 rendering, but was not found on PATH",
        ));
    }

    let cfg = EncodeConfig {
        overwrite: opts.overwrite,
        crf: opts.crf,
        ..EncodeConfig::mp4(out_path, scene.canvas.width, scene.canvas.height, scene.fps)
    };
    let mut enc = FfmpegEncoder::new(cfg, scene.background)?;
    let mut stats = RenderStats::default();
    let mut renderer = ChunkRenderer::new(backend, &opts.threading)?;
    for chunk in chunks(range, opts.threading.chunk_size) {
        let (frames, chunk_stats) = renderer.render(&evaluator, chunk)?;
        for frame in &frames {
            enc.encode_frame(frame)?;
        }
        stats.add(chunk_stats);
        tracing::debug!(done = stats.frames_total, of = range.len_frames(), "chunk encoded");
    }
    enc.finish()?;
    tracing::info!(
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render finished"
    );
    Ok(stats)
}

fn check_range(evaluator: &Evaluator, range: FrameRange) -> SceneResult<()> {
    if range.is_empty() {
        return Err(SceneError::validation("render range must be non-empty"));
    }
    if range.end.0 > evaluator.duration() {
        return Err(SceneError::validation(format!(
            "render range end {} exceeds scene duration {}",
            range.end.0,
            evaluator.duration()
        )));
    }
    Ok(())
}

fn chunks(range: FrameRange, chunk_size: usize) -> impl Iterator<Item = FrameRange> {
    let size = chunk_size.max(1) as u64;
    (range.start.0..range.end.0)
        .step_by(size as usize)
        .map(move |start| FrameRange {
            start: FrameIndex(start),
            end: FrameIndex((start + size).min(range.end.0)),
        })
}

enum ChunkRenderer<'a> {
    Sequential {
        backend: &'a mut dyn RenderBackend,
        elide: bool,
    },
    Parallel {
        pool: rayon::ThreadPool,
        settings: RenderSettings,
        elide: bool,
    },
}

impl<'a> ChunkRenderer<'a> {
    fn new(backend: &'a mut dyn RenderBackend, threading: &RenderThreading) -> SceneResult<Self> {
        let elide = threading.static_frame_elision;
        if !threading.parallel {
            return Ok(Self::Sequential { backend, elide });
        }
        let settings = backend.worker_render_settings().ok_or_else(|| {
            SceneError::evaluation("parallel render requires a backend with worker settings")
        })?;
        Ok(Self::Parallel {
            pool: build_thread_pool(threading.threads)?,
            settings,
            elide,
        })
    }

    fn render(
        &mut self,
        evaluator: &Evaluator,
        range: FrameRange,
    ) -> SceneResult<(Vec<FrameRGBA>, RenderStats)> {
        let evals = (range.start.0..range.end.0)
            .map(|f| evaluator.eval_frame(FrameIndex(f)))
            .collect::<SceneResult<Vec<EvaluatedFrame>>>()?;

        match self {
            Self::Sequential { backend, elide } => {
                let plan = ElisionPlan::new(&evals, *elide);
                let rendered = plan
                    .unique
                    .iter()
                    .map(|&idx| backend.render(&evals[idx]))
                    .collect::<SceneResult<Vec<FrameRGBA>>>()?;
                Ok(plan.expand(rendered))
            }
            Self::Parallel {
                pool,
                settings,
                elide,
            } => {
                let plan = ElisionPlan::new(&evals, *elide);
                let rendered = pool.install(|| {
                    plan.unique
                        .par_iter()
                        .map_init(
                            || CpuBackend::new(settings.clone()),
                            |backend, &idx| backend.render(&evals[idx]),
                        )
                        .collect::<SceneResult<Vec<FrameRGBA>>>()
                })?;
                Ok(plan.expand(rendered))
            }
        }
    }
}

/// Which frames of a chunk to rasterize, and which rendered frame each output reuses.
struct ElisionPlan {
    unique: Vec<usize>,
    frame_to_unique: Vec<usize>,
}

impl ElisionPlan {
    fn new(evals: &[EvaluatedFrame], elide: bool) -> Self {
        let mut unique = Vec::<usize>::with_capacity(evals.len());
        let mut frame_to_unique = Vec::<usize>::with_capacity(evals.len());
        if elide {
            let mut first = HashMap::<FrameFingerprint, usize>::new();
            for (idx, eval) in evals.iter().enumerate() {
                let slot = *first.entry(fingerprint_frame(eval)).or_insert_with(|| {
                    unique.push(idx);
                    unique.len() - 1
                });
                frame_to_unique.push(slot);
            }
        } else {
            unique.extend(0..evals.len());
            frame_to_unique.extend(0..evals.len());
        }
        Self {
            unique,
            frame_to_unique,
        }
    }

    fn expand(self, rendered: Vec<FrameRGBA>) -> (Vec<FrameRGBA>, RenderStats) {
        let total = self.frame_to_unique.len() as u64;
        let rendered_count = self.unique.len() as u64;
        let out = self
            .frame_to_unique
            .iter()
            .map(|&u| rendered[u].clone())
            .collect::<Vec<_>>();
        (
            out,
            RenderStats {
                frames_total: total,
                frames_rendered: rendered_count,
                frames_elided: total - rendered_count,
            },
        )
    }
}

fn build_thread_pool(threads: Option<usize>) -> SceneResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(SceneError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SceneError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
