use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

use algoscene::{Algorithm, Scene, SceneConfig};

#[derive(Parser, Debug)]
#[command(name = "algoscene", version, about = "Explainer videos for classic algorithms")]
struct Cli {
    /// Scene configuration JSON (canvas, timing, palette, inputs).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Font file for all text; overrides `font_path` from the config.
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in scenes.
    List,
    /// Write a scene as JSON.
    Dump(DumpArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SceneSource {
    /// Built-in scene name (see `algoscene list`).
    #[arg(long)]
    scene: Option<Algorithm>,

    /// Scene JSON written by `algoscene dump`.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Built-in scene name.
    #[arg(long)]
    scene: Algorithm,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SceneSource,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,

    /// Print the resolved text font (origin + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SceneSource,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Backend to use.
    #[arg(long, value_enum, default_value_t = BackendChoice::Cpu)]
    backend: BackendChoice,

    /// x264 constant rate factor (0-51, lower is better).
    #[arg(long, default_value_t = 18)]
    crf: u8,

    /// Render frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Thread pool size (defaults to the number of cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per render chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Render identical frames within a chunk once (with or without --parallel).
    #[arg(long)]
    elide_static: bool,

    /// Refuse to overwrite an existing output file.
    #[arg(long)]
    no_overwrite: bool,

    /// Print the resolved text font (origin + SHA-256 of font bytes).
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendChoice {
    Cpu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => SceneConfig::default(),
    };
    let font = algoscene::pick_font_path(cli.font.clone(), cfg.font_path.as_deref());

    match cli.cmd {
        Command::List => cmd_list(),
        Command::Dump(args) => cmd_dump(args, &cfg),
        Command::Frame(args) => cmd_frame(args, &cfg, font),
        Command::Render(args) => cmd_render(args, &cfg, font),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_list() -> anyhow::Result<()> {
    for algo in Algorithm::ALL {
        println!("{:<16} {:<24} inputs: {}", algo.name(), algo.title(), algo.inputs_help());
    }
    Ok(())
}

fn cmd_dump(args: DumpArgs, cfg: &SceneConfig) -> anyhow::Result<()> {
    let scene = args
        .scene
        .build(cfg)
        .with_context(|| format!("build scene '{}'", args.scene))?;
    scene
        .save(&args.out)
        .with_context(|| format!("write scene '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({} steps, {} frames)",
        args.out.display(),
        scene.steps.len(),
        scene.duration()
    );
    Ok(())
}

fn load_scene(source: &SceneSource, cfg: &SceneConfig) -> anyhow::Result<Scene> {
    match (&source.scene, &source.in_path) {
        (Some(algo), _) => algo
            .build(cfg)
            .with_context(|| format!("build scene '{algo}'")),
        (None, Some(path)) => {
            Scene::load(path).with_context(|| format!("load scene '{}'", path.display()))
        }
        (None, None) => anyhow::bail!("either --scene or --in is required"),
    }
}

fn make_backend(
    choice: BackendChoice,
    settings: &algoscene::RenderSettings,
) -> anyhow::Result<Box<dyn algoscene::RenderBackend>> {
    let kind = match choice {
        BackendChoice::Cpu => algoscene::BackendKind::Cpu,
    };

    Ok(algoscene::create_backend(kind, settings)?)
}

fn cmd_frame(args: FrameArgs, cfg: &SceneConfig, font: Option<PathBuf>) -> anyhow::Result<()> {
    let scene = load_scene(&args.source, cfg)?;
    if args.dump_fonts {
        dump_font_diagnostics(font.as_deref())?;
    }

    let settings = algoscene::RenderSettings { font_path: font };
    let mut backend = make_backend(args.backend, &settings)?;
    let frame = algoscene::render_frame(
        &scene,
        algoscene::FrameIndex(args.frame),
        backend.as_mut(),
    )?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs, cfg: &SceneConfig, font: Option<PathBuf>) -> anyhow::Result<()> {
    let scene = load_scene(&args.source, cfg)?;
    if args.dump_fonts {
        dump_font_diagnostics(font.as_deref())?;
    }

    let settings = algoscene::RenderSettings { font_path: font };
    let mut backend = make_backend(args.backend, &settings)?;

    let opts = algoscene::RenderToMp4Opts {
        range: None,
        overwrite: !args.no_overwrite,
        crf: args.crf,
        threading: algoscene::RenderThreading {
            parallel: args.parallel,
            chunk_size: args.chunk_size,
            threads: args.threads,
            static_frame_elision: args.elide_static,
        },
    };

    let stats = algoscene::render_to_mp4(&scene, args.out.clone(), opts, backend.as_mut())?;

    eprintln!(
        "wrote {} ({} frames, {} rendered, {} elided)",
        args.out.display(),
        stats.frames_total,
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

fn dump_font_diagnostics(font: Option<&Path>) -> anyhow::Result<()> {
    eprintln!("text font diagnostics:");
    match algoscene::FontSource::resolve(font) {
        Ok(source) => {
            eprintln!("  origin: {}", source.origin);
            eprintln!("  index:  {}", source.index);
            eprintln!("  sha256: {}", sha256_hex(&source.bytes));
        }
        Err(e) if font.is_none() => eprintln!("  none ({e}); labels will be skipped"),
        Err(e) => return Err(e).context("resolve font"),
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        let _ = write!(out, "{b:02x}");
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/bin/algoscene.rs"]
mod tests;
