use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slidecast", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single slide as a PNG.
    Frame(FrameArgs),
    /// Print the script that would be composed from article metadata.
    Script(ScriptArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Script text file. Without it (and without `--text`) the script is composed from `--meta`.
    #[arg(long, conflicts_with = "text")]
    script: Option<PathBuf>,

    /// Inline script text.
    #[arg(long)]
    text: Option<String>,

    /// Article metadata JSON (`title`, `description`, `url`, `image_url`, `source`).
    #[arg(long)]
    meta: Option<PathBuf>,

    /// Render configuration override JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Target video length in seconds.
    #[arg(long, default_value_t = 45.0)]
    duration: f64,

    /// Never touch the network; every background uses the fallback colour.
    #[arg(long)]
    offline: bool,

    /// Print which font families were resolved.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frames per second.
    #[arg(long, default_value_t = 24)]
    fps: u32,

    /// Output MP4 path.
    #[arg(long, default_value = slidecast::DEFAULT_OUT_PATH)]
    out: PathBuf,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,

    /// ffmpeg executable to encode with.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Slide number (1 = headline, 2 = key points, 3 = outro).
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    slide: u8,

    /// Clip-local time in seconds; effects are applied at this time. Omit for the bare slide.
    #[arg(long)]
    at: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ScriptArgs {
    /// Article metadata JSON.
    #[arg(long)]
    meta: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Script(args) => cmd_script(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

/// Everything a render needs, loaded from the command line.
struct Loaded {
    cfg: slidecast::RenderConfig,
    meta: Option<slidecast::Metadata>,
    script: String,
    images: Box<dyn slidecast::ImageSource>,
    fonts: slidecast::FontBook,
}

fn load_inputs(args: &InputArgs) -> anyhow::Result<Loaded> {
    let cfg: slidecast::RenderConfig = match &args.config {
        Some(p) => read_json(p, "render config")?,
        None => slidecast::RenderConfig::default(),
    };
    cfg.validate()?;

    let meta: Option<slidecast::Metadata> = args
        .meta
        .as_deref()
        .map(|p| read_json(p, "metadata"))
        .transpose()?;

    let script = match (&args.script, &args.text) {
        (Some(p), _) => std::fs::read_to_string(p)
            .with_context(|| format!("read script '{}'", p.display()))?,
        (None, Some(t)) => t.clone(),
        (None, None) => meta
            .as_ref()
            .map(slidecast::compose_script)
            .unwrap_or_default(),
    };

    let images: Box<dyn slidecast::ImageSource> = if args.offline {
        Box::new(slidecast::OfflineImageSource::new(
            cfg.resolution,
            cfg.fetch.fallback_bg,
        ))
    } else {
        Box::new(slidecast::HttpImageSource::new(&cfg.fetch, cfg.resolution)?)
    };

    let fonts = slidecast::FontBook::load(&slidecast::FontCandidates::default());
    if args.dump_fonts {
        dump_fonts(&fonts);
    }

    Ok(Loaded {
        cfg,
        meta,
        script,
        images,
        fonts,
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let loaded = load_inputs(&args.input)?;
    let pipeline =
        slidecast::Pipeline::new(&loaded.cfg, loaded.images.as_ref(), &loaded.fonts)?;

    let opts = slidecast::VideoOpts {
        out_path: args.out,
        overwrite: !args.no_overwrite,
        ffmpeg: args.ffmpeg,
        ..slidecast::VideoOpts::default()
    };
    let out = pipeline.render_video(
        &loaded.script,
        loaded.meta.as_ref(),
        args.input.duration,
        args.fps,
        &opts,
    )?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let loaded = load_inputs(&args.input)?;
    let pipeline =
        slidecast::Pipeline::new(&loaded.cfg, loaded.images.as_ref(), &loaded.fonts)?;
    let timeline = pipeline.timeline(&loaded.script, loaded.meta.as_ref(), args.input.duration)?;

    let clip = timeline
        .clips()
        .get(usize::from(args.slide) - 1)
        .with_context(|| format!("timeline has no slide {}", args.slide))?;
    let frame = match args.at {
        Some(t) => clip.frame_at(t)?,
        None => clip.frame.clone(),
    };

    slidecast::ensure_parent_dir(&args.out)?;
    frame
        .to_image()?
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let meta: slidecast::Metadata = read_json(&args.meta, "metadata")?;
    println!("{}", slidecast::compose_script(&meta));
    Ok(())
}

fn dump_fonts(fonts: &slidecast::FontBook) {
    use slidecast::{FontResolver as _, FontWeight};

    eprintln!("font diagnostics:");
    for weight in [FontWeight::Regular, FontWeight::Bold] {
        eprintln!(
            "  {:?}: {}",
            weight,
            fonts.family(weight).unwrap_or("<built-in bitmap>")
        );
    }
    eprintln!("  faces:   {}", fonts.fontdb().faces().count());
}
