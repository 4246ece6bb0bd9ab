use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "layerframe", version)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every layer of a scene (or storyboard) to PNG files.
    Render(RenderArgs),
    /// Print the frame plan and per-frame styles of one animation as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON: one scene object, or `{"scenes": [...]}`.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory. Receives the rasters and a `scene.json` result manifest.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 720)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 1280)]
    height: u32,

    /// Frames per second of animation sequences and stroke masks.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Font family made available to layer markup. Repeatable; the first is the default family.
    #[arg(long = "font")]
    fonts: Vec<String>,

    /// Directory of `.ttf`/`.otf`/`.ttc` files to load. Repeatable.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Do not load fonts installed on the host.
    #[arg(long)]
    no_system_fonts: bool,

    /// Render frame sequences for animated, non-static layers.
    #[arg(long)]
    animations: bool,

    /// Crop static renders to their content.
    #[arg(long)]
    crop: bool,

    /// Render layers in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Active animation length in milliseconds.
    #[arg(long, default_value_t = 500)]
    duration_ms: u64,

    /// Transparent lead-in in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Effect name, e.g. `slide_up`.
    #[arg(long, default_value = "fade_in")]
    effect: String,

    /// Easing name, e.g. `ease_out_cubic`.
    #[arg(long, default_value = "ease_out")]
    easing: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let storyboard = layerframe::StoryboardDef::from_path(&args.in_path)?;

    let opts = layerframe::CompositorOpts {
        canvas: layerframe::Canvas::new(args.width, args.height)?,
        fps: layerframe::Fps::whole(args.fps)?,
        fonts: args.fonts,
        render_animations: args.animations,
        crop_static_layers: args.crop,
        parallel: args.parallel,
        threads: args.threads,
        ..Default::default()
    };
    let rasterizer = layerframe::SvgRasterizer::new(layerframe::SvgRasterizerOpts {
        font_dirs: args.font_dirs,
        load_system_fonts: !args.no_system_fonts,
    });
    let mut compositor = layerframe::SceneCompositor::new(rasterizer, opts)?;
    let mut sink = layerframe::DirectorySink::new(&args.out);

    let mut results = Vec::with_capacity(storyboard.scenes.len());
    for (i, scene) in storyboard.scenes.iter().enumerate() {
        results.push(compositor.render(scene, i, &mut sink)?);
    }
    compositor.shutdown();

    let manifest_path = args.out.join("scene.json");
    let manifest = serde_json::json!({ "scenes": results });
    let text = serde_json::to_string_pretty(&manifest).context("serialize result manifest")?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;
    std::fs::write(&manifest_path, text)
        .with_context(|| format!("write manifest '{}'", manifest_path.display()))?;

    let warnings: usize = results.iter().map(|r| r.warnings.len()).sum();
    eprintln!(
        "wrote {} ({} scene(s), {warnings} warning(s))",
        manifest_path.display(),
        results.len()
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let spec = layerframe::AnimationSpec {
        effect: layerframe::Effect::from_name_or_default(&args.effect),
        duration_ms: args.duration_ms,
        delay_ms: args.delay_ms,
        easing: layerframe::Ease::from_name_or_default(&args.easing),
    };
    let timeline = layerframe::Timeline::new(spec, layerframe::Fps::whole(args.fps)?);

    let frames: Vec<_> = timeline
        .styles()
        .map(|(f, style)| serde_json::json!({ "frame": f, "style": style }))
        .collect();
    let out = serde_json::json!({
        "animation": spec,
        "plan": timeline.plan(),
        "frames": frames,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize frame plan")?
    );
    Ok(())
}
