//! Anima CLI - Export animated scene objects as Anima sequence scripts.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use anima_export::core::{ExportConfig, SceneNode};
use anima_export::scene::SceneDocument;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (built ",
    env!("ANIMA_BUILD_DATE"),
    " ",
    env!("ANIMA_BUILD_TIME"),
    ")"
);

#[derive(Parser)]
#[command(name = "anima")]
#[command(about = "Export object animation as Anima sequence scripts")]
#[command(version = VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export selected mesh objects to a .cs sequence file
    #[command(visible_alias = "e")]
    Export(ExportArgs),

    /// Show timeline and objects of a scene file
    #[command(visible_alias = "i")]
    Info {
        /// Scene file (JSON)
        scene: PathBuf,
    },
}

#[derive(Args)]
struct ExportArgs {
    /// Scene file (JSON)
    scene: PathBuf,

    /// Output file (default: scene path with .cs extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export settings file (JSON); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Namespace of the generated classes
    #[arg(long)]
    namespace: Option<String>,

    /// Class name template, '@' is replaced with the object name
    #[arg(long)]
    class_name: Option<String>,

    /// First sampled frame
    #[arg(long)]
    start: Option<i32>,

    /// Last sampled frame
    #[arg(long)]
    end: Option<i32>,

    /// Offset added to every written frame number
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i32>,

    /// Frames per second
    #[arg(long, allow_hyphen_values = true)]
    fps: Option<f64>,

    /// Do not export location
    #[arg(long)]
    no_position: bool,

    /// Do not export rotation
    #[arg(long)]
    no_rotation: bool,

    /// Do not export scaling
    #[arg(long)]
    no_scaling: bool,

    /// Export these objects instead of the scene selection
    #[arg(long = "object", value_name = "NAME")]
    objects: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Export(args) => cmd_export(args),
        Commands::Info { scene } => cmd_info(&scene),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_env("ANIMA_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults < scene timeline < config file < command line flags.
fn build_config(args: &ExportArgs, scene: &SceneDocument) -> Result<ExportConfig> {
    let mut config = ExportConfig::default().with_timeline(&scene.timeline.timeline());

    if let Some(path) = &args.config {
        config = config
            .overlay_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        tracing::debug!("loaded export settings from {}", path.display());
    }

    if let Some(ns) = &args.namespace {
        config.namespace = ns.clone();
    }
    if let Some(name) = &args.class_name {
        config.class_name = name.clone();
    }
    if let Some(start) = args.start {
        config.frame_start = start;
    }
    if let Some(end) = args.end {
        config.frame_end = end;
    }
    if let Some(offset) = args.offset {
        config.frame_offset = offset;
    }
    if let Some(fps) = args.fps {
        config.frame_rate = fps;
    }
    config.channels.position &= !args.no_position;
    config.channels.rotation &= !args.no_rotation;
    config.channels.scaling &= !args.no_scaling;

    Ok(config)
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let mut scene = SceneDocument::open(&args.scene)
        .with_context(|| format!("Failed to open {}", args.scene.display()))?;
    let config = build_config(&args, &scene)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.scene.with_extension("cs"));

    let stats = scene
        .export_to_path(&args.objects, &config, &output)
        .with_context(|| format!("Export to {} failed", output.display()))?;

    println!(
        "Exported {} object(s) to {} ({} of {} frames kept)",
        stats.objects,
        output.display(),
        stats.instructions,
        stats.frames_sampled
    );
    for seq in &stats.sequences {
        println!(
            "  {:<24} frames {}..{} ({} instructions)",
            seq.class_name, seq.kept.keep_start, seq.kept.keep_end, seq.instructions
        );
    }
    Ok(())
}

fn cmd_info(path: &Path) -> Result<()> {
    let scene = SceneDocument::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let tl = scene.timeline.timeline();

    println!("Scene: {}", path.display());
    println!(
        "Timeline: {}..{} @ {} fps (current frame {})",
        tl.frame_start,
        tl.frame_end,
        tl.frame_rate(),
        scene.timeline.frame_current
    );
    println!();
    println!("Objects: {}", scene.objects.len());
    for obj in &scene.objects {
        let first = obj.keys.keys().next();
        let last = obj.keys.keys().next_back();
        let keys = match (first, last) {
            (Some(a), Some(b)) => format!("{} key(s), {}..{}", obj.keys.len(), a, b),
            _ => "no keys".to_string(),
        };
        println!(
            "  {} {:<24} {:<9} {}{}",
            if obj.selected { "*" } else { " " },
            obj.name(),
            format!("{:?}", obj.kind).to_lowercase(),
            keys,
            if obj.is_exportable() { "" } else { " (not exportable)" },
        );
    }
    Ok(())
}
