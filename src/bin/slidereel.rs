use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

#[derive(Parser, Debug)]
#[command(name = "slidereel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the allocated timeline as JSON.
    Plan(InputArgs),
    /// Print one evaluated frame as JSON.
    Frame(FrameArgs),
    /// Write every evaluated frame as JSON lines.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Composition config JSON; built-in ladder defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Content data JSON.
    #[arg(long)]
    data: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,

    /// Evaluate frames on a rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn load(args: &InputArgs) -> anyhow::Result<slidereel::Evaluator> {
    let config = match &args.config {
        Some(path) => slidereel::CompositionConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => slidereel::CompositionConfig::default(),
    };
    let doc = slidereel::ContentDocument::from_path(&args.data)
        .with_context(|| format!("load data '{}'", args.data.display()))?;
    let ev = slidereel::Evaluator::new(config, doc.groups)
        .with_context(|| format!("build timeline for '{}'", args.data.display()))?;
    Ok(ev)
}

fn cmd_plan(args: InputArgs) -> anyhow::Result<()> {
    let ev = load(&args)?;
    let json = serde_json::to_string_pretty(ev.timeline()).context("serialize timeline")?;
    println!("{json}");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let ev = load(&args.input)?;
    let frame = ev.eval_frame(slidereel::FrameIndex(args.frame))?;
    let json = serde_json::to_string_pretty(&frame).context("serialize frame")?;
    println!("{json}");
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let ev = load(&args.input)?;
    let range = ev.timeline().range();
    let frames = if args.parallel {
        ev.eval_range_parallel(range, args.threads)?
    } else {
        ev.eval_range(range)?
    };

    create_parent_dir(&args.out)?;
    let f = std::fs::File::create(&args.out)
        .with_context(|| format!("create '{}'", args.out.display()))?;
    let mut w = BufWriter::new(f);
    for frame in &frames {
        serde_json::to_writer(&mut w, frame).context("serialize frame")?;
        w.write_all(b"\n")
            .with_context(|| format!("write '{}'", args.out.display()))?;
    }
    w.flush()
        .with_context(|| format!("write '{}'", args.out.display()))?;

    tracing::info!(frames = frames.len(), out = %args.out.display(), "dump complete");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
