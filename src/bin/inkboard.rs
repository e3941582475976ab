use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "inkboard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded input trace and write the resulting drawing as a PNG.
    Replay(ReplayArgs),
    /// Validate a trace (and options) without drawing.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input trace JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Whiteboard options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Route raw events through an emulated low-latency pen subsystem.
    #[arg(long, default_value_t = false)]
    emulate_low_latency: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input trace JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Whiteboard options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn load_opts(path: Option<&PathBuf>) -> anyhow::Result<inkboard::WhiteboardOpts> {
    let opts = match path {
        Some(p) => inkboard::WhiteboardOpts::from_path(p)
            .with_context(|| format!("load options '{}'", p.display()))?,
        None => inkboard::WhiteboardOpts::default(),
    };
    Ok(opts.with_env_overrides())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let trace = inkboard::Trace::from_path(&args.in_path)
        .with_context(|| format!("load trace '{}'", args.in_path.display()))?;
    let opts = load_opts(args.opts.as_ref())?;

    let snapshot = inkboard::replay(&trace, opts, args.emulate_low_latency)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    snapshot
        .to_rgba_image()
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    println!(
        "wrote {} ({} painted pixels)",
        args.out.display(),
        snapshot.painted_pixels()
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let trace = inkboard::Trace::from_path(&args.in_path)
        .with_context(|| format!("load trace '{}'", args.in_path.display()))?;
    let opts = load_opts(args.opts.as_ref())?;
    let capable = trace
        .device
        .as_ref()
        .is_some_and(inkboard::DeviceInfo::supports_low_latency);

    println!(
        "ok: {}x{}, {} events, low-latency device: {}, disarm delay: {} ms",
        trace.width,
        trace.height,
        trace.events.len(),
        if capable { "yes" } else { "no" },
        opts.disarm_delay_ms
    );
    Ok(())
}
