use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollsync::sim::{self, SimulationInput};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollsync", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive a simulated page through a list of scroll offsets and dump every frame as JSON.
    Simulate(SimulateArgs),
    /// Build the scene and print which parts are live, degraded or skipped.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input simulation JSON (scene config plus page layout).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Comma-separated scroll offsets, in pixels.
    #[arg(long, value_delimiter = ',', conflicts_with = "sweep")]
    offsets: Vec<f64>,

    /// Scroll from 0 to the end of the page in steps of this many pixels.
    #[arg(long)]
    sweep: Option<f64>,

    /// Output JSON path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input simulation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn read_input(path: &Path) -> anyhow::Result<SimulationInput> {
    SimulationInput::from_path(path)
        .with_context(|| format!("load simulation '{}'", path.display()))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let input = read_input(&args.in_path)?;

    let offsets = match args.sweep {
        Some(step) => sim::sweep(input.extent(), step)?,
        None if args.offsets.is_empty() => vec![0.0],
        None => args.offsets,
    };

    let output = sim::run(&input, &offsets);
    let json = serde_json::to_string_pretty(&output).context("serialize simulation output")?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {} ({} steps)", out.display(), output.steps.len());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let input = read_input(&args.in_path)?;
    let scene = input.build_scene();
    let json =
        serde_json::to_string_pretty(scene.report()).context("serialize scene report")?;
    println!("{json}");
    Ok(())
}
