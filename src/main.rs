use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dokchess::config::EngineConfig;
use dokchess::opening::SelectionMode;
use dokchess::xboard::XBoard;

#[derive(Parser, Debug)]
#[command(author, version, about = "DokChess engine speaking the XBoard protocol on stdin/stdout", long_about = None)]
struct Args {
    /// JSON engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Search depth in plies
    #[arg(long)]
    depth: Option<u32>,

    /// Search worker threads (default: available parallelism)
    #[arg(long)]
    threads: Option<usize>,

    /// Polyglot opening book
    #[arg(long, value_name = "FILE")]
    book: Option<PathBuf>,

    /// Book move selection: first, highest-weight or random
    #[arg(long, value_parser = parse_selection)]
    selection: Option<SelectionMode>,

    /// Seed for random book selection
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_selection(s: &str) -> Result<SelectionMode, String> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "first" => Ok(SelectionMode::First),
        "highest_weight" | "weight" => Ok(SelectionMode::HighestWeight),
        "random" => Ok(SelectionMode::Random),
        other => Err(format!("unknown selection mode: {other}")),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(d) = args.depth { cfg.depth = d; }
    if let Some(t) = args.threads { cfg.threads = Some(t); }
    if let Some(b) = args.book { cfg.book = Some(b); }
    if let Some(s) = args.selection { cfg.selection = s; }
    if let Some(s) = args.seed { cfg.seed = Some(s); }

    let engine = cfg.build_engine().context("building engine")?;
    let mut xboard = XBoard::new(engine, io::stdout());
    xboard.run(io::stdin().lock()).context("xboard session")?;
    Ok(())
}
