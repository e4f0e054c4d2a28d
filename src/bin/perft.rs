use dokchess::board::Position;
use dokchess::perft::{divide, perft, perft_parallel};

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for DokChess move generation")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print per-root-move counts
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clap::Parser;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let base = if args.fen == "startpos" {
        Position::starting()
    } else {
        Position::from_fen(&args.fen).context("invalid FEN")?
    };

    if args.divide {
        let mut total = 0u64;
        for (mv, n) in divide(&base, args.depth) {
            println!("{}: {n}", mv.coordinate());
            total += n;
        }
        println!("nodes: {total}");
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if args.threads <= 1 { perft(&base, args.depth) } else { perft_parallel(&base, args.depth) };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
