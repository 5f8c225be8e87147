use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use plywood::{EngineConfig, Position, Searcher};
use rayon::prelude::*;
use serde::Deserialize;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct Rec { fen: String, best: String }

#[derive(Parser, Debug)]
#[command(name = "accept", about = "Run a best-move suite (JSONL of {fen, best}) against the searcher")]
struct Args {
    /// Suite file, one JSON object per line
    #[arg(value_name = "SUITE")]
    suite: PathBuf,
    #[arg(long, default_value_t = 3)]
    depth: u32,
    /// JSON engine configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Exit non-zero when any case fails
    #[arg(long, default_value_t = false)]
    strict: bool,
}

enum Outcome {
    Ok { nodes: u64 },
    Miss { idx: usize, fen: String, got: String, expect: String },
}

fn load_jsonl(path: &PathBuf) -> Result<Vec<Rec>> {
    let f = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (i, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        let l = line.trim();
        if l.is_empty() || l.starts_with('#') { continue; }
        let rec: Rec = serde_json::from_str(l).with_context(|| format!("line {}", i + 1))?;
        out.push(rec);
    }
    Ok(out)
}

fn solve(idx: usize, case: &Rec, depth: u32, config: EngineConfig) -> Result<Outcome> {
    let mut pos = Position::from_fen(&case.fen)?;
    let mut searcher = Searcher::new(config);
    let res = searcher.search(&mut pos, depth);
    let got = res.best_move.map(|m| m.to_string()).unwrap_or_else(|| "0000".into());
    if got == case.best {
        Ok(Outcome::Ok { nodes: res.nodes })
    } else {
        Ok(Outcome::Miss { idx, fen: case.fen.clone(), got, expect: case.best.clone() })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = match &args.config {
        Some(p) => EngineConfig::from_json_file(p)?,
        None => EngineConfig::default(),
    };
    let cases = load_jsonl(&args.suite)?;

    let pb = ProgressBar::new(cases.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {elapsed_precise}")
            .context("progress template")?,
    );

    let t0 = Instant::now();
    let outcomes: Vec<Outcome> = cases
        .par_iter()
        .enumerate()
        .map(|(i, case)| {
            let r = solve(i, case, args.depth, config);
            pb.inc(1);
            r
        })
        .collect::<Result<_>>()?;
    pb.finish_and_clear();

    let mut failures = Vec::new();
    let mut nodes = 0u64;
    for o in outcomes {
        match o {
            Outcome::Ok { nodes: n } => nodes += n,
            Outcome::Miss { idx, fen, got, expect } => failures.push(format!("idx={idx} fen={fen} got={got} expect={expect}")),
        }
    }
    let total = t0.elapsed().as_secs_f64();
    println!(
        "summary: cases={} passed={} elapsed={:.3}s nodes={} depth={}",
        cases.len(),
        cases.len() - failures.len(),
        total,
        nodes,
        args.depth
    );
    if !failures.is_empty() {
        eprintln!("failures ({}):\n{}", failures.len(), failures.join("\n"));
        if args.strict {
            bail!("{} of {} cases failed", failures.len(), cases.len());
        }
    }
    Ok(())
}
