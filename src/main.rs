use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use plywood::selfplay::{generate_games, write_jsonl, SelfPlayParams};
use plywood::uci::{uci_score, UciEngine};
use plywood::{EngineConfig, Position, Searcher};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plywood", author, version, about = "Fixed-depth alpha-beta chess engine", long_about = None)]
struct Cli {
    /// JSON file overriding evaluation and search settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Speak UCI on stdin/stdout (default)
    Uci,
    /// Print the best move for a position
    Best {
        /// FEN string or "startpos"
        #[arg(long, default_value = "startpos")]
        fen: String,
        #[arg(long, default_value_t = 3)]
        depth: u32,
        /// UCI moves to play from the FEN first
        #[arg(long, num_args = 0..)]
        moves: Vec<String>,
    },
    /// Play engine (or random) games and write them as JSONL
    Selfplay {
        #[arg(long, default_value_t = 1)]
        games: usize,
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
        #[arg(long, default_value_t = 2)]
        depth: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Pick uniformly random moves instead of searching
        #[arg(long)]
        random: bool,
        /// FEN/EPD file of start positions
        #[arg(long)]
        openings: Option<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::from_json_file(p).with_context(|| format!("loading config {}", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    match cli.command.unwrap_or(Command::Uci) {
        Command::Uci => {
            let mut engine = UciEngine::new(config);
            engine.run_loop()?;
        }
        Command::Best { fen, depth, moves } => {
            let mut pos = if fen == "startpos" {
                Position::set_from_start_and_moves(&moves)?
            } else {
                let mut pos = Position::from_fen(&fen)?;
                for m in &moves {
                    pos.make_move_uci(m)?;
                }
                pos
            };
            let mut searcher = Searcher::new(config);
            let res = searcher.search(&mut pos, depth);
            match res.best_move {
                Some(mv) => println!("bestmove {mv} white {} depth {} nodes {}", uci_score(res.score), res.depth, res.nodes),
                None => println!("bestmove 0000 ({:?})", pos.status()),
            }
        }
        Command::Selfplay { games, max_plies, depth, seed, random, openings, out } => {
            let params = SelfPlayParams {
                games,
                max_plies,
                use_engine: !random,
                depth,
                seed,
                config,
                openings_path: openings,
            };
            let records = generate_games(&params)?;
            match out {
                Some(path) => {
                    let f = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
                    write_jsonl(&records, BufWriter::new(f))?;
                }
                None => write_jsonl(&records, io::stdout().lock())?,
            }
        }
    }
    Ok(())
}
