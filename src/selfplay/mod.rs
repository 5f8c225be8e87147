use crate::board::{GameStatus, Move, Position};
use crate::config::EngineConfig;
use crate::error::PositionError;
use crate::search::eval::material_balance;
use crate::search::Searcher;
use cozy_chess::Color;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub use_engine: bool,
    pub depth: u32,
    pub seed: u64,
    pub config: EngineConfig,
    pub openings_path: Option<PathBuf>, // optional path to FEN list (one per line)
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 1,
            max_plies: 200,
            use_engine: true,
            depth: 2,
            seed: 0,
            config: EngineConfig::default(),
            openings_path: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub start_fen: String,
    pub moves: Vec<String>,
    pub result: i8, // 1 white win, 0 draw or unfinished, -1 black win
    pub status: GameStatus,
}

pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>, PositionError> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    let openings = load_openings(params);
    let mut searcher = Searcher::new(params.config);
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let mut pos = if openings.is_empty() {
            Position::startpos()
        } else {
            openings[rng.gen_range(0..openings.len())].clone()
        };
        let mut record = GameRecord { start_fen: pos.fen(), moves: Vec::new(), result: 0, status: GameStatus::Ongoing };
        while record.moves.len() < params.max_plies {
            let status = pos.status();
            if status.is_terminal() {
                record.status = status;
                if status == GameStatus::Checkmate {
                    record.result = if pos.side_to_move() == Color::White { -1 } else { 1 };
                }
                break;
            }
            let mv = if params.use_engine {
                searcher.best_move(&mut pos, params.depth)
            } else {
                select_random_move(&pos, &mut rng)
            };
            let Some(mv) = mv else { break };
            record.moves.push(mv.to_string());
            pos.make_move(mv)?;
        }
        debug!(
            "game {gi}: {} plies, {:?}, material {}",
            record.moves.len(),
            record.status,
            material_balance(pos.board(), &params.config.eval.material)
        );
        games.push(record);
    }
    info!("generated {} games", games.len());
    Ok(games)
}

fn select_random_move(pos: &Position, rng: &mut SmallRng) -> Option<Move> {
    let moves = pos.legal_moves();
    if moves.is_empty() { None } else { Some(moves[rng.gen_range(0..moves.len())]) }
}

fn load_openings(params: &SelfPlayParams) -> Vec<Position> {
    let mut out = Vec::new();
    let Some(ref p) = params.openings_path else { return out };
    let text = match std::fs::read_to_string(p) {
        Ok(t) => t,
        Err(e) => {
            log::warn!("cannot read openings {}: {e}", p.display());
            return out;
        }
    };
    for line in text.lines() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') { continue; }
        // Support EPD (4 fields) by padding halfmove/fullmove
        let parts: Vec<&str> = raw.split_whitespace().collect();
        let fen = if parts.len() >= 6 {
            parts[0..6].join(" ")
        } else if parts.len() >= 4 {
            let mut v = parts[0..4].to_vec();
            v.push("0");
            v.push("1");
            v.join(" ")
        } else {
            raw.to_string()
        };
        match Position::from_fen(&fen) {
            Ok(pos) => out.push(pos),
            Err(e) => log::warn!("skipping opening: {e}"),
        }
    }
    out
}

/// Writes one JSON object per game.
pub fn write_jsonl<W: Write>(games: &[GameRecord], mut out: W) -> std::io::Result<()> {
    for g in games {
        serde_json::to_writer(&mut out, g)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

pub fn read_jsonl<R: BufRead>(input: R) -> std::io::Result<Vec<GameRecord>> {
    let mut games = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        games.push(serde_json::from_str(&line)?);
    }
    Ok(games)
}

/// Replays a record's moves from its start position.
pub fn replay(game: &GameRecord) -> Result<Position, PositionError> {
    let mut pos = Position::from_fen(&game.start_fen)?;
    for m in &game.moves { pos.make_move_uci(m)?; }
    Ok(pos)
}
