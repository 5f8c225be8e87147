use crate::board::Position;
use crate::config::EngineConfig;
use crate::search::eval::MATE_BAND;
use crate::search::{Searcher, MATE_SCORE};
use cozy_chess::Color;
use log::warn;
use std::io::{self, BufRead, Write};

pub const DEFAULT_GO_DEPTH: u32 = 3;

/// Minimal UCI front-end: `position` and `go depth N` drive the searcher.
pub struct UciEngine {
    pos: Position,
    searcher: Searcher,
}

impl Default for UciEngine {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl UciEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { pos: Position::startpos(), searcher: Searcher::new(config) }
    }

    pub fn position(&self) -> &Position { &self.pos }

    fn cmd_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name Plywood {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author Plywood Team")?;
        writeln!(out, "uciok")
    }

    fn cmd_position(&mut self, args: &str) {
        // Supports: 'position startpos [moves ...]' and 'position fen <fen> [moves ...]'
        let mut tokens = args.split_whitespace();
        let base = match tokens.next() {
            Some("startpos") => Position::startpos(),
            Some("fen") => {
                let fen_fields: Vec<&str> = tokens.by_ref().take_while(|t| *t != "moves").collect();
                match Position::from_fen(&fen_fields.join(" ")) {
                    Ok(p) => p,
                    Err(e) => { warn!("{e}"); return; }
                }
            }
            _ => { warn!("unsupported position command: {args}"); return; }
        };
        let mut pos = base;
        for tok in tokens.filter(|t| *t != "moves") {
            if let Err(e) = pos.make_move_uci(tok) {
                warn!("{e}; ignoring position command");
                return;
            }
        }
        self.pos = pos;
    }

    fn cmd_go<W: Write>(&mut self, args: &str, out: &mut W) -> io::Result<()> {
        // Support minimal: go depth N (other limits fall back to the default depth)
        let mut depth = DEFAULT_GO_DEPTH;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            if tok == "depth" {
                if let Some(d) = tokens.next().and_then(|s| s.parse::<u32>().ok()) { depth = d; }
            }
        }
        let res = self.searcher.search(&mut self.pos, depth);
        let Some(best) = res.best_move else {
            return writeln!(out, "bestmove 0000");
        };
        let stm_score = if self.pos.side_to_move() == Color::White { res.score } else { -res.score };
        writeln!(out, "info depth {} score {} nodes {} pv {}", res.depth, uci_score(stm_score), res.nodes, best)?;
        writeln!(out, "bestmove {best}")
    }

    /// Handles one command line; returns `false` on `quit`.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        match line {
            "" => {}
            "uci" => self.cmd_uci(out)?,
            "isready" => writeln!(out, "readyok")?,
            "ucinewgame" => self.pos = Position::startpos(),
            "quit" => return Ok(false),
            "stop" => {}
            _ => {
                if let Some(rest) = line.strip_prefix("position ") {
                    self.cmd_position(rest);
                } else if line == "go" {
                    self.cmd_go("", out)?;
                } else if let Some(rest) = line.strip_prefix("go ") {
                    self.cmd_go(rest, out)?;
                } else {
                    warn!("unknown command: {line}");
                }
            }
        }
        out.flush()?;
        Ok(true)
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        for line in input.lines() {
            if !self.handle_line(&line?, out)? { break; }
        }
        Ok(())
    }

    pub fn run_loop(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run(stdin.lock(), &mut stdout.lock())
    }
}

/// Formats a side-to-move score as `cp N` or `mate N` (in moves).
pub fn uci_score(score: i32) -> String {
    let dist = MATE_SCORE - score.abs();
    if (0..=MATE_BAND).contains(&dist) {
        let moves = (dist + 1) / 2;
        if score > 0 { format!("mate {moves}") } else { format!("mate -{moves}") }
    } else {
        format!("cp {score}")
    }
}
