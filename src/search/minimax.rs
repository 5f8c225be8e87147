//! Exhaustive minimax without pruning or ordering.
//!
//! Scores the same leaves as [`Searcher::alphabeta`], so the two must agree
//! on every root value; it exists to check that and to measure how many nodes
//! pruning saves.
use crate::board::Position;
use crate::search::alphabeta::Searcher;
use crate::search::eval::SCORE_INFINITE;

impl Searcher {
    pub fn minimax(&mut self, pos: &mut Position, depth: u32, maximizing: bool, ply: u32) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 {
            return self.leaf_value(pos, ply);
        }
        let moves = pos.legal_moves();
        if moves.is_empty() || pos.draw_rule().is_some() {
            return self.leaf_value(pos, ply);
        }
        let mut best = if maximizing { -SCORE_INFINITE } else { SCORE_INFINITE };
        for mv in moves {
            let mut child = pos.apply(mv);
            let score = self.minimax(&mut child, depth - 1, !maximizing, ply + 1);
            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        best
    }
}
