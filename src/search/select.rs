use crate::board::{Move, Position};
use crate::search::alphabeta::{Searcher, Window};
use crate::search::eval::SCORE_INFINITE;
use cozy_chess::Color;
use log::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// White-positive score of the chosen move (the static value when there is no move).
    pub score: i32,
    /// Depth actually searched after clamping.
    pub depth: u32,
    pub nodes: u64,
}

impl Searcher {
    /// Clamps a requested depth into `1..=max_depth`.
    pub fn clamp_depth(&self, depth: u32) -> u32 {
        depth.clamp(1, self.config.max_depth.max(1))
    }

    pub fn best_move(&mut self, pos: &mut Position, depth: u32) -> Option<Move> {
        self.search(pos, depth).best_move
    }

    /// Picks the move for the side to move. White maximizes, Black minimizes.
    ///
    /// Each root move is searched with a fresh full window so its value is
    /// exact. The best move is seeded from the head of the ranked list and
    /// only replaced on strict improvement, so ties go to the earlier move.
    pub fn search(&mut self, pos: &mut Position, depth: u32) -> SearchResult {
        self.reset_stats();
        let requested = depth;
        let depth = self.clamp_depth(requested);
        if depth != requested {
            warn!("search depth {requested} clamped to {depth}");
        }

        let moves = pos.legal_moves();
        let ranked = self.arrange(pos, moves, true);
        let Some(&first) = ranked.first() else {
            let score = self.leaf_value(pos, 0);
            debug!("no legal move in {} (score {score})", pos.fen());
            return SearchResult { best_move: None, score, depth, nodes: self.stats.nodes };
        };

        let maximizing = pos.side_to_move() == Color::White;
        let mut best_move = first;
        let mut best_score = if maximizing { -SCORE_INFINITE } else { SCORE_INFINITE };
        for mv in ranked {
            let score = {
                let mut child = pos.apply(mv);
                self.alphabeta(&mut child, depth - 1, Window::FULL, !maximizing, 1)
            };
            trace!("root {mv}: {score}");
            let improved = if maximizing { score > best_score } else { score < best_score };
            if improved {
                best_score = score;
                best_move = mv;
            }
        }
        debug!(
            "depth {depth} bestmove {best_move} score {best_score} nodes {} cutoffs {}",
            self.stats.nodes, self.stats.cutoffs
        );
        SearchResult { best_move: Some(best_move), score: best_score, depth, nodes: self.stats.nodes }
    }
}
