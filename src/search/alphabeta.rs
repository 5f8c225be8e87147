use crate::board::{Move, Position};
use crate::config::{EngineConfig, OrderingPolicy, SearchConfig};
use crate::search::eval::{Evaluator, MATE_SCORE, SCORE_INFINITE};
use crate::search::order::MoveOrderer;

/// The (alpha, beta) pair threaded through the recursion. Alpha is what the
/// maximizer (White) can already guarantee, beta what the minimizer can.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub alpha: i32,
    pub beta: i32,
}

impl Window {
    pub const FULL: Window = Window { alpha: -SCORE_INFINITE, beta: SCORE_INFINITE };

    pub fn new(alpha: i32, beta: i32) -> Self { Self { alpha, beta } }
}

impl Default for Window {
    fn default() -> Self { Self::FULL }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Fixed-depth minimax searcher with alpha-beta pruning.
///
/// Scores are White-positive throughout: White nodes maximize, Black nodes
/// minimize. The position is mutated in place and every applied move is held
/// by an [`crate::board::Applied`] guard, so it is undone on every exit from
/// the frame that made it, including cutoffs.
#[derive(Clone, Debug)]
pub struct Searcher {
    pub(crate) evaluator: Evaluator,
    pub(crate) orderer: MoveOrderer,
    pub(crate) config: SearchConfig,
    pub(crate) stats: SearchStats,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl Searcher {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            evaluator: Evaluator::new(config.eval),
            orderer: MoveOrderer::new(config.eval.material, config.search.check_bonus),
            config: config.search,
            stats: SearchStats::default(),
        }
    }

    pub fn evaluator(&self) -> &Evaluator { &self.evaluator }
    pub fn orderer(&self) -> &MoveOrderer { &self.orderer }
    pub fn config(&self) -> &SearchConfig { &self.config }
    pub fn stats(&self) -> SearchStats { self.stats }
    pub fn reset_stats(&mut self) { self.stats = SearchStats::default(); }
    pub fn set_ordering(&mut self, ordering: OrderingPolicy) { self.config.ordering = ordering; }

    /// Static value of a leaf found `ply` plies below the search root. Mate
    /// scores shrink by the distance so that faster mates rank higher.
    pub(crate) fn leaf_value(&self, pos: &Position, ply: u32) -> i32 {
        let v = self.evaluator.evaluate(pos);
        let ply = ply as i32;
        if v == MATE_SCORE {
            v - ply
        } else if v == -MATE_SCORE {
            v + ply
        } else {
            v
        }
    }

    /// Arranges a node's moves according to the configured policy. Ranking is
    /// always applied at the root and at nodes wider than the threshold.
    pub(crate) fn arrange(&self, pos: &mut Position, mut moves: Vec<Move>, root: bool) -> Vec<Move> {
        match self.config.ordering {
            OrderingPolicy::Heuristic if root || moves.len() > self.config.order_threshold => {
                self.orderer.order(pos, moves)
            }
            OrderingPolicy::Heuristic | OrderingPolicy::Generation => moves,
            OrderingPolicy::Reversed => {
                moves.reverse();
                moves
            }
        }
    }

    /// Value of the subtree under `pos` searched `depth` plies deep.
    pub fn alphabeta(&mut self, pos: &mut Position, depth: u32, window: Window, maximizing: bool, ply: u32) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 {
            return self.leaf_value(pos, ply);
        }
        let moves = pos.legal_moves();
        if moves.is_empty() || pos.draw_rule().is_some() {
            return self.leaf_value(pos, ply);
        }
        let moves = self.arrange(pos, moves, false);

        let Window { mut alpha, mut beta } = window;
        if maximizing {
            let mut best = -SCORE_INFINITE;
            for mv in moves {
                let score = {
                    let mut child = pos.apply(mv);
                    self.alphabeta(&mut child, depth - 1, Window { alpha, beta }, false, ply + 1)
                };
                best = best.max(score);
                alpha = alpha.max(best);
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = SCORE_INFINITE;
            for mv in moves {
                let score = {
                    let mut child = pos.apply(mv);
                    self.alphabeta(&mut child, depth - 1, Window { alpha, beta }, true, ply + 1)
                };
                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }
}
