use crate::board::Position;
use crate::config::{EvalConfig, MaterialValues};
use crate::search::pst;
use cozy_chess::{Board, Color, Piece};

// Mate scoring helpers. No material/positional sum can reach MATE_SCORE, and
// SCORE_INFINITE bounds every search window.
pub const MATE_SCORE: i32 = 100_000;
pub const DRAW_SCORE: i32 = 0;
pub const SCORE_INFINITE: i32 = 1_000_000;
/// Scores within this many plies of `MATE_SCORE` are mates. Far deeper than
/// any search and far above any material sum.
pub const MATE_BAND: i32 = 1_000;

/// Score for a position where `side` to move is checkmated, White-positive.
#[inline]
pub fn mated_score(side: Color) -> i32 {
    if side == Color::White { -MATE_SCORE } else { MATE_SCORE }
}

/// Static evaluator in the absolute frame: positive favours White.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self { Self { config } }

    pub fn config(&self) -> &EvalConfig { &self.config }
    pub fn material(&self) -> &MaterialValues { &self.config.material }

    /// Full evaluation. Terminal positions short-circuit to the mate sentinel
    /// or to [`DRAW_SCORE`] before any summation.
    pub fn evaluate(&self, pos: &Position) -> i32 {
        let mobility = pos.legal_move_count();
        if mobility == 0 {
            return if pos.in_check() { mated_score(pos.side_to_move()) } else { DRAW_SCORE };
        }
        if pos.draw_rule().is_some() {
            return DRAW_SCORE;
        }
        let mobility = mobility as i32 * self.config.mobility_weight;
        let signed = if pos.side_to_move() == Color::White { mobility } else { -mobility };
        self.material_and_placement(pos.board()) + signed
    }

    /// Material plus piece-square bonuses over every occupied square.
    pub fn material_and_placement(&self, board: &Board) -> i32 {
        let mut score = 0i32;
        for color in [Color::White, Color::Black] {
            let mut side = 0i32;
            for piece in Piece::ALL {
                let bb = board.colors(color) & board.pieces(piece);
                let base = self.config.material.value(piece);
                for sq in bb {
                    side += base + pst::value(piece, color, sq);
                }
            }
            score += if color == Color::White { side } else { -side };
        }
        score
    }
}

// Side-agnostic material in centipawns: positive means White has more material.
pub fn material_balance(board: &Board, material: &MaterialValues) -> i32 {
    Piece::ALL
        .iter()
        .map(|&p| {
            let w = (board.colors(Color::White) & board.pieces(p)).len() as i32;
            let b = (board.colors(Color::Black) & board.pieces(p)).len() as i32;
            (w - b) * material.value(p)
        })
        .sum()
}
