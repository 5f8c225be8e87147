use crate::board::{Move, Position};
use crate::config::MaterialValues;
use std::cmp::Reverse;

/// A move paired with its ordering score; lives only inside [`MoveOrderer::order`].
#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Ranks moves so that likely refutations are searched first.
#[derive(Clone, Debug)]
pub struct MoveOrderer {
    material: MaterialValues,
    check_bonus: i32,
}

impl Default for MoveOrderer {
    fn default() -> Self { Self::new(MaterialValues::default(), crate::config::CHECK_BONUS) }
}

impl MoveOrderer {
    pub fn new(material: MaterialValues, check_bonus: i32) -> Self {
        Self { material, check_bonus }
    }

    #[inline]
    fn mvv_lva(&self, mv: &Move) -> i32 {
        match mv.captured() {
            Some(victim) => self.material.value(victim) * 10 - self.material.value(mv.piece()),
            None => 0,
        }
    }

    /// Heuristic score of one move. The move is applied to detect check and
    /// undone before returning.
    pub fn score(&self, pos: &mut Position, mv: Move) -> i32 {
        let mut score = self.mvv_lva(&mv);
        if let Some(promo) = mv.promotion() {
            score += self.material.value(promo);
        }
        if pos.apply(mv).in_check() {
            score += self.check_bonus;
        }
        score
    }

    pub fn score_all(&self, pos: &mut Position, moves: Vec<Move>) -> Vec<ScoredMove> {
        moves.into_iter().map(|mv| ScoredMove { mv, score: self.score(pos, mv) }).collect()
    }

    /// Stable descending sort by score; the move set is unchanged.
    pub fn order(&self, pos: &mut Position, moves: Vec<Move>) -> Vec<Move> {
        if moves.len() <= 1 { return moves; }
        let mut scored = self.score_all(pos, moves);
        scored.sort_by_key(|s| Reverse(s.score));
        scored.into_iter().map(|s| s.mv).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orderer() -> MoveOrderer { MoveOrderer::new(MaterialValues::default(), 500) }

    #[test]
    fn pawn_takes_queen_beats_queen_takes_pawn() {
        // White pawn d4 can take the queen on e5; white queen h5 can take the pawn on h7.
        let mut pos = Position::from_fen("k7/7p/8/4q2Q/3P4/8/8/K7 w - - 0 1").unwrap();
        let pxq = pos.parse_uci("d4e5").unwrap();
        let qxp = pos.parse_uci("h5h7").unwrap();
        let o = orderer();
        assert_eq!(o.score(&mut pos, pxq), 9000 - 100);
        assert!(o.score(&mut pos, pxq) > o.score(&mut pos, qxp));
    }

    #[test]
    fn scoring_leaves_position_untouched() {
        let mut pos = Position::startpos();
        let before = pos.fen();
        let moves = pos.legal_moves();
        let ranked = orderer().order(&mut pos, moves.clone());
        assert_eq!(pos.fen(), before);
        assert_eq!(pos.history_len(), 0);
        assert_eq!(ranked.len(), moves.len());
    }
}
