use crate::board::moves::Move;
use crate::error::PositionError;
use cozy_chess::{Board as CozyBoard, Color, Piece, Rank, Square};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Halfmove clock value at which the fifty-move rule draws the game.
pub const FIFTY_MOVE_PLIES: u8 = 100;

/// Occurrences of one position that make a repetition draw.
pub const REPETITION_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Checkmate,
    Stalemate,
    Repetition,
    InsufficientMaterial,
    FiftyMoveRule,
    Ongoing,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool { self != GameStatus::Ongoing }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate | GameStatus::Repetition | GameStatus::InsufficientMaterial | GameStatus::FiftyMoveRule
        )
    }
}

/// Mutable game state with make/unmake on top of cozy-chess.
///
/// cozy-chess boards are copy-on-play, so every made move pushes the prior
/// board onto `stack`; undo pops it back, which restores castling rights,
/// en-passant file, clocks and hash exactly. The stack doubles as the game
/// history used for repetition detection.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    stack: Vec<CozyBoard>,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(CozyBoard::default())
    }

    pub fn from_board(board: CozyBoard) -> Self {
        Self { board, stack: Vec::with_capacity(128) }
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(Self::from_board)
            .map_err(|e| PositionError::InvalidFen(format!("{fen:?}: {e:?}")))
    }

    pub fn set_from_start_and_moves(moves: &[String]) -> Result<Self, PositionError> {
        let mut pos = Self::startpos();
        for m in moves { pos.make_move_uci(m)?; }
        Ok(pos)
    }

    pub fn board(&self) -> &CozyBoard { &self.board }
    pub fn fen(&self) -> String { format!("{}", self.board) }
    pub fn hash(&self) -> u64 { self.board.hash() }
    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }
    pub fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    /// Number of moves made on this position that can still be undone.
    pub fn history_len(&self) -> usize { self.stack.len() }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.board.generate_moves(|ml| {
            let piece = ml.piece;
            for m in ml { out.push(Move::annotate(&self.board, m, piece)); }
            false
        });
        out
    }

    pub fn legal_move_count(&self) -> usize {
        let mut ct = 0usize;
        self.board.generate_moves(|ml| { ct += ml.len(); false });
        ct
    }

    pub fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|_| { any = true; true });
        any
    }

    /// Looks up a legal move by UCI text. Castling is accepted both as the
    /// king's step (`e1g1`) and as king-takes-rook (`e1h1`).
    pub fn parse_uci(&self, text: &str) -> Result<Move, PositionError> {
        let text = text.trim();
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(PositionError::MalformedMove(text.to_string()));
        }
        self.legal_moves()
            .into_iter()
            .find(|m| m.to_string() == text || format!("{}", m.raw()) == text)
            .ok_or_else(|| PositionError::IllegalMove(text.to_string()))
    }

    /// Applies a move, rejecting it if it is not legal here.
    pub fn make_move(&mut self, mv: Move) -> Result<(), PositionError> {
        if !self.board.is_legal(mv.raw()) {
            return Err(PositionError::IllegalMove(mv.to_string()));
        }
        self.push(mv);
        Ok(())
    }

    pub fn make_move_uci(&mut self, text: &str) -> Result<(), PositionError> {
        let mv = self.parse_uci(text)?;
        self.make_move(mv)
    }

    pub fn unmake_move(&mut self) -> Result<(), PositionError> {
        match self.stack.pop() {
            Some(prev) => { self.board = prev; Ok(()) }
            None => Err(PositionError::NothingToUndo),
        }
    }

    /// Applies a move taken from [`Position::legal_moves`] of this same
    /// position and returns a guard that undoes it when dropped.
    pub fn apply(&mut self, mv: Move) -> Applied<'_> {
        debug_assert!(self.board.is_legal(mv.raw()), "move {mv} is not legal in {}", self.board);
        let depth = self.stack.len();
        self.push(mv);
        Applied { pos: self, depth }
    }

    fn push(&mut self, mv: Move) {
        self.stack.push(self.board.clone());
        self.board.play_unchecked(mv.raw());
    }

    pub fn status(&self) -> GameStatus {
        if !self.has_legal_moves() {
            return if self.in_check() { GameStatus::Checkmate } else { GameStatus::Stalemate };
        }
        self.draw_rule().unwrap_or(GameStatus::Ongoing)
    }

    /// Draw rules that do not depend on move generation. Does not detect
    /// stalemate; callers that need it check for legal moves first.
    pub fn draw_rule(&self) -> Option<GameStatus> {
        if self.board.halfmove_clock() >= FIFTY_MOVE_PLIES {
            return Some(GameStatus::FiftyMoveRule);
        }
        if self.insufficient_material() {
            return Some(GameStatus::InsufficientMaterial);
        }
        if self.repetition_count() >= REPETITION_COUNT {
            return Some(GameStatus::Repetition);
        }
        None
    }

    pub fn is_checkmate(&self) -> bool { self.status() == GameStatus::Checkmate }
    pub fn is_stalemate(&self) -> bool { self.status() == GameStatus::Stalemate }
    pub fn is_draw(&self) -> bool { self.status().is_draw() }

    /// Occurrences of the current position since the last irreversible move,
    /// including the current one.
    pub fn repetition_count(&self) -> usize {
        let window = self.board.halfmove_clock() as usize;
        let target = en_passant_target(&self.board);
        1 + self
            .stack
            .iter()
            .rev()
            .take(window)
            .filter(|b| same_position(&self.board, target, b))
            .count()
    }

    /// K v K, K+minor v K, and bishops-only endings where every bishop
    /// stands on the same square colour.
    pub fn insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(Piece::Pawn) | b.pieces(Piece::Rook) | b.pieces(Piece::Queen);
        if !heavy.is_empty() { return false; }
        let knights = b.pieces(Piece::Knight);
        let bishops = b.pieces(Piece::Bishop);
        if knights.len() + bishops.len() <= 1 { return true; }
        if !knights.is_empty() { return false; }
        let mut colours = bishops.into_iter().map(|sq| (sq.file() as usize + sq.rank() as usize) % 2);
        match colours.next() {
            Some(first) => colours.all(|c| c == first),
            None => true,
        }
    }
}

/// Square an en-passant capture can land on, if one is legal. cozy-chess
/// keeps the file after every double push, capturable or not.
fn en_passant_target(board: &CozyBoard) -> Option<Square> {
    let file = board.en_passant()?;
    let rank = if board.side_to_move() == Color::White { Rank::Sixth } else { Rank::Third };
    let target = Square::new(file, rank);
    let mut capturable = false;
    board.generate_moves(|ml| {
        if ml.piece == Piece::Pawn {
            capturable = ml.into_iter().any(|m| m.to == target);
        }
        capturable
    });
    capturable.then_some(target)
}

/// Repetition identity: placement, side to move, castling rights and a
/// playable en-passant capture. Clocks are ignored.
fn same_position(board: &CozyBoard, target: Option<Square>, other: &CozyBoard) -> bool {
    if board.en_passant().is_none() && other.en_passant().is_none() {
        return board.hash() == other.hash();
    }
    board.side_to_move() == other.side_to_move()
        && Color::ALL.iter().all(|&c| board.colors(c) == other.colors(c) && board.castle_rights(c) == other.castle_rights(c))
        && Piece::ALL.iter().all(|&p| board.pieces(p) == other.pieces(p))
        && target == en_passant_target(other)
}

/// A move held applied on a [`Position`]; dropping it restores the position
/// to exactly what it was before [`Position::apply`], whatever was made or
/// unmade through the guard in between.
pub struct Applied<'a> {
    pos: &'a mut Position,
    depth: usize,
}

impl Deref for Applied<'_> {
    type Target = Position;
    fn deref(&self) -> &Position { &*self.pos }
}

impl DerefMut for Applied<'_> {
    fn deref_mut(&mut self) -> &mut Position { &mut *self.pos }
}

impl Drop for Applied<'_> {
    fn drop(&mut self) {
        let stack = &mut self.pos.stack;
        debug_assert!(stack.len() >= self.depth, "moves below an applied guard were unmade");
        if stack.len() > self.depth {
            stack.truncate(self.depth + 1);
            if let Some(prev) = stack.pop() { self.pos.board = prev; }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_kings_and_single_minor_are_insufficient() {
        for fen in ["8/8/4k3/8/8/3K4/8/8 w - - 0 1", "8/8/4k3/8/8/3KN3/8/8 w - - 0 1", "8/8/4kb2/8/8/3K4/8/8 b - - 0 1"] {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.status(), GameStatus::InsufficientMaterial, "{fen}");
        }
    }

    #[test]
    fn same_coloured_bishops_are_insufficient_opposite_are_not() {
        // c1 and f8 are both dark squares
        let same = Position::from_fen("5b2/8/4k3/8/8/3K4/8/2B5 w - - 0 1").unwrap();
        assert!(same.insufficient_material());
        // c1 dark, c8 light
        let opposite = Position::from_fen("2b5/8/4k3/8/8/3K4/8/2B5 w - - 0 1").unwrap();
        assert!(!opposite.insufficient_material());
        let knights = Position::from_fen("8/8/4k3/8/8/3K4/8/1NN5 w - - 0 1").unwrap();
        assert!(!knights.insufficient_material());
    }

    #[test]
    fn fifty_move_rule_fires_at_hundred_plies() {
        let live = Position::from_fen("8/8/4k3/8/8/3K4/8/R7 w - - 99 80").unwrap();
        assert_eq!(live.status(), GameStatus::Ongoing);
        let drawn = Position::from_fen("8/8/4k3/8/8/3K4/8/R7 w - - 100 80").unwrap();
        assert_eq!(drawn.status(), GameStatus::FiftyMoveRule);
    }

    #[test]
    fn guard_restores_after_moves_made_through_it() {
        let mut pos = Position::startpos();
        let before = pos.fen();
        let e4 = pos.parse_uci("e2e4").unwrap();
        {
            let mut g = pos.apply(e4);
            g.make_move_uci("e7e5").unwrap();
            g.make_move_uci("g1f3").unwrap();
        }
        assert_eq!(pos.fen(), before);
        assert_eq!(pos.history_len(), 0);
    }

    #[test]
    fn guard_keeps_earlier_moves_when_unmade_through() {
        let mut pos = Position::startpos();
        pos.make_move_uci("e2e4").unwrap();
        let after_e4 = (pos.fen(), pos.hash());
        let e5 = pos.parse_uci("e7e5").unwrap();
        {
            let mut g = pos.apply(e5);
            g.unmake_move().unwrap();
        }
        assert_eq!((pos.fen(), pos.hash()), after_e4);
        assert_eq!(pos.history_len(), 1);
    }

    #[test]
    fn uncapturable_en_passant_file_does_not_split_repetitions() {
        let mut pos = Position::startpos();
        for m in ["e2e4", "e7e5"] { pos.make_move_uci(m).unwrap(); }
        assert_eq!(pos.board().en_passant(), Some(cozy_chess::File::E));
        for m in ["g1f3", "g8f6", "f3g1", "f6g8"] { pos.make_move_uci(m).unwrap(); }
        assert_eq!(pos.repetition_count(), 2);
        for m in ["g1f3", "g8f6", "f3g1", "f6g8"] { pos.make_move_uci(m).unwrap(); }
        assert_eq!(pos.status(), GameStatus::Repetition);
    }

    #[test]
    fn capturable_en_passant_is_a_different_position() {
        // After d7d5 the e5 pawn can take en passant; once the chance is gone
        // the same placement no longer matches.
        let mut pos = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        pos.make_move_uci("d7d5").unwrap();
        for m in ["e1e2", "e8e7", "e2e1", "e7e8"] { pos.make_move_uci(m).unwrap(); }
        assert_eq!(pos.repetition_count(), 1);
    }

    #[test]
    fn guard_undoes_on_drop() {
        let mut pos = Position::startpos();
        let before = pos.fen();
        let mv = pos.parse_uci("e2e4").unwrap();
        {
            let child = pos.apply(mv);
            assert_eq!(child.side_to_move(), Color::Black);
            assert_eq!(child.history_len(), 1);
        }
        assert_eq!(pos.fen(), before);
        assert_eq!(pos.history_len(), 0);
    }
}
