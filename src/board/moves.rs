use cozy_chess::{Board, Color, File, Piece, Square};
use std::fmt;

/// A legal move annotated with the moving and captured pieces.
///
/// Produced only by [`crate::board::Position::legal_moves`]; the raw
/// cozy-chess move is kept for replay against the same position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    raw: cozy_chess::Move,
    piece: Piece,
    captured: Option<Piece>,
    castle: bool,
}

pub(crate) fn opponent(color: Color) -> Color {
    if color == Color::White { Color::Black } else { Color::White }
}

impl Move {
    pub(crate) fn annotate(board: &Board, raw: cozy_chess::Move, piece: Piece) -> Self {
        let us = board.side_to_move();
        let target = board.color_on(raw.to);
        // cozy-chess encodes castling as the king capturing its own rook
        let castle = piece == Piece::King && target == Some(us);
        let captured = if target == Some(opponent(us)) {
            board.piece_on(raw.to)
        } else if piece == Piece::Pawn && raw.from.file() != raw.to.file() {
            // en passant
            Some(Piece::Pawn)
        } else {
            None
        };
        Self { raw, piece, captured, castle }
    }

    pub fn raw(&self) -> cozy_chess::Move { self.raw }
    pub fn from(&self) -> Square { self.raw.from }

    /// Square the moving piece lands on (the king's square for castling).
    pub fn to(&self) -> Square {
        if self.castle {
            let file = if (self.raw.to.file() as usize) > (self.raw.from.file() as usize) { File::G } else { File::C };
            Square::new(file, self.raw.from.rank())
        } else {
            self.raw.to
        }
    }

    pub fn promotion(&self) -> Option<Piece> { self.raw.promotion }
    pub fn piece(&self) -> Piece { self.piece }
    pub fn captured(&self) -> Option<Piece> { self.captured }
    pub fn is_capture(&self) -> bool { self.captured.is_some() }
    pub fn is_castle(&self) -> bool { self.castle }
}

fn promotion_char(piece: Piece) -> char {
    match piece {
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        _ => 'q',
    }
}

/// Standard UCI notation (`e1g1` for castling, `e7e8q` for promotions).
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(p) = self.promotion() {
            write!(f, "{}", promotion_char(p))?;
        }
        Ok(())
    }
}
