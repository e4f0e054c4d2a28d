use std::fmt;

use super::piece::{Piece, PieceKind};
use super::square::Square;

/// A move as produced by the rules engine or a protocol/book adapter.
/// Equality covers every field, including the capture flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub capture: bool,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(piece: Piece, from: Square, to: Square) -> Self {
        Self { piece, from, to, capture: false, promotion: None }
    }

    pub fn capturing(piece: Piece, from: Square, to: Square) -> Self {
        Self { piece, from, to, capture: true, promotion: None }
    }

    pub fn promoting(self, kind: PieceKind) -> Self { Self { promotion: Some(kind), ..self } }

    pub fn is_pawn_move(&self) -> bool { self.piece.kind == PieceKind::Pawn }

    pub fn is_pawn_double_advance(&self) -> bool {
        self.is_pawn_move() && self.from.rank().abs_diff(self.to.rank()) == 2
    }

    pub fn is_castling(&self) -> bool {
        self.piece.kind == PieceKind::King && self.from.file().abs_diff(self.to.file()) == 2
    }

    pub fn is_castling_kingside(&self) -> bool { self.is_castling() && self.to.file() == 6 }
    pub fn is_castling_queenside(&self) -> bool { self.is_castling() && self.to.file() == 2 }

    pub fn is_promotion(&self) -> bool { self.promotion.is_some() }

    /// Pure coordinate form, e.g. `e2e4` or `e7e8q`.
    pub fn coordinate(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion { s.push(kind.letter().to_ascii_lowercase()); }
        s
    }
}

// Long algebraic with piece letter, e.g. `Q h5xf7`, `e2-e4`, `e7-e8 Q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.piece.kind != PieceKind::Pawn {
            write!(f, "{} ", self.piece.kind.letter())?;
        }
        write!(f, "{}{}{}", self.from, if self.capture { 'x' } else { '-' }, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, " {}", kind.letter())?;
        }
        Ok(())
    }
}
