use std::fmt;

use crate::error::NotationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn other(self) -> Side {
        match self { Side::White => Side::Black, Side::Black => Side::White }
    }

    /// Rank direction pawns of this side advance in.
    pub fn forward(self) -> i8 {
        match self { Side::White => 1, Side::Black => -1 }
    }

    pub fn home_rank(self) -> u8 {
        match self { Side::White => 0, Side::Black => 7 }
    }

    pub fn index(self) -> usize {
        match self { Side::White => 0, Side::Black => 1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn, PieceKind::Knight, PieceKind::Bishop,
        PieceKind::Rook, PieceKind::Queen, PieceKind::King,
    ];

    /// Promotion choices in the order move generation emits them.
    pub const PROMOTIONS: [PieceKind; 4] = [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

    /// Upper-case letter (`P` for pawns).
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Result<Self, NotationError> {
        match c.to_ascii_uppercase() {
            'P' => Ok(PieceKind::Pawn),
            'N' => Ok(PieceKind::Knight),
            'B' => Ok(PieceKind::Bishop),
            'R' => Ok(PieceKind::Rook),
            'Q' => Ok(PieceKind::Queen),
            'K' => Ok(PieceKind::King),
            _ => Err(NotationError::PieceLetter(c)),
        }
    }

    pub fn index(self) -> usize { self as usize }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self { Self { kind, side } }

    pub fn is(self, kind: PieceKind, side: Side) -> bool { self.kind == kind && self.side == side }

    /// FEN letter: upper case for white, lower case for black.
    pub fn fen_char(self) -> char {
        let c = self.kind.letter();
        if self.side == Side::White { c } else { c.to_ascii_lowercase() }
    }

    pub fn from_fen_char(c: char) -> Result<Self, NotationError> {
        let kind = PieceKind::from_letter(c)?;
        let side = if c.is_ascii_uppercase() { Side::White } else { Side::Black };
        Ok(Self { kind, side })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}
