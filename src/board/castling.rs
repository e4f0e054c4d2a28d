use super::piece::Side;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wing {
    Kingside,
    Queenside,
}

impl Wing {
    pub fn rook_file(self) -> u8 {
        match self { Wing::Kingside => 7, Wing::Queenside => 0 }
    }

    /// File the king lands on when castling to this wing.
    pub fn king_target_file(self) -> u8 {
        match self { Wing::Kingside => 6, Wing::Queenside => 2 }
    }

    /// File the rook lands on when castling to this wing.
    pub fn rook_target_file(self) -> u8 {
        match self { Wing::Kingside => 5, Wing::Queenside => 3 }
    }
}

/// Four independent castling flags packed in the low nibble:
/// bit 0 white kingside, 1 white queenside, 2 black kingside, 3 black queenside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    fn bit(side: Side, wing: Wing) -> u8 {
        let base = match side { Side::White => 0, Side::Black => 2 };
        let off = match wing { Wing::Kingside => 0, Wing::Queenside => 1 };
        1 << (base + off)
    }

    pub fn has(self, side: Side, wing: Wing) -> bool { self.0 & Self::bit(side, wing) != 0 }

    pub fn with(self, side: Side, wing: Wing) -> Self { CastlingRights(self.0 | Self::bit(side, wing)) }

    pub fn without(self, side: Side, wing: Wing) -> Self { CastlingRights(self.0 & !Self::bit(side, wing)) }

    pub fn without_side(self, side: Side) -> Self {
        self.without(side, Wing::Kingside).without(side, Wing::Queenside)
    }

    pub fn is_empty(self) -> bool { self.0 == 0 }

    pub fn bits(self) -> u8 { self.0 }

    /// FEN castling field, `-` when empty.
    pub fn to_fen(self) -> String {
        if self.is_empty() { return "-".to_string(); }
        let mut s = String::with_capacity(4);
        for (side, wing, c) in [
            (Side::White, Wing::Kingside, 'K'),
            (Side::White, Wing::Queenside, 'Q'),
            (Side::Black, Wing::Kingside, 'k'),
            (Side::Black, Wing::Queenside, 'q'),
        ] {
            if self.has(side, wing) { s.push(c); }
        }
        s
    }
}
