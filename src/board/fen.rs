//! Forsyth-Edwards Notation for setup, tests and book lookups.
//!
//! All six fields are accepted; the halfmove and fullmove clocks are optional
//! and ignored since the position model carries no move counters. Castling
//! rights are taken as given and not re-derived from piece placement.

use super::castling::{CastlingRights, Wing};
use super::piece::{Piece, PieceKind, Side};
use super::position::Position;
use super::square::Square;
use crate::error::NotationError;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, NotationError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or_else(|| NotationError::fen(fen, "missing placement"))?;
        let active = fields.next().ok_or_else(|| NotationError::fen(fen, "missing side to move"))?;
        let castling = fields.next().unwrap_or("-");
        let ep = fields.next().unwrap_or("-");

        let mut pos = Position::empty();
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 { return Err(NotationError::fen(fen, "expected 8 ranks")); }
        for (i, row) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in row.chars() {
                if let Some(d) = c.to_digit(10) {
                    if !(1..=8).contains(&d) { return Err(NotationError::fen(fen, "bad empty-square count")); }
                    file += d as u8;
                } else {
                    let piece = Piece::from_fen_char(c).map_err(|_| NotationError::fen(fen, "bad piece letter"))?;
                    let sq = Square::new(rank, file).ok_or_else(|| NotationError::fen(fen, "rank too long"))?;
                    pos = pos.with_piece(sq, Some(piece));
                    file += 1;
                }
                if file > 8 { return Err(NotationError::fen(fen, "rank too long")); }
            }
            if file != 8 { return Err(NotationError::fen(fen, "rank too short")); }
        }
        for side in [Side::White, Side::Black] {
            match pos.pieces_of(side).filter(|(_, p)| p.kind == PieceKind::King).count() {
                0 => return Err(NotationError::fen(fen, "missing king")),
                1 => {}
                _ => return Err(NotationError::fen(fen, "more than one king per side")),
            }
        }

        let side = match active {
            "w" => Side::White,
            "b" => Side::Black,
            _ => return Err(NotationError::fen(fen, "side to move must be w or b")),
        };

        let mut rights = CastlingRights::NONE;
        if castling != "-" {
            for c in castling.chars() {
                rights = match c {
                    'K' => rights.with(Side::White, Wing::Kingside),
                    'Q' => rights.with(Side::White, Wing::Queenside),
                    'k' => rights.with(Side::Black, Wing::Kingside),
                    'q' => rights.with(Side::Black, Wing::Queenside),
                    _ => return Err(NotationError::fen(fen, "bad castling field")),
                };
            }
        }

        let en_passant = if ep == "-" {
            None
        } else {
            Some(ep.parse::<Square>().map_err(|_| NotationError::fen(fen, "bad en passant square"))?)
        };

        Ok(pos.with_side_to_move(side).with_castling(rights).with_en_passant(en_passant))
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(80);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                match self.piece_at(Square::at(rank, file)) {
                    Some(p) => {
                        if empty > 0 { out.push(char::from(b'0' + empty)); empty = 0; }
                        out.push(p.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 { out.push(char::from(b'0' + empty)); }
            if rank > 0 { out.push('/'); }
        }
        out.push(' ');
        out.push(if self.side_to_move() == Side::White { 'w' } else { 'b' });
        out.push(' ');
        out.push_str(&self.castling().to_fen());
        out.push(' ');
        match self.en_passant() {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }
        out.push_str(" 0 1");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_fen_matches_starting_position() {
        let p = Position::from_fen(STARTING_FEN).unwrap();
        assert_eq!(p, Position::starting());
        assert_eq!(p.to_fen(), STARTING_FEN);
    }

    #[test]
    fn reads_all_fields() {
        let p = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w k d6 0 3").unwrap();
        assert_eq!(p.en_passant(), Some("d6".parse().unwrap()));
        assert!(p.castling_allowed(Side::Black, Wing::Kingside));
        assert!(!p.castling_allowed(Side::White, Wing::Kingside));
        assert_eq!(p.piece_at("e5".parse().unwrap()), Some(Piece::new(PieceKind::Pawn, Side::White)));
        assert_eq!(p.to_fen(), "4k3/8/8/3pP3/8/8/8/4K3 w k d6 0 1");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Position::from_fen("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(Position::from_fen("8/8/8/8/8/8/8/7x w - - 0 1").is_err());
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3 w X - 0 1").is_err());
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - z9 0 1").is_err());
    }

    #[test]
    fn requires_exactly_one_king_per_side() {
        let reason = |fen: &str| match Position::from_fen(fen) {
            Err(NotationError::Fen { reason, .. }) => reason,
            other => panic!("expected FEN error, got {other:?}"),
        };
        assert_eq!(reason("8/8/8/8/8/8/8/8 w - - 0 1"), "missing king");
        assert_eq!(reason("4k3/8/8/8/8/8/8/Q7 w - - 0 1"), "missing king");
        assert_eq!(reason("K6K/8/8/8/8/8/8/k7 w - - 0 1"), "more than one king per side");
        assert_eq!(reason("4k3/8/8/8/8/8/8/4K2k b - - 0 1"), "more than one king per side");
        assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").is_ok());
    }
}
