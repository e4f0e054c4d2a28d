use shakmaty::fen::Fen;
use shakmaty::zobrist::Zobrist64;
use shakmaty::Position as _;
use shakmaty::{CastlingMode, Chess, EnPassantMode, PositionError};

use crate::board::Position;

/// Default book key: the Polyglot Zobrist hash, so standard `.bin` books
/// resolve. `None` when the position has no valid standard setup (a missing
/// king, say). The en-passant file counts only when a pawn of the side to
/// move stands ready to capture.
pub fn position_key(position: &Position) -> Option<u64> {
    let fen: Fen = position.to_fen().parse().ok()?;
    let chess: Chess = fen
        .into_position(CastlingMode::Standard)
        .or_else(PositionError::ignore_invalid_castling_rights)
        .or_else(PositionError::ignore_invalid_ep_square)
        .ok()?;
    Some(chess.zobrist_hash::<Zobrist64>(EnPassantMode::PseudoLegal).0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CastlingRights, Side};

    fn after(moves: &[&str]) -> Position {
        let mut p = Position::starting();
        for text in moves {
            let mv = crate::xboard::find_legal_move(&p, text).unwrap();
            p = p.perform_move(&mv);
        }
        p
    }

    #[test]
    fn start_key_matches_polyglot() {
        assert_eq!(position_key(&Position::starting()), Some(0x463b96181691fc9c));
        assert_eq!(position_key(&after(&["e2e4"])), Some(0x823c9b50fd114196));
        assert_eq!(position_key(&after(&["e2e4", "d7d5"])), Some(0x0756b94461c50fb0));
    }

    #[test]
    fn ep_file_counts_only_with_a_capturer() {
        assert_eq!(position_key(&after(&["e2e4", "d7d5", "e4e5"])), Some(0x662fafb965db29d4));
        assert_eq!(position_key(&after(&["e2e4", "d7d5", "e4e5", "f7f5"])), Some(0x22a48b5a8e47ff78));
    }

    #[test]
    fn key_depends_on_side_and_castling() {
        let p = Position::starting();
        let k = position_key(&p);
        assert_ne!(k, position_key(&p.with_side_to_move(Side::Black)));
        assert_ne!(k, position_key(&p.with_castling(CastlingRights::NONE)));
    }

    #[test]
    fn kingless_position_has_no_key() {
        assert_eq!(position_key(&Position::empty()), None);
    }
}
