//! Rules of chess over the immutable [`Position`] model.
//!
//! Move generation is make-by-copy: every pseudo-legal candidate is applied to
//! a scratch position and dropped if it leaves the mover's king attacked.

pub mod attacks;
pub mod movegen;

use crate::board::{Position, Side};

pub use attacks::is_square_attacked;
pub use movegen::{legal_moves, pseudo_legal_moves, pseudo_legal_moves_from};

pub fn starting_position() -> Position { Position::starting() }

/// True iff `side`'s king is attacked by the opponent. A position without
/// that king reports `false`; callers are expected to supply both kings.
pub fn is_check(position: &Position, side: Side) -> bool {
    match position.king_square(side) {
        Some(king) => is_square_attacked(position, king, side.other()),
        None => false,
    }
}

pub fn is_checkmate(position: &Position) -> bool {
    is_check(position, position.side_to_move()) && legal_moves(position).is_empty()
}

pub fn is_stalemate(position: &Position) -> bool {
    !is_check(position, position.side_to_move()) && legal_moves(position).is_empty()
}
