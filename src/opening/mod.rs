// Opening libraries consulted before searching
pub mod polyglot;
pub mod zobrist;

use crate::board::{Move, Position};

pub use polyglot::{BookEntry, PolyglotBook, SelectionMode};
pub use zobrist::position_key;

/// A source of known moves for positions.
pub trait OpeningLibrary: Send + Sync {
    /// A legal move for `position` if the library knows one.
    fn look_up_move(&self, position: &Position) -> Option<Move>;
}
