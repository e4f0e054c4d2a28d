// Immutable position model: squares, pieces, castling rights, moves
pub mod square;
pub mod piece;
pub mod castling;
pub mod moves;
pub mod position;
pub mod fen;

pub use castling::{CastlingRights, Wing};
pub use moves::Move;
pub use piece::{Piece, PieceKind, Side};
pub use position::Position;
pub use square::Square;
