// Chess engine core: legal move generation and parallel fixed-depth minimax
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod opening;
pub mod perft;
pub mod rules;
pub mod search;
pub mod xboard;

pub use board::{Move, Piece, PieceKind, Position, Side, Square};
pub use engine::{DefaultEngine, Engine};
pub use search::{MoveEvent, MoveStream};
