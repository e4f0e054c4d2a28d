// Leaf-node counts for validating move generation
use rayon::prelude::*;

use crate::board::{Move, Position};
use crate::rules;

pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = rules::legal_moves(position);
    if depth == 1 { return moves.len() as u64; }
    moves.iter().map(|mv| perft(&position.perform_move(mv), depth - 1)).sum()
}

/// Per-root-move subtree counts, in generation order.
pub fn divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 { return Vec::new(); }
    rules::legal_moves(position)
        .into_iter()
        .map(|mv| (mv, perft(&position.perform_move(&mv), depth - 1)))
        .collect()
}

/// Root-split perft on the current rayon pool.
pub fn perft_parallel(position: &Position, depth: u32) -> u64 {
    if depth <= 1 { return perft(position, depth); }
    rules::legal_moves(position)
        .par_iter()
        .map(|mv| perft(&position.perform_move(mv), depth - 1))
        .sum()
}
