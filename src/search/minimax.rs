use std::sync::Arc;

use crate::board::{Move, Position, Side};
use crate::eval::{self, Evaluation, MaterialEvaluation};
use crate::rules;

use super::cancel::CancelToken;

/// Score of being mated at the root, before subtracting the ply distance.
/// Dominates every value the evaluation can produce.
pub const MATE_BASE: i32 = eval::BEST / 2;

/// Unpruned fixed-depth minimax. Scores are always from the root side's view.
#[derive(Clone)]
pub struct Minimax {
    depth: u32,
    evaluation: Arc<dyn Evaluation>,
}

impl std::fmt::Debug for Minimax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Minimax").field("depth", &self.depth).finish_non_exhaustive()
    }
}

impl Minimax {
    /// `depth` is in plies; values below 1 are raised to 1.
    pub fn new(depth: u32, evaluation: Arc<dyn Evaluation>) -> Self {
        Self { depth: depth.max(1), evaluation }
    }

    pub fn with_material(depth: u32) -> Self { Self::new(depth, Arc::new(MaterialEvaluation)) }

    pub fn depth(&self) -> u32 { self.depth }

    /// Best root move, `None` when the side to move has no legal move.
    /// Blocking and deterministic: ties go to the first move generated.
    pub fn best_move(&self, position: &Position) -> Option<Move> {
        self.best_scored_move(position).map(|(mv, _)| mv)
    }

    pub fn best_scored_move(&self, position: &Position) -> Option<(Move, i32)> {
        let cancel = CancelToken::new();
        let mut best: Option<(Move, i32)> = None;
        for mv in rules::legal_moves(position) {
            let score = self.evaluate_root_move(position, &mv, &cancel);
            if best.map_or(true, |(_, bs)| score > bs) { best = Some((mv, score)); }
        }
        best
    }

    /// Full-depth value of playing `mv` from `position`, from the mover's view.
    pub fn evaluate_move(&self, position: &Position, mv: &Move) -> i32 {
        self.evaluate_root_move(position, mv, &CancelToken::new())
    }

    // Applies one root move and scores the result at ply 1. Under a cancelled
    // token the value is meaningless and callers must discard it.
    pub(crate) fn evaluate_root_move(&self, position: &Position, mv: &Move, cancel: &CancelToken) -> i32 {
        let root_side = position.side_to_move();
        self.score(&position.perform_move(mv), 1, root_side, cancel)
    }

    // Minimax value of `position`, reached `ply` half-moves below the root.
    // Even plies have the root side to act (maximise), odd plies minimise.
    // A cancelled token yields `BALANCED` without descending further.
    pub(crate) fn score(&self, position: &Position, ply: u32, root_side: Side, cancel: &CancelToken) -> i32 {
        if cancel.is_cancelled() { return eval::BALANCED; }
        if ply >= self.depth { return self.evaluation.evaluate(position, root_side); }

        let moves = rules::legal_moves(position);
        if moves.is_empty() {
            let to_move = position.side_to_move();
            if !rules::is_check(position, to_move) { return eval::BALANCED; }
            // earlier mates are more extreme than later ones
            let mate = MATE_BASE - ply as i32;
            return if to_move == root_side { -mate } else { mate };
        }

        let children = moves.iter().map(|mv| self.score(&position.perform_move(mv), ply + 1, root_side, cancel));
        if ply % 2 == 0 {
            children.fold(eval::WORST, i32::max)
        } else {
            children.fold(eval::BEST, i32::min)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_at_least_one() {
        assert_eq!(Minimax::with_material(0).depth(), 1);
        assert_eq!(Minimax::with_material(3).depth(), 3);
    }

    #[test]
    fn cancelled_token_short_circuits() {
        let m = Minimax::with_material(3);
        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(m.score(&Position::starting(), 1, Side::White, &cancel), eval::BALANCED);
    }
}
