//! Leaf evaluation seam used by the minimax core.
pub mod material;

use crate::board::{Position, Side};

pub use material::MaterialEvaluation;

/// Best value an evaluation may report.
pub const BEST: i32 = i32::MAX;
/// Worst value an evaluation may report.
pub const WORST: i32 = i32::MIN;
/// Value of a balanced position.
pub const BALANCED: i32 = 0;

/// Scores a position from `viewpoint`'s side; higher is better for that side.
pub trait Evaluation: Send + Sync {
    fn evaluate(&self, position: &Position, viewpoint: Side) -> i32;
}

impl<F> Evaluation for F
where
    F: Fn(&Position, Side) -> i32 + Send + Sync,
{
    fn evaluate(&self, position: &Position, viewpoint: Side) -> i32 { self(position, viewpoint) }
}
