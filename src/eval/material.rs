use crate::board::{PieceKind, Position, Side};

use super::Evaluation;

const PAWN: i32 = 1;
const KNIGHT: i32 = 3;
const BISHOP: i32 = 3;
const ROOK: i32 = 5;
const QUEEN: i32 = 9;

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN,
        PieceKind::Knight => KNIGHT,
        PieceKind::Bishop => BISHOP,
        PieceKind::Rook => ROOK,
        PieceKind::Queen => QUEEN,
        PieceKind::King => 0,
    }
}

/// Pure material count: own material minus the opponent's.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaterialEvaluation;

impl Evaluation for MaterialEvaluation {
    fn evaluate(&self, position: &Position, viewpoint: Side) -> i32 {
        let own: i32 = position.pieces_of(viewpoint).map(|(_, p)| piece_value(p.kind)).sum();
        let opp: i32 = position.pieces_of(viewpoint.other()).map(|(_, p)| piece_value(p.kind)).sum();
        own - opp
    }
}
