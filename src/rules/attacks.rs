use crate::board::{Piece, PieceKind, Position, Side, Square};

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [(1, 2), (1, -2), (-1, 2), (-1, -2), (2, 1), (2, -1), (-2, 1), (-2, -1)];
pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];

// Nearest occupant along a ray, if any.
fn first_on_ray(position: &Position, from: Square, (dr, df): (i8, i8)) -> Option<(Square, Piece)> {
    let mut cur = from;
    while let Some(next) = cur.offset(dr, df) {
        if let Some(p) = position.piece_at(next) { return Some((next, p)); }
        cur = next;
    }
    None
}

fn probes(position: &Position, square: Square, offsets: &[(i8, i8)], kind: PieceKind, by: Side) -> bool {
    offsets.iter().any(|&(dr, df)| {
        square.offset(dr, df)
            .and_then(|s| position.piece_at(s))
            .is_some_and(|p| p.is(kind, by))
    })
}

/// True iff any piece of `by` attacks `square` in `position`.
pub fn is_square_attacked(position: &Position, square: Square, by: Side) -> bool {
    let slider = |dirs: &[(i8, i8)], kind: PieceKind| {
        dirs.iter().any(|&d| {
            matches!(first_on_ray(position, square, d), Some((_, p)) if p.side == by && (p.kind == kind || p.kind == PieceKind::Queen))
        })
    };
    if slider(&DIAGONALS, PieceKind::Bishop) { return true; }
    if slider(&ORTHOGONALS, PieceKind::Rook) { return true; }
    if probes(position, square, &KNIGHT_OFFSETS, PieceKind::Knight, by) { return true; }
    // a pawn of `by` attacks from one rank behind the square, seen from its own direction
    let back = -by.forward();
    if probes(position, square, &[(back, 1), (back, -1)], PieceKind::Pawn, by) { return true; }
    probes(position, square, &KING_OFFSETS, PieceKind::King, by)
}
