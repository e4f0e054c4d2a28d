use crate::board::square::{B1, B8, C1, C8, D1, D8, E1, E8, F1, F8, G1, G8};
use crate::board::{Move, Piece, PieceKind, Position, Side, Square, Wing};

use super::attacks::{is_square_attacked, DIAGONALS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONALS};

/// Pseudo-legal candidates for the piece on `from`. Empty if the square is
/// free or holds a piece of the side not to move.
pub fn pseudo_legal_moves_from(position: &Position, from: Square) -> Vec<Move> {
    let mut out = Vec::new();
    add_candidates(position, from, &mut out);
    out
}

pub(crate) fn add_candidates(position: &Position, from: Square, out: &mut Vec<Move>) {
    let Some(piece) = position.piece_at(from) else { return };
    if piece.side != position.side_to_move() { return; }
    match piece.kind {
        PieceKind::Rook => slide(position, from, piece, &ORTHOGONALS, out),
        PieceKind::Bishop => slide(position, from, piece, &DIAGONALS, out),
        PieceKind::Queen => {
            slide(position, from, piece, &ORTHOGONALS, out);
            slide(position, from, piece, &DIAGONALS, out);
        }
        PieceKind::Knight => step(position, from, piece, &KNIGHT_OFFSETS, out),
        PieceKind::King => {
            step(position, from, piece, &KING_OFFSETS, out);
            castling(position, from, piece, out);
        }
        PieceKind::Pawn => pawn(position, from, piece, out),
    }
}

fn slide(position: &Position, from: Square, piece: Piece, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(dr, df) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, df) {
            match position.piece_at(to) {
                None => out.push(Move::new(piece, from, to)),
                Some(other) => {
                    if other.side != piece.side { out.push(Move::capturing(piece, from, to)); }
                    break;
                }
            }
            cur = to;
        }
    }
}

fn step(position: &Position, from: Square, piece: Piece, offsets: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(dr, df) in offsets {
        let Some(to) = from.offset(dr, df) else { continue };
        match position.piece_at(to) {
            None => out.push(Move::new(piece, from, to)),
            Some(other) if other.side != piece.side => out.push(Move::capturing(piece, from, to)),
            Some(_) => {}
        }
    }
}

fn push_pawn_move(mv: Move, out: &mut Vec<Move>) {
    let last_rank = mv.to.rank() == 0 || mv.to.rank() == 7;
    if last_rank {
        out.extend(PieceKind::PROMOTIONS.iter().map(|&k| mv.promoting(k)));
    } else {
        out.push(mv);
    }
}

fn pawn(position: &Position, from: Square, piece: Piece, out: &mut Vec<Move>) {
    let fwd = piece.side.forward();
    if let Some(one) = from.offset(fwd, 0) {
        if position.is_free(one) {
            push_pawn_move(Move::new(piece, from, one), out);
            let start_rank = if piece.side == Side::White { 1 } else { 6 };
            if from.rank() == start_rank {
                if let Some(two) = from.offset(2 * fwd, 0) {
                    if position.is_free(two) { out.push(Move::new(piece, from, two)); }
                }
            }
        }
    }
    for df in [-1, 1] {
        let Some(to) = from.offset(fwd, df) else { continue };
        match position.piece_at(to) {
            Some(other) if other.side != piece.side => push_pawn_move(Move::capturing(piece, from, to), out),
            None if position.en_passant() == Some(to) => out.push(Move::capturing(piece, from, to)),
            _ => {}
        }
    }
}

// Squares that must be empty, and squares the king stands on, passes and reaches.
struct CastlePath {
    wing: Wing,
    between: &'static [Square],
    king_path: [Square; 3],
}

static WHITE_CASTLES: [CastlePath; 2] = [
    CastlePath { wing: Wing::Kingside, between: &[F1, G1], king_path: [E1, F1, G1] },
    CastlePath { wing: Wing::Queenside, between: &[B1, C1, D1], king_path: [E1, D1, C1] },
];

static BLACK_CASTLES: [CastlePath; 2] = [
    CastlePath { wing: Wing::Kingside, between: &[F8, G8], king_path: [E8, F8, G8] },
    CastlePath { wing: Wing::Queenside, between: &[B8, C8, D8], king_path: [E8, D8, C8] },
];

fn castling(position: &Position, from: Square, king: Piece, out: &mut Vec<Move>) {
    let side = king.side;
    let (home, paths) = match side {
        Side::White => (E1, &WHITE_CASTLES),
        Side::Black => (E8, &BLACK_CASTLES),
    };
    if from != home { return; }
    let opp = side.other();
    for path in paths {
        if !position.castling_allowed(side, path.wing) { continue; }
        let rook_sq = Square::at(home.rank(), path.wing.rook_file());
        if position.piece_at(rook_sq) != Some(Piece::new(PieceKind::Rook, side)) { continue; }
        if !path.between.iter().all(|&s| position.is_free(s)) { continue; }
        if path.king_path.iter().any(|&s| is_square_attacked(position, s, opp)) { continue; }
        out.push(Move::new(king, from, path.king_path[2]));
    }
}

/// All pseudo-legal moves of the side to move.
pub fn pseudo_legal_moves(position: &Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (sq, _) in position.pieces_of(position.side_to_move()) {
        add_candidates(position, sq, &mut out);
    }
    out
}

/// Legal moves: pseudo-legal candidates that do not leave the mover's king in check.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let side = position.side_to_move();
    let mut moves = pseudo_legal_moves(position);
    moves.retain(|mv| !super::is_check(&position.perform_move(mv), side));
    moves
}
