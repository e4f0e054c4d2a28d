use super::castling::{CastlingRights, Wing};
use super::moves::Move;
use super::piece::{Piece, PieceKind, Side};
use super::square::Square;

/// Immutable snapshot of a chess position. Transitions return a new value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    board: [[Option<Piece>; 8]; 8],
    to_move: Side,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop, PieceKind::Queen,
    PieceKind::King, PieceKind::Bishop, PieceKind::Knight, PieceKind::Rook,
];

impl Default for Position {
    fn default() -> Self { Self::starting() }
}

impl Position {
    /// Board without pieces, white to move, no castling rights.
    pub fn empty() -> Self {
        Self { board: [[None; 8]; 8], to_move: Side::White, castling: CastlingRights::NONE, en_passant: None }
    }

    pub fn starting() -> Self {
        let mut pos = Self::empty();
        for file in 0..8u8 {
            pos.board[0][file as usize] = Some(Piece::new(BACK_RANK[file as usize], Side::White));
            pos.board[1][file as usize] = Some(Piece::new(PieceKind::Pawn, Side::White));
            pos.board[6][file as usize] = Some(Piece::new(PieceKind::Pawn, Side::Black));
            pos.board[7][file as usize] = Some(Piece::new(BACK_RANK[file as usize], Side::Black));
        }
        pos.castling = CastlingRights::ALL;
        pos
    }

    pub fn with_piece(mut self, square: Square, piece: Option<Piece>) -> Self {
        self.board[square.rank() as usize][square.file() as usize] = piece;
        self
    }

    pub fn with_side_to_move(mut self, side: Side) -> Self {
        self.to_move = side;
        self
    }

    pub fn with_castling(mut self, castling: CastlingRights) -> Self {
        self.castling = castling;
        self
    }

    pub fn with_en_passant(mut self, square: Option<Square>) -> Self {
        self.en_passant = square;
        self
    }

    pub fn side_to_move(&self) -> Side { self.to_move }
    pub fn castling(&self) -> CastlingRights { self.castling }
    pub fn en_passant(&self) -> Option<Square> { self.en_passant }

    pub fn castling_allowed(&self, side: Side, wing: Wing) -> bool { self.castling.has(side, wing) }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.rank() as usize][square.file() as usize]
    }

    pub fn is_free(&self, square: Square) -> bool { self.piece_at(square).is_none() }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        Square::all().find(|&sq| matches!(self.piece_at(sq), Some(p) if p.is(PieceKind::King, side)))
    }

    /// Occupied squares of `side` with their pieces, a1 to h8.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(p) if p.side == side => Some((sq, p)),
            _ => None,
        })
    }

    pub fn squares_of(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        self.pieces_of(side).map(|(sq, _)| sq)
    }

    fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.rank() as usize][square.file() as usize] = piece;
    }

    /// Applies `mv` without checking legality.
    pub fn perform_move(&self, mv: &Move) -> Position {
        let mut next = *self;
        let side = self.to_move;

        next.set(mv.from, None);
        let placed = match mv.promotion {
            Some(kind) => Piece::new(kind, side),
            None => mv.piece,
        };
        next.set(mv.to, Some(placed));

        // en passant capture: pawn moves diagonally onto the empty target square
        if mv.is_pawn_move() && mv.from.file() != mv.to.file() && self.is_free(mv.to) && self.en_passant == Some(mv.to) {
            next.set(Square::at(mv.from.rank(), mv.to.file()), None);
        }

        next.en_passant = if mv.is_pawn_double_advance() {
            Some(Square::at((mv.from.rank() + mv.to.rank()) / 2, mv.from.file()))
        } else {
            None
        };

        if mv.is_castling() {
            let wing = if mv.is_castling_kingside() { Wing::Kingside } else { Wing::Queenside };
            let rank = mv.from.rank();
            let rook = next.piece_at(Square::at(rank, wing.rook_file()));
            next.set(Square::at(rank, wing.rook_file()), None);
            next.set(Square::at(rank, wing.rook_target_file()), rook);
        }

        next.castling = self.revoked_castling(mv);
        next.to_move = side.other();
        next
    }

    fn revoked_castling(&self, mv: &Move) -> CastlingRights {
        let mut rights = self.castling;
        if rights.is_empty() { return rights; }
        let side = self.to_move;
        match mv.piece.kind {
            PieceKind::King => rights = rights.without_side(side),
            PieceKind::Rook if mv.from.rank() == side.home_rank() => {
                if mv.from.file() == Wing::Kingside.rook_file() { rights = rights.without(side, Wing::Kingside); }
                if mv.from.file() == Wing::Queenside.rook_file() { rights = rights.without(side, Wing::Queenside); }
            }
            _ => {}
        }
        // a rook taken on its corner loses the opponent that wing
        let opp = side.other();
        if mv.to.rank() == opp.home_rank() {
            if mv.to.file() == Wing::Kingside.rook_file() { rights = rights.without(opp, Wing::Kingside); }
            if mv.to.file() == Wing::Queenside.rook_file() { rights = rights.without(opp, Wing::Queenside); }
        }
        rights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::{E1, G1, H1, F1};

    fn sq(s: &str) -> Square { s.parse().unwrap() }

    #[test]
    fn starting_layout() {
        let p = Position::starting();
        assert_eq!(p.piece_at(E1), Some(Piece::new(PieceKind::King, Side::White)));
        assert_eq!(p.piece_at(sq("d8")), Some(Piece::new(PieceKind::Queen, Side::Black)));
        assert_eq!(p.pieces_of(Side::White).count(), 16);
        assert_eq!(p.castling(), CastlingRights::ALL);
        assert_eq!(p.side_to_move(), Side::White);
    }

    #[test]
    fn double_advance_sets_en_passant_target() {
        let p = Position::starting();
        let pawn = Piece::new(PieceKind::Pawn, Side::White);
        let next = p.perform_move(&Move::new(pawn, sq("e2"), sq("e4")));
        assert_eq!(next.en_passant(), Some(sq("e3")));
        assert_eq!(next.side_to_move(), Side::Black);
        let knight = Piece::new(PieceKind::Knight, Side::Black);
        let after = next.perform_move(&Move::new(knight, sq("g8"), sq("f6")));
        assert_eq!(after.en_passant(), None);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let king = Piece::new(PieceKind::King, Side::White);
        let rook = Piece::new(PieceKind::Rook, Side::White);
        let p = Position::empty()
            .with_piece(E1, Some(king))
            .with_piece(H1, Some(rook))
            .with_castling(CastlingRights::ALL);
        let next = p.perform_move(&Move::new(king, E1, G1));
        assert_eq!(next.piece_at(G1), Some(king));
        assert_eq!(next.piece_at(F1), Some(rook));
        assert_eq!(next.piece_at(H1), None);
        assert!(!next.castling_allowed(Side::White, Wing::Kingside));
        assert!(!next.castling_allowed(Side::White, Wing::Queenside));
        assert!(next.castling_allowed(Side::Black, Wing::Kingside));
    }

    #[test]
    fn en_passant_capture_removes_pawn() {
        let wp = Piece::new(PieceKind::Pawn, Side::White);
        let bp = Piece::new(PieceKind::Pawn, Side::Black);
        let p = Position::empty()
            .with_piece(sq("e5"), Some(wp))
            .with_piece(sq("d5"), Some(bp))
            .with_en_passant(Some(sq("d6")));
        let next = p.perform_move(&Move::capturing(wp, sq("e5"), sq("d6")));
        assert_eq!(next.piece_at(sq("d6")), Some(wp));
        assert_eq!(next.piece_at(sq("d5")), None);
    }

    #[test]
    fn promotion_places_new_piece() {
        let wp = Piece::new(PieceKind::Pawn, Side::White);
        let p = Position::empty().with_piece(sq("a7"), Some(wp));
        let next = p.perform_move(&Move::new(wp, sq("a7"), sq("a8")).promoting(PieceKind::Knight));
        assert_eq!(next.piece_at(sq("a8")), Some(Piece::new(PieceKind::Knight, Side::White)));
    }
}
