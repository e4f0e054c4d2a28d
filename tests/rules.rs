use dokchess::board::{CastlingRights, Move, Piece, PieceKind, Position, Side, Square, Wing};
use dokchess::rules::{self, is_check, is_checkmate, is_stalemate, legal_moves};
use pretty_assertions::assert_eq;

fn sq(s: &str) -> Square { s.parse().unwrap() }
fn fen(f: &str) -> Position { Position::from_fen(f).unwrap() }

#[test]
fn starting_position_has_twenty_moves() {
    let p = rules::starting_position();
    let moves = legal_moves(&p);
    assert_eq!(moves.len(), 20);
    let mut coords: Vec<String> = moves.iter().map(|m| m.coordinate()).collect();
    coords.sort();
    coords.dedup();
    assert_eq!(coords.len(), 20, "duplicate moves generated");
}

#[test]
fn scholars_mate_is_checkmate() {
    let p = fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");
    assert!(is_check(&p, Side::Black));
    assert!(is_checkmate(&p));
    assert!(!is_stalemate(&p));
    assert!(legal_moves(&p).is_empty());
}

#[test]
fn cornered_king_is_stalemate_not_mate() {
    let p = fen("7k/8/7K/8/8/8/8/6Q1 b - - 0 1");
    assert!(is_stalemate(&p));
    assert!(!is_checkmate(&p));
    assert!(!is_check(&p, Side::Black));
}

#[test]
fn castling_candidates_follow_rights() {
    let p = fen("r3k2r/ppp2ppp/8/3p4/3P4/8/PPP2PPP/R3K2R w KQkq - 0 1");
    let castles = |p: &Position| -> Vec<Move> {
        legal_moves(p).into_iter().filter(|m| m.from == sq("e1") && m.is_castling()).collect()
    };
    let both = castles(&p);
    assert_eq!(both.len(), 2);
    assert!(both.iter().any(|m| m.is_castling_kingside() && m.to == sq("g1")));
    assert!(both.iter().any(|m| m.is_castling_queenside() && m.to == sq("c1")));

    let queenside_only = p.with_castling(p.castling().without(Side::White, Wing::Kingside));
    let one = castles(&queenside_only);
    assert_eq!(one.len(), 1);
    assert!(one[0].is_castling_queenside());
}

#[test]
fn castling_blocked_through_attacked_square() {
    // black rook on f8 covers f1
    let p = fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1");
    assert!(!legal_moves(&p).iter().any(|m| m.is_castling()));
    // and not while in check
    let p = fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1");
    assert!(!legal_moves(&p).iter().any(|m| m.is_castling()));
}

#[test]
fn castling_moves_the_rook_and_drops_rights() {
    let p = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = legal_moves(&p).into_iter().find(|m| m.is_castling_kingside()).unwrap();
    let next = p.perform_move(&mv);
    assert_eq!(next.piece_at(sq("g1")), Some(Piece::new(PieceKind::King, Side::White)));
    assert_eq!(next.piece_at(sq("f1")), Some(Piece::new(PieceKind::Rook, Side::White)));
    assert!(next.is_free(sq("h1")));
    assert!(!next.castling_allowed(Side::White, Wing::Kingside));
    assert!(!next.castling_allowed(Side::White, Wing::Queenside));
    assert!(next.castling_allowed(Side::Black, Wing::Kingside));
}

#[test]
fn capturing_a_home_rook_revokes_that_wing() {
    let p = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let mv = legal_moves(&p).into_iter().find(|m| m.from == sq("a1") && m.to == sq("a8")).unwrap();
    let next = p.perform_move(&mv);
    assert!(!next.castling_allowed(Side::White, Wing::Queenside));
    assert!(!next.castling_allowed(Side::Black, Wing::Queenside));
    assert!(next.castling_allowed(Side::Black, Wing::Kingside));
}

#[test]
fn en_passant_target_and_capture() {
    let p = fen("4k3/8/8/3p4/8/8/4P3/4K3 w - - 0 1");
    let double = legal_moves(&p).into_iter().find(|m| m.coordinate() == "e2e4").unwrap();
    assert!(double.is_pawn_double_advance());
    let p = p.perform_move(&double);
    assert_eq!(p.en_passant(), Some(sq("e3")));
    // target is cleared by any other move
    let quiet = legal_moves(&p).into_iter().find(|m| m.coordinate() == "e8d8").unwrap();
    assert_eq!(p.perform_move(&quiet).en_passant(), None);

    let p = fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
    let capture = legal_moves(&p).into_iter().find(|m| m.coordinate() == "d4e3").unwrap();
    assert!(capture.capture);
    let next = p.perform_move(&capture);
    assert!(next.is_free(sq("e4")), "captured pawn must be removed");
    assert_eq!(next.en_passant(), None);
}

#[test]
fn en_passant_exposing_own_king_is_illegal() {
    let p = fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
    assert!(!legal_moves(&p).iter().any(|m| m.coordinate() == "e5d6"));
}

#[test]
fn promotion_expands_to_four_pieces() {
    let p = fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    let mut promos: Vec<String> = legal_moves(&p).iter().filter(|m| m.is_promotion()).map(|m| m.coordinate()).collect();
    promos.sort();
    assert_eq!(promos, vec!["e7e8b", "e7e8n", "e7e8q", "e7e8r"]);
    let q = legal_moves(&p).into_iter().find(|m| m.coordinate() == "e7e8q").unwrap();
    assert_eq!(p.perform_move(&q).piece_at(sq("e8")), Some(Piece::new(PieceKind::Queen, Side::White)));
}

#[test]
fn pinned_piece_cannot_leave_the_line() {
    let p = fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
    assert!(!legal_moves(&p).iter().any(|m| m.from == sq("e2")));
}

#[test]
fn pseudo_legal_from_single_square() {
    let knight = Piece::new(PieceKind::Knight, Side::White);
    let p = Position::empty().with_piece(sq("a1"), Some(knight));
    let mut targets: Vec<String> = rules::pseudo_legal_moves_from(&p, sq("a1")).iter().map(|m| m.to.to_string()).collect();
    targets.sort();
    assert_eq!(targets, vec!["b3", "c2"]);
    assert!(rules::pseudo_legal_moves_from(&p, sq("h8")).is_empty());
}

#[test]
fn legal_moves_never_leave_king_in_check() {
    for f in [
        dokchess::board::fen::STARTING_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ] {
        let p = fen(f);
        let side = p.side_to_move();
        let moves = legal_moves(&p);
        for mv in &moves {
            let next = p.perform_move(mv);
            assert!(!is_check(&next, side), "{} leaves king in check in {}", mv, f);
            assert_eq!(next.side_to_move(), side.other());
            assert_eq!(next.en_passant().is_some(), mv.is_pawn_double_advance());
        }
        let outcomes = [!moves.is_empty(), is_checkmate(&p), is_stalemate(&p)];
        assert_eq!(outcomes.iter().filter(|&&b| b).count(), 1);
    }
}

#[test]
fn missing_king_is_not_in_check() {
    let p = Position::empty().with_piece(sq("d4"), Some(Piece::new(PieceKind::Queen, Side::Black)));
    assert!(!is_check(&p, Side::White));
    assert_eq!(p.castling(), CastlingRights::NONE);
}

#[test]
fn fen_import_requires_one_king_per_side() {
    for bad in ["8/8/8/8/8/8/8/8 w - - 0 1", "K6K/8/8/8/8/8/8/k7 w - - 0 1", "7k/8/8/8/8/8/8/R7 w - - 0 1"] {
        assert!(Position::from_fen(bad).is_err(), "{bad} accepted");
    }
    assert_eq!(fen("7k/8/8/8/8/8/8/K7 w - - 0 1").king_square(Side::White), Some(sq("a1")));
}
