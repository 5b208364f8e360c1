use super::Board;
use crate::types::{Color, PieceKind, Square};

macro_rules! assert_perft {
    ($($name:ident: $fen:tt, [$($nodes:expr),*],)*) => {$(
        #[test]
        fn $name() {
            let mut board = Board::new($fen).unwrap();
            for (depth, &nodes) in [$($nodes),*].iter().enumerate() {
                assert_eq!(perft(&mut board, depth + 1), nodes, "depth {}", depth + 1);
            }
        }
    )*};
}

/// Perft with paranoia: at every node the board must round-trip through
/// make/undo unchanged and the incremental hash must match a from-scratch
/// recomputation.
fn perft(board: &mut Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in board.generate_moves() {
        let before = board.clone();

        board.make_move(mv);
        assert_eq!(board.compute_hash(), board.hash(), "after {mv}");
        nodes += perft(board, depth - 1);
        board.undo_move();

        assert_eq!(*board, before, "make/undo of {mv} did not round-trip");
    }
    nodes
}

// Test cases from https://www.chessprogramming.org/Perft_Results
assert_perft!(
    starting_position: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", [20, 400, 8902, 197281],
    kiwipete: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", [48, 2039, 97862],
    endgame_pawns: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", [14, 191, 2812, 43238],
    promotions: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", [6, 264, 9467],
    talkchess: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", [44, 1486, 62379],
);

#[test]
fn every_generated_move_is_legal() {
    let mut board =
        Board::new("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();

    for mv in board.generate_moves() {
        let mover = board.side_to_move();
        assert!(board.make_move(mv), "{mv} leaves the king in check");
        assert!(!board.is_king_attacked(mover));
        board.undo_move();
    }
}

#[test]
fn pseudo_moves_rejected_only_for_king_safety() {
    // A pinned knight: every one of its pseudo-legal moves must be filtered.
    let mut board = Board::new("4k3/8/8/8/8/4n3/8/4RK2 b - - 0 1").unwrap();

    let pseudo = board.generate_pseudo_moves();
    let legal = board.generate_moves();

    for &mv in &pseudo {
        let filtered = !legal.contains(&mv);
        let illegal = !board.make_move(mv);
        board.undo_move();
        assert_eq!(filtered, illegal, "{mv}");
    }

    let knight = Square::try_from("e3").unwrap();
    assert!(legal.iter().all(|mv| mv.from() != knight));
}

#[test]
fn en_passant_capture_round_trips() {
    let mut board =
        Board::new("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3").unwrap();
    let capture = board
        .generate_moves()
        .into_iter()
        .find(|mv| board.is_en_passant(*mv))
        .expect("en passant must be available");

    let before = board.clone();
    board.make_move(capture);

    // The captured pawn disappears from e4, not from the target square e3.
    assert_eq!(board.piece_on(Square::try_from("e4").unwrap()), None);
    assert_eq!(
        board.piece_on(Square::try_from("e3").unwrap()).unwrap().kind,
        PieceKind::Pawn
    );

    board.undo_move();
    assert_eq!(board, before);
}

#[test]
fn castling_moves_the_rook_and_clears_the_rights() {
    let mut board = Board::new("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

    let short = crate::types::Move::new(Square::E1, Square::G1);
    assert!(board.make_move(short));
    assert_eq!(board.piece_on(Square::F1).unwrap().kind, PieceKind::Rook);
    assert_eq!(board.piece_on(Square::H1), None);
    assert!(!board.castling().is_allowed(crate::types::CastlingKind::WhiteShort));
    assert!(!board.castling().is_allowed(crate::types::CastlingKind::WhiteLong));

    board.undo_move();
    assert_eq!(board.piece_on(Square::H1).unwrap().kind, PieceKind::Rook);
    assert!(board.castling().is_allowed(crate::types::CastlingKind::WhiteShort));
}

#[test]
fn castling_is_blocked_through_attacked_squares() {
    // A black rook on f8 covers f1, so short castling is out; long castling
    // remains available.
    let mut board = Board::new("5r2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = board.generate_moves();

    assert!(!moves.contains(&crate::types::Move::new(Square::E1, Square::G1)));
    assert!(moves.contains(&crate::types::Move::new(Square::E1, Square::C1)));
}

#[test]
fn promotions_expand_to_four_moves() {
    let mut board = Board::new("8/P7/8/8/8/8/k6K/8 w - - 0 1").unwrap();
    let moves = board.generate_moves();

    let promotions: Vec<_> = moves.iter().filter(|mv| mv.promotion().is_some()).collect();
    assert_eq!(promotions.len(), 4);
    assert!(promotions.iter().all(|mv| mv.to() == Square::try_from("a8").unwrap()));
}

#[test]
fn incremental_hash_tracks_state_changes() {
    let mut board = Board::starting_position();
    assert_eq!(board.hash(), board.compute_hash());

    // A double push must hash the en-passant file in; a quiet reply must
    // hash it back out.
    let push = crate::types::Move::new(
        Square::try_from("e2").unwrap(),
        Square::try_from("e4").unwrap(),
    );
    board.make_move(push);
    assert!(board.en_passant().is_some());
    assert_eq!(board.hash(), board.compute_hash());

    let reply = crate::types::Move::new(
        Square::try_from("g8").unwrap(),
        Square::try_from("f6").unwrap(),
    );
    board.make_move(reply);
    assert!(board.en_passant().is_none());
    assert_eq!(board.hash(), board.compute_hash());
}

#[test]
fn null_move_round_trips_the_hash() {
    let mut board =
        Board::new("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    let before = board.clone();

    board.make_null_move();
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.en_passant(), None);
    assert_eq!(board.hash(), board.compute_hash());

    board.undo_null_move();
    assert_eq!(board, before);
}

#[test]
fn transpositions_share_a_hash() {
    let mut first = Board::starting_position();
    for (from, to) in [("g1", "f3"), ("g8", "f6"), ("b1", "c3")] {
        first.make_move(crate::types::Move::new(
            Square::try_from(from).unwrap(),
            Square::try_from(to).unwrap(),
        ));
    }

    let mut second = Board::starting_position();
    for (from, to) in [("b1", "c3"), ("g8", "f6"), ("g1", "f3")] {
        second.make_move(crate::types::Move::new(
            Square::try_from(from).unwrap(),
            Square::try_from(to).unwrap(),
        ));
    }

    assert_eq!(first.hash(), second.hash());
}

#[test]
fn starting_position_has_the_expected_shape() {
    let board = Board::starting_position();

    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.king_square(Color::White), Square::E1);
    assert_eq!(board.king_square(Color::Black), Square::E8);
    assert!(board.has_non_pawn_material(Color::White));
    assert_eq!(board.en_passant(), None);
}
