//! Integration tests for chess-movegen.
//!
//! Each test loads a FEN and checks the public move listing.

use chess_core::{Color, Move, Square};
use chess_movegen::{LegalityMode, Position};

fn mv(s: &str) -> Move {
    Move::from_coordinate_str(s).expect("valid coordinate move")
}

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).expect("valid square")
}

fn pairs(position: &Position) -> Vec<(String, String)> {
    position
        .legal_moves()
        .expect("both kings present")
        .to_algebraic()
}

#[test]
fn startpos_has_twenty_moves_and_no_castling() {
    let position = Position::startpos();
    let moves = position.legal_moves().unwrap();

    assert_eq!(moves.len(), 20);
    assert!(moves.iter().all(|m| m.from() != Square::E1));
    assert_eq!(position.is_in_check(), Ok(false));

    let pairs = pairs(&position);
    assert_eq!(pairs[0], ("a2".to_string(), "a3".to_string()));
    assert!(pairs.contains(&("g1".to_string(), "f3".to_string())));
}

#[test]
fn kingside_castling_is_listed() {
    let position = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    for mode in [LegalityMode::Compatible, LegalityMode::Strict] {
        let moves = position.legal_moves_with(mode).unwrap();
        assert!(moves.contains(mv("e1g1")), "{:?}", mode);
    }
    assert!(pairs(&position).contains(&("e1".to_string(), "g1".to_string())));
}

#[test]
fn check_with_two_blocks() {
    // The a1 rook checks along the back rank; only the d2 knight can interpose.
    let position = Position::from_fen("6k1/8/8/8/8/8/3N1PPP/r5K1 w - - 0 1").unwrap();
    assert_eq!(position.is_in_check(), Ok(true));

    let moves = position.legal_moves().unwrap();
    assert_eq!(moves.as_slice(), &[mv("d2b1"), mv("d2f1")]);
}

#[test]
fn knight_check_is_answered_by_capture_or_king_step() {
    // The f3 knight checks and covers d2; the h1 bishop can take it.
    let position = Position::from_fen("4k3/8/8/8/8/5n2/8/4K2B w - - 0 1").unwrap();
    assert_eq!(position.is_in_check(), Ok(true));

    let moves = position.legal_moves().unwrap();
    assert_eq!(
        moves.as_slice(),
        &[mv("e1e2"), mv("e1f2"), mv("e1d1"), mv("e1f1"), mv("h1f3")]
    );
}

#[test]
fn fools_mate_is_checkmate() {
    let position =
        Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .unwrap();
    assert!(position.legal_moves().unwrap().is_empty());
    assert_eq!(position.is_in_check(), Ok(true));
}

#[test]
fn cornered_king_is_stalemate() {
    let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(position.legal_moves().unwrap().is_empty());
    assert_eq!(position.is_in_check(), Ok(false));
}

#[test]
fn en_passant_capture_is_listed() {
    let position =
        Position::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
            .unwrap();
    let moves = position.moves_from(sq("e5")).unwrap();
    assert_eq!(moves.as_slice(), &[mv("e5e6"), mv("e5f6")]);
    assert!(position.piece_at(sq("f6")).is_none());
}

#[test]
fn kiwipete_move_count() {
    let position = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    for mode in [LegalityMode::Compatible, LegalityMode::Strict] {
        let moves = position.legal_moves_with(mode).unwrap();
        assert_eq!(moves.len(), 48, "{:?}", mode);
        assert!(moves.contains(mv("e1g1")));
        assert!(moves.contains(mv("e1c1")));
    }
}

#[test]
fn black_to_move_uses_black_pieces() {
    let position =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
    let moves = position.legal_moves().unwrap();
    assert_eq!(moves.len(), 20);
    assert!(moves
        .iter()
        .all(|m| position.piece_at(m.from()).map(|(_, c)| c) == Some(Color::Black)));
    // e3 is an en passant target but no black pawn is beside it
    assert!(moves.iter().all(|m| m.to() != sq("e3")));
}

#[test]
fn missing_king_is_an_error() {
    let position = Position::from_fen("8/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
    assert!(position.legal_moves().is_ok());
    assert!(position.legal_moves_with(LegalityMode::Strict).is_ok());

    let mut black = position;
    black.side_to_move = Color::Black;
    assert!(black.legal_moves().unwrap().is_empty());
    assert!(black.is_in_check().is_err());
}

#[test]
fn malformed_fen_is_rejected() {
    for fen in [
        "",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
    ] {
        assert!(Position::from_fen(fen).is_err(), "{:?}", fen);
    }
}

#[test]
fn positions_are_shareable_across_threads() {
    fn assert_sync<T: Sync + Send>() {}
    assert_sync::<Position>();

    let position = Position::startpos();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| position.legal_moves().unwrap().len()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 20);
        }
    });
}
