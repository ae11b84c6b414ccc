use super::*;
use crate::board::CastlingRights;

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -");
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert_eq!(moves.iter().filter(|m| m.is_castle).count(), 2);
}

#[test]
fn test_en_passant_generated() {
    let pos = fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    let moves = legal_moves(&pos);
    assert!(moves.iter().any(|m| m.is_en_passant && m.to == coord_to_sq("d6").unwrap()));
}

#[test]
fn test_checkmate_detection() {
    // Back-rank mate: queen on e8, black king boxed in by its own pawns
    let pos = fen("4Q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1");
    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());
    assert_eq!(
        pos.status(),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn test_stalemate_detection() {
    let pos = fen("k5r1/8/8/8/8/8/r7/7K w - - 0 1");
    assert!(legal_moves(&pos).is_empty());
    assert!(pos.is_stalemate());
    assert!(!pos.is_checkmate());
    assert_eq!(pos.status(), GameStatus::Stalemate);
}

#[test]
fn test_single_legal_move() {
    let pos = fen("k5r1/8/8/8/8/8/8/7K w - - 0 1");
    let moves = legal_moves(&pos);
    assert_eq!(moves, vec![Move::new(7, 15)]);
    assert_eq!(pos.status(), GameStatus::Ongoing);
}

#[test]
fn test_moves_for_side_not_on_move() {
    let pos = Position::startpos();
    let black = legal_moves_for(&pos, Color::Black);
    assert_eq!(black.len(), 20);
    assert!(black.iter().all(|m| pos.piece_at(m.from).unwrap().color == Color::Black));

    // En passant belongs to the side on move only
    let ep = fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3");
    assert!(legal_moves_for(&ep, Color::White).iter().any(|m| m.is_en_passant));
    assert_eq!(legal_moves_for(&ep, Color::White), legal_moves(&ep));
}

#[test]
fn test_no_castle_or_en_passant_without_the_pieces() {
    // Rights and target set directly, bypassing FEN cleanup
    let mut pos = fen("4k3/8/8/8/8/8/3PP3/4K3 w - - 0 1");
    pos.castling = CastlingRights::all();
    pos.en_passant = coord_to_sq("e3");

    let moves = legal_moves(&pos);
    assert!(moves.iter().all(|m| !m.is_castle && !m.is_en_passant));

    for mv in moves {
        let mut after = pos.clone();
        after.make_move(mv);
        let white_pawns = (0..64u8)
            .filter(|&s| after.piece_at(s) == Some(Piece::new(Color::White, PieceKind::Pawn)))
            .count();
        assert_eq!(white_pawns, 2, "{mv:?} lost a white pawn");
    }
}
