//! Helper functions and well-known positions used across the chess tests

use rookery::chess::{Board, Position};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Scholar's mate, ending with Qxf7#
pub const SCHOLARS_MATE: [&str; 7] = ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"];

/// Both sides ready to castle on either wing
pub const CASTLING_READY_FEN: &str = "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1";

/// Parse a square name, panicking on typos in the test itself
pub fn sq(name: &str) -> Position {
    name.parse()
        .unwrap_or_else(|e| panic!("bad square {name}: {e}"))
}

pub fn board_from_fen(fen: &str) -> Board {
    Board::from_fen(fen).unwrap_or_else(|e| panic!("bad FEN {fen}: {e}"))
}

/// Play moves in coordinate notation, panicking if any is rejected
pub fn play(board: &Board, moves: &[&str]) -> Board {
    moves.iter().fold(board.clone(), |board, mv| {
        let outcome = board.attempt(mv.parse().unwrap());
        assert!(
            outcome.accepted,
            "{mv} rejected in {}: {:?}",
            board.to_fen(),
            outcome.rejection
        );
        outcome.board
    })
}

/// Sorted legal destinations of the piece on `square`
pub fn legal_squares(board: &Board, square: &str) -> Vec<String> {
    let mut names: Vec<String> = board
        .legal_moves_from(sq(square))
        .iter()
        .map(|p| p.to_string())
        .collect();
    names.sort();
    names
}
