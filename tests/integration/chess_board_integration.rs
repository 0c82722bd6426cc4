use crate::common::test_data::{play, sq, START_FEN};
use rookery::chess::{Board, ChessError, Color, PieceType, Position};
use std::collections::HashSet;

/// Chess Board Integration Tests
/// Covers the starting array, move acceptance and rejection as seen by a UI collaborator
#[cfg(test)]
mod chess_board_integration_tests {
    use super::*;

    fn kind_at(board: &Board, square: &str) -> Option<(PieceType, Color)> {
        board
            .piece_at(sq(square))
            .map(|p| (p.piece_type, p.color))
    }

    /// Test comprehensive starting position correctness
    #[test]
    fn test_starting_position_correctness() {
        let board = Board::new();

        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, &piece_type) in back_rank.iter().enumerate() {
            let file = file as u8;
            let white = board.piece_at(Position::new_unchecked(file, 0)).unwrap();
            assert_eq!((white.piece_type, white.color), (piece_type, Color::White));
            let black = board.piece_at(Position::new_unchecked(file, 7)).unwrap();
            assert_eq!((black.piece_type, black.color), (piece_type, Color::Black));

            assert_eq!(
                kind_at(&board, &format!("{}2", (b'a' + file) as char)),
                Some((PieceType::Pawn, Color::White))
            );
            assert_eq!(
                kind_at(&board, &format!("{}7", (b'a' + file) as char)),
                Some((PieceType::Pawn, Color::Black))
            );
        }

        for rank in 2..6 {
            for file in 0..8 {
                assert!(
                    board.piece_at(Position::new_unchecked(file, rank)).is_none(),
                    "Square at file {} rank {} should be empty",
                    file,
                    rank
                );
            }
        }

        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.ply_count(), 0);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.en_passant_target(), None);
        assert_eq!(board.winner(), None);
        assert!(board.pieces().all(|p| !p.has_moved && !p.en_passant_eligible));
    }

    #[test]
    fn test_initial_legal_moves() {
        let board = Board::new();
        assert_eq!(board.legal_moves().len(), 20);

        let mut knight: Vec<String> = board
            .legal_moves_from(sq("g1"))
            .iter()
            .map(|p| p.to_string())
            .collect();
        knight.sort();
        assert_eq!(knight, vec!["f3", "h3"]);

        // Black has nothing cached while it is White's turn
        assert!(board.legal_moves_from(sq("g8")).is_empty());
        assert!(board.legal_moves_from(sq("e1")).is_empty());
    }

    #[test]
    fn test_accepted_move_updates_board_and_fen() {
        let board = Board::new();
        let outcome = board.attempt_move(sq("e2"), sq("e4"));

        assert!(outcome.accepted);
        assert!(outcome.rejection.is_none());
        assert_eq!(
            outcome.fen,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        assert_eq!(outcome.fen, outcome.board.to_fen());
        assert_eq!(outcome.board.side_to_move(), Color::Black);
        assert!(outcome.board.piece_at(sq("e2")).is_none());
        assert!(outcome.board.piece_at(sq("e4")).unwrap().has_moved);

        // the input board is a value and did not change
        assert_eq!(board.to_fen(), START_FEN);
    }

    #[test]
    fn test_rejected_moves_leave_state_unchanged() {
        let board = play(&Board::new(), &["g1f3"]);
        let fen = board.to_fen();

        let cases = [
            ("e4", "e5"), // empty origin
            ("f3", "g5"), // White piece on Black's turn
            ("e7", "e4"), // not a pawn move
            ("e8", "e7"), // own piece in the way
        ];

        for (from, to) in cases {
            let outcome = board.attempt_move(sq(from), sq(to));
            assert!(!outcome.accepted, "{from}{to} should be rejected");
            assert!(outcome.rejection.is_some());
            assert_eq!(outcome.fen, fen);
            assert_eq!(outcome.board, board);
            assert_eq!(outcome.board.halfmove_clock(), 1);
        }
    }

    #[test]
    fn test_rejection_reasons() {
        let board = Board::new();

        assert_eq!(
            board.apply_move("e4e5".parse().unwrap()).unwrap_err(),
            ChessError::EmptySquare(sq("e4"))
        );
        assert!(matches!(
            board.apply_move("e7e5".parse().unwrap()).unwrap_err(),
            ChessError::WrongTurn {
                piece: Color::Black,
                to_move: Color::White,
                ..
            }
        ));
        assert!(matches!(
            board.apply_move("e2e5".parse().unwrap()).unwrap_err(),
            ChessError::InvalidMove(_)
        ));
        assert!(matches!(
            board.apply_move("e2e4q".parse().unwrap()).unwrap_err(),
            ChessError::InvalidMove(_)
        ));
    }

    #[test]
    fn test_attempt_is_repeatable() {
        let board = play(&Board::new(), &["d2d4", "d7d5"]);

        let first = board.attempt_move(sq("c1"), sq("h6"));
        let second = board.attempt_move(sq("c1"), sq("h6"));
        assert_eq!(first.accepted, second.accepted);
        assert_eq!(first.fen, second.fen);

        let rejected_once = board.attempt_move(sq("d1"), sq("d5"));
        let rejected_twice = board.attempt_move(sq("d1"), sq("d5"));
        assert!(!rejected_once.accepted);
        assert_eq!(rejected_once.fen, rejected_twice.fen);
        assert_eq!(rejected_once.rejection, rejected_twice.rejection);
    }

    #[test]
    fn test_is_legal_agrees_with_attempt() {
        let board = play(&Board::new(), &["e2e4", "e7e5", "g1f3"]);
        for from in Position::all_positions() {
            for to in Position::all_positions() {
                if from == to {
                    continue;
                }
                assert_eq!(
                    board.is_legal(from, to),
                    board.attempt_move(from, to).accepted,
                    "{from}{to}"
                );
            }
        }
    }

    #[test]
    fn test_capture_removes_piece() {
        let board = play(&Board::new(), &["e2e4", "d7d5", "e4d5"]);
        assert_eq!(board.pieces().count(), 31);
        let pawn = board.piece_at(sq("d5")).unwrap();
        assert_eq!((pawn.piece_type, pawn.color), (PieceType::Pawn, Color::White));
        assert_eq!(board.halfmove_clock(), 0);
    }

    #[test]
    fn test_snapshot_lists_every_piece() {
        let board = Board::new();
        let snapshot = board.snapshot();
        assert_eq!(snapshot.len(), 32);

        let squares: HashSet<&str> = snapshot.iter().map(|v| v.square.as_str()).collect();
        assert_eq!(squares.len(), 32);

        let e2 = snapshot.iter().find(|v| v.square == "e2").unwrap();
        assert_eq!(e2.piece_type, PieceType::Pawn);
        let mut moves = e2.legal_moves.clone();
        moves.sort();
        assert_eq!(moves, vec!["e3", "e4"]);

        let e7 = snapshot.iter().find(|v| v.square == "e7").unwrap();
        assert!(e7.legal_moves.is_empty());

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"square\":\"e2\""));
    }
}
