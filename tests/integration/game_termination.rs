use crate::common::test_data::{board_from_fen, play, sq, SCHOLARS_MATE};
use rookery::chess::{Board, ChessError, Color, GameStatus, Termination};

#[cfg(test)]
mod game_termination_tests {
    use super::*;

    #[test]
    fn test_scholars_mate() {
        let board = play(&Board::new(), &SCHOLARS_MATE);

        assert_eq!(
            board.to_fen(),
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4"
        );
        assert!(board.in_check());
        assert!(board.is_game_over());
        assert_eq!(board.termination(), Some(Termination::Checkmate));
        assert_eq!(board.status(), GameStatus::Checkmate);
        assert_eq!(board.winner(), Some(Color::White));
        assert!(board.legal_moves().is_empty());
        assert!(board
            .pieces()
            .filter(|p| p.color == Color::Black)
            .all(|p| p.legal_moves.is_empty()));
    }

    #[test]
    fn test_fools_mate_credits_black() {
        let board = play(&Board::new(), &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(
            board.to_fen(),
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
        );
        assert_eq!(board.termination(), Some(Termination::Checkmate));
        assert_eq!(board.winner(), Some(Color::Black));
    }

    #[test]
    fn test_back_rank_mate() {
        let board = board_from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        let outcome = board.attempt_move(sq("a1"), sq("a8"));

        assert!(outcome.accepted);
        assert_eq!(outcome.fen, "R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1");
        assert_eq!(outcome.board.status(), GameStatus::Checkmate);
    }

    #[test]
    fn test_moves_after_checkmate_are_rejected() {
        let board = play(&Board::new(), &SCHOLARS_MATE);

        let outcome = board.attempt_move(sq("e8"), sq("f7"));
        assert!(!outcome.accepted);
        assert_eq!(outcome.rejection, Some(ChessError::GameOver));
        assert_eq!(outcome.board, board);
        assert!(!board.is_legal(sq("e8"), sq("f7")));
        assert!(!board.is_legal(sq("f7"), sq("e8")));
    }

    #[test]
    fn test_stalemate_by_move() {
        let board = board_from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1");
        assert_eq!(board.status(), GameStatus::InProgress);

        let outcome = board.attempt_move(sq("f1"), sq("f7"));
        assert!(outcome.accepted);
        assert_eq!(outcome.fen, "7k/5Q2/6K1/8/8/8/8/8 b - - 1 1");

        let board = outcome.board;
        assert!(!board.in_check());
        assert_eq!(board.termination(), Some(Termination::Stalemate));
        assert_eq!(board.status(), GameStatus::Stalemate);
        // the side that still had moves is credited, stalemate stays distinguishable
        assert_eq!(board.winner(), Some(Color::White));
        assert_eq!(
            board.apply_move("h8g8".parse().unwrap()),
            Err(ChessError::GameOver)
        );
    }

    #[test]
    fn test_check_is_not_termination() {
        let board = play(&Board::new(), &["e2e4", "f7f6", "d1h5"]);
        assert_eq!(board.status(), GameStatus::Check);
        assert_eq!(board.termination(), None);
        assert_eq!(board.winner(), None);
        assert_eq!(
            board
                .legal_moves()
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>(),
            vec!["g7g6"]
        );
    }

    #[test]
    fn test_loaded_terminal_position() {
        let board = board_from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
        assert_eq!(board.termination(), Some(Termination::Checkmate));

        let board = board_from_fen("k7/P7/K7/8/8/8/8/8 b - - 0 1");
        assert_eq!(board.termination(), Some(Termination::Stalemate));
    }
}
