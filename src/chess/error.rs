use super::piece::Color;
use super::position::Position;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("Invalid piece type: {0}")]
    InvalidPieceType(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("No piece at {0}")]
    EmptySquare(Position),

    #[error("Cannot move {piece} piece at {square} when it's {to_move}'s turn")]
    WrongTurn {
        square: Position,
        piece: Color,
        to_move: Color,
    },

    #[error("Game is over, no further moves are accepted")]
    GameOver,

    /// The board broke one of its own invariants (missing king, two pieces on
    /// one square). This is a bug in move application, never bad input.
    #[error("Corrupt board state: {0}")]
    CorruptBoard(String),
}

impl ChessError {
    /// True for errors that indicate an engine defect rather than a rejected attempt
    pub fn is_defect(&self) -> bool {
        matches!(self, ChessError::CorruptBoard(_))
    }
}
