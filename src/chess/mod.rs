// Re-export all public items
pub use self::board::{Board, GameStatus, MoveOutcome, Termination};
pub use self::error::ChessError;
pub use self::moves::Move;
pub use self::piece::{Color, Piece, PieceId, PieceType, PieceView};
pub use self::position::Position;

// Define submodules
mod board;
mod error;
mod fen;
mod moves;
mod piece;
mod position;
pub mod rules;
