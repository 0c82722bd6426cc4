pub mod chess;
pub mod cli;

// Re-export key types for easy testing
pub use chess::{Board, ChessError, Color, Move, MoveOutcome, Piece, PieceType, Position};
