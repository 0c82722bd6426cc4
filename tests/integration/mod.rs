//! Integration tests for the chess engine
//!
//! These exercise the board through its public surface the way a UI
//! collaborator would: submit a move, read back the pieces and the FEN.

// Board construction, move acceptance and rejection
pub mod chess_board_integration;



// Checkmate and stalemate detection
pub mod game_termination;
