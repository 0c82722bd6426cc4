use crate::chess::{Board, GameStatus, Termination};

/// Display the board as ASCII from White's perspective
pub fn display_board(board: &Board) {
    println!("{}", board.to_ascii());
}

/// One-line summary of whose turn it is and how the game stands
pub fn format_game_status(board: &Board) -> String {
    let side = board.side_to_move();
    let move_number = board.fullmove_number();

    match board.status() {
        GameStatus::InProgress => format!("Move {move_number}, {side} to move"),
        GameStatus::Check => format!("Move {move_number}, {side} to move and in check"),
        GameStatus::Checkmate | GameStatus::Stalemate => {
            let how = match board.termination() {
                Some(Termination::Checkmate) => "Checkmate",
                _ => "Stalemate",
            };
            match board.winner() {
                Some(winner) => format!("{how}: {side} has no legal moves, {winner} credited"),
                None => format!("{how}: {side} has no legal moves"),
            }
        }
    }
}

/// Display the game status line
pub fn display_game_status(board: &Board) {
    println!("{}", format_game_status(board));
}
