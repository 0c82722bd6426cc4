pub mod app;
pub mod commands;
pub mod display;

pub use app::{play_moves, starting_board, App, Config, PlayReport, PlayedMove};
pub use commands::{Cli, Commands, ConfigCommand};
pub use display::{display_board, display_game_status, format_game_status};
