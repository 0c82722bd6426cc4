use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rookery")]
#[command(about = "A chess rules engine: play moves, list legal moves and print positions as FEN")]
pub struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the FEN of the standard starting position
    New,

    /// Play a sequence of moves and show the resulting position
    ///
    /// Moves use coordinate notation. Castling is the king's two-square
    /// step or O-O / O-O-O. Promotion appends the piece letter.
    /// Playing stops at the first rejected move.
    ///
    /// Examples:
    ///   rookery play e2e4 e7e5 g1f3
    ///   rookery play --fen "8/P6k/8/8/8/8/8/K7 w - - 0 1" a7a8n
    Play {
        /// Start from this position instead of the initial one
        #[arg(long)]
        fen: Option<String>,

        /// Print the final pieces and their legal moves as JSON
        #[arg(long)]
        json: bool,

        /// Moves to play in order
        moves: Vec<String>,
    },

    /// List the legal destinations of the piece on a square
    ///
    /// Example: rookery moves --fen "<FEN>" e2
    Moves {
        /// Position to inspect instead of the initial one
        #[arg(long)]
        fen: Option<String>,

        /// Square holding the piece, e.g. e2
        square: String,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the configuration file location
    Path,
    /// Show the active configuration
    Show,
}
