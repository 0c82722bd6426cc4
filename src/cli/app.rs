use crate::chess::{Board, ChessError, Move, Position};
use crate::cli::display::{display_board, display_game_status};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter used when RUST_LOG is not set
    pub log_filter: String,
    /// Print the board after playing moves
    pub show_board: bool,
    /// Print the legal moves of the side to move after playing moves
    pub show_legal_moves: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            show_board: true,
            show_legal_moves: false,
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        ProjectDirs::from("dev", "rookery", "rookery")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    /// Get the default config file path
    pub fn default_config_file() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
            let config: Config =
                toml::from_str(&content).context("Failed to parse configuration file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, content).context("Failed to write configuration file")?;

        Ok(())
    }
}

/// One move of a played sequence and whether the board accepted it
#[derive(Debug, Clone)]
pub struct PlayedMove {
    pub input: String,
    pub result: std::result::Result<(), ChessError>,
}

/// Outcome of playing a sequence of moves
#[derive(Debug, Clone)]
pub struct PlayReport {
    pub moves: Vec<PlayedMove>,
    pub board: Board,
}

impl PlayReport {
    pub fn all_accepted(&self) -> bool {
        self.moves.iter().all(|m| m.result.is_ok())
    }
}

/// Play `moves` in order on `board`, stopping at the first one that is rejected
pub fn play_moves<S: AsRef<str>>(board: Board, moves: &[S]) -> PlayReport {
    let mut board = board;
    let mut played = Vec::with_capacity(moves.len());

    for input in moves {
        let input = input.as_ref();
        let outcome = Move::from_str_with_color(input, board.side_to_move())
            .map(|mv| board.attempt(mv));

        let result = match outcome {
            Ok(outcome) if outcome.accepted => {
                board = outcome.board;
                Ok(())
            }
            Ok(outcome) => Err(outcome
                .rejection
                .unwrap_or_else(|| ChessError::InvalidMove(input.to_string()))),
            Err(parse_error) => Err(parse_error),
        };

        let rejected = result.is_err();
        played.push(PlayedMove {
            input: input.to_string(),
            result,
        });
        if rejected {
            break;
        }
    }

    PlayReport {
        moves: played,
        board,
    }
}

/// Board from an optional FEN argument
pub fn starting_board(fen: Option<&str>) -> Result<Board> {
    match fen {
        Some(fen) => Board::from_fen(fen).with_context(|| format!("Failed to load FEN '{fen}'")),
        None => Ok(Board::new()),
    }
}

/// Main application state
pub struct App {
    /// Application configuration
    pub config: Config,
    /// Where the configuration was loaded from
    pub config_path: PathBuf,
}

impl App {
    /// Create a new App, loading the configuration from `config_path` or the default location
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => Config::default_config_file()?,
        };
        let config =
            Config::load_or_create(&config_path).context("Failed to initialize configuration")?;

        Ok(App {
            config,
            config_path,
        })
    }

    /// Handle the 'new' command
    pub fn handle_new(&self) -> Result<()> {
        println!("{}", Board::new().to_fen());
        Ok(())
    }

    /// Handle the 'play' command
    pub fn handle_play(&self, fen: Option<&str>, json: bool, moves: &[String]) -> Result<()> {
        let board = starting_board(fen)?;
        let report = play_moves(board, moves);

        for played in &report.moves {
            match &played.result {
                Ok(()) => info!("Accepted {}", played.input),
                Err(e) => {
                    warn!("Rejected {}: {}", played.input, e);
                    println!("✗ {}: {}", played.input, e);
                }
            }
        }

        let board = &report.board;
        if json {
            let snapshot = serde_json::to_string_pretty(&board.snapshot())
                .context("Failed to serialize board snapshot")?;
            println!("{snapshot}");
            return Ok(());
        }

        println!("{}", board.to_fen());
        if self.config.show_board {
            display_board(board);
        }
        display_game_status(board);
        if self.config.show_legal_moves {
            let moves: Vec<String> = board.legal_moves().iter().map(|m| m.to_string()).collect();
            println!("Legal moves: {}", moves.join(" "));
        }

        if !report.all_accepted() {
            anyhow::bail!("Not every move was accepted");
        }
        Ok(())
    }

    /// Handle the 'moves' command
    pub fn handle_moves(&self, fen: Option<&str>, square: &str) -> Result<()> {
        let board = starting_board(fen)?;
        let square: Position = square
            .parse()
            .with_context(|| format!("Invalid square '{square}'"))?;

        let piece = board
            .piece_at(square)
            .ok_or(ChessError::EmptySquare(square))?;

        let mut destinations: Vec<String> =
            piece.legal_moves.iter().map(|p| p.to_string()).collect();
        destinations.sort();

        if destinations.is_empty() {
            println!("{} on {} has no legal moves", piece.piece_type, square);
        } else {
            println!("{}", destinations.join(" "));
        }
        Ok(())
    }

    /// Handle the 'config path' command
    pub fn handle_config_path(&self) -> Result<()> {
        println!("{}", self.config_path.display());
        Ok(())
    }

    /// Handle the 'config show' command
    pub fn handle_config_show(&self) -> Result<()> {
        let content =
            toml::to_string_pretty(&self.config).context("Failed to serialize configuration")?;
        print!("{content}");
        Ok(())
    }
}
