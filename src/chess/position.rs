use super::error::ChessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A square on the board. Values are never mutated; stepping produces a new `Position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub file: u8, // 0-7 corresponding to a-h
    pub rank: u8, // 0-7 corresponding to 1-8
}

impl Position {
    pub fn new(file: u8, rank: u8) -> Result<Self, ChessError> {
        if file > 7 {
            return Err(ChessError::InvalidPosition(format!(
                "File must be 0-7, got {}",
                file
            )));
        }
        if rank > 7 {
            return Err(ChessError::InvalidPosition(format!(
                "Rank must be 0-7, got {}",
                rank
            )));
        }

        Ok(Self { file, rank })
    }

    /// Create position without validation (for internal use when bounds are guaranteed)
    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Create position from file and rank characters
    pub fn from_chars(file: char, rank: char) -> Result<Self, ChessError> {
        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) {
            return Err(ChessError::InvalidPosition(format!(
                "Invalid file '{}'. Must be a-h.",
                file
            )));
        }

        if !('1'..='8').contains(&rank) {
            return Err(ChessError::InvalidPosition(format!(
                "Invalid rank '{}'. Must be 1-8.",
                rank
            )));
        }

        Ok(Position {
            file: file_lower as u8 - b'a',
            rank: rank as u8 - b'1',
        })
    }

    /// The square `df` files and `dr` ranks away, or `None` if that leaves the board
    pub fn offset(&self, df: i8, dr: i8) -> Option<Position> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Position::new_unchecked(file as u8, rank as u8))
        } else {
            None
        }
    }

    // Convert file to character (0 -> 'a', 1 -> 'b', etc.)
    pub fn file_char(&self) -> char {
        (self.file + b'a') as char
    }

    // Convert rank to chess notation (0 -> '1', 1 -> '2', etc.)
    pub fn rank_char(&self) -> char {
        (self.rank + b'1') as char
    }

    /// Squares strictly between two positions on the same rank
    pub fn between_on_rank(&self, other: &Position) -> impl Iterator<Item = Position> {
        let rank = self.rank;
        let (low, high) = if self.file < other.file {
            (self.file, other.file)
        } else {
            (other.file, self.file)
        };
        let same_rank = self.rank == other.rank;
        (low + 1..high)
            .filter(move |_| same_rank)
            .map(move |file| Position::new_unchecked(file, rank))
    }

    /// Get all positions on the board
    pub fn all_positions() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Position { file, rank }))
    }
}

// Implement Display trait for algebraic notation
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank),
            _ => Err(ChessError::InvalidPosition(format!(
                "Position must be exactly 2 characters (e.g., 'e4'), got '{}'",
                s
            ))),
        }
    }
}
