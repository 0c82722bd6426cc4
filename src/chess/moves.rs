use super::error::ChessError;
use super::piece::{Color, PieceType};
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A request to move whatever stands on `from` to `to`.
///
/// Castling is written as the king's two-square step (`e1g1`, `e8c8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceType>,
}

impl Move {
    /// Create a new move with validation
    pub fn new(
        from: Position,
        to: Position,
        promotion: Option<PieceType>,
    ) -> Result<Self, ChessError> {
        if from == to {
            return Err(ChessError::InvalidMove(
                "Source and destination positions cannot be the same".to_string(),
            ));
        }

        if let Some(piece_type) = promotion {
            if !piece_type.is_promotion_target() {
                return Err(ChessError::InvalidMove(
                    "Cannot promote to King or Pawn".to_string(),
                ));
            }
        }

        Ok(Self {
            from,
            to,
            promotion,
        })
    }

    /// Create a new move without validation (for internal use when validity is guaranteed)
    pub const fn new_unchecked(from: Position, to: Position, promotion: Option<PieceType>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Parse move string with color context for proper castling disambiguation
    pub fn from_str_with_color(s: &str, color: Color) -> Result<Self, ChessError> {
        let s = s.trim();
        let rank = color.back_rank();

        match s.to_uppercase().as_str() {
            "O-O" | "0-0" => {
                return Ok(Move::new_unchecked(
                    Position::new_unchecked(4, rank),
                    Position::new_unchecked(6, rank),
                    None,
                ));
            }
            "O-O-O" | "0-0-0" => {
                return Ok(Move::new_unchecked(
                    Position::new_unchecked(4, rank),
                    Position::new_unchecked(2, rank),
                    None,
                ));
            }
            _ => {}
        }

        if !s.is_ascii() {
            return Err(ChessError::InvalidMove(format!(
                "Invalid move format '{s}'. Expected ASCII coordinates like 'e2e4'."
            )));
        }

        match s.len() {
            // e2e4
            4 => {
                let from = s[0..2].parse::<Position>()?;
                let to = s[2..4].parse::<Position>()?;
                Self::new(from, to, None)
            }
            // e7e8q
            5 => {
                let from = s[0..2].parse::<Position>()?;
                let to = s[2..4].parse::<Position>()?;
                let promotion = s[4..5].parse::<PieceType>()?;
                Self::new(from, to, Some(promotion))
            }
            _ => Err(ChessError::InvalidMove(format!(
                "Invalid move format '{s}'. Expected 'e2e4', 'e7e8q' for promotion, or 'O-O'/'O-O-O' for castling."
            ))),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.fen_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Castling shorthand assumes White here; use from_str_with_color() when the side is known.
        Self::from_str_with_color(s, Color::White)
    }
}
