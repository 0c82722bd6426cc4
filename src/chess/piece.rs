use super::error::ChessError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side owning a piece. White moves first and is written uppercase in FEN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Opposite color
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this color advance in
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this color's king and rooks at the start of the game
    pub fn back_rank(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_start_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(&self) -> u8 {
        self.opposite().back_rank()
    }
}

// Implement Display trait for human-readable output
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    /// Uppercase FEN letter for this piece type
    pub fn fen_char(&self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    /// Whether a pawn may turn into this piece type
    pub fn is_promotion_target(&self) -> bool {
        !matches!(self, PieceType::Pawn | PieceType::King)
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

// Implement FromStr for parsing with consistent error handling
impl FromStr for PieceType {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "P" | "PAWN" => Ok(PieceType::Pawn),
            "R" | "ROOK" => Ok(PieceType::Rook),
            "N" | "KNIGHT" => Ok(PieceType::Knight),
            "B" | "BISHOP" => Ok(PieceType::Bishop),
            "Q" | "QUEEN" => Ok(PieceType::Queen),
            "K" | "KING" => Ok(PieceType::King),
            _ => Err(ChessError::InvalidPieceType(format!(
                "Expected one of: P, R, N, B, Q, K, got '{}'",
                s
            ))),
        }
    }
}

/// Identity of a piece, stable across board clones and moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

/// A piece and its placement record.
///
/// `legal_moves` is a cache filled by the board's recomputation. It only
/// holds destinations for the side to move and is stale once the piece is
/// relocated, until the board recomputes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub piece_type: PieceType,
    pub color: Color,
    pub position: Position,
    pub has_moved: bool,
    /// Pawn only: set for the single ply after a two-square advance
    pub en_passant_eligible: bool,
    pub legal_moves: Vec<Position>,
}

impl Piece {
    pub fn new(id: PieceId, piece_type: PieceType, color: Color, position: Position) -> Self {
        Self {
            id,
            piece_type,
            color,
            position,
            has_moved: false,
            en_passant_eligible: false,
            legal_moves: Vec::new(),
        }
    }

    pub fn is_pawn(&self) -> bool {
        self.piece_type == PieceType::Pawn
    }

    pub fn is_king(&self) -> bool {
        self.piece_type == PieceType::King
    }

    pub fn is_rook(&self) -> bool {
        self.piece_type == PieceType::Rook
    }

    /// FEN letter: uppercase for White, lowercase for Black
    pub fn fen_char(&self) -> char {
        let base = self.piece_type.fen_char();
        match self.color {
            Color::White => base,
            Color::Black => base.to_ascii_lowercase(),
        }
    }

    /// Serializable rendering view of this piece
    pub fn view(&self) -> PieceView {
        PieceView {
            square: self.position.to_string(),
            piece_type: self.piece_type,
            color: self.color,
            legal_moves: self.legal_moves.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

/// What a renderer needs per occupied square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    pub square: String,
    pub piece_type: PieceType,
    pub color: Color,
    pub legal_moves: Vec<String>,
}
