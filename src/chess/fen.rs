//! Forsyth-Edwards Notation for [`Board`].
//!
//! Format: `piece_placement active_color castling_rights en_passant halfmove fullmove`,
//! e.g. `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`.

use super::board::Board;
use super::piece::PieceId;
use super::{ChessError, Color, Piece, PieceType, Position};
use std::str::FromStr;

/// Home files of the king and the rook for each castling right letter
const CASTLING_RIGHTS: [(char, Color, u8); 4] = [
    ('K', Color::White, 7),
    ('Q', Color::White, 0),
    ('k', Color::Black, 7),
    ('q', Color::Black, 0),
];

const KING_HOME_FILE: u8 = 4;

impl Board {
    /// Converts the current board state to FEN notation
    pub fn to_fen(&self) -> String {
        let piece_placement = self.generate_piece_placement();
        let active_color = match self.side_to_move() {
            Color::White => "w",
            Color::Black => "b",
        };
        let castling_rights = self.castling_field();
        let en_passant = match self.en_passant_target() {
            Some(pos) => pos.to_string(),
            None => "-".to_string(),
        };
        let halfmove = self.halfmove_clock();
        let fullmove = self.fullmove_number();

        format!(
            "{piece_placement} {active_color} {castling_rights} {en_passant} {halfmove} {fullmove}"
        )
    }

    /// Iterates through ranks 8 down to 1, collapsing runs of empty squares into digits
    fn generate_piece_placement(&self) -> String {
        let mut ranks = Vec::with_capacity(8);

        for rank in (0..8).rev() {
            let mut rank_string = String::new();
            let mut empty_count = 0;

            for file in 0..8 {
                match self.piece_at(Position::new_unchecked(file, rank)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            rank_string.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        rank_string.push(piece.fen_char());
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                rank_string.push_str(&empty_count.to_string());
            }

            ranks.push(rank_string);
        }

        ranks.join("/")
    }

    /// A right is listed when the king and that wing's rook are unmoved on
    /// their home squares. Every relocation sets `has_moved`, so an unmoved
    /// piece on a home square is the original one.
    fn castling_field(&self) -> String {
        let unmoved_on = |piece_type: PieceType, color: Color, file: u8| {
            self.piece_at(Position::new_unchecked(file, color.back_rank()))
                .is_some_and(|p| p.piece_type == piece_type && p.color == color && !p.has_moved)
        };

        let rights: String = CASTLING_RIGHTS
            .iter()
            .filter(|&&(_, color, rook_file)| {
                unmoved_on(PieceType::King, color, KING_HOME_FILE)
                    && unmoved_on(PieceType::Rook, color, rook_file)
            })
            .map(|&(letter, _, _)| letter)
            .collect();

        if rights.is_empty() {
            "-".to_string()
        } else {
            rights
        }
    }

    /// Create a board from a FEN string.
    ///
    /// Which kings and rooks count as unmoved comes from the castling field,
    /// pawns count as unmoved on their start rank, and the pawn that just
    /// advanced past the en passant square is made capturable.
    pub fn from_fen(fen: &str) -> Result<Board, ChessError> {
        let fen = fen.trim();
        if fen.is_empty() {
            return Err(ChessError::InvalidFen(
                "FEN string cannot be empty".to_string(),
            ));
        }

        let parts: Vec<&str> = fen.split_whitespace().collect();
        let [piece_placement, active_color, castling_rights, en_passant, halfmove_str, fullmove_str] =
            parts.as_slice()
        else {
            let found_count = parts.len();
            return Err(ChessError::InvalidFen(format!(
                "FEN must have exactly 6 fields (piece_placement active_color castling_rights en_passant halfmove fullmove), found {found_count}"
            )));
        };

        let mut pieces = parse_piece_placement(piece_placement)?;

        let side_to_move = match *active_color {
            "w" => Color::White,
            "b" => Color::Black,
            _ => {
                return Err(ChessError::InvalidFen(format!(
                    "Invalid active color '{active_color}' (must be 'w' for White or 'b' for Black)"
                )))
            }
        };

        let rights = parse_castling_rights(castling_rights)?;
        apply_movement_history(&mut pieces, &rights)?;

        let en_passant_target = if *en_passant == "-" {
            None
        } else {
            let target = Position::from_str(en_passant).map_err(|e| {
                ChessError::InvalidFen(format!("Invalid en passant target '{en_passant}': {e}"))
            })?;
            mark_en_passant_pawn(&mut pieces, target, side_to_move)?;
            Some(target)
        };

        let halfmove_clock = halfmove_str.parse::<u32>().map_err(|e| {
            ChessError::InvalidFen(format!(
                "Invalid halfmove clock '{halfmove_str}' (must be a non-negative integer): {e}"
            ))
        })?;

        let fullmove_number = fullmove_str.parse::<u32>().map_err(|e| {
            ChessError::InvalidFen(format!(
                "Invalid fullmove number '{fullmove_str}' (must be a positive integer): {e}"
            ))
        })?;
        if fullmove_number == 0 {
            return Err(ChessError::InvalidFen(
                "Fullmove number must be at least 1".to_string(),
            ));
        }

        let ply_count = (fullmove_number - 1)
            .checked_mul(2)
            .and_then(|plies| plies.checked_add(u32::from(side_to_move == Color::Black)))
            .ok_or_else(|| {
                ChessError::InvalidFen(format!(
                    "Fullmove number {fullmove_number} is too large"
                ))
            })?;

        let board = Board::from_parts(
            pieces,
            side_to_move,
            ply_count,
            halfmove_clock,
            en_passant_target,
        )
        .map_err(|e| match e {
            ChessError::CorruptBoard(msg) => ChessError::InvalidFen(msg),
            other => other,
        })?;

        if board.opponent_in_check() {
            return Err(ChessError::InvalidFen(format!(
                "{} is in check but it is {}'s turn",
                side_to_move.opposite(),
                side_to_move
            )));
        }

        Ok(board)
    }
}

impl FromStr for Board {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

fn parse_piece_placement(placement: &str) -> Result<Vec<Piece>, ChessError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        let found_ranks = ranks.len();
        return Err(ChessError::InvalidFen(format!(
            "Piece placement must have exactly 8 ranks separated by '/', found {found_ranks}"
        )));
    }

    let mut pieces = Vec::with_capacity(32);

    // FEN lists rank 8 first
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_idx as u8;
        let fen_rank_number = rank + 1;

        if rank_str.is_empty() {
            return Err(ChessError::InvalidFen(format!(
                "Rank {fen_rank_number} cannot be empty"
            )));
        }

        let mut file: u8 = 0;

        for c in rank_str.chars() {
            if file >= 8 {
                return Err(ChessError::InvalidFen(format!(
                    "Rank {fen_rank_number} has more than 8 squares (found character '{c}')"
                )));
            }

            if let Some(empty_squares) = c.to_digit(10) {
                if empty_squares == 0 || file as u32 + empty_squares > 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "Invalid empty square count '{c}' in rank {fen_rank_number}"
                    )));
                }
                file += empty_squares as u8;
                continue;
            }

            let (piece_type, color) = char_to_piece(c).ok_or_else(|| {
                let position = file + 1;
                ChessError::InvalidFen(format!(
                    "Invalid piece character '{c}' in rank {fen_rank_number} at position {position} (valid pieces: KQRBNPkqrbnp)"
                ))
            })?;

            if piece_type == PieceType::Pawn && (rank == 0 || rank == 7) {
                return Err(ChessError::InvalidFen(format!(
                    "Pawn on rank {fen_rank_number} is not allowed"
                )));
            }

            let id = PieceId(pieces.len() as u8);
            pieces.push(Piece::new(
                id,
                piece_type,
                color,
                Position::new_unchecked(file, rank),
            ));
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::InvalidFen(format!(
                "Rank {fen_rank_number} must represent exactly 8 squares, found {file}"
            )));
        }
    }

    if pieces.len() > 32 {
        return Err(ChessError::InvalidFen(format!(
            "Too many pieces: {}",
            pieces.len()
        )));
    }

    Ok(pieces)
}

fn char_to_piece(c: char) -> Option<(PieceType, Color)> {
    let piece_type = PieceType::from_str(&c.to_string()).ok()?;
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some((piece_type, color))
}

fn parse_castling_rights(field: &str) -> Result<Vec<char>, ChessError> {
    if field == "-" {
        return Ok(Vec::new());
    }

    let mut rights = Vec::with_capacity(4);
    let mut last_index = None;
    for c in field.chars() {
        let index = CASTLING_RIGHTS
            .iter()
            .position(|&(letter, _, _)| letter == c)
            .ok_or_else(|| {
                ChessError::InvalidFen(format!(
                    "Invalid character '{c}' in castling rights '{field}' (valid characters: K, Q, k, q, or '-' for none)"
                ))
            })?;

        if last_index.is_some_and(|last| index <= last) {
            return Err(ChessError::InvalidFen(format!(
                "Castling rights '{field}' not in conventional order (expected order: KQkq)"
            )));
        }
        last_index = Some(index);
        rights.push(c);
    }

    Ok(rights)
}

/// Mark kings, rooks and pawns that have not moved yet; everything else counts as moved
fn apply_movement_history(pieces: &mut [Piece], rights: &[char]) -> Result<(), ChessError> {
    for &(letter, color, rook_file) in CASTLING_RIGHTS.iter() {
        if !rights.contains(&letter) {
            continue;
        }
        let rank = color.back_rank();
        let king_home = pieces.iter().any(|p| {
            p.is_king() && p.color == color && p.position == Position::new_unchecked(KING_HOME_FILE, rank)
        });
        let rook_home = pieces.iter().any(|p| {
            p.is_rook() && p.color == color && p.position == Position::new_unchecked(rook_file, rank)
        });
        if !king_home || !rook_home {
            return Err(ChessError::InvalidFen(format!(
                "Castling right '{letter}' needs the {color} king and rook on their home squares"
            )));
        }
    }

    for piece in pieces.iter_mut() {
        let rank = piece.color.back_rank();
        let unmoved = match piece.piece_type {
            PieceType::Pawn => piece.position.rank == piece.color.pawn_start_rank(),
            PieceType::King => {
                piece.position == Position::new_unchecked(KING_HOME_FILE, rank)
                    && CASTLING_RIGHTS
                        .iter()
                        .any(|&(letter, color, _)| color == piece.color && rights.contains(&letter))
            }
            PieceType::Rook => CASTLING_RIGHTS.iter().any(|&(letter, color, rook_file)| {
                color == piece.color
                    && rights.contains(&letter)
                    && piece.position == Position::new_unchecked(rook_file, rank)
            }),
            _ => false,
        };
        piece.has_moved = !unmoved;
    }

    Ok(())
}

/// Flag the pawn that just skipped over `target` as capturable en passant
fn mark_en_passant_pawn(
    pieces: &mut [Piece],
    target: Position,
    side_to_move: Color,
) -> Result<(), ChessError> {
    let mover = side_to_move.opposite();
    let expected_rank = mover.pawn_start_rank() as i8 + mover.pawn_direction();
    if target.rank as i8 != expected_rank {
        return Err(ChessError::InvalidFen(format!(
            "En passant target {target} is not on {mover}'s skipped rank"
        )));
    }

    // the pawn passed over the target from its start square, both are empty now
    let start_square = target.offset(0, -mover.pawn_direction());
    for square in [Some(target), start_square].into_iter().flatten() {
        if pieces.iter().any(|p| p.position == square) {
            return Err(ChessError::InvalidFen(format!(
                "En passant target {target} requires {square} to be empty"
            )));
        }
    }

    let pawn_square = target.offset(0, mover.pawn_direction());
    let pawn = pieces
        .iter_mut()
        .find(|p| Some(p.position) == pawn_square && p.is_pawn() && p.color == mover)
        .ok_or_else(|| {
            ChessError::InvalidFen(format!(
                "En passant target {target} has no {mover} pawn in front of it"
            ))
        })?;
    pawn.en_passant_eligible = true;

    Ok(())
}
