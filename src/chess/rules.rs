//! Pseudo-legal move generation.
//!
//! Every generator is a pure function of one piece and the full piece list.
//! None of them look at whether the mover's own king ends up attacked; the
//! board filters that afterwards by simulation.

use super::piece::{Color, Piece, PieceType};
use super::position::Position;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The piece standing on `pos`, if any
pub fn piece_at(pieces: &[Piece], pos: Position) -> Option<&Piece> {
    pieces.iter().find(|p| p.position == pos)
}

/// Squares `piece` could move to, ignoring the safety of its own king.
/// Castling is not included, see [`castling_moves`].
pub fn pseudo_legal_moves(piece: &Piece, pieces: &[Piece]) -> Vec<Position> {
    match piece.piece_type {
        PieceType::Pawn => pawn_moves(piece, pieces),
        PieceType::Knight => step_moves(piece, pieces, &KNIGHT_OFFSETS),
        PieceType::Bishop => ray_moves(piece, pieces, &BISHOP_DIRECTIONS),
        PieceType::Rook => ray_moves(piece, pieces, &ROOK_DIRECTIONS),
        PieceType::Queen => {
            let mut moves = ray_moves(piece, pieces, &ROOK_DIRECTIONS);
            moves.extend(ray_moves(piece, pieces, &BISHOP_DIRECTIONS));
            moves
        }
        PieceType::King => step_moves(piece, pieces, &KING_OFFSETS),
    }
}

fn pawn_moves(pawn: &Piece, pieces: &[Piece]) -> Vec<Position> {
    let mut moves = Vec::new();
    let direction = pawn.color.pawn_direction();

    if let Some(one) = pawn.position.offset(0, direction) {
        if piece_at(pieces, one).is_none() {
            moves.push(one);

            if pawn.position.rank == pawn.color.pawn_start_rank() {
                if let Some(two) = pawn.position.offset(0, 2 * direction) {
                    if piece_at(pieces, two).is_none() {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(target) = pawn.position.offset(side, direction) else {
            continue;
        };

        match piece_at(pieces, target) {
            Some(occupant) if occupant.color != pawn.color => moves.push(target),
            Some(_) => {}
            None => {
                // en passant: the victim stands beside us, we land behind it
                let victim = pawn
                    .position
                    .offset(side, 0)
                    .and_then(|beside| piece_at(pieces, beside));
                if let Some(victim) = victim {
                    if victim.is_pawn() && victim.color != pawn.color && victim.en_passant_eligible
                    {
                        moves.push(target);
                    }
                }
            }
        }
    }

    moves
}

fn step_moves(piece: &Piece, pieces: &[Piece], offsets: &[(i8, i8)]) -> Vec<Position> {
    offsets
        .iter()
        .filter_map(|&(df, dr)| piece.position.offset(df, dr))
        .filter(|&target| match piece_at(pieces, target) {
            Some(occupant) => occupant.color != piece.color,
            None => true,
        })
        .collect()
}

fn ray_moves(piece: &Piece, pieces: &[Piece], directions: &[(i8, i8)]) -> Vec<Position> {
    let mut moves = Vec::new();

    for &(df, dr) in directions {
        let mut current = piece.position;
        while let Some(next) = current.offset(df, dr) {
            match piece_at(pieces, next) {
                Some(occupant) => {
                    if occupant.color != piece.color {
                        moves.push(next);
                    }
                    break;
                }
                None => moves.push(next),
            }
            current = next;
        }
    }

    moves
}

/// Two-square king destinations for every unmoved rook on the king's rank
/// with nothing standing between them. Empty for anything but an unmoved king.
pub fn castling_moves(king: &Piece, pieces: &[Piece]) -> Vec<Position> {
    if !king.is_king() || king.has_moved {
        return Vec::new();
    }

    pieces
        .iter()
        .filter(|rook| {
            rook.is_rook()
                && rook.color == king.color
                && !rook.has_moved
                && rook.position.rank == king.position.rank
                && rook.position.file.abs_diff(king.position.file) >= 3
        })
        .filter(|rook| {
            king.position
                .between_on_rank(&rook.position)
                .all(|square| piece_at(pieces, square).is_none())
        })
        .filter_map(|rook| {
            let direction = if rook.position.file > king.position.file {
                1
            } else {
                -1
            };
            king.position.offset(2 * direction, 0)
        })
        .collect()
}

/// Whether `piece` attacks `target`. Pawns only attack diagonally, so their
/// forward pushes never count.
pub fn threatens(piece: &Piece, target: Position, pieces: &[Piece]) -> bool {
    pseudo_legal_moves(piece, pieces)
        .into_iter()
        .filter(|square| !piece.is_pawn() || square.file != piece.position.file)
        .any(|square| square == target)
}

/// Whether any piece of color `by` attacks `target`
pub fn is_attacked(target: Position, by: Color, pieces: &[Piece]) -> bool {
    pieces
        .iter()
        .filter(|p| p.color == by)
        .any(|p| threatens(p, target, pieces))
}
