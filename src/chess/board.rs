use super::moves::Move;
use super::piece::{PieceId, PieceView};
use super::rules;
use super::{ChessError, Color, Piece, PieceType, Position};
use std::collections::HashSet;
use tracing::{debug, error, info};

/// Why a game ended. The side to move has no legal move in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The side to move is in check
    Checkmate,
    /// The side to move is not in check
    Stalemate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Check,
    Checkmate,
    Stalemate,
}

/// How a move changes the board beyond relocating the mover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveKind {
    Quiet,
    Capture,
    DoublePush,
    EnPassant,
    Castle,
}

/// Result of [`Board::attempt_move`]
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    pub accepted: bool,
    /// The board after the move, or the unchanged board if it was rejected
    pub board: Board,
    pub fen: String,
    pub rejection: Option<ChessError>,
}

/// The game state: an arena of piece snapshots plus turn bookkeeping.
///
/// A `Board` is never changed in place by a move. [`Board::apply_move`]
/// builds the next board on a copy and only returns it once legal moves have
/// been recomputed, so callers always see a consistent position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pieces: Vec<Piece>,

    /// Player to move. White moves on even plies, Black on odd plies.
    side_to_move: Color,

    /// Plies played since the start position (0 before White's first move)
    ply_count: u32,

    /// Plies since the last capture or pawn move
    halfmove_clock: u32,

    /// Square skipped by a pawn's two-square advance on the previous ply
    en_passant_target: Option<Position>,

    termination: Option<Termination>,
}

impl Board {
    /// Create a new board with the standard starting position
    pub fn new() -> Self {
        let mut board = Self {
            pieces: Vec::with_capacity(32),
            side_to_move: Color::White,
            ply_count: 0,
            halfmove_clock: 0,
            en_passant_target: None,
            termination: None,
        };

        board.setup_starting_position();
        board.calculate_all_moves();
        board
    }

    /// Build a board from loose parts, checking invariants and computing legal moves
    pub(super) fn from_parts(
        pieces: Vec<Piece>,
        side_to_move: Color,
        ply_count: u32,
        halfmove_clock: u32,
        en_passant_target: Option<Position>,
    ) -> Result<Self, ChessError> {
        let mut board = Self {
            pieces,
            side_to_move,
            ply_count,
            halfmove_clock,
            en_passant_target,
            termination: None,
        };

        board.check_invariants()?;
        board.calculate_all_moves();
        Ok(board)
    }

    fn setup_starting_position(&mut self) {
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        self.pieces.clear();
        for color in [Color::White, Color::Black] {
            for (file, &piece_type) in back_rank.iter().enumerate() {
                let position = Position::new_unchecked(file as u8, color.back_rank());
                self.push_piece(piece_type, color, position);
            }
            for file in 0..8 {
                self.push_piece(
                    PieceType::Pawn,
                    color,
                    Position::new_unchecked(file, color.pawn_start_rank()),
                );
            }
        }
    }

    fn push_piece(&mut self, piece_type: PieceType, color: Color, position: Position) {
        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(Piece::new(id, piece_type, color, position));
    }

    /// All pieces on the board, in no particular order
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Get the piece at the specified position, if any
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        rules::piece_at(&self.pieces, pos)
    }

    pub fn piece_by_id(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Legal destinations of the piece on `pos`. Empty for the side not to move.
    pub fn legal_moves_from(&self, pos: Position) -> &[Position] {
        self.piece_at(pos)
            .map(|p| p.legal_moves.as_slice())
            .unwrap_or(&[])
    }

    /// Every legal move for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pieces
            .iter()
            .flat_map(|piece| {
                piece.legal_moves.iter().map(move |&to| {
                    let promotion = (piece.is_pawn() && to.rank == piece.color.promotion_rank())
                        .then_some(PieceType::Queen);
                    Move::new_unchecked(piece.position, to, promotion)
                })
            })
            .collect()
    }

    /// Whether moving the piece on `from` to `to` would be accepted
    pub fn is_legal(&self, from: Position, to: Position) -> bool {
        self.termination.is_none()
            && self
                .piece_at(from)
                .is_some_and(|p| p.color == self.side_to_move && p.legal_moves.contains(&to))
    }

    /// Rendering view of every piece, with legal moves for the side to move
    pub fn snapshot(&self) -> Vec<PieceView> {
        let mut views: Vec<PieceView> = self.pieces.iter().map(Piece::view).collect();
        views.sort_by(|a, b| a.square.cmp(&b.square));
        views
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Move counter as written in FEN, starting at 1 and incremented after Black's move
    pub fn fullmove_number(&self) -> u32 {
        self.ply_count / 2 + 1
    }

    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn is_game_over(&self) -> bool {
        self.termination.is_some()
    }

    /// The side credited once the side to move runs out of legal moves.
    ///
    /// Set for stalemate as well as checkmate; use [`Board::termination`] to
    /// tell them apart and score stalemate as the caller sees fit.
    pub fn winner(&self) -> Option<Color> {
        self.termination.map(|_| self.side_to_move.opposite())
    }

    /// Whether the king of the side to move is attacked
    pub fn in_check(&self) -> bool {
        king_attacked(&self.pieces, self.side_to_move)
    }

    /// Whether the side that just moved left its own king attacked
    pub(super) fn opponent_in_check(&self) -> bool {
        king_attacked(&self.pieces, self.side_to_move.opposite())
    }

    pub fn status(&self) -> GameStatus {
        match self.termination {
            Some(Termination::Checkmate) => GameStatus::Checkmate,
            Some(Termination::Stalemate) => GameStatus::Stalemate,
            None if self.in_check() => GameStatus::Check,
            None => GameStatus::InProgress,
        }
    }

    /// Try to move the piece on `from` to `to`.
    ///
    /// Never fails: a rejected attempt reports `accepted = false` together
    /// with the unchanged board. Pawns reaching the last rank become queens.
    pub fn attempt_move(&self, from: Position, to: Position) -> MoveOutcome {
        self.attempt(Move::new_unchecked(from, to, None))
    }

    /// Like [`Board::attempt_move`] but honours the move's promotion choice
    pub fn attempt(&self, mv: Move) -> MoveOutcome {
        match self.apply_move(mv) {
            Ok(board) => MoveOutcome {
                accepted: true,
                fen: board.to_fen(),
                board,
                rejection: None,
            },
            Err(err) => {
                if err.is_defect() {
                    error!("Move {} produced a corrupt board: {}", mv, err);
                } else {
                    debug!("Rejected move {}: {}", mv, err);
                }
                MoveOutcome {
                    accepted: false,
                    board: self.clone(),
                    fen: self.to_fen(),
                    rejection: Some(err),
                }
            }
        }
    }

    /// Apply a move and return the resulting board.
    ///
    /// `self` is left untouched whatever the outcome.
    pub fn apply_move(&self, mv: Move) -> Result<Board, ChessError> {
        if self.termination.is_some() {
            return Err(ChessError::GameOver);
        }

        let mover = self
            .piece_at(mv.from)
            .ok_or(ChessError::EmptySquare(mv.from))?
            .clone();

        if mover.color != self.side_to_move {
            return Err(ChessError::WrongTurn {
                square: mv.from,
                piece: mover.color,
                to_move: self.side_to_move,
            });
        }

        if !mover.legal_moves.contains(&mv.to) {
            return Err(ChessError::InvalidMove(format!(
                "{} on {} cannot move to {}",
                mover.piece_type, mv.from, mv.to
            )));
        }

        let promotes = mover.is_pawn() && mv.to.rank == mover.color.promotion_rank();
        let promotion = match mv.promotion {
            Some(_) if !promotes => {
                return Err(ChessError::InvalidMove(format!(
                    "{} does not reach the last rank, promotion not allowed",
                    mv
                )))
            }
            Some(piece_type) if !piece_type.is_promotion_target() => {
                return Err(ChessError::InvalidMove(format!(
                    "Cannot promote to {}",
                    piece_type
                )))
            }
            Some(piece_type) => Some(piece_type),
            None if promotes => Some(PieceType::Queen),
            None => None,
        };

        let ply_count = self.ply_count.checked_add(1).ok_or_else(|| {
            ChessError::InvalidMove(format!("Ply counter exhausted after {} plies", self.ply_count))
        })?;

        let mut next = self.clone();
        let kind = execute(&mut next.pieces, &mover, mv.to);

        for piece in next.pieces.iter_mut() {
            piece.en_passant_eligible = false;
            piece.legal_moves.clear();
        }
        next.en_passant_target = None;

        if mover.is_pawn() || matches!(kind, MoveKind::Capture | MoveKind::EnPassant) {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }

        if let Some(moved) = next.pieces.iter_mut().find(|p| p.id == mover.id) {
            if kind == MoveKind::DoublePush {
                moved.en_passant_eligible = true;
                next.en_passant_target = mv.from.offset(0, mover.color.pawn_direction());
            }
            if let Some(piece_type) = promotion {
                moved.piece_type = piece_type;
            }
        }

        next.ply_count = ply_count;
        next.side_to_move = self.side_to_move.opposite();

        next.check_invariants()?;
        next.calculate_all_moves();

        debug!(
            "{} played {} ({:?}), {} to move",
            mover.color, mv, kind, next.side_to_move
        );
        if let Some(termination) = next.termination {
            info!(
                "Game over after {} plies: {:?}, {} has no legal moves",
                next.ply_count, termination, next.side_to_move
            );
        }

        Ok(next)
    }

    /// Recompute every cached legal move list and the termination state.
    ///
    /// Only the side to move gets moves; each candidate is played on a copy
    /// of the board and dropped if it leaves that side's king attacked.
    fn calculate_all_moves(&mut self) {
        let side = self.side_to_move;

        let legal: Vec<Vec<Position>> = self
            .pieces
            .iter()
            .map(|piece| {
                if piece.color != side {
                    return Vec::new();
                }
                let mut moves = rules::pseudo_legal_moves(piece, &self.pieces);
                moves.extend(rules::castling_moves(piece, &self.pieces));
                moves.retain(|&to| self.keeps_king_safe(piece, to));
                moves
            })
            .collect();

        for (piece, moves) in self.pieces.iter_mut().zip(legal) {
            piece.legal_moves = moves;
        }

        let has_moves = self.pieces.iter().any(|p| !p.legal_moves.is_empty());
        self.termination = match (has_moves, self.in_check()) {
            (true, _) => None,
            (false, true) => Some(Termination::Checkmate),
            (false, false) => Some(Termination::Stalemate),
        };
    }

    /// Whether `piece` moving to `to` leaves its own king unattacked
    fn keeps_king_safe(&self, piece: &Piece, to: Position) -> bool {
        let mut simulated = self.pieces.clone();
        let kind = execute(&mut simulated, piece, to);

        if kind == MoveKind::Castle {
            // no castling out of check or across an attacked square
            if king_attacked(&self.pieces, piece.color) {
                return false;
            }
            let direction = if to.file > piece.position.file { 1 } else { -1 };
            if let Some(passing) = piece.position.offset(direction, 0) {
                let mut crossing = self.pieces.clone();
                if let Some(king) = crossing.iter_mut().find(|p| p.id == piece.id) {
                    king.position = passing;
                }
                if king_attacked(&crossing, piece.color) {
                    return false;
                }
            }
        }

        !king_attacked(&simulated, piece.color)
    }

    /// Every side has exactly one king and no square holds two pieces
    fn check_invariants(&self) -> Result<(), ChessError> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .pieces
                .iter()
                .filter(|p| p.is_king() && p.color == color)
                .count();
            if kings != 1 {
                return Err(ChessError::CorruptBoard(format!(
                    "{color} has {kings} kings"
                )));
            }
        }

        let mut occupied = HashSet::with_capacity(self.pieces.len());
        for piece in &self.pieces {
            if !occupied.insert(piece.position) {
                return Err(ChessError::CorruptBoard(format!(
                    "Two pieces on {}",
                    piece.position
                )));
            }
        }

        Ok(())
    }

    /// Display the board as ASCII art from White's perspective
    /// Shows rank 8 at the top, rank 1 at the bottom
    pub fn to_ascii(&self) -> String {
        let mut result = String::new();

        result.push_str("  a b c d e f g h\n");

        for rank in (0..8).rev() {
            let rank_number = rank + 1;
            result.push_str(&format!("{rank_number} "));

            for file in 0..8 {
                let symbol = match self.piece_at(Position::new_unchecked(file, rank)) {
                    Some(piece) => piece.fen_char(),
                    None => '.',
                };
                result.push(symbol);

                if file < 7 {
                    result.push(' ');
                }
            }

            result.push_str(&format!(" {rank_number}\n"));
        }

        result.push_str("  a b c d e f g h");

        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the king of `color` is attacked in `pieces`. A missing king is
/// caught by `check_invariants` before any recomputation runs.
fn king_attacked(pieces: &[Piece], color: Color) -> bool {
    pieces
        .iter()
        .find(|p| p.is_king() && p.color == color)
        .is_some_and(|king| rules::is_attacked(king.position, color.opposite(), pieces))
}

fn classify(pieces: &[Piece], mover: &Piece, to: Position) -> MoveKind {
    let from = mover.position;

    if mover.is_king() && from.rank == to.rank && from.file.abs_diff(to.file) == 2 {
        return MoveKind::Castle;
    }
    if rules::piece_at(pieces, to).is_some() {
        return MoveKind::Capture;
    }
    if mover.is_pawn() && is_en_passant(pieces, mover, to) {
        return MoveKind::EnPassant;
    }
    if mover.is_pawn() && from.rank.abs_diff(to.rank) == 2 {
        return MoveKind::DoublePush;
    }
    MoveKind::Quiet
}

/// A diagonal pawn step onto an empty square, beside an opposing pawn that just advanced two squares
fn is_en_passant(pieces: &[Piece], pawn: &Piece, to: Position) -> bool {
    let from = pawn.position;
    let diagonal = from.file.abs_diff(to.file) == 1
        && to.rank as i8 - from.rank as i8 == pawn.color.pawn_direction();
    if !diagonal || rules::piece_at(pieces, to).is_some() {
        return false;
    }

    rules::piece_at(pieces, Position::new_unchecked(to.file, from.rank)).is_some_and(|victim| {
        victim.is_pawn() && victim.color != pawn.color && victim.en_passant_eligible
    })
}

/// Relocate `mover` to `to` inside `pieces`, removing whatever it captures
/// and bringing the rook along when castling.
fn execute(pieces: &mut Vec<Piece>, mover: &Piece, to: Position) -> MoveKind {
    let from = mover.position;
    let kind = classify(pieces, mover, to);

    match kind {
        MoveKind::Capture => pieces.retain(|p| p.position != to),
        MoveKind::EnPassant => {
            let victim = Position::new_unchecked(to.file, from.rank);
            pieces.retain(|p| p.position != victim);
        }
        MoveKind::Castle => {
            let direction = if to.file > from.file { 1 } else { -1 };
            let rook_to = from.offset(direction, 0);
            // the rook is the first piece met walking from the king toward the wing
            let mut square = from.offset(direction, 0);
            while let Some(current) = square {
                if let Some(rook) = pieces.iter_mut().find(|p| p.position == current) {
                    if rook.is_rook() && rook.color == mover.color {
                        if let Some(rook_to) = rook_to {
                            rook.position = rook_to;
                            rook.has_moved = true;
                        }
                    }
                    break;
                }
                square = current.offset(direction, 0);
            }
        }
        MoveKind::Quiet | MoveKind::DoublePush => {}
    }

    if let Some(moved) = pieces.iter_mut().find(|p| p.id == mover.id) {
        moved.position = to;
        moved.has_moved = true;
    }

    kind
}
