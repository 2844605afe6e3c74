//! Move generation.
//!
//! Generation is split into three layers that only call downwards:
//! - [`piece_destinations`]: geometry of a single piece, never castling
//! - [`is_square_attacked`]: built only on `piece_destinations`
//! - [`legal_moves`]: pseudo-legal candidates (including castling) filtered by
//!   a trial make/unmake and an attack check on the mover's king
//!
//! Attack detection never reaches the legality filter or castling, which keeps
//! the layers acyclic.

mod attacks;
mod geometry;
mod legality;

use crate::board::home_square;
use crate::Position;
use chess_core::{Color, File, Move, Piece, Square};
use log::warn;

pub use attacks::{is_in_check, is_square_attacked};
pub use geometry::{
    Geometry, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};
pub use legality::{
    legal_moves, legal_moves_with, make_trial, moves_from, unmake_trial, LegalityMode, SideEffect,
    Trial,
};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves a list holds.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if the list holds the move.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.as_slice().contains(&m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Returns the moves as `(from, to)` algebraic pairs.
    pub fn to_algebraic(&self) -> Vec<(String, String)> {
        self.iter().map(|m| m.to_algebraic()).collect()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl PartialEq for MoveList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for MoveList {}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the pseudo-legal moves of the side to move, in board-scan order.
///
/// Castling candidates follow the king's ordinary steps, kingside first.
pub fn pseudo_legal_moves(position: &Position, mode: LegalityMode) -> MoveList {
    let mut moves = MoveList::new();
    for (from, _) in position.board.pieces_of(position.side_to_move) {
        generate_piece_moves(position, from, mode, &mut moves);
    }
    moves
}

/// Generates the pseudo-legal moves of one piece, castling included.
pub(crate) fn generate_piece_moves(
    position: &Position,
    from: Square,
    mode: LegalityMode,
    moves: &mut MoveList,
) {
    piece_destinations(position, from, moves);
    if let Some((Piece::King, color)) = position.board.piece_at(from) {
        generate_castling_moves(position, from, color, mode, moves);
    }
}

/// Generates the geometric moves of the piece on `from` for that piece's own
/// color, ignoring king safety. Never produces castling.
///
/// Does nothing if `from` is empty.
pub fn piece_destinations(position: &Position, from: Square, moves: &mut MoveList) {
    let Some((piece, color)) = position.board.piece_at(from) else {
        return;
    };

    match Geometry::of(piece) {
        Geometry::Pawn => generate_pawn_moves(position, from, color, moves),
        Geometry::Step(offsets) => generate_step_moves(position, from, color, offsets, moves),
        Geometry::Slide(directions) => {
            generate_slide_moves(position, from, color, directions, moves)
        }
    }
}

/// Generates pseudo-legal pawn moves.
///
/// A diagonal step is a capture onto an enemy piece or onto the en-passant
/// target; both produce the same plain move.
fn generate_pawn_moves(position: &Position, from: Square, us: Color, moves: &mut MoveList) {
    let board = &position.board;
    let dir = us.pawn_direction();

    // Single push, then double push from the home row
    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            moves.push(Move::new(from, one));

            if from.row() == us.pawn_home_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        moves.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    // Captures (left then right)
    for d_col in [-1, 1] {
        if let Some(to) = from.offset(dir, d_col) {
            let enemy = board.color_at(to) == Some(us.opposite());
            if enemy || position.en_passant == Some(to) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

/// Generates single-step moves (knight, king).
fn generate_step_moves(
    position: &Position,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if position.board.color_at(to) != Some(us) {
                moves.push(Move::new(from, to));
            }
        }
    }
}

/// Generates sliding moves (bishop, rook, queen).
///
/// Each ray stops before a friendly piece, on an enemy piece (a capture),
/// or at the edge of the board.
fn generate_slide_moves(
    position: &Position,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(to) = current.offset(d_row, d_col) {
            match position.board.color_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(color) if color != us => {
                    moves.push(Move::new(from, to));
                    break;
                }
                Some(_) => break,
            }
            current = to;
        }
    }
}

/// Generates castling moves if allowed.
///
/// A castling move is the king's two-column step; the rook is left to
/// whoever applies the move.
fn generate_castling_moves(
    position: &Position,
    king: Square,
    us: Color,
    mode: LegalityMode,
    moves: &mut MoveList,
) {
    let rights = position.castling;
    if !rights.can_castle_kingside(us) && !rights.can_castle_queenside(us) {
        return;
    }

    // Can't castle out of check
    if is_square_attacked(position, king, us.opposite()) {
        return;
    }

    if mode == LegalityMode::Strict && king != home_square(us, File::E) {
        warn!(
            "{} holds castling rights but its king stands on {}",
            us, king
        );
        return;
    }

    if rights.can_castle_kingside(us) && can_castle_kingside(position, us, mode) {
        if let Some(to) = king.offset(0, 2) {
            moves.push(Move::new(king, to));
        }
    }

    if rights.can_castle_queenside(us) && can_castle_queenside(position, us, mode) {
        if let Some(to) = king.offset(0, -2) {
            moves.push(Move::new(king, to));
        }
    }
}

/// Kingside: f and g on the back row are empty and not attacked.
fn can_castle_kingside(position: &Position, us: Color, mode: LegalityMode) -> bool {
    let path = [home_square(us, File::F), home_square(us, File::G)];
    path_is_clear(position, &path, &path, us)
        && rook_in_place(position, us, File::H, mode)
}

/// Queenside: b, c and d on the back row are empty; only c and d must be
/// free of attacks.
fn can_castle_queenside(position: &Position, us: Color, mode: LegalityMode) -> bool {
    let empty = [
        home_square(us, File::B),
        home_square(us, File::C),
        home_square(us, File::D),
    ];
    path_is_clear(position, &empty, &empty[1..], us)
        && rook_in_place(position, us, File::A, mode)
}

fn path_is_clear(position: &Position, empty: &[Square], safe: &[Square], us: Color) -> bool {
    empty.iter().all(|&sq| position.board.is_empty(sq))
        && safe
            .iter()
            .all(|&sq| !is_square_attacked(position, sq, us.opposite()))
}

/// Only strict mode asks for the rook; compatible mode trusts the rights.
fn rook_in_place(position: &Position, us: Color, file: File, mode: LegalityMode) -> bool {
    match mode {
        LegalityMode::Compatible => true,
        LegalityMode::Strict => {
            let corner = home_square(us, file);
            let present = position.board.piece_at(corner) == Some((Piece::Rook, us));
            if !present {
                warn!("{} holds castling rights but has no rook on {}", us, corner);
            }
            present
        }
    }
}
