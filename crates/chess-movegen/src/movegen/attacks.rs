//! Attack detection.
//!
//! A square is attacked by a color when one of that color's pieces has it
//! as a pseudo-legal destination. Castling never counts as an attack, and
//! nothing here consults the legality filter.

use super::{piece_destinations, MoveList};
use crate::{Position, PositionError};
use chess_core::{Color, Square};

/// Returns true if any piece of color `by` can reach `square`.
///
/// Pawn advances count as reaching a square; pawn diagonals count only onto
/// a piece of the other color or onto the en-passant target.
pub fn is_square_attacked(position: &Position, square: Square, by: Color) -> bool {
    let mut moves = MoveList::new();
    position.board.pieces_of(by).any(|(from, _)| {
        moves.clear();
        piece_destinations(position, from, &mut moves);
        moves.iter().any(|m| m.to() == square)
    })
}

/// Returns true if the king of the given color is attacked.
///
/// Fails when that color has no king on the board.
pub fn is_in_check(position: &Position, color: Color) -> Result<bool, PositionError> {
    let king = position.king_square(color)?;
    Ok(is_square_attacked(position, king, color.opposite()))
}
