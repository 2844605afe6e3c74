//! Legality filtering by trial make/unmake.
//!
//! Each pseudo-legal candidate is played on a scratch copy of the position,
//! the mover's king is tested with the attack oracle, and the board is
//! restored before the next candidate. The caller's position is never
//! touched.

use super::{generate_piece_moves, is_in_check, pseudo_legal_moves, MoveList};
use crate::board::Occupant;
use crate::{Position, PositionError};
use chess_core::{Color, Move, Piece, Square};
use log::trace;

/// How faithfully the trial move models special moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegalityMode {
    /// The trial moves only the mover. An en-passant capture leaves the
    /// captured pawn on the board, castling leaves the rook in its corner,
    /// and castling rights are trusted without looking for the rook.
    #[default]
    Compatible,
    /// The trial also removes the en-passant victim and relocates the
    /// castling rook. Castling additionally needs the king on its home
    /// square and a rook of its color in the matching corner.
    Strict,
}

/// A change a trial made besides moving the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// A pawn captured en passant was lifted from `square`.
    EnPassant { square: Square, victim: (Piece, Color) },
    /// The castling rook went from `from` to `to`.
    RookShift { from: Square, to: Square },
}

/// Everything needed to undo a trial move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    pub mv: Move,
    /// Whatever stood on the destination before the trial.
    pub captured: Occupant,
    pub side_effect: Option<SideEffect>,
}

/// Plays `mv` on the position's board only. No other field changes.
pub fn make_trial(position: &mut Position, mv: Move, mode: LegalityMode) -> Trial {
    let (from, to) = (mv.from(), mv.to());
    let en_passant = position.en_passant;
    let board = &mut position.board;

    let mover = board.take(from);
    let captured = board.take(to);
    board.set(to, mover);

    let side_effect = match (mode, mover) {
        (LegalityMode::Compatible, _) | (_, None) => None,
        (LegalityMode::Strict, Some((Piece::Pawn, _))) => {
            let diagonal = from.col() != to.col();
            if diagonal && captured.is_none() && en_passant == Some(to) {
                lift_en_passant_victim(position, from, to)
            } else {
                None
            }
        }
        (LegalityMode::Strict, Some((Piece::King, color))) => {
            shift_castling_rook(position, from, to, color)
        }
        (LegalityMode::Strict, Some(_)) => None,
    };

    Trial {
        mv,
        captured,
        side_effect,
    }
}

/// Reverts a trial made by [`make_trial`], restoring the board exactly.
pub fn unmake_trial(position: &mut Position, trial: Trial) {
    let board = &mut position.board;

    match trial.side_effect {
        Some(SideEffect::EnPassant { square, victim }) => board.set(square, Some(victim)),
        Some(SideEffect::RookShift { from, to }) => {
            let rook = board.take(to);
            board.set(from, rook);
        }
        None => {}
    }

    let mover = board.take(trial.mv.to());
    board.set(trial.mv.from(), mover);
    board.set(trial.mv.to(), trial.captured);
}

/// The captured pawn stands beside the mover's origin, in the destination's
/// column.
fn lift_en_passant_victim(position: &mut Position, from: Square, to: Square) -> Option<SideEffect> {
    let square = Square::from_coords(from.row() as i8, to.col() as i8)?;
    let victim = position.board.take(square)?;
    Some(SideEffect::EnPassant { square, victim })
}

/// A king step of two columns is castling; the rook jumps to the square the
/// king crossed.
fn shift_castling_rook(
    position: &mut Position,
    from: Square,
    to: Square,
    color: Color,
) -> Option<SideEffect> {
    let d_col = to.col() as i8 - from.col() as i8;
    if d_col.abs() != 2 || from.row() != to.row() {
        return None;
    }

    let corner_col = if d_col > 0 { 7 } else { 0 };
    let rook_from = Square::from_coords(from.row() as i8, corner_col)?;
    let rook_to = from.offset(0, d_col.signum())?;

    let board = &mut position.board;
    if board.piece_at(rook_from) != Some((Piece::Rook, color)) || !board.is_empty(rook_to) {
        return None;
    }
    let rook = board.take(rook_from);
    board.set(rook_to, rook);
    Some(SideEffect::RookShift {
        from: rook_from,
        to: rook_to,
    })
}

/// Generates all legal moves for the side to move.
pub fn legal_moves(position: &Position) -> Result<MoveList, PositionError> {
    legal_moves_with(position, LegalityMode::default())
}

/// Generates all legal moves for the side to move under the given mode.
pub fn legal_moves_with(position: &Position, mode: LegalityMode) -> Result<MoveList, PositionError> {
    let candidates = pseudo_legal_moves(position, mode);
    filter_legal(position, &candidates, mode)
}

/// Generates the legal moves of the piece on `from`.
///
/// Empty unless the square holds a piece of the side to move.
pub fn moves_from(
    position: &Position,
    from: Square,
    mode: LegalityMode,
) -> Result<MoveList, PositionError> {
    let mut candidates = MoveList::new();
    if position.board.color_at(from) == Some(position.side_to_move) {
        generate_piece_moves(position, from, mode, &mut candidates);
    }
    filter_legal(position, &candidates, mode)
}

/// Keeps the candidates that do not leave the mover's king attacked.
fn filter_legal(
    position: &Position,
    candidates: &MoveList,
    mode: LegalityMode,
) -> Result<MoveList, PositionError> {
    let us = position.side_to_move;
    let mut scratch = position.clone();
    let mut legal = MoveList::new();

    for &mv in candidates {
        let trial = make_trial(&mut scratch, mv, mode);
        let in_check = is_in_check(&scratch, us);
        unmake_trial(&mut scratch, trial);

        if in_check? {
            trace!("{} rejected: leaves the {} king attacked", mv, us);
        } else {
            legal.push(mv);
        }
    }

    debug_assert_eq!(scratch.board, position.board);
    Ok(legal)
}
