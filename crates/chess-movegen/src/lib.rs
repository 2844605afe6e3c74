//! Legal move generation on a mailbox board.
//!
//! This crate provides:
//! - [`Board`] - 8x8 grid of optional pieces, scanned row by row
//! - [`Position`] - board plus side to move, castling rights and en passant target
//! - [`movegen`] - pseudo-legal generation, attack detection and the legality filter
//!
//! # Architecture
//!
//! There are no piece lists or bitboards. Every query re-scans the grid.
//! Legality is decided by playing each pseudo-legal candidate on a scratch copy
//! of the position and asking the attack oracle whether the mover's king is
//! attacked. The attack oracle itself only uses raw piece geometry, so it
//! never calls back into the legality filter.
//!
//! # Example
//!
//! ```
//! use chess_movegen::Position;
//!
//! let position = Position::startpos();
//! let moves = position.legal_moves().unwrap();
//! assert_eq!(moves.len(), 20);
//!
//! for (from, to) in moves.to_algebraic() {
//!     println!("{} {}", from, to);
//! }
//! ```

mod board;
pub mod movegen;
mod position;

pub use board::{Board, Occupant};
pub use movegen::{
    is_in_check, is_square_attacked, legal_moves, legal_moves_with, moves_from,
    piece_destinations, pseudo_legal_moves, LegalityMode, MoveList,
};
pub use position::{CastlingRights, Position, PositionError};
