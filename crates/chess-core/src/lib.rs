//! Core types for chess.
//!
//! This crate provides the fundamental types used by the move generator:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for mailbox board coordinates
//! - [`Move`] as a plain from/to square pair
//! - FEN parsing

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser, Placement};
pub use mov::Move;
pub use piece::Piece;
pub use square::{File, Rank, Square};
