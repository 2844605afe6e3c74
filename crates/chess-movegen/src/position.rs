//! Chess position representation.

use chess_core::{Color, FenError, FenParser, Piece, Square};
use log::debug;
use thiserror::Error;

use crate::movegen::{self, LegalityMode, MoveList};
use crate::Board;

/// Errors raised by queries that need a king on the board.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("invalid position: {0} has no king")]
    InvalidPosition(Color),
}

/// Castling rights flags.
///
/// Four independent flags. They record what the FEN claimed and are not
/// checked against where the king and rooks actually stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Reads the FEN castling field: each of `K`, `Q`, `k`, `q` present sets
    /// its flag, absence (or `-`) leaves it cleared.
    pub fn from_fen_field(field: &str) -> Self {
        let flags = field.chars().fold(0u8, |flags, c| {
            flags
                | match c {
                    'K' => Self::WHITE_KINGSIDE,
                    'Q' => Self::WHITE_QUEENSIDE,
                    'k' => Self::BLACK_KINGSIDE,
                    'q' => Self::BLACK_QUEENSIDE,
                    _ => 0,
                }
        });
        CastlingRights(flags)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        let flags = [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ];
        for (flag, c) in flags {
            if self.0 & flag != 0 {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Complete chess position state.
///
/// Queries never mutate the position. Legality checks work on a private
/// scratch copy, so a `&Position` can be shared across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// The 8x8 grid of pieces.
    pub board: Board,

    /// The side to move.
    pub side_to_move: Color,

    /// Castling rights.
    pub castling: CastlingRights,

    /// En passant target square (if any).
    pub en_passant: Option<Square>,

    /// Halfmove clock. Tracked, not used by move generation.
    pub halfmove_clock: u32,

    /// Fullmove number. Tracked, not used by move generation.
    pub fullmove_number: u32,
}

impl Position {
    /// Creates an empty position.
    pub fn empty() -> Self {
        Position {
            board: Board::empty(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        let mut position = Position::empty();

        for (sq, piece, color) in parsed.placements() {
            position.board.put(sq, piece, color);
        }

        position.side_to_move = parsed.active_color;
        position.castling = CastlingRights::from_fen_field(&parsed.castling);
        position.en_passant = parsed.en_passant;
        position.halfmove_clock = parsed.halfmove_clock;
        position.fullmove_number = parsed.fullmove_number;

        debug!(
            "loaded position: {} pieces, {} to move, castling {}, en passant {}",
            position.board.count(),
            position.side_to_move,
            position.castling,
            position
                .en_passant
                .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic()),
        );

        Ok(position)
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.board.piece_at(sq)
    }

    /// Returns the square of `color`'s king.
    pub fn king_square(&self, color: Color) -> Result<Square, PositionError> {
        self.board
            .find_king(color)
            .ok_or(PositionError::InvalidPosition(color))
    }

    /// Returns all legal moves for the side to move, in board-scan order.
    pub fn legal_moves(&self) -> Result<MoveList, PositionError> {
        movegen::legal_moves(self)
    }

    /// Returns all legal moves under the given legality mode.
    pub fn legal_moves_with(&self, mode: LegalityMode) -> Result<MoveList, PositionError> {
        movegen::legal_moves_with(self, mode)
    }

    /// Returns the legal moves of the piece on `sq`.
    ///
    /// Empty if the square is empty or holds a piece of the side not to move.
    pub fn moves_from(&self, sq: Square) -> Result<MoveList, PositionError> {
        movegen::moves_from(self, sq, LegalityMode::default())
    }

    /// Returns the pseudo-legal moves for the side to move.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        movegen::pseudo_legal_moves(self, LegalityMode::default())
    }

    /// Returns true if the opponent of the side to move attacks `sq`.
    pub fn is_square_attacked(&self, sq: Square) -> bool {
        movegen::is_square_attacked(self, sq, self.side_to_move.opposite())
    }

    /// Returns true if the side to move is in check.
    pub fn is_in_check(&self) -> Result<bool, PositionError> {
        movegen::is_in_check(self, self.side_to_move)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}
