//! FEN (Forsyth-Edwards Notation) parsing.
//!
//! Parsing is strict: every one of the six fields is checked and a
//! malformed record is rejected with a [`FenError`] instead of producing a
//! half-filled board.

use crate::{Color, Piece, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// One occupied square read from the placement field.
pub type Placement = (Square, Piece, Color);

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    placements: Vec<Placement>,
    /// Side to move
    pub active_color: Color,
    /// Castling field as written, `-` when nobody may castle
    pub castling: String,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let [placement, color, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
            return Err(FenError::InvalidPartCount(fields.len()));
        };

        Ok(FenParser {
            placements: parse_placement(placement)?,
            active_color: parse_color(color)?,
            castling: parse_castling(castling)?,
            en_passant: parse_en_passant(en_passant)?,
            halfmove_clock: halfmove
                .parse()
                .map_err(|_| FenError::InvalidHalfmoveClock(halfmove.to_string()))?,
            fullmove_number: fullmove
                .parse()
                .map_err(|_| FenError::InvalidFullmoveNumber(fullmove.to_string()))?,
        })
    }

    /// Every occupied square in FEN order: row 0 (rank 8) first, columns
    /// left to right.
    pub fn placements(&self) -> impl Iterator<Item = Placement> + '_ {
        self.placements.iter().copied()
    }

    /// Returns true if the castling field contains `flag` (one of `KQkq`).
    pub fn has_castling_flag(&self, flag: char) -> bool {
        self.castling.contains(flag)
    }
}

impl Default for FenParser {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}

/// `/` ends a row, a digit skips that many columns, a letter places a piece.
fn parse_placement(field: &str) -> Result<Vec<Placement>, FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut placements = Vec::with_capacity(32);
    for (row, text) in rows.iter().enumerate() {
        let rank = 8 - row;
        let mut col = 0u32;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip;
                continue;
            }
            let Some((piece, color)) = Piece::from_fen_char(c) else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c, rank
                )));
            };
            if let Some(sq) = Square::from_coords(row as i8, col as i8) {
                placements.push((sq, piece, color));
            }
            col += 1;
        }
        if col != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares, expected 8",
                rank, col
            )));
        }
    }
    Ok(placements)
}

fn parse_color(field: &str) -> Result<Color, FenError> {
    match field {
        "w" | "b" => Ok(Color::from_fen_field(field)),
        other => Err(FenError::InvalidActiveColor(other.to_string())),
    }
}

fn parse_castling(field: &str) -> Result<String, FenError> {
    if field != "-" {
        if let Some(c) = field.chars().find(|c| !"KQkq".contains(*c)) {
            return Err(FenError::InvalidCastlingRights(format!(
                "invalid character '{}' in '{}'",
                c, field
            )));
        }
    }
    Ok(field.to_string())
}

/// Only row 2 (rank 6) or row 5 (rank 3) can hold a skipped-over square.
fn parse_en_passant(field: &str) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    match Square::from_algebraic(field) {
        Some(sq) if sq.row() == 2 || sq.row() == 5 => Ok(Some(sq)),
        _ => Err(FenError::InvalidEnPassantSquare(field.to_string())),
    }
}
