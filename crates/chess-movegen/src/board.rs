//! Mailbox board representation.
//!
//! The board is an 8x8 grid of optional pieces indexed `[row][col]`, where
//! row 0 is rank 8. There are no piece lists; every query scans the grid.

use chess_core::{Color, File, Piece, Rank, Square};
use std::fmt;

/// What stands on a square: a piece of some color, or nothing.
pub type Occupant = Option<(Piece, Color)>;

/// An 8x8 grid of optional pieces.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Occupant; 8]; 8],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Occupant {
        self.squares[sq.row() as usize][sq.col() as usize]
    }

    /// Returns the color of the piece on the square, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(_, color)| color)
    }

    /// Returns true if nothing stands on the square.
    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Replaces the occupant of a square.
    #[inline]
    pub fn set(&mut self, sq: Square, occupant: Occupant) {
        self.squares[sq.row() as usize][sq.col() as usize] = occupant;
    }

    /// Places a piece on a square, replacing whatever was there.
    #[inline]
    pub fn put(&mut self, sq: Square, piece: Piece, color: Color) {
        self.set(sq, Some((piece, color)));
    }

    /// Removes and returns the occupant of a square.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Occupant {
        std::mem::take(&mut self.squares[sq.row() as usize][sq.col() as usize])
    }

    /// Iterates over the pieces of one color in board-scan order
    /// (row 0 to 7, column 0 to 7).
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some((piece, c)) if c == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Returns the first square in scan order holding the king of `color`.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|&(_, piece)| piece == Piece::King)
            .map(|(sq, _)| sq)
    }

    /// Returns the number of pieces on the board.
    pub fn count(&self) -> usize {
        self.squares.iter().flatten().filter(|o| o.is_some()).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for (col, occupant) in squares.iter().enumerate() {
                let c = match occupant {
                    Some((piece, color)) => piece.to_fen_char(*color),
                    None => '.',
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..8 {
            if let Some(file) = File::from_index(col) {
                write!(f, "{}{}", if col > 0 { " " } else { "" }, file)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        writeln!(f, "{}", self)?;
        write!(f, ")")
    }
}

/// Returns the square on `color`'s back row in the given file.
pub(crate) const fn home_square(color: Color, file: File) -> Square {
    let rank = match color {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    };
    Square::new(file, rank)
}
