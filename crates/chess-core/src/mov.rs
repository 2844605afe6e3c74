//! Move representation.

use crate::Square;
use std::fmt;

/// A chess move: an origin and a destination square.
///
/// Moves carry no capture, promotion or castling metadata. Castling is the
/// king's two-column step and en passant is the pawn's diagonal step onto
/// the en-passant target; whoever applies a move derives the rest.
///
/// Encoded compactly: 6 bits from, 6 bits to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move((from.index() as u16) | ((to.index() as u16) << 6))
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        match Square::from_index((self.0 & 0x3F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        match Square::from_index(((self.0 >> 6) & 0x3F) as u8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the move as a pair of algebraic squares, e.g. `("e2", "e4")`.
    pub fn to_algebraic(self) -> (String, String) {
        (self.from().to_algebraic(), self.to().to_algebraic())
    }

    /// Parses coordinate notation such as `"e2e4"`.
    ///
    /// Promotion suffixes are not accepted; moves do not name a promotion
    /// piece.
    pub fn from_coordinate_str(s: &str) -> Option<Self> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        Some(Move::new(from, to))
    }

    /// A null move (used as placeholder, not a legal move).
    pub const NULL: Move = Move(0);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from(), self.to())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn move_encoding() {
        let e2 = Square::new(File::E, Rank::R2);
        let e4 = Square::new(File::E, Rank::R4);
        let m = Move::new(e2, e4);

        assert_eq!(m.from(), e2);
        assert_eq!(m.to(), e4);
    }

    #[test]
    fn move_extremes() {
        let m = Move::new(Square::H1, Square::A8);
        assert_eq!(m.from(), Square::H1);
        assert_eq!(m.to(), Square::A8);
    }

    #[test]
    fn move_to_algebraic() {
        let m = Move::new(Square::E1, Square::G1);
        assert_eq!(m.to_algebraic(), ("e1".to_string(), "g1".to_string()));
    }

    #[test]
    fn move_from_coordinate_str() {
        let m = Move::from_coordinate_str("g1f3").unwrap();
        assert_eq!(m.from(), Square::G1);
        assert_eq!(m.to(), Square::F1.offset(-2, 0).unwrap());

        assert!(Move::from_coordinate_str("e7e8q").is_none());
        assert!(Move::from_coordinate_str("e2e9").is_none());
        assert!(Move::from_coordinate_str("e2").is_none());
        assert!(Move::from_coordinate_str("ée2e").is_none());
    }

    #[test]
    fn move_null() {
        assert_eq!(Move::NULL.from(), Square::A8);
        assert_eq!(Move::NULL.to(), Square::A8);
    }

    #[test]
    fn move_debug_display() {
        let m = Move::from_coordinate_str("e2e4").unwrap();
        assert_eq!(format!("{:?}", m), "Move(e2e4)");
        assert_eq!(format!("{}", m), "e2e4");
    }
}
