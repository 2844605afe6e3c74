//! Movement geometry for every piece type.
//!
//! Offsets are `(d_row, d_col)` pairs in board coordinates (row 0 is rank 8).
//! The order of each table is the order moves are generated in.

use chess_core::Piece;

/// Knight jumps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps, row-major around the origin.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Diagonal rays.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Orthogonal rays.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal rays followed by orthogonal rays.
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
];

/// How a piece type moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Color-dependent advances and diagonal captures.
    Pawn,
    /// One step to each offset.
    Step(&'static [(i8, i8)]),
    /// Repeated steps along each direction until blocked.
    Slide(&'static [(i8, i8)]),
}

impl Geometry {
    /// Looks up the geometry of a piece type.
    pub const fn of(piece: Piece) -> Self {
        match piece {
            Piece::Pawn => Geometry::Pawn,
            Piece::Knight => Geometry::Step(&KNIGHT_OFFSETS),
            Piece::Bishop => Geometry::Slide(&BISHOP_DIRECTIONS),
            Piece::Rook => Geometry::Slide(&ROOK_DIRECTIONS),
            Piece::Queen => Geometry::Slide(&QUEEN_DIRECTIONS),
            Piece::King => Geometry::Step(&KING_OFFSETS),
        }
    }
}
