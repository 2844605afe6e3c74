//! Text and JSON rendering of move listings.
//!
//! JSON output is an array with one object per position:
//! ```json
//! [
//!   {
//!     "fen": "4k3/8/8/8/8/8/8/4K2R w K - 0 1",
//!     "side_to_move": "white",
//!     "in_check": false,
//!     "status": null,
//!     "moves": [["e1", "d2"], ["e1", "e2"], ["e1", "g1"]]
//!   }
//! ]
//! ```

use chess_movegen::{MoveList, Position};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// Game state derived from the full legal move list and the check flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Check,
    Checkmate,
    Stalemate,
}

impl Status {
    /// `None` when the side to move has moves and is not in check.
    pub fn of(has_moves: bool, in_check: bool) -> Option<Self> {
        match (has_moves, in_check) {
            (true, false) => None,
            (true, true) => Some(Status::Check),
            (false, true) => Some(Status::Checkmate),
            (false, false) => Some(Status::Stalemate),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Check => "check",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
        };
        write!(f, "{}", s)
    }
}

/// Listing for one position.
#[derive(Debug, Serialize)]
pub struct Report {
    pub fen: String,
    pub side_to_move: String,
    pub in_check: bool,
    pub status: Option<Status>,
    /// `(from, to)` pairs in generation order.
    pub moves: Vec<(String, String)>,
    #[serde(skip)]
    board: String,
}

impl Report {
    pub fn new(
        fen: &str,
        position: &Position,
        moves: &MoveList,
        in_check: bool,
        status: Option<Status>,
    ) -> Self {
        Report {
            fen: fen.to_string(),
            side_to_move: position.side_to_move.to_string().to_lowercase(),
            in_check,
            status,
            moves: moves.to_algebraic(),
            board: position.board.to_string(),
        }
    }

    /// Writes the header, the optional board diagram and one `from to` line
    /// per move.
    pub fn write_text<W: Write>(&self, out: &mut W, show_board: bool) -> io::Result<()> {
        writeln!(out, "{}", self.fen)?;
        if show_board {
            writeln!(out, "{}", self.board)?;
        }

        let noun = if self.moves.len() == 1 { "move" } else { "moves" };
        match self.status {
            Some(status) => writeln!(out, "{} legal {}, {}", self.moves.len(), noun, status)?,
            None => writeln!(out, "{} legal {}", self.moves.len(), noun)?,
        }

        for (from, to) in &self.moves {
            writeln!(out, "{} {}", from, to)?;
        }
        Ok(())
    }
}

/// Writes all reports as a pretty-printed JSON array.
pub fn write_json<W: Write>(out: &mut W, reports: &[Report]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out).map_err(serde_json::Error::io)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(fen: &str) -> Report {
        let position = Position::from_fen(fen).unwrap();
        let moves = position.legal_moves().unwrap();
        let in_check = position.is_in_check().unwrap();
        let status = Status::of(!moves.is_empty(), in_check);
        Report::new(fen, &position, &moves, in_check, status)
    }

    #[test]
    fn status_table() {
        assert_eq!(Status::of(true, false), None);
        assert_eq!(Status::of(true, true), Some(Status::Check));
        assert_eq!(Status::of(false, true), Some(Status::Checkmate));
        assert_eq!(Status::of(false, false), Some(Status::Stalemate));
    }

    #[test]
    fn text_listing() {
        let fen = "7k/8/8/8/8/8/8/K7 w - - 0 1";
        let mut out = Vec::new();
        report(fen).write_text(&mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{}\n3 legal moves\na1 a2\na1 b2\na1 b1\n", fen));
    }

    #[test]
    fn text_listing_with_status_and_board() {
        // Back-rank mate
        let fen = "6rk/8/8/8/8/8/5PPP/r5K1 w - - 0 1";
        let mut out = Vec::new();
        report(fen).write_text(&mut out, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(fen));
        assert!(text.contains("  a b c d e f g h"));
        assert!(text.ends_with("0 legal moves, checkmate\n"));
    }

    #[test]
    fn json_shape() {
        let fen = "7k/8/8/8/8/8/8/K7 w - - 0 1";
        let mut out = Vec::new();
        write_json(&mut out, &[report(fen)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let entry = &value[0];
        assert_eq!(entry["fen"], fen);
        assert_eq!(entry["side_to_move"], "white");
        assert_eq!(entry["in_check"], false);
        assert!(entry["status"].is_null());
        assert_eq!(entry["moves"][0], serde_json::json!(["a1", "a2"]));
        assert_eq!(entry["moves"].as_array().unwrap().len(), 3);
        assert!(entry.get("board").is_none());
    }

    #[test]
    fn json_status_is_lowercase() {
        let fen = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
        let mut out = Vec::new();
        write_json(&mut out, &[report(fen)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["status"], "stalemate");
        assert_eq!(value[0]["side_to_move"], "black");
    }
}
