mod output;

use anyhow::{Context, Result};
use chess_core::{FenParser, Square};
use chess_movegen::{movegen, LegalityMode, Position};
use clap::Parser;
use log::{debug, info};
use output::{Report, Status};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "legal-moves")]
#[command(about = "List the legal moves of chess positions given as FEN")]
struct Args {
    /// Positions to list, as FEN strings (default: the starting position)
    #[arg(value_name = "FEN")]
    fens: Vec<String>,

    /// Read one FEN per non-empty line from a file
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Lift en passant victims and move castling rooks during the legality
    /// trial, and require the castling rook on its corner
    #[arg(long)]
    strict: bool,

    /// Print the listings as a JSON array
    #[arg(long)]
    json: bool,

    /// Also print the board diagram
    #[arg(short, long)]
    board: bool,

    /// Only list the moves of the piece on this square
    #[arg(short, long, value_parser = parse_square)]
    square: Option<Square>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_square(s: &str) -> Result<Square, String> {
    Square::from_algebraic(s).ok_or_else(|| format!("not a square: {}", s))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .init();

    let mut fens = args.fens.clone();
    if let Some(path) = &args.file {
        fens.extend(read_fens(path)?);
    }
    if fens.is_empty() {
        fens.push(FenParser::STARTPOS.to_string());
    }

    let mode = if args.strict {
        LegalityMode::Strict
    } else {
        LegalityMode::Compatible
    };
    info!("listing {} position(s) in {:?} mode", fens.len(), mode);

    let reports = fens
        .iter()
        .map(|fen| list_moves(fen, mode, args.square))
        .collect::<Result<Vec<_>>>()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        output::write_json(&mut out, &reports).context("failed to write JSON")?;
    } else {
        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            report.write_text(&mut out, args.board)?;
        }
    }
    Ok(())
}

fn read_fens(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Loads one position and builds its listing.
///
/// The status always reflects the full move list, even when only one
/// square's moves are listed.
fn list_moves(fen: &str, mode: LegalityMode, square: Option<Square>) -> Result<Report> {
    let position =
        Position::from_fen(fen).with_context(|| format!("invalid FEN: {}", fen))?;

    let all = position
        .legal_moves_with(mode)
        .with_context(|| format!("cannot generate moves for {}", fen))?;
    let in_check = position.is_in_check()?;
    let status = Status::of(!all.is_empty(), in_check);
    debug!("{}: {} legal moves, status {:?}", fen, all.len(), status);

    let moves = match square {
        Some(sq) => movegen::moves_from(&position, sq, mode)?,
        None => all,
    };
    Ok(Report::new(fen, &position, &moves, in_check, status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "legal-moves",
            "--strict",
            "--json",
            "-s",
            "e2",
            "8/8/8/8/8/8/8/K6k w - - 0 1",
        ])
        .unwrap();
        assert!(args.strict);
        assert!(args.json);
        assert_eq!(args.square, Square::from_algebraic("e2"));
        assert_eq!(args.fens.len(), 1);
        assert!(Args::try_parse_from(["legal-moves", "-s", "z9"]).is_err());
    }

    #[test]
    fn list_moves_startpos() {
        let report = list_moves(FenParser::STARTPOS, LegalityMode::Compatible, None).unwrap();
        assert_eq!(report.moves.len(), 20);
        assert_eq!(report.status, None);
        assert!(!report.in_check);
    }

    #[test]
    fn list_moves_for_one_square() {
        let square = Square::from_algebraic("g1");
        let report = list_moves(FenParser::STARTPOS, LegalityMode::Compatible, square).unwrap();
        assert_eq!(
            report.moves,
            vec![
                ("g1".to_string(), "f3".to_string()),
                ("g1".to_string(), "h3".to_string())
            ]
        );
    }

    #[test]
    fn list_moves_reports_errors() {
        let err = list_moves("not a fen", LegalityMode::Compatible, None).unwrap_err();
        assert!(err.to_string().contains("invalid FEN"));

        let err = list_moves("8/8/8/8/8/8/8/7k w - - 0 1", LegalityMode::Compatible, None)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("White has no king"));
    }
}
