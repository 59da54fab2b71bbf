//! A reader for the textual puzzle format.
//!
//! The format is whitespace-delimited: one integer `n`, then `n²` tile
//! values in row-major order, `0` marking the blank. Line breaks carry no
//! meaning, so both the canonical
//!
//! ```text
//! 3
//!  0  1  3
//!  4  2  5
//!  7  8  6
//! ```
//!
//! and a single-line rendition parse identically. [`Board`]'s `Display`
//! output is valid input, so boards round-trip through this module.
//!
//! Malformed input is reported as a typed [`LoadError`] rather than a
//! panic: which token broke, or which structural rule the tile data
//! violated.

use crate::puzzle::board::{Board, BoardError, Tile};
use std::io::{self, BufRead};
use std::path::Path;
use thiserror::Error;

/// Errors reported while reading a puzzle description.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The underlying reader failed.
    #[error("failed to read puzzle input")]
    Io(#[from] io::Error),

    /// The input ended before the board dimension.
    #[error("missing board dimension")]
    MissingDimension,

    /// A token could not be parsed as a non-negative integer.
    #[error("invalid token {token:?}, expected a non-negative integer")]
    InvalidToken {
        /// The offending token.
        token: String,
    },

    /// The input ended before all `n²` tiles were read.
    #[error("expected {expected} tile values, found only {found}")]
    MissingTiles {
        /// `n²`.
        expected: usize,
        /// Tiles actually present.
        found: usize,
    },

    /// Extra tokens follow a complete board.
    #[error("unexpected trailing token {token:?} after the board")]
    TrailingInput {
        /// The first surplus token.
        token: String,
    },

    /// The tile data is structurally invalid (duplicates, out-of-range
    /// values, impossible dimension).
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Parses a board from any buffered reader.
///
/// # Errors
///
/// Returns a [`LoadError`] describing the first problem encountered: an
/// I/O failure, a malformed token, too few/too many tokens, or tile data
/// rejected by [`Board::from_flat`].
pub fn parse_board<R: BufRead>(reader: R) -> Result<Board, LoadError> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        tokens.extend(line.split_whitespace().map(str::to_owned));
    }

    let mut iter = tokens.into_iter();

    let dimension_token = iter.next().ok_or(LoadError::MissingDimension)?;
    let dimension: usize = dimension_token
        .parse()
        .map_err(|_| LoadError::InvalidToken {
            token: dimension_token,
        })?;

    let expected = dimension * dimension;
    let mut tiles: Vec<Tile> = Vec::with_capacity(expected);
    for token in iter.by_ref() {
        if tiles.len() == expected {
            return Err(LoadError::TrailingInput { token });
        }
        let tile: Tile = token
            .parse()
            .map_err(|_| LoadError::InvalidToken { token })?;
        tiles.push(tile);
    }

    if tiles.len() < expected {
        return Err(LoadError::MissingTiles {
            expected,
            found: tiles.len(),
        });
    }

    Ok(Board::from_flat(dimension, tiles)?)
}

/// Opens, buffers, and parses a puzzle file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be opened or read; any
/// parse failure propagates from [`parse_board`].
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Board, LoadError> {
    let file = std::fs::File::open(path)?;
    parse_board(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_canonical_layout() {
        let input = "3\n 0  1  3\n 4  2  5\n 7  8  6\n";
        let board = parse_board(Cursor::new(input)).unwrap();
        assert_eq!(board.dimension(), 3);
        assert_eq!(board.tiles(), &[0, 1, 3, 4, 2, 5, 7, 8, 6]);
    }

    #[test]
    fn test_parse_is_newline_agnostic() {
        let one_line = parse_board(Cursor::new("2 1 2 3 0")).unwrap();
        let many_lines = parse_board(Cursor::new("2\n1 2\n3 0\n")).unwrap();
        assert_eq!(one_line, many_lines);
    }

    #[test]
    fn test_display_round_trips() {
        let board = parse_board(Cursor::new("3\n8 1 3\n4 0 2\n7 6 5")).unwrap();
        let reparsed = parse_board(Cursor::new(board.to_string())).unwrap();
        assert_eq!(board, reparsed);
    }

    #[test]
    fn test_empty_input_is_missing_dimension() {
        let err = parse_board(Cursor::new("")).unwrap_err();
        assert!(matches!(err, LoadError::MissingDimension));
    }

    #[test]
    fn test_non_numeric_dimension() {
        let err = parse_board(Cursor::new("three\n1 2 3 0")).unwrap_err();
        assert!(matches!(err, LoadError::InvalidToken { token } if token == "three"));
    }

    #[test]
    fn test_non_numeric_tile() {
        let err = parse_board(Cursor::new("2\n1 2\n3 x")).unwrap_err();
        assert!(matches!(err, LoadError::InvalidToken { token } if token == "x"));
    }

    #[test]
    fn test_truncated_board() {
        let err = parse_board(Cursor::new("3\n1 2 3\n4 5 6")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingTiles {
                expected: 9,
                found: 6
            }
        ));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_board(Cursor::new("2\n1 2 3 0 7")).unwrap_err();
        assert!(matches!(err, LoadError::TrailingInput { token } if token == "7"));
    }

    #[test]
    fn test_structural_errors_surface_as_board_errors() {
        let err = parse_board(Cursor::new("2\n1 2\n2 0")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Board(BoardError::DuplicateTile { tile: 2 })
        ));
    }

    #[test]
    fn test_load_file_missing_path() {
        let err = load_file("definitely/not/a/real/path.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
