//! The immutable board value at the heart of the solver.
//!
//! A [`Board`] is one configuration of the n-by-n sliding puzzle: the tiles
//! `1..n²-1` plus a single blank cell (value `0`), stored row-major. Boards
//! are plain values: every operation that "changes" a board produces a new
//! one, which is what lets search nodes share board references freely.
//!
//! Two quantities are derived once, at construction, and cached:
//!
//! - the **Hamming distance**: how many tiles sit outside their goal cell
//!   (the blank does not count), and
//! - the **Manhattan distance**: the summed horizontal + vertical
//!   displacement of every tile from its goal cell.
//!
//! The Manhattan distance never exceeds the true number of remaining moves,
//! which makes it an admissible A* heuristic for this puzzle.
//!
//! A board can also produce its [`twin`](Board::twin): the same configuration
//! with one pair of same-row tiles exchanged. Exactly one of a board and its
//! twin is ever solvable, which is how the solver proves unsolvability
//! without exhausting the state space.

use itertools::Itertools;
use smallvec::SmallVec;
use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// The value stored in one cell of a board. `0` is the blank.
pub type Tile = u32;

/// Errors reported when constructing a board from untrusted tile data.
///
/// The search itself can never fail once a `Board` exists; every structural
/// problem with the input is caught here, before any search runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The dimension is below the 2×2 minimum.
    #[error("board dimension must be at least 2, got {dimension}")]
    TooSmall {
        /// The rejected dimension.
        dimension: usize,
    },

    /// A row's length disagrees with the number of rows.
    #[error("row {row} has {len} cells, expected {dimension}")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Number of cells in that row.
        len: usize,
        /// Expected row length (the board dimension).
        dimension: usize,
    },

    /// A flat tile vector's length is not `dimension²`.
    #[error("expected {expected} cells for the given dimension, got {found}")]
    WrongCellCount {
        /// `dimension²`.
        expected: usize,
        /// Cells actually supplied.
        found: usize,
    },

    /// A tile value falls outside `0..dimension²`.
    #[error("tile value {tile} is outside the valid range 0..{cells}")]
    TileOutOfRange {
        /// The rejected value.
        tile: Tile,
        /// Number of cells (one past the largest legal tile).
        cells: usize,
    },

    /// A tile value appears more than once.
    #[error("tile value {tile} appears more than once")]
    DuplicateTile {
        /// The repeated value.
        tile: Tile,
    },
}

/// One configuration of the sliding puzzle.
///
/// Construction validates the tile data (see [`BoardError`]); once a board
/// exists it is structurally sound and fully immutable. Equality and hashing
/// consider only the dimension and tile layout, never the memoized twin.
#[derive(Debug, Clone)]
pub struct Board {
    dimension: usize,
    tiles: Vec<Tile>,
    blank: usize,
    hamming: u32,
    manhattan: u32,
    twin: OnceCell<Box<Board>>,
}

impl Board {
    /// Builds a board from an n-by-n matrix of tile values.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the matrix is not square, is smaller than
    /// 2×2, or its values are not exactly the set `{0..n²-1}`.
    pub fn new(rows: Vec<Vec<Tile>>) -> Result<Self, BoardError> {
        let dimension = rows.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != dimension {
                return Err(BoardError::NotSquare {
                    row,
                    len: cells.len(),
                    dimension,
                });
            }
        }

        Self::from_flat(dimension, rows.into_iter().flatten().collect())
    }

    /// Builds a board from a row-major flat tile vector.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if `dimension < 2`, the vector does not hold
    /// exactly `dimension²` cells, or the values are not a permutation of
    /// `{0..dimension²-1}`.
    pub fn from_flat(dimension: usize, tiles: Vec<Tile>) -> Result<Self, BoardError> {
        if dimension < 2 {
            return Err(BoardError::TooSmall { dimension });
        }

        let cells = dimension * dimension;
        if tiles.len() != cells {
            return Err(BoardError::WrongCellCount {
                expected: cells,
                found: tiles.len(),
            });
        }

        let mut seen = vec![false; cells];
        for &tile in &tiles {
            let value = tile as usize;
            if value >= cells {
                return Err(BoardError::TileOutOfRange { tile, cells });
            }
            if seen[value] {
                return Err(BoardError::DuplicateTile { tile });
            }
            seen[value] = true;
        }

        // A permutation of {0..cells-1} contains the blank exactly once.
        let blank = tiles
            .iter()
            .position(|&tile| tile == 0)
            .expect("validated permutation contains the blank");

        Ok(Self::from_parts(dimension, tiles, blank))
    }

    /// The solved configuration for the given dimension: tiles in ascending
    /// row-major order with the blank last.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TooSmall`] if `dimension < 2`.
    pub fn goal(dimension: usize) -> Result<Self, BoardError> {
        if dimension < 2 {
            return Err(BoardError::TooSmall { dimension });
        }

        let cells = dimension * dimension;
        let mut tiles: Vec<Tile> = (1..cells).map(|value| value as Tile).collect();
        tiles.push(0);

        Ok(Self::from_parts(dimension, tiles, cells - 1))
    }

    /// Internal constructor for tile vectors that are sound by construction
    /// (successors of an already-validated board).
    fn from_parts(dimension: usize, tiles: Vec<Tile>, blank: usize) -> Self {
        let (hamming, manhattan) = distances(dimension, &tiles);

        Self {
            dimension,
            tiles,
            blank,
            hamming,
            manhattan,
            twin: OnceCell::new(),
        }
    }

    /// The side length n of the board.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// The row-major tile values, `0` marking the blank.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles out of place (blank excluded). Cached.
    #[must_use]
    pub const fn hamming(&self) -> u32 {
        self.hamming
    }

    /// Summed tile displacement from the goal cells (blank excluded). Cached.
    #[must_use]
    pub const fn manhattan(&self) -> u32 {
        self.manhattan
    }

    /// Whether every cell holds its goal value.
    #[must_use]
    pub const fn is_goal(&self) -> bool {
        // Every non-blank tile in place forces the blank into its own cell.
        self.hamming == 0
    }

    /// A board with one pair of same-row, non-blank tiles exchanged.
    ///
    /// The pair is chosen deterministically (the first two non-blank tiles
    /// of the first row that holds two of them), so repeated calls on the
    /// same instance return the same board, computed at most once and
    /// memoized thereafter.
    pub fn twin(&self) -> &Board {
        self.twin.get_or_init(|| Box::new(self.compute_twin()))
    }

    fn compute_twin(&self) -> Board {
        for row in 0..self.dimension {
            let start = row * self.dimension;
            let mut first: Option<usize> = None;

            for idx in start..start + self.dimension {
                if self.tiles[idx] == 0 {
                    continue;
                }
                match first {
                    None => first = Some(idx),
                    Some(other) => {
                        let mut tiles = self.tiles.clone();
                        tiles.swap(other, idx);
                        return Board::from_parts(self.dimension, tiles, self.blank);
                    }
                }
            }
        }

        // The single blank occupies one cell, so with n >= 2 some row keeps
        // at least two tiles.
        unreachable!("every valid board has a row with two non-blank tiles")
    }

    /// Every configuration reachable by sliding one adjacent tile into the
    /// blank: 2 boards when the blank is in a corner, 3 on an edge, 4 in the
    /// interior. The order is unspecified.
    #[must_use]
    pub fn neighbors(&self) -> SmallVec<[Board; 4]> {
        let n = self.dimension;
        let row = self.blank / n;
        let col = self.blank % n;

        let mut out = SmallVec::new();
        if row > 0 {
            out.push(self.slide(self.blank - n));
        }
        if row + 1 < n {
            out.push(self.slide(self.blank + n));
        }
        if col > 0 {
            out.push(self.slide(self.blank - 1));
        }
        if col + 1 < n {
            out.push(self.slide(self.blank + 1));
        }

        out
    }

    /// The board obtained by sliding the tile at `from` into the blank cell.
    fn slide(&self, from: usize) -> Board {
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, from);
        Board::from_parts(self.dimension, tiles, from)
    }
}

/// Hamming and Manhattan distances of a tile vector, in one pass.
///
/// Tile `v` belongs at flat index `v - 1`, i.e. row `(v-1) / n`, column
/// `(v-1) mod n`.
fn distances(dimension: usize, tiles: &[Tile]) -> (u32, u32) {
    let mut hamming = 0;
    let mut manhattan = 0;

    for (idx, &tile) in tiles.iter().enumerate() {
        if tile == 0 {
            continue;
        }
        let goal = tile as usize - 1;
        if goal != idx {
            hamming += 1;
        }
        let row_delta = (idx / dimension).abs_diff(goal / dimension);
        let col_delta = (idx % dimension).abs_diff(goal % dimension);
        manhattan += (row_delta + col_delta) as u32;
    }

    (hamming, manhattan)
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        self.tiles.hash(state);
    }
}

impl fmt::Display for Board {
    /// Renders the dimension on its own line, then the grid with
    /// right-aligned tiles, the same shape the loader reads back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.dimension * self.dimension - 1).to_string().len();
        writeln!(f, "{}", self.dimension)?;
        for row in self.tiles.chunks(self.dimension) {
            writeln!(
                f,
                "{}",
                row.iter().map(|tile| format!("{tile:>width$}")).join(" ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: Vec<Vec<Tile>>) -> Board {
        Board::new(rows).expect("test board should be valid")
    }

    fn goal_3x3() -> Board {
        board(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 0]])
    }

    fn sample_3x3() -> Board {
        board(vec![vec![8, 1, 3], vec![4, 0, 2], vec![7, 6, 5]])
    }

    #[test]
    fn test_goal_board_distances_are_zero() {
        let b = goal_3x3();
        assert!(b.is_goal());
        assert_eq!(b.hamming(), 0);
        assert_eq!(b.manhattan(), 0);
    }

    #[test]
    fn test_goal_constructor_matches_explicit_goal() {
        assert_eq!(Board::goal(3).unwrap(), goal_3x3());
        assert!(Board::goal(1).is_err());
    }

    #[test]
    fn test_sample_board_distances() {
        let b = sample_3x3();
        assert!(!b.is_goal());
        assert_eq!(b.hamming(), 5);
        assert_eq!(b.manhattan(), 10);
    }

    #[test]
    fn test_dimension_and_tiles() {
        let b = sample_3x3();
        assert_eq!(b.dimension(), 3);
        assert_eq!(b.tiles(), &[8, 1, 3, 4, 0, 2, 7, 6, 5]);
    }

    #[test]
    fn test_neighbor_count_interior_blank() {
        // Blank dead centre of a 3x3: four legal slides.
        assert_eq!(sample_3x3().neighbors().len(), 4);
    }

    #[test]
    fn test_neighbor_count_corner_blank() {
        let b = board(vec![vec![0, 1, 3], vec![4, 2, 5], vec![7, 8, 6]]);
        assert_eq!(b.neighbors().len(), 2);
    }

    #[test]
    fn test_neighbor_count_edge_blank() {
        let b = board(vec![vec![1, 0, 3], vec![4, 2, 5], vec![7, 8, 6]]);
        assert_eq!(b.neighbors().len(), 3);
    }

    #[test]
    fn test_neighbor_count_2x2_is_always_two() {
        let b = board(vec![vec![1, 2], vec![3, 0]]);
        assert_eq!(b.neighbors().len(), 2);
        for n in b.neighbors() {
            assert_eq!(n.neighbors().len(), 2);
        }
    }

    #[test]
    fn test_neighbors_differ_by_one_slide() {
        let b = sample_3x3();
        for n in b.neighbors() {
            let changed: Vec<usize> = (0..9).filter(|&i| b.tiles()[i] != n.tiles()[i]).collect();
            assert_eq!(changed.len(), 2, "exactly the blank and one tile move");
            assert!(changed.iter().any(|&i| b.tiles()[i] == 0));
            assert!(changed.iter().any(|&i| n.tiles()[i] == 0));
        }
    }

    #[test]
    fn test_neighbors_do_not_mutate_source() {
        let b = sample_3x3();
        let before = b.tiles().to_vec();
        let _ = b.neighbors();
        assert_eq!(b.tiles(), &before[..]);
    }

    #[test]
    fn test_twin_swaps_two_tiles_in_one_row() {
        let b = sample_3x3();
        let twin = b.twin();

        assert_eq!(twin.dimension(), b.dimension());
        assert_ne!(*twin, b);

        let changed: Vec<usize> = (0..9)
            .filter(|&i| b.tiles()[i] != twin.tiles()[i])
            .collect();
        assert_eq!(changed.len(), 2);
        assert_eq!(changed[0] / 3, changed[1] / 3, "swapped pair shares a row");
        assert!(b.tiles()[changed[0]] != 0 && b.tiles()[changed[1]] != 0);
    }

    #[test]
    fn test_twin_skips_blank_in_first_row() {
        // Blank between the first two tiles of row 0.
        let b = board(vec![vec![1, 0, 2], vec![3, 4, 5], vec![6, 7, 8]]);
        let twin = b.twin();
        assert_eq!(twin.tiles(), &[2, 0, 1, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_twin_is_memoized_per_instance() {
        let b = sample_3x3();
        let first: *const Board = b.twin();
        let second: *const Board = b.twin();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_equality_ignores_twin_cache() {
        let a = sample_3x3();
        let b = sample_3x3();
        let _ = a.twin();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_rejects_different_layouts() {
        assert_ne!(goal_3x3(), sample_3x3());
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = Board::new(vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8]]).unwrap_err();
        assert!(matches!(err, BoardError::NotSquare { row: 1, len: 2, .. }));
    }

    #[test]
    fn test_new_rejects_tiny_boards() {
        let err = Board::new(vec![vec![0]]).unwrap_err();
        assert!(matches!(err, BoardError::TooSmall { dimension: 1 }));
    }

    #[test]
    fn test_from_flat_rejects_wrong_cell_count() {
        let err = Board::from_flat(3, vec![1, 2, 3, 0]).unwrap_err();
        assert!(matches!(
            err,
            BoardError::WrongCellCount {
                expected: 9,
                found: 4
            }
        ));
    }

    #[test]
    fn test_new_rejects_out_of_range_values() {
        let err = Board::new(vec![vec![1, 2], vec![3, 9]]).unwrap_err();
        assert!(matches!(err, BoardError::TileOutOfRange { tile: 9, .. }));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let err = Board::new(vec![vec![1, 2], vec![2, 0]]).unwrap_err();
        assert!(matches!(err, BoardError::DuplicateTile { tile: 2 }));
    }

    #[test]
    fn test_display_shape() {
        let rendered = goal_3x3().to_string();
        assert_eq!(rendered, "3\n1 2 3\n4 5 6\n7 8 0\n");
    }

    #[test]
    fn test_display_aligns_wide_tiles() {
        let b = Board::goal(4).unwrap();
        let rendered = b.to_string();
        assert!(rendered.starts_with("4\n 1  2  3  4\n"));
    }
}
