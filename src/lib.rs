#![deny(missing_docs)]
//! An A* solver for the generalized n-tile sliding puzzle (8-puzzle,
//! 15-puzzle, and larger squares): find a minimum-length sequence of legal
//! slides to the solved configuration, or prove that none exists.

/// The `puzzle` module implements the board abstraction and the lockstep
/// twin-search solver that decides solvability without exhausting the
/// state space.
pub mod puzzle;
