//! Command-line interface of the puzzle solver binary.

pub(crate) mod cli;
