//! Random-walk generation of solvable puzzle instances.
//!
//! Shuffling tiles uniformly lands in the unsolvable class half the time.
//! Walking backwards from the goal with legal slides never leaves the
//! solvable class, so generated instances need no solvability check, and
//! the walk length loosely controls difficulty. The walk never immediately
//! undoes its previous slide, to keep short walks from collapsing back to
//! the goal.

use crate::puzzle::board::{Board, BoardError};

/// A solvable `dimension`×`dimension` board produced by `steps` random
/// legal slides from the goal configuration.
///
/// Passing a `seed` makes the walk reproducible. The optimal solution of
/// the result is at most `steps` moves (often fewer, since walks fold
/// back on themselves).
///
/// # Errors
///
/// Returns [`BoardError::TooSmall`] if `dimension < 2`.
pub fn scrambled(dimension: usize, steps: usize, seed: Option<u64>) -> Result<Board, BoardError> {
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

    let mut current = Board::goal(dimension)?;
    let mut previous: Option<Board> = None;

    for _ in 0..steps {
        let mut options = current.neighbors();
        if let Some(prev) = &previous {
            options.retain(|candidate| *candidate != *prev);
        }

        // n >= 2 leaves at least one slide after removing the backtrack.
        let pick = rng.usize(..options.len());
        let next = options.swap_remove(pick);
        previous = Some(std::mem::replace(&mut current, next));
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_steps_is_the_goal() {
        let b = scrambled(3, 0, Some(7)).unwrap();
        assert!(b.is_goal());
    }

    #[test]
    fn test_scrambled_board_has_requested_dimension() {
        let b = scrambled(4, 20, Some(7)).unwrap();
        assert_eq!(b.dimension(), 4);
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = scrambled(3, 30, Some(99)).unwrap();
        let b = scrambled(3, 30, Some(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_one_step_leaves_the_goal() {
        let b = scrambled(3, 1, Some(3)).unwrap();
        assert!(!b.is_goal());
        assert_eq!(b.manhattan(), 1);
    }

    #[test]
    fn test_rejects_tiny_dimension() {
        assert!(matches!(
            scrambled(1, 10, None),
            Err(BoardError::TooSmall { dimension: 1 })
        ));
    }
}
