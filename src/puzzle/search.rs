//! A single step-able A* search over board configurations.
//!
//! [`Search`] owns one frontier and one node arena. It deliberately exposes
//! only one operation, [`step`](Search::step): pop the best frontier entry,
//! expand it, report whether a goal was generated. The solver drives two of
//! these objects (the input board's search and its twin's) in strict
//! alternation, which is what turns "did my twin solve first?" into an
//! unsolvability proof.
//!
//! Frontier entries are ordered by ascending priority, where
//!
//! ```text
//! priority = moves so far + Manhattan distance of the board
//! ```
//!
//! The Manhattan heuristic is admissible and consistent, so the first goal
//! popped or generated on a side is an optimal solution for that side. Ties
//! between equal priorities are broken by insertion order; callers must not
//! rely on any particular tie order, only on priorities being respected.
//!
//! Cycle handling is intentionally minimal: a successor equal to the
//! expanded node's own predecessor is skipped, and nothing else is
//! deduplicated. The same configuration can re-enter the frontier along
//! distinct paths; with an effective heuristic this costs far less than
//! maintaining a full visited set, and it does not affect optimality.

use crate::puzzle::board::Board;
use crate::puzzle::node::{NodeArena, NodeId};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One frontier entry: a node index and its cached priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    priority: u32,
    id: NodeId,
}

impl Ord for FrontierEntry {
    /// Reversed comparison: `BinaryHeap` is a max-heap, the frontier needs
    /// the *minimum* priority on top. Equal priorities fall back to the
    /// older node so the order is total.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.id.index().cmp(&self.id.index()))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* search state for one side of the lockstep run.
#[derive(Debug, Clone)]
pub struct Search {
    arena: NodeArena,
    frontier: BinaryHeap<FrontierEntry>,
    expanded: usize,
    generated: usize,
}

impl Search {
    /// A search seeded with `root` as its zero-move frontier entry.
    ///
    /// The root is *not* goal-checked here; callers test the trivial cases
    /// before constructing a search.
    #[must_use]
    pub fn new(root: Board) -> Self {
        let mut arena = NodeArena::new();
        let mut frontier = BinaryHeap::new();

        let priority = root.manhattan();
        let id = arena.push(root, 0, None);
        frontier.push(FrontierEntry { priority, id });

        Self {
            arena,
            frontier,
            expanded: 0,
            generated: 0,
        }
    }

    /// Pops and expands exactly one frontier entry.
    ///
    /// Each successor of the popped board is considered, except the one
    /// equal to the popped node's own predecessor. Non-goal successors join
    /// the frontier with one more move on the clock; the moment a successor
    /// is the goal, its node (with the full predecessor chain) is returned
    /// and the frontier is left as-is; the solver abandons whichever side
    /// didn't finish.
    ///
    /// Returns `None` while no goal has been generated. For any structurally
    /// valid board the frontier cannot drain before the winning side
    /// finishes: every expansion pushes at least one successor.
    pub fn step(&mut self) -> Option<NodeId> {
        let entry = self.frontier.pop()?;

        let node = &self.arena[entry.id];
        let board = node.board().clone();
        let moves = node.moves() + 1;
        let parent = node.parent();
        self.expanded += 1;

        for successor in board.neighbors() {
            // Don't slide straight back to where this node came from.
            if let Some(parent_id) = parent {
                if *self.arena[parent_id].board() == successor {
                    continue;
                }
            }

            self.generated += 1;
            let reached_goal = successor.is_goal();
            let priority = moves + successor.manhattan();
            let id = self.arena.push(successor, moves, Some(entry.id));

            if reached_goal {
                return Some(id);
            }
            self.frontier.push(FrontierEntry { priority, id });
        }

        None
    }

    /// The boards from the root to `goal`, start-to-goal order.
    #[must_use]
    pub fn path(&self, goal: NodeId) -> Vec<Board> {
        self.arena.path(goal)
    }

    /// Frontier entries popped and expanded so far.
    #[must_use]
    pub const fn expanded(&self) -> usize {
        self.expanded
    }

    /// Successor boards created so far (goal included, predecessor-skips
    /// excluded).
    #[must_use]
    pub const fn generated(&self) -> usize {
        self.generated
    }

    /// Total nodes retained in the arena. Memory scales with this, not with
    /// the current frontier size: popped nodes stay alive as ancestors.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.arena.len()
    }
}
