//! Core trait definitions for searchable mazes.
//!
//! To run the fork/join solver on your own graph, implement [`Maze`] for a
//! struct that owns (or borrows) the maze data.
//!
//! The trait encodes what the search needs from a maze and nothing more:
//! - Dense node identifiers: every cell is a [`NodeId`] in `[0, N)`.
//! - Adjacency: `neighbors(id)` lists the cells reachable in one step.
//! - Goal predicate: `has_goal(id)` marks the cells that end a search.
//! - Players: optional animation/audit hooks, invoked as workers move.
//!
//! The solver never mutates the maze. Every method takes `&self` and may be
//! called from many worker threads at once, so implementations must be
//! [`Sync`] and any interior state behind the player hooks must tolerate
//! arbitrary interleavings.

use crate::error::MazeError;

/// Dense identifier of a maze cell, in `[0, num_nodes)`.
pub type NodeId = usize;

/// Opaque handle returned by [`Maze::new_player`].
///
/// The solver hands it back unchanged to [`Maze::move_player`]; its meaning is
/// entirely up to the maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlayerToken(pub usize);

impl PlayerToken {
    /// Token returned by mazes that do not track players.
    pub const NONE: PlayerToken = PlayerToken(usize::MAX);
}

/// A finite, immutable maze graph searched by the solver.
///
/// Semantics:
/// - Node ids are dense: `0..num_nodes()`. The solver sizes its shared
///   tables from `num_nodes()` and rejects ids outside that range.
/// - `neighbors` must be deterministic for a given maze. Duplicates are
///   tolerated; a node listing itself is tolerated.
/// - Player hooks are side effects only. Search results never depend on them.
pub trait Maze: Sync {
    /// Number of cells `N`; valid ids are `0..N`.
    fn num_nodes(&self) -> usize;

    /// Cells adjacent to `id`.
    ///
    /// Errors are propagated unchanged by the solver.
    fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, MazeError>;

    /// Whether `id` is a goal cell.
    fn has_goal(&self, id: NodeId) -> bool;

    /// Create a player standing on `id`.
    fn new_player(&self, _id: NodeId) -> PlayerToken {
        PlayerToken::NONE
    }

    /// Move `player` onto `id`.
    fn move_player(&self, _player: PlayerToken, _id: NodeId) {}
}

impl<M: Maze + ?Sized> Maze for &M {
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, MazeError> {
        (**self).neighbors(id)
    }

    fn has_goal(&self, id: NodeId) -> bool {
        (**self).has_goal(id)
    }

    fn new_player(&self, id: NodeId) -> PlayerToken {
        (**self).new_player(id)
    }

    fn move_player(&self, player: PlayerToken, id: NodeId) {
        (**self).move_player(player, id)
    }
}
