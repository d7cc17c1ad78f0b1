//! Error types for maze adapters and the solver.
//!
//! An exhausted search is not an error: it is reported as
//! [`SearchOutcome::NotFound`](crate::SearchOutcome::NotFound).

use crate::traits::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SolveError>;

/// Failure reported by a [`Maze`](crate::Maze) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("maze adapter failed at node {node}: {message}")]
pub struct MazeError {
    pub node: NodeId,
    pub message: String,
}

impl MazeError {
    pub fn new<E: std::fmt::Display>(node: NodeId, message: E) -> Self {
        Self {
            node,
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("start node {start} is outside the maze (0..{num_nodes})")]
    StartOutOfRange { start: NodeId, num_nodes: usize },

    #[error("node {node} lists neighbor {neighbor} outside the maze (0..{num_nodes})")]
    NeighborOutOfRange {
        node: NodeId,
        neighbor: NodeId,
        num_nodes: usize,
    },

    #[error(transparent)]
    Maze(#[from] MazeError),

    /// The predecessor chain from `to` never reached `from`.
    ///
    /// The solver maintains that every claimed node chains back to the start
    /// of the task that claimed it; this variant means that invariant broke.
    #[error("predecessor chain from {to} does not reach {from}")]
    BrokenPredecessorChain { from: NodeId, to: NodeId },

    /// A forked task's result was missing after the fork/join region ended.
    #[error("task starting at node {start} finished without a result")]
    UnfinishedTask { start: NodeId },

    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
