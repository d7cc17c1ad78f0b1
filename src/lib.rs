//! Fork/join parallel maze search.
//!
//! This crate finds *some* path from a start cell to any goal cell of a finite
//! maze graph, using many workers that split a depth-first search between
//! them on a work-stealing thread pool.
//!
//! ## Core idea
//! 1. Describe your maze by implementing the [`Maze`] trait.
//! 2. A root task walks depth-first from the start, claiming each node in a
//!    lock-free visited set shared by all tasks.
//! 3. At a branch point the task forks one child per open neighbor. Once all
//!    tasks have finished, the first child path found is spliced onto the
//!    parent's path to the branch point.
//!
//! Paths are valid but not necessarily shortest, and which goal is reached
//! can vary from run to run.
//!
//! ## Quick start
//! ```
//! use fj_maze::{mazes::graph::GraphMaze, solve, SearchOutcome};
//!
//! let maze = GraphMaze::from_edges(3, &[(0, 1), (1, 2)], &[2]);
//! let outcome = solve(&maze, 0, 0).unwrap();
//! assert_eq!(outcome, SearchOutcome::Path(vec![0, 1, 2]));
//! ```
//!
//! ## Features
//! - `parallel` (default): run tasks on a rayon pool. Without it, forked
//!   children are queued and run on the calling thread.
//! - `tracing`: emit spans and events through the `tracing` crate.

pub mod builder;
pub mod error;
pub mod mazes;
pub mod path;
pub mod scheduler;
pub mod sequential;
pub mod shared;
pub mod solver;
pub mod stats;
mod task;
pub mod traits;

pub use crate::builder::SolverBuilder;
pub use crate::error::{MazeError, SolveError};
pub use crate::solver::{solve, ForkJoinSolver, SearchOutcome};
pub use crate::stats::SearchStats;
pub use crate::traits::{Maze, NodeId, PlayerToken};
