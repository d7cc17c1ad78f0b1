//! Reference maze implementations for the fork/join solver.
//!
//! These modules show how to implement [`Maze`](crate::traits::Maze) for
//! concrete maze representations:
//! - [`graph`] : adjacency lists over dense ids, with counted player hooks.
//! - [`grid`]  : rectangular character grid with 4-neighborhood moves.

pub mod graph;
pub mod grid;
