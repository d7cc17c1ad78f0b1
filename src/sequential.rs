//! Single-threaded depth-first reference solver.
//!
//! Same frontier discipline as the fork/join tasks, without forking: branch
//! points push every open neighbor onto one stack. Used as a baseline in tests
//! and benchmarks.

use crate::error::{Result, SolveError};
use crate::path::path_from_to;
use crate::shared::{PredecessorMap, VisitedSet};
use crate::solver::SearchOutcome;
use crate::traits::{Maze, NodeId};

pub fn solve_sequential<M: Maze + ?Sized>(maze: &M, start: NodeId) -> Result<SearchOutcome> {
    let num_nodes = maze.num_nodes();
    if start >= num_nodes {
        return Err(SolveError::StartOutOfRange { start, num_nodes });
    }

    let visited = VisitedSet::new(num_nodes);
    let predecessors = PredecessorMap::new(num_nodes);
    let player = maze.new_player(start);
    let mut frontier = vec![start];

    while let Some(current) = frontier.pop() {
        if maze.has_goal(current) {
            maze.move_player(player, current);
            return path_from_to(&predecessors, start, current)
                .map(SearchOutcome::Path)
                .ok_or(SolveError::BrokenPredecessorChain { from: start, to: current });
        }
        if !visited.claim(current) {
            continue;
        }
        maze.move_player(player, current);
        for neighbor in maze.neighbors(current)? {
            if neighbor >= num_nodes {
                return Err(SolveError::NeighborOutOfRange {
                    node: current,
                    neighbor,
                    num_nodes,
                });
            }
            if !visited.contains(neighbor) {
                predecessors.settle(neighbor, current);
                frontier.push(neighbor);
            }
        }
    }
    Ok(SearchOutcome::NotFound)
}
