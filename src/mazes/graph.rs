//! Maze given as adjacency lists over dense node ids.
//!
//! Players are counted rather than drawn: `new_player` hands out sequential
//! tokens and `move_player` bumps a move counter, both atomically, so the
//! hooks are observable from tests and safe under any interleaving.

use crate::error::MazeError;
use crate::traits::{Maze, NodeId, PlayerToken};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub struct GraphMaze {
    /// adjacency[u] = neighbors of u, in insertion order
    adjacency: Vec<Vec<NodeId>>,
    goals: Vec<bool>,
    players: AtomicUsize,
    moves: AtomicUsize,
}

impl GraphMaze {
    /// Build from explicit adjacency lists.
    ///
    /// # Panics
    /// Panics if a neighbor or goal id is outside `0..adjacency.len()`.
    pub fn new(adjacency: Vec<Vec<NodeId>>, goals: &[NodeId]) -> Self {
        let n = adjacency.len();
        assert!(
            adjacency.iter().flatten().all(|&v| v < n),
            "neighbor id out of range"
        );
        let mut goal_mask = vec![false; n];
        for &g in goals {
            assert!(g < n, "goal id {g} out of range");
            goal_mask[g] = true;
        }
        Self {
            adjacency,
            goals: goal_mask,
            players: AtomicUsize::new(0),
            moves: AtomicUsize::new(0),
        }
    }

    /// Build an undirected maze with `num_nodes` nodes from an edge list.
    pub fn from_edges(num_nodes: usize, edges: &[(NodeId, NodeId)], goals: &[NodeId]) -> Self {
        let mut adjacency = vec![Vec::new(); num_nodes];
        for &(u, v) in edges {
            adjacency[u].push(v);
            if u != v {
                adjacency[v].push(u);
            }
        }
        Self::new(adjacency, goals)
    }

    pub fn is_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.adjacency.get(u).is_some_and(|nbs| nbs.contains(&v))
    }

    pub fn goals(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.goals
            .iter()
            .enumerate()
            .filter_map(|(id, &g)| g.then_some(id))
    }

    pub fn players_created(&self) -> usize {
        self.players.load(Ordering::Relaxed)
    }

    pub fn player_moves(&self) -> usize {
        self.moves.load(Ordering::Relaxed)
    }
}

impl Maze for GraphMaze {
    fn num_nodes(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, MazeError> {
        self.adjacency
            .get(id)
            .cloned()
            .ok_or_else(|| MazeError::new(id, "no such node"))
    }

    fn has_goal(&self, id: NodeId) -> bool {
        self.goals.get(id).copied().unwrap_or(false)
    }

    fn new_player(&self, _id: NodeId) -> PlayerToken {
        PlayerToken(self.players.fetch_add(1, Ordering::Relaxed))
    }

    fn move_player(&self, _player: PlayerToken, _id: NodeId) {
        self.moves.fetch_add(1, Ordering::Relaxed);
    }
}
