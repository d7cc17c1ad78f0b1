//! Fork/join solver entry points.

use crate::error::{Result, SolveError};
use crate::scheduler::{PoolConfig, WorkerPool};
use crate::stats::SearchStats;
use crate::task::{search, SearchContext};
use crate::traits::{Maze, NodeId};

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Nodes from the start to a goal, both included.
    Path(Vec<NodeId>),
    /// Every node reachable from the start was explored without meeting a goal.
    NotFound,
}

impl SearchOutcome {
    pub fn is_path(&self) -> bool {
        matches!(self, SearchOutcome::Path(_))
    }

    pub fn path(&self) -> Option<&[NodeId]> {
        match self {
            SearchOutcome::Path(path) => Some(path),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn into_path(self) -> Option<Vec<NodeId>> {
        match self {
            SearchOutcome::Path(path) => Some(path),
            SearchOutcome::NotFound => None,
        }
    }
}

/// Parallel depth-first maze solver.
///
/// Typical usage:
/// ```
/// use fj_maze::{mazes::graph::GraphMaze, ForkJoinSolver, SearchOutcome};
///
/// let maze = GraphMaze::from_edges(5, &[(0, 1), (1, 2), (1, 3), (3, 4)], &[4]);
/// let solver = ForkJoinSolver::new(&maze);
/// assert_eq!(solver.run(0).unwrap(), SearchOutcome::Path(vec![0, 1, 3, 4]));
/// ```
pub struct ForkJoinSolver<M: Maze> {
    maze: M,
    fork_after: usize,
    config: PoolConfig,
    pool: WorkerPool,
}

impl<M: Maze> ForkJoinSolver<M> {
    /// Solver that forks at every branch point, on rayon's global pool.
    pub fn new(maze: M) -> Self {
        Self::with_fork_after(maze, 0)
    }

    /// Solver that defers forking until `fork_after` nodes were claimed since
    /// the last fork. `fork_after <= 0` forks at every branch point.
    pub fn with_fork_after(maze: M, fork_after: isize) -> Self {
        Self {
            maze,
            fork_after: normalize_fork_after(fork_after),
            config: PoolConfig::default(),
            pool: WorkerPool::global(),
        }
    }

    /// Builds the worker pool once; every run reuses it.
    pub(crate) fn from_parts(maze: M, fork_after: usize, config: PoolConfig) -> Result<Self> {
        Ok(Self {
            maze,
            fork_after,
            config,
            pool: WorkerPool::new(config)?,
        })
    }

    pub fn maze(&self) -> &M {
        &self.maze
    }

    pub fn fork_after(&self) -> usize {
        self.fork_after
    }

    pub fn pool_config(&self) -> PoolConfig {
        self.config
    }

    /// Search from `start` for any goal.
    pub fn run(&self, start: NodeId) -> Result<SearchOutcome> {
        self.run_with_stats(start).map(|(outcome, _)| outcome)
    }

    /// Search from `start` and report the counters collected on the way.
    pub fn run_with_stats(&self, start: NodeId) -> Result<(SearchOutcome, SearchStats)> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("fj_solve", start, fork_after = self.fork_after);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let num_nodes = self.maze.num_nodes();
        if start >= num_nodes {
            return Err(SolveError::StartOutOfRange { start, num_nodes });
        }

        let cx = SearchContext::new(&self.maze, self.fork_after);
        let outcome = self.pool.install(|| search(&cx, start))?;
        let stats = cx.stats.snapshot();

        #[cfg(feature = "tracing")]
        tracing::info!(
            found = outcome.is_path(),
            tasks = stats.tasks,
            nodes_claimed = stats.nodes_claimed,
            peak_live_tasks = stats.peak_live_tasks,
            "search finished"
        );

        Ok((outcome, stats))
    }
}

/// Search `maze` from `start` with the given fork threshold.
///
/// `fork_after <= 0` forks a child task at every branch point.
pub fn solve<M: Maze + ?Sized>(
    maze: &M,
    start: NodeId,
    fork_after: isize,
) -> Result<SearchOutcome> {
    ForkJoinSolver::with_fork_after(maze, fork_after).run(start)
}

pub(crate) fn normalize_fork_after(fork_after: isize) -> usize {
    fork_after.max(0) as usize
}
