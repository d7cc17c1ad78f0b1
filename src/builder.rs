use crate::error::Result;
use crate::scheduler::PoolConfig;
use crate::solver::{normalize_fork_after, ForkJoinSolver};
use crate::Maze;

pub struct SolverBuilder<M: Maze> {
    maze: M,
    fork_after: isize,
    pool: PoolConfig,
}

impl<M: Maze> SolverBuilder<M> {
    pub fn new(maze: M) -> Self {
        Self {
            maze,
            fork_after: 0,
            pool: PoolConfig::default(),
        }
    }
    pub fn fork_after(mut self, fork_after: isize) -> Self {
        self.fork_after = fork_after;
        self
    }
    /// 0 keeps rayon's default of one worker per logical CPU.
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.pool.num_threads = Some(num_threads);
        self
    }
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.pool.stack_size = Some(bytes);
        self
    }
    /// Fails if a dedicated worker pool cannot be started.
    pub fn build(self) -> Result<ForkJoinSolver<M>> {
        ForkJoinSolver::from_parts(self.maze, normalize_fork_after(self.fork_after), self.pool)
    }
}
