//! Worker task: depth-first exploration of one region of the maze.
//!
//! A task owns a private LIFO frontier seeded with its assigned start. It
//! claims nodes through the shared [`VisitedSet`](crate::shared::VisitedSet),
//! walks linear corridors itself, and at a branch point forks one child task
//! per open neighbor. Forking does not wait: the parent keeps draining its
//! own frontier and hands back a [`TaskReport`] listing its children.
//!
//! Once the whole fork tree has finished, [`search`] walks the reports with
//! an explicit stack. Each task's answer is its own goal path if it reached
//! one, else the first successful child in creation order, spliced onto the
//! task's path to that child's split node. Every path a task returns starts
//! at its assigned start; the root is assigned the global start.

use crate::error::{Result, SolveError};
use crate::path::path_from_to;
use crate::scheduler::{fork_join, Forked, Forker};
use crate::shared::SharedState;
use crate::solver::SearchOutcome;
use crate::stats::{LiveTask, StatsRecorder};
use crate::traits::{Maze, NodeId};

/// State shared by all tasks of one search.
pub(crate) struct SearchContext<'a, M: ?Sized> {
    pub(crate) maze: &'a M,
    pub(crate) shared: SharedState,
    pub(crate) stats: StatsRecorder,
    /// Claims required since the last fork before the next branch forks;
    /// 0 forks at every branch.
    pub(crate) fork_after: usize,
}

impl<'a, M: Maze + ?Sized> SearchContext<'a, M> {
    pub(crate) fn new(maze: &'a M, fork_after: usize) -> Self {
        Self {
            maze,
            shared: SharedState::new(maze.num_nodes()),
            stats: StatsRecorder::default(),
            fork_after,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Task {
    start: NodeId,
    /// Node of the parent task this one was forked from.
    via: Option<NodeId>,
}

/// Frontier entry: a node and the node it was discovered from.
#[derive(Debug, Clone, Copy)]
struct Step {
    node: NodeId,
    via: Option<NodeId>,
}

struct Branch {
    task: Task,
    split_at: NodeId,
    handle: Forked<TaskReport>,
}

/// What a task leaves behind once its frontier is drained.
struct TaskReport {
    /// Goal path from the task's start, `None` if it reached no goal.
    reached: Result<Option<Vec<NodeId>>>,
    branches: Vec<Branch>,
}

/// A task whose children are being joined.
struct Frame {
    task: Task,
    branches: std::vec::IntoIter<Branch>,
    /// Split node of the branch joined last.
    split_at: NodeId,
}

/// Search from `start` and return a path beginning there.
pub(crate) fn search<'a, M>(
    cx: &'a SearchContext<'a, M>,
    start: NodeId,
) -> Result<SearchOutcome>
where
    M: Maze + ?Sized,
{
    let root = Task::root(start);
    let live = cx.stats.enter_task();
    let report = fork_join(|forker| root.explore(cx, forker, live));
    assemble(cx, root, report)
}

/// Fold a finished fork tree into the root's outcome without recursing.
fn assemble<M: ?Sized>(
    cx: &SearchContext<'_, M>,
    root: Task,
    report: TaskReport,
) -> Result<SearchOutcome> {
    let mut stack = Vec::new();
    let mut unused = Vec::new();
    let mut done = open(root, report, &mut stack, &mut unused);

    let outcome = loop {
        let Some(frame) = stack.last_mut() else {
            break done.unwrap_or(Ok(SearchOutcome::NotFound));
        };
        match done.take() {
            Some(Ok(SearchOutcome::Path(tail))) => {
                let composed = frame.task.path_to(cx, frame.split_at).map(|mut path| {
                    path.extend(tail);
                    SearchOutcome::Path(path)
                });
                close(&mut stack, &mut unused);
                done = Some(composed);
            }
            Some(Err(err)) => {
                close(&mut stack, &mut unused);
                done = Some(Err(err));
            }
            Some(Ok(SearchOutcome::NotFound)) | None => match frame.branches.next() {
                Some(Branch {
                    task,
                    split_at,
                    handle,
                }) => {
                    frame.split_at = split_at;
                    done = match handle.join() {
                        Some(report) => open(task, report, &mut stack, &mut unused),
                        None => Some(Err(SolveError::UnfinishedTask { start: task.start })),
                    };
                }
                None => {
                    stack.pop();
                    done = Some(Ok(SearchOutcome::NotFound));
                }
            },
        }
    };
    discard(unused);
    outcome
}

/// Settle a task from its own report, or push it to have its children joined.
fn open(
    task: Task,
    report: TaskReport,
    stack: &mut Vec<Frame>,
    unused: &mut Vec<Branch>,
) -> Option<Result<SearchOutcome>> {
    match report.reached {
        Ok(None) => {
            stack.push(Frame {
                task,
                branches: report.branches.into_iter(),
                split_at: task.start,
            });
            None
        }
        Ok(Some(path)) => {
            unused.extend(report.branches);
            Some(Ok(SearchOutcome::Path(path)))
        }
        Err(err) => {
            unused.extend(report.branches);
            Some(Err(err))
        }
    }
}

fn close(stack: &mut Vec<Frame>, unused: &mut Vec<Branch>) {
    if let Some(frame) = stack.pop() {
        unused.extend(frame.branches);
    }
}

/// Drop subtrees that are no longer needed, one level at a time.
fn discard(mut unused: Vec<Branch>) {
    while let Some(branch) = unused.pop() {
        if let Some(report) = branch.handle.join() {
            unused.extend(report.branches);
        }
    }
}

impl Task {
    pub(crate) fn root(start: NodeId) -> Self {
        Self { start, via: None }
    }

    fn branch(start: NodeId, split_at: NodeId) -> Self {
        Self {
            start,
            via: Some(split_at),
        }
    }

    fn explore<'a, M>(
        self,
        cx: &'a SearchContext<'a, M>,
        forker: &Forker<'_, 'a>,
        live: LiveTask<'a>,
    ) -> TaskReport
    where
        M: Maze + ?Sized,
    {
        let mut branches = Vec::new();
        let reached = self.walk(cx, forker, &mut branches);
        drop(live);
        TaskReport { reached, branches }
    }

    fn walk<'a, M>(
        self,
        cx: &'a SearchContext<'a, M>,
        forker: &Forker<'_, 'a>,
        branches: &mut Vec<Branch>,
    ) -> Result<Option<Vec<NodeId>>>
    where
        M: Maze + ?Sized,
    {
        let maze = cx.maze;
        let shared = &cx.shared;
        let num_nodes = shared.visited.capacity();

        let mut frontier = vec![Step {
            node: self.start,
            via: self.via,
        }];
        let mut since_fork = 0usize;
        let player = maze.new_player(self.start);

        while let Some(step) = frontier.pop() {
            if shared.found.is_found() {
                break;
            }
            let current = step.node;

            if maze.has_goal(current) {
                maze.move_player(player, current);
                shared.found.signal_found();
                #[cfg(feature = "tracing")]
                tracing::debug!(goal = current, task_start = self.start, "goal reached");
                return self.reached_path(cx, step).map(Some);
            }

            if !shared.visited.claim(current) {
                cx.stats.claim_lost();
                #[cfg(feature = "tracing")]
                tracing::trace!(node = current, "claim lost");
                continue;
            }
            cx.stats.claimed();
            if let Some(via) = step.via {
                shared.predecessors.settle(current, via);
            }
            since_fork += 1;
            maze.move_player(player, current);

            let mut open = maze.neighbors(current)?;
            if let Some(&neighbor) = open.iter().find(|&&n| n >= num_nodes) {
                return Err(SolveError::NeighborOutOfRange {
                    node: current,
                    neighbor,
                    num_nodes,
                });
            }
            open.retain(|&n| !shared.visited.contains(n));
            for &n in &open {
                shared.predecessors.record(n, current);
            }

            match open.len() {
                0 => {}
                1 => frontier.push(Step {
                    node: open[0],
                    via: Some(current),
                }),
                _ if since_fork < cx.fork_after => {
                    frontier.extend(open.into_iter().map(|node| Step {
                        node,
                        via: Some(current),
                    }));
                }
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(split_at = current, children = open.len(), "fork");
                    since_fork = 0;
                    for n in open {
                        let child = Task::branch(n, current);
                        let live = cx.stats.enter_task();
                        branches.push(Branch {
                            task: child,
                            split_at: current,
                            handle: forker.fork(move |forker| child.explore(cx, forker, live)),
                        });
                    }
                }
            }
        }

        Ok(None)
    }

    /// Path from this task's start to a goal popped from the frontier.
    fn reached_path<M: ?Sized>(
        &self,
        cx: &SearchContext<'_, M>,
        step: Step,
    ) -> Result<Vec<NodeId>> {
        match step.via {
            Some(via) if step.node != self.start => {
                let mut path = self.path_to(cx, via)?;
                path.push(step.node);
                Ok(path)
            }
            _ => Ok(vec![step.node]),
        }
    }

    fn path_to<M: ?Sized>(
        &self,
        cx: &SearchContext<'_, M>,
        node: NodeId,
    ) -> Result<Vec<NodeId>> {
        path_from_to(&cx.shared.predecessors, self.start, node).ok_or(
            SolveError::BrokenPredecessorChain {
                from: self.start,
                to: node,
            },
        )
    }
}
