use fj_maze::{
    mazes::graph::GraphMaze, sequential::solve_sequential, ForkJoinSolver, Maze, SearchOutcome,
    SolverBuilder,
};
use proptest::prelude::*;
use std::collections::VecDeque;

fn reachable(maze: &GraphMaze, start: usize) -> Vec<bool> {
    let mut seen = vec![false; maze.num_nodes()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    while let Some(u) = queue.pop_front() {
        for v in maze.neighbors(u).unwrap() {
            if !seen[v] {
                seen[v] = true;
                queue.push_back(v);
            }
        }
    }
    seen
}

fn check_path(maze: &GraphMaze, start: usize, path: &[usize]) -> Result<(), TestCaseError> {
    prop_assert_eq!(path.first(), Some(&start));
    prop_assert!(maze.has_goal(*path.last().unwrap()));
    for window in path.windows(2) {
        prop_assert!(maze.is_edge(window[0], window[1]), "{:?} is not an edge", window);
    }
    Ok(())
}

fn random_maze() -> impl Strategy<Value = (GraphMaze, usize, isize)> {
    (1usize..40).prop_flat_map(|n| {
        (
            prop::collection::vec((0..n, 0..n), 0..80),
            prop::collection::vec(0..n, 0..3),
            0..n,
            -2isize..6,
        )
            .prop_map(move |(edges, goals, start, fork_after)| {
                (GraphMaze::from_edges(n, &edges, &goals), start, fork_after)
            })
    })
}

proptest! {
    #[test]
    fn outcome_matches_reachability((maze, start, fork_after) in random_maze()) {
        let seen = reachable(&maze, start);
        let goal_reachable = (0..maze.num_nodes()).any(|id| seen[id] && maze.has_goal(id));
        let solver = ForkJoinSolver::with_fork_after(&maze, fork_after);
        let (outcome, stats) = solver.run_with_stats(start).unwrap();
        let reachable_count = seen.iter().filter(|&&s| s).count();

        // one successful claim per node at most
        prop_assert!(stats.nodes_claimed <= reachable_count);
        match outcome {
            SearchOutcome::Path(path) => {
                prop_assert!(goal_reachable);
                check_path(&maze, start, &path)?;
            }
            SearchOutcome::NotFound => {
                prop_assert!(!goal_reachable);
                prop_assert_eq!(stats.nodes_claimed, reachable_count);
            }
        }
    }

    #[test]
    fn sequential_agrees_on_existence((maze, start, fork_after) in random_maze()) {
        let parallel = ForkJoinSolver::with_fork_after(&maze, fork_after).run(start).unwrap();
        let sequential = solve_sequential(&maze, start).unwrap();
        prop_assert_eq!(parallel.is_path(), sequential.is_path());
        if let Some(path) = sequential.path() {
            check_path(&maze, start, path)?;
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn worker_count_does_not_change_existence((maze, start, fork_after) in random_maze()) {
        let baseline = solve_sequential(&maze, start).unwrap().is_path();
        for threads in [1usize, 2, 4, 8] {
            let solver = SolverBuilder::new(&maze)
                .fork_after(fork_after)
                .num_threads(threads)
                .build()
                .unwrap();
            let outcome = solver.run(start).unwrap();
            prop_assert_eq!(outcome.is_path(), baseline);
            if let Some(path) = outcome.path() {
                check_path(&maze, start, path)?;
            }
        }
    }
}
