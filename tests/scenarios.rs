use fj_maze::{
    mazes::{graph::GraphMaze, grid::GridMaze},
    solve, ForkJoinSolver, Maze, SearchOutcome, SolverBuilder,
};

fn assert_valid_path(maze: &GraphMaze, start: usize, path: &[usize]) {
    assert_eq!(path.first(), Some(&start));
    assert!(maze.has_goal(*path.last().unwrap()));
    for window in path.windows(2) {
        assert!(
            maze.is_edge(window[0], window[1]),
            "{} -> {} is not an edge",
            window[0],
            window[1]
        );
    }
    let mut seen = path.to_vec();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), path.len(), "path repeats a node: {path:?}");
}

#[test]
fn s1_linear_without_goal() {
    let maze = GraphMaze::from_edges(3, &[(0, 1), (1, 2)], &[]);
    let (outcome, stats) = ForkJoinSolver::new(&maze).run_with_stats(0).unwrap();
    assert_eq!(outcome, SearchOutcome::NotFound);
    assert_eq!(stats.nodes_claimed, 3);
    assert_eq!(stats.claims_lost, 0);
}

#[test]
fn s2_linear_goal_at_end() {
    let maze = GraphMaze::from_edges(3, &[(0, 1), (1, 2)], &[2]);
    assert_eq!(solve(&maze, 0, 0).unwrap(), SearchOutcome::Path(vec![0, 1, 2]));
}

#[test]
fn s3_fork_at_branch() {
    let maze = GraphMaze::from_edges(5, &[(0, 1), (1, 2), (1, 3), (3, 4)], &[4]);
    let (outcome, stats) = ForkJoinSolver::new(&maze).run_with_stats(0).unwrap();
    assert_eq!(outcome, SearchOutcome::Path(vec![0, 1, 3, 4]));
    // root plus one child per open neighbor of node 1
    assert_eq!(stats.tasks, 3);
    assert!(stats.peak_live_tasks >= 2);
}

#[test]
fn s4_two_goals() {
    let maze = GraphMaze::from_edges(5, &[(0, 1), (0, 2), (1, 3), (2, 4)], &[3, 4]);
    for _ in 0..50 {
        let path = solve(&maze, 0, 0).unwrap().into_path().unwrap();
        assert!(path == vec![0, 1, 3] || path == vec![0, 2, 4], "{path:?}");
    }
}

#[test]
fn s5_cycle() {
    let maze = GraphMaze::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)], &[2]);
    for fork_after in [-1, 0, 1, 3] {
        let path = solve(&maze, 0, fork_after).unwrap().into_path().unwrap();
        assert!(path == vec![0, 1, 2] || path == vec![0, 3, 2], "{path:?}");
        assert_valid_path(&maze, 0, &path);
    }
}

#[test]
fn s6_isolated_start() {
    let maze = GraphMaze::from_edges(2, &[], &[1]);
    assert_eq!(solve(&maze, 0, 0).unwrap(), SearchOutcome::NotFound);
}

#[test]
fn start_on_goal_returns_start() {
    let maze = GraphMaze::from_edges(3, &[(0, 1), (1, 2)], &[0, 2]);
    assert_eq!(solve(&maze, 0, 0).unwrap(), SearchOutcome::Path(vec![0]));
}

#[test]
fn deferred_forking_still_finds_goal() {
    // a comb: spine 0..8, one tooth per spine node, goal at the last tooth
    let spine: Vec<(usize, usize)> = (0..7).map(|i| (i, i + 1)).collect();
    let teeth: Vec<(usize, usize)> = (0..8).map(|i| (i, i + 8)).collect();
    let edges: Vec<_> = spine.into_iter().chain(teeth).collect();
    let maze = GraphMaze::from_edges(16, &edges, &[15]);
    for fork_after in [0, 1, 2, 5, 100] {
        let path = solve(&maze, 0, fork_after).unwrap().into_path().unwrap();
        assert_valid_path(&maze, 0, &path);
        assert_eq!(path.last(), Some(&15));
    }
}

#[test]
fn players_are_created_and_moved() {
    let maze = GraphMaze::from_edges(5, &[(0, 1), (1, 2), (1, 3), (3, 4)], &[4]);
    let (_, stats) = ForkJoinSolver::new(&maze).run_with_stats(0).unwrap();
    assert_eq!(maze.players_created(), stats.tasks);
    assert!(maze.player_moves() >= 4);
}

fn open_room(side: usize, goal: Option<(usize, usize)>) -> GridMaze {
    let rows: Vec<String> = (0..side)
        .map(|row| {
            (0..side)
                .map(|col| match (row, col) {
                    (0, 0) => 'S',
                    cell if Some(cell) == goal => 'G',
                    _ => '.',
                })
                .collect()
        })
        .collect();
    GridMaze::from_rows(&rows).unwrap()
}

#[test]
fn open_room_on_default_pool() {
    let room = open_room(128, None);
    let start = room.start().unwrap();
    assert_eq!(solve(&room, start, 0).unwrap(), SearchOutcome::NotFound);

    let (outcome, stats) = ForkJoinSolver::new(&room).run_with_stats(start).unwrap();
    assert_eq!(outcome, SearchOutcome::NotFound);
    assert_eq!(stats.nodes_claimed, 128 * 128);

    let room = open_room(128, Some((127, 127)));
    let path = solve(&room, start, 0).unwrap().into_path().unwrap();
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&room.id_of(127, 127)));
    for window in path.windows(2) {
        let (r0, c0) = room.cell_of(window[0]);
        let (r1, c1) = room.cell_of(window[1]);
        assert_eq!(r0.abs_diff(r1) + c0.abs_diff(c1), 1);
    }
}

#[test]
fn goal_stops_remaining_tasks() {
    // hub 0 with four corridors of `arm` nodes, a goal at the end of each
    let (arms, arm) = (4, 50);
    let mut edges = Vec::new();
    let mut goals = Vec::new();
    for a in 0..arms {
        let first = 1 + a * arm;
        edges.push((0, first));
        edges.extend((first..first + arm - 1).map(|n| (n, n + 1)));
        goals.push(first + arm - 1);
    }
    let reachable = 1 + arms * arm;
    let maze = GraphMaze::from_edges(reachable, &edges, &goals);

    let (outcome, stats) = SolverBuilder::new(&maze)
        .num_threads(1)
        .build()
        .unwrap()
        .run_with_stats(0)
        .unwrap();
    let path = outcome.into_path().unwrap();
    assert_valid_path(&maze, 0, &path);
    assert_eq!(path.len(), arm + 1);
    // the hub plus one corridor; the other corridors stop before claiming
    assert_eq!(stats.nodes_claimed, arm);
    assert!(stats.nodes_claimed < reachable);
}
