use std::collections::{HashMap, VecDeque};
use std::f32::consts::{FRAC_PI_2, PI};
use std::time::{Duration, Instant};

use maze_runner::config::{MazeConfig, PlayerConfig};
use maze_runner::core::input::FrameInput;
use maze_runner::core::maze::{GridPos, Maze};
use maze_runner::core::session::{GameSession, GameState};

/// Shortest cell path from Start to Finish.
fn solve(maze: &Maze) -> Vec<GridPos> {
    let (start, goal) = (maze.start(), maze.finish());
    let mut parent: HashMap<GridPos, GridPos> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    while let Some((x, y)) = queue.pop_front() {
        if (x, y) == goal {
            break;
        }
        for (dx, dy) in [(1isize, 0isize), (-1, 0), (0, 1), (0, -1)] {
            let (nx, ny) = (x as isize + dx, y as isize + dy);
            let next = (nx as usize, ny as usize);
            if matches!(maze.cell(nx, ny), Some(c) if !c.is_wall())
                && next != start
                && !parent.contains_key(&next)
            {
                parent.insert(next, (x, y));
                queue.push_back(next);
            }
        }
    }
    let mut path = vec![goal];
    while *path.last().unwrap() != start {
        path.push(parent[path.last().unwrap()]);
    }
    path.reverse();
    path
}

fn heading(from: GridPos, to: GridPos) -> f32 {
    match (to.0 as isize - from.0 as isize, to.1 as isize - from.1 as isize) {
        (1, 0) => 0.0,
        (0, 1) => FRAC_PI_2,
        (-1, 0) => PI,
        _ => 3.0 * FRAC_PI_2,
    }
}

fn new_session(t0: Instant) -> GameSession {
    let maze = MazeConfig { size: 11, coins: 8, seed: Some(2024) };
    GameSession::new(maze, PlayerConfig::default(), t0).unwrap()
}

/// Walks the solution one tick at a time; returns the tick count at the finish.
fn walk_to_finish(session: &mut GameSession, t0: Instant) -> u64 {
    let path = solve(session.world.maze());
    let mut tick = 0u64;
    for pair in path.windows(2) {
        let turn = heading(pair[0], pair[1]) - session.player.angle;
        session
            .update(&FrameInput { turn_delta: turn, ..FrameInput::default() }, t0)
            .unwrap();
        for _ in 0..10 {
            tick += 1;
            let now = t0 + Duration::from_millis(tick * 16);
            let ev = session.update(&FrameInput::forward(1), now).unwrap();
            assert!(ev.moved, "blocked between {:?} and {:?}", pair[0], pair[1]);
            if ev.completed {
                return tick;
            }
        }
    }
    panic!("walked the whole path without finishing");
}

#[test]
fn full_run_completes_freezes_and_restarts() {
    let t0 = Instant::now();
    let mut session = new_session(t0);
    let total = session.world.total_coins();
    assert_eq!(total, 8);

    let finish_tick = walk_to_finish(&mut session, t0);
    assert_eq!(session.state(), GameState::Completed);

    let collected = session.player.coins_collected as usize;
    assert_eq!(collected + session.world.coins().len(), total);

    let frozen = Duration::from_millis(finish_tick * 16);
    assert_eq!(session.elapsed(t0 + Duration::from_secs(100)), frozen);

    // movement is ignored once completed
    let pos = (session.player.pos.x, session.player.pos.y);
    let ev = session.update(&FrameInput::forward(-1), t0 + Duration::from_secs(101)).unwrap();
    assert!(!ev.moved && !ev.completed);
    assert_eq!((session.player.pos.x, session.player.pos.y), pos);
    assert_eq!(session.elapsed(t0 + Duration::from_secs(200)), frozen);

    let t1 = t0 + Duration::from_secs(300);
    assert!(session.update(&FrameInput::restart(), t1).unwrap().restarted);
    assert_eq!(session.state(), GameState::Playing);
    assert_eq!(session.player.coins_collected, 0);
    assert_eq!(session.world.coins().len(), 8);
    assert_eq!(session.elapsed(t1), Duration::ZERO);

    // the fresh maze is solvable again and completes exactly once
    walk_to_finish(&mut session, t1);
    assert!(session.is_completed());
    assert!(session.update(&FrameInput::quit(), t1).unwrap().quit);
}

#[test]
fn walking_into_a_wall_is_silently_ignored() {
    let t0 = Instant::now();
    let mut session = new_session(t0);
    // (1,0) is border wall: face up and push
    let turn = 3.0 * FRAC_PI_2 - session.player.angle;
    session.update(&FrameInput { turn_delta: turn, ..FrameInput::default() }, t0).unwrap();
    for _ in 0..10 {
        session.update(&FrameInput::forward(1), t0).unwrap();
    }
    assert!(session.player.pos.y >= 1.0);
    assert_eq!(session.player.pos.y as usize, 1);
    assert_eq!(session.state(), GameState::Playing);
}
