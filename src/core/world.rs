//! The playing field: maze, coins and spatial queries (movement, rays).
use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::maze::{Cell, GridPos, Maze};
use crate::error::MazeError;

/// Distance advanced per march step, in grid units.
pub const RAY_STEP: f32 = 0.1;
pub const RAY_MAX_DISTANCE: f32 = 20.0;
const RAY_MAX_STEPS: u32 = 200;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HitKind {
    Wall,
    Finish,
    /// The ray ran out of range without touching anything.
    None,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub kind: HitKind,
}

pub struct World {
    maze: Maze,
    coins: HashSet<GridPos>,
    total_coins: usize,
}

/// Truncates toward zero, matching how the movement model discretizes.
#[inline]
fn truncate(x: f32, y: f32) -> (isize, isize) {
    (x as isize, y as isize)
}

impl World {
    /// Generates a fresh maze and scatters `coin_count` coins over it.
    pub fn new<R: Rng + ?Sized>(size: usize, coin_count: usize, rng: &mut R) -> Result<Self, MazeError> {
        let maze = Maze::generate(size, rng)?;
        let mut world = Self::from_maze(maze);
        world.place_coins(coin_count, rng);
        Ok(world)
    }

    /// Wraps an existing maze with no coins placed.
    pub fn from_maze(maze: Maze) -> Self {
        Self {
            maze,
            coins: HashSet::new(),
            total_coins: 0,
        }
    }

    /// Wraps an existing maze with coins at fixed cells; positions that are
    /// not plain Path cells are dropped.
    pub fn with_coins(maze: Maze, coins: impl IntoIterator<Item = GridPos>) -> Self {
        let coins: HashSet<GridPos> = coins
            .into_iter()
            .filter(|&(x, y)| x < maze.size() && y < maze.size() && maze.get(x, y) == Cell::Path)
            .collect();
        let total_coins = coins.len();
        Self { maze, coins, total_coins }
    }

    /// Replaces the coin set with a uniform sample of distinct Path cells.
    /// Start and Finish never hold a coin.
    pub fn place_coins<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        let paths = self.maze.path_cells();
        self.coins = paths.choose_multiple(rng, count).copied().collect();
        self.total_coins = self.coins.len();
        log::debug!("placed {} of {} requested coins", self.total_coins, count);
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn size(&self) -> usize {
        self.maze.size()
    }

    pub fn coins(&self) -> &HashSet<GridPos> {
        &self.coins
    }

    pub fn total_coins(&self) -> usize {
        self.total_coins
    }

    fn cell_at(&self, x: f32, y: f32) -> Option<Cell> {
        let (i, j) = truncate(x, y);
        self.maze.cell(i, j)
    }

    pub fn is_valid_move(&self, x: f32, y: f32) -> bool {
        matches!(self.cell_at(x, y), Some(c) if !c.is_wall())
    }

    /// Removes the coin in the truncated cell, if any.
    pub fn collect_coin(&mut self, x: f32, y: f32) -> bool {
        let (i, j) = truncate(x, y);
        if i < 0 || j < 0 {
            return false;
        }
        self.coins.remove(&(i as usize, j as usize))
    }

    pub fn is_finish(&self, x: f32, y: f32) -> bool {
        self.cell_at(x, y) == Some(Cell::Finish)
    }

    /// Fixed-step march from (x, y) along `angle`.
    ///
    /// Samples every [`RAY_STEP`] units and stops at the first sample whose
    /// cell is out of bounds, Wall or Finish. Sample positions are computed
    /// from the step index rather than accumulated, so the reported distance
    /// never drifts past [`RAY_MAX_DISTANCE`]. A corner thinner than one step
    /// can be skipped at shallow angles.
    pub fn cast_ray(&self, x: f32, y: f32, angle: f32) -> RayHit {
        let (dx, dy) = (angle.cos(), angle.sin());
        for step in 0..RAY_MAX_STEPS {
            let distance = step as f32 * RAY_STEP;
            match self.cell_at(x + dx * distance, y + dy * distance) {
                None | Some(Cell::Wall) => {
                    return RayHit { distance, kind: HitKind::Wall };
                }
                Some(Cell::Finish) => {
                    return RayHit { distance, kind: HitKind::Finish };
                }
                Some(_) => {}
            }
        }
        RayHit {
            distance: RAY_MAX_DISTANCE,
            kind: HitKind::None,
        }
    }
}
