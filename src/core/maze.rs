//! Maze grid and perfect-maze generation.
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::MazeError;

pub const MIN_MAZE_SIZE: usize = 5;

/// Grid coordinate as `(x, y)`.
pub type GridPos = (usize, usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Path,
    Start,
    Finish,
}

impl Cell {
    #[inline]
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }
}

/// Square grid of odd side length; the outer ring is always `Wall`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    size: usize,
    cells: Vec<Cell>,
}

/// Rejects sizes the stride-2 carve cannot turn into a valid interior.
pub fn validate_size(size: usize) -> Result<(), MazeError> {
    if size < MIN_MAZE_SIZE {
        return Err(MazeError::TooSmall(size));
    }
    if size % 2 == 0 {
        return Err(MazeError::EvenSize(size));
    }
    Ok(())
}

const DIRECTIONS: [(isize, isize); 4] = [(0, 2), (2, 0), (0, -2), (-2, 0)];

/// One level of the carve; `next` indexes into the cell's shuffled directions.
struct Frame {
    x: usize,
    y: usize,
    dirs: [(isize, isize); 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(maze: &mut Maze, x: usize, y: usize, rng: &mut R) -> Self {
        maze.set(x, y, Cell::Path);
        let mut dirs = DIRECTIONS;
        dirs.shuffle(rng);
        Self { x, y, dirs, next: 0 }
    }
}

impl Maze {
    /// All-wall grid, the blank canvas the carver starts from.
    pub fn filled(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Wall; size * size],
        }
    }

    /// Carves a perfect maze by recursive backtracking from (1,1).
    ///
    /// The recursion runs on an explicit stack of frames, so large sizes
    /// cannot exhaust the call stack. Start is stamped at (1,1) and Finish
    /// at (size-2, size-2).
    pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, MazeError> {
        validate_size(size)?;
        let mut maze = Self::filled(size);

        let mut stack = vec![Frame::enter(&mut maze, 1, 1, rng)];
        while let Some(top) = stack.last_mut() {
            if top.next == top.dirs.len() {
                stack.pop();
                continue;
            }
            let (dx, dy) = top.dirs[top.next];
            top.next += 1;
            let (x, y) = (top.x, top.y);

            let nx = x as isize + dx;
            let ny = y as isize + dy;
            let inside = |v: isize| v > 0 && v < size as isize - 1;
            if !inside(nx) || !inside(ny) {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            if maze.get(nx, ny) != Cell::Wall {
                continue;
            }
            maze.set((x + nx) / 2, (y + ny) / 2, Cell::Path);
            let frame = Frame::enter(&mut maze, nx, ny, rng);
            stack.push(frame);
        }

        maze.set(1, 1, Cell::Start);
        maze.set(size - 2, size - 2, Cell::Finish);
        log::debug!("carved {size}x{size} maze with {} path cells", maze.path_cells().len());
        Ok(maze)
    }

    /// Builds a maze from text rows: `#` wall, space or `.` path, `S` start,
    /// `F` finish. Rows must form a square; short rows are padded with wall.
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        let size = rows.len();
        if size == 0 {
            return Err(MazeError::Layout("layout is empty".into()));
        }
        let mut maze = Self::filled(size);
        for (y, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width > size {
                return Err(MazeError::Layout(format!(
                    "row {y} is {width} cells wide, expected at most {size}"
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    ' ' | '.' => Cell::Path,
                    'S' => Cell::Start,
                    'F' => Cell::Finish,
                    _ => Cell::Wall,
                };
                maze.set(x, y, cell);
            }
        }
        Ok(maze)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.size + x]
    }

    /// Out-of-range coordinates read as `None`.
    #[inline]
    pub fn cell(&self, x: isize, y: isize) -> Option<Cell> {
        if x < 0 || y < 0 || x as usize >= self.size || y as usize >= self.size {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.size + x] = cell;
    }

    /// Plain `Path` cells, excluding Start and Finish.
    pub fn path_cells(&self) -> Vec<GridPos> {
        self.iter()
            .filter(|&(_, c)| c == Cell::Path)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Row-major walk over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i % self.size, i / self.size), c))
    }

    pub fn start(&self) -> GridPos {
        (1, 1)
    }

    pub fn finish(&self) -> GridPos {
        (self.size - 2, self.size - 2)
    }
}
