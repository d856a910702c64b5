use std::cell::Cell;

use arrayvec::{ArrayVec, IntoIter};
use glam::IVec2;
use rand::Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::point::GridPoint;

/// Cost given to walls by [FillStrategy::maze].
pub const DEFAULT_WALL_COST: f64 = 1000.0;
/// Cost given to open floor by [FillStrategy::maze].
pub const DEFAULT_FLOOR_COST: f64 = 1.0;

/// How [Grid::fill] populates the cost field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStrategy {
    /// Every cell gets an independent cost drawn from `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// The outer border is set to `wall_cost`. Every interior cell is a wall
    /// with probability `wall_chance`, otherwise it gets `floor_cost`.
    Maze {
        wall_chance: f64,
        wall_cost: f64,
        floor_cost: f64,
    },
}

impl FillStrategy {
    pub fn uniform(low: f64, high: f64) -> Self {
        Self::Uniform { low, high }
    }

    /// A maze fill using [DEFAULT_WALL_COST] and [DEFAULT_FLOOR_COST].
    pub fn maze(wall_chance: f64) -> Self {
        Self::Maze {
            wall_chance,
            wall_cost: DEFAULT_WALL_COST,
            floor_cost: DEFAULT_FLOOR_COST,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            FillStrategy::Uniform { low, high } => {
                if !low.is_finite() || !high.is_finite() || low < 0.0 || low >= high {
                    return Err(Error::InvalidFill(format!(
                        "uniform range [{low}, {high}) must be finite, non-negative and non-empty"
                    )));
                }
            }
            FillStrategy::Maze {
                wall_chance,
                wall_cost,
                floor_cost,
            } => {
                if !(0.0..=1.0).contains(&wall_chance) {
                    return Err(Error::InvalidFill(format!(
                        "wall chance {wall_chance} must be within [0, 1]"
                    )));
                }
                if !is_valid_cost(wall_cost) || !is_valid_cost(floor_cost) {
                    return Err(Error::InvalidFill(format!(
                        "wall cost {wall_cost} and floor cost {floor_cost} must be finite and non-negative"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for FillStrategy {
    fn default() -> Self {
        Self::Uniform {
            low: 1.0,
            high: 10.0,
        }
    }
}

/// A 2d grid of per-cell traversal costs.
///
/// Moving into a cell costs that cell's value. Costs never block movement,
/// walls are just expensive, so any two cells of the grid are connected.
///
/// The grid also counts how many times a cell's cost was charged through
/// [Grid::visit] during a search. The counter lives in a [Cell] so searches
/// only need a shared reference, which also makes the grid `!Sync`: a grid
/// can't be searched from two threads at once.
///
/// # Example
/// ```rust
/// use grid_pathfinding::*;
///
/// let mut grid = Grid::new(10, 10).unwrap();
/// grid.set_cost([4, 4], 25.0).unwrap();
///
/// assert_eq!(25.0, grid.cost([4, 4]).unwrap());
/// assert!(!grid.is_valid([10, 0]));
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    costs: Vec<f64>,
    width: i32,
    height: i32,
    min_cost: f64,
    visited: Cell<usize>,
}

impl Grid {
    /// Create a new grid with every cost set to 0.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            costs: vec![0.0; len],
            width,
            height,
            min_cost: 0.0,
            visited: Cell::new(0),
        })
    }

    /// Overwrite every cost in the grid according to `strategy`.
    pub fn fill(&mut self, strategy: FillStrategy, rng: &mut impl Rng) -> Result<()> {
        strategy.validate()?;
        debug!(?strategy, width = self.width, height = self.height, "filling grid");

        match strategy {
            FillStrategy::Uniform { low, high } => {
                for c in self.costs.iter_mut() {
                    *c = rng.gen_range(low..high);
                }
            }
            FillStrategy::Maze {
                wall_chance,
                wall_cost,
                floor_cost,
            } => {
                let (w, h) = (self.width as usize, self.height as usize);
                for (i, c) in self.costs.iter_mut().enumerate() {
                    let x = i % w;
                    let y = i / w;
                    let border = x == 0 || y == 0 || x == w - 1 || y == h - 1;
                    *c = if border || rng.gen_bool(wall_chance) {
                        wall_cost
                    } else {
                        floor_cost
                    };
                }
            }
        }
        self.update_min_cost();
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Always false, a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Whether `p` is inside the grid bounds.
    #[inline]
    pub fn is_valid(&self, p: impl GridPoint) -> bool {
        let p = p.to_ivec2();
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    #[inline]
    fn index(&self, p: impl GridPoint) -> Result<usize> {
        let p = p.to_ivec2();
        if !self.is_valid(p) {
            return Err(Error::OutOfBounds { x: p.x, y: p.y });
        }
        Ok(linear_index(self.width, p))
    }

    /// The in-bounds orthogonal neighbors of `p`, in
    /// [crate::point::ADJACENT_4_WAY] order.
    pub fn neighbors(&self, p: impl GridPoint) -> IntoIter<IVec2, 4> {
        let mut points = ArrayVec::new();
        for adj in p.adj_4() {
            if self.is_valid(adj) {
                points.push(adj);
            }
        }
        points.into_iter()
    }

    /// The cost of entering `p`. Does not count as a visit.
    pub fn cost(&self, p: impl GridPoint) -> Result<f64> {
        let i = self.index(p)?;
        Ok(self.costs[i])
    }

    pub fn set_cost(&mut self, p: impl GridPoint, cost: f64) -> Result<()> {
        let i = self.index(p)?;
        if !is_valid_cost(cost) {
            let p = p.to_ivec2();
            return Err(Error::NegativeCost {
                x: p.x,
                y: p.y,
                cost,
            });
        }
        let old = std::mem::replace(&mut self.costs[i], cost);
        if cost < self.min_cost {
            self.min_cost = cost;
        } else if old == self.min_cost {
            self.update_min_cost();
        }
        Ok(())
    }

    /// Set every cell in the grid to `cost`.
    pub fn set_all(&mut self, cost: f64) -> Result<()> {
        if !is_valid_cost(cost) {
            return Err(Error::InvalidFill(format!(
                "cost {cost} must be finite and non-negative"
            )));
        }
        self.costs.fill(cost);
        self.min_cost = cost;
        Ok(())
    }

    /// Charge a visit to `p` and return its cost. Searches call this for every
    /// node they discover so the visit count reflects the work done.
    #[inline]
    pub fn visit(&self, p: impl GridPoint) -> Result<f64> {
        let cost = self.cost(p)?;
        self.visited.set(self.visited.get() + 1);
        Ok(cost)
    }

    pub fn reset_visited_count(&self) {
        self.visited.set(0);
    }

    pub fn visited_count(&self) -> usize {
        self.visited.get()
    }

    /// Sum of the cost of every point along `path`, including both ends.
    pub fn path_cost(&self, path: &[IVec2]) -> Result<f64> {
        path.iter().map(|p| self.cost(*p)).sum()
    }

    /// Whether `path` is non-empty, in bounds, and made of consecutive
    /// orthogonal steps.
    pub fn is_valid_path(&self, path: &[IVec2]) -> bool {
        !path.is_empty()
            && path.iter().all(|p| self.is_valid(*p))
            && path.windows(2).all(|w| w[0].taxi_dist(w[1]) == 1)
    }

    /// The smallest cost in the grid.
    pub fn min_cost(&self) -> f64 {
        self.min_cost
    }

    /// The raw cost field in row-major order.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Iterate over every point in the grid in row-major order.
    pub fn points(&self) -> impl Iterator<Item = IVec2> {
        let (w, h) = (self.width, self.height);
        (0..h).flat_map(move |y| (0..w).map(move |x| IVec2::new(x, y)))
    }

    fn update_min_cost(&mut self) {
        self.min_cost = self.costs.iter().copied().fold(f64::INFINITY, f64::min);
    }
}

/// Row-major index of an in-bounds point. Done in `usize` so grids with more
/// than `i32::MAX` cells don't overflow.
#[inline]
fn linear_index(width: i32, p: IVec2) -> usize {
    p.y as usize * width as usize + p.x as usize
}

#[inline]
fn is_valid_cost(cost: f64) -> bool {
    cost.is_finite() && cost >= 0.0
}
