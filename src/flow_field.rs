//! A breadth-first "flow field" as described in https://www.redblobgames.com/pathfinding/tower-defense/
//!
//! Unlike the single path searches, a flow field is built once for a goal
//! and can then produce a path toward that goal from any reached position,
//! which makes it a good fit for many agents heading to the same place.

use std::collections::{hash_map::Entry, VecDeque};

use ahash::{HashMap, HashMapExt};
use glam::IVec2;
use tracing::debug;

use crate::error::Result;
use crate::grid::Grid;
use crate::point::{GridPoint, Path};

/// Steps toward a single goal from every point reachable on a [Grid].
///
/// Moves are counted as single steps, cell costs are ignored.
///
/// # Example
/// ```rust
/// use grid_pathfinding::*;
///
/// let grid = Grid::new(10, 10).unwrap();
/// let field = FlowField::build(&grid, [5, 5]).unwrap();
///
/// let path = field.path_from([0, 0]).unwrap();
/// assert_eq!(11, path.len());
/// assert_eq!([5, 5], path.last().unwrap().to_array());
/// assert_eq!(Some(10), field.distance([0, 0]));
/// ```
#[derive(Debug, Default, Clone)]
pub struct FlowField {
    goal: IVec2,
    came_from: HashMap<IVec2, IVec2>,
    distance: HashMap<IVec2, u32>,
    frontier: VecDeque<IVec2>,
}

impl FlowField {
    /// Build a flow field toward `goal` covering the whole grid.
    pub fn build(grid: &Grid, goal: impl GridPoint) -> Result<Self> {
        let mut field = Self {
            came_from: HashMap::with_capacity(grid.len()),
            distance: HashMap::with_capacity(grid.len()),
            ..Default::default()
        };
        field.recalculate(grid, goal)?;
        Ok(field)
    }

    /// Recalculate the field for a new goal, reusing the existing allocations.
    ///
    /// Every reached point is charged through [Grid::visit]; the grid's
    /// visit counter is not reset first.
    pub fn recalculate(&mut self, grid: &Grid, goal: impl GridPoint) -> Result<()> {
        let goal = goal.to_ivec2();
        self.goal = goal;
        self.came_from.clear();
        self.distance.clear();
        self.frontier.clear();

        grid.visit(goal)?;
        self.came_from.insert(goal, goal);
        self.distance.insert(goal, 0);
        self.frontier.push_back(goal);

        while let Some(curr) = self.frontier.pop_front() {
            let d = self.distance[&curr] + 1;
            for next in grid.neighbors(curr) {
                if let Entry::Vacant(e) = self.came_from.entry(next) {
                    grid.visit(next)?;
                    e.insert(curr);
                    self.distance.insert(next, d);
                    self.frontier.push_back(next);
                }
            }
        }

        debug!(goal = ?goal.to_array(), reached = self.came_from.len(), "flow field built");
        Ok(())
    }

    pub fn goal(&self) -> IVec2 {
        self.goal
    }

    /// The next step toward the goal from `xy`. `None` at the goal itself or
    /// if `xy` wasn't reached.
    pub fn direction(&self, xy: impl GridPoint) -> Option<IVec2> {
        let xy = xy.to_ivec2();
        if xy == self.goal {
            return None;
        }
        self.came_from.get(&xy).copied()
    }

    /// Number of steps from `xy` to the goal.
    pub fn distance(&self, xy: impl GridPoint) -> Option<u32> {
        self.distance.get(&xy.to_ivec2()).copied()
    }

    /// Follow the field from `start` to the goal, both inclusive.
    pub fn path_from(&self, start: impl GridPoint) -> Option<Path> {
        let mut curr = start.to_ivec2();
        let mut path = Vec::with_capacity(self.distance(curr)? as usize + 1);
        path.push(curr);

        while curr != self.goal {
            curr = *self.came_from.get(&curr)?;
            path.push(curr);
        }
        Some(path)
    }

    /// An iterator over every point the field reaches.
    pub fn reached(&self) -> impl Iterator<Item = &IVec2> {
        self.came_from.keys()
    }

    /// Number of points the field reaches.
    pub fn len(&self) -> usize {
        self.came_from.len()
    }

    pub fn is_empty(&self) -> bool {
        self.came_from.is_empty()
    }
}
