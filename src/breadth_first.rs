use std::collections::{hash_map::Entry, VecDeque};

use ahash::{HashMap, HashMapExt};
use glam::IVec2;
use tracing::trace;

use crate::engine::PathAlgorithm;
use crate::error::Result;
use crate::grid::Grid;
use crate::pathfinder::reconstruct;
use crate::point::Path;

/// Breadth-first search from the start, stopping as soon as the end is
/// discovered.
///
/// Every move counts as one step regardless of cell cost, so the path found
/// has the fewest moves, not the lowest cost.
#[derive(Debug, Default, Clone)]
pub struct BreadthFirst {
    frontier: VecDeque<IVec2>,
    parents: HashMap<IVec2, IVec2>,
}

impl BreadthFirst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(len: usize) -> Self {
        Self {
            frontier: VecDeque::with_capacity(len / 4),
            parents: HashMap::with_capacity(len / 4),
        }
    }

    /// An iterator over all nodes discovered during the last search.
    pub fn visited(&self) -> impl Iterator<Item = &IVec2> {
        self.parents.keys()
    }
}

impl PathAlgorithm for BreadthFirst {
    fn name(&self) -> &'static str {
        "Breadth First Search"
    }

    fn traverse(&mut self, grid: &Grid, start: IVec2, end: IVec2) -> Result<Option<Path>> {
        self.frontier.clear();
        self.parents.clear();

        grid.visit(start)?;
        self.parents.insert(start, start);
        if start == end {
            return Ok(Some(vec![start]));
        }
        self.frontier.push_back(start);

        while let Some(curr) = self.frontier.pop_front() {
            for next in grid.neighbors(curr) {
                if let Entry::Vacant(e) = self.parents.entry(next) {
                    grid.visit(next)?;
                    e.insert(curr);

                    if next == end {
                        return Ok(Some(reconstruct(&self.parents, start, end)));
                    }
                    self.frontier.push_back(next);
                }
            }
        }

        trace!(discovered = self.parents.len(), "frontier exhausted");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use glam::ivec2;

    use super::*;
    use crate::engine::measure;

    #[test]
    fn fewest_steps() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set_all(1.0).unwrap();
        // cost is ignored
        grid.set_cost([1, 0], 500.0).unwrap();

        let mut bfs = BreadthFirst::new();
        let path = bfs.traverse(&grid, ivec2(0, 0), ivec2(4, 0)).unwrap().unwrap();

        assert_eq!(5, path.len());
        assert!(grid.is_valid_path(&path));
        assert_eq!([4, 0], path[4].to_array());
    }

    #[test]
    fn stops_at_end() {
        let grid = Grid::new(20, 20).unwrap();

        let mut bfs = BreadthFirst::new();
        let result = measure(&mut bfs, &grid, [0, 0], [1, 0]).unwrap();

        assert_eq!(2, result.path.unwrap().len());
        // start, then its first neighbor is the end
        assert_eq!(2, result.stats.visited);
    }

    #[test]
    fn out_of_bounds_start() {
        let grid = Grid::new(3, 3).unwrap();
        let mut bfs = BreadthFirst::new();
        assert!(bfs.traverse(&grid, ivec2(-1, 0), ivec2(2, 2)).is_err());
    }
}
