use ahash::{HashSet, HashSetExt};
use arrayvec::IntoIter;
use glam::IVec2;
use tracing::trace;

use crate::engine::PathAlgorithm;
use crate::error::Result;
use crate::grid::Grid;
use crate::point::Path;

/// Depth-first search using an explicit stack.
///
/// Each stack frame holds a node and the neighbors of it that haven't been
/// tried yet, so the stack itself is the path from the start to the node
/// being expanded. Neighbors are tried in [Grid::neighbors] order, which
/// decides which path gets found. The path is rarely the shortest.
#[derive(Debug, Default, Clone)]
pub struct DepthFirst {
    stack: Vec<(IVec2, IntoIter<IVec2, 4>)>,
    visited: HashSet<IVec2>,
}

impl DepthFirst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(len: usize) -> Self {
        Self {
            stack: Vec::with_capacity(len / 4),
            visited: HashSet::with_capacity(len / 4),
        }
    }

    /// An iterator over all nodes discovered during the last search.
    pub fn visited(&self) -> impl Iterator<Item = &IVec2> {
        self.visited.iter()
    }
}

impl PathAlgorithm for DepthFirst {
    fn name(&self) -> &'static str {
        "Depth First Search"
    }

    fn traverse(&mut self, grid: &Grid, start: IVec2, end: IVec2) -> Result<Option<Path>> {
        self.stack.clear();
        self.visited.clear();

        grid.visit(start)?;
        self.visited.insert(start);
        if start == end {
            return Ok(Some(vec![start]));
        }
        self.stack.push((start, grid.neighbors(start)));

        while let Some((_, exits)) = self.stack.last_mut() {
            let Some(next) = exits.next() else {
                self.stack.pop();
                continue;
            };

            if !self.visited.insert(next) {
                continue;
            }
            grid.visit(next)?;

            if next == end {
                let mut path: Path = self.stack.iter().map(|(p, _)| *p).collect();
                path.push(end);
                return Ok(Some(path));
            }
            self.stack.push((next, grid.neighbors(next)));
        }

        trace!(discovered = self.visited.len(), "frontier exhausted");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use glam::ivec2;

    use super::*;
    use crate::engine::measure;

    #[test]
    fn follows_neighbor_order() {
        let grid = Grid::new(3, 3).unwrap();

        let mut dfs = DepthFirst::new();
        let path = dfs.traverse(&grid, ivec2(0, 0), ivec2(2, 2)).unwrap().unwrap();

        // right first, then down
        let expected = [[0, 0], [1, 0], [2, 0], [2, 1], [2, 2]];
        assert_eq!(
            expected.to_vec(),
            path.iter().map(|p| p.to_array()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn no_repeated_points() {
        let grid = Grid::new(3, 2).unwrap();

        let mut dfs = DepthFirst::new();
        let result = measure(&mut dfs, &grid, [1, 0], [0, 1]).unwrap();
        let path = result.path.unwrap();

        assert!(grid.is_valid_path(&path));
        assert_eq!([1, 0], path[0].to_array());
        assert_eq!([0, 1], path.last().unwrap().to_array());

        let mut unique = path.clone();
        unique.sort_by_key(|p| (p.x, p.y));
        unique.dedup();
        assert_eq!(path.len(), unique.len());
        assert_eq!(result.stats.visited, dfs.visited().count());
    }

    #[test]
    fn long_corridor_does_not_recurse() {
        let grid = Grid::new(20_000, 1).unwrap();

        let mut dfs = DepthFirst::new();
        let path = dfs
            .traverse(&grid, ivec2(0, 0), ivec2(19_999, 0))
            .unwrap()
            .unwrap();
        assert_eq!(20_000, path.len());
    }
}
