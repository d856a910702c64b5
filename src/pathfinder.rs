use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use glam::IVec2;
use tracing::trace;

use crate::engine::PathAlgorithm;
use crate::error::Result;
use crate::grid::Grid;
use crate::min_heap::MinHeap;
use crate::point::{manhattan, Path};

/// Internal state shared by the priority-queue searches.
///
/// Kept between runs so the containers don't have to be reallocated for
/// every search.
#[derive(Debug, Default, Clone)]
pub(crate) struct Pathfinder {
    frontier: MinHeap<f64>,
    parents: HashMap<IVec2, IVec2>,
    costs: HashMap<IVec2, f64>,
    closed: HashSet<IVec2>,
}

impl Pathfinder {
    /// The `len` parameter determines the initial size of the internal
    /// containers. These containers will grow as needed, but setting a
    /// reasonable initial size can avoid excessive allocations.
    pub(crate) fn with_capacity(len: usize) -> Self {
        Self {
            frontier: MinHeap::with_capacity(len / 4),
            parents: HashMap::with_capacity(len / 4),
            costs: HashMap::with_capacity(len / 4),
            closed: HashSet::with_capacity(len / 4),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.frontier.clear();
        self.parents.clear();
        self.costs.clear();
        self.closed.clear();
    }

    /// Best-first search ordered by `cost so far + heuristic(node)`, relaxing
    /// open nodes whenever a cheaper route to them turns up.
    ///
    /// `heuristic` must be consistent for the returned path to be optimal,
    /// closed nodes are never reopened.
    pub(crate) fn relaxed(
        &mut self,
        grid: &Grid,
        start: IVec2,
        end: IVec2,
        heuristic: impl Fn(IVec2) -> f64,
    ) -> Result<Option<Path>> {
        self.clear();
        grid.visit(start)?;
        self.frontier.push(start, heuristic(start));
        self.costs.insert(start, 0.0);
        self.parents.insert(start, start);

        while let Some(curr) = self.frontier.pop() {
            // stale entry for a node that was already expanded
            if !self.closed.insert(curr) {
                continue;
            }

            if curr == end {
                return Ok(Some(reconstruct(&self.parents, start, end)));
            }

            let curr_cost = self.costs[&curr];
            for next in grid.neighbors(curr) {
                if self.closed.contains(&next) {
                    continue;
                }

                // only the first discovery of a node counts as a visit
                let known = self.costs.get(&next).copied();
                let step = match known {
                    Some(_) => grid.cost(next)?,
                    None => grid.visit(next)?,
                };
                let new_cost = curr_cost + step;
                let improves = match known {
                    Some(c) => new_cost < c,
                    None => true,
                };

                if improves {
                    self.costs.insert(next, new_cost);
                    self.parents.insert(next, curr);
                    self.frontier.push(next, new_cost + heuristic(next));
                }
            }
        }

        trace!(closed = self.closed.len(), "frontier exhausted");
        Ok(None)
    }

    /// Best-first search ordered purely by `heuristic`. Nodes keep the
    /// parent they were first discovered from.
    pub(crate) fn greedy(
        &mut self,
        grid: &Grid,
        start: IVec2,
        end: IVec2,
        heuristic: impl Fn(IVec2) -> f64,
    ) -> Result<Option<Path>> {
        self.clear();
        grid.visit(start)?;
        self.frontier.push(start, heuristic(start));
        self.parents.insert(start, start);

        while let Some(curr) = self.frontier.pop() {
            if curr == end {
                return Ok(Some(reconstruct(&self.parents, start, end)));
            }

            for next in grid.neighbors(curr) {
                if self.parents.contains_key(&next) {
                    continue;
                }
                grid.visit(next)?;
                self.parents.insert(next, curr);
                self.frontier.push(next, heuristic(next));
            }
        }

        trace!(discovered = self.parents.len(), "frontier exhausted");
        Ok(None)
    }

    /// Cost from the start of the last search to `p`, if it was reached.
    pub(crate) fn cost_to(&self, p: IVec2) -> Option<f64> {
        self.costs.get(&p).copied()
    }

    /// Every node discovered during the last search.
    pub(crate) fn visited(&self) -> impl Iterator<Item = &IVec2> {
        self.parents.keys()
    }
}

/// Walk a parent map back from `end` to `start`. `start` must map to itself
/// and every node on the way must be present.
pub(crate) fn reconstruct(parents: &HashMap<IVec2, IVec2>, start: IVec2, end: IVec2) -> Path {
    let mut path = vec![end];
    let mut curr = end;

    while curr != start {
        curr = parents[&curr];
        path.push(curr);
    }

    path.reverse();
    path
}

/// Uniform cost search (Dijkstra): expands nodes in order of total cost from
/// the start. Always finds the cheapest path.
#[derive(Debug, Default, Clone)]
pub struct UniformCost {
    pf: Pathfinder,
}

impl UniformCost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(len: usize) -> Self {
        Self {
            pf: Pathfinder::with_capacity(len),
        }
    }

    /// Cost of the cheapest known route to `p` from the start of the last
    /// search, not counting the start cell.
    pub fn cost_to(&self, p: IVec2) -> Option<f64> {
        self.pf.cost_to(p)
    }

    /// An iterator over all nodes discovered during the last search.
    pub fn visited(&self) -> impl Iterator<Item = &IVec2> {
        self.pf.visited()
    }
}

impl PathAlgorithm for UniformCost {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn traverse(&mut self, grid: &Grid, start: IVec2, end: IVec2) -> Result<Option<Path>> {
        self.pf.relaxed(grid, start, end, |_| 0.0)
    }
}

/// Greedy best-first search: always expands the node closest to the goal by
/// Manhattan distance, ignoring cell costs. Fast, but the path it finds is
/// not necessarily the cheapest.
#[derive(Debug, Default, Clone)]
pub struct GreedyBestFirst {
    pf: Pathfinder,
}

impl GreedyBestFirst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(len: usize) -> Self {
        Self {
            pf: Pathfinder::with_capacity(len),
        }
    }

    /// An iterator over all nodes discovered during the last search.
    pub fn visited(&self) -> impl Iterator<Item = &IVec2> {
        self.pf.visited()
    }
}

impl PathAlgorithm for GreedyBestFirst {
    fn name(&self) -> &'static str {
        "Greedy Best First"
    }

    fn traverse(&mut self, grid: &Grid, start: IVec2, end: IVec2) -> Result<Option<Path>> {
        self.pf.greedy(grid, start, end, |p| manhattan(p, end))
    }
}

/// A* search: orders the frontier by cost so far plus the estimated cost to
/// the goal.
///
/// The estimate is the Manhattan distance scaled by the grid's cheapest
/// cell. Each remaining step enters a cell costing at least that much, so
/// the estimate never overshoots and the path found is always the cheapest,
/// even on grids with costs below 1.
///
/// # Example
/// ```rust
/// use grid_pathfinding::*;
///
/// let mut grid = Grid::new(5, 5).unwrap();
/// grid.set_all(1.0).unwrap();
/// grid.set_cost([1, 0], 50.0).unwrap();
///
/// let mut astar = AStar::new();
/// let result = measure(&mut astar, &grid, [0, 0], [2, 0]).unwrap();
/// let path = result.path.unwrap();
///
/// // walks around the expensive cell
/// assert_eq!(5.0, grid.path_cost(&path).unwrap());
/// ```
#[derive(Debug, Default, Clone)]
pub struct AStar {
    pf: Pathfinder,
}

impl AStar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(len: usize) -> Self {
        Self {
            pf: Pathfinder::with_capacity(len),
        }
    }

    /// Cost of the cheapest known route to `p` from the start of the last
    /// search, not counting the start cell.
    pub fn cost_to(&self, p: IVec2) -> Option<f64> {
        self.pf.cost_to(p)
    }

    /// An iterator over all nodes discovered during the last search.
    pub fn visited(&self) -> impl Iterator<Item = &IVec2> {
        self.pf.visited()
    }
}

impl PathAlgorithm for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn traverse(&mut self, grid: &Grid, start: IVec2, end: IVec2) -> Result<Option<Path>> {
        let scale = grid.min_cost();
        self.pf
            .relaxed(grid, start, end, |p| manhattan(p, end) * scale)
    }
}

#[cfg(test)]
mod tests {
    use glam::ivec2;

    use super::*;
    use crate::engine::measure;

    fn unit_grid(w: i32, h: i32) -> Grid {
        let mut grid = Grid::new(w, h).unwrap();
        grid.set_all(1.0).unwrap();
        grid
    }

    #[test]
    fn right_test() {
        let grid = unit_grid(10, 10);

        let mut astar = AStar::new();
        let path = astar.traverse(&grid, ivec2(0, 0), ivec2(5, 0)).unwrap().unwrap();

        assert_eq!(6, path.len());
        assert_eq!([0, 0], path[0].to_array());
        assert_eq!([5, 0], path[5].to_array());
    }

    #[test]
    fn down_test() {
        let grid = unit_grid(10, 10);

        let mut astar = AStar::new();
        let path = astar.traverse(&grid, ivec2(5, 5), ivec2(5, 0)).unwrap().unwrap();

        assert_eq!(6, path.len());
        assert_eq!([5, 5], path[0].to_array());
        assert_eq!([5, 0], path[5].to_array());
    }

    #[test]
    fn left_test() {
        let grid = unit_grid(10, 10);

        let mut astar = AStar::new();
        let path = astar.traverse(&grid, ivec2(9, 5), ivec2(4, 5)).unwrap().unwrap();

        assert_eq!(6, path.len());
        assert_eq!([9, 5], path[0].to_array());
        assert_eq!([4, 5], path[5].to_array());
    }

    #[test]
    fn dijkstra_avoids_walls() {
        // 3x3 with an expensive middle column except the bottom row
        let mut grid = unit_grid(3, 3);
        grid.set_cost([1, 0], 100.0).unwrap();
        grid.set_cost([1, 1], 100.0).unwrap();

        let mut dijkstra = UniformCost::new();
        let path = dijkstra
            .traverse(&grid, ivec2(0, 0), ivec2(2, 0))
            .unwrap()
            .unwrap();

        let expected = [[0, 0], [0, 1], [0, 2], [1, 2], [2, 2], [2, 1], [2, 0]];
        assert_eq!(
            expected.to_vec(),
            path.iter().map(|p| p.to_array()).collect::<Vec<_>>()
        );
        assert_eq!(Some(6.0), dijkstra.cost_to(ivec2(2, 0)));
    }

    #[test]
    fn astar_matches_dijkstra_with_cheap_cells() {
        let mut grid = Grid::new(6, 6).unwrap();
        for (i, p) in grid.points().collect::<Vec<_>>().into_iter().enumerate() {
            grid.set_cost(p, ((i * 7) % 5 + 1) as f64 * 0.25).unwrap();
        }

        let mut astar = AStar::new();
        let mut dijkstra = UniformCost::new();
        let a = astar.traverse(&grid, ivec2(0, 0), ivec2(5, 5)).unwrap().unwrap();
        let d = dijkstra.traverse(&grid, ivec2(0, 0), ivec2(5, 5)).unwrap().unwrap();

        assert_eq!(0.25, grid.min_cost());
        assert_eq!(grid.path_cost(&d).unwrap(), grid.path_cost(&a).unwrap());
    }

    #[test]
    fn greedy_heads_for_goal() {
        let grid = unit_grid(10, 10);

        let mut greedy = GreedyBestFirst::new();
        let result = measure(&mut greedy, &grid, [0, 0], [9, 0]).unwrap();
        let path = result.path.unwrap();

        assert_eq!(10, path.len());
        assert!(grid.is_valid_path(&path));
        // only the straight line and its neighbors get discovered
        assert!(result.stats.visited < 30);
    }

    #[test]
    fn greedy_ignores_cost() {
        let mut grid = unit_grid(3, 1);
        grid.set_cost([1, 0], 1000.0).unwrap();

        let mut greedy = GreedyBestFirst::new();
        let path = greedy.traverse(&grid, ivec2(0, 0), ivec2(2, 0)).unwrap().unwrap();
        assert_eq!(1002.0, grid.path_cost(&path).unwrap());
    }

    #[test]
    fn single_cell() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.set_cost([0, 0], 4.0).unwrap();

        let mut dijkstra = UniformCost::new();
        let result = measure(&mut dijkstra, &grid, [0, 0], [0, 0]).unwrap();
        assert_eq!(Some(vec![ivec2(0, 0)]), result.path);
        assert_eq!(1, result.stats.visited);
    }

    #[test]
    fn reuse_between_runs() {
        let grid = unit_grid(8, 8);
        let mut astar = AStar::with_capacity(grid.len());

        let first = astar.traverse(&grid, ivec2(0, 0), ivec2(7, 7)).unwrap().unwrap();
        let second = astar.traverse(&grid, ivec2(7, 0), ivec2(0, 0)).unwrap().unwrap();

        assert_eq!(15, first.len());
        assert_eq!(8, second.len());
        assert_eq!([7, 0], second[0].to_array());
    }

    #[test]
    fn relaxation_charges_each_node_once() {
        // [0, 1] is first reached from the start at 5, then relaxed to 3
        // through [1, 1]
        let mut grid = unit_grid(3, 2);
        grid.set_cost([0, 1], 5.0).unwrap();

        for mut algorithm in [
            Box::new(UniformCost::new()) as Box<dyn PathAlgorithm>,
            Box::new(AStar::new()),
        ] {
            grid.reset_visited_count();
            let path = algorithm.traverse(&grid, ivec2(0, 0), ivec2(7, 7)).unwrap();
            assert_eq!(None, path);
            assert_eq!(grid.len(), grid.visited_count());
        }

        let mut dijkstra = UniformCost::new();
        let result = measure(&mut dijkstra, &grid, [0, 0], [2, 1]).unwrap();
        assert_eq!(dijkstra.visited().count(), result.stats.visited);
    }

    #[test]
    fn reconstruct_path() {
        let mut parents = HashMap::new();
        parents.insert(ivec2(0, 0), ivec2(0, 0));
        parents.insert(ivec2(1, 0), ivec2(0, 0));
        parents.insert(ivec2(1, 1), ivec2(1, 0));

        let path = reconstruct(&parents, ivec2(0, 0), ivec2(1, 1));
        assert_eq!(vec![ivec2(0, 0), ivec2(1, 0), ivec2(1, 1)], path);
    }
}
