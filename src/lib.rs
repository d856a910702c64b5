//! Instrumented pathfinding over 2d cost grids: depth-first, breadth-first,
//! uniform cost ([Dijkstra](https://www.redblobgames.com/pathfinding/a-star/introduction.html#dijkstra)),
//! greedy best-first and [A*](https://www.redblobgames.com/pathfinding/a-star/introduction.html#astar).
//!
//! Every cell of a [Grid] has a non-negative cost for moving into it. Each
//! algorithm implements [PathAlgorithm], and [SearchEngine] (or the [measure]
//! function) runs one while timing it and counting how many nodes it visited,
//! so the strategies can be compared on the same grid.
//!
//! # Example
//!
//! ```rust
//! use grid_pathfinding::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut grid = Grid::new(50, 50).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! grid.fill(FillStrategy::maze(0.3), &mut rng).unwrap();
//!
//! let mut astar = SearchEngine::with_map(AStar::new(), &grid);
//! let path = astar.calculate_path([1, 1], [48, 48]).unwrap().unwrap();
//!
//! let mut dijkstra = SearchEngine::with_map(UniformCost::new(), &grid);
//! let other = dijkstra.calculate_path([1, 1], [48, 48]).unwrap().unwrap();
//!
//! assert_eq!(grid.path_cost(&path).unwrap(), grid.path_cost(&other).unwrap());
//! println!("A* visited {} nodes", astar.stats().visited);
//! ```
pub mod algorithm;
pub mod breadth_first;
pub mod depth_first;
pub mod engine;
pub mod error;
pub mod flow_field;
pub mod grid;
pub mod min_heap;
pub mod pathfinder;
pub mod point;

pub use algorithm::AlgorithmKind;
pub use breadth_first::BreadthFirst;
pub use depth_first::DepthFirst;
pub use engine::{measure, PathAlgorithm, Report, SearchEngine, SearchResult, SearchStats};
pub use error::{Error, Result};
pub use flow_field::FlowField;
pub use grid::{FillStrategy, Grid, DEFAULT_FLOOR_COST, DEFAULT_WALL_COST};
pub use min_heap::MinHeap;
pub use pathfinder::{AStar, GreedyBestFirst, UniformCost};
pub use point::{manhattan, GridPoint, Path, Point};
