use std::fmt;
use std::str::FromStr;

use crate::breadth_first::BreadthFirst;
use crate::depth_first::DepthFirst;
use crate::engine::PathAlgorithm;
use crate::error::Error;
use crate::pathfinder::{AStar, GreedyBestFirst, UniformCost};

/// Every search strategy the crate provides, for picking one at runtime.
///
/// # Example
/// ```rust
/// use grid_pathfinding::*;
///
/// let mut grid = Grid::new(3, 3).unwrap();
/// grid.set_all(1.0).unwrap();
///
/// for kind in AlgorithmKind::ALL {
///     let mut engine = SearchEngine::with_map(kind.create(), &grid);
///     let path = engine.calculate_path([0, 0], [2, 2]).unwrap().unwrap();
///     assert!(path.len() >= 5);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmKind {
    DepthFirst,
    BreadthFirst,
    UniformCost,
    GreedyBestFirst,
    AStar,
}

impl AlgorithmKind {
    pub const ALL: [AlgorithmKind; 5] = [
        AlgorithmKind::DepthFirst,
        AlgorithmKind::BreadthFirst,
        AlgorithmKind::UniformCost,
        AlgorithmKind::GreedyBestFirst,
        AlgorithmKind::AStar,
    ];

    /// Create a fresh instance of this algorithm.
    pub fn create(self) -> Box<dyn PathAlgorithm> {
        match self {
            AlgorithmKind::DepthFirst => Box::new(DepthFirst::new()),
            AlgorithmKind::BreadthFirst => Box::new(BreadthFirst::new()),
            AlgorithmKind::UniformCost => Box::new(UniformCost::new()),
            AlgorithmKind::GreedyBestFirst => Box::new(GreedyBestFirst::new()),
            AlgorithmKind::AStar => Box::new(AStar::new()),
        }
    }

    /// Human readable name, the same one the created algorithm reports.
    pub fn name(self) -> &'static str {
        match self {
            AlgorithmKind::DepthFirst => "Depth First Search",
            AlgorithmKind::BreadthFirst => "Breadth First Search",
            AlgorithmKind::UniformCost => "Dijkstra",
            AlgorithmKind::GreedyBestFirst => "Greedy Best First",
            AlgorithmKind::AStar => "A*",
        }
    }

    /// Short name accepted by [AlgorithmKind::from_str].
    pub fn short_name(self) -> &'static str {
        match self {
            AlgorithmKind::DepthFirst => "dfs",
            AlgorithmKind::BreadthFirst => "bfs",
            AlgorithmKind::UniformCost => "dijkstra",
            AlgorithmKind::GreedyBestFirst => "greedy",
            AlgorithmKind::AStar => "astar",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for AlgorithmKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_lowercase().replace('_', "-").as_str() {
            "dfs" | "depth-first" => AlgorithmKind::DepthFirst,
            "bfs" | "breadth-first" => AlgorithmKind::BreadthFirst,
            "dijkstra" | "ucs" | "uniform-cost" => AlgorithmKind::UniformCost,
            "greedy" | "gbfs" | "greedy-best-first" => AlgorithmKind::GreedyBestFirst,
            "astar" | "a*" | "a-star" => AlgorithmKind::AStar,
            _ => return Err(Error::UnknownAlgorithm(s.to_string())),
        };
        Ok(kind)
    }
}
