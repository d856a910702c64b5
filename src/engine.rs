//! The shared search contract: every algorithm implements [PathAlgorithm],
//! and [measure] wraps any of them with timing and visit counting.
use std::fmt;
use std::time::{Duration, Instant};

use glam::IVec2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::point::{GridPoint, Path};

/// A search strategy over a [Grid].
///
/// Implementations call [Grid::visit] exactly once for the start and once
/// for every node when it is first discovered. Looking a node up again, for
/// example to relax it, goes through [Grid::cost] and isn't counted. This
/// keeps [SearchStats::visited] comparable between algorithms, and a search
/// that exhausts the grid visits every cell once. Start is assumed to be in
/// bounds; if it isn't the first `visit` fails with [Error::OutOfBounds].
pub trait PathAlgorithm {
    /// Human readable name, used in reports.
    fn name(&self) -> &'static str;

    /// Find a path from `start` to `end`. Returns `Ok(None)` if the frontier
    /// is exhausted without reaching `end`.
    fn traverse(&mut self, grid: &Grid, start: IVec2, end: IVec2) -> Result<Option<Path>>;
}

impl<A: PathAlgorithm + ?Sized> PathAlgorithm for Box<A> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn traverse(&mut self, grid: &Grid, start: IVec2, end: IVec2) -> Result<Option<Path>> {
        (**self).traverse(grid, start, end)
    }
}

/// Performance counters for a single search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub elapsed: Duration,
    pub visited: usize,
}

impl SearchStats {
    pub fn elapsed_nanos(&self) -> u128 {
        self.elapsed.as_nanos()
    }
}

impl From<SearchStats> for (Duration, usize) {
    fn from(stats: SearchStats) -> Self {
        (stats.elapsed, stats.visited)
    }
}

/// The outcome of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub path: Option<Path>,
    pub stats: SearchStats,
}

/// Run `algorithm` once, timing it and counting the nodes it visits.
///
/// Both endpoints are bounds checked up front, so an invalid end fails with
/// [Error::OutOfBounds] instead of exhausting the grid. The grid's visit
/// counter is reset before the traversal starts.
pub fn measure<A: PathAlgorithm + ?Sized>(
    algorithm: &mut A,
    grid: &Grid,
    start: impl GridPoint,
    end: impl GridPoint,
) -> Result<SearchResult> {
    let start = start.to_ivec2();
    let end = end.to_ivec2();
    grid.cost(start)?;
    grid.cost(end)?;

    grid.reset_visited_count();
    let time = Instant::now();
    let path = algorithm.traverse(grid, start, end)?;
    let elapsed = time.elapsed();

    let stats = SearchStats {
        elapsed,
        visited: grid.visited_count(),
    };
    debug!(
        algorithm = algorithm.name(),
        start = ?start.to_array(),
        end = ?end.to_array(),
        elapsed_ns = stats.elapsed_nanos() as u64,
        visited = stats.visited,
        found = path.is_some(),
        "search finished"
    );

    Ok(SearchResult { path, stats })
}

/// Binds an algorithm to a grid and remembers the stats of the last search.
///
/// # Example
/// ```rust
/// use grid_pathfinding::*;
///
/// let mut grid = Grid::new(10, 10).unwrap();
/// grid.set_all(1.0).unwrap();
///
/// let mut engine = SearchEngine::new(AStar::new());
/// engine.set_map(&grid);
///
/// let path = engine.calculate_path([0, 0], [9, 9]).unwrap().unwrap();
/// assert_eq!(19, path.len());
/// let stats = engine.stats();
/// assert!(stats.visited > 0);
/// ```
pub struct SearchEngine<'g, A> {
    algorithm: A,
    grid: Option<&'g Grid>,
    stats: SearchStats,
}

impl<'g, A: PathAlgorithm> SearchEngine<'g, A> {
    /// Create an engine with no grid bound. [SearchEngine::set_map] must be
    /// called before searching.
    pub fn new(algorithm: A) -> Self {
        Self {
            algorithm,
            grid: None,
            stats: SearchStats::default(),
        }
    }

    pub fn with_map(algorithm: A, grid: &'g Grid) -> Self {
        let mut engine = Self::new(algorithm);
        engine.set_map(grid);
        engine
    }

    /// Bind (or rebind) the grid searched by this engine.
    pub fn set_map(&mut self, grid: &'g Grid) {
        self.grid = Some(grid);
    }

    pub fn map(&self) -> Option<&'g Grid> {
        self.grid
    }

    pub fn name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Run a search and return both the path and its stats.
    pub fn search(&mut self, start: impl GridPoint, end: impl GridPoint) -> Result<SearchResult> {
        let grid = self.grid.ok_or(Error::NotConfigured)?;
        let result = measure(&mut self.algorithm, grid, start, end)?;
        self.stats = result.stats;
        Ok(result)
    }

    /// Run a search and return the path, if any. Stats are available from
    /// [SearchEngine::stats] afterwards.
    pub fn calculate_path(
        &mut self,
        start: impl GridPoint,
        end: impl GridPoint,
    ) -> Result<Option<Path>> {
        self.search(start, end).map(|r| r.path)
    }

    /// Stats captured by the most recent search. Zero before the first one.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// A one line summary of a search, for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub name: &'static str,
    pub stats: SearchStats,
    pub path_cost: Option<f64>,
}

impl Report {
    pub fn new(name: &'static str, result: &SearchResult, grid: &Grid) -> Result<Self> {
        let path_cost = match &result.path {
            Some(path) => Some(grid.path_cost(path)?),
            None => None,
        };
        Ok(Self {
            name,
            stats: result.stats,
            path_cost,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:22}: took {} ns, visited {} nodes, ",
            self.name,
            self.stats.elapsed_nanos(),
            self.stats.visited
        )?;
        match self.path_cost {
            Some(cost) => write!(f, "path cost {cost:.3}"),
            None => write!(f, "no path found"),
        }
    }
}
