//! Pathfinding demo.
//!
//! Builds a random cost grid, runs each selected algorithm between the same
//! two points and prints one summary line per run.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_pathfinding::{AlgorithmKind, FillStrategy, Grid, Point, Report, SearchEngine};

#[derive(Parser)]
#[command(name = "pathfinding-demo")]
#[command(about = "Compare pathfinding algorithms on a random cost grid")]
struct Cli {
    /// Grid width
    #[arg(long, default_value = "15")]
    width: i32,

    /// Grid height
    #[arg(long, default_value = "10")]
    height: i32,

    /// How to fill the grid
    #[arg(long, value_enum, default_value = "uniform")]
    fill: Fill,

    /// Lowest cost for a uniform fill
    #[arg(long, default_value = "1.0")]
    low: f64,

    /// Highest cost (exclusive) for a uniform fill
    #[arg(long, default_value = "10.0")]
    high: f64,

    /// Chance of an interior cell being a wall for a maze fill
    #[arg(long, default_value = "0.3")]
    wall_chance: f64,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Start point, "x,y"
    #[arg(long, default_value = "0,0", value_parser = parse_point)]
    start: Point,

    /// End point, "x,y"
    #[arg(long, default_value = "9,9", value_parser = parse_point)]
    end: Point,

    /// Algorithms to run (dfs, bfs, dijkstra, greedy, astar). Defaults to all.
    #[arg(long = "algorithm", short)]
    algorithms: Vec<AlgorithmKind>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Fill {
    Uniform,
    Maze,
}

fn parse_point(s: &str) -> Result<Point> {
    let Some((x, y)) = s.split_once(',') else {
        bail!("expected a point as \"x,y\", got {s:?}");
    };
    let x = x.trim().parse().with_context(|| format!("invalid x in {s:?}"))?;
    let y = y.trim().parse().with_context(|| format!("invalid y in {s:?}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let strategy = match cli.fill {
        Fill::Uniform => FillStrategy::uniform(cli.low, cli.high),
        Fill::Maze => FillStrategy::maze(cli.wall_chance),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut grid = Grid::new(cli.width, cli.height).context("creating grid")?;
    grid.fill(strategy, &mut rng).context("filling grid")?;

    for (name, p) in [("start", cli.start), ("end", cli.end)] {
        if !grid.is_valid(p) {
            bail!(
                "{name} point [{}, {}] is outside the {}x{} grid",
                p.x,
                p.y,
                grid.width(),
                grid.height()
            );
        }
    }

    let algorithms = if cli.algorithms.is_empty() {
        AlgorithmKind::ALL.to_vec()
    } else {
        cli.algorithms
    };

    info!(
        width = grid.width(),
        height = grid.height(),
        start = ?cli.start.to_array(),
        end = ?cli.end.to_array(),
        "running {} algorithm(s)",
        algorithms.len()
    );

    for kind in algorithms {
        let mut engine = SearchEngine::with_map(kind.create(), &grid);
        let result = engine
            .search(cli.start, cli.end)
            .with_context(|| format!("running {kind}"))?;
        let report = Report::new(engine.name(), &result, &grid)?;
        println!("{report}");
    }

    Ok(())
}
