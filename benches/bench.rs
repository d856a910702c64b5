use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use grid_pathfinding::*;
use rand::{rngs::StdRng, SeedableRng};

fn maze(size: i32) -> Grid {
    let mut grid = Grid::new(size, size).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    grid.fill(FillStrategy::maze(0.3), &mut rng).unwrap();
    grid
}

fn algorithms(c: &mut Criterion) {
    let grid = maze(200);
    let mut group = c.benchmark_group("maze_200");

    for kind in AlgorithmKind::ALL {
        let mut algorithm = kind.create();
        group.bench_function(BenchmarkId::from_parameter(kind), |b| {
            b.iter(|| measure(&mut algorithm, &grid, black_box([1, 1]), black_box([198, 198])))
        });
    }
    group.finish();
}

fn flow_field(c: &mut Criterion) {
    let grid = maze(200);
    let mut field = FlowField::build(&grid, [100, 100]).unwrap();

    c.bench_function("flow_field_200", |b| {
        b.iter(|| field.recalculate(&grid, black_box([1, 1])))
    });
}

criterion_group!(benches, algorithms, flow_field);
criterion_main!(benches);
