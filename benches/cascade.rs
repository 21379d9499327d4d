use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use match3_core::board::Grid;
use match3_core::core::{BoardConfig, Color, Pos, SpecialKind};
use match3_core::matching::scan;
use match3_core::session::{NoHooks, Session};

fn checkered() -> Grid {
    let mut grid = Grid::new(8, 8);
    let positions: Vec<Pos> = grid.positions().collect();
    for pos in positions {
        let color = [0, 1, 3, 4][((pos.x + 2 * pos.y) % 4) as usize];
        grid.spawn(pos, Color::new(color));
    }
    grid
}

fn bench_new_board(c: &mut Criterion) {
    let mut seed = 0;
    c.bench_function("new_board_8x8", |b| {
        b.iter(|| {
            seed += 1;
            Session::new(BoardConfig::default(), black_box(seed), NoHooks)
        })
    });
}

fn bench_scan(c: &mut Criterion) {
    let mut grid = checkered();
    c.bench_function("scan_8x8", |b| {
        b.iter(|| scan(black_box(&mut grid)))
    });
}

fn bench_grid_clone(c: &mut Criterion) {
    let grid = checkered();
    c.bench_function("grid_clone", |b| {
        b.iter(|| black_box(&grid).clone())
    });
}

fn bench_disco_disco(c: &mut Criterion) {
    let mut grid = checkered();
    grid.place(Pos::new(3, 3), Color::new(2), SpecialKind::DiscoBall);
    grid.place(Pos::new(3, 4), Color::new(5), SpecialKind::DiscoBall);

    c.bench_function("disco_disco_to_idle", |b| {
        b.iter_batched(
            || Session::from_grid(BoardConfig::default(), grid.clone(), 7, NoHooks).unwrap(),
            |mut session| {
                session.request_swap(Pos::new(3, 3), Pos::new(3, 4));
                session.run_until_idle()
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_plane_fleet(c: &mut Criterion) {
    let mut grid = checkered();
    for x in 0..5 {
        for y in 0..8 {
            grid.place(Pos::new(x, y), Color::new(2), SpecialKind::None);
        }
    }
    grid.place(Pos::new(6, 3), Color::new(2), SpecialKind::Plane);
    grid.place(Pos::new(7, 3), Color::new(5), SpecialKind::DiscoBall);

    c.bench_function("disco_plane_wave", |b| {
        b.iter_batched(
            || Session::from_grid(BoardConfig::default(), grid.clone(), 7, NoHooks).unwrap(),
            |mut session| {
                session.request_swap(Pos::new(7, 3), Pos::new(6, 3));
                session.step()
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_new_board,
    bench_scan,
    bench_grid_clone,
    bench_disco_disco,
    bench_plane_fleet
);
criterion_main!(benches);
