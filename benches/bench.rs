use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use takuzu_solver::puzzle::board::Board;
use takuzu_solver::puzzle::solver::Solver;

fn propagation_board() -> Board {
    Board::create(&[
        "1.1.....",
        ".10....1",
        "...1.0..",
        "..0.....",
        "....1.10",
        ".....0..",
        "......1.",
        "1..0.11.",
    ])
}

fn search_board() -> Board {
    Board::create(&[
        "....0.....1.",
        "..0..1....1.",
        ".0..........",
        "..1.0..1.1..",
        ".0..0.......",
        "..0....00...",
        ".....1.0...1",
        "1...0.....0.",
        ".....1..0.00",
        ".1.1.......0",
        "..0.........",
        "....0..1....",
    ])
}

fn bench_propagate(c: &mut Criterion) {
    let board = propagation_board();
    c.bench_function("propagate 8x8", |b| {
        b.iter(|| {
            let mut solver = Solver::new();
            black_box(solver.propagate(black_box(&board)))
        });
    });
}

fn bench_solve(c: &mut Criterion) {
    let board = search_board();
    c.bench_function("solve 12x12", |b| {
        b.iter(|| {
            let mut solver = Solver::new();
            black_box(solver.solve(black_box(&board)))
        });
    });
}

criterion_group!(benches, bench_propagate, bench_solve);
criterion_main!(benches);
