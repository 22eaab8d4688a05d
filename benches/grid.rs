//! Benchmarks for the edge-fill rule engine.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use edgefill::geometry::all_orientations;
use edgefill::grid::format_board;
use edgefill::pieces::SHAPES;
use edgefill::{build_grid, Board, FillTag, NullSink, Offset, PointId};

fn path(board: &Board, coords: &[(i32, i32)]) -> Vec<Option<PointId>> {
    coords
        .iter()
        .map(|&(row, col)| board.point_at(row, col))
        .collect()
}

fn fill(board: &mut Board, coords: &[(i32, i32)]) {
    let candidates = path(board, coords);
    board
        .try_fill(&candidates, FillTag(0), &mut NullSink)
        .unwrap();
}

/// An 8x8 board whose top row is one edge short of clearing.
fn board_before_row_clear() -> Board {
    let mut board = build_grid(8, 8).unwrap();
    let top: Vec<(i32, i32)> = (0..=8).map(|col| (0, col)).collect();
    fill(&mut board, &top);
    for col in 0..=8 {
        fill(&mut board, &[(0, col), (1, col)]);
    }
    let divider: Vec<(i32, i32)> = (0..8).map(|col| (1, col)).collect();
    fill(&mut board, &divider);
    board
}

/// Benchmark building the default board.
fn bench_build_grid(c: &mut Criterion) {
    c.bench_function("build_grid_8x8", |b| {
        b.iter(|| build_grid(black_box(8), black_box(8)).unwrap())
    });
}

/// Benchmark the fill that completes a row and the cascade it triggers.
fn bench_fill_with_cascade(c: &mut Criterion) {
    let board = board_before_row_clear();
    let last = path(&board, &[(1, 7), (1, 8)]);

    c.bench_function("fill_with_row_clear", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| board.try_fill(black_box(&last), FillTag(1), &mut NullSink),
            BatchSize::SmallInput,
        )
    });
}

/// Benchmark the feasibility scan on a crowded board.
fn bench_has_any_legal_placement(c: &mut Criterion) {
    let mut board = build_grid(8, 8).unwrap();
    // fill every vertical edge so only horizontal pieces can fit
    for col in 0..=8 {
        let column: Vec<(i32, i32)> = (0..=8).map(|row| (row, col)).collect();
        fill(&mut board, &column);
    }
    let tall: &[Offset] = &[(0, 0), (1, 0), (2, 0)];

    c.bench_function("has_any_legal_placement_miss", |b| {
        b.iter(|| board.has_any_legal_placement(black_box(tall)))
    });
}

/// Benchmark computing all orientations for a single shape.
fn bench_orientations(c: &mut Criterion) {
    let shape = SHAPES[4];

    c.bench_function("all_orientations", |b| {
        b.iter(|| all_orientations(black_box(shape.offsets)))
    });
}

/// Benchmark rendering a board as text.
fn bench_format_board(c: &mut Criterion) {
    let board = board_before_row_clear();

    c.bench_function("format_board", |b| {
        b.iter(|| format_board(black_box(&board)))
    });
}

criterion_group!(
    benches,
    bench_build_grid,
    bench_fill_with_cascade,
    bench_has_any_legal_placement,
    bench_orientations,
    bench_format_board
);
criterion_main!(benches);
