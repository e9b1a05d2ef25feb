use std::hint::black_box;

use arcade_core::{
    Board, MineLayout, MinesweeperEngine, Simulation, SnakeConfig, SnakeEngine, TetrisConfig,
    TetrisEngine, Tetromino,
};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn bench_flood_reveal(c: &mut Criterion) {
    // a single corner mine opens almost the whole board in one cascade
    let layout = MineLayout::from_mine_coords((64, 64), &[(63, 63)]).unwrap();

    c.bench_function("flood_reveal_64x64", |b| {
        b.iter_batched(
            || MinesweeperEngine::with_layout(layout.clone(), 0),
            |mut engine| black_box(engine.reveal(black_box((0, 0)))),
            BatchSize::SmallInput,
        )
    });
}

fn bench_tetris_drop(c: &mut Criterion) {
    c.bench_function("tetris_drop_to_game_over", |b| {
        b.iter_batched(
            || TetrisEngine::new(TetrisConfig::default(), 12345, 0).unwrap(),
            |mut engine| {
                while !engine.is_over() {
                    black_box(engine.step());
                }
                engine.score()
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::new(10, 20);
    for y in 16..20 {
        for x in 0..10 {
            board.set((x, y), Some(Tetromino::I));
        }
    }

    c.bench_function("clear_4_lines", |b| {
        b.iter_batched(
            || board.clone(),
            |mut board| black_box(board.clear_lines()),
            BatchSize::SmallInput,
        )
    });
}

fn bench_snake_tick(c: &mut Criterion) {
    let mut engine = SnakeEngine::new(SnakeConfig::default(), 12345, 0).unwrap();

    c.bench_function("snake_tick", |b| {
        b.iter(|| {
            if engine.is_over() {
                engine.reset();
            }
            black_box(engine.step())
        })
    });
}

criterion_group!(
    benches,
    bench_flood_reveal,
    bench_tetris_drop,
    bench_line_clear,
    bench_snake_tick
);
criterion_main!(benches);
