use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Board, Engine, EngineConfig};
use blockfall::engine::{apply_place, placements};

fn bench_tick(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();

    c.bench_function("engine_tick", |b| {
        b.iter(|| {
            if engine.is_game_over() {
                engine.reset();
            }
            black_box(engine.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("compact_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new(10, 20, 5);
            for y in 0..4 {
                for x in 0..10 {
                    board.set_cell(x, y, 1);
                }
            }
            board.set_cell(3, 4, 2);
            black_box(board.compact_lines());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if engine.is_game_over() {
                engine.reset();
            }
            black_box(engine.hard_drop());
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            black_box(engine.move_right());
            black_box(engine.move_left());
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            black_box(engine.rotate_cw());
        })
    });
}

fn bench_snapshot_into(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();
    for _ in 0..8 {
        engine.hard_drop();
    }
    let mut snap = engine.snapshot();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            engine.snapshot_into(&mut snap);
            black_box(snap.board_hash);
        })
    });
}

fn bench_placements(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default(), 12345).unwrap();

    c.bench_function("placements", |b| {
        b.iter(|| black_box(placements(&engine)))
    });
}

fn bench_apply_place(c: &mut Criterion) {
    let mut engine = Engine::new(EngineConfig::default(), 12345).unwrap();
    let mut i = 0usize;

    c.bench_function("apply_place", |b| {
        b.iter(|| {
            if engine.is_game_over() {
                engine.reset();
            }
            let options = placements(&engine);
            if !options.is_empty() {
                let (x, rotation) = options[i % options.len()];
                i = i.wrapping_add(7);
                let _ = black_box(apply_place(&mut engine, x, rotation));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_try_move,
    bench_try_rotate,
    bench_snapshot_into,
    bench_placements,
    bench_apply_place
);
criterion_main!(benches);
