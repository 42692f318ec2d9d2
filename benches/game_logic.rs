use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ar_tetris::core::{Board, GameSnapshot, GameState};
use ar_tetris::types::PieceKind;

fn playing_state() -> GameState {
    let mut state = GameState::new(12345);
    state.start();
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = playing_state();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if !state.is_playing() {
                state.reset();
                state.start();
            }
            black_box(state.tick());
            state.drain_events().for_each(drop);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_hard_drop_and_spawn(c: &mut Criterion) {
    let mut state = playing_state();

    c.bench_function("hard_drop_spawn", |b| {
        b.iter(|| {
            if !state.is_playing() {
                state.reset();
                state.start();
            }
            black_box(state.hard_drop());
            state.drain_events().for_each(drop);
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut state = playing_state();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            black_box(state.move_left());
            black_box(state.move_right());
            state.drain_events().for_each(drop);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = playing_state();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(state.rotate());
            state.drain_events().for_each(drop);
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let state = playing_state();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop_and_spawn,
    bench_move,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
