//! Board model benchmarks
//!
//! Criterion benchmarks for the hot paths behind the session loop:
//! legal move generation, terminal detection and a shallow search.

use chess_model::{best_move, Position, SearchLimits};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::atomic::AtomicBool;

fn bench_legal_moves_starting(c: &mut Criterion) {
    let pos = Position::new();
    c.bench_function("legal_moves_starting_position", |b| {
        b.iter(|| black_box(pos.legal_moves().len()))
    });
}

fn bench_terminal_detection(c: &mut Criterion) {
    let pos = Position::new();
    c.bench_function("terminal_detection_starting", |b| {
        b.iter(|| black_box((pos.is_checkmate(), pos.is_stalemate())))
    });
}

fn bench_apply_undo_cycle(c: &mut Criterion) {
    let pos = Position::new();
    let moves = pos.legal_moves();
    c.bench_function("apply_undo_cycle", |b| {
        b.iter(|| {
            let mut probe = pos.clone();
            for &mv in &moves {
                probe.apply(mv).unwrap();
                probe.undo_last();
            }
            black_box(probe.move_log().len())
        })
    });
}

fn bench_shallow_search(c: &mut Criterion) {
    let pos = Position::new();
    let moves = pos.legal_moves();
    let cancel = AtomicBool::new(false);
    let limits = SearchLimits { max_depth: 2, time_budget_ms: 60_000 };
    c.bench_function("search_depth_two_starting", |b| {
        b.iter(|| black_box(best_move(pos.clone(), &moves, limits, &cancel)))
    });
}

criterion_group!(
    benches,
    bench_legal_moves_starting,
    bench_terminal_detection,
    bench_apply_undo_cycle,
    bench_shallow_search,
);
criterion_main!(benches);
