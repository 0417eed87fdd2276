//! Move search: depth- and time-limited alpha-beta over material,
//! with cooperative cancellation, plus the uniform random fallback.

use crate::position::Position;
use crate::types::{Move, Side};
use rand::seq::IndexedRandom;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

const MATE_SCORE: i32 = 100_000;
/// Cancellation and the clock are checked once per this many nodes.
const CHECK_INTERVAL: u64 = 1024;

/// Bounds on a single search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
    pub time_budget_ms: u64,
}

impl Default for SearchLimits {
    fn default() -> SearchLimits {
        SearchLimits { max_depth: 4, time_budget_ms: 2_000 }
    }
}

struct SearchCtx<'a> {
    deadline: Instant,
    cancel: &'a AtomicBool,
    nodes: u64,
    stopped: bool,
}

impl SearchCtx<'_> {
    /// Sample the cancel flag and the clock unconditionally.
    fn checkpoint(&mut self) -> bool {
        if !self.stopped
            && (self.cancel.load(Ordering::Relaxed) || Instant::now() >= self.deadline)
        {
            self.stopped = true;
        }
        self.stopped
    }

    /// Per-node stop check; samples the flag and clock every
    /// `CHECK_INTERVAL` nodes to keep the hot path cheap.
    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        self.nodes += 1;
        if self.nodes % CHECK_INTERVAL == 0 {
            return self.checkpoint();
        }
        false
    }
}

/// Search the snapshot for the best move among `root_moves`.
///
/// Returns `None` when cancelled before any depth completes, or when
/// `root_moves` is empty. Iterative deepening keeps the best move of
/// the last *completed* depth, so a timeout never returns a move from
/// a half-searched tree.
pub fn best_move(
    mut position: Position,
    root_moves: &[Move],
    limits: SearchLimits,
    cancel: &AtomicBool,
) -> Option<Move> {
    if root_moves.is_empty() {
        return None;
    }
    let mut ctx = SearchCtx {
        deadline: Instant::now() + std::time::Duration::from_millis(limits.time_budget_ms),
        cancel,
        nodes: 0,
        stopped: false,
    };

    let mut best: Option<Move> = None;
    for depth in 1..=limits.max_depth.max(1) {
        // A cancellation or timeout that landed between depths must
        // stop the search before this depth produces a result.
        if ctx.checkpoint() {
            break;
        }
        let mut depth_best: Option<(Move, i32)> = None;
        for &mv in root_moves {
            if position.apply(mv).is_err() {
                continue;
            }
            let score = -negamax(&mut position, depth - 1, -MATE_SCORE, MATE_SCORE, &mut ctx);
            position.undo_last();
            if ctx.stopped {
                break;
            }
            if depth_best.map_or(true, |(_, s)| score > s) {
                depth_best = Some((mv, score));
            }
        }
        if ctx.stopped {
            break;
        }
        best = depth_best.map(|(mv, _)| mv);
    }
    best
}

fn negamax(
    position: &mut Position,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchCtx<'_>,
) -> i32 {
    if ctx.should_stop() {
        return 0;
    }
    if depth == 0 {
        return evaluate(position);
    }
    let moves = position.legal_moves();
    if moves.is_empty() {
        return if position.in_check(position.side_to_move()) {
            // More remaining depth means the mate was found sooner;
            // score it higher so the faster mate wins.
            -(MATE_SCORE + depth as i32)
        } else {
            0
        };
    }
    let mut best = -MATE_SCORE;
    for mv in moves {
        if position.apply(mv).is_err() {
            continue;
        }
        let score = -negamax(position, depth - 1, -beta, -alpha, ctx);
        position.undo_last();
        if ctx.stopped {
            return 0;
        }
        if score > best {
            best = score;
        }
        if best > alpha {
            alpha = best;
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Material balance in centipawns from the side to move's view.
fn evaluate(position: &Position) -> i32 {
    let white = position.material_score() * 100;
    match position.side_to_move() {
        Side::White => white,
        Side::Black => -white,
    }
}

/// Uniform random pick from a legal-move list. `None` on an empty
/// list.
pub fn random_legal_move(moves: &[Move]) -> Option<Move> {
    moves.choose(&mut rand::rng()).copied()
}
