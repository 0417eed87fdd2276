//! The async search handle.
//!
//! At most one search task is alive at a time. The task runs on
//! Bevy's [`AsyncComputeTaskPool`] against a value snapshot of the
//! position; the live board is never shared with it. Cancellation is
//! cooperative: the flag is checked inside the search, and the handle
//! is discarded at cancel time so a late result can never be applied.

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};
use chess_model::{best_move, Move, Position, SearchLimits};
use futures_lite::future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct SearchHandle {
    task: Task<Option<Move>>,
    cancel: Arc<AtomicBool>,
}

/// Outcome of one non-blocking poll.
#[derive(Debug, PartialEq)]
pub enum SearchPoll {
    /// No task is alive.
    Idle,
    /// The task is still running.
    Pending,
    /// The task finished; the handle has been consumed. `None` means
    /// the search produced nothing and the caller should fall back.
    Done(Option<Move>),
}

/// Resource owning the in-flight search task, if any.
#[derive(Resource, Default)]
pub struct PendingSearch {
    handle: Option<SearchHandle>,
}

impl PendingSearch {
    #[inline]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Spawn a search over `root_moves` on the compute pool.
    ///
    /// # Panics
    ///
    /// Panics if a task is already alive. Starting a second search is
    /// a controller bug, not a runtime condition to recover from.
    pub fn start(&mut self, position: Position, root_moves: Vec<Move>, limits: SearchLimits) {
        assert!(
            self.handle.is_none(),
            "search task already in flight; cancel or poll it first"
        );
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let task = AsyncComputeTaskPool::get()
            .spawn(async move { best_move(position, &root_moves, limits, &flag) });
        self.handle = Some(SearchHandle { task, cancel });
    }

    /// Non-blocking poll. Consumes the handle on completion.
    pub fn poll(&mut self) -> SearchPoll {
        let finished = match &self.handle {
            None => return SearchPoll::Idle,
            Some(handle) => handle.task.is_finished(),
        };
        if !finished {
            return SearchPoll::Pending;
        }
        let Some(mut handle) = self.handle.take() else {
            return SearchPoll::Idle;
        };
        match block_on(future::poll_once(&mut handle.task)) {
            Some(result) => SearchPoll::Done(result),
            None => {
                // Finished but no retrievable result; treat as an
                // empty search rather than waiting.
                warn!("[AI] Task reported finished but result not available");
                SearchPoll::Done(None)
            }
        }
    }

    /// Cancel and discard the in-flight task, if any. The task keeps
    /// running detached until it observes the flag; its result is
    /// never read.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel.store(true, Ordering::Relaxed);
            handle.task.detach();
            info!("[AI] Search cancelled and detached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::tasks::TaskPool;
    use std::thread::sleep;
    use std::time::Duration;

    fn quick_limits() -> SearchLimits {
        SearchLimits { max_depth: 1, time_budget_ms: 5_000 }
    }

    fn start_from_initial(pending: &mut PendingSearch, limits: SearchLimits) -> Vec<Move> {
        AsyncComputeTaskPool::get_or_init(TaskPool::new);
        let position = Position::new();
        let moves = position.legal_moves();
        pending.start(position, moves.clone(), limits);
        moves
    }

    #[test]
    fn poll_without_start_is_idle() {
        let mut pending = PendingSearch::default();
        assert_eq!(pending.poll(), SearchPoll::Idle);
        assert!(!pending.is_running());
    }

    #[test]
    fn start_then_poll_delivers_a_legal_move() {
        let mut pending = PendingSearch::default();
        let moves = start_from_initial(&mut pending, quick_limits());
        assert!(pending.is_running());

        for _ in 0..500 {
            match pending.poll() {
                SearchPoll::Pending => sleep(Duration::from_millis(10)),
                SearchPoll::Done(result) => {
                    let mv = result.expect("search on a live position returns a move");
                    assert!(moves.contains(&mv));
                    assert!(!pending.is_running());
                    return;
                }
                SearchPoll::Idle => panic!("handle vanished while waiting"),
            }
        }
        panic!("search did not finish in time");
    }

    #[test]
    #[should_panic(expected = "already in flight")]
    fn double_start_panics() {
        let mut pending = PendingSearch::default();
        start_from_initial(&mut pending, quick_limits());
        let position = Position::new();
        let moves = position.legal_moves();
        pending.start(position, moves, quick_limits());
    }

    #[test]
    fn cancel_discards_the_handle() {
        let mut pending = PendingSearch::default();
        start_from_initial(
            &mut pending,
            SearchLimits { max_depth: 10, time_budget_ms: 60_000 },
        );
        pending.cancel();
        assert!(!pending.is_running());
        assert_eq!(pending.poll(), SearchPoll::Idle);
        // Cancelling again is a no-op.
        pending.cancel();
    }
}
