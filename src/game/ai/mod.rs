//! Async move search: the task handle and its lifecycle systems.

pub mod handle;
pub mod systems;

pub use handle::{PendingSearch, SearchPoll};
pub use systems::{poll_search_system, spawn_search_system};
