//! The chess session controller.
//!
//! Owns the turn state machine, the two-click selection accumulator,
//! the async search-task lifecycle and move playback. Chess rules
//! live in the `chess_model` crate; rendering reads
//! [`view::FrameView`].

pub mod ai;
pub mod error;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod system_sets;
pub mod systems;
pub mod view;

pub use error::{GameError, GameResult};
pub use plugin::SessionPlugin;
