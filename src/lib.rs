//! # robochess
//!
//! Session controller for a human-vs-robot chess game, built as a
//! Bevy plugin. Add [`SessionPlugin`] next to a renderer plugin: the
//! renderer writes [`game::events`] messages for clicks, undo and
//! reset, and draws from the per-tick [`game::view::FrameView`]
//! resource. The robot's move search runs on the async compute pool
//! and is polled without ever blocking the tick.

pub mod game;

pub use game::SessionPlugin;
