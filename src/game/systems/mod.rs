//! Session systems: control commands, click handling, move playback.

pub mod animation;
pub mod control;
pub mod input;

pub use animation::{advance_animation_system, ActiveAnimation, AnimationOverlay, AnimationPlan};
pub use control::{
    handle_exit_system, handle_reset_system, handle_undo_system, terminal_check_system,
};
pub use input::handle_square_clicks;
