//! Buffered input messages feeding the session loop.
//!
//! The controller never reads devices. Whatever front end exists maps
//! pointer and keyboard input to these messages; the controller drains
//! them once per tick in a fixed priority order.

use bevy::prelude::*;
use chess_model::Square;

/// A board square was clicked.
#[derive(Message, Debug, Clone, Copy)]
pub struct SquareClicked {
    pub square: Square,
}

/// Take back the most recent move.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct UndoRequested;

/// Start a fresh game.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetRequested;
