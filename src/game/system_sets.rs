//! System organization using SystemSets
//!
//! Defines execution order for the session loop using Bevy's SystemSet
//! feature. Ordering encodes the per-tick priority of the controller:
//! session commands always beat input, input beats the search
//! lifecycle, and the view is rebuilt last from settled state.

use bevy::prelude::*;

/// System execution order for the session loop
///
/// Each set runs in the order defined here, every `Update` tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum SessionSystems {
    /// Session commands and bookkeeping
    ///
    /// Systems: terminal detection, undo, reset, exit cleanup
    Commands,

    /// Click handling
    ///
    /// Systems: selection accumulation, human move commit
    Input,

    /// Search lifecycle
    ///
    /// Systems: search task spawn, non-blocking poll, robot move commit
    Search,

    /// Move playback
    ///
    /// Systems: animation frame advance, playback completion
    Animation,

    /// Renderer seam
    ///
    /// Systems: per-tick `FrameView` rebuild
    View,
}
