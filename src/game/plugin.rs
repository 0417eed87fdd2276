//! Session plugin: wires the turn controller into a Bevy app.
//!
//! Registers all session resources and messages, then arranges the
//! per-tick priority as chained system sets: session commands first,
//! then click handling, then the search lifecycle, then playback, and
//! the renderer view last. A renderer plugin added alongside only has
//! to write the input messages and read [`FrameView`].

use super::ai::{poll_search_system, spawn_search_system, PendingSearch};
use super::events::{ResetRequested, SquareClicked, UndoRequested};
use super::resources::{BoardModel, LegalMoves, OpponentConfig, Selection, TurnState};
use super::system_sets::SessionSystems;
use super::systems::{
    advance_animation_system, handle_exit_system, handle_reset_system, handle_square_clicks,
    handle_undo_system, terminal_check_system, ActiveAnimation,
};
use super::view::{build_frame_view, EndBanner, FrameView};
use bevy::prelude::*;

/// Turn controller for a human-vs-robot chess session.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardModel>()
            .init_resource::<LegalMoves>()
            .init_resource::<Selection>()
            .init_resource::<TurnState>()
            .init_resource::<OpponentConfig>()
            .init_resource::<PendingSearch>()
            .init_resource::<ActiveAnimation>()
            .init_resource::<EndBanner>()
            .init_resource::<FrameView>();

        app.add_message::<SquareClicked>()
            .add_message::<UndoRequested>()
            .add_message::<ResetRequested>();

        app.configure_sets(
            Update,
            (
                SessionSystems::Commands,
                SessionSystems::Input,
                SessionSystems::Search,
                SessionSystems::Animation,
                SessionSystems::View,
            )
                .chain(),
        );

        app.add_systems(Startup, setup_session);
        app.add_systems(
            Update,
            (
                (
                    terminal_check_system,
                    handle_undo_system,
                    handle_reset_system,
                    handle_exit_system,
                )
                    .chain()
                    .in_set(SessionSystems::Commands),
                handle_square_clicks.in_set(SessionSystems::Input),
                (spawn_search_system, poll_search_system)
                    .chain()
                    .in_set(SessionSystems::Search),
                advance_animation_system.in_set(SessionSystems::Animation),
                build_frame_view.in_set(SessionSystems::View),
            ),
        );
    }
}

/// Fills the legal-move cache before the first game tick.
fn setup_session(board: Res<BoardModel>, mut legal: ResMut<LegalMoves>) {
    legal.refresh(&board.position);
    info!("[SESSION] ========== SESSION READY ==========");
    info!(
        "[SESSION] {} to move | {} legal moves",
        board.side_to_move(),
        legal.as_slice().len()
    );
}
