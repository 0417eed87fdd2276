//! Click handling: feeds buffered square clicks into the selection
//! accumulator and commits resolved candidates.

use crate::game::events::SquareClicked;
use crate::game::resources::{
    BoardModel, ClickOutcome, LegalMoves, OpponentConfig, Selection, TurnState,
};
use crate::game::systems::animation::ActiveAnimation;
use crate::game::systems::control::commit_move;
use bevy::prelude::*;

/// Drains clicks every tick. Outside the human's `AwaitingInput`
/// window the clicks are still consumed, so none is held over into a
/// later phase.
pub fn handle_square_clicks(
    mut clicks: MessageReader<SquareClicked>,
    mut selection: ResMut<Selection>,
    mut board: ResMut<BoardModel>,
    mut legal: ResMut<LegalMoves>,
    mut turn: ResMut<TurnState>,
    mut animation: ResMut<ActiveAnimation>,
    config: Res<OpponentConfig>,
) {
    for click in clicks.read() {
        if !turn.phase().accepts_input() || board.side_to_move() == config.robot_side {
            debug!(
                "[INPUT] Click on {} ignored in phase {:?}",
                click.square,
                turn.phase()
            );
            continue;
        }
        match selection.on_square_clicked(click.square, legal.as_slice()) {
            ClickOutcome::Cleared => debug!("[INPUT] Selection cleared"),
            ClickOutcome::Pending(square) => debug!("[INPUT] Selected {square}"),
            ClickOutcome::Candidate(mv) => {
                if let Err(err) =
                    commit_move("Human", mv, &mut board, &mut legal, &mut turn, &mut animation)
                {
                    error!("[INPUT] {err}");
                    selection.clear();
                }
            }
        }
    }
}
