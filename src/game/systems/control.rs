//! Session control: terminal detection, undo, reset, exit cleanup and
//! the shared move-commit path used by both the human and the robot.

use crate::game::ai::PendingSearch;
use crate::game::error::GameResult;
use crate::game::events::{ResetRequested, UndoRequested};
use crate::game::resources::{BoardModel, LegalMoves, Selection, TurnPhase, TurnState};
use crate::game::systems::animation::{ActiveAnimation, AnimationPlan};
use crate::game::view::EndBanner;
use bevy::app::AppExit;
use bevy::prelude::*;
use chess_model::Move;

/// Apply `mv` to the board and start its playback.
///
/// Shared by the human commit path and the robot poll path so both
/// sides go through identical bookkeeping: apply, refresh the legal
/// cache, begin the playback, enter `Animating`.
pub(crate) fn commit_move(
    tag: &str,
    mv: Move,
    board: &mut BoardModel,
    legal: &mut LegalMoves,
    turn: &mut TurnState,
    animation: &mut ActiveAnimation,
) -> GameResult<()> {
    board.position.apply(mv)?;
    info!("[GAME] {tag} played {mv}");
    legal.refresh(&board.position);
    animation.begin(AnimationPlan::new(mv));
    turn.transition_to(TurnPhase::Animating);
    Ok(())
}

/// Flag the end of the game. The caller has established that the side
/// to move has no legal moves.
pub(crate) fn enter_game_over(board: &BoardModel, turn: &mut TurnState, banner: &mut EndBanner) {
    let text = if board.position.in_check(board.side_to_move()) {
        format!("{} wins by checkmate", board.side_to_move().opponent())
    } else {
        "Stalemate".to_string()
    };
    info!("[GAME] ========== GAME OVER: {text} ==========");
    banner.0 = Some(text);
    turn.transition_to(TurnPhase::GameOver);
}

/// Detects checkmate and stalemate outside playback. While a playback
/// runs the completion system performs this check itself, so the end
/// banner never shows before the move has visibly landed.
pub fn terminal_check_system(
    board: Res<BoardModel>,
    legal: Res<LegalMoves>,
    mut turn: ResMut<TurnState>,
    mut banner: ResMut<EndBanner>,
    mut search: ResMut<PendingSearch>,
) {
    if !matches!(
        turn.phase(),
        TurnPhase::AwaitingInput | TurnPhase::SearchInFlight
    ) {
        return;
    }
    if !legal.is_empty() {
        return;
    }
    search.cancel();
    enter_game_over(&board, &mut turn, &mut banner);
}

/// Takes back one move per queued request. Cancels any in-flight
/// search first; its result is never read.
pub fn handle_undo_system(
    mut requests: MessageReader<UndoRequested>,
    mut search: ResMut<PendingSearch>,
    mut board: ResMut<BoardModel>,
    mut legal: ResMut<LegalMoves>,
    mut selection: ResMut<Selection>,
    mut animation: ResMut<ActiveAnimation>,
    mut turn: ResMut<TurnState>,
) {
    let requested = requests.read().count();
    if requested == 0 {
        return;
    }
    if turn.phase() == TurnPhase::GameOver {
        info!("[SESSION] Undo ignored after game over; reset to continue");
        return;
    }

    search.cancel();
    animation.clear();
    let mut undone = 0;
    for _ in 0..requested {
        if board.position.undo_last().is_none() {
            break;
        }
        undone += 1;
    }
    if undone > 0 {
        info!("[SESSION] Undid {undone} move(s), {} remain", board.position.move_log().len());
    } else {
        info!("[SESSION] Nothing to undo");
    }
    legal.refresh(&board.position);
    selection.clear();
    turn.transition_to(TurnPhase::AwaitingInput);
}

/// Starts a fresh game from any phase.
pub fn handle_reset_system(
    mut requests: MessageReader<ResetRequested>,
    mut search: ResMut<PendingSearch>,
    mut board: ResMut<BoardModel>,
    mut legal: ResMut<LegalMoves>,
    mut selection: ResMut<Selection>,
    mut animation: ResMut<ActiveAnimation>,
    mut turn: ResMut<TurnState>,
    mut banner: ResMut<EndBanner>,
) {
    if requests.read().count() == 0 {
        return;
    }
    search.cancel();
    animation.clear();
    *board = BoardModel::default();
    legal.refresh(&board.position);
    selection.clear();
    banner.0 = None;
    turn.transition_to(TurnPhase::AwaitingInput);
    info!("[SESSION] Board reset, {} to move", board.side_to_move());
}

/// Cancels the in-flight search when the app is shutting down, so no
/// worker outlives the session uncancelled.
pub fn handle_exit_system(
    mut exits: MessageReader<AppExit>,
    mut search: ResMut<PendingSearch>,
) {
    if exits.read().last().is_none() {
        return;
    }
    if search.is_running() {
        info!("[SESSION] Exit requested, cancelling in-flight search");
        search.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::view::EndBanner;
    use chess_model::Square;

    fn find_move(legal: &LegalMoves, from: &str, to: &str) -> Move {
        let from = Square::from_algebraic(from).unwrap();
        let to = Square::from_algebraic(to).unwrap();
        legal
            .as_slice()
            .iter()
            .copied()
            .find(|m| m.from == from && m.to == to)
            .unwrap()
    }

    #[test]
    fn commit_move_applies_refreshes_and_animates() {
        let mut board = BoardModel::default();
        let mut legal = LegalMoves::default();
        legal.refresh(&board.position);
        let mut turn = TurnState::default();
        let mut animation = ActiveAnimation::default();

        let mv = find_move(&legal, "e2", "e4");
        commit_move("Human", mv, &mut board, &mut legal, &mut turn, &mut animation).unwrap();

        assert_eq!(board.position.move_log().len(), 1);
        assert_eq!(turn.phase(), TurnPhase::Animating);
        assert!(animation.is_playing());
        // Cache already reflects Black's options.
        assert!(legal.as_slice().iter().all(|m| m.piece.side == chess_model::Side::Black));
    }

    #[test]
    fn commit_move_rejects_a_stale_move() {
        let mut board = BoardModel::default();
        let mut legal = LegalMoves::default();
        legal.refresh(&board.position);
        let mut turn = TurnState::default();
        let mut animation = ActiveAnimation::default();

        let mv = find_move(&legal, "e2", "e4");
        commit_move("Human", mv, &mut board, &mut legal, &mut turn, &mut animation).unwrap();
        assert!(commit_move("Human", mv, &mut board, &mut legal, &mut turn, &mut animation).is_err());
        assert_eq!(board.position.move_log().len(), 1);
    }

    #[test]
    fn game_over_banner_names_the_mating_side() {
        let mut board = BoardModel::default();
        let mut legal = LegalMoves::default();
        legal.refresh(&board.position);
        // Fool's mate: Black delivers checkmate.
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            let mv = find_move(&legal, from, to);
            board.position.apply(mv).unwrap();
            legal.refresh(&board.position);
        }
        assert!(legal.is_empty());

        let mut turn = TurnState::default();
        let mut banner = EndBanner::default();
        enter_game_over(&board, &mut turn, &mut banner);
        assert_eq!(turn.phase(), TurnPhase::GameOver);
        assert_eq!(banner.0.as_deref(), Some("Black wins by checkmate"));
    }
}
