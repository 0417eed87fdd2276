//! Search lifecycle systems: spawn when the robot is to move, poll
//! without blocking, and commit the (fallback-substituted) result.

use super::handle::{PendingSearch, SearchPoll};
use crate::game::error::{GameError, GameResult};
use crate::game::resources::{BoardModel, LegalMoves, OpponentConfig, TurnPhase, TurnState};
use crate::game::systems::animation::ActiveAnimation;
use crate::game::systems::control::commit_move;
use bevy::prelude::*;
use chess_model::{random_legal_move, Move};

/// Spawns a search task once the robot is on move and nothing else is
/// in progress. Runs every tick; the guards make it a no-op otherwise.
pub fn spawn_search_system(
    mut search: ResMut<PendingSearch>,
    board: Res<BoardModel>,
    legal: Res<LegalMoves>,
    mut turn: ResMut<TurnState>,
    config: Res<OpponentConfig>,
) {
    if turn.phase() != TurnPhase::AwaitingInput
        || board.side_to_move() != config.robot_side
        || search.is_running()
        || legal.is_empty()
    {
        return;
    }

    let limits = config.difficulty.limits();
    info!("[AI] ========== SEARCH SPAWNED ==========");
    info!(
        "[AI] Side: {} | Depth: <={} | Budget: {}ms | Root moves: {}",
        config.robot_side,
        limits.max_depth,
        limits.time_budget_ms,
        legal.as_slice().len()
    );
    search.start(board.position.clone(), legal.as_slice().to_vec(), limits);
    turn.transition_to(TurnPhase::SearchInFlight);
}

/// Polls the in-flight search and commits its move when ready.
pub fn poll_search_system(
    mut search: ResMut<PendingSearch>,
    mut board: ResMut<BoardModel>,
    mut legal: ResMut<LegalMoves>,
    mut turn: ResMut<TurnState>,
    mut animation: ResMut<ActiveAnimation>,
) {
    if turn.phase() != TurnPhase::SearchInFlight {
        return;
    }
    match search.poll() {
        SearchPoll::Pending => {}
        SearchPoll::Idle => {
            // Phase says a search is running but no handle exists.
            warn!("[AI] SearchInFlight with no task; returning to input");
            turn.transition_to(TurnPhase::AwaitingInput);
        }
        SearchPoll::Done(result) => match choose_robot_move(result, legal.as_slice()) {
            Ok(mv) => {
                if let Err(err) =
                    commit_move("Robot", mv, &mut board, &mut legal, &mut turn, &mut animation)
                {
                    error!("[AI] Could not commit robot move: {err}");
                    turn.transition_to(TurnPhase::AwaitingInput);
                }
            }
            Err(err) => {
                // No legal move at all; the terminal check owns this.
                error!("[AI] {err}");
                turn.transition_to(TurnPhase::AwaitingInput);
            }
        },
    }
}

/// The move actually played: the search result, or a uniformly random
/// member of the current legal-move list when the search came back
/// empty.
pub(crate) fn choose_robot_move(result: Option<Move>, legal: &[Move]) -> GameResult<Move> {
    match result {
        Some(mv) => Ok(mv),
        None => {
            warn!("[AI] Empty search result, drawing a random legal move");
            random_legal_move(legal).ok_or(GameError::NoRobotMove)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_model::Position;

    #[test]
    fn search_result_is_used_verbatim() {
        let legal = Position::new().legal_moves();
        let mv = legal[3];
        assert_eq!(choose_robot_move(Some(mv), &legal).unwrap(), mv);
    }

    #[test]
    fn empty_result_falls_back_to_the_legal_list() {
        let legal = Position::new().legal_moves();
        let mv = choose_robot_move(None, &legal).unwrap();
        assert!(legal.contains(&mv));
    }

    #[test]
    fn empty_result_with_no_legal_moves_is_an_error() {
        assert!(matches!(
            choose_robot_move(None, &[]),
            Err(GameError::NoRobotMove)
        ));
    }
}
