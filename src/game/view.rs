//! Renderer seam.
//!
//! The controller never answers renderer queries; instead it rebuilds
//! [`FrameView`] once per tick after all game logic has settled, and
//! whatever front end exists draws from that alone.

use crate::game::resources::{BoardModel, LegalMoves, Selection, TurnPhase, TurnState};
use crate::game::systems::animation::{ActiveAnimation, AnimationOverlay};
use bevy::prelude::*;
use chess_model::{Move, Square};

/// End-of-game banner text, set when the session enters `GameOver`
/// and cleared by a reset.
#[derive(Resource, Debug, Default)]
pub struct EndBanner(pub Option<String>);

/// Everything a renderer needs for one frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameView {
    pub phase: TurnPhase,
    /// Occupied squares with piece codes, e.g. `(e1, "wK")`.
    pub cells: Vec<(Square, String)>,
    /// Pending first click, for the selection highlight.
    pub selection: Option<Square>,
    /// Legal destinations of the selected square.
    pub targets: Vec<Square>,
    /// Endpoints of the most recent move.
    pub last_move: Option<(Square, Square)>,
    /// Numbered move pairs, e.g. `"1. e2e4 e7e5"`.
    pub move_log: Vec<String>,
    /// Material balance in pawn units, positive when White leads.
    pub material_score: i32,
    pub banner: Option<String>,
    /// Present while a playback runs.
    pub animation: Option<AnimationOverlay>,
}

/// Rebuilds the view from settled state. Last set in the tick.
pub fn build_frame_view(
    board: Res<BoardModel>,
    legal: Res<LegalMoves>,
    selection: Res<Selection>,
    turn: Res<TurnState>,
    banner: Res<EndBanner>,
    animation: Res<ActiveAnimation>,
    mut view: ResMut<FrameView>,
) {
    view.phase = turn.phase();
    view.cells.clear();
    for row in 0..8 {
        for col in 0..8 {
            let square = Square::new(row, col);
            if let Some(piece) = board.position.board().piece_at(square) {
                view.cells.push((square, piece.code()));
            }
        }
    }
    view.selection = selection.pending();
    view.targets = selection
        .pending()
        .map(|square| legal.targets_from(square))
        .unwrap_or_default();
    view.last_move = board.position.move_log().last().map(|m| (m.from, m.to));
    view.move_log = paired_log(board.position.move_log());
    view.material_score = board.position.material_score();
    view.banner = banner.0.clone();
    view.animation = animation.overlay();
}

/// Render the move log as numbered White/Black pairs.
fn paired_log(moves: &[Move]) -> Vec<String> {
    moves
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| match pair {
            [white, black] => format!("{}. {} {}", i + 1, white, black),
            [white] => format!("{}. {}", i + 1, white),
            _ => unreachable!("chunks(2) yields one or two moves"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_model::Position;

    fn play(pos: &mut Position, from: &str, to: &str) {
        let from = Square::from_algebraic(from).unwrap();
        let to = Square::from_algebraic(to).unwrap();
        let mv = pos
            .legal_moves()
            .into_iter()
            .find(|m| m.from == from && m.to == to)
            .unwrap();
        pos.apply(mv).unwrap();
    }

    #[test]
    fn log_pairs_number_full_moves() {
        let mut pos = Position::new();
        play(&mut pos, "e2", "e4");
        play(&mut pos, "e7", "e5");
        play(&mut pos, "g1", "f3");
        assert_eq!(
            paired_log(pos.move_log()),
            vec!["1. e2e4 e7e5".to_string(), "2. g1f3".to_string()]
        );
    }

    #[test]
    fn empty_log_renders_nothing() {
        assert!(paired_log(&[]).is_empty());
    }
}
