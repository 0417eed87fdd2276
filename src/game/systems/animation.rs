//! Move playback.
//!
//! A committed move is played back as a straight-line glide whose
//! length depends on the board distance travelled, paced at a fixed
//! 60 Hz by a repeating timer so the glide looks the same regardless
//! of the logic tick rate. While a playback runs the session holds
//! the `Animating` phase; completion performs the terminal check the
//! controller skipped, so an end banner never precedes the playback.

use crate::game::resources::{BoardModel, LegalMoves, TurnPhase, TurnState};
use crate::game::systems::control::enter_game_over;
use crate::game::view::EndBanner;
use bevy::prelude::*;
use chess_model::{Move, MoveFlag, Square};

/// Frames per board step. A move spanning `|dr| + |dc|` squares plays
/// `(|dr| + |dc|) * 7 + 1` frames including both endpoints.
const FRAMES_PER_SQUARE: u32 = 7;
/// Playback cadence, independent of the logic tick.
const FRAME_SECONDS: f32 = 1.0 / 60.0;

/// Frame geometry for one move, derived purely from the move itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationPlan {
    mv: Move,
    frame_count: u32,
}

impl AnimationPlan {
    pub fn new(mv: Move) -> AnimationPlan {
        let dr = (mv.to.row as i32 - mv.from.row as i32).unsigned_abs();
        let dc = (mv.to.col as i32 - mv.from.col as i32).unsigned_abs();
        AnimationPlan {
            mv,
            frame_count: (dr + dc) * FRAMES_PER_SQUARE + 1,
        }
    }

    #[inline]
    pub fn move_played(&self) -> Move {
        self.mv
    }

    #[inline]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    #[inline]
    pub fn last_frame(&self) -> u32 {
        self.frame_count - 1
    }

    /// Fractional board position of the gliding piece at `frame`,
    /// interpolated linearly from source to destination inclusive.
    pub fn position_at(&self, frame: u32) -> (f32, f32) {
        let last = self.last_frame().max(1);
        let t = frame.min(last) as f32 / last as f32;
        let row = self.mv.from.row as f32
            + (self.mv.to.row as f32 - self.mv.from.row as f32) * t;
        let col = self.mv.from.col as f32
            + (self.mv.to.col as f32 - self.mv.from.col as f32) * t;
        (row, col)
    }

    /// Where the captured piece is drawn during playback. For en
    /// passant that is the square beside the destination, one rank
    /// toward the mover, where the pawn actually stood.
    pub fn captured_display(&self) -> Option<(chess_model::Piece, Square)> {
        debug_assert!(
            self.mv.flag != MoveFlag::EnPassant || self.mv.capture.is_some(),
            "en passant always captures"
        );
        self.mv.capture.zip(self.mv.capture_square())
    }
}

/// What the renderer draws while a playback runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationOverlay {
    /// Piece code of the glider, e.g. `wN`.
    pub piece: String,
    pub row: f32,
    pub col: f32,
    /// Destination square to leave blank; the board already holds the
    /// moved piece there.
    pub hide: Square,
    /// Captured piece to keep drawing until the glide lands.
    pub captured: Option<(String, Square)>,
}

struct Playback {
    plan: AnimationPlan,
    frame: u32,
    timer: Timer,
}

/// Resource owning the current playback, if any.
#[derive(Resource, Default)]
pub struct ActiveAnimation {
    playing: Option<Playback>,
}

impl ActiveAnimation {
    pub fn begin(&mut self, plan: AnimationPlan) {
        self.playing = Some(Playback {
            plan,
            frame: 0,
            timer: Timer::from_seconds(FRAME_SECONDS, TimerMode::Repeating),
        });
    }

    pub fn clear(&mut self) {
        self.playing = None;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing.is_some()
    }

    pub fn overlay(&self) -> Option<AnimationOverlay> {
        self.playing.as_ref().map(|playing| {
            let (row, col) = playing.plan.position_at(playing.frame);
            AnimationOverlay {
                piece: playing.plan.move_played().piece.code(),
                row,
                col,
                hide: playing.plan.move_played().to,
                captured: playing
                    .plan
                    .captured_display()
                    .map(|(piece, square)| (piece.code(), square)),
            }
        })
    }
}

/// Advances the playback and, on its final frame, performs the
/// deferred terminal check and releases the session.
pub fn advance_animation_system(
    time: Res<Time>,
    mut animation: ResMut<ActiveAnimation>,
    board: Res<BoardModel>,
    legal: Res<LegalMoves>,
    mut turn: ResMut<TurnState>,
    mut banner: ResMut<EndBanner>,
) {
    if turn.phase() != TurnPhase::Animating {
        return;
    }
    let Some(playing) = animation.playing.as_mut() else {
        warn!("[GAME] Animating with no playback; releasing the session");
        turn.transition_to(TurnPhase::AwaitingInput);
        return;
    };

    playing.timer.tick(time.delta());
    let last = playing.plan.last_frame();
    playing.frame = (playing.frame + playing.timer.times_finished_this_tick()).min(last);
    if playing.frame < last {
        return;
    }

    let mv = playing.plan.move_played();
    animation.clear();
    info!("[GAME] Playback finished for {mv}");
    if legal.is_empty() {
        enter_game_over(&board, &mut turn, &mut banner);
    } else {
        turn.transition_to(TurnPhase::AwaitingInput);
    }
}
