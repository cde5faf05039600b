//! Read-only view of a frame for the draw layer

use glam::Vec2;
use serde::Serialize;

use super::collision::Rect;
use super::state::{Board, GamePhase, GameState, Paddle, Side};
use super::tick::blink_visible;
use crate::tuning::{Color, GHOST_GREY};

#[derive(Debug, Clone, Serialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaddleView {
    pub side: Side,
    pub pos: Vec2,
    pub rect: Rect,
    pub color: Color,
    pub smash: bool,
    pub corner_hit: bool,
    pub enable_ai: bool,
    pub score: u32,
    pub helper: Rect,
    pub helper_color: Color,
}

impl PaddleView {
    fn capture(paddle: &Paddle) -> Self {
        Self {
            side: paddle.side,
            pos: paddle.pos,
            rect: paddle.rect(),
            color: paddle.display_color(),
            smash: paddle.smash,
            corner_hit: paddle.corner_hit,
            enable_ai: paddle.enable_ai,
            score: paddle.score,
            helper: paddle.helper.rect,
            helper_color: GHOST_GREY,
        }
    }

    /// Score as drawn on the board
    pub fn score_text(&self) -> String {
        format!("{:04}", self.score)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub frame: u64,
    pub phase_frames: u32,
    pub countdown: u32,
    pub blink_visible: bool,
    pub title_started: bool,
    pub ai_status: bool,
    pub ball: BallView,
    pub computer: PaddleView,
    pub human: PaddleView,
    pub board: Board,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            frame: state.time_ticks,
            phase_frames: state.phase_frames,
            countdown: state.countdown,
            blink_visible: blink_visible(state),
            title_started: state.title_started,
            ai_status: state.ai_status,
            ball: BallView {
                pos: state.ball.pos,
                radius: state.ball.radius,
                color: state.ball.color,
            },
            computer: PaddleView::capture(&state.computer),
            human: PaddleView::capture(&state.human),
            board: state.board,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::SMASH_RED;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(8);
        state.human.score = 42;
        state.computer.smash = true;
        let snap = Snapshot::capture(&state);

        assert_eq!(snap.phase, GamePhase::Logo);
        assert_eq!(snap.human.score_text(), "0042");
        assert_eq!(snap.computer.color, SMASH_RED);
        assert_eq!(snap.ball.pos, state.ball.pos);
        assert_eq!(snap.human.rect, state.human.rect());
    }

    #[test]
    fn test_json_has_render_fields() {
        let snap = Snapshot::capture(&GameState::new(8));
        let json = snap.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Logo");
        assert_eq!(value["human"]["side"], "Right");
        assert!(value["ball"]["pos"].is_array());
        assert!(value["computer"]["helper"]["w"].is_number());
    }
}
