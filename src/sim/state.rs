//! Game state and core simulation types
//!
//! One `GameState` owns the ball, both paddles, the RNG and the phase. It is
//! created once and mutated in place by `tick` every frame.

use glam::Vec2;
use serde::Serialize;

use super::collision::Rect;
use super::rng::{RandomSource, SimRng};
use crate::lerp_vec;
use crate::tuning::{Color, SMASH_RED, Tuning};

/// Screen / phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Timed intro, skippable
    Logo,
    /// Waiting for start, then blinking
    Title,
    /// 3-2-1 before the first serve
    CountdownStart,
    /// Ball in play
    Gameplay,
    /// Short pause after a point while paddles return home
    PointReset,
    /// Defined for completeness; nothing transitions here
    Ending,
}

/// Court side; the computer defends the left goal, the human the right one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// x direction of this side's own goal line
    pub fn goal_dir(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Things that happened during a tick, drained by the host for sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    WallHit,
    PaddleHit { side: Side },
    CornerHit { side: Side },
    Smash { side: Side },
    SmashReturn { side: Side },
    PointScored { scorer: Side },
    CountdownTick,
    CountdownFinal,
    Start,
    AiToggled { enabled: bool },
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Direction-like velocity, scaled by `speed` and the multipliers
    pub vel: Vec2,
    /// Direction used for the next serve
    pub direction: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub base_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Boost after a corner hit (1.0 = none)
    pub corner_speed: f32,
    /// Boost after a smash or smash return (1.0 = none)
    pub smash_speed: f32,
    pub color: Color,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        let b = &tuning.ball;
        Self {
            pos: court_center(tuning),
            vel: Vec2::ZERO,
            direction: Vec2::new(1.0, 0.0),
            radius: b.radius,
            speed: b.base_speed,
            base_speed: b.base_speed,
            min_speed: b.min_speed,
            max_speed: b.max_speed,
            corner_speed: 1.0,
            smash_speed: 1.0,
            color: b.color,
        }
    }

    pub fn clamp_speed(&mut self) {
        self.speed = self.speed.clamp(self.min_speed, self.max_speed);
    }

    /// Speed, multipliers and tint back to serve defaults
    pub fn reset_modifiers(&mut self, tuning: &Tuning) {
        self.speed = self.base_speed;
        self.corner_speed = 1.0;
        self.smash_speed = 1.0;
        self.color = tuning.ball.color;
    }

    /// Pick a fresh vertical serve component from a table of tenths
    pub fn randomize_serve_y(&mut self, rng: &mut impl RandomSource, table: &[i32]) {
        let Some(last) = table.len().checked_sub(1) else {
            return;
        };
        let index = rng.range(0, last as i32) as usize;
        self.direction.y = table[index.min(last)] as f32 / 10.0;
    }
}

/// Lagging visual echo of a paddle
#[derive(Debug, Clone, Copy)]
pub struct Helper {
    pub pos: Vec2,
    pub rect: Rect,
}

/// A paddle, human or computer controlled
#[derive(Debug, Clone)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    /// Rest x the paddle is pulled back to after knockback
    pub home_x: f32,
    pub score: u32,
    /// Pixels per second at normalized velocity 1.0
    pub speed: f32,
    /// Normalized velocity cap
    pub max_speed: f32,
    /// Locked out after the ball clipped the paddle edge
    pub corner_hit: bool,
    /// Currently smashing
    pub smash: bool,
    /// Human asked to smash on the next contact
    pub smash_armed: bool,
    pub enable_ai: bool,
    pub color: Color,
    pub helper: Helper,
}

impl Paddle {
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        let p = &tuning.paddle;
        let home_x = match side {
            Side::Left => p.inset,
            Side::Right => tuning.court.width - (p.width + p.inset),
        };
        let pos = Vec2::new(home_x, home_y(tuning));
        let (enable_ai, color) = match side {
            Side::Left => (true, p.computer_color),
            Side::Right => (false, p.human_color),
        };
        let helper_pos = pos + Vec2::new(side.goal_dir() * p.helper_offset, 0.0);
        Self {
            side,
            pos,
            vel: Vec2::ZERO,
            width: p.width,
            height: p.height,
            home_x,
            score: 0,
            speed: p.speed,
            max_speed: p.max_speed,
            corner_hit: false,
            smash: false,
            smash_armed: false,
            enable_ai,
            color,
            helper: Helper {
                pos: helper_pos,
                rect: Rect::from_pos(helper_pos, p.width, p.height),
            },
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos(self.pos, self.width, self.height)
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    /// x of the face that meets the ball
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Left => self.pos.x + self.width,
            Side::Right => self.pos.x,
        }
    }

    /// Add points, saturating at the display maximum
    pub fn add_score(&mut self, points: u32, max: u32) {
        self.score = self.score.saturating_add(points).min(max);
    }

    /// Clear per-rally flags
    pub fn reset_flags(&mut self) {
        self.corner_hit = false;
        self.smash = false;
        self.smash_armed = false;
    }

    /// Display tint (red while smashing)
    pub fn display_color(&self) -> Color {
        if self.smash { SMASH_RED } else { self.color }
    }

    /// Ease the helper ghost toward the paddle
    pub fn update_helper(&mut self, offset: f32, smoothing: f32) {
        let target = self.pos + Vec2::new(self.side.goal_dir() * offset, 0.0);
        self.helper.pos = lerp_vec(self.helper.pos, target, smoothing);
        self.helper.rect = Rect::from_pos(self.helper.pos, self.width, self.height);
    }
}

/// Fixed drawing anchors of the court
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Board {
    pub wall_thickness: f32,
    pub middle_top: Vec2,
    pub middle_bottom: Vec2,
    /// Top-left of the computer score
    pub score_left: Vec2,
    /// Top-left of the human score
    pub score_right: Vec2,
}

impl Board {
    pub fn new(tuning: &Tuning) -> Self {
        let c = &tuning.court;
        let mid = c.width / 2.0;
        Self {
            wall_thickness: c.wall_thickness,
            middle_top: Vec2::new(mid, 0.0),
            middle_bottom: Vec2::new(mid, c.height),
            score_left: Vec2::new(mid - c.score_gap - c.score_width, c.score_y),
            score_right: Vec2::new(mid + c.score_gap, c.score_y),
        }
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub rng: SimRng,
    pub phase: GamePhase,
    /// Frames spent in the current phase
    pub phase_frames: u32,
    /// Frames of the title's start blink
    pub blink_frames: u32,
    /// Value shown during the countdown
    pub countdown: u32,
    /// Start was pressed on the title screen
    pub title_started: bool,
    /// AI toggle key is held; gates the toggle and its banner
    pub ai_status: bool,
    pub board: Board,
    pub ball: Ball,
    /// Left paddle, always AI
    pub computer: Paddle,
    /// Right paddle, keyboard or AI
    pub human: Paddle,
    /// Frames since start
    pub time_ticks: u64,
    /// Events of the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let mut ball = Ball::new(&tuning);
        ball.direction.x = rng.sign();
        ball.randomize_serve_y(&mut rng, &tuning.ball.serve_y_table);

        Self {
            rng,
            phase: GamePhase::Logo,
            phase_frames: 0,
            blink_frames: 0,
            countdown: tuning.timing.countdown_from,
            title_started: false,
            ai_status: false,
            board: Board::new(&tuning),
            ball,
            computer: Paddle::new(Side::Left, &tuning),
            human: Paddle::new(Side::Right, &tuning),
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.computer,
            Side::Right => &self.human,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.computer,
            Side::Right => &mut self.human,
        }
    }

    /// Switch phase and restart the phase timers
    pub fn set_phase(&mut self, phase: GamePhase) {
        if phase != self.phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
        self.phase_frames = 0;
        self.blink_frames = 0;
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Court center
pub fn court_center(tuning: &Tuning) -> Vec2 {
    Vec2::new(tuning.court.width / 2.0, tuning.court.height / 2.0)
}

/// Paddle top y that centers it vertically
pub fn home_y(tuning: &Tuning) -> f32 {
    tuning.court.height / 2.0 - tuning.paddle.height / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    #[test]
    fn test_initial_layout() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Logo);
        assert_eq!(state.ball.pos, Vec2::new(320.0, 180.0));
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.computer.pos, Vec2::new(22.0, 140.0));
        assert_eq!(state.human.pos, Vec2::new(592.0, 140.0));
        assert!(state.computer.enable_ai);
        assert!(!state.human.enable_ai);
        assert!(state.ball.direction.x == 1.0 || state.ball.direction.x == -1.0);
    }

    #[test]
    fn test_serve_is_never_flat() {
        let tuning = Tuning::default();
        let mut rng = SimRng::new(17);
        let mut ball = Ball::new(&tuning);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            ball.randomize_serve_y(&mut rng, &tuning.ball.serve_y_table);
            let y = ball.direction.y;
            assert!(!(y > -0.4 && y < 0.4), "flat serve {y}");
            seen.insert((y * 10.0).round() as i32);
        }
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec![-6, -5, -4, 4, 5, 6]);
    }

    #[test]
    fn test_serve_table_index_from_rng() {
        let mut ball = Ball::new(&Tuning::default());
        ball.randomize_serve_y(&mut ScriptedRng::new(&[3]), &[-6, -5, -4, 4, 5, 6]);
        assert!((ball.direction.y - 0.4).abs() < 1e-6);

        // Empty table leaves the direction alone
        ball.randomize_serve_y(&mut ScriptedRng::new(&[0]), &[]);
        assert!((ball.direction.y - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_face_x() {
        let state = GameState::new(1);
        assert_eq!(state.computer.face_x(), 48.0);
        assert_eq!(state.human.face_x(), 592.0);
    }

    #[test]
    fn test_score_saturates() {
        let mut paddle = Paddle::new(Side::Right, &Tuning::default());
        paddle.score = 9995;
        paddle.add_score(10, 9999);
        assert_eq!(paddle.score, 9999);
    }

    #[test]
    fn test_helper_trails_behind() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(Side::Left, &tuning);
        paddle.pos.y += 40.0;
        paddle.update_helper(tuning.paddle.helper_offset, tuning.paddle.helper_lerp);
        assert!(paddle.helper.pos.y > 140.0 && paddle.helper.pos.y < 180.0);
        assert!(paddle.helper.pos.x < paddle.pos.x);
    }

    #[test]
    fn test_board_anchors() {
        let board = Board::new(&Tuning::default());
        assert_eq!(board.score_right, Vec2::new(332.0, 28.0));
        assert!(board.score_left.x < 320.0);
    }
}
