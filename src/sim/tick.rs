//! Per-frame simulation tick
//!
//! One handler per phase. Each handler returns the phase for the next frame;
//! `tick` applies the transition.

use glam::Vec2;

use super::ball;
use super::paddle;
use super::state::{GameEvent, GamePhase, GameState, Side, court_center};
use crate::sim::rng::RandomSource;

/// Logical input for a single frame
///
/// `up`, `down`, `brake` and `toggle_ai` are held states; `smash`, `skip`
/// and `start` are true only on the frame the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub brake: bool,
    pub toggle_ai: bool,
    pub smash: bool,
    pub skip: bool,
    pub start: bool,
}

/// Advance the match by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;

    let dt = dt.clamp(0.0, state.tuning.timing.max_frame_time);

    let next = match state.phase {
        GamePhase::Logo => update_logo(state, input),
        GamePhase::Title => update_title(state, input),
        GamePhase::CountdownStart => update_countdown(state),
        GamePhase::Gameplay => update_gameplay(state, input, dt),
        GamePhase::PointReset => update_point_reset(state),
        GamePhase::Ending => GamePhase::Ending,
    };

    if next != state.phase {
        state.set_phase(next);
    }
}

fn update_logo(state: &mut GameState, input: &TickInput) -> GamePhase {
    state.phase_frames += 1;
    if input.skip || state.phase_frames >= state.tuning.timing.logo_frames {
        GamePhase::Title
    } else {
        GamePhase::Logo
    }
}

fn update_title(state: &mut GameState, input: &TickInput) -> GamePhase {
    state.phase_frames += 1;

    if !state.title_started {
        if input.start {
            state.title_started = true;
            state.blink_frames = 0;
            state.emit(GameEvent::Start);
        }
        return GamePhase::Title;
    }

    state.blink_frames += 1;
    if state.blink_frames < state.tuning.timing.title_blink_frames {
        return GamePhase::Title;
    }

    state.countdown = state.tuning.timing.countdown_from;
    state.emit(GameEvent::CountdownTick);
    GamePhase::CountdownStart
}

fn update_countdown(state: &mut GameState) -> GamePhase {
    state.phase_frames += 1;
    if state.phase_frames < state.tuning.timing.countdown_step_frames {
        return GamePhase::CountdownStart;
    }

    state.phase_frames = 0;
    state.countdown = state.countdown.saturating_sub(1);
    if state.countdown > 0 {
        state.emit(GameEvent::CountdownTick);
        return GamePhase::CountdownStart;
    }

    state.emit(GameEvent::CountdownFinal);
    state.ball.vel = state.ball.direction;
    log::info!("Serve {:?}", state.ball.vel);
    GamePhase::Gameplay
}

fn update_gameplay(state: &mut GameState, input: &TickInput, dt: f32) -> GamePhase {
    state.phase_frames += 1;

    {
        let GameState {
            tuning,
            rng,
            ball,
            computer,
            human,
            ai_status,
            events,
            ..
        } = state;

        ball::update(ball, computer, human, tuning, rng, events, dt);
        paddle::update_human(human, input, ai_status, ball, tuning, events, dt);
        paddle::update_computer(computer, ball, tuning, dt);
    }

    if state.ball.pos.x < 0.0 {
        score_point(state, Side::Right);
        GamePhase::PointReset
    } else if state.ball.pos.x > state.tuning.court.width {
        score_point(state, Side::Left);
        GamePhase::PointReset
    } else {
        GamePhase::Gameplay
    }
}

/// Award a point and park the ball at center for the next serve
pub fn score_point(state: &mut GameState, scorer: Side) {
    let points = state.tuning.paddle.point_score;
    let max = state.tuning.paddle.max_score;
    state.paddle_mut(scorer).add_score(points, max);

    state.ball.pos = court_center(&state.tuning);
    state.ball.vel = Vec2::ZERO;
    state.ball.direction.x = state.rng.sign();
    state.computer.vel = Vec2::ZERO;
    state.human.vel = Vec2::ZERO;

    log::info!(
        "{scorer:?} scores: computer {:04} - human {:04}",
        state.computer.score,
        state.human.score
    );
    state.emit(GameEvent::PointScored { scorer });
}

fn update_point_reset(state: &mut GameState) -> GamePhase {
    state.phase_frames += 1;
    paddle::return_home(&mut state.computer, &state.tuning);
    paddle::return_home(&mut state.human, &state.tuning);

    if finish_point_reset(state) {
        GamePhase::Gameplay
    } else {
        GamePhase::PointReset
    }
}

/// Serve again once the reset interval has elapsed
///
/// Returns false and leaves the ball untouched while the interval is running.
pub fn finish_point_reset(state: &mut GameState) -> bool {
    if state.phase_frames < state.tuning.timing.point_reset_frames {
        return false;
    }

    state
        .ball
        .randomize_serve_y(&mut state.rng, &state.tuning.ball.serve_y_table);
    state.ball.vel = state.ball.direction;
    state.ball.reset_modifiers(&state.tuning);
    state.computer.reset_flags();
    state.human.reset_flags();
    true
}

/// Whether blinking elements are in their visible half-period
pub fn blink_visible(state: &GameState) -> bool {
    let period = state.tuning.timing.blink_period.max(1);
    let counter = match state.phase {
        GamePhase::Title if state.title_started => state.blink_frames,
        _ => state.phase_frames,
    };
    (counter / period) % 2 == 0
}
