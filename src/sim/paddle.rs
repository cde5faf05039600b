//! Paddle controller
//!
//! Human paddles steer from input or, when toggled, share the computer's
//! tracking law. Every paddle then runs the same tail: damping, pull back to
//! the home x, integration, clamping and the helper ghost.

use glam::Vec2;

use super::state::{Ball, GameEvent, Paddle, Side, home_y};
use super::tick::TickInput;
use crate::tuning::{PaddleTuning, Tuning};
use crate::{lerp, lerp_vec};

/// Keyboard (or AI when toggled) paddle
pub fn update_human(
    paddle: &mut Paddle,
    input: &TickInput,
    ai_status: &mut bool,
    ball: &Ball,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
    dt: f32,
) {
    handle_ai_toggle(paddle, input.toggle_ai, ai_status, events);

    if input.smash && !paddle.smash && !paddle.corner_hit {
        paddle.smash_armed = true;
    }

    if paddle.corner_hit {
        paddle.vel = Vec2::ZERO;
    } else if paddle.enable_ai {
        paddle.vel.y = ai_velocity(paddle, ball, tuning.court.width);
    } else {
        steer(paddle, input, &tuning.paddle);
    }

    apply_motion(paddle, tuning, dt);
}

/// Always-AI paddle
pub fn update_computer(paddle: &mut Paddle, ball: &Ball, tuning: &Tuning, dt: f32) {
    if paddle.corner_hit {
        paddle.vel = Vec2::ZERO;
    } else {
        paddle.vel.y = ai_velocity(paddle, ball, tuning.court.width);
    }

    apply_motion(paddle, tuning, dt);
}

/// Desired normalized vertical velocity for an AI paddle
///
/// Engages only while the ball heads toward this paddle's half and is still
/// inside it. The wanted velocity closes the gap between paddle center and
/// ball in the time the ball needs to reach the paddle face, capped at
/// `max_speed`.
pub fn ai_velocity(paddle: &Paddle, ball: &Ball, court_width: f32) -> f32 {
    let mid = court_width / 2.0;
    let approaching = match paddle.side {
        Side::Left => ball.vel.x < 0.0 && ball.pos.x < mid,
        Side::Right => ball.vel.x > 0.0 && ball.pos.x > mid,
    };
    if !approaching {
        return 0.0;
    }

    let center = paddle.center_y();
    if ball.pos.y == center {
        return 0.0;
    }

    // vel.x is non-zero: its sign was checked above
    let time_to_collision = (paddle.face_x() - ball.pos.x) / ball.vel.x;
    let distance_wanted = center - ball.pos.y;
    let velocity_wanted = -distance_wanted / time_to_collision;
    velocity_wanted.clamp(-paddle.max_speed, paddle.max_speed)
}

/// Flip AI control once per key activation
fn handle_ai_toggle(
    paddle: &mut Paddle,
    held: bool,
    ai_status: &mut bool,
    events: &mut Vec<GameEvent>,
) {
    if !held {
        *ai_status = false;
        return;
    }
    if *ai_status {
        return;
    }

    paddle.enable_ai = !paddle.enable_ai;
    *ai_status = true;
    log::info!("{:?} paddle AI {}", paddle.side, if paddle.enable_ai { "on" } else { "off" });
    events.push(GameEvent::AiToggled {
        enabled: paddle.enable_ai,
    });
}

fn steer(paddle: &mut Paddle, input: &TickInput, pt: &PaddleTuning) {
    if input.up {
        paddle.vel.y = lerp(paddle.vel.y, -paddle.max_speed, pt.input_lerp);
    }
    if input.down {
        paddle.vel.y = lerp(paddle.vel.y, paddle.max_speed, pt.input_lerp);
    }
    if input.brake {
        paddle.vel.y = lerp(paddle.vel.y, 0.0, pt.brake_lerp);
    }
}

/// Shared tail: damping, home pull, integration, clamp, helper
fn apply_motion(paddle: &mut Paddle, tuning: &Tuning, dt: f32) {
    let pt = &tuning.paddle;
    paddle.vel.y = lerp(paddle.vel.y, 0.0, pt.damping);
    paddle.pos.x = lerp(paddle.pos.x, paddle.home_x, pt.home_lerp);
    paddle.pos.y += paddle.vel.y * paddle.speed * dt;
    paddle.pos.y = paddle.pos.y.clamp(tuning.paddle_min_y(), tuning.paddle_max_y());
    paddle.update_helper(pt.helper_offset, pt.helper_lerp);
}

/// Ease toward the serve position during a point reset
pub fn return_home(paddle: &mut Paddle, tuning: &Tuning) {
    let pt = &tuning.paddle;
    let home = Vec2::new(paddle.home_x, home_y(tuning));
    paddle.vel = Vec2::ZERO;
    paddle.pos = lerp_vec(paddle.pos, home, pt.reset_lerp);
    paddle.update_helper(pt.helper_offset, pt.helper_lerp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::sim::state::GameState;
    use proptest::prelude::*;

    fn human_step(state: &mut GameState, input: &TickInput) {
        let GameState {
            human,
            ai_status,
            ball,
            tuning,
            events,
            ..
        } = state;
        update_human(human, input, ai_status, ball, tuning, events, FRAME_DT);
    }

    #[test]
    fn test_ai_scenario_clamps_to_max_speed() {
        let mut state = GameState::new(1);
        state.computer.pos.y = 140.0;
        state.ball.pos = Vec2::new(148.0, 100.0);
        state.ball.vel = Vec2::new(-50.0, 0.0);

        // time = (48 - 148) / -50 = 2.0, wanted = -80 / 2.0 = -40
        let wanted = ai_velocity(&state.computer, &state.ball, 640.0);
        assert_eq!(wanted, -state.computer.max_speed);

        let y0 = state.computer.pos.y;
        update_computer(&mut state.computer, &state.ball, &state.tuning, FRAME_DT);
        assert!(state.computer.pos.y < y0);
        assert!(state.computer.vel.y.abs() <= state.computer.max_speed);
        assert!(state.computer.pos.y >= state.tuning.paddle_min_y());
    }

    #[test]
    fn test_ai_proportional_inside_cap() {
        let mut state = GameState::new(1);
        state.ball.pos = Vec2::new(148.0, 179.0);
        state.ball.vel = Vec2::new(-50.0, 0.0);
        let wanted = ai_velocity(&state.computer, &state.ball, 640.0);
        assert!((wanted + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ai_idle_when_ball_leaves_or_aligned() {
        let mut state = GameState::new(1);
        // Moving away from the computer
        state.ball.pos = Vec2::new(200.0, 100.0);
        state.ball.vel = Vec2::new(1.0, 0.0);
        assert_eq!(ai_velocity(&state.computer, &state.ball, 640.0), 0.0);

        // Approaching but still on the human half
        state.ball.pos = Vec2::new(400.0, 100.0);
        state.ball.vel = Vec2::new(-1.0, 0.0);
        assert_eq!(ai_velocity(&state.computer, &state.ball, 640.0), 0.0);

        // Aligned with the paddle center
        state.ball.pos = Vec2::new(200.0, 180.0);
        assert_eq!(ai_velocity(&state.computer, &state.ball, 640.0), 0.0);

        // Stationary ball never divides by zero
        state.ball.vel = Vec2::ZERO;
        state.ball.pos = Vec2::new(100.0, 50.0);
        assert_eq!(ai_velocity(&state.computer, &state.ball, 640.0), 0.0);
    }

    #[test]
    fn test_human_up_key_moves_up() {
        let mut state = GameState::new(1);
        let input = TickInput {
            up: true,
            ..Default::default()
        };
        human_step(&mut state, &input);
        assert!(state.human.vel.y < 0.0);
        assert!(state.human.pos.y < 140.0);
    }

    #[test]
    fn test_brake_slows_faster_than_damping() {
        let mut a = GameState::new(1);
        let mut b = GameState::new(1);
        a.human.vel.y = 1.0;
        b.human.vel.y = 1.0;
        human_step(&mut a, &TickInput::default());
        human_step(
            &mut b,
            &TickInput {
                brake: true,
                ..Default::default()
            },
        );
        assert!(b.human.vel.y < a.human.vel.y);
    }

    #[test]
    fn test_toggle_fires_once_per_hold() {
        let mut state = GameState::new(1);
        let hold = TickInput {
            toggle_ai: true,
            ..Default::default()
        };
        human_step(&mut state, &hold);
        assert!(state.human.enable_ai);
        assert!(state.ai_status);

        human_step(&mut state, &hold);
        human_step(&mut state, &hold);
        assert!(state.human.enable_ai);

        human_step(&mut state, &TickInput::default());
        assert!(!state.ai_status);
        human_step(&mut state, &hold);
        assert!(!state.human.enable_ai);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::AiToggled { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_corner_lock_freezes_paddle() {
        let mut state = GameState::new(1);
        state.human.corner_hit = true;
        state.human.vel.y = 0.9;
        let input = TickInput {
            down: true,
            smash: true,
            ..Default::default()
        };
        human_step(&mut state, &input);
        assert_eq!(state.human.vel, Vec2::ZERO);
        assert_eq!(state.human.pos.y, 140.0);
        assert!(!state.human.smash_armed);
    }

    #[test]
    fn test_smash_key_arms_once() {
        let mut state = GameState::new(1);
        let input = TickInput {
            smash: true,
            ..Default::default()
        };
        human_step(&mut state, &input);
        assert!(state.human.smash_armed);

        let mut smashing = GameState::new(1);
        smashing.human.smash = true;
        human_step(&mut smashing, &input);
        assert!(!smashing.human.smash_armed);
    }

    #[test]
    fn test_knockback_pulled_home() {
        let mut state = GameState::new(1);
        state.computer.pos.x -= 8.0;
        for _ in 0..60 {
            update_computer(&mut state.computer, &state.ball, &state.tuning, FRAME_DT);
        }
        assert!((state.computer.pos.x - state.computer.home_x).abs() < 0.01);
    }

    #[test]
    fn test_return_home_converges() {
        let mut state = GameState::new(1);
        state.human.pos = Vec2::new(600.0, 30.0);
        for _ in 0..120 {
            return_home(&mut state.human, &state.tuning);
        }
        assert!((state.human.pos.y - 140.0).abs() < 0.1);
        assert!((state.human.pos.x - 592.0).abs() < 0.1);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_court(
            steps in prop::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..0.1), 1..200)
        ) {
            let mut state = GameState::new(5);
            for (up, down, dt) in steps {
                let input = TickInput { up, down, ..Default::default() };
                let GameState { human, ai_status, ball, tuning, events, .. } = &mut state;
                update_human(human, &input, ai_status, ball, tuning, events, dt);
                prop_assert!(state.human.pos.y >= state.tuning.paddle_min_y());
                prop_assert!(state.human.pos.y <= state.tuning.paddle_max_y());
            }
        }

        #[test]
        fn prop_computer_paddle_stays_in_court(
            steps in prop::collection::vec(
                (0.0f32..640.0, 0.0f32..360.0, -3.0f32..3.0, -3.0f32..3.0, 0.0f32..0.1),
                1..200,
            )
        ) {
            let mut state = GameState::new(5);
            for (bx, by, vx, vy, dt) in steps {
                state.ball.pos = Vec2::new(bx, by);
                state.ball.vel = Vec2::new(vx, vy);
                update_computer(&mut state.computer, &state.ball, &state.tuning, dt);
                prop_assert!(state.computer.pos.y >= state.tuning.paddle_min_y());
                prop_assert!(state.computer.pos.y <= state.tuning.paddle_max_y());
            }
        }

        #[test]
        fn prop_ai_velocity_is_capped(
            bx in 0.0f32..640.0,
            by in 0.0f32..360.0,
            vx in -5.0f32..5.0,
        ) {
            let mut state = GameState::new(5);
            state.ball.pos = Vec2::new(bx, by);
            state.ball.vel = Vec2::new(vx, 0.3);
            let left = ai_velocity(&state.computer, &state.ball, 640.0);
            let right = ai_velocity(&state.human, &state.ball, 640.0);
            prop_assert!(left.abs() <= state.computer.max_speed);
            prop_assert!(right.abs() <= state.human.max_speed);
        }
    }
}
