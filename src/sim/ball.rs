//! Ball physics
//!
//! Integration, wall bounces and the paddle contact response (speed-up,
//! touch scoring, smash resolution, corner hits and the bounce angle).
//!
//! Contacts are not debounced: a ball that still overlaps a paddle on the
//! next frame is resolved again, scoring and speeding up a second time.

use glam::Vec2;

use super::collision::{Wall, bounce_off_wall, circle_rect_overlap, wall_contact};
use super::rng::RandomSource;
use super::state::{Ball, GameEvent, Paddle, Side};
use crate::tuning::{CourtTuning, SMASH_RED, Tuning};

/// Advance one frame: move, bounce off walls, then resolve paddle contacts
pub fn update<R: RandomSource + ?Sized>(
    ball: &mut Ball,
    computer: &mut Paddle,
    human: &mut Paddle,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
    dt: f32,
) {
    integrate(ball, dt);
    bounce_walls(ball, &tuning.court, events);
    collide_paddles(ball, computer, human, tuning, rng, events);
}

/// Move the ball by its velocity scaled by speed and both multipliers
pub fn integrate(ball: &mut Ball, dt: f32) {
    ball.clamp_speed();
    let scale = dt * ball.speed * ball.smash_speed * ball.corner_speed;
    ball.pos.x += ball.vel.x * scale;
    ball.pos.y += ball.vel.y * scale;
}

/// Reflect off the top or bottom wall. Returns true on contact.
pub fn bounce_walls(ball: &mut Ball, court: &CourtTuning, events: &mut Vec<GameEvent>) -> bool {
    let Some(wall) = wall_contact(ball.pos, ball.radius, court) else {
        return false;
    };

    ball.vel = bounce_off_wall(ball.vel, wall);
    ball.pos.y = match wall {
        Wall::Top => wall.face_y(court) + ball.radius,
        Wall::Bottom => wall.face_y(court) - ball.radius,
    };
    events.push(GameEvent::WallHit);
    true
}

/// Check both paddles, left first
pub fn collide_paddles<R: RandomSource + ?Sized>(
    ball: &mut Ball,
    computer: &mut Paddle,
    human: &mut Paddle,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if circle_rect_overlap(ball.pos, ball.radius, &computer.rect()) {
        resolve_paddle_hit(ball, computer, human, tuning, rng, events);
    }
    if circle_rect_overlap(ball.pos, ball.radius, &human.rect()) {
        resolve_paddle_hit(ball, human, computer, tuning, rng, events);
    }
}

/// Response to the ball touching `hitter`
pub fn resolve_paddle_hit<R: RandomSource + ?Sized>(
    ball: &mut Ball,
    hitter: &mut Paddle,
    other: &mut Paddle,
    tuning: &Tuning,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let bt = &tuning.ball;
    let pt = &tuning.paddle;

    ball.speed *= bt.speed_up;
    ball.clamp_speed();

    // Judged against the face before knockback moves it
    let clipped = past_face(ball, hitter);

    if !hitter.corner_hit {
        hitter.add_score(pt.touch_points, pt.max_score);
        hitter.pos.x += hitter.side.goal_dir() * pt.knockback;
    }

    // Order matters: the roll is only spent when the opponent isn't smashing
    if !other.smash && wants_smash(hitter, rng) {
        hitter.smash = true;
        let angle = rng.angle_degrees(bt.smash_angle_min, bt.smash_angle_max);
        ball.smash_speed = 1.0 + angle.to_radians().sin();
        ball.color = SMASH_RED;
        log::debug!("{:?} smash at {angle} deg", hitter.side);
        events.push(GameEvent::Smash { side: hitter.side });
    } else if other.smash {
        hitter.add_score(pt.smash_return_bonus, pt.max_score);
        let angle = rng.angle_degrees(bt.return_angle_min, bt.return_angle_max);
        ball.smash_speed = 1.0 + angle.to_radians().sin();
        ball.color = bt.color;
        other.smash = false;
        log::debug!("{:?} returned the smash at {angle} deg", hitter.side);
        events.push(GameEvent::SmashReturn { side: hitter.side });
    } else {
        ball.smash_speed = 1.0;
        ball.color = bt.color;
    }
    hitter.smash_armed = false;

    if clipped {
        hitter.corner_hit = true;
        hitter.vel = Vec2::ZERO;
        let y_dir = if ball.pos.y < hitter.center_y() { -1.0 } else { 1.0 };
        // The ball is already behind the face, so it keeps heading for the
        // hitter's goal; the edge only deflects it steeply toward a wall
        ball.vel = Vec2::new(hitter.side.goal_dir() * bt.corner_vx, y_dir * bt.corner_vy);
        ball.corner_speed = bt.corner_boost;
        log::debug!("{:?} corner hit", hitter.side);
        events.push(GameEvent::CornerHit { side: hitter.side });
    } else {
        ball.vel = bounce_direction(ball.pos.y, hitter, bt.bounce_angle);
    }

    events.push(GameEvent::PaddleHit { side: hitter.side });
}

/// AI paddles roll for it, humans must have armed it
fn wants_smash<R: RandomSource + ?Sized>(hitter: &Paddle, rng: &mut R) -> bool {
    if hitter.enable_ai {
        rng.smash_roll()
    } else {
        hitter.smash_armed
    }
}

/// Ball center already behind the paddle face (edge clip)
fn past_face(ball: &Ball, paddle: &Paddle) -> bool {
    match paddle.side {
        Side::Left => ball.pos.x < paddle.face_x(),
        Side::Right => ball.pos.x > paddle.face_x(),
    }
}

/// Unit direction off the paddle face; contact offset maps linearly to ±max_angle
pub fn bounce_direction(ball_y: f32, paddle: &Paddle, max_angle: f32) -> Vec2 {
    let offset = (paddle.center_y() - ball_y) / (paddle.height / 2.0);
    let angle = (offset * max_angle).to_radians();
    let away = -paddle.side.goal_dir();
    Vec2::new(away * angle.cos(), -angle.sin())
}
