//! Data-driven game balance
//!
//! Every magic number of the simulation lives here, grouped by subsystem.
//! Tests override single fields; hosts may load a JSON file on top of the
//! defaults (missing fields keep their default value).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// RGBA color packed as 0xRRGGBBAA
pub type Color = u32;

pub const WHITE: Color = 0xffff_ffff;
/// Score text green
pub const SCORE_GREEN: Color = 0xa0ff_9dff;
/// Smashing paddle / ball tint
pub const SMASH_RED: Color = 0xff00_4dff;
/// Helper ghost tint
pub const GHOST_GREY: Color = 0x5f57_4fff;

/// Court geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtTuning {
    pub width: f32,
    pub height: f32,
    /// Thickness of the top and bottom walls
    pub wall_thickness: f32,
    /// Extra gap kept between a paddle and the wall
    pub paddle_margin: f32,
    /// Baseline of the score text
    pub score_y: f32,
    /// Horizontal gap between the middle line and a score
    pub score_gap: f32,
    /// Approximate width of a rendered score ("X 0000")
    pub score_width: f32,
}

impl Default for CourtTuning {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 360.0,
            wall_thickness: 18.0,
            paddle_margin: 4.0,
            score_y: 28.0,
            score_gap: 12.0,
            score_width: 108.0,
        }
    }
}

/// Ball physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    pub radius: f32,
    /// Speed after every serve (pixels/second per unit of direction)
    pub base_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Multiplicative speed gain per paddle contact
    pub speed_up: f32,
    /// Horizontal component of the corner-hit escape velocity
    pub corner_vx: f32,
    /// Vertical component of the corner-hit escape velocity
    pub corner_vy: f32,
    /// Speed multiplier applied after a corner hit
    pub corner_boost: f32,
    /// Largest bounce angle off the paddle face (degrees)
    pub bounce_angle: f32,
    /// Smash angle range (degrees)
    pub smash_angle_min: i32,
    pub smash_angle_max: i32,
    /// Smash-return angle range (degrees)
    pub return_angle_min: i32,
    pub return_angle_max: i32,
    /// Serve vertical components in tenths, one picked per serve
    pub serve_y_table: Vec<i32>,
    pub color: Color,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            radius: 10.0,
            base_speed: 360.0,
            min_speed: 300.0,
            max_speed: 960.0,
            speed_up: 1.03,
            corner_vx: 0.35,
            corner_vy: 0.6,
            corner_boost: 1.6,
            bounce_angle: 45.0,
            smash_angle_min: 30,
            smash_angle_max: 60,
            return_angle_min: 10,
            return_angle_max: 30,
            serve_y_table: vec![-6, -5, -4, 4, 5, 6],
            color: WHITE,
        }
    }
}

/// Paddle control and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleTuning {
    pub width: f32,
    pub height: f32,
    /// Distance between the paddle's outer side and the court edge
    pub inset: f32,
    /// Pixels per second at normalized velocity 1.0
    pub speed: f32,
    /// Normalized velocity cap
    pub max_speed: f32,
    /// Lerp factor toward full speed while a direction key is held
    pub input_lerp: f32,
    /// Lerp factor toward zero while brake is held
    pub brake_lerp: f32,
    /// Per-frame velocity damping
    pub damping: f32,
    /// Per-frame pull back toward the home x
    pub home_lerp: f32,
    /// Pull toward the home position during a point reset
    pub reset_lerp: f32,
    /// Horizontal nudge on contact
    pub knockback: f32,
    /// Horizontal offset of the helper ghost
    pub helper_offset: f32,
    /// Smoothing of the helper ghost
    pub helper_lerp: f32,
    /// Points for touching the ball
    pub touch_points: u32,
    /// Bonus for returning a smash
    pub smash_return_bonus: u32,
    /// Points for putting the ball past the opponent
    pub point_score: u32,
    pub max_score: u32,
    pub human_color: Color,
    pub computer_color: Color,
}

impl Default for PaddleTuning {
    fn default() -> Self {
        Self {
            width: 26.0,
            height: 80.0,
            inset: 22.0,
            speed: 600.0,
            max_speed: 1.0,
            input_lerp: 0.5,
            brake_lerp: 0.35,
            damping: 0.2,
            home_lerp: 0.2,
            reset_lerp: 0.1,
            knockback: 8.0,
            helper_offset: 4.0,
            helper_lerp: 0.3,
            touch_points: 1,
            smash_return_bonus: 3,
            point_score: 10,
            max_score: 9999,
            human_color: WHITE,
            computer_color: WHITE,
        }
    }
}

/// Phase timers, counted in frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingTuning {
    pub logo_frames: u32,
    pub title_blink_frames: u32,
    /// Frames per on/off half of any blink
    pub blink_period: u32,
    pub countdown_from: u32,
    pub countdown_step_frames: u32,
    pub point_reset_frames: u32,
    /// Longest frame time fed to the simulation (seconds)
    pub max_frame_time: f32,
}

impl Default for TimingTuning {
    fn default() -> Self {
        Self {
            logo_frames: 180,
            title_blink_frames: 60,
            blink_period: 8,
            countdown_from: 3,
            countdown_step_frames: 60,
            point_reset_frames: 90,
            max_frame_time: 0.1,
        }
    }
}

/// All gameplay constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub court: CourtTuning,
    pub ball: BallTuning,
    pub paddle: PaddleTuning,
    pub timing: TimingTuning,
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let court = &self.court;
        if court.width <= 0.0 || court.height <= 0.0 {
            return Err(ConfigError::invalid("court", "width and height must be positive"));
        }
        let playable = court.height - 2.0 * (court.wall_thickness + court.paddle_margin);
        if self.paddle.height <= 0.0 || self.paddle.height > playable {
            return Err(ConfigError::invalid(
                "paddle.height",
                format!("must be in (0, {playable}]"),
            ));
        }

        let ball = &self.ball;
        if ball.radius <= 0.0 {
            return Err(ConfigError::invalid("ball.radius", "must be positive"));
        }
        if ball.min_speed <= 0.0 || ball.min_speed > ball.max_speed {
            return Err(ConfigError::invalid(
                "ball.min_speed",
                "must be positive and not above max_speed",
            ));
        }
        if ball.smash_angle_min > ball.smash_angle_max {
            return Err(ConfigError::invalid("ball.smash_angle_min", "range is inverted"));
        }
        if ball.return_angle_min > ball.return_angle_max {
            return Err(ConfigError::invalid("ball.return_angle_min", "range is inverted"));
        }
        if ball.serve_y_table.is_empty() {
            return Err(ConfigError::invalid("ball.serve_y_table", "must not be empty"));
        }

        if self.paddle.max_speed <= 0.0 {
            return Err(ConfigError::invalid("paddle.max_speed", "must be positive"));
        }
        if self.timing.countdown_step_frames == 0 || self.timing.blink_period == 0 {
            return Err(ConfigError::invalid("timing", "frame intervals must be non-zero"));
        }
        if self.timing.max_frame_time <= 0.0 {
            return Err(ConfigError::invalid("timing.max_frame_time", "must be positive"));
        }
        Ok(())
    }

    /// Lowest y a paddle's top edge may reach
    pub fn paddle_min_y(&self) -> f32 {
        self.court.wall_thickness + self.court.paddle_margin
    }

    /// Highest y a paddle's top edge may reach
    pub fn paddle_max_y(&self) -> f32 {
        self.court.height - self.paddle.height - self.court.wall_thickness - self.court.paddle_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "ball": { "speed_up": 1.1 } }"#).unwrap();
        assert_eq!(tuning.ball.speed_up, 1.1);
        assert_eq!(tuning.ball.radius, BallTuning::default().radius);
        assert_eq!(tuning.court, CourtTuning::default());
    }

    #[test]
    fn test_inverted_speed_range_rejected() {
        let err = Tuning::from_json(r#"{ "ball": { "min_speed": 1000.0, "max_speed": 500.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ball.min_speed", .. }));
    }

    #[test]
    fn test_empty_serve_table_rejected() {
        let err = Tuning::from_json(r#"{ "ball": { "serve_y_table": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ball.serve_y_table", .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_paddle_bounds() {
        let tuning = Tuning::default();
        assert_eq!(tuning.paddle_min_y(), 22.0);
        assert_eq!(tuning.paddle_max_y(), 360.0 - 80.0 - 22.0);
    }
}
