//! Pico Pong - a single-screen Pong clone
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, paddles, match flow)
//! - `platform`: Frame driver and host abstraction
//! - `input`: Logical actions and key bindings
//! - `audio`: Sound effect mapping (Web Audio on wasm32)
//! - `tuning`: Data-driven game balance
//! - `settings`: Host preferences and resource paths

pub mod audio;
pub mod error;
pub mod input;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::ConfigError;
pub use platform::{Game, Host};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Frame driver constants
pub mod consts {
    /// Display refresh the hosts aim for
    pub const TARGET_FPS: u32 = 60;
    /// Nominal frame time at the target refresh
    pub const FRAME_DT: f32 = 1.0 / TARGET_FPS as f32;
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_vec(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Reflect a vector about a unit normal: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - 2.0 * v.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert!((lerp(0.0, 1.0, 0.2) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_horizontal_wall() {
        let v = Vec2::new(0.7, -0.4);
        let r = reflect(v, Vec2::Y);
        assert!((r.x - 0.7).abs() < 1e-6);
        assert!((r.y - 0.4).abs() < 1e-6);
    }
}
