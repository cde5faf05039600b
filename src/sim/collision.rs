//! Collision geometry for a flat court
//!
//! Circle-vs-rectangle overlap for ball/paddle contact and the two horizontal
//! walls. Response (angles, speed, scoring) lives in `ball`.

use glam::Vec2;
use serde::Serialize;

use crate::reflect;
use crate::tuning::CourtTuning;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos(pos: Vec2, w: f32, h: f32) -> Self {
        Self::new(pos.x, pos.y, w, h)
    }

    /// Closest point of the rectangle to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.x, self.x + self.w),
            p.y.clamp(self.y, self.y + self.h),
        )
    }
}

/// Whether a circle touches or overlaps a rectangle
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.distance_squared(rect.closest_point(center)) <= radius * radius
}

/// One of the two horizontal walls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

impl Wall {
    /// Unit normal pointing into the court
    pub fn normal(self) -> Vec2 {
        match self {
            Wall::Top => Vec2::Y,
            Wall::Bottom => Vec2::NEG_Y,
        }
    }

    /// y of the wall's inner face
    pub fn face_y(self, court: &CourtTuning) -> f32 {
        match self {
            Wall::Top => court.wall_thickness,
            Wall::Bottom => court.height - court.wall_thickness,
        }
    }
}

/// Wall the ball is touching, if any
pub fn wall_contact(pos: Vec2, radius: f32, court: &CourtTuning) -> Option<Wall> {
    if pos.y - radius <= Wall::Top.face_y(court) {
        Some(Wall::Top)
    } else if pos.y + radius >= Wall::Bottom.face_y(court) {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Reflect a velocity off a wall and force it back into the court
///
/// The reflection alone keeps the y sign ambiguous when the ball arrives
/// already heading inward (e.g. after a corner hit), so the sign is pinned.
pub fn bounce_off_wall(velocity: Vec2, wall: Wall) -> Vec2 {
    let mut v = reflect(velocity, wall.normal());
    v.y = match wall {
        Wall::Top => v.y.abs(),
        Wall::Bottom => -v.y.abs(),
    };
    v
}
