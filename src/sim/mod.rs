//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only
//! - One explicit `GameState` passed into `tick`, no globals
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod collision;
pub mod paddle;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, Wall, circle_rect_overlap};
pub use rng::{RandomSource, SimRng};
pub use snapshot::{BallView, PaddleView, Snapshot};
pub use state::{Ball, Board, GameEvent, GamePhase, GameState, Helper, Paddle, Side};
pub use tick::{TickInput, blink_visible, tick};
