//! Platform abstraction layer
//!
//! A `Host` supplies input and frame time and receives sounds and the frame
//! snapshot. `Game` owns the simulation and drives one host frame at a time.

pub mod headless;

pub use headless::HeadlessHost;

use crate::audio::SoundEffect;
use crate::settings::Settings;
use crate::sim::{GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Everything the game needs from the outside world
pub trait Host {
    /// Logical input for the coming frame
    fn poll_input(&mut self) -> TickInput;
    /// Seconds since the previous frame
    fn frame_time(&mut self) -> f32;
    fn play(&mut self, effect: SoundEffect);
    fn present(&mut self, snapshot: &Snapshot);
    fn should_close(&self) -> bool;
}

/// A running match plus host preferences
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
}

impl Game {
    pub fn new(settings: Settings, tuning: Tuning, seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        log::info!("New game (seed {seed})");
        Self {
            state: GameState::with_tuning(tuning, seed),
            settings,
        }
    }

    /// Input, tick, sounds, present
    pub fn frame(&mut self, host: &mut dyn Host) {
        let input = host.poll_input();
        let dt = host.frame_time();
        tick(&mut self.state, &input, dt);

        for event in &self.state.events {
            if let Some(effect) = SoundEffect::for_event(event) {
                log::debug!("Sound {}", effect.name());
                host.play(effect);
            }
        }

        host.present(&Snapshot::capture(&self.state));
    }

    /// Run frames until the host asks to stop; returns the frame count
    pub fn run(&mut self, host: &mut dyn Host) -> u64 {
        let mut frames = 0;
        while !host.should_close() {
            self.frame(host);
            frames += 1;
        }
        log::info!(
            "Stopped after {frames} frames: computer {:04} - human {:04}",
            self.state.computer.score,
            self.state.human.score
        );
        frames
    }
}
