//! Windowless host
//!
//! Replays a script of key events at fixed frame time. Used by the native
//! binary and by tests.

use std::collections::BTreeMap;

use super::Host;
use crate::audio::SoundEffect;
use crate::consts::FRAME_DT;
use crate::input::{KeyBindings, KeyState};
use crate::sim::{Snapshot, TickInput};

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyEvent {
    Down(String),
    Up(String),
}

#[derive(Debug, Clone)]
pub struct HeadlessHost {
    bindings: KeyBindings,
    keys: KeyState,
    script: BTreeMap<u64, Vec<KeyEvent>>,
    frame: u64,
    max_frames: u64,
    dt: f32,
    sounds: BTreeMap<SoundEffect, u32>,
    last_snapshot: Option<Snapshot>,
}

impl HeadlessHost {
    pub fn new(bindings: KeyBindings, max_frames: u64) -> Self {
        Self {
            bindings,
            keys: KeyState::new(),
            script: BTreeMap::new(),
            frame: 0,
            max_frames,
            dt: FRAME_DT,
            sounds: BTreeMap::new(),
            last_snapshot: None,
        }
    }

    pub fn with_frame_time(mut self, dt: f32) -> Self {
        self.dt = dt;
        self
    }

    /// Key down on `frame`, up on the next one
    pub fn press(&mut self, frame: u64, code: &str) {
        self.push(frame, KeyEvent::Down(code.to_string()));
        self.push(frame + 1, KeyEvent::Up(code.to_string()));
    }

    /// Key down from `frame` on
    pub fn hold(&mut self, frame: u64, code: &str) {
        self.push(frame, KeyEvent::Down(code.to_string()));
    }

    pub fn release(&mut self, frame: u64, code: &str) {
        self.push(frame, KeyEvent::Up(code.to_string()));
    }

    fn push(&mut self, frame: u64, event: KeyEvent) {
        self.script.entry(frame).or_default().push(event);
    }

    pub fn sound_count(&self, effect: SoundEffect) -> u32 {
        self.sounds.get(&effect).copied().unwrap_or(0)
    }

    pub fn total_sounds(&self) -> u32 {
        self.sounds.values().sum()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frame
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }
}

impl Host for HeadlessHost {
    fn poll_input(&mut self) -> TickInput {
        if let Some(events) = self.script.remove(&self.frame) {
            for event in events {
                match event {
                    KeyEvent::Down(code) => self.keys.key_down(&self.bindings, &code),
                    KeyEvent::Up(code) => self.keys.key_up(&self.bindings, &code),
                }
            }
        }
        self.keys.take_input()
    }

    fn frame_time(&mut self) -> f32 {
        self.dt
    }

    fn play(&mut self, effect: SoundEffect) {
        *self.sounds.entry(effect).or_insert(0) += 1;
    }

    fn present(&mut self, snapshot: &Snapshot) {
        self.last_snapshot = Some(snapshot.clone());
        self.frame += 1;
    }

    fn should_close(&self) -> bool {
        self.frame >= self.max_frames
    }
}
