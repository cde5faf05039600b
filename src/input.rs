//! Logical actions and key bindings
//!
//! Hosts feed raw key codes (browser `KeyboardEvent.code` names) into a
//! `KeyState`; once per frame it turns into a `TickInput` with held and
//! just-pressed actions.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Everything the player can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    Brake,
    Smash,
    ToggleAi,
    SkipIntro,
    Start,
}

const ACTION_COUNT: usize = 7;

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::Brake,
        Action::Smash,
        Action::ToggleAi,
        Action::SkipIntro,
        Action::Start,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Key codes per action; one code may drive several actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub brake: Vec<String>,
    pub smash: Vec<String>,
    pub toggle_ai: Vec<String>,
    pub skip_intro: Vec<String>,
    pub start: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        fn keys(codes: &[&str]) -> Vec<String> {
            codes.iter().map(|c| c.to_string()).collect()
        }
        Self {
            move_up: keys(&["ArrowUp", "KeyW"]),
            move_down: keys(&["ArrowDown", "KeyS"]),
            brake: keys(&["ShiftLeft", "ShiftRight"]),
            smash: keys(&["Space"]),
            toggle_ai: keys(&["KeyA"]),
            skip_intro: keys(&["Enter", "Escape"]),
            start: keys(&["Enter", "Space"]),
        }
    }
}

impl KeyBindings {
    pub fn codes(&self, action: Action) -> &[String] {
        match action {
            Action::MoveUp => &self.move_up,
            Action::MoveDown => &self.move_down,
            Action::Brake => &self.brake,
            Action::Smash => &self.smash,
            Action::ToggleAi => &self.toggle_ai,
            Action::SkipIntro => &self.skip_intro,
            Action::Start => &self.start,
        }
    }

    /// Actions bound to a key code
    pub fn actions_for<'a>(&'a self, code: &'a str) -> impl Iterator<Item = Action> + 'a {
        Action::ALL
            .into_iter()
            .filter(move |action| self.codes(*action).iter().any(|c| c == code))
    }
}

/// Held/pressed tracking between two frames
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: [bool; ACTION_COUNT],
    pressed: [bool; ACTION_COUNT],
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, bindings: &KeyBindings, code: &str) {
        for action in bindings.actions_for(code) {
            let i = action.index();
            // Auto-repeat keeps `held` set and must not re-trigger
            if !self.held[i] {
                self.pressed[i] = true;
            }
            self.held[i] = true;
        }
    }

    pub fn key_up(&mut self, bindings: &KeyBindings, code: &str) {
        for action in bindings.actions_for(code) {
            self.held[action.index()] = false;
        }
    }

    /// Input for this frame; clears the just-pressed flags
    pub fn take_input(&mut self) -> TickInput {
        let held = |a: Action| self.held[a.index()];
        let pressed = |a: Action| self.pressed[a.index()];
        let input = TickInput {
            up: held(Action::MoveUp),
            down: held(Action::MoveDown),
            brake: held(Action::Brake),
            toggle_ai: held(Action::ToggleAi),
            smash: pressed(Action::Smash),
            skip: pressed(Action::SkipIntro),
            start: pressed(Action::Start),
        };
        self.pressed = [false; ACTION_COUNT];
        input
    }

    /// Drop everything (e.g. on focus loss)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_key_drives_two_actions() {
        let bindings = KeyBindings::default();
        let actions: Vec<_> = bindings.actions_for("Space").collect();
        assert_eq!(actions, vec![Action::Smash, Action::Start]);
    }

    #[test]
    fn test_pressed_is_edge_triggered() {
        let bindings = KeyBindings::default();
        let mut keys = KeyState::new();

        keys.key_down(&bindings, "Space");
        let first = keys.take_input();
        assert!(first.smash && first.start);

        // Auto-repeat while still held
        keys.key_down(&bindings, "Space");
        let second = keys.take_input();
        assert!(!second.smash && !second.start);

        keys.key_up(&bindings, "Space");
        keys.key_down(&bindings, "Space");
        assert!(keys.take_input().smash);
    }

    #[test]
    fn test_held_keys_persist_across_frames() {
        let bindings = KeyBindings::default();
        let mut keys = KeyState::new();
        keys.key_down(&bindings, "ArrowUp");
        assert!(keys.take_input().up);
        assert!(keys.take_input().up);
        keys.key_up(&bindings, "ArrowUp");
        assert!(!keys.take_input().up);
    }

    #[test]
    fn test_unknown_code_ignored() {
        let bindings = KeyBindings::default();
        let mut keys = KeyState::new();
        keys.key_down(&bindings, "F13");
        assert_eq!(keys.take_input(), TickInput::default());
    }

    #[test]
    fn test_bindings_from_json() {
        let bindings: KeyBindings = serde_json::from_str(r#"{ "smash": ["KeyX"] }"#).unwrap();
        assert_eq!(bindings.smash, vec!["KeyX".to_string()]);
        assert_eq!(bindings.move_up, KeyBindings::default().move_up);
    }
}
