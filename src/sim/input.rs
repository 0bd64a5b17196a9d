//! Source-agnostic player input
//!
//! Keyboard, touch buttons and swipe gestures all normalise to `InputEvent`
//! before reaching the core. Held actions are buffered into `InputState`,
//! which the simulation reads once at the top of each tick.

use serde::{Deserialize, Serialize};

/// Discrete input edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Move-left pressed (`true`) or released (`false`)
    MoveLeft(bool),
    /// Move-right pressed or released
    MoveRight(bool),
    /// Fire pressed or released
    Fire(bool),
    /// Flip sound on/off (pulse)
    ToggleSound,
    /// Start or restart a game (pulse, only honoured when no game is active)
    Restart,
}

/// Currently held actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    /// Fold an edge event into the held state.
    ///
    /// Pulse events carry no held state and leave it untouched.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::MoveLeft(held) => self.left = held,
            InputEvent::MoveRight(held) => self.right = held,
            InputEvent::Fire(held) => self.fire = held,
            InputEvent::ToggleSound | InputEvent::Restart => {}
        }
    }

    /// Release everything (focus loss, game over)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut input = InputState::default();
        input.apply(InputEvent::MoveLeft(true));
        input.apply(InputEvent::Fire(true));
        assert!(input.left);
        assert!(input.fire);
        assert!(!input.right);

        input.apply(InputEvent::MoveLeft(false));
        assert!(!input.left);
        assert!(input.fire);
    }

    #[test]
    fn test_pulses_do_not_touch_held_keys() {
        let mut input = InputState {
            left: false,
            right: true,
            fire: true,
        };
        let before = input;
        input.apply(InputEvent::ToggleSound);
        input.apply(InputEvent::Restart);
        assert_eq!(input, before);

        input.clear();
        assert_eq!(input, InputState::default());
    }
}
