//! Platform abstraction layer
//!
//! Normalizes host keyboard input into [`InputEvent`]s and, on wasm32,
//! exposes the controller to a JavaScript host.

use crate::sim::InputEvent;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Map a DOM `KeyboardEvent.key` value to an input event
///
/// Held keys (movement, fire) produce events on both press and release.
/// Restart and sound toggle only fire on press.
pub fn input_for_key(key: &str, pressed: bool) -> Option<InputEvent> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(InputEvent::MoveLeft(pressed)),
        "ArrowRight" | "d" | "D" => Some(InputEvent::MoveRight(pressed)),
        " " | "Spacebar" => Some(InputEvent::Fire(pressed)),
        "Enter" if pressed => Some(InputEvent::Restart),
        "m" | "M" if pressed => Some(InputEvent::ToggleSound),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(input_for_key("ArrowLeft", true), Some(InputEvent::MoveLeft(true)));
        assert_eq!(input_for_key("a", false), Some(InputEvent::MoveLeft(false)));
        assert_eq!(input_for_key("D", true), Some(InputEvent::MoveRight(true)));
        assert_eq!(input_for_key(" ", false), Some(InputEvent::Fire(false)));
    }

    #[test]
    fn test_edge_keys_only_on_press() {
        assert_eq!(input_for_key("Enter", true), Some(InputEvent::Restart));
        assert_eq!(input_for_key("Enter", false), None);
        assert_eq!(input_for_key("m", true), Some(InputEvent::ToggleSound));
        assert_eq!(input_for_key("m", false), None);
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(input_for_key("Escape", true), None);
        assert_eq!(input_for_key("ArrowUp", true), None);
    }
}
