use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, KeyState, MouseButton};

/// Current input state for the lesson window.
///
/// Holds "is down" information and the pointer position; transitions since
/// the last frame are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: &InputEvent) {
        match *ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Releases are not delivered to unfocused windows.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                if let Some((px, py)) = self.pointer_pos {
                    if self.button_down(MouseButton::Left) {
                        frame.drag.0 += x - px;
                        frame.drag.1 += y - py;
                    }
                }
                self.pointer_pos = Some((x, y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    self.buttons_down.insert(button);
                }
                ButtonState::Released => {
                    self.buttons_down.remove(&button);
                }
            },

            InputEvent::Wheel { delta_y } => {
                frame.wheel += delta_y;
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(key) && !repeat {
                        frame.keys_pressed.insert(key);
                    }
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton) -> InputEvent {
        InputEvent::PointerButton { button, state: ButtonState::Pressed }
    }

    #[test]
    fn drag_accumulates_only_while_left_button_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, &InputEvent::PointerMoved { x: 10.0, y: 10.0 });
        state.apply_event(&mut frame, &InputEvent::PointerMoved { x: 20.0, y: 10.0 });
        assert_eq!(frame.drag, (0.0, 0.0));

        state.apply_event(&mut frame, &press(MouseButton::Left));
        state.apply_event(&mut frame, &InputEvent::PointerMoved { x: 25.0, y: 4.0 });
        state.apply_event(&mut frame, &InputEvent::PointerMoved { x: 30.0, y: 2.0 });
        assert_eq!(frame.drag, (10.0, -8.0));
    }

    #[test]
    fn key_repeat_is_not_a_new_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        let down = |repeat| InputEvent::Key { key: Key::G, state: KeyState::Pressed, repeat };

        state.apply_event(&mut frame, &down(false));
        frame.clear();
        state.apply_event(&mut frame, &down(true));

        assert!(state.key_down(Key::G));
        assert!(frame.keys_pressed.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, &press(MouseButton::Left));
        state.apply_event(&mut frame, &InputEvent::Focused(false));
        assert!(!state.button_down(MouseButton::Left));
    }
}
