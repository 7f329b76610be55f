use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => {
                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some((*x, *y));
                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
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

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    fn click(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
        })
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn press_is_an_edge_only_once() {
        let mut st = InputState::default();
        let mut frame = InputFrame::default();

        st.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        assert!(frame.key_pressed(Key::Space));
        assert!(st.key_down(Key::Space));

        frame.clear();
        // Key repeat while held is not a new press.
        st.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        assert!(!frame.key_pressed(Key::Space));
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn release_of_unheld_key_is_ignored() {
        let mut st = InputState::default();
        let mut frame = InputFrame::default();
        st.apply_event(&mut frame, key(Key::C, KeyState::Released));
        assert!(frame.keys_released.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_input() {
        let mut st = InputState::default();
        let mut frame = InputFrame::default();
        st.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));
        st.apply_event(&mut frame, click(MouseButtonState::Pressed, 1.0, 2.0));
        st.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(st.keys_down.is_empty());
        assert!(st.buttons_down.is_empty());
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn click_updates_pointer_and_edges() {
        let mut st = InputState::default();
        let mut frame = InputFrame::default();

        st.apply_event(&mut frame, click(MouseButtonState::Pressed, 40.0, 30.0));
        assert_eq!(st.pointer_pos, Some((40.0, 30.0)));
        assert!(frame.button_pressed(MouseButton::Left));

        frame.clear();
        st.apply_event(&mut frame, click(MouseButtonState::Released, 40.0, 30.0));
        assert!(frame.buttons_released.contains(&MouseButton::Left));
        assert!(!st.button_down(MouseButton::Left));
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut st = InputState::default();
        let mut frame = InputFrame::default();
        st.apply_event(&mut frame, InputEvent::PointerMoved(PointerMoveEvent { x: 5.0, y: 6.0 }));
        st.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(st.pointer_pos, None);
    }
}
