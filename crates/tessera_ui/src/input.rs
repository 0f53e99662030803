//! Input polling.
//!
//! The frame pump reads input through [`InputSource`]. [`InputState`] is a
//! host-fed implementation: the host records raw events into it, the pump
//! reads it once per frame, and the host calls [`InputState::begin_frame`]
//! before recording the next frame's events.

use std::collections::VecDeque;

use crate::geometry::Vec2;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

impl MouseButton {
    /// Buttons in the order the frame pump routes them.
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Middle];
}

/// Keyboard key.
///
/// Printable keys carry the glyph printed on the unshifted key, so letters
/// arrive uppercase and punctuation arrives in its unshifted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key.
    Char(char),
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

/// Input queries the frame pump makes once per frame.
pub trait InputSource {
    /// Takes the next key pressed this frame, if any.
    fn poll_key(&mut self) -> Option<Key>;

    /// True while `key` is held.
    fn is_key_down(&self, key: Key) -> bool;

    /// Current modifier state.
    fn modifiers(&self) -> Modifiers;

    /// Current pointer position in screen coordinates.
    fn pointer_position(&self) -> Vec2;

    /// True if `button` went down this frame.
    fn is_button_pressed(&self, button: MouseButton) -> bool;

    /// True while `button` is held.
    fn is_button_down(&self, button: MouseButton) -> bool;
}

/// Input state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    mouse: Vec2,
    buttons_pressed: u8,
    buttons_down: u8,
    /// Modifier keys state.
    pub modifiers: Modifiers,
    keys_pressed: VecDeque<Key>,
    keys_down: Vec<Key>,
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing the one-shot press state.
    pub fn begin_frame(&mut self) {
        self.buttons_pressed = 0;
        self.keys_pressed.clear();
    }

    /// Updates mouse position.
    pub fn set_mouse_pos(&mut self, x: f32, y: f32) {
        self.mouse = Vec2::new(x, y);
    }

    /// Records a mouse button press.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        let mask = Self::button_mask(button);
        self.buttons_pressed |= mask;
        self.buttons_down |= mask;
    }

    /// Records a mouse button release.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        self.buttons_down &= !Self::button_mask(button);
    }

    /// Records a key press. Repeats from the OS while the key is already
    /// down are ignored; the frame pump generates its own.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.push_back(key);
            self.keys_down.push(key);
        }
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: Key) {
        self.keys_down.retain(|&k| k != key);
    }

    const fn button_mask(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

impl InputSource for InputState {
    fn poll_key(&mut self) -> Option<Key> {
        self.keys_pressed.pop_front()
    }

    fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn pointer_position(&self) -> Vec2 {
        self.mouse
    }

    fn is_button_pressed(&self, button: MouseButton) -> bool {
        (self.buttons_pressed & Self::button_mask(button)) != 0
    }

    fn is_button_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_click() {
        let mut input = InputState::new();

        input.mouse_button_down(MouseButton::Left);
        assert!(input.is_button_pressed(MouseButton::Left));
        assert!(input.is_button_down(MouseButton::Left));
        assert!(!input.is_button_down(MouseButton::Right));

        input.begin_frame();
        assert!(!input.is_button_pressed(MouseButton::Left));
        assert!(input.is_button_down(MouseButton::Left));

        input.mouse_button_up(MouseButton::Left);
        assert!(!input.is_button_down(MouseButton::Left));
    }

    #[test]
    fn test_keys_queue_in_press_order() {
        let mut input = InputState::new();
        input.key_down(Key::Char('A'));
        input.key_down(Key::Enter);
        input.key_down(Key::Char('A'));

        assert_eq!(input.poll_key(), Some(Key::Char('A')));
        assert_eq!(input.poll_key(), Some(Key::Enter));
        assert_eq!(input.poll_key(), None);
        assert!(input.is_key_down(Key::Enter));
    }

    #[test]
    fn test_poll_key_is_one_shot_but_held_persists() {
        let mut input = InputState::new();
        input.key_down(Key::Char('A'));

        assert_eq!(input.poll_key(), Some(Key::Char('A')));
        assert_eq!(input.poll_key(), None);

        input.begin_frame();
        assert!(input.is_key_down(Key::Char('A')));
        assert_eq!(input.poll_key(), None);

        input.key_up(Key::Char('A'));
        assert!(!input.is_key_down(Key::Char('A')));
    }
}
