#![forbid(unsafe_op_in_unsafe_fn)]

use glam::Vec2;

use crate::keys::{ButtonSet, Key, KeySet, MouseButton};

/// Input for a single frame, captured once by the host.
///
/// `*_pressed` / `*_released` hold the edges seen since the previous frame,
/// `*_down` the held state at capture time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub keys_down: KeySet,
    pub keys_pressed: KeySet,
    pub keys_released: KeySet,

    pub buttons_down: ButtonSet,
    pub buttons_pressed: ButtonSet,
    pub buttons_released: ButtonSet,

    /// Relative mouse motion in axis units: x = right, y = up.
    pub mouse_delta: Vec2,
    /// Scroll wheel delta, positive when scrolling away from the user.
    pub scroll: f32,
}

impl InputSnapshot {
    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(key)
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(key)
    }

    #[inline]
    pub fn key_released(&self, key: Key) -> bool {
        self.keys_released.contains(key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(button)
    }

    #[inline]
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(button)
    }

    #[inline]
    pub fn button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(button)
    }

    /// True if any of `keys` went down this frame.
    #[inline]
    pub fn any_key_pressed(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.key_pressed(*k))
    }

    /// Key went down this frame and is still held.
    pub fn with_key_pressed(mut self, key: Key) -> Self {
        self.keys_pressed.insert(key);
        self.keys_down.insert(key);
        self
    }

    /// Key is held without a new edge.
    pub fn with_key_held(mut self, key: Key) -> Self {
        self.keys_down.insert(key);
        self
    }

    pub fn with_key_released(mut self, key: Key) -> Self {
        self.keys_released.insert(key);
        self.keys_down.remove(key);
        self
    }

    pub fn with_button_pressed(mut self, button: MouseButton) -> Self {
        self.buttons_pressed.insert(button);
        self.buttons_down.insert(button);
        self
    }

    pub fn with_button_held(mut self, button: MouseButton) -> Self {
        self.buttons_down.insert(button);
        self
    }

    pub fn with_button_released(mut self, button: MouseButton) -> Self {
        self.buttons_released.insert(button);
        self.buttons_down.remove(button);
        self
    }

    pub fn with_mouse_delta(mut self, delta: Vec2) -> Self {
        self.mouse_delta = delta;
        self
    }

    pub fn with_scroll(mut self, scroll: f32) -> Self {
        self.scroll = scroll;
        self
    }

    /// Snapshot for the next frame: held state kept, edges and deltas dropped.
    #[inline]
    pub fn carry_over(&self) -> Self {
        Self {
            keys_down: self.keys_down,
            buttons_down: self.buttons_down,
            ..Self::default()
        }
    }
}
