#![forbid(unsafe_op_in_unsafe_fn)]

use editcam_input::{InputSnapshot, Key, MouseButton, PointerState};

/// Active camera mode. Exactly one at a time, no stacking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CameraMode {
    /// Idle. Only scroll dolly applies.
    #[default]
    None,
    /// Keyboard-toggled pan, dragged with the primary button.
    Hand,
    /// Pan while the middle button is held.
    HandWheel,
    /// Mouse look + WASDQE while the right button is held.
    Fps,
}

impl CameraMode {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hand => "hand",
            Self::HandWheel => "hand-wheel",
            Self::Fps => "fps",
        }
    }
}

/// Keys that leave Hand mode.
pub const HAND_EXIT_KEYS: [Key; 3] = [Key::W, Key::E, Key::R];

/// Result of one resolution step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub mode: CameraMode,
    /// Last pointer write made by the rules, if any.
    pub pointer: Option<PointerState>,
}

impl Transition {
    #[inline]
    fn stay(mode: CameraMode) -> Self {
        Self { mode, pointer: None }
    }

    #[inline]
    fn set(&mut self, mode: CameraMode, pointer: PointerState) {
        self.mode = mode;
        self.pointer = Some(pointer);
    }
}

/// Resolves the next mode for this frame.
///
/// Rules run in this order, each one seeing the mode left by the previous rule.
/// A later write wins over an earlier one:
///
/// 1. `hand_key` pressed and not in `Fps` -> `Hand`. Leaving `HandWheel` this way
///    also frees the pointer.
/// 2. In `Hand` and W/E/R pressed -> `None`.
/// 3. Middle pressed -> `HandWheel` + lock; middle released -> `None` + free.
/// 4. Right pressed -> `Fps` + lock; right released -> `None` + free.
pub fn resolve(current: CameraMode, input: &InputSnapshot, hand_key: Key) -> Transition {
    let mut t = Transition::stay(current);

    if t.mode != CameraMode::Fps && input.key_pressed(hand_key) {
        if t.mode == CameraMode::HandWheel {
            t.pointer = Some(PointerState::Free);
        }
        t.mode = CameraMode::Hand;
    }

    if t.mode == CameraMode::Hand && input.any_key_pressed(&HAND_EXIT_KEYS) {
        t.mode = CameraMode::None;
    }

    if input.button_pressed(MouseButton::Middle) {
        t.set(CameraMode::HandWheel, PointerState::Locked);
    }
    if input.button_released(MouseButton::Middle) {
        t.set(CameraMode::None, PointerState::Free);
    }

    if input.button_pressed(MouseButton::Right) {
        t.set(CameraMode::Fps, PointerState::Locked);
    }
    if input.button_released(MouseButton::Right) {
        t.set(CameraMode::None, PointerState::Free);
    }

    t
}
