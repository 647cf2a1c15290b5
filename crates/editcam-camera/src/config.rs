#![forbid(unsafe_op_in_unsafe_fn)]

use editcam_input::Key;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-mode multipliers. Fixed for the lifetime of a controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Sensitivity {
    /// Hand mode drag pan.
    pub hand: f32,
    /// Middle-button pan.
    pub hand_wheel: f32,
    /// FPS WASDQE step per frame.
    pub fps_move: f32,
    /// FPS mouse look, degrees per axis unit.
    pub fps_look: f32,
    /// Scroll dolly step per scroll unit.
    pub wheel: f32,
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self {
            hand: 0.5,
            hand_wheel: 1.0,
            fps_move: 0.01,
            fps_look: 1.0,
            wheel: 1.0,
        }
    }
}

impl Sensitivity {
    /// Name of the first multiplier that is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        [
            ("hand", self.hand),
            ("hand_wheel", self.hand_wheel),
            ("fps_move", self.fps_move),
            ("fps_look", self.fps_look),
            ("wheel", self.wheel),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EditCamConfig {
    /// Key that switches to Hand mode (ignored while in FPS mode).
    pub hand_key: Key,
    pub sensitivity: Sensitivity,
}

impl Default for EditCamConfig {
    fn default() -> Self {
        Self {
            hand_key: Key::Q,
            sensitivity: Sensitivity::default(),
        }
    }
}

impl EditCamConfig {
    #[inline]
    pub fn with_hand_key(mut self, key: Key) -> Self {
        self.hand_key = key;
        self
    }

    #[inline]
    pub fn with_sensitivity(mut self, sensitivity: Sensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }
}
