#![forbid(unsafe_op_in_unsafe_fn)]

//! Editor camera controller.
//!
//! Four exclusive modes driven by per-frame input snapshots:
//! - `Hand`: toggled by a key, drag with the primary button to pan,
//! - `HandWheel`: pan while the middle button is held,
//! - `Fps`: mouse look + WASDQE while the right button is held,
//! - scroll wheel dolly on top of whatever mode is active.

pub mod config;
pub mod controller;
pub mod mode;
pub mod rig;

pub use config::{EditCamConfig, Sensitivity};
pub use controller::{EditCamController, FrameOutcome};
pub use mode::{CameraMode, Transition};
pub use rig::{CameraRig, CameraTransform, EulerAngles};

pub use editcam_input as input;
