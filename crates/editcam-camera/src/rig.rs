#![forbid(unsafe_op_in_unsafe_fn)]

use glam::{EulerRot, Quat, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Editor-style Euler angles in degrees.
///
/// Convention:
/// - positive `pitch` tilts the view down,
/// - positive `yaw` turns right,
/// - composed yaw, then pitch, then roll (`EulerRot::YXZ`), camera looking down local -Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl EulerAngles {
    #[inline]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    #[inline]
    pub fn to_quat(self) -> Quat {
        // Right-handed rig: "down" and "right" are negative rotations about X and Y.
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    #[inline]
    pub fn from_quat(rotation: Quat) -> Self {
        let (y, x, z) = rotation.to_euler(EulerRot::YXZ);
        Self {
            pitch: -x.to_degrees(),
            yaw: -y.to_degrees(),
            roll: z.to_degrees(),
        }
    }

    /// Same pitch and yaw, roll dropped.
    #[inline]
    pub fn without_roll(self) -> Self {
        Self { roll: 0.0, ..self }
    }
}

/// Narrow view of a host-owned camera transform.
///
/// The controller only ever goes through this trait, so any engine transform
/// (or a test double) can be driven by it.
pub trait CameraTransform {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    /// Local -Z in world space.
    #[inline]
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    #[inline]
    fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    #[inline]
    fn up(&self) -> Vec3 {
        self.rotation() * Vec3::Y
    }

    /// Adds a world-space translation.
    #[inline]
    fn translate_world(&mut self, delta_world: Vec3) {
        let position = self.position();
        self.set_position(position + delta_world);
    }

    /// Adds a local-space translation (relative to the current rotation).
    #[inline]
    fn translate_local(&mut self, delta_local: Vec3) {
        let delta_world = self.rotation() * delta_local;
        self.translate_world(delta_world);
    }

    /// Applies `delta` in the transform's own space.
    #[inline]
    fn rotate_local(&mut self, delta: Quat) {
        let rotation = (self.rotation() * delta).normalize();
        self.set_rotation(rotation);
    }

    #[inline]
    fn euler(&self) -> EulerAngles {
        EulerAngles::from_quat(self.rotation())
    }

    #[inline]
    fn set_euler(&mut self, angles: EulerAngles) {
        self.set_rotation(angles.to_quat());
    }
}

/// Camera transform in world space.
///
/// Plain value type, used by the bundled host and as the reference `CameraTransform`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraRig {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraRig {
    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    #[inline]
    pub fn set_look_at(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.position = position;
        self.rotation = look_at_rotation(position, target, up);
    }

    /// Creates a rig looking from `position` at `target`. Camera forward is -Z.
    #[inline]
    pub fn from_look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            rotation: look_at_rotation(position, target, up),
        }
    }
}

impl CameraTransform for CameraRig {
    #[inline]
    fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    #[inline]
    fn rotation(&self) -> Quat {
        self.rotation
    }

    #[inline]
    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}

#[inline]
fn look_at_rotation(position: Vec3, target: Vec3, up: Vec3) -> Quat {
    let f = (target - position).normalize_or_zero();
    if f.length_squared() < 1e-8 {
        return Quat::IDENTITY;
    }

    // Camera -Z points towards `f`.
    let z_axis = -f;
    let mut x_axis = up.cross(z_axis);
    if x_axis.length_squared() < 1e-8 {
        // `up` parallel to forward.
        x_axis = Vec3::Y.cross(z_axis);
        if x_axis.length_squared() < 1e-8 {
            x_axis = Vec3::X.cross(z_axis);
        }
    }
    x_axis = x_axis.normalize();
    let y_axis = z_axis.cross(x_axis).normalize();

    Quat::from_mat3(&glam::Mat3::from_cols(x_axis, y_axis, z_axis))
}
