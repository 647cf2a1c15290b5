#![forbid(unsafe_op_in_unsafe_fn)]

use editcam_input::{InputSnapshot, Key, MouseButton, PointerState};
use glam::{Vec2, Vec3};

use crate::{
    config::EditCamConfig,
    mode::{self, CameraMode},
    rig::{CameraTransform, EulerAngles},
};

/// What a single `update` changed besides the transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameOutcome {
    pub previous_mode: CameraMode,
    pub mode: CameraMode,
    /// New pointer state, only when it differs from the start of the frame.
    pub pointer: Option<PointerState>,
}

impl FrameOutcome {
    #[inline]
    fn unchanged(mode: CameraMode) -> Self {
        Self {
            previous_mode: mode,
            mode,
            pointer: None,
        }
    }

    #[inline]
    pub fn mode_changed(&self) -> bool {
        self.previous_mode != self.mode
    }
}

/// Editor camera controller.
///
/// Feed it one `InputSnapshot` per frame together with the camera transform.
/// Order inside a frame: mode transition, mode handler, scroll dolly.
#[derive(Clone, Debug)]
pub struct EditCamController {
    config: EditCamConfig,
    active: bool,
    mode: CameraMode,
    hand_moving: bool,
    pointer: PointerState,
}

impl Default for EditCamController {
    fn default() -> Self {
        Self::new(EditCamConfig::default())
    }
}

impl EditCamController {
    pub fn new(config: EditCamConfig) -> Self {
        Self {
            config,
            active: true,
            mode: CameraMode::None,
            hand_moving: false,
            pointer: PointerState::Free,
        }
    }

    #[inline]
    pub fn config(&self) -> &EditCamConfig {
        &self.config
    }

    #[inline]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_hand_moving(&self) -> bool {
        self.hand_moving
    }

    /// Pointer state as last requested by the controller.
    #[inline]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Enables or disables all processing.
    ///
    /// Deactivating drops back to `None`; returns `Some(Free)` when the pointer
    /// was locked and the host has to release it.
    pub fn set_active(&mut self, active: bool) -> Option<PointerState> {
        if self.active == active {
            return None;
        }
        self.active = active;
        if active {
            return None;
        }

        self.mode = CameraMode::None;
        self.hand_moving = false;
        if self.pointer.is_locked() {
            self.pointer = PointerState::Free;
            return Some(PointerState::Free);
        }
        None
    }

    /// Runs one frame.
    pub fn update<T>(&mut self, transform: &mut T, input: &InputSnapshot) -> FrameOutcome
    where
        T: CameraTransform + ?Sized,
    {
        if !self.active {
            return FrameOutcome::unchanged(self.mode);
        }

        let previous_mode = self.mode;
        let pointer_at_start = self.pointer;

        let transition = mode::resolve(self.mode, input, self.config.hand_key);
        if let Some(p) = transition.pointer {
            self.pointer = p;
        }
        self.mode = transition.mode;

        if previous_mode == CameraMode::Hand && self.mode != CameraMode::Hand && self.hand_moving {
            self.hand_moving = false;
            if transition.pointer.is_none() {
                self.pointer = PointerState::Free;
            }
        }

        match self.mode {
            CameraMode::None => {}
            CameraMode::Hand => self.hand_move(transform, input),
            CameraMode::HandWheel => {
                pan(transform, input.mouse_delta, self.config.sensitivity.hand_wheel)
            }
            CameraMode::Fps => self.fps_move(transform, input),
        }

        self.wheel_move(transform, input.scroll);

        FrameOutcome {
            previous_mode,
            mode: self.mode,
            pointer: (self.pointer != pointer_at_start).then_some(self.pointer),
        }
    }

    fn hand_move<T: CameraTransform + ?Sized>(&mut self, transform: &mut T, input: &InputSnapshot) {
        if input.button_pressed(MouseButton::Left) {
            self.hand_moving = true;
            self.pointer = PointerState::Locked;
        }
        if input.button_released(MouseButton::Left) {
            self.hand_moving = false;
            self.pointer = PointerState::Free;
        }
        if self.hand_moving {
            pan(transform, input.mouse_delta, self.config.sensitivity.hand);
        }
    }

    fn fps_move<T: CameraTransform + ?Sized>(&self, transform: &mut T, input: &InputSnapshot) {
        let s = self.config.sensitivity;

        let look = input.mouse_delta * s.fps_look;
        transform.rotate_local(EulerAngles::new(-look.y, look.x, 0.0).to_quat());
        let angles = transform.euler().without_roll();
        transform.set_euler(angles);

        // Axes are re-read per key so each step uses the rotation set above.
        let steps: [(Key, fn(&T) -> Vec3); 6] = [
            (Key::W, |t| t.forward()),
            (Key::S, |t| -t.forward()),
            (Key::A, |t| -t.right()),
            (Key::D, |t| t.right()),
            (Key::E, |t| t.up()),
            (Key::Q, |t| -t.up()),
        ];
        for (key, axis) in steps {
            if input.key_down(key) {
                let dir = axis(transform);
                transform.translate_world(dir * s.fps_move);
            }
        }
    }

    fn wheel_move<T: CameraTransform + ?Sized>(&self, transform: &mut T, scroll: f32) {
        let s = self.config.sensitivity.wheel;
        if scroll > 0.0 {
            let dir = transform.forward();
            transform.translate_world(dir * (scroll * s));
        } else if scroll < 0.0 {
            let dir = -transform.forward();
            transform.translate_world(dir * (scroll.abs() * s));
        }
    }
}

/// Drags the view: the camera moves against the mouse inside its local X/Y plane.
#[inline]
fn pan<T: CameraTransform + ?Sized>(transform: &mut T, delta: Vec2, sensitivity: f32) {
    let d = -delta * sensitivity;
    transform.translate_local(Vec3::new(d.x, d.y, 0.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Sensitivity, rig::CameraRig};
    use glam::Quat;

    const EPS: f32 = 1e-4;

    /// Transform double that counts writes.
    #[derive(Default)]
    struct Recording {
        rig: CameraRig,
        writes: usize,
    }

    impl CameraTransform for Recording {
        fn position(&self) -> Vec3 {
            self.rig.position
        }
        fn set_position(&mut self, position: Vec3) {
            self.writes += 1;
            self.rig.position = position;
        }
        fn rotation(&self) -> Quat {
            self.rig.rotation
        }
        fn set_rotation(&mut self, rotation: Quat) {
            self.writes += 1;
            self.rig.rotation = rotation;
        }
    }

    fn input() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn unit_config() -> EditCamConfig {
        EditCamConfig::default().with_sensitivity(Sensitivity {
            hand: 1.0,
            hand_wheel: 1.0,
            fps_move: 0.25,
            fps_look: 1.0,
            wheel: 1.0,
        })
    }

    fn enter_fps(ctl: &mut EditCamController, rig: &mut CameraRig) {
        ctl.update(rig, &input().with_button_pressed(MouseButton::Right));
        assert_eq!(ctl.mode(), CameraMode::Fps);
    }

    #[test]
    fn starts_idle_and_active() {
        let ctl = EditCamController::default();
        assert!(ctl.is_active());
        assert_eq!(ctl.mode(), CameraMode::None);
        assert_eq!(ctl.pointer(), PointerState::Free);
        assert!(!ctl.is_hand_moving());
    }

    #[test]
    fn inactive_controller_is_a_full_bypass() {
        let mut ctl = EditCamController::new(unit_config());
        ctl.set_active(false);

        let mut t = Recording::default();
        let busy = input()
            .with_key_pressed(Key::Q)
            .with_button_pressed(MouseButton::Right)
            .with_button_pressed(MouseButton::Middle)
            .with_mouse_delta(Vec2::new(5.0, 5.0))
            .with_scroll(3.0);

        for _ in 0..3 {
            let out = ctl.update(&mut t, &busy);
            assert!(!out.mode_changed());
            assert_eq!(out.pointer, None);
        }
        assert_eq!(t.writes, 0);
        assert_eq!(ctl.mode(), CameraMode::None);
        assert_eq!(ctl.pointer(), PointerState::Free);
    }

    #[test]
    fn deactivating_releases_a_locked_pointer() {
        let mut ctl = EditCamController::default();
        let mut rig = CameraRig::default();
        enter_fps(&mut ctl, &mut rig);
        assert_eq!(ctl.pointer(), PointerState::Locked);

        assert_eq!(ctl.set_active(false), Some(PointerState::Free));
        assert_eq!(ctl.mode(), CameraMode::None);
        assert_eq!(ctl.set_active(false), None);
        assert_eq!(ctl.set_active(true), None);
        assert!(ctl.is_active());
    }

    #[test]
    fn hand_key_then_exit_key() {
        let mut ctl = EditCamController::default();
        let mut rig = CameraRig::default();

        let out = ctl.update(&mut rig, &input().with_key_pressed(Key::Q));
        assert_eq!(out.previous_mode, CameraMode::None);
        assert_eq!(out.mode, CameraMode::Hand);
        assert!(out.mode_changed());

        ctl.update(&mut rig, &input().with_key_pressed(Key::R));
        assert_eq!(ctl.mode(), CameraMode::None);
    }

    #[test]
    fn hand_key_in_fps_is_a_no_op() {
        let mut ctl = EditCamController::default();
        let mut rig = CameraRig::default();
        enter_fps(&mut ctl, &mut rig);

        let out = ctl.update(&mut rig, &input().with_key_pressed(Key::Q).with_button_held(MouseButton::Right));
        assert_eq!(out.mode, CameraMode::Fps);
        assert!(!out.mode_changed());
    }

    #[test]
    fn middle_button_locks_and_unlocks_from_any_mode() {
        let mut ctl = EditCamController::default();
        let mut rig = CameraRig::default();
        enter_fps(&mut ctl, &mut rig);

        let out = ctl.update(&mut rig, &input().with_button_pressed(MouseButton::Middle));
        assert_eq!(out.mode, CameraMode::HandWheel);
        // Already locked by FPS, so no change is reported.
        assert_eq!(out.pointer, None);
        assert_eq!(ctl.pointer(), PointerState::Locked);

        let out = ctl.update(&mut rig, &input().with_button_released(MouseButton::Middle));
        assert_eq!(out.mode, CameraMode::None);
        assert_eq!(out.pointer, Some(PointerState::Free));

        let out = ctl.update(&mut rig, &input().with_button_pressed(MouseButton::Middle));
        assert_eq!(out.mode, CameraMode::HandWheel);
        assert_eq!(out.pointer, Some(PointerState::Locked));
    }

    #[test]
    fn hand_drag_pans_against_the_mouse() {
        let mut ctl = EditCamController::new(unit_config());
        let mut rig = CameraRig::default();
        ctl.update(&mut rig, &input().with_key_pressed(Key::Q));

        // Moving the mouse without the button does nothing.
        ctl.update(&mut rig, &input().with_mouse_delta(Vec2::new(2.0, 1.0)));
        assert_eq!(rig.position, Vec3::ZERO);

        let out = ctl.update(
            &mut rig,
            &input()
                .with_button_pressed(MouseButton::Left)
                .with_mouse_delta(Vec2::new(2.0, 1.0)),
        );
        assert_eq!(out.pointer, Some(PointerState::Locked));
        assert!(ctl.is_hand_moving());
        assert!(rig.position.abs_diff_eq(Vec3::new(-2.0, -1.0, 0.0), EPS));

        let out = ctl.update(&mut rig, &input().with_button_released(MouseButton::Left));
        assert_eq!(out.pointer, Some(PointerState::Free));
        assert!(!ctl.is_hand_moving());

        ctl.update(&mut rig, &input().with_mouse_delta(Vec2::new(5.0, 5.0)));
        assert!(rig.position.abs_diff_eq(Vec3::new(-2.0, -1.0, 0.0), EPS));
    }

    #[test]
    fn hand_pan_uses_hand_sensitivity() {
        let mut ctl = EditCamController::default();
        let mut rig = CameraRig::default();
        ctl.update(&mut rig, &input().with_key_pressed(Key::Q));
        ctl.update(
            &mut rig,
            &input()
                .with_button_pressed(MouseButton::Left)
                .with_mouse_delta(Vec2::new(4.0, 0.0)),
        );
        // Default hand sensitivity is 0.5.
        assert!(rig.position.abs_diff_eq(Vec3::new(-2.0, 0.0, 0.0), EPS));
    }

    #[test]
    fn leaving_hand_mid_drag_releases_the_pointer() {
        let mut ctl = EditCamController::default();
        let mut rig = CameraRig::default();
        ctl.update(&mut rig, &input().with_key_pressed(Key::Q));
        ctl.update(&mut rig, &input().with_button_pressed(MouseButton::Left));
        assert_eq!(ctl.pointer(), PointerState::Locked);

        let out = ctl.update(&mut rig, &input().with_key_pressed(Key::W).with_button_held(MouseButton::Left));
        assert_eq!(out.mode, CameraMode::None);
        assert_eq!(out.pointer, Some(PointerState::Free));
        assert!(!ctl.is_hand_moving());
    }

    #[test]
    fn hand_wheel_pans_without_extra_button() {
        let mut ctl = EditCamController::new(unit_config());
        let mut rig = CameraRig::default();
        ctl.update(
            &mut rig,
            &input()
                .with_button_pressed(MouseButton::Middle)
                .with_mouse_delta(Vec2::new(-1.0, 3.0)),
        );
        assert!(rig.position.abs_diff_eq(Vec3::new(1.0, -3.0, 0.0), EPS));
    }

    #[test]
    fn fps_forward_is_pure_translation() {
        let mut ctl = EditCamController::new(unit_config());
        let mut rig = CameraRig::from_look_at(Vec3::ZERO, Vec3::new(1.0, 0.0, -1.0), Vec3::Y);
        enter_fps(&mut ctl, &mut rig);
        let rotation = rig.rotation;
        let forward = rig.forward();
        let start = rig.position;

        ctl.update(&mut rig, &input().with_button_held(MouseButton::Right).with_key_held(Key::W));

        assert!(rig.rotation.abs_diff_eq(rotation, EPS));
        let moved = rig.position - start;
        assert!(moved.abs_diff_eq(forward * 0.25, EPS));
        assert!((moved.length() - 0.25).abs() < EPS);
    }

    #[test]
    fn fps_keys_add_up() {
        let mut ctl = EditCamController::new(unit_config());
        let mut rig = CameraRig::default();
        enter_fps(&mut ctl, &mut rig);

        let held = input()
            .with_key_held(Key::W)
            .with_key_held(Key::D)
            .with_key_held(Key::E);
        ctl.update(&mut rig, &held);
        assert!(rig.position.abs_diff_eq(Vec3::new(0.25, 0.25, -0.25), EPS));

        // Opposite keys cancel.
        let start = rig.position;
        let held = input()
            .with_key_held(Key::W)
            .with_key_held(Key::S)
            .with_key_held(Key::A)
            .with_key_held(Key::D)
            .with_key_held(Key::Q)
            .with_key_held(Key::E);
        ctl.update(&mut rig, &held);
        assert!(rig.position.abs_diff_eq(start, EPS));
    }

    #[test]
    fn fps_keys_do_nothing_outside_fps() {
        let mut ctl = EditCamController::new(unit_config());
        let mut rig = CameraRig::default();
        ctl.update(&mut rig, &input().with_key_held(Key::W).with_key_held(Key::D));
        assert_eq!(rig.position, Vec3::ZERO);
    }

    #[test]
    fn fps_look_example() {
        let mut ctl = EditCamController::new(unit_config());
        let mut rig = CameraRig::default();
        enter_fps(&mut ctl, &mut rig);

        ctl.update(&mut rig, &input().with_mouse_delta(Vec2::new(3.0, -2.0)));
        let e = rig.euler();
        assert!((e.yaw - 3.0).abs() < 1e-3, "yaw {}", e.yaw);
        assert!((e.pitch - 2.0).abs() < 1e-3, "pitch {}", e.pitch);
        assert!(e.roll.abs() < 1e-3, "roll {}", e.roll);
    }

    #[test]
    fn fps_look_never_accumulates_roll() {
        let mut ctl = EditCamController::new(unit_config());
        let mut rig = CameraRig::default();
        rig.set_euler(EulerAngles::new(0.0, 0.0, 25.0));
        enter_fps(&mut ctl, &mut rig);

        let deltas = [
            Vec2::new(7.0, 3.0),
            Vec2::new(-12.0, 9.0),
            Vec2::new(30.0, -14.0),
            Vec2::new(1.5, 22.0),
            Vec2::new(-40.0, -5.0),
        ];
        for d in deltas {
            ctl.update(&mut rig, &input().with_button_held(MouseButton::Right).with_mouse_delta(d));
            assert!(rig.euler().roll.abs() < 1e-3, "roll {}", rig.euler().roll);
        }
    }

    #[test]
    fn fps_rotation_applies_before_movement() {
        let mut ctl = EditCamController::new(unit_config());
        let mut rig = CameraRig::default();
        enter_fps(&mut ctl, &mut rig);

        ctl.update(
            &mut rig,
            &input()
                .with_mouse_delta(Vec2::new(90.0, 0.0))
                .with_key_held(Key::W),
        );
        // Turned right by 90 degrees first, so W moves along +X.
        assert!(rig.position.abs_diff_eq(Vec3::new(0.25, 0.0, 0.0), EPS));
    }

    #[test]
    fn scroll_dollies_in_idle_mode() {
        let mut ctl = EditCamController::new(unit_config());
        let mut rig = CameraRig::default();

        let out = ctl.update(&mut rig, &input().with_scroll(2.0));
        assert_eq!(out.mode, CameraMode::None);
        assert!(rig.position.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), EPS));

        ctl.update(&mut rig, &input().with_scroll(-0.5));
        assert!(rig.position.abs_diff_eq(Vec3::new(0.0, 0.0, -1.5), EPS));
    }

    #[test]
    fn scroll_dollies_in_every_mode() {
        let setups: [InputSnapshot; 3] = [
            input().with_key_pressed(Key::Q),
            input().with_button_pressed(MouseButton::Middle),
            input().with_button_pressed(MouseButton::Right),
        ];
        for setup in setups {
            let mut ctl = EditCamController::new(unit_config());
            let mut rig = CameraRig::from_look_at(Vec3::ZERO, Vec3::new(0.0, -1.0, -1.0), Vec3::Y);
            ctl.update(&mut rig, &setup);
            let start = rig.position;
            let forward = rig.forward();

            ctl.update(&mut rig, &input().with_scroll(-3.0));
            assert!((rig.position - start).abs_diff_eq(-forward * 3.0, EPS), "{:?}", ctl.mode());
        }
    }

    #[test]
    fn wheel_sensitivity_scales_dolly() {
        let cfg = EditCamConfig::default().with_sensitivity(Sensitivity {
            wheel: 0.5,
            ..Sensitivity::default()
        });
        let mut ctl = EditCamController::new(cfg);
        let mut rig = CameraRig::default();
        ctl.update(&mut rig, &input().with_scroll(4.0));
        assert!(rig.position.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), EPS));
    }

    #[test]
    fn idle_frame_touches_nothing() {
        let mut ctl = EditCamController::default();
        let mut t = Recording::default();
        let out = ctl.update(&mut t, &input().with_mouse_delta(Vec2::new(3.0, 3.0)));
        assert_eq!(out, FrameOutcome::unchanged(CameraMode::None));
        assert_eq!(t.writes, 0);
    }
}
