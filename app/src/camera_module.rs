use anyhow::anyhow;
use editcam_camera::{CameraRig, CameraTransform, EditCamConfig, EditCamController};
use editcam_core::{
    error::{EngineError, EngineResult},
    frame::{FrameContext, PointerRequest},
    logsys::Logger,
    module::Module,
    phase::FramePhase,
};
use editcam_input::{InputSnapshot, Key};
use glam::Vec3;
use serde::Deserialize;

/// `[modules.data]` of the `editcam` module entry.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EditCamModuleConfig {
    #[serde(flatten)]
    pub camera: EditCamConfig,

    /// Enables/disables the controller. Unbound by default.
    pub toggle_key: Option<Key>,

    pub start_position: [f32; 3],
    pub look_at: [f32; 3],
}

impl Default for EditCamModuleConfig {
    fn default() -> Self {
        Self {
            camera: EditCamConfig::default(),
            toggle_key: None,
            start_position: [0.0, 2.0, 8.0],
            look_at: [0.0, 0.0, 0.0],
        }
    }
}

/// Hosts the editor camera controller and the camera it drives.
pub struct EditCamModule {
    controller: EditCamController,
    rig: CameraRig,
    toggle_key: Option<Key>,
    log: Logger,
}

impl EditCamModule {
    pub const ID: &'static str = "editcam";

    pub fn new(cfg: EditCamModuleConfig) -> EngineResult<Self> {
        if let Some(name) = cfg.camera.sensitivity.first_non_finite() {
            return Err(EngineError::Module {
                module: Self::ID,
                source: anyhow!("sensitivity.{name} must be a finite number"),
            });
        }

        let rig = CameraRig::from_look_at(
            Vec3::from_array(cfg.start_position),
            Vec3::from_array(cfg.look_at),
            Vec3::Y,
        );

        Ok(Self {
            controller: EditCamController::new(cfg.camera),
            rig,
            toggle_key: cfg.toggle_key,
            log: Logger::new("EditCam"),
        })
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn controller(&self) -> &EditCamController {
        &self.controller
    }

    fn step(&mut self, input: &InputSnapshot, pointer: &mut PointerRequest) {
        if let Some(key) = self.toggle_key {
            if input.key_pressed(key) {
                let active = !self.controller.is_active();
                if let Some(p) = self.controller.set_active(active) {
                    pointer.request(p);
                }
                self.log.info(if active { "enabled" } else { "disabled" });
            }
        }

        let before = self.rig;
        let outcome = self.controller.update(&mut self.rig, input);

        if let Some(p) = outcome.pointer {
            pointer.request(p);
        }
        if outcome.mode_changed() {
            self.log.info(format!(
                "mode {} -> {}",
                outcome.previous_mode.as_str(),
                outcome.mode.as_str()
            ));
        }
        if self.rig != before && self.log.debug_enabled() {
            self.log.debug(self.describe_pose());
        }
    }

    fn describe_pose(&self) -> String {
        let rig = self.rig();
        let p = rig.position;
        let e = rig.euler();
        format!(
            "pos=({:.2}, {:.2}, {:.2}) pitch={:.1} yaw={:.1}",
            p.x, p.y, p.z, e.pitch, e.yaw
        )
    }
}

impl Module for EditCamModule {
    fn name(&self) -> &'static str {
        Self::ID
    }

    fn on_start(&mut self, _ctx: &mut FrameContext<'_>) {
        let cfg = self.controller().config();
        let s = cfg.sensitivity;
        self.log.info(format!(
            "hand key {:?}, sensitivity hand={} hand_wheel={} fps_move={} fps_look={} wheel={}",
            cfg.hand_key, s.hand, s.hand_wheel, s.fps_move, s.fps_look, s.wheel
        ));
        self.log.info(self.describe_pose());
    }

    fn on_phase(&mut self, phase: FramePhase, ctx: &mut FrameContext<'_>) {
        if phase == FramePhase::Update {
            self.step(ctx.input, ctx.pointer);
        }
    }

    fn on_shutdown(&mut self, _ctx: &mut FrameContext<'_>) {
        self.log.info(format!("final {}", self.describe_pose()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editcam_camera::{CameraMode, Sensitivity};
    use editcam_core::config::EngineConfig;
    use editcam_input::{MouseButton, PointerState};

    fn module(toggle_key: Option<Key>) -> EditCamModule {
        EditCamModule::new(EditCamModuleConfig {
            toggle_key,
            ..EditCamModuleConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn config_reads_from_engine_toml() {
        let engine = EngineConfig::from_toml_str(
            r#"
            [[modules]]
            id = "editcam"
            [modules.data]
            hand_key = "H"
            toggle_key = "F2"
            start_position = [1.0, 1.0, 1.0]
            [modules.data.sensitivity]
            wheel = 2.5
            "#,
        )
        .unwrap();

        let cfg: EditCamModuleConfig = engine.module_data(EditCamModule::ID).unwrap().unwrap();
        assert_eq!(cfg.camera.hand_key, Key::H);
        assert_eq!(cfg.toggle_key, Some(Key::F2));
        assert_eq!(cfg.start_position, [1.0, 1.0, 1.0]);
        assert_eq!(cfg.look_at, [0.0, 0.0, 0.0]);
        assert_eq!(cfg.camera.sensitivity.wheel, 2.5);
        assert_eq!(cfg.camera.sensitivity.hand, Sensitivity::default().hand);
    }

    #[test]
    fn rejects_non_finite_sensitivity() {
        let mut cfg = EditCamModuleConfig::default();
        cfg.camera.sensitivity.wheel = f32::INFINITY;
        let err = EditCamModule::new(cfg).err().unwrap();
        assert!(matches!(err, EngineError::Module { module: "editcam", .. }));
    }

    #[test]
    fn starts_looking_at_target() {
        let m = module(None);
        assert_eq!(m.rig().position, Vec3::new(0.0, 2.0, 8.0));
        let expected = (Vec3::ZERO - m.rig().position).normalize();
        assert!(m.rig().forward().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn forwards_pointer_changes() {
        let mut m = module(None);
        let mut pointer = PointerRequest::default();

        m.step(&InputSnapshot::default().with_button_pressed(MouseButton::Right), &mut pointer);
        assert_eq!(m.controller().mode(), CameraMode::Fps);
        assert_eq!(pointer.take(), Some(PointerState::Locked));

        m.step(&InputSnapshot::default().with_button_held(MouseButton::Right), &mut pointer);
        assert_eq!(pointer.take(), None);

        m.step(&InputSnapshot::default().with_button_released(MouseButton::Right), &mut pointer);
        assert_eq!(pointer.take(), Some(PointerState::Free));
    }

    #[test]
    fn toggle_key_disables_and_releases_pointer() {
        let mut m = module(Some(Key::F2));
        let mut pointer = PointerRequest::default();

        m.step(&InputSnapshot::default().with_button_pressed(MouseButton::Middle), &mut pointer);
        assert_eq!(pointer.take(), Some(PointerState::Locked));

        m.step(&InputSnapshot::default().with_key_pressed(Key::F2), &mut pointer);
        assert!(!m.controller().is_active());
        assert_eq!(m.controller().mode(), CameraMode::None);
        assert_eq!(pointer.take(), Some(PointerState::Free));

        let before = *m.rig();
        m.step(&InputSnapshot::default().with_scroll(5.0), &mut pointer);
        assert_eq!(*m.rig(), before);

        m.step(&InputSnapshot::default().with_key_pressed(Key::F2), &mut pointer);
        assert!(m.controller().is_active());
        m.step(&InputSnapshot::default().with_scroll(5.0), &mut pointer);
        assert_ne!(*m.rig(), before);
    }
}
