use std::time::{Duration, Instant};

use editcam_input::PointerState;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

use crate::{
    config::EngineConfig,
    error::{EngineError, EngineResult},
    frame::{FrameContext, PointerRequest},
    input::InputCollector,
    logsys::Logger,
    module::Module,
    schedule::FrameSchedule,
    signals::ExitSignal,
    time::Time,
};

pub struct Engine {
    cfg: EngineConfig,
    log: Logger,
    schedule: FrameSchedule,
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            cfg,
            log: Logger::new("Engine"),
            schedule: FrameSchedule::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    pub fn add_module<M: Module + 'static>(&mut self, m: M) {
        self.log.debug(format!("module registered: {}", m.name()));
        self.schedule.add_module(m);
    }

    /// Blocks until the window closes, Escape is pressed or Ctrl+C arrives.
    pub fn run(self) -> EngineResult<()> {
        let event_loop = EventLoop::new()?;
        let mut app = EngineApp::new(self);
        event_loop.run_app(&mut app)?;

        match app.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct EngineApp {
    engine: Engine,

    window: Option<Window>,
    window_id: Option<WindowId>,
    focused: bool,

    exit_requested: bool,
    shutdown_done: bool,
    started: bool,
    failure: Option<EngineError>,

    time: Time,
    input: InputCollector,
    pointer: PointerState,

    last: Instant,
    next_frame: Instant,
    frame_interval: Duration,

    exit_signal: ExitSignal,
}

impl EngineApp {
    fn new(engine: Engine) -> Self {
        let exit_signal = ExitSignal::new();
        if let Err(e) = exit_signal.install_ctrlc_handler() {
            engine.log.warn(format!("ctrl+c handler not installed: {e}"));
        }

        let input = InputCollector::new(engine.cfg.input);
        let frame_interval = engine.cfg.frame_interval();
        let now = Instant::now();

        Self {
            engine,

            window: None,
            window_id: None,
            focused: true,

            exit_requested: false,
            shutdown_done: false,
            started: false,
            failure: None,

            time: Time::new(),
            input,
            pointer: PointerState::Free,

            last: now,
            next_frame: now,
            frame_interval,

            exit_signal,
        }
    }

    fn start_if_needed(&mut self) {
        if self.started || self.window.is_none() {
            return;
        }

        self.engine.log.info(format!(
            "boot: {} module(s) [{}]",
            self.engine.schedule.len(),
            self.engine.schedule.module_names().collect::<Vec<_>>().join(", ")
        ));

        let input = self.input.take_frame();
        let mut pointer = PointerRequest::default();
        let mut ctx = FrameContext {
            time: &self.time,
            input: &input,
            pointer: &mut pointer,
            exit_requested: &mut self.exit_requested,
        };

        self.engine.schedule.on_register(&mut ctx);
        self.engine.schedule.on_start(&mut ctx);

        if let Some(state) = pointer.take() {
            self.apply_pointer(state);
        }

        self.started = true;
        self.last = Instant::now();
        self.next_frame = self.last;

        self.engine.log.info("first frame");
    }

    fn run_frame(&mut self, now: Instant) {
        let raw_dt = now.duration_since(self.last);
        self.last = now;
        self.time.advance(raw_dt.as_secs_f32(), self.engine.cfg.max_dt_sec);

        let input = self.input.take_frame();
        let mut pointer = PointerRequest::default();
        let mut ctx = FrameContext {
            time: &self.time,
            input: &input,
            pointer: &mut pointer,
            exit_requested: &mut self.exit_requested,
        };

        self.engine.schedule.run_frame(&mut ctx);

        if let Some(state) = pointer.take() {
            self.apply_pointer(state);
        }

        if self.time.frame_index % 600 == 0 {
            self.engine.log.debug(format!(
                "frame {} t={:.1}s dt={:.2}ms",
                self.time.frame_index,
                self.time.t_sec,
                self.time.dt_sec * 1000.0
            ));
        }
    }

    fn apply_pointer(&mut self, state: PointerState) {
        let Some(window) = self.window.as_ref() else { return; };

        match state {
            PointerState::Locked => {
                // Locked is not available everywhere (X11, some Windows setups); Confined still hides drift.
                let grabbed = window
                    .set_cursor_grab(CursorGrabMode::Locked)
                    .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
                if let Err(e) = grabbed {
                    self.engine.log.warn(format!("cursor grab failed: {e}"));
                }
                window.set_cursor_visible(false);
            }
            PointerState::Free => {
                if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                    self.engine.log.warn(format!("cursor release failed: {e}"));
                }
                window.set_cursor_visible(true);
            }
        }

        if self.pointer != state {
            self.engine.log.debug(format!("pointer {}", state.as_str()));
        }
        self.pointer = state;
    }

    fn shutdown_once(&mut self, el: &ActiveEventLoop) {
        if self.shutdown_done {
            return;
        }
        self.shutdown_done = true;

        if self.started {
            let input = self.input.take_frame();
            let mut pointer = PointerRequest::default();
            let mut ctx = FrameContext {
                time: &self.time,
                input: &input,
                pointer: &mut pointer,
                exit_requested: &mut self.exit_requested,
            };
            self.engine.schedule.on_shutdown(&mut ctx);
        }

        if self.pointer.is_locked() {
            self.apply_pointer(PointerState::Free);
        }

        self.engine.log.info("shutdown");
        el.exit();
    }
}

impl ApplicationHandler for EngineApp {
    fn resumed(&mut self, el: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.engine.cfg.title.clone())
            .with_inner_size(LogicalSize::new(self.engine.cfg.width, self.engine.cfg.height));

        let window = match el.create_window(attrs) {
            Ok(w) => w,
            Err(e) => {
                self.engine.log.error(format!("failed to create window: {e}"));
                self.failure = Some(e.into());
                el.exit();
                return;
            }
        };

        self.window_id = Some(window.id());
        self.window = Some(window);

        self.start_if_needed();
    }

    fn window_event(&mut self, el: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if Some(id) != self.window_id {
            return;
        }

        match &event {
            WindowEvent::CloseRequested => self.exit_requested = true,
            WindowEvent::Focused(focused) => self.focused = *focused,
            WindowEvent::KeyboardInput { event: key, .. } => {
                if key.state == ElementState::Pressed
                    && key.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    self.exit_requested = true;
                }
            }
            _ => {}
        }

        self.input.handle_window_event(&event);

        if self.exit_requested {
            self.shutdown_once(el);
        }
    }

    fn device_event(&mut self, _el: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        // Raw motion keeps flowing while the cursor is locked, but not for other windows.
        if self.focused {
            self.input.handle_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, el: &ActiveEventLoop) {
        if !self.started {
            return;
        }

        if self.exit_signal.is_exit_requested() {
            self.exit_requested = true;
        }

        if self.exit_requested {
            self.shutdown_once(el);
            return;
        }

        let now = Instant::now();
        if now < self.next_frame {
            el.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
            return;
        }
        self.next_frame = now + self.frame_interval;
        el.set_control_flow(ControlFlow::WaitUntil(self.next_frame));

        self.run_frame(now);

        if self.exit_requested {
            self.shutdown_once(el);
        }
    }
}
