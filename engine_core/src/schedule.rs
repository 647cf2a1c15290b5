use crate::{frame::FrameContext, module::Module, phase::FramePhase};

/// Frame schedule: the single place deciding who runs and when.
#[derive(Default)]
pub struct FrameSchedule {
    modules: Vec<Box<dyn Module>>,
}

impl FrameSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module<M: Module + 'static>(&mut self, m: M) {
        self.modules.push(Box::new(m));
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn module_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.iter().map(|m| m.name())
    }

    pub fn on_register(&mut self, ctx: &mut FrameContext<'_>) {
        for m in self.modules.iter_mut() {
            m.on_register(ctx);
        }
    }

    pub fn on_start(&mut self, ctx: &mut FrameContext<'_>) {
        for m in self.modules.iter_mut() {
            m.on_start(ctx);
        }
    }

    /// Reverse registration order.
    pub fn on_shutdown(&mut self, ctx: &mut FrameContext<'_>) {
        for m in self.modules.iter_mut().rev() {
            m.on_shutdown(ctx);
        }
    }

    pub fn run_phase(&mut self, phase: FramePhase, ctx: &mut FrameContext<'_>) {
        for m in self.modules.iter_mut() {
            m.on_phase(phase, ctx);
        }
    }

    /// All phases of one frame, in order.
    pub fn run_frame(&mut self, ctx: &mut FrameContext<'_>) {
        for phase in FramePhase::ALL {
            self.run_phase(phase, ctx);
        }
    }
}
