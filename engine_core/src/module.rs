use crate::{frame::FrameContext, phase::FramePhase};

/// A subsystem driven by the engine frame loop.
pub trait Module {
    fn name(&self) -> &'static str;

    fn on_register(&mut self, _ctx: &mut FrameContext<'_>) {}
    fn on_start(&mut self, _ctx: &mut FrameContext<'_>) {}
    fn on_phase(&mut self, _phase: FramePhase, _ctx: &mut FrameContext<'_>) {}
    fn on_shutdown(&mut self, _ctx: &mut FrameContext<'_>) {}
}
