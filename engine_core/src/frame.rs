use editcam_input::{InputSnapshot, PointerState};

use crate::time::Time;

/// Pointer state a module wants applied after the frame. Last request wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerRequest(Option<PointerState>);

impl PointerRequest {
    #[inline]
    pub fn request(&mut self, state: PointerState) {
        self.0 = Some(state);
    }

    #[inline]
    pub fn take(&mut self) -> Option<PointerState> {
        self.0.take()
    }
}

/// What modules get to see and touch during a frame.
pub struct FrameContext<'a> {
    pub time: &'a Time,
    pub input: &'a InputSnapshot,
    pub pointer: &'a mut PointerRequest,

    /// Soft exit request, honoured after the frame.
    pub exit_requested: &'a mut bool,
}
