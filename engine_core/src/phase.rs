/// Frame phases, run in declaration order once per frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FramePhase {
    BeginFrame,
    Input,
    Update,
    LateUpdate,
    EndFrame,
}

impl FramePhase {
    pub const ALL: [FramePhase; 5] = [
        FramePhase::BeginFrame,
        FramePhase::Input,
        FramePhase::Update,
        FramePhase::LateUpdate,
        FramePhase::EndFrame,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FramePhase::BeginFrame => "BeginFrame",
            FramePhase::Input => "Input",
            FramePhase::Update => "Update",
            FramePhase::LateUpdate => "LateUpdate",
            FramePhase::EndFrame => "EndFrame",
        }
    }
}
