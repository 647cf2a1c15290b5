#![forbid(unsafe_op_in_unsafe_fn)]

/// Cursor state requested by the camera controller.
///
/// `Locked` means hidden and locked (or confined, where locking is unsupported)
/// so that only relative motion is read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerState {
    #[default]
    Free,
    Locked,
}

impl PointerState {
    #[inline]
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Locked => "locked",
        }
    }
}
