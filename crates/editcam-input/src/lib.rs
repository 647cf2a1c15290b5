#![forbid(unsafe_op_in_unsafe_fn)]

pub mod keys;
pub mod pointer;
pub mod snapshot;

pub use keys::{ButtonSet, Key, KeySet, MouseButton};
pub use pointer::PointerState;
pub use snapshot::InputSnapshot;
