//! Capture layer
//!
//! Device identity, raw frames and the backends that produce them. The
//! synthetic backend is always available; real V4L2 devices are behind the
//! `capture-v4l2` feature, so default builds run anywhere.

pub mod frame;
pub mod source;
pub(crate) mod synthetic;
#[cfg(feature = "capture-v4l2")]
mod v4l2;

pub use frame::{DeviceId, Frame, PixelFormat};
pub use source::{FrameSource, SourceConfig};
