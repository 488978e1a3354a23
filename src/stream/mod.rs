//! MJPEG delivery
//!
//! Everything between an encoded frame and the HTTP response body: the
//! multipart wire framing and the per-viewer publisher state machine.

pub mod multipart;
pub mod publisher;

pub use publisher::{StreamPublisher, StreamState};
