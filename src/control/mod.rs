//! Control channel
//!
//! Broadcast messaging independent of the video stream: lifecycle events
//! that gate the feed, opaque command relay, and the typed grammar and wire
//! protocol around them.

pub mod command;
pub mod hub;
pub mod protocol;

pub use command::{Command, Direction};
pub use hub::{ControlHub, ControlPeer};
pub use protocol::{ClientFrame, ServerFrame};
