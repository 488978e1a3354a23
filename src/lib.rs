//! Live camera streaming server
//!
//! camcast exposes one switchable capture device as an MJPEG stream over
//! HTTP. A remote operator can switch which device is live, and a
//! broadcast control channel relays short command tokens to every
//! connected viewer.
//!
//! The core is the [`session::CameraSession`]: it owns the capture device,
//! serializes device switches against in-flight frame reads, and carries
//! the process-wide activity gate that streaming loops obey.
//!
//! # Example
//!
//! ```no_run
//! use camcast::{CameraServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> camcast::Result<()> {
//!     let server = CameraServer::new(ServerConfig::default());
//!     server.open_initial_device().await;
//!     server.run().await
//! }
//! ```

pub mod capture;
pub mod control;
pub mod encode;
pub mod error;
pub mod server;
pub mod session;
pub mod stream;

pub use capture::{DeviceId, Frame, FrameSource, PixelFormat, SourceConfig};
pub use error::{DeviceError, EncodeError, Error, Result};
pub use server::{CameraServer, ServerConfig};
pub use session::CameraSession;
pub use stream::{StreamPublisher, StreamState};
