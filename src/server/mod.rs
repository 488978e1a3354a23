//! HTTP surface
//!
//! Configuration, router and transports: the viewer page, the MJPEG
//! endpoint, the device-switch endpoint and the control WebSocket, all
//! served from one listener with permissive CORS.

pub mod app;
pub mod config;
pub mod page;
pub mod routes;
pub mod ws;

pub use app::CameraServer;
pub use config::ServerConfig;
pub use routes::{AppState, SwitchResponse};
