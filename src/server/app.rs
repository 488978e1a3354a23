//! Camera server
//!
//! Ties the session, control hub and HTTP router together and serves them
//! on one listener.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::control::ControlHub;
use crate::error::Result;
use crate::session::CameraSession;

use super::config::ServerConfig;
use super::routes::{self, AppState};
use super::ws;

/// The camera streaming server
pub struct CameraServer {
    config: ServerConfig,
    session: Arc<CameraSession>,
    hub: Arc<ControlHub>,
}

impl CameraServer {
    /// Create a server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        let session = Arc::new(CameraSession::new(config.source.clone()));
        let hub = Arc::new(ControlHub::new(
            Arc::clone(&session),
            config.control_capacity,
        ));

        Self {
            config,
            session,
            hub,
        }
    }

    /// Get a reference to the camera session
    pub fn session(&self) -> &Arc<CameraSession> {
        &self.session
    }

    /// Get a reference to the control hub
    pub fn hub(&self) -> &Arc<ControlHub> {
        &self.hub
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }

    /// Open the configured startup device
    ///
    /// A missing startup camera is not fatal: the server still comes up,
    /// and a later switch can bring the feed back.
    pub async fn open_initial_device(&self) {
        let device = self.config.initial_device.clone();

        if let Err(err) = self.session.open(device.clone()).await {
            tracing::warn!(device = %device, error = %err, "Startup camera unavailable");
        }
    }

    /// Build the HTTP router
    pub fn router(&self) -> Router {
        let state = AppState {
            session: Arc::clone(&self.session),
            hub: Arc::clone(&self.hub),
            config: self.config.clone(),
        };

        Router::new()
            .route("/", get(routes::index))
            .route("/video", get(routes::video))
            .route("/switch_camera/:id", get(routes::switch_camera))
            .route("/control", get(ws::control_socket))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Run the server
    ///
    /// This method blocks until the listener fails.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Camera server listening");

        axum::serve(listener, self.router()).await?;

        Ok(())
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Camera server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::capture::DeviceId;

    use super::*;

    #[tokio::test]
    async fn test_startup_opens_initial_device() {
        let server = CameraServer::new(ServerConfig::default());
        server.open_initial_device().await;

        assert_eq!(server.session().device().await, Some(DeviceId::Index(0)));
        assert!(server.session().is_active());
    }

    #[tokio::test]
    async fn test_startup_tolerates_missing_camera() {
        let config = ServerConfig::default().initial_device(DeviceId::Index(99));
        let server = CameraServer::new(config);
        server.open_initial_device().await;

        // No device, but the server is still usable and the feed gate is up
        assert_eq!(server.session().device().await, None);
        assert!(server.session().is_active());
    }
}
