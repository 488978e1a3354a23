//! HTTP route handlers
//!
//! The external surface: viewer page, MJPEG stream and the device-switch
//! endpoint. Handlers hold no state of their own; everything they touch is
//! injected through [`AppState`].

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::capture::DeviceId;
use crate::control::ControlHub;
use crate::session::CameraSession;
use crate::stream::{multipart, StreamPublisher};

use super::config::ServerConfig;
use super::page;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    /// The camera-session manager
    pub session: Arc<CameraSession>,
    /// Control channel hub
    pub hub: Arc<ControlHub>,
    /// Server configuration
    pub config: ServerConfig,
}

/// Result payload of a switch request
///
/// The HTTP status is 200 either way; clients key on `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchResponse {
    /// `"success"` or `"error"`
    pub status: String,
    /// Human-readable outcome
    pub message: String,
}

impl SwitchResponse {
    fn success(device: &DeviceId) -> Self {
        Self {
            status: "success".to_string(),
            message: format!("Switched to camera {}", device),
        }
    }

    fn failure(device: &DeviceId) -> Self {
        Self {
            status: "error".to_string(),
            message: format!(
                "Failed to switch to camera {}. Please check the camera source.",
                device
            ),
        }
    }
}

/// `GET /`: the embedded viewer page
pub async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

/// `GET /video`: the MJPEG stream
///
/// One publisher per request; the body ends when the publisher stops.
pub async fn video(State(state): State<AppState>) -> Response {
    let publisher = StreamPublisher::new(Arc::clone(&state.session), state.config.jpeg_quality);
    let body = Body::from_stream(publisher.into_stream());

    (
        [
            (header::CONTENT_TYPE, multipart::CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}

/// `GET /switch_camera/{id}`: switch the active capture device
///
/// Streaming is frozen for the duration of the swap and resumes only when
/// the new device opened successfully. A failed switch leaves no device
/// open and the feed off.
pub async fn switch_camera(
    Path(id): Path<u32>,
    State(state): State<AppState>,
) -> Json<SwitchResponse> {
    let device = DeviceId::Index(id);

    state.session.set_active(false);

    match state.session.open(device.clone()).await {
        Ok(()) => {
            state.session.set_active(true);
            tracing::info!(device = %device, "Camera switched");
            Json(SwitchResponse::success(&device))
        }
        Err(err) => {
            tracing::warn!(device = %device, error = %err, "Camera switch failed");
            Json(SwitchResponse::failure(&device))
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Duration;

    use super::*;

    fn test_state() -> AppState {
        let config = ServerConfig::default()
            .frame_size(16, 8)
            .frame_interval(Duration::from_millis(10));
        let session = Arc::new(CameraSession::new(config.source.clone()));
        let hub = Arc::new(ControlHub::new(
            Arc::clone(&session),
            config.control_capacity,
        ));

        AppState {
            session,
            hub,
            config,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_success() {
        let state = test_state();

        let Json(response) = switch_camera(Path(1), State(state.clone())).await;

        assert_eq!(response.status, "success");
        assert_eq!(response.message, "Switched to camera 1");
        assert!(state.session.is_active());
        assert_eq!(state.session.device().await, Some(DeviceId::Index(1)));

        let frame = state.session.read_frame().await.unwrap();
        assert_eq!(frame.device, DeviceId::Index(1));
    }

    #[tokio::test]
    async fn test_switch_failure_releases_device_and_feed() {
        let state = test_state();
        state.session.open(DeviceId::Index(0)).await.unwrap();

        let Json(response) = switch_camera(Path(99), State(state.clone())).await;

        assert_eq!(response.status, "error");
        assert_eq!(
            response.message,
            "Failed to switch to camera 99. Please check the camera source."
        );
        assert!(!state.session.is_active());
        // The old device was released before the failed open
        assert_eq!(state.session.device().await, None);
    }

    #[tokio::test]
    async fn test_video_rejects_inactive_feed_with_placeholder() {
        let state = test_state();
        state.session.set_active(false);

        let response = video(State(state)).await;

        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            multipart::CONTENT_TYPE
        );
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        assert_eq!(&body[..], multipart::INACTIVE_PART);
    }

    #[tokio::test]
    async fn test_index_serves_viewer_page() {
        let Html(page) = index().await;

        assert!(page.contains("/video"));
    }
}
