//! Camera session
//!
//! Owns the single switchable capture device and arbitrates every access
//! to it. Opening a new device and reading frames share one exclusive lock,
//! so a switch can never interleave with an in-flight read and a reader can
//! never observe a half-closed or half-opened device.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::capture::{DeviceId, Frame, FrameSource, SourceConfig};
use crate::error::DeviceError;

/// The camera-session manager
///
/// At any instant at most one device is open. The activity flag gates
/// whether streaming loops keep running; it is process-wide and is written
/// by control-channel lifecycle events and device switches.
pub struct CameraSession {
    /// The single open device, if any. Exclusive: `open` and `read_frame`
    /// both take this lock for their full duration.
    slot: Mutex<Option<FrameSource>>,

    /// Whether streaming loops should continue. Hot-path read, rare writes.
    active: AtomicBool,

    config: SourceConfig,
}

impl CameraSession {
    /// Create a session with no device open
    ///
    /// Starts active so streaming works before any control client connects.
    pub fn new(config: SourceConfig) -> Self {
        Self {
            slot: Mutex::new(None),
            active: AtomicBool::new(true),
            config,
        }
    }

    /// Switch to `device`
    ///
    /// Closes the currently open device first, releasing its handle, then
    /// attempts the new open. A failed open leaves the session with no
    /// device at all; the caller decides whether and what to retry.
    pub async fn open(&self, device: DeviceId) -> Result<(), DeviceError> {
        let mut slot = self.slot.lock().await;

        if let Some(old) = slot.take() {
            tracing::info!(device = %old.device(), "Releasing camera");
        }

        match FrameSource::open(device.clone(), &self.config).await {
            Ok(source) => {
                tracing::info!(device = %device, "Camera opened");
                *slot = Some(source);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(device = %device, error = %err, "Camera open failed");
                Err(err)
            }
        }
    }

    /// Read the next frame from the open device
    ///
    /// Serialized with `open` through the same lock. A read that exceeds
    /// the configured timeout fails like a device error but leaves the
    /// device open; only the current stream ends.
    pub async fn read_frame(&self) -> Result<Frame, DeviceError> {
        let mut slot = self.slot.lock().await;
        let source = slot.as_mut().ok_or(DeviceError::NoDevice)?;

        match timeout(self.config.read_timeout, source.read()).await {
            Ok(result) => result,
            Err(_) => Err(DeviceError::ReadFailed(format!(
                "no frame within {:?}",
                self.config.read_timeout
            ))),
        }
    }

    /// Set the streaming gate
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Relaxed);
    }

    /// Whether streaming loops should continue
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }

    /// Identifier of the currently open device, if any
    pub async fn device(&self) -> Option<DeviceId> {
        self.slot.lock().await.as_ref().map(|s| s.device().clone())
    }

    /// Capture configuration this session opens devices with
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }
}
